//! Procedural "nom" bite sound
//!
//! A short crunchy noise burst layered over a descending tone. No asset file.

use rand::Rng;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: u32 = 22_050;
/// Sound length (seconds)
pub const NOM_DURATION: f32 = 0.18;
/// Noise burst only plays for the first 40 ms
pub const CRUNCH_DURATION: f32 = 0.04;

/// Number of samples in the bite sound
pub fn nom_len() -> usize {
    (SAMPLE_RATE as f32 * NOM_DURATION) as usize
}

/// Noise-free part of sample at time `t`
fn wom(t: f32) -> f32 {
    let freq = 400.0 - t * 1800.0;
    (2.0 * std::f32::consts::PI * freq * t).sin() * (-t * 25.0).exp() * 0.45
}

/// Synthesize the bite sound using `rng` for the noise burst.
///
/// Samples are in `[-1, 1]`.
pub fn synthesize_nom_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<f32> {
    (0..nom_len())
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let crunch = if t < CRUNCH_DURATION {
                rng.random_range(-1.0f32..1.0) * (-t * 80.0).exp() * 0.5
            } else {
                0.0
            };
            (crunch + wom(t)).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Synthesize the bite sound with fresh, unseeded noise
pub fn synthesize_nom() -> Vec<f32> {
    synthesize_nom_with(&mut rand::rng())
}

/// Quantize float samples to signed 16-bit PCM
pub fn to_pcm16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|s| (s * 32767.0).floor().clamp(-32768.0, 32767.0) as i16)
        .collect()
}

/// Wrap mono 16-bit PCM in a RIFF/WAVE container
pub fn encode_wav(pcm: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (pcm.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + pcm.len() * 2);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in pcm {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_length() {
        assert_eq!(nom_len(), 3969);
        assert_eq!(synthesize_nom().len(), 3969);
    }

    #[test]
    fn test_noise_stops_after_crunch() {
        let a = synthesize_nom_with(&mut Pcg32::seed_from_u64(1));
        let b = synthesize_nom_with(&mut Pcg32::seed_from_u64(2));
        let crunch_end = (SAMPLE_RATE as f32 * CRUNCH_DURATION).ceil() as usize;
        // Different noise in the burst
        assert!(a[1..crunch_end].iter().zip(&b[1..crunch_end]).any(|(x, y)| x != y));
        // Identical tone afterwards
        assert_eq!(a[crunch_end..], b[crunch_end..]);
        assert!((a[crunch_end + 10] - wom((crunch_end + 10) as f32 / SAMPLE_RATE as f32)).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_decays() {
        let samples = synthesize_nom();
        let peak = |s: &[f32]| s.iter().fold(0.0f32, |m, x| m.max(x.abs()));
        let n = samples.len();
        assert!(peak(&samples) <= 1.0);
        assert!(peak(&samples[n - 400..]) < peak(&samples[1000..1400]));
    }

    #[test]
    fn test_pcm_quantization() {
        assert_eq!(to_pcm16(&[0.0, 1.0, -1.0, 0.5]), vec![0, 32767, -32767, 16383]);
    }

    #[test]
    fn test_wav_header() {
        let pcm = to_pcm16(&synthesize_nom());
        let wav = encode_wav(&pcm, SAMPLE_RATE);
        assert_eq!(wav.len(), 44 + pcm.len() * 2);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..16], b"WAVEfmt ");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), SAMPLE_RATE);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(
            u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]) as usize,
            pcm.len() * 2
        );
        assert_eq!(i16::from_le_bytes([wav[46], wav[47]]), pcm[1]);
    }
}
