//! Audio system
//!
//! The bite sound is synthesized at startup, so there are no asset files.
//! In the browser the samples are played through the Web Audio API; native
//! builds only count what would have played.

pub mod synth;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioBuffer, AudioContext};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snake ate the food
    Nom,
}

/// Owns the output context and the mute flag
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    /// Decoded bite sound, built lazily on first unlock
    #[cfg(target_arch = "wasm32")]
    nom: Option<AudioBuffer>,
    volume: f32,
    muted: bool,
    /// Effects actually sent to the output
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(0.35)
    }
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            #[cfg(target_arch = "wasm32")]
            nom: None,
            volume: volume.clamp(0.0, 1.0),
            muted: false,
            played: 0,
        }
    }

    /// Create the audio context and render the sample buffer.
    ///
    /// Browsers only allow this after a user gesture, so it is called from
    /// the start button handler. Safe to call more than once.
    pub fn unlock(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if self.ctx.is_none() {
                self.ctx = AudioContext::new().ok();
                if self.ctx.is_none() {
                    log::warn!("No AudioContext, playing silently");
                    return;
                }
            }
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
                if self.nom.is_none() {
                    self.nom = build_buffer(ctx, &synth::synthesize_nom());
                }
            }
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute; returns whether sound is now enabled
    pub fn toggle(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "off" } else { "on" });
        !self.muted
    }

    /// Number of effects played so far
    pub fn played(&self) -> u64 {
        self.played
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect. Failures are swallowed; sound is cosmetic.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;

        #[cfg(target_arch = "wasm32")]
        {
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let buffer = match effect {
                SoundEffect::Nom => self.nom.as_ref(),
            };
            if let Some(buffer) = buffer {
                if play_buffer(ctx, buffer, vol).is_none() {
                    log::debug!("Playback of {:?} failed", effect);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        log::debug!("Play {:?} at volume {:.2}", effect, vol);
    }
}

#[cfg(target_arch = "wasm32")]
fn build_buffer(ctx: &AudioContext, samples: &[f32]) -> Option<AudioBuffer> {
    let buffer = ctx
        .create_buffer(1, samples.len() as u32, synth::SAMPLE_RATE as f32)
        .ok()?;
    buffer.copy_to_channel(samples, 0).ok()?;
    Some(buffer)
}

#[cfg(target_arch = "wasm32")]
fn play_buffer(ctx: &AudioContext, buffer: &AudioBuffer, vol: f32) -> Option<()> {
    let source = ctx.create_buffer_source().ok()?;
    let gain = ctx.create_gain().ok()?;
    source.set_buffer(Some(buffer));
    gain.gain().set_value(vol);
    source.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;
    source.start().ok()?;
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences() {
        let mut audio = AudioManager::default();
        audio.play(SoundEffect::Nom);
        assert_eq!(audio.played(), 1);
        assert!(!audio.toggle());
        audio.play(SoundEffect::Nom);
        assert_eq!(audio.played(), 1);
        assert!(audio.toggle());
        audio.play(SoundEffect::Nom);
        assert_eq!(audio.played(), 2);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut audio = AudioManager::new(0.0);
        audio.play(SoundEffect::Nom);
        assert_eq!(audio.played(), 0);
    }
}
