//! Pixel-art sprites built from axis-aligned rectangles
//!
//! Coordinates are board pixels, origin top-left, `y` down. Every rectangle
//! becomes two triangles.

use super::vertex::{Vertex, colors};
use crate::sim::Heading;

/// Append a filled rectangle
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let (x2, y2) = (x + w, y + h);
    out.extend_from_slice(&[
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]);
}

/// Body segment: outline, base fill, top highlight, bottom shadow, glint
pub fn segment(out: &mut Vec<Vertex>, x: f32, y: f32, s: f32) {
    let inset = 1.0;
    let (ix, iy, is) = (x + inset, y + inset, s - inset * 2.0);

    rect(out, x, y, s, s, colors::BODY_OUTLINE);
    rect(out, ix, iy, is, is, colors::BODY_BASE);
    rect(out, ix, iy, is, (is * 0.35).floor(), colors::BODY_TOP);

    let shadow_h = (is * 0.25).floor();
    rect(out, ix, iy + is - shadow_h, is, shadow_h, colors::BODY_DARK);

    let glint = (s * 0.15).floor().max(2.0);
    rect(out, ix, iy, glint, glint, colors::BODY_GLINT);
}

type Point = (f32, f32);

/// Eye placement for a head of size `s`: (eye1, eye2, pupil offset)
fn eye_layout(x: f32, y: f32, s: f32, heading: Heading) -> (Point, Point, Point) {
    let eye = (s * 0.22).floor().max(2.0);
    let pupil = (eye * 0.55).floor().max(1.0);
    let margin = (s * 0.18).floor();
    let quarter = (eye * 0.25).floor();

    match heading {
        Heading::Right => {
            let e1 = (x + s - margin - eye, y + margin);
            (e1, (e1.0, y + s - margin - eye), (eye - pupil, quarter))
        }
        Heading::Left => {
            let e1 = (x + margin, y + margin);
            (e1, (e1.0, y + s - margin - eye), (0.0, quarter))
        }
        Heading::Up => {
            let e1 = (x + margin, y + margin);
            (e1, (x + s - margin - eye, e1.1), (quarter, 0.0))
        }
        Heading::Down => {
            let e1 = (x + margin, y + s - margin - eye);
            (e1, (x + s - margin - eye, e1.1), (quarter, eye - pupil))
        }
    }
}

/// Snake head with eyes looking along `heading`
pub fn head(out: &mut Vec<Vertex>, x: f32, y: f32, s: f32, heading: Heading) {
    let inset = 1.0;
    let (ix, iy, is) = (x + inset, y + inset, s - inset * 2.0);

    rect(out, x, y, s, s, colors::HEAD_OUTLINE);
    rect(out, ix, iy, is, is, colors::HEAD_BASE);
    rect(out, ix, iy, is, (is * 0.4).floor(), colors::HEAD_TOP);

    let eye = (s * 0.22).floor().max(2.0);
    let pupil = (eye * 0.55).floor().max(1.0);
    let (e1, e2, off) = eye_layout(x, y, s, heading);

    for (ex, ey) in [e1, e2] {
        rect(out, ex, ey, eye, eye, colors::EYE_WHITE);
        rect(out, ex + off.0, ey + off.1, pupil, pupil, colors::PUPIL);
    }
}

/// Food egg: shell with outline, yolk and highlights
pub fn egg(out: &mut Vec<Vertex>, x: f32, y: f32, s: f32) {
    let p = (s / 5.0).floor().max(2.0);
    let cx = x + (s / 2.0).floor();
    let cy = y + (s / 2.0).floor();

    let (ew, eh) = (p * 3.0, p * 4.0);
    let ex = cx - (ew / 2.0).floor();
    let ey = cy - (eh / 2.0).floor();

    rect(out, ex - 1.0, ey - 1.0, ew + 2.0, eh + 2.0, colors::EGG_OUTLINE);
    rect(out, ex, ey, ew, eh, colors::EGG_SHELL);

    let yolk = p * 2.0;
    let yx = cx - (yolk / 2.0).floor();
    rect(out, yx, cy, yolk, yolk, colors::EGG_YOLK);
    rect(out, yx, cy, p, p, colors::EGG_YOLK_LIGHT);

    rect(out, ex, ey, p, p, colors::EGG_HIGHLIGHT);
}
