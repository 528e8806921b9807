//! Planetary ring texture and the geometry-to-UV remap that must agree
//! with it.
//!
//! The texture is a radial gradient over the canvas: the gradient starts
//! at 0.2 and ends at 0.5 of the canvas side, measured from the center,
//! so in UV space the ring sits between radius 0.2 and the texture edge
//! at 0.5. [`RingLayout`] carries those numbers to the mesh side instead
//! of leaving a second copy of the constants in the renderer.

use super::canvas::{Canvas, Gradient, Point};
use super::color::Color;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

const GRADIENT_START: f64 = 0.2;
const GRADIENT_END: f64 = 0.5;

const HOLE_STOP: f32 = 0.0;
const INNER_STOP: f32 = 0.1;
const OUTER_STOP: f32 = 0.4;
const DIVISION_STOP: f32 = 0.6;
const OUTER_BAND_STOP: f32 = 0.7;
const INNER_AGAIN_STOP: f32 = 0.9;
const EDGE_STOP: f32 = 1.0;
const DIVISION_COLOR: Color = Color::rgba(0, 0, 0, 0.8);

const DUST_INNER: f64 = 0.25;
const DUST_SPREAD: f64 = 0.25;
const DUST_MIN_WIDTH: f64 = 0.5 / 1024.0;
const DUST_EXTRA_WIDTH: f64 = 1.5 / 1024.0;
const DUST_MAX_ALPHA: f32 = 0.4;

/// Ring mesh radii as multiples of the planet radius.
pub const RING_INNER_SCALE: f64 = 1.3;
pub const RING_OUTER_SCALE: f64 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RingBand {
    pub inner: f64,
    pub outer: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RingLayout {
    /// The two visible bands, as UV distances from the texture center.
    pub bands: [RingBand; 2],
    /// UV distance of the texture edge from its center.
    pub edge_radius: f64,
    /// Geometry radius times this factor equals the UV span of the texture;
    /// the outer mesh radius is divided by `outer * uv_scale`.
    pub uv_scale: f64,
}

impl RingLayout {
    pub fn standard() -> Self {
        let uv = |stop: f32| GRADIENT_START + stop as f64 * (GRADIENT_END - GRADIENT_START);
        Self {
            bands: [
                RingBand {
                    inner: uv(INNER_STOP),
                    outer: uv(DIVISION_STOP),
                },
                RingBand {
                    inner: uv(DIVISION_STOP),
                    outer: GRADIENT_END,
                },
            ],
            edge_radius: GRADIENT_END,
            uv_scale: 1.0 / GRADIENT_END,
        }
    }

    /// Texture coordinate for a ring vertex at `(x, y)` in the ring plane,
    /// for a mesh whose outer radius is `outer_radius`.
    pub fn uv(&self, x: f64, y: f64, outer_radius: f64) -> (f64, f64) {
        let span = outer_radius * self.uv_scale;
        if span <= 0.0 {
            return (0.5, 0.5);
        }
        (x / span + 0.5, y / span + 0.5)
    }

    /// Rewrites UVs for a flat list of vertex positions with `stride`
    /// floats per vertex (x and y come first).
    pub fn remap(&self, positions: &[f32], stride: usize, outer_radius: f64) -> Vec<f32> {
        if stride < 2 {
            return Vec::new();
        }
        positions
            .chunks_exact(stride)
            .flat_map(|v| {
                let (u, w) = self.uv(v[0] as f64, v[1] as f64, outer_radius);
                [u as f32, w as f32]
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RingGeometry {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl RingGeometry {
    pub fn for_planet(radius: f64) -> Self {
        Self {
            inner_radius: radius * RING_INNER_SCALE,
            outer_radius: radius * RING_OUTER_SCALE,
        }
    }
}

pub fn ring_gradient(inner: Color, outer: Color) -> Gradient {
    Gradient::new()
        .stop(HOLE_STOP, Color::TRANSPARENT)
        .stop(INNER_STOP, inner)
        .stop(OUTER_STOP, outer)
        .stop(DIVISION_STOP, DIVISION_COLOR)
        .stop(OUTER_BAND_STOP, outer)
        .stop(INNER_AGAIN_STOP, inner)
        .stop(EDGE_STOP, Color::TRANSPARENT)
}

pub fn paint_ring(
    canvas: &mut Canvas,
    inner: Color,
    outer: Color,
    dust_lines: usize,
    rng: &mut ChaCha8Rng,
) -> RingLayout {
    let side = canvas.width().min(canvas.height()) as f64;
    let center = Point::new(canvas.width() as f64 / 2.0, canvas.height() as f64 / 2.0);

    canvas.fill_radial_gradient(
        center,
        side * GRADIENT_START,
        side * GRADIENT_END,
        &ring_gradient(inner, outer),
    );

    for _ in 0..dust_lines {
        let r = side * DUST_INNER + rng.gen::<f64>() * side * DUST_SPREAD;
        let width = (rng.gen::<f64>() * DUST_EXTRA_WIDTH + DUST_MIN_WIDTH) * side;
        let alpha = rng.gen::<f32>() * DUST_MAX_ALPHA;
        canvas.stroke_circle(center, r, width, Color::WHITE.with_alpha(alpha));
    }

    RingLayout::standard()
}
