//! Software raster with the handful of 2D-canvas primitives the
//! generators need: rect/polygon/circle/ellipse fills, circle strokes,
//! linear and concentric radial gradients, global alpha and the
//! `source-over` / `source-atop` composite modes.
//!
//! Pixels are straight RGBA8 in row-major order, the same layout as a
//! browser `ImageData`, so the host can upload them without conversion.

use super::color::Color;
use crate::error::{PlanetDeckError, Result};

/// Largest side accepted by [`Canvas::new`].
pub const MAX_CANVAS_SIDE: u32 = 4096;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    /// New paint is drawn over existing pixels.
    SourceOver,
    /// New paint only lands where the destination is already opaque,
    /// and the destination alpha is kept.
    SourceAtop,
}

#[derive(Clone, Debug, Default)]
pub struct Gradient {
    stops: Vec<(f32, Color)>,
}

impl Gradient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push((offset.clamp(0.0, 1.0), color));
        self
    }

    /// Spreads the colors evenly over `[0, 1]`.
    pub fn even(colors: &[Color]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        colors
            .iter()
            .enumerate()
            .fold(Self::new(), |g, (i, c)| g.stop(i as f32 / last, *c))
    }

    pub fn sample(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::TRANSPARENT,
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.0 && t <= b.0 {
                let span = b.0 - a.0;
                if span <= f32::EPSILON {
                    return b.1;
                }
                return a.1.lerp(b.1, (t - a.0) / span);
            }
        }
        last.1
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    global_alpha: f32,
    composite: Composite,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PlanetDeckError::InvalidCanvas { width, height });
        }
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(PlanetDeckError::CanvasTooLarge { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            global_alpha: 1.0,
            composite: Composite::SourceOver,
        })
    }

    /// A 1x1 transparent canvas; the fallback when allocation is refused.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
            global_alpha: 1.0,
            composite: Composite::SourceOver,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_composite(&mut self, composite: Composite) {
        self.composite = composite;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, src: Color, coverage: f32) {
        let sa = src.a * self.global_alpha * coverage;
        if sa <= 0.0 {
            return;
        }
        let i = self.offset(x, y);
        let px = &mut self.pixels[i..i + 4];
        let da = px[3] as f32 / 255.0;
        let src_rgb = [src.r as f32, src.g as f32, src.b as f32];

        match self.composite {
            Composite::SourceOver => {
                let out_a = sa + da * (1.0 - sa);
                if out_a <= 0.0 {
                    return;
                }
                for c in 0..3 {
                    let dc = px[c] as f32;
                    let v = (src_rgb[c] * sa + dc * da * (1.0 - sa)) / out_a;
                    px[c] = v.round().clamp(0.0, 255.0) as u8;
                }
                px[3] = (out_a * 255.0).round() as u8;
            }
            Composite::SourceAtop => {
                if px[3] == 0 {
                    return;
                }
                for c in 0..3 {
                    let dc = px[c] as f32;
                    let v = src_rgb[c] * sa + dc * (1.0 - sa);
                    px[c] = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    /// Clamped pixel range whose centers may fall in `[lo, hi)`.
    fn span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<u32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().min(limit as f64);
        if end <= start {
            return 0..0;
        }
        start as u32..end as u32
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        for py in Self::span(y, y + h, self.height) {
            for px in Self::span(x, x + w, self.width) {
                self.blend(px, py, color, 1.0);
            }
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.fill_rect(0.0, 0.0, self.width as f64, self.height as f64, color);
    }

    /// Fills the whole canvas with a gradient running from `from` to `to`.
    pub fn fill_linear_gradient(&mut self, from: Point, to: Point, gradient: &Gradient) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len_sq = dx * dx + dy * dy;
        for py in 0..self.height {
            for px in 0..self.width {
                let t = if len_sq <= f64::EPSILON {
                    0.0
                } else {
                    let cx = px as f64 + 0.5 - from.x;
                    let cy = py as f64 + 0.5 - from.y;
                    (cx * dx + cy * dy) / len_sq
                };
                let color = gradient.sample(t as f32);
                self.blend(px, py, color, 1.0);
            }
        }
    }

    /// Fills the whole canvas with a gradient between two concentric
    /// circles. Inside `r0` the first stop pads, outside `r1` the last.
    pub fn fill_radial_gradient(&mut self, center: Point, r0: f64, r1: f64, gradient: &Gradient) {
        let span = (r1 - r0).max(f64::EPSILON);
        for py in 0..self.height {
            for px in 0..self.width {
                let d = (px as f64 + 0.5 - center.x).hypot(py as f64 + 0.5 - center.y);
                let color = gradient.sample(((d - r0) / span) as f32);
                self.blend(px, py, color, 1.0);
            }
        }
    }

    /// Nonzero-winding scanline fill of a closed polygon.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for py in Self::span(min_y, max_y, self.height) {
            let yc = py as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                let dir = if a.y <= yc && b.y > yc {
                    1
                } else if b.y <= yc && a.y > yc {
                    -1
                } else {
                    continue;
                };
                let x = a.x + (yc - a.y) / (b.y - a.y) * (b.x - a.x);
                crossings.push((x, dir));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            let mut start = 0.0;
            for &(x, dir) in crossings.iter() {
                let was_inside = winding != 0;
                winding += dir;
                if !was_inside && winding != 0 {
                    start = x;
                } else if was_inside && winding == 0 {
                    for px in Self::span(start, x, self.width) {
                        self.blend(px, py, color, 1.0);
                    }
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.fill_ellipse(center, radius, radius, 0.0, color, 1.0);
    }

    /// Antialiased ellipse fill. `feather` widens the edge ramp in pixels,
    /// giving a soft rim when larger than one.
    pub fn fill_ellipse(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
        color: Color,
        feather: f64,
    ) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let reach = rx.max(ry) + 1.0;
        let (sin, cos) = rotation.sin_cos();
        let min_r = rx.min(ry);
        let feather = feather.max(1.0);

        for py in Self::span(center.y - reach, center.y + reach, self.height) {
            for px in Self::span(center.x - reach, center.x + reach, self.width) {
                let dx = px as f64 + 0.5 - center.x;
                let dy = py as f64 + 0.5 - center.y;
                let lx = dx * cos + dy * sin;
                let ly = -dx * sin + dy * cos;
                let q = ((lx / rx).powi(2) + (ly / ry).powi(2)).sqrt();
                let edge = (1.0 - q) * min_r;
                let coverage = ((edge + 0.5) / feather).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage as f32);
                }
            }
        }
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f64, line_width: f64, color: Color) {
        if radius <= 0.0 || line_width <= 0.0 {
            return;
        }
        let half = line_width / 2.0;
        let reach = radius + half + 1.0;
        for py in Self::span(center.y - reach, center.y + reach, self.height) {
            for px in Self::span(center.x - reach, center.x + reach, self.width) {
                let d = (px as f64 + 0.5 - center.x).hypot(py as f64 + 0.5 - center.y);
                let coverage = (half - (d - radius).abs() + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage as f32);
                }
            }
        }
    }

    /// Composites another canvas of the same size on top of this one.
    pub fn draw_canvas(&mut self, layer: &Canvas) {
        if layer.width != self.width || layer.height != self.height {
            return;
        }
        for py in 0..self.height {
            for px in 0..self.width {
                let [r, g, b, a] = layer.pixel(px, py);
                if a > 0 {
                    self.blend(px, py, Color::rgba(r, g, b, a as f32 / 255.0), 1.0);
                }
            }
        }
    }

    /// Keeps this canvas only where `mask` is painted, scaling each
    /// pixel's alpha by the mask's (the `destination-in` composite).
    pub fn clip_to(&mut self, mask: &Canvas) {
        if mask.width != self.width || mask.height != self.height {
            return;
        }
        for (px, m) in self.pixels.chunks_exact_mut(4).zip(mask.pixels.chunks_exact(4)) {
            px[3] = ((px[3] as u32 * m[3] as u32 + 127) / 255) as u8;
        }
    }
}
