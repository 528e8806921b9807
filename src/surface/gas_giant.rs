use super::canvas::{Canvas, Gradient, Point};
use super::color::Color;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// First palette entry that marks a banded planet as carrying a storm.
pub const STORM_BASE: Color = Color::hex(0x4a4036);
const STORM_CENTER: (f64, f64) = (0.7, 0.6);
const STORM_RADII: (f64, f64) = (60.0 / 1024.0, 40.0 / 1024.0);
const STORM_COLOR: Color = Color::rgba(100, 50, 20, 0.3);

/// Turbulence bands, normalized to the canvas height.
const BAND_MIN_HEIGHT: f64 = 10.0 / 1024.0;
const BAND_EXTRA_HEIGHT: f64 = 50.0 / 1024.0;
const BAND_MAX_OPACITY: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct BandedParams<'a> {
    pub palette: &'a [Color],
    pub bands: usize,
}

impl BandedParams<'_> {
    pub fn has_storm(&self) -> bool {
        self.palette
            .first()
            .map(|c| c.same_rgb(&STORM_BASE))
            .unwrap_or(false)
    }
}

/// Vertical gradient across the whole palette with translucent white
/// turbulence bands on top, plus a storm blemish for storm palettes.
pub fn paint_banded(canvas: &mut Canvas, params: &BandedParams<'_>, rng: &mut ChaCha8Rng) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    let Some(base) = params.palette.first() else {
        return;
    };
    canvas.fill(*base);
    canvas.fill_linear_gradient(
        Point::new(0.0, 0.0),
        Point::new(0.0, h),
        &Gradient::even(params.palette),
    );

    for _ in 0..params.bands {
        let y = rng.gen::<f64>() * h;
        let band_h = (rng.gen::<f64>() * BAND_EXTRA_HEIGHT + BAND_MIN_HEIGHT) * h;
        let opacity = rng.gen::<f32>() * BAND_MAX_OPACITY;
        canvas.fill_rect(0.0, y, w, band_h, Color::WHITE.with_alpha(opacity));
    }

    if params.has_storm() {
        let center = Point::new(w * STORM_CENTER.0, h * STORM_CENTER.1);
        let (rx, ry) = (w * STORM_RADII.0, h * STORM_RADII.1);
        canvas.fill_ellipse(center, rx, ry, 0.0, STORM_COLOR, ry * 0.35);
    }
}
