use super::canvas::{Canvas, Composite, Gradient, Point};
use super::color::Color;
use super::continents::{draw_continents, layout_continents, ContinentLayout, ContinentPaint};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub const DEEP_OCEAN: Color = Color::hex(0x0b1638);
pub const SHALLOW_OCEAN: Color = Color::hex(0x1e3c7e);
pub const FOREST: Color = Color::hex(0x2d5a27);
pub const ICE: Color = Color::hex(0xeeeeee);
pub const DESERT: Color = Color::hex(0x6b5b3e);
pub const SPECULAR_SEA: Color = Color::WHITE;
pub const SPECULAR_LAND: Color = Color::hex(0x111111);

const GRAIN_PROBABILITY: f64 = 0.05;
const GRAIN_AMPLITUDE: f64 = 20.0;
const DESERT_BAND: (f64, f64) = (0.3, 0.4);
const DESERT_MAX_RADIUS: f64 = 60.0 / 2048.0;

#[derive(Clone, Copy, Debug)]
pub struct OceanicParams {
    pub jitter: f64,
    pub desert_patches: usize,
}

pub fn ocean_gradient() -> Gradient {
    Gradient::new()
        .stop(0.0, DEEP_OCEAN)
        .stop(0.5, SHALLOW_OCEAN)
        .stop(1.0, DEEP_OCEAN)
}

/// Paints the diffuse map into `color` and the matching reflectance mask
/// into `specular`. Both canvases must share a size; the continents are
/// laid out once and rasterized into each.
pub fn paint_oceanic(
    color: &mut Canvas,
    specular: &mut Canvas,
    params: &OceanicParams,
    rng: &mut ChaCha8Rng,
) -> ContinentLayout {
    let layout = layout_continents(color.width(), color.height(), params.jitter, rng);
    paint_diffuse(color, &layout, params, rng);

    specular.fill(SPECULAR_SEA);
    if specular.width() == layout.width && specular.height() == layout.height {
        draw_continents(specular, &layout, ContinentPaint::single(SPECULAR_LAND));
    }
    layout
}

fn paint_diffuse(canvas: &mut Canvas, layout: &ContinentLayout, params: &OceanicParams, rng: &mut ChaCha8Rng) {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);

    let mut land = match Canvas::new(canvas.width(), canvas.height()) {
        Ok(layer) => layer,
        Err(_) => return,
    };
    draw_continents(&mut land, layout, ContinentPaint { land: FOREST, ice: ICE });

    canvas.fill_linear_gradient(Point::new(0.0, 0.0), Point::new(0.0, h), &ocean_gradient());
    canvas.draw_canvas(&land);
    add_grain(canvas, rng);

    // Patches go source-atop onto a land-only copy of the grained map, so
    // the transparent sea in that copy takes no paint.
    let mut patches = canvas.clone();
    patches.clip_to(&land);
    patches.set_composite(Composite::SourceAtop);
    let side = w.max(h);
    for _ in 0..params.desert_patches {
        let x = rng.gen::<f64>() * w;
        let y = h * DESERT_BAND.0 + rng.gen::<f64>() * h * DESERT_BAND.1;
        let r = rng.gen::<f64>() * DESERT_MAX_RADIUS * side;
        patches.fill_circle(Point::new(x, y), r, DESERT);
    }
    canvas.draw_canvas(&patches);
}

/// Luminance jitter on a small random fraction of pixels.
fn add_grain(canvas: &mut Canvas, rng: &mut ChaCha8Rng) {
    for px in canvas.pixels_mut().chunks_exact_mut(4) {
        if !rng.gen_bool(GRAIN_PROBABILITY) {
            continue;
        }
        let noise = (rng.gen::<f64>() - 0.5) * GRAIN_AMPLITUDE;
        for channel in px.iter_mut().take(3) {
            *channel = (*channel as f64 + noise).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::continents::COASTLINE_JITTER;
    use rand::SeedableRng;

    fn params() -> OceanicParams {
        OceanicParams {
            jitter: COASTLINE_JITTER,
            desert_patches: 80,
        }
    }

    #[test]
    fn land_in_specular_mask_is_never_sea_in_diffuse() {
        let size = 192;
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut color = Canvas::new(size, size).unwrap();
        let mut gloss = Canvas::new(size, size).unwrap();
        paint_oceanic(&mut color, &mut gloss, &params(), &mut rng);

        let sea = ocean_gradient();
        let mut land_pixels = 0;
        for y in 0..size {
            let ocean = sea.sample((y as f32 + 0.5) / size as f32);
            for x in 0..size {
                if gloss.pixel(x, y)[0] != SPECULAR_LAND.r {
                    continue;
                }
                land_pixels += 1;
                let px = color.pixel(x, y);
                let diff = (px[0] as i32 - ocean.r as i32).abs()
                    + (px[1] as i32 - ocean.g as i32).abs()
                    + (px[2] as i32 - ocean.b as i32).abs();
                assert!(diff > 30, "land pixel ({x},{y}) looks like sea: {:?}", px);
            }
        }
        assert!(land_pixels > (size * size / 5) as usize);
    }

    #[test]
    fn specular_sea_is_bright_and_land_is_dark() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut color = Canvas::new(128, 128).unwrap();
        let mut gloss = Canvas::new(128, 128).unwrap();
        paint_oceanic(&mut color, &mut gloss, &params(), &mut rng);

        // Mid-Atlantic and the middle of Eurasia.
        assert_eq!(gloss.pixel(60, 96), [255, 255, 255, 255]);
        assert_eq!(gloss.pixel(96, 32), [0x11, 0x11, 0x11, 255]);
    }

    #[test]
    fn deserts_never_reach_the_sea() {
        let size = 128;
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut color = Canvas::new(size, size).unwrap();
        let mut gloss = Canvas::new(size, size).unwrap();
        let heavy = OceanicParams {
            jitter: COASTLINE_JITTER,
            desert_patches: 400,
        };
        paint_oceanic(&mut color, &mut gloss, &heavy, &mut rng);

        for y in 0..size {
            for x in 0..size {
                if gloss.pixel(x, y)[0] == 255 {
                    let px = color.pixel(x, y);
                    assert!(px[2] > px[0], "sea pixel ({x},{y}) is not blue: {:?}", px);
                }
            }
        }
    }

    #[test]
    fn grain_is_laid_down_before_the_patches() {
        // Same seed with and without patches: the sea only comes out the
        // same if the grain pass draws from the rng before any patch does.
        let size = 128;
        let no_patches = OceanicParams {
            jitter: COASTLINE_JITTER,
            desert_patches: 0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut bare = Canvas::new(size, size).unwrap();
        let mut gloss = Canvas::new(size, size).unwrap();
        paint_oceanic(&mut bare, &mut gloss, &no_patches, &mut rng);

        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut patched = Canvas::new(size, size).unwrap();
        let mut gloss = Canvas::new(size, size).unwrap();
        paint_oceanic(&mut patched, &mut gloss, &params(), &mut rng);

        let desert = [DESERT.r, DESERT.g, DESERT.b, 255];
        let mut desert_pixels = 0;
        for y in 0..size {
            for x in 0..size {
                let px = patched.pixel(x, y);
                if px == desert {
                    desert_pixels += 1;
                }
                if gloss.pixel(x, y)[0] == 255 {
                    let before = bare.pixel(x, y);
                    for c in 0..4 {
                        let diff = (px[c] as i32 - before[c] as i32).abs();
                        assert!(diff <= 1, "sea pixel ({x},{y}) changed: {:?} vs {:?}", px, before);
                    }
                }
            }
        }
        assert!(desert_pixels > 0);
    }
}
