use super::canvas::{Canvas, Point};
use super::color::Color;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

const CLOUD_MIN_WIDTH: f64 = 50.0 / 1024.0;
const CLOUD_EXTRA_WIDTH: f64 = 300.0 / 1024.0;
const CLOUD_MIN_HEIGHT: f64 = 20.0 / 1024.0;
const CLOUD_EXTRA_HEIGHT: f64 = 50.0 / 1024.0;
const CLOUD_MAX_ALPHA: f32 = 0.4;

/// Cloud overlay meant for additive blending: a transparent base with
/// faint ellipses of a single color.
pub fn paint_clouds(canvas: &mut Canvas, color: Color, clouds: usize, rng: &mut ChaCha8Rng) {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let side = w.max(h);
    canvas.pixels_mut().fill(0);

    for _ in 0..clouds {
        let center = Point::new(rng.gen::<f64>() * w, rng.gen::<f64>() * h);
        let rx = (rng.gen::<f64>() * CLOUD_EXTRA_WIDTH + CLOUD_MIN_WIDTH) * side;
        let ry = (rng.gen::<f64>() * CLOUD_EXTRA_HEIGHT + CLOUD_MIN_HEIGHT) * side;
        let rotation = rng.gen::<f64>() * PI;
        canvas.set_global_alpha(rng.gen::<f32>() * CLOUD_MAX_ALPHA);
        canvas.fill_ellipse(center, rx, ry, rotation, color, 1.0);
    }
    canvas.set_global_alpha(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn clouds_keep_a_single_color() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut canvas = Canvas::new(128, 128).unwrap();
        paint_clouds(&mut canvas, Color::WHITE, 200, &mut rng);

        let mut covered = 0;
        let mut clear = 0;
        for px in canvas.pixels().chunks_exact(4) {
            if px[3] == 0 {
                clear += 1;
                continue;
            }
            covered += 1;
            assert_eq!(&px[..3], &[255, 255, 255]);
        }
        assert!(covered > 0);
        assert!(covered + clear == 128 * 128);
    }

    #[test]
    fn no_clouds_means_fully_transparent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut canvas = Canvas::new(32, 32).unwrap();
        canvas.fill(Color::BLACK);
        paint_clouds(&mut canvas, Color::WHITE, 0, &mut rng);
        assert!(canvas.pixels().iter().all(|&b| b == 0));
    }
}
