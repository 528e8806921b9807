pub mod catalog;
pub mod gesture;
pub mod view;

use crate::config::ViewerConfig;
use crate::surface::GeneratedSurface;
use catalog::{class_label, wrap_index, PlanetDescriptor, PLANETS};
use gesture::{status_label, GestureOutput, GestureState, GestureStatus, LandmarkFrame, Rotation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use view::{DisplayState, MoonView, SurfaceView};

/// Orbit planes never tilt further than this, whatever the config says.
pub const MAX_MOON_TILT: f64 = std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tracking {
    /// No landmark frame has arrived yet.
    Pending,
    Active,
    /// The hand tracker failed to start; pointer input only from here on.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonOrbit {
    pub tilt_x: f64,
    pub tilt_z: f64,
    pub angle: f64,
    pub speed: f64,
}

/// Interaction controller: owns the current planet, its surfaces and the
/// shared rotation/zoom state that gesture frames, pointer events and
/// animation ticks all write to.
///
/// Both producers run on one cooperative thread, so plain `&mut self`
/// access is enough. A multi-threaded host has to put the viewer behind a
/// mutex or feed it through a single-consumer queue.
pub struct Viewer {
    config: ViewerConfig,
    rng: ChaCha8Rng,
    index: usize,
    gesture: GestureState,
    status: GestureStatus,
    tracking: Tracking,
    rotation: Rotation,
    camera_distance: f64,
    cursor: Option<(f64, f64)>,
    surface: GeneratedSurface,
    moon_orbits: Vec<MoonOrbit>,
    cloud_angle: f64,
    generation: u32,
}

impl Viewer {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, ViewerConfig::default())
    }

    pub fn with_config(seed: u64, config: ViewerConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let index = config.controls.start_index % PLANETS.len();
        let planet = &PLANETS[index];
        let surface = planet.synthesize(&config.surface, &mut rng);
        let moon_orbits = Self::orbits_for(planet, config.controls.moon_tilt, &mut rng);
        let gesture = GestureState::new(&config.gesture);
        let camera_distance = config.gesture.rest_distance;
        info!(seed, planet = planet.name, "viewer ready");

        Self {
            config,
            rng,
            index,
            gesture,
            status: GestureStatus::Waiting,
            tracking: Tracking::Pending,
            rotation: Rotation::default(),
            camera_distance,
            cursor: None,
            surface,
            moon_orbits,
            cloud_angle: 0.0,
            generation: 0,
        }
    }

    fn orbits_for(planet: &PlanetDescriptor, max_tilt: f64, rng: &mut ChaCha8Rng) -> Vec<MoonOrbit> {
        // NaN fails the `> 0.0` check below and gives flat orbits.
        let max_tilt = max_tilt.clamp(0.0, MAX_MOON_TILT);
        planet
            .moons
            .iter()
            .map(|moon| {
                let mut tilt = || {
                    if max_tilt > 0.0 {
                        rng.gen_range(-max_tilt..max_tilt)
                    } else {
                        0.0
                    }
                };
                MoonOrbit {
                    tilt_x: tilt(),
                    tilt_z: tilt(),
                    angle: 0.0,
                    speed: moon.speed,
                }
            })
            .collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn planet(&self) -> &'static PlanetDescriptor {
        &PLANETS[self.index]
    }

    pub fn surface(&self) -> &GeneratedSurface {
        &self.surface
    }

    pub fn tracking(&self) -> Tracking {
        self.tracking
    }

    pub fn target_rotation(&self) -> Rotation {
        self.gesture.target_rotation
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn camera_distance(&self) -> f64 {
        self.camera_distance
    }

    pub fn moon_orbits(&self) -> &[MoonOrbit] {
        &self.moon_orbits
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Feeds one hand-tracking result. Returns `None` once tracking has
    /// been declared failed; those frames are dropped.
    pub fn on_landmarks(&mut self, frame: Option<&LandmarkFrame>) -> Option<GestureOutput> {
        if self.tracking == Tracking::Failed {
            return None;
        }
        self.tracking = Tracking::Active;

        let output = self.gesture.advance(&self.config.gesture, frame);
        if let Some(status) = output.status {
            self.status = status;
        }
        self.cursor = output.cursor;
        if let Some(direction) = output.swipe {
            self.switch_planet(direction.step());
        }
        Some(output)
    }

    pub fn tracking_failed(&mut self) {
        if self.tracking == Tracking::Failed {
            return;
        }
        warn!("hand tracking failed to initialize, pointer input only");
        self.tracking = Tracking::Failed;
        self.status = GestureStatus::Unavailable;
        self.cursor = None;
    }

    /// Pointer position in viewport coordinates, both axes in `[-1, 1]`
    /// with +y up.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let rate = self.config.controls.pointer_rate;
        self.gesture.target_rotation.y += x.clamp(-1.0, 1.0) * rate;
        self.gesture.target_rotation.x += y.clamp(-1.0, 1.0) * rate;
    }

    pub fn pointer_activate(&mut self) {
        self.switch_planet(1);
    }

    /// Replaces the current planet in one step: the old bundle is dropped,
    /// orientation recenters and a fresh bundle is painted.
    pub fn switch_planet(&mut self, step: isize) {
        self.index = wrap_index(self.index, step, PLANETS.len());
        let planet = &PLANETS[self.index];

        self.gesture.target_rotation = Rotation::default();
        self.rotation = Rotation::default();
        self.surface = planet.synthesize(&self.config.surface, &mut self.rng);
        self.moon_orbits = Self::orbits_for(planet, self.config.controls.moon_tilt, &mut self.rng);
        self.cloud_angle = 0.0;
        self.generation = self.generation.wrapping_add(1);
        info!(planet = planet.name, generation = self.generation, "planet switched");
    }

    /// One animation frame: ease the applied rotation and camera toward
    /// their targets and advance the cosmetic spins.
    pub fn tick(&mut self) -> DisplayState {
        let controls = &self.config.controls;
        let target = self.gesture.target_rotation;
        self.rotation.x += (target.x - self.rotation.x) * controls.rotation_damping;
        self.rotation.y += (target.y - self.rotation.y) * controls.rotation_damping;
        self.gesture.target_rotation.y += controls.auto_spin;

        self.camera_distance += (self.gesture.zoom - self.camera_distance) * controls.camera_damping;
        self.cloud_angle += controls.cloud_spin;
        for orbit in self.moon_orbits.iter_mut() {
            orbit.angle += orbit.speed;
        }

        self.display_state()
    }

    pub fn display_state(&self) -> DisplayState {
        let planet = self.planet();
        let moons = planet
            .moons
            .iter()
            .zip(self.moon_orbits.iter())
            .map(|(moon, orbit)| MoonView {
                name: moon.name,
                radius: moon.radius,
                color: moon.color,
                distance: moon.distance,
                tilt_x: orbit.tilt_x,
                tilt_z: orbit.tilt_z,
                angle: orbit.angle,
            })
            .collect();

        DisplayState {
            index: self.index,
            name: planet.name,
            class: class_label(planet.class),
            description: planet.description,
            radius: planet.radius,
            moons,
            status: status_label(self.status),
            rotation: self.rotation,
            camera_distance: self.camera_distance,
            cloud_angle: self.cloud_angle,
            cursor: self.cursor,
            generation: self.generation,
            pointer_only: self.tracking == Tracking::Failed,
        }
    }

    pub fn surface_view(&self) -> SurfaceView {
        SurfaceView::new(self.generation, self.planet(), &self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::gesture::{Landmark, SwipeDirection};
    use super::*;
    use crate::surface::SurfaceConfig;

    fn quick_config() -> ViewerConfig {
        ViewerConfig {
            surface: SurfaceConfig {
                base_size: 32,
                oceanic_size: 48,
                moon_size: 16,
                ..SurfaceConfig::default()
            },
            ..ViewerConfig::default()
        }
    }

    /// Frame with the mirrored fingertip at `x`.
    fn hand_at(x: f64) -> LandmarkFrame {
        let tip = Landmark::new(1.0 - x, 0.5);
        LandmarkFrame::new(tip, Landmark::new(1.0 - x, 0.6)).unwrap()
    }

    #[test]
    fn leftward_swipe_from_earth_lands_on_venus() {
        let mut viewer = Viewer::with_config(7, quick_config());
        assert_eq!(viewer.index(), 2);
        assert_eq!(viewer.planet().name, "EARTH");
        assert_eq!(viewer.generation(), 0);

        viewer.on_landmarks(Some(&hand_at(0.40)));
        viewer.on_landmarks(Some(&hand_at(0.42)));
        let out = viewer.on_landmarks(Some(&hand_at(0.55))).unwrap();

        assert_eq!(out.swipe, Some(SwipeDirection::Previous));
        assert_eq!(viewer.index(), 1);
        assert_eq!(viewer.planet().name, "VENUS");
        assert_eq!(viewer.target_rotation(), Rotation::default());
        assert_eq!(viewer.rotation(), Rotation::default());
        assert_eq!(viewer.generation(), 1);

        let surface = viewer.surface();
        assert_eq!(surface.color.pixels.len(), 32 * 32 * 4);
        assert!(surface.specular.is_none());
        assert!(surface.moons.is_empty());
        assert_eq!(viewer.display_state().status, "<<< SWIPE LEFT");
    }

    #[test]
    fn swipe_label_stays_up_through_the_cooldown() {
        let mut viewer = Viewer::with_config(7, quick_config());
        viewer.on_landmarks(Some(&hand_at(0.40)));
        viewer.on_landmarks(Some(&hand_at(0.55)));
        assert_eq!(viewer.planet().name, "VENUS");

        let cooldown = viewer.config.gesture.swipe_cooldown_frames;
        for _ in 0..cooldown {
            viewer.on_landmarks(Some(&hand_at(0.55)));
            viewer.tick();
            assert_eq!(viewer.display_state().status, "<<< SWIPE LEFT");
        }
        viewer.on_landmarks(Some(&hand_at(0.55)));
        assert_eq!(viewer.display_state().status, "Tracking...");
        assert_eq!(viewer.planet().name, "VENUS");
    }

    #[test]
    fn pointer_activation_wraps_past_the_last_planet() {
        let config = ViewerConfig {
            controls: crate::config::ControlConfig {
                start_index: PLANETS.len() - 1,
                ..Default::default()
            },
            ..quick_config()
        };
        let mut viewer = Viewer::with_config(1, config);
        assert_eq!(viewer.planet().name, "NEPTUNE");
        viewer.pointer_activate();
        assert_eq!(viewer.index(), 0);

        viewer.switch_planet(-1);
        assert_eq!(viewer.index(), PLANETS.len() - 1);
    }

    #[test]
    fn pointer_and_gesture_share_one_accumulator() {
        let mut viewer = Viewer::with_config(3, quick_config());
        viewer.pointer_move(1.0, -1.0);
        let after_pointer = viewer.target_rotation();
        assert!((after_pointer.y - 0.02).abs() < 1e-12);
        assert!((after_pointer.x + 0.02).abs() < 1e-12);

        // A fingertip at the right edge adds the larger gesture rate.
        viewer.on_landmarks(Some(&hand_at(1.0)));
        let after_hand = viewer.target_rotation();
        assert!((after_hand.y - (0.02 + 0.03)).abs() < 1e-12);

        viewer.pointer_move(f64::NAN, 0.0);
        assert_eq!(viewer.target_rotation(), after_hand);
    }

    #[test]
    fn ticks_ease_rotation_and_keep_spinning() {
        let mut viewer = Viewer::with_config(4, quick_config());
        let first = viewer.tick();
        assert_eq!(first.rotation, Rotation::default());
        assert!((viewer.target_rotation().y - 0.0005).abs() < 1e-15);

        viewer.tick();
        assert!((viewer.rotation().y - 0.0005 * 0.05).abs() < 1e-15);

        for _ in 0..500 {
            viewer.tick();
        }
        let lag = viewer.target_rotation().y - viewer.rotation().y;
        assert!(lag > 0.0 && lag < 0.02, "lag {lag}");
    }

    #[test]
    fn camera_follows_smoothed_zoom() {
        let mut viewer = Viewer::with_config(5, quick_config());
        let wide = LandmarkFrame::new(Landmark::new(0.5, 0.2), Landmark::new(0.5, 0.9)).unwrap();
        for _ in 0..200 {
            viewer.on_landmarks(Some(&wide));
            viewer.tick();
        }
        assert!((viewer.camera_distance() - 20.0).abs() < 0.5);

        for _ in 0..2000 {
            viewer.on_landmarks(None);
            viewer.tick();
        }
        assert!((viewer.camera_distance() - 65.0).abs() < 0.01);
        assert_eq!(viewer.display_state().status, "No hand detected");
    }

    #[test]
    fn tracking_failure_is_terminal_and_pointer_still_works() {
        let mut viewer = Viewer::with_config(6, quick_config());
        assert_eq!(viewer.display_state().status, "Waiting for hand...");

        viewer.tracking_failed();
        viewer.tracking_failed();
        assert_eq!(viewer.tracking(), Tracking::Failed);
        assert!(viewer.on_landmarks(Some(&hand_at(0.3))).is_none());
        assert!(viewer.on_landmarks(None).is_none());

        let state = viewer.display_state();
        assert_eq!(state.status, "Hand tracking unavailable");
        assert!(state.pointer_only);

        viewer.pointer_activate();
        assert_eq!(viewer.planet().name, "MARS");
    }

    #[test]
    fn moons_orbit_at_their_own_speed() {
        let config = ViewerConfig {
            controls: crate::config::ControlConfig {
                start_index: 4,
                ..Default::default()
            },
            ..quick_config()
        };
        let mut viewer = Viewer::with_config(8, config);
        assert_eq!(viewer.moon_orbits().len(), 4);
        for orbit in viewer.moon_orbits() {
            assert!(orbit.tilt_x.abs() <= 0.25 && orbit.tilt_z.abs() <= 0.25);
        }
        for _ in 0..10 {
            viewer.tick();
        }
        let io = viewer.moon_orbits()[0];
        assert!((io.angle - 0.3).abs() < 1e-9);
        assert_eq!(viewer.display_state().moons[3].name, "Callisto");
    }

    #[test]
    fn oversized_moon_tilt_is_clamped() {
        for moon_tilt in [1e308, f64::INFINITY, f64::NAN, -3.0] {
            let config = ViewerConfig {
                controls: crate::config::ControlConfig {
                    start_index: 4,
                    moon_tilt,
                    ..Default::default()
                },
                ..quick_config()
            };
            let viewer = Viewer::with_config(2, config);
            for orbit in viewer.moon_orbits() {
                assert!(orbit.tilt_x.abs() <= MAX_MOON_TILT, "tilt {}", orbit.tilt_x);
                assert!(orbit.tilt_z.abs() <= MAX_MOON_TILT, "tilt {}", orbit.tilt_z);
            }
        }
    }

    #[test]
    fn same_seed_paints_the_same_planet() {
        let a = Viewer::with_config(99, quick_config());
        let b = Viewer::with_config(99, quick_config());
        assert_eq!(a.surface().color, b.surface().color);
        assert_eq!(a.surface().specular, b.surface().specular);
        assert_eq!(a.moon_orbits(), b.moon_orbits());
    }
}
