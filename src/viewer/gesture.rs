//! Turns a noisy per-frame hand-landmark stream into three control
//! channels: a rotation rate, debounced swipe events and a smoothed
//! pinch-zoom distance.
//!
//! The engine is a reduction: `GestureState::advance(config, frame)`
//! updates the state once and reports what happened. Nothing here blocks
//! or keeps a clock; the frame stream is the only time source.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// MediaPipe hand landmark indices.
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
const HAND_LANDMARKS: usize = 21;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Rotation added per frame at full fingertip offset from center.
    pub rotation_rate: f64,
    /// Per-frame horizontal fingertip travel that counts as a swipe.
    pub swipe_threshold: f64,
    /// Frames to ignore swipes after one fires.
    pub swipe_cooldown_frames: u32,
    /// Pinch distance treated as fully pinched.
    pub pinch_near: f64,
    /// Pinch distance treated as fully spread.
    pub pinch_far: f64,
    /// Camera distance when fully pinched.
    pub pinched_distance: f64,
    /// Camera distance when fully spread.
    pub spread_distance: f64,
    pub zoom_blend: f64,
    /// Camera distance the view drifts back to without a hand.
    pub rest_distance: f64,
    pub rest_blend: f64,
    /// Flip x so a selfie-view camera feels like a mirror.
    pub mirror_x: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            rotation_rate: 0.03,
            swipe_threshold: 0.08,
            swipe_cooldown_frames: 40,
            pinch_near: 0.02,
            pinch_far: 0.25,
            pinched_distance: 80.0,
            spread_distance: 20.0,
            zoom_blend: 0.08,
            rest_distance: 65.0,
            rest_blend: 0.02,
            mirror_x: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn in_frame(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    fn distance(&self, other: &Landmark) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The two tracked points of one video frame, in normalized image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkFrame {
    pub index_tip: Landmark,
    pub thumb_tip: Landmark,
}

impl LandmarkFrame {
    /// Validated constructor; out-of-frame or non-finite points yield `None`.
    pub fn new(index_tip: Landmark, thumb_tip: Landmark) -> Option<Self> {
        if index_tip.in_frame() && thumb_tip.in_frame() {
            Some(Self {
                index_tip,
                thumb_tip,
            })
        } else {
            None
        }
    }

    /// Picks the index and thumb tips out of a flat hand array with
    /// `stride` floats per landmark (2 for x/y, 3 with depth).
    pub fn from_hand(coords: &[f32], stride: usize) -> Option<Self> {
        if stride < 2 || coords.len() < HAND_LANDMARKS * stride {
            return None;
        }
        let point = |i: usize| Landmark::new(coords[i * stride] as f64, coords[i * stride + 1] as f64);
        Self::new(point(INDEX_TIP), point(THUMB_TIP))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SwipeDirection {
    /// Toward the previous planet.
    Previous,
    /// Toward the next planet.
    Next,
}

impl SwipeDirection {
    pub fn step(self) -> isize {
        match self {
            SwipeDirection::Previous => -1,
            SwipeDirection::Next => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStatus {
    Waiting,
    NoHand,
    Tracking,
    SwipeLeft,
    SwipeRight,
    Unavailable,
}

pub fn status_label(status: GestureStatus) -> &'static str {
    match status {
        GestureStatus::Waiting => "Waiting for hand...",
        GestureStatus::NoHand => "No hand detected",
        GestureStatus::Tracking => "Tracking...",
        GestureStatus::SwipeLeft => "<<< SWIPE LEFT",
        GestureStatus::SwipeRight => "SWIPE RIGHT >>>",
        GestureStatus::Unavailable => "Hand tracking unavailable",
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

/// Everything the engine remembers between frames.
#[derive(Clone, Debug)]
pub struct GestureState {
    /// Fingertip x of the previous tracked frame; `None` right after the
    /// hand (re)appears so reacquisition never reads as a swipe.
    pub last_x: Option<f64>,
    pub velocity: f64,
    pub cooldown: u32,
    pub zoom: f64,
    pub target_rotation: Rotation,
}

/// What one frame produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureOutput {
    pub rotation_delta: Rotation,
    pub swipe: Option<SwipeDirection>,
    pub zoom: f64,
    /// `None` on cooldown frames: whatever the last evaluated frame
    /// reported (usually the swipe itself) stays up.
    pub status: Option<GestureStatus>,
    /// Fingertip cursor offset in scene units.
    pub cursor: Option<(f64, f64)>,
}

const CURSOR_SPAN: (f64, f64) = (15.0, 10.0);

impl GestureState {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            last_x: None,
            velocity: 0.0,
            cooldown: 0,
            zoom: config.rest_distance,
            target_rotation: Rotation::default(),
        }
    }

    /// Advances one video frame; `None` means no hand was detected.
    pub fn advance(&mut self, config: &GestureConfig, frame: Option<&LandmarkFrame>) -> GestureOutput {
        match frame {
            Some(frame) => self.track(config, frame),
            None => self.lose_hand(config),
        }
    }

    fn track(&mut self, config: &GestureConfig, frame: &LandmarkFrame) -> GestureOutput {
        let raw_x = if config.mirror_x {
            1.0 - frame.index_tip.x
        } else {
            frame.index_tip.x
        };
        let raw_y = frame.index_tip.y;
        let x = (raw_x - 0.5) * 2.0;
        let y = (raw_y - 0.5) * 2.0;

        let rotation_delta = Rotation {
            x: y * config.rotation_rate,
            y: x * config.rotation_rate,
        };
        self.target_rotation.x += rotation_delta.x;
        self.target_rotation.y += rotation_delta.y;

        self.velocity = self.last_x.map(|last| raw_x - last).unwrap_or(0.0);
        self.last_x = Some(raw_x);

        let mut swipe = None;
        let mut status = None;
        if self.cooldown == 0 {
            status = Some(GestureStatus::Tracking);
            if self.velocity > config.swipe_threshold {
                swipe = Some(SwipeDirection::Previous);
                status = Some(GestureStatus::SwipeLeft);
            } else if self.velocity < -config.swipe_threshold {
                swipe = Some(SwipeDirection::Next);
                status = Some(GestureStatus::SwipeRight);
            }
            if let Some(direction) = swipe {
                debug!(?direction, velocity = self.velocity, "swipe");
                self.cooldown = config.swipe_cooldown_frames;
            }
        } else {
            self.cooldown -= 1;
        }

        let pinch = frame.index_tip.distance(&frame.thumb_tip);
        let target = pinch_target(config, pinch);
        self.zoom += (target - self.zoom) * config.zoom_blend;

        GestureOutput {
            rotation_delta,
            swipe,
            zoom: self.zoom,
            status,
            cursor: Some((x * CURSOR_SPAN.0, -y * CURSOR_SPAN.1)),
        }
    }

    fn lose_hand(&mut self, config: &GestureConfig) -> GestureOutput {
        self.velocity = 0.0;
        self.last_x = None;
        self.zoom += (config.rest_distance - self.zoom) * config.rest_blend;

        GestureOutput {
            rotation_delta: Rotation::default(),
            swipe: None,
            zoom: self.zoom,
            status: Some(GestureStatus::NoHand),
            cursor: None,
        }
    }
}

/// Maps a pinch distance onto a camera distance, saturating outside the
/// calibrated range.
pub fn pinch_target(config: &GestureConfig, pinch: f64) -> f64 {
    let span = config.pinch_far - config.pinch_near;
    let t = if span.abs() <= f64::EPSILON {
        0.0
    } else {
        ((pinch - config.pinch_near) / span).clamp(0.0, 1.0)
    };
    config.pinched_distance + t * (config.spread_distance - config.pinched_distance)
}
