use eframe::egui::{Pos2, Vec2};
use serde::Deserialize;

/// Camera tuning. Durations are milliseconds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub focus_zoom: f32,
    pub focus_duration_ms: u64,
    pub zoom_step_duration_ms: u64,
    pub reset_duration_ms: u64,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub wheel_zoom_in: f32,
    pub wheel_zoom_out: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            focus_zoom: 1.5,
            focus_duration_ms: 800,
            zoom_step_duration_ms: 400,
            reset_duration_ms: 1_000,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
        }
    }
}

/// Offset is in viewport-local screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CameraState {
    /// World origin at the viewport center, zoom 1.
    pub fn centered(viewport_size: Vec2) -> Self {
        Self {
            offset: viewport_size * 0.5,
            zoom: 1.0,
        }
    }

    /// State that puts `world` at the viewport center at `zoom`.
    pub fn looking_at(world: Vec2, zoom: f32, viewport_size: Vec2) -> Self {
        Self {
            offset: viewport_size * 0.5 - world * zoom,
            zoom,
        }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            offset: self.offset + (to.offset - self.offset) * t,
            zoom: self.zoom + (to.zoom - self.zoom) * t,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    state: CameraState,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        let min_zoom = if min_zoom.is_finite() && min_zoom > 0.0 {
            min_zoom
        } else {
            0.1
        };
        let max_zoom = if max_zoom.is_finite() {
            max_zoom.max(min_zoom)
        } else {
            min_zoom
        };

        Self {
            state: CameraState::default(),
            min_zoom,
            max_zoom,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.min_zoom, config.max_zoom)
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn zoom(&self) -> f32 {
        self.state.zoom
    }

    pub fn offset(&self) -> Vec2 {
        self.state.offset
    }

    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    pub fn set_state(&mut self, state: CameraState) {
        self.state = CameraState {
            offset: state.offset,
            zoom: self.clamp_zoom(state.zoom),
        };
    }

    pub fn world_to_screen(&self, world: Vec2) -> Pos2 {
        (world * self.state.zoom + self.state.offset).to_pos2()
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.state.offset) / self.state.zoom
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.state.offset += delta;
    }

    /// Multiplies the zoom. With an anchor the world point under it stays put;
    /// without one the zoom pivots on the world origin.
    pub fn zoom_by(&mut self, factor: f32, anchor: Option<Pos2>) {
        self.state = self.zoomed_by(factor, anchor);
    }

    /// State [`Camera::zoom_by`] would produce, without applying it.
    pub fn zoomed_by(&self, factor: f32, anchor: Option<Pos2>) -> CameraState {
        if !factor.is_finite() || factor <= 0.0 {
            return self.state;
        }

        let zoom = self.clamp_zoom(self.state.zoom * factor);
        match anchor {
            Some(anchor) => CameraState {
                offset: anchor.to_vec2() - self.screen_to_world(anchor) * zoom,
                zoom,
            },
            None => CameraState {
                offset: self.state.offset,
                zoom,
            },
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.state.zoom = self.clamp_zoom(zoom);
        }
    }

    pub fn center_on(&mut self, world: Vec2, viewport_size: Vec2) {
        self.state.offset = viewport_size * 0.5 - world * self.state.zoom;
    }

    pub fn reset(&mut self, viewport_size: Vec2) {
        self.set_state(CameraState::centered(viewport_size));
    }
}
