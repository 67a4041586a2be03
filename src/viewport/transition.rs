use super::camera::CameraState;

pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Time-based camera interpolation, stepped by the frame loop.
///
/// Starting a new transition replaces whatever was running; the camera picks
/// up from wherever the caller says it currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CameraTransition {
    #[default]
    Idle,
    Running {
        started_at: f64,
        from: CameraState,
        to: CameraState,
        duration_secs: f64,
    },
}

impl CameraTransition {
    pub fn start(&mut self, from: CameraState, to: CameraState, now: f64, duration_ms: u64) {
        *self = Self::Running {
            started_at: now,
            from,
            to,
            duration_secs: duration_ms as f64 / 1_000.0,
        };
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn target(&self) -> Option<CameraState> {
        match self {
            Self::Idle => None,
            Self::Running { to, .. } => Some(*to),
        }
    }

    /// Camera state for `now`, or `None` when idle. The final step yields the
    /// exact target and returns the machine to idle.
    pub fn tick(&mut self, now: f64) -> Option<CameraState> {
        let Self::Running {
            started_at,
            from,
            to,
            duration_secs,
        } = *self
        else {
            return None;
        };

        let progress = if duration_secs <= 0.0 {
            1.0
        } else {
            ((now - started_at) / duration_secs).clamp(0.0, 1.0) as f32
        };

        if progress >= 1.0 {
            *self = Self::Idle;
            return Some(to);
        }

        Some(from.lerp(to, ease_in_out_quad(progress)))
    }
}
