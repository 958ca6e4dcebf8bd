use crate::api::types::WheelDirection;

/// Accumulated wheel state: scroll progress, rotation speed and last direction.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelState {
    /// Scroll progress, clamped to [0, 1].
    pub scroll_progress: f32,
    /// Spin / gather intensity, clamped to [0, speed_max].
    pub rotation_speed: f32,
    /// Direction of the previous event; `None` before the first one.
    pub last_direction: Option<WheelDirection>,
}

/// Gains and clamps applied to each wheel delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelGains {
    pub progress_per_delta: f32,
    pub speed_per_delta: f32,
    pub speed_max: f32,
}

/// What a single wheel event did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelOutcome {
    pub direction: WheelDirection,
    /// Direction differs from the previous event (or this is the first event).
    pub changed: bool,
}

impl WheelOutcome {
    /// True when the field must be re-scattered: a change into the up direction.
    pub fn rescatter(&self) -> bool {
        self.changed && self.direction == WheelDirection::Up
    }
}

impl WheelState {
    pub fn new() -> Self {
        Self {
            scroll_progress: 0.0,
            rotation_speed: 0.0,
            last_direction: None,
        }
    }

    /// Fold one finite wheel delta into the state.
    pub fn apply(&mut self, delta: f32, gains: &WheelGains) -> WheelOutcome {
        let direction = WheelDirection::from_delta(delta);
        let changed = self.last_direction != Some(direction);
        self.last_direction = Some(direction);

        self.scroll_progress = (self.scroll_progress + delta * gains.progress_per_delta).clamp(0.0, 1.0);

        let step = delta.abs() * gains.speed_per_delta;
        let speed = match direction {
            WheelDirection::Down => self.rotation_speed + step,
            WheelDirection::Up => self.rotation_speed - step,
        };
        self.rotation_speed = speed.clamp(0.0, gains.speed_max);

        WheelOutcome { direction, changed }
    }
}

impl Default for WheelState {
    fn default() -> Self {
        Self::new()
    }
}
