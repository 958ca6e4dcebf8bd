/// Direction of a wheel gesture.
/// A positive delta scrolls the page down; zero and negative deltas count as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    pub fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            WheelDirection::Down
        } else {
            WheelDirection::Up
        }
    }
}

/// Which policy the target resolver uses to pick particle destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    /// Cone around +Y whose width follows scroll progress.
    #[default]
    Sector,
    /// Compact jittered cluster around the gather anchor.
    Gather,
}

/// Coarse state of the whole field, derived from input state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Rotation speed is zero; particles drift freely.
    Dispersed,
    /// Scrolling down: gather targets, growth active.
    Engaging,
    /// Moving but scrolling up: sector targets refreshed every tick.
    SectorTracking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_delta() {
        assert_eq!(WheelDirection::from_delta(100.0), WheelDirection::Down);
        assert_eq!(WheelDirection::from_delta(-3.0), WheelDirection::Up);
        assert_eq!(WheelDirection::from_delta(0.0), WheelDirection::Up);
    }

    #[test]
    fn default_target_mode_is_sector() {
        assert_eq!(TargetMode::default(), TargetMode::Sector);
    }
}
