//! Playback speed, state and status reporting.

use std::time::Duration;

use relaxviz_engine::MessageTone;
use serde::{Deserialize, Serialize};

/// Playback speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    /// 0.25x speed
    QuarterSpeed,
    /// 0.5x speed
    HalfSpeed,
    /// Normal speed (1x)
    #[default]
    Normal,
    /// 2x speed
    Double,
    /// 4x speed
    Quadruple,
}

impl PlaybackSpeed {
    /// Get the speed multiplier.
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::QuarterSpeed => 0.25,
            PlaybackSpeed::HalfSpeed => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
        }
    }

    /// Time between autoplay steps at this speed. Never zero.
    pub fn interval(&self, base: Duration) -> Duration {
        let nanos = (base.as_nanos() as f64 / self.multiplier()).round() as u64;
        Duration::from_nanos(nanos).max(Duration::from_millis(1))
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No trace, or rewound to the beginning
    #[default]
    Stopped,
    /// Autoplay is stepping forward
    Playing,
    /// Autoplay paused; position kept
    Paused,
    /// Stepped past the last step
    Finished,
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub position: usize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub speed: PlaybackSpeed,
    pub progress: f64,
    pub is_complete: bool,
    pub message: String,
    pub tone: MessageTone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_multipliers() {
        assert_eq!(PlaybackSpeed::QuarterSpeed.multiplier(), 0.25);
        assert_eq!(PlaybackSpeed::Normal.multiplier(), 1.0);
        assert_eq!(PlaybackSpeed::Double.multiplier(), 2.0);
    }

    #[test]
    fn interval_scales_base() {
        let base = Duration::from_millis(700);
        assert_eq!(PlaybackSpeed::Normal.interval(base), base);
        assert_eq!(PlaybackSpeed::Double.interval(base), Duration::from_millis(350));
        assert_eq!(PlaybackSpeed::HalfSpeed.interval(base), Duration::from_millis(1400));
        assert_eq!(
            PlaybackSpeed::Quadruple.interval(Duration::from_millis(2)),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn speed_round_trips_through_json() {
        let json = serde_json::to_string(&PlaybackSpeed::Double).unwrap();
        assert_eq!(json, "\"Double\"");
        let parsed: PlaybackSpeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PlaybackSpeed::Double);
    }
}
