use std::time::Duration;

use thiserror::Error;

// Timing (in milliseconds)
pub const DEFAULT_BASE_INTERVAL_MS: u64 = 600;
pub const DEFAULT_INTERVAL_STEP_MS: u64 = 2;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 50;
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 10;
pub const DEFAULT_BLINK_MS: u64 = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 frame per second")]
    ZeroFrameRate,
    #[error("minimum gravity interval must be greater than zero")]
    ZeroMinInterval,
    #[error("minimum gravity interval ({min} ms) is above the base interval ({base} ms)")]
    MinAboveBase { min: u64, base: u64 },
}

/// Timing knobs for a session. `Default` reproduces the classic pacing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Gravity interval with no lines cleared.
    pub base_interval_ms: u64,
    /// How much the interval shrinks per cleared line.
    pub interval_step_ms: u64,
    /// Floor for the gravity interval.
    pub min_interval_ms: u64,
    pub frames_per_second: u32,
    /// Length of one phase of the line-clear blink; 0 disables the animation.
    pub blink_ms: u64,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::MinAboveBase {
                min: self.min_interval_ms,
                base: self.base_interval_ms,
            });
        }
        Ok(())
    }

    /// Gravity interval after `lines` cleared lines, never below the floor.
    pub fn gravity_interval(&self, lines: u32) -> Duration {
        let reduction = self.interval_step_ms.saturating_mul(lines as u64);
        let ms = self
            .base_interval_ms
            .saturating_sub(reduction)
            .max(self.min_interval_ms);
        Duration::from_millis(ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: DEFAULT_BASE_INTERVAL_MS,
            interval_step_ms: DEFAULT_INTERVAL_STEP_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            blink_ms: DEFAULT_BLINK_MS,
        }
    }
}
