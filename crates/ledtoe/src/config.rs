//! Runtime configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Which side places the first mark after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// The AI opens.
    #[default]
    Ai,
    /// The human opens.
    Human,
}

impl FirstPlayer {
    /// Returns the display label for this option.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Human => "Player",
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct LedtoeConfig {
    /// Turn order and loop pacing.
    #[serde(default)]
    game: GameConfig,

    /// Joystick bands and debounce.
    #[serde(default)]
    joystick: JoystickConfig,

    /// Clap detector thresholds and timing.
    #[serde(default)]
    microphone: MicrophoneConfig,

    /// Flash animations.
    #[serde(default)]
    animation: AnimationConfig,
}

impl LedtoeConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration from a file, falling back to defaults when it does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates a TOML document.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mic = &self.microphone;
        if !(mic.rise_threshold.is_finite() && mic.rise_threshold > 0.0) {
            return Err(ConfigError::new(format!(
                "microphone.rise_threshold must be positive, got {}",
                mic.rise_threshold
            )));
        }
        if !(mic.fall_ratio > 0.0 && mic.fall_ratio < 1.0) {
            return Err(ConfigError::new(format!(
                "microphone.fall_ratio must be between 0 and 1 exclusive, got {}",
                mic.fall_ratio
            )));
        }
        if mic.analysis_window_ms <= mic.quiet_timeout_ms {
            return Err(ConfigError::new(format!(
                "microphone.analysis_window_ms ({}) must exceed microphone.quiet_timeout_ms ({})",
                mic.analysis_window_ms, mic.quiet_timeout_ms
            )));
        }

        let stick = &self.joystick;
        if stick.low_band >= stick.high_band {
            return Err(ConfigError::new(format!(
                "joystick.low_band ({}) must be below joystick.high_band ({})",
                stick.low_band, stick.high_band
            )));
        }

        if self.game.poll_interval_ms == 0 {
            return Err(ConfigError::new(
                "game.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Turn order and loop pacing.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Who moves first after every reset.
    #[serde(default)]
    first_player: FirstPlayer,

    /// Pause before the AI places its mark.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Sleep between iterations of the control loop.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: FirstPlayer::default(),
            ai_delay_ms: default_ai_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_poll_interval_ms() -> u64 {
    10
}

/// Analog joystick comparator bands and debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct JoystickConfig {
    /// Readings below this deflect the axis one way.
    #[serde(default = "default_low_band")]
    low_band: u16,

    /// Readings above this deflect the axis the other way.
    #[serde(default = "default_high_band")]
    high_band: u16,

    /// Minimum time between two accepted cursor moves.
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            low_band: default_low_band(),
            high_band: default_high_band(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_low_band() -> u16 {
    1000
}

fn default_high_band() -> u16 {
    3000
}

fn default_debounce_ms() -> u64 {
    200
}

/// Clap detector thresholds and timing.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct MicrophoneConfig {
    /// Amplitude (volts) a sample must exceed to register a strike.
    #[serde(default = "default_rise_threshold")]
    rise_threshold: f32,

    /// Re-arm level as a fraction of the rise threshold.
    #[serde(default = "default_fall_ratio")]
    fall_ratio: f32,

    /// Strikes older than this are forgotten.
    #[serde(default = "default_analysis_window_ms")]
    analysis_window_ms: u64,

    /// Silence after the last strike that closes a gesture.
    #[serde(default = "default_quiet_timeout_ms")]
    quiet_timeout_ms: u64,
}

impl MicrophoneConfig {
    /// Re-arm level in volts.
    pub fn fall_threshold(&self) -> f32 {
        self.rise_threshold * self.fall_ratio
    }
}

impl Default for MicrophoneConfig {
    fn default() -> Self {
        Self {
            rise_threshold: default_rise_threshold(),
            fall_ratio: default_fall_ratio(),
            analysis_window_ms: default_analysis_window_ms(),
            quiet_timeout_ms: default_quiet_timeout_ms(),
        }
    }
}

fn default_rise_threshold() -> f32 {
    1.5
}

fn default_fall_ratio() -> f32 {
    0.6
}

fn default_analysis_window_ms() -> u64 {
    1000
}

fn default_quiet_timeout_ms() -> u64 {
    400
}

/// A blinking animation: `cycles` frames of `period_ms` each, alternating on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Number of frames; even frames are lit.
    pub cycles: u8,
    /// Duration of each frame.
    pub period_ms: u64,
}

/// Flash animations for game events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Whole-matrix flash in the winner's color.
    #[serde(default = "default_win_flash")]
    win: Flash,

    /// Whole-matrix flash in the draw color.
    #[serde(default = "default_draw_flash")]
    draw: Flash,

    /// Single-cell flash confirming the human's move.
    #[serde(default = "default_move_flash")]
    confirm: Flash,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            win: default_win_flash(),
            draw: default_draw_flash(),
            confirm: default_move_flash(),
        }
    }
}

fn default_win_flash() -> Flash {
    Flash {
        cycles: 5,
        period_ms: 200,
    }
}

fn default_draw_flash() -> Flash {
    Flash {
        cycles: 3,
        period_ms: 300,
    }
}

fn default_move_flash() -> Flash {
    Flash {
        cycles: 3,
        period_ms: 100,
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
