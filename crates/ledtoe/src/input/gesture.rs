//! Clap pattern classifier.
//!
//! Turns a stream of amplitude samples into discrete gestures. A sample
//! crossing the rise threshold while the latch is armed is a *strike*; the
//! latch re-arms only once the signal drops below the lower fall threshold,
//! so one loud sound counts once. Strikes collect in a log bounded by the
//! analysis window. When no new strike has arrived for the quiet timeout the
//! log is classified by size alone: one strike advances the cursor, two or
//! more confirm the move. Strike spacing inside the window is not examined.

use crate::clock::Millis;
use crate::config::MicrophoneConfig;
use std::collections::VecDeque;
use tracing::{debug, instrument, trace};

/// A classified group of strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Gesture {
    /// Exactly one strike in the window.
    SingleStrike,
    /// Two or more strikes in the window.
    MultiStrike,
}

/// Hysteresis latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdState {
    /// Waiting for the signal to rise above the rise threshold.
    #[default]
    Armed,
    /// Above threshold; waiting for the signal to fall below the fall threshold.
    Triggered,
}

/// Classifier thresholds and timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClapSettings {
    /// Level a sample must exceed to strike.
    pub rise_threshold: f32,
    /// Level a sample must drop below to re-arm. Lower than `rise_threshold`.
    pub fall_threshold: f32,
    /// Strikes older than this relative to the current sample are dropped.
    pub analysis_window_ms: Millis,
    /// Silence since the last strike that finalizes a gesture.
    pub quiet_timeout_ms: Millis,
}

impl From<&MicrophoneConfig> for ClapSettings {
    fn from(config: &MicrophoneConfig) -> Self {
        Self {
            rise_threshold: *config.rise_threshold(),
            fall_threshold: config.fall_threshold(),
            analysis_window_ms: *config.analysis_window_ms(),
            quiet_timeout_ms: *config.quiet_timeout_ms(),
        }
    }
}

impl Default for ClapSettings {
    fn default() -> Self {
        Self::from(&MicrophoneConfig::default())
    }
}

/// Stateful strike detector and gesture classifier.
#[derive(Debug, Clone)]
pub struct ClapClassifier {
    settings: ClapSettings,
    latch: ThresholdState,
    strikes: VecDeque<Millis>,
}

impl ClapClassifier {
    /// Creates an armed classifier with an empty strike log.
    #[instrument]
    pub fn new(settings: ClapSettings) -> Self {
        Self {
            settings,
            latch: ThresholdState::Armed,
            strikes: VecDeque::new(),
        }
    }

    /// Current latch state.
    pub fn latch(&self) -> ThresholdState {
        self.latch
    }

    /// Timestamps of strikes not yet classified.
    pub fn strikes(&self) -> &VecDeque<Millis> {
        &self.strikes
    }

    /// Feeds one sample; returns a gesture when a quiet period closes one.
    ///
    /// Timestamps are expected to increase. A timestamp older than a logged
    /// strike is treated as zero elapsed time.
    pub fn sample(&mut self, now: Millis, amplitude: f32) -> Option<Gesture> {
        if self.latch == ThresholdState::Armed && amplitude > self.settings.rise_threshold {
            self.latch = ThresholdState::Triggered;
            self.strikes.push_back(now);
            debug!(now, amplitude, strikes = self.strikes.len(), "Strike detected");
        } else if amplitude < self.settings.fall_threshold {
            self.latch = ThresholdState::Armed;
        }

        let window = self.settings.analysis_window_ms;
        self.strikes
            .retain(|&strike| now.saturating_sub(strike) <= window);

        let last = *self.strikes.back()?;
        if now.saturating_sub(last) <= self.settings.quiet_timeout_ms {
            return None;
        }

        let gesture = if self.strikes.len() == 1 {
            Gesture::SingleStrike
        } else {
            Gesture::MultiStrike
        };
        trace!(strikes = self.strikes.len(), "Quiet period elapsed");
        debug!(%gesture, "Gesture classified");
        self.strikes.clear();
        Some(gesture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOUD: f32 = 3.0;
    const QUIET: f32 = 0.1;
    /// Between fall (0.9) and rise (1.5).
    const MID: f32 = 1.2;

    fn classifier() -> ClapClassifier {
        ClapClassifier::new(ClapSettings::default())
    }

    /// Feeds `(timestamp, amplitude)` pairs and collects emitted gestures.
    fn feed(classifier: &mut ClapClassifier, samples: &[(Millis, f32)]) -> Vec<(Millis, Gesture)> {
        samples
            .iter()
            .filter_map(|&(t, a)| classifier.sample(t, a).map(|g| (t, g)))
            .collect()
    }

    /// Quiet samples every 10 ms over `from..=to`.
    fn silence(from: Millis, to: Millis) -> Vec<(Millis, f32)> {
        (from..=to).step_by(10).map(|t| (t, QUIET)).collect()
    }

    #[test]
    fn test_single_strike_then_silence() {
        let mut c = classifier();
        let mut samples = vec![(0, LOUD)];
        samples.extend(silence(10, 1000));

        let gestures = feed(&mut c, &samples);
        assert_eq!(gestures, vec![(410, Gesture::SingleStrike)]);
        assert!(c.strikes().is_empty());
    }

    #[test]
    fn test_two_strikes_then_silence() {
        let mut c = classifier();
        let mut samples = vec![(0, LOUD)];
        samples.extend(silence(10, 200));
        samples.push((210, LOUD));
        samples.extend(silence(220, 1200));

        let gestures = feed(&mut c, &samples);
        assert_eq!(gestures, vec![(620, Gesture::MultiStrike)]);
    }

    #[test]
    fn test_three_strikes_are_multi() {
        let mut c = classifier();
        let mut samples = Vec::new();
        for start in [0, 100, 200] {
            samples.push((start, LOUD));
            samples.extend(silence(start + 10, start + 90));
        }
        samples.extend(silence(300, 1000));

        let gestures = feed(&mut c, &samples);
        assert_eq!(gestures.len(), 1);
        assert_eq!(gestures[0].1, Gesture::MultiStrike);
    }

    #[test]
    fn test_sustained_sound_is_one_strike() {
        let mut c = classifier();
        let mut samples: Vec<(Millis, f32)> = (0..=100).step_by(10).map(|t| (t, LOUD)).collect();
        samples.extend(silence(110, 1000));

        let gestures = feed(&mut c, &samples);
        assert_eq!(gestures, vec![(410, Gesture::SingleStrike)]);
    }

    #[test]
    fn test_hysteresis_band_does_not_rearm() {
        let mut c = classifier();
        // Dips into the band between thresholds, never below the fall threshold.
        let samples = [(0, LOUD), (10, MID), (20, LOUD), (30, MID), (40, LOUD)];
        feed(&mut c, &samples);
        assert_eq!(c.strikes().len(), 1);
        assert_eq!(c.latch(), ThresholdState::Triggered);

        c.sample(50, QUIET);
        assert_eq!(c.latch(), ThresholdState::Armed);
        c.sample(60, LOUD);
        assert_eq!(c.strikes().len(), 2);
    }

    #[test]
    fn test_stale_strike_is_pruned() {
        let mut c = classifier();
        // Sparse sampling: the first strike ages out before the quiet check sees it.
        assert_eq!(c.sample(0, LOUD), None);
        assert_eq!(c.sample(100, QUIET), None);
        assert_eq!(c.sample(900, LOUD), None);
        assert_eq!(c.sample(1200, QUIET), None);
        assert_eq!(c.strikes().len(), 1);
        assert_eq!(c.sample(1350, QUIET), Some(Gesture::SingleStrike));
    }

    #[test]
    fn test_everything_pruned_emits_nothing() {
        let mut c = classifier();
        c.sample(0, LOUD);
        c.sample(10, QUIET);
        assert_eq!(c.sample(5000, QUIET), None);
        assert!(c.strikes().is_empty());
    }

    #[test]
    fn test_backwards_timestamp_counts_as_zero_elapsed() {
        let mut c = classifier();
        c.sample(1000, LOUD);
        assert_eq!(c.sample(500, QUIET), None);
        assert_eq!(c.strikes().len(), 1);
        assert_eq!(c.sample(1401, QUIET), Some(Gesture::SingleStrike));
    }

    #[test]
    fn test_window_just_above_quiet_timeout_still_classifies() {
        let mut c = ClapClassifier::new(ClapSettings {
            analysis_window_ms: 410,
            ..ClapSettings::default()
        });
        let mut samples = vec![(0, LOUD)];
        samples.extend(silence(10, 3000));
        assert_eq!(feed(&mut c, &samples), vec![(410, Gesture::SingleStrike)]);
    }

    #[test]
    fn test_one_gesture_per_quiet_period() {
        let mut c = classifier();
        let mut samples = vec![(0, LOUD)];
        samples.extend(silence(10, 3000));
        assert_eq!(feed(&mut c, &samples).len(), 1);
    }
}
