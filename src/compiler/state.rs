//! Running musical state of the timeline builder

use crate::chart::{Chip, ChipKind, TimeSignature};

/// State threaded through a course in line order
#[derive(Debug, Clone, PartialEq)]
pub struct PlayState {
    /// Current time, kept fractional so note slots don't drift
    pub clock: f64,
    pub bpm: f64,
    pub time_signature: TimeSignature,
    pub scroll: f64,
    /// Rotation in degrees
    pub rotation: f64,
    pub gogo: bool,
    /// Visibility given to subsequent bar lines
    pub bar_visible: bool,
    pub measure_index: usize,
}

impl PlayState {
    pub fn new(bpm: f64) -> Self {
        Self {
            clock: 0.0,
            bpm,
            time_signature: TimeSignature::COMMON,
            scroll: 1.0,
            rotation: 0.0,
            gogo: false,
            bar_visible: true,
            measure_index: 0,
        }
    }

    /// Time as emitted on chips
    pub fn time(&self) -> i64 {
        self.clock as i64
    }

    /// Length of one measure under the current signature and BPM
    pub fn measure_duration(&self) -> f64 {
        super::note::measure_duration(self.time_signature, self.bpm)
    }

    /// Chip of the given kind carrying the current state
    pub fn snapshot(&self, kind: ChipKind) -> Chip {
        let visible = match kind {
            ChipKind::Measure => self.bar_visible,
            ChipKind::Note => true,
            _ => false,
        };

        Chip {
            kind,
            time: self.time(),
            bpm: self.bpm,
            scroll: self.scroll,
            rotation: self.rotation.to_radians(),
            time_signature: self.time_signature,
            measure_index: self.measure_index,
            gogo: self.gogo,
            visible,
            note: None,
            roll_target: None,
            roll_end: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_truncates_clock() {
        let mut state = PlayState::new(150.0);
        state.clock = 1234.9;
        state.rotation = 180.0;
        let chip = state.snapshot(ChipKind::BpmChange);
        assert_eq!(chip.time, 1234);
        assert_eq!(chip.bpm, 150.0);
        assert!((chip.rotation - std::f64::consts::PI).abs() < 1e-12);
        assert!(!chip.visible);
    }

    #[test]
    fn test_measure_snapshot_follows_bar_visibility() {
        let mut state = PlayState::new(120.0);
        assert!(state.snapshot(ChipKind::Measure).visible);
        state.bar_visible = false;
        assert!(!state.snapshot(ChipKind::Measure).visible);
        assert!(state.snapshot(ChipKind::Note).visible);
    }
}
