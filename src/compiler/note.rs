//! Note lines and measure timing

use crate::chart::{NoteSymbol, TimeSignature};

/// Duration of one measure in time units.
///
/// A quarter note lasts `1_000_000 / bpm` units; there is no factor of 60.
pub fn measure_duration(time_signature: TimeSignature, bpm: f64) -> f64 {
    time_signature.beat_weight() / bpm * 1000.0 * 1000.0
}

/// Seconds to time units, truncated
pub fn seconds_to_time(seconds: f64) -> i64 {
    (seconds * 1000.0 * 1000.0) as i64
}

/// Classified measure line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Trimmed `#...` line
    Instruction(&'a str),
    Notes(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            Line::Instruction(trimmed)
        } else {
            Line::Notes(line)
        }
    }
}

/// Note symbols of a line, one per digit; other characters are skipped
pub fn symbols(line: &str) -> impl Iterator<Item = NoteSymbol> + '_ {
    line.chars()
        .filter(char::is_ascii_digit)
        .map(NoteSymbol::from_digit)
}

/// Result of the counting pass over one measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureScan {
    /// Digits across all note lines
    pub notes_count: usize,
}

impl MeasureScan {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        let notes_count = lines
            .iter()
            .filter_map(|l| match Line::classify(l.as_ref()) {
                Line::Notes(text) => Some(symbols(text).count()),
                Line::Instruction(_) => None,
            })
            .sum();
        Self { notes_count }
    }

    pub fn is_empty(&self) -> bool {
        self.notes_count == 0
    }

    /// Time per note slot, or `None` for a measure without notes
    pub fn time_per_note(&self, measure_duration: f64) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(measure_duration / self.notes_count as f64)
        }
    }
}
