//! Timeline events and the sequences that hold them

use serde::Serialize;

/// n/d time signature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSignature {
    pub numerator: f64,
    pub denominator: f64,
}

impl TimeSignature {
    /// 4/4
    pub const COMMON: Self = Self {
        numerator: 4.0,
        denominator: 4.0,
    };

    pub fn new(numerator: f64, denominator: f64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Quarter-note beats per measure
    pub fn beat_weight(&self) -> f64 {
        self.numerator / self.denominator * 4.0
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::COMMON
    }
}

/// Note symbol encoded by a single digit of a note line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSymbol {
    Rest,
    Don,
    Ka,
    BigDon,
    BigKa,
    RollStart,
    BigRollStart,
    Balloon,
    RollEnd,
}

impl NoteSymbol {
    /// Map a digit to its symbol. Anything outside '1'..='8' is a rest.
    pub fn from_digit(c: char) -> Self {
        match c {
            '1' => NoteSymbol::Don,
            '2' => NoteSymbol::Ka,
            '3' => NoteSymbol::BigDon,
            '4' => NoteSymbol::BigKa,
            '5' => NoteSymbol::RollStart,
            '6' => NoteSymbol::BigRollStart,
            '7' => NoteSymbol::Balloon,
            '8' => NoteSymbol::RollEnd,
            _ => NoteSymbol::Rest,
        }
    }

    /// True for symbols that open a roll or balloon
    pub fn opens_roll(self) -> bool {
        matches!(
            self,
            NoteSymbol::RollStart | NoteSymbol::BigRollStart | NoteSymbol::Balloon
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipKind {
    BgmStart,
    Measure,
    Note,
    BpmChange,
    ScrollChange,
    RotationChange,
    TimeSignatureChange,
    GoGoStart,
    GoGoEnd,
    MovieStart,
}

/// One timestamped playback event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chip {
    pub kind: ChipKind,
    /// Time from section start, in chart time units
    pub time: i64,
    pub bpm: f64,
    pub scroll: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub time_signature: TimeSignature,
    pub measure_index: usize,
    pub gogo: bool,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteSymbol>,
    /// Hit target for balloons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_target: Option<i32>,
    /// Index of the terminating chip within the same section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_end: Option<usize>,
}

impl Chip {
    pub fn is_note(&self, symbol: NoteSymbol) -> bool {
        self.kind == ChipKind::Note && self.note == Some(symbol)
    }
}

/// Ordered chip sequence produced from one course
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Section {
    chips: Vec<Chip>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chip, returning its index
    pub fn push(&mut self, chip: Chip) -> usize {
        self.chips.push(chip);
        self.chips.len() - 1
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chip> {
        self.chips.iter()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chip> {
        self.chips.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Chip> {
        self.chips.get_mut(index)
    }

    pub fn first(&self) -> Option<&Chip> {
        self.chips.first()
    }

    pub fn last(&self) -> Option<&Chip> {
        self.chips.last()
    }

    /// Resolve the terminator of a roll or balloon chip
    pub fn roll_end_of(&self, chip: &Chip) -> Option<&Chip> {
        chip.roll_end.and_then(|i| self.chips.get(i))
    }

    /// Move every chip by `delta` time units, saturating at the `i64` range
    pub fn shift(&mut self, delta: i64) {
        for chip in &mut self.chips {
            chip.time = chip.time.saturating_add(delta);
        }
    }

    /// Insert a chip right after the last chip not later than it.
    ///
    /// Roll-end indices at or past the insertion point are renumbered.
    pub fn insert_ordered(&mut self, chip: Chip) -> usize {
        let pos = self
            .chips
            .iter()
            .rposition(|c| c.time <= chip.time)
            .map_or(0, |i| i + 1);

        for c in &mut self.chips {
            if let Some(end) = c.roll_end.as_mut() {
                if *end >= pos {
                    *end += 1;
                }
            }
        }

        self.chips.insert(pos, chip);
        pos
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Chip;
    type IntoIter = std::slice::Iter<'a, Chip>;

    fn into_iter(self) -> Self::IntoIter {
        self.chips.iter()
    }
}

/// Compiled chart: one section per course, several for a medley
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Playable {
    pub sections: Vec<Section>,
}

impl Playable {
    pub fn single(section: Section) -> Self {
        Self {
            sections: vec![section],
        }
    }

    /// Join playables end to end, keeping section order
    pub fn concat<I: IntoIterator<Item = Playable>>(parts: I) -> Self {
        Self {
            sections: parts.into_iter().flat_map(|p| p.sections).collect(),
        }
    }
}

/// Single-player chart plus the multiplayer charts of one course
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Player {
    pub single: Playable,
    pub multiple: Vec<Playable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip_at(kind: ChipKind, time: i64) -> Chip {
        Chip {
            kind,
            time,
            bpm: 120.0,
            scroll: 1.0,
            rotation: 0.0,
            time_signature: TimeSignature::COMMON,
            measure_index: 0,
            gogo: false,
            visible: true,
            note: None,
            roll_target: None,
            roll_end: None,
        }
    }

    #[test]
    fn test_beat_weight() {
        assert_eq!(TimeSignature::COMMON.beat_weight(), 4.0);
        assert_eq!(TimeSignature::new(3.0, 4.0).beat_weight(), 3.0);
        assert_eq!(TimeSignature::new(7.0, 8.0).beat_weight(), 3.5);
    }

    #[test]
    fn test_note_symbol_from_digit() {
        assert_eq!(NoteSymbol::from_digit('0'), NoteSymbol::Rest);
        assert_eq!(NoteSymbol::from_digit('3'), NoteSymbol::BigDon);
        assert_eq!(NoteSymbol::from_digit('7'), NoteSymbol::Balloon);
        assert_eq!(NoteSymbol::from_digit('9'), NoteSymbol::Rest);
        assert!(NoteSymbol::BigRollStart.opens_roll());
        assert!(!NoteSymbol::RollEnd.opens_roll());
    }

    #[test]
    fn test_insert_ordered_after_equal_times() {
        let mut section = Section::new();
        section.push(chip_at(ChipKind::BgmStart, 0));
        section.push(chip_at(ChipKind::Measure, 100));
        section.push(chip_at(ChipKind::Note, 200));

        let pos = section.insert_ordered(chip_at(ChipKind::MovieStart, 100));
        assert_eq!(pos, 2);
        assert_eq!(section.get(2).map(|c| c.kind), Some(ChipKind::MovieStart));

        let pos = section.insert_ordered(chip_at(ChipKind::MovieStart, -5));
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_insert_ordered_renumbers_roll_ends() {
        let mut section = Section::new();
        let start = section.push(chip_at(ChipKind::Note, 0));
        section.push(chip_at(ChipKind::Note, 50));
        let end = section.push(chip_at(ChipKind::Note, 100));
        section.get_mut(start).unwrap().roll_end = Some(end);

        section.insert_ordered(chip_at(ChipKind::MovieStart, 60));

        let start_chip = section.get(start).unwrap();
        assert_eq!(start_chip.roll_end, Some(3));
        assert_eq!(section.roll_end_of(start_chip).map(|c| c.time), Some(100));
    }

    #[test]
    fn test_shift_saturates() {
        let mut section = Section::new();
        section.push(chip_at(ChipKind::Note, i64::MAX - 10));
        section.shift(3_000_000);
        assert_eq!(section.first().map(|c| c.time), Some(i64::MAX));
    }

    #[test]
    fn test_concat_keeps_order() {
        let mut a = Section::new();
        a.push(chip_at(ChipKind::BgmStart, 1));
        let mut b = Section::new();
        b.push(chip_at(ChipKind::BgmStart, 2));

        let joined = Playable::concat([Playable::single(a), Playable::single(b)]);
        assert_eq!(joined.sections.len(), 2);
        assert_eq!(joined.sections[1].first().map(|c| c.time), Some(2));
    }
}
