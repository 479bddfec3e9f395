//! Pairing of rolls and balloons with their terminators

use crate::chart::{NoteSymbol, Section};
use log::debug;

/// Hit target for balloons without a listed count
pub const DEFAULT_BALLOON: i32 = 5;

/// Tracks the one roll or balloon that may still be open
#[derive(Debug, Clone)]
pub struct RollLinker {
    /// Index of the open start chip
    open: Option<usize>,
    /// Next unconsumed balloon count
    balloon_index: usize,
    default_balloon: i32,
}

impl RollLinker {
    pub fn new(default_balloon: i32) -> Self {
        Self {
            open: None,
            balloon_index: 0,
            default_balloon,
        }
    }

    /// Index of the start chip still waiting for its end
    pub fn open(&self) -> Option<usize> {
        self.open
    }

    /// Consume the next balloon count
    fn next_balloon(&mut self, counts: &[Option<i32>]) -> i32 {
        let count = counts.get(self.balloon_index).copied().flatten();
        if count.is_none() {
            debug!(
                "Balloon #{} has no count, using {}",
                self.balloon_index, self.default_balloon
            );
        }
        self.balloon_index += 1;
        count.unwrap_or(self.default_balloon)
    }

    /// Handle the note chip just pushed at `index`
    pub fn on_note(
        &mut self,
        section: &mut Section,
        index: usize,
        balloon_counts: &[Option<i32>],
    ) {
        let symbol = match section.get(index).and_then(|c| c.note) {
            Some(symbol) => symbol,
            None => return,
        };

        if symbol.opens_roll() {
            if let Some(previous) = self.open {
                debug!("Roll at chip {} replaced before its end", previous);
            }
            if symbol == NoteSymbol::Balloon {
                let target = self.next_balloon(balloon_counts);
                if let Some(chip) = section.get_mut(index) {
                    chip.roll_target = Some(target);
                }
            }
            self.open = Some(index);
        } else if symbol == NoteSymbol::RollEnd {
            match self.open.take() {
                Some(start) => {
                    if let Some(chip) = section.get_mut(start) {
                        chip.roll_end = Some(index);
                    }
                }
                None => debug!("Roll end at chip {} has no open roll", index),
            }
        }
    }
}

impl Default for RollLinker {
    fn default() -> Self {
        Self::new(DEFAULT_BALLOON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChipKind;
    use crate::compiler::state::PlayState;

    fn push_note(section: &mut Section, symbol: NoteSymbol) -> usize {
        let mut chip = PlayState::new(120.0).snapshot(ChipKind::Note);
        chip.note = Some(symbol);
        section.push(chip)
    }

    fn feed(
        linker: &mut RollLinker,
        section: &mut Section,
        symbol: NoteSymbol,
        counts: &[Option<i32>],
    ) -> usize {
        let index = push_note(section, symbol);
        linker.on_note(section, index, counts);
        index
    }

    #[test]
    fn test_roll_links_to_end() {
        let mut section = Section::new();
        let mut linker = RollLinker::default();

        let start = feed(&mut linker, &mut section, NoteSymbol::RollStart, &[]);
        assert_eq!(linker.open(), Some(start));
        let end = feed(&mut linker, &mut section, NoteSymbol::RollEnd, &[]);

        assert_eq!(section.get(start).unwrap().roll_end, Some(end));
        assert_eq!(linker.open(), None);
    }

    #[test]
    fn test_new_roll_orphans_previous() {
        let mut section = Section::new();
        let mut linker = RollLinker::default();

        let first = feed(&mut linker, &mut section, NoteSymbol::BigRollStart, &[]);
        let second = feed(&mut linker, &mut section, NoteSymbol::RollStart, &[]);
        let end = feed(&mut linker, &mut section, NoteSymbol::RollEnd, &[]);

        assert_eq!(section.get(first).unwrap().roll_end, None);
        assert_eq!(section.get(second).unwrap().roll_end, Some(end));
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn test_stray_roll_end_is_kept_unlinked() {
        let mut section = Section::new();
        let mut linker = RollLinker::default();

        feed(&mut linker, &mut section, NoteSymbol::RollEnd, &[]);
        assert_eq!(section.len(), 1);
        assert!(section.iter().all(|c| c.roll_end.is_none()));
    }

    #[test]
    fn test_balloon_counts_consumed_in_order() {
        let mut section = Section::new();
        let mut linker = RollLinker::default();
        let counts = [Some(12), None, Some(30)];

        let a = feed(&mut linker, &mut section, NoteSymbol::Balloon, &counts);
        let b = feed(&mut linker, &mut section, NoteSymbol::Balloon, &counts);
        let c = feed(&mut linker, &mut section, NoteSymbol::Balloon, &counts);
        let d = feed(&mut linker, &mut section, NoteSymbol::Balloon, &counts);

        let targets: Vec<_> = [a, b, c, d]
            .iter()
            .map(|i| section.get(*i).unwrap().roll_target)
            .collect();
        assert_eq!(targets, vec![Some(12), Some(5), Some(30), Some(5)]);
    }

    #[test]
    fn test_custom_default_balloon() {
        let mut section = Section::new();
        let mut linker = RollLinker::new(8);
        let index = feed(&mut linker, &mut section, NoteSymbol::Balloon, &[]);
        assert_eq!(section.get(index).unwrap().roll_target, Some(8));
    }
}
