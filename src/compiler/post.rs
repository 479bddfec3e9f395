//! Passes run over a finished section

use super::note::{measure_duration, seconds_to_time};
use super::profile::{FormatProfile, LeadIn};
use super::state::PlayState;
use crate::chart::{ChartInfo, ChipKind, Section, TimeSignature};
use log::debug;

/// Run movie-start insertion, then lead-in and lead-out padding.
///
/// `origin` is the index of the BGM start chip; `state` is the builder
/// state after the last measure.
pub fn finish(
    section: &mut Section,
    origin: usize,
    info: &ChartInfo,
    profile: FormatProfile,
    state: &PlayState,
) {
    let origin_bpm = section.get(origin).map_or(state.bpm, |c| c.bpm);

    insert_movie_start(section, origin, info);

    let lead_in = match profile.lead_in() {
        LeadIn::Fixed(amount) => amount,
        LeadIn::OriginMeasure => measure_duration(TimeSignature::COMMON, origin_bpm) as i64,
    };
    section.shift(lead_in);

    lead_out(section, state.time_signature, state.measure_index);
}

/// Insert a movie start chip relative to the BGM start.
///
/// A negative movie offset first pushes every chip back so that nothing
/// ends up before the movie. Returns the index of the new chip.
pub fn insert_movie_start(
    section: &mut Section,
    origin: usize,
    info: &ChartInfo,
) -> Option<usize> {
    if !info.has_movie {
        return None;
    }
    let offset = info.movie_offset?;
    let amount = seconds_to_time(offset.abs());

    if offset < 0.0 {
        section.shift(amount);
    }

    let mut chip = section.get(origin)?.clone();
    chip.kind = ChipKind::MovieStart;
    chip.time = if offset < 0.0 {
        chip.time.saturating_sub(amount)
    } else {
        chip.time.saturating_add(amount)
    };
    chip.visible = false;

    debug!("Movie starts at {}", chip.time);
    Some(section.insert_ordered(chip))
}

/// Append an invisible bar line one measure after the last chip
pub fn lead_out(
    section: &mut Section,
    time_signature: TimeSignature,
    measure_index: usize,
) -> Option<usize> {
    let mut chip = section.last()?.clone();
    chip.time = chip
        .time
        .saturating_add(measure_duration(time_signature, chip.bpm) as i64);
    chip.kind = ChipKind::Measure;
    chip.time_signature = time_signature;
    chip.measure_index = measure_index;
    chip.visible = false;
    chip.note = None;
    chip.roll_target = None;
    chip.roll_end = None;
    Some(section.push(chip))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_with(times: &[(ChipKind, i64)]) -> Section {
        let state = PlayState::new(100.0);
        let mut section = Section::new();
        for (kind, time) in times {
            let mut chip = state.snapshot(*kind);
            chip.time = *time;
            section.push(chip);
        }
        section
    }

    fn times(section: &Section) -> Vec<(ChipKind, i64)> {
        section.iter().map(|c| (c.kind, c.time)).collect()
    }

    #[test]
    fn test_no_movie_without_asset() {
        let mut section = section_with(&[(ChipKind::BgmStart, 0)]);
        let info = ChartInfo {
            movie_offset: Some(1.0),
            ..ChartInfo::default()
        };
        assert_eq!(insert_movie_start(&mut section, 0, &info), None);
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_positive_movie_offset_is_ordered() {
        let mut section = section_with(&[
            (ChipKind::BgmStart, 0),
            (ChipKind::Measure, 500_000),
            (ChipKind::Note, 1_500_000),
        ]);
        let info = ChartInfo::default().with_movie(1.0);

        let index = insert_movie_start(&mut section, 0, &info);
        assert_eq!(index, Some(2));
        assert_eq!(
            times(&section),
            vec![
                (ChipKind::BgmStart, 0),
                (ChipKind::Measure, 500_000),
                (ChipKind::MovieStart, 1_000_000),
                (ChipKind::Note, 1_500_000),
            ]
        );
    }

    #[test]
    fn test_negative_movie_offset_shifts_everything() {
        let mut section = section_with(&[(ChipKind::BgmStart, 0), (ChipKind::Measure, 0)]);
        let info = ChartInfo::default().with_movie(-2.0);

        insert_movie_start(&mut section, 0, &info);
        assert_eq!(
            times(&section),
            vec![
                (ChipKind::MovieStart, 0),
                (ChipKind::BgmStart, 2_000_000),
                (ChipKind::Measure, 2_000_000),
            ]
        );
        assert!(section.iter().all(|c| c.time >= 0));
    }

    #[test]
    fn test_lead_out_uses_last_bpm() {
        let mut section = section_with(&[(ChipKind::BgmStart, 0), (ChipKind::Note, 10_000)]);
        let index = lead_out(&mut section, TimeSignature::COMMON, 4).unwrap();
        let chip = section.get(index).unwrap();
        assert_eq!(chip.kind, ChipKind::Measure);
        assert_eq!(chip.time, 50_000);
        assert_eq!(chip.measure_index, 4);
        assert!(!chip.visible);
        assert_eq!(chip.note, None);
    }

    #[test]
    fn test_finish_fixed_lead_in() {
        let mut section = section_with(&[(ChipKind::BgmStart, 0), (ChipKind::Note, 10_000)]);
        let state = PlayState::new(100.0);
        finish(&mut section, 0, &ChartInfo::new(100.0, 0.0), FormatProfile::Rev2_2, &state);
        assert_eq!(
            times(&section),
            vec![
                (ChipKind::BgmStart, 3_000_000),
                (ChipKind::Note, 3_010_000),
                (ChipKind::Measure, 3_050_000),
            ]
        );
    }

    #[test]
    fn test_finish_origin_measure_lead_in() {
        let mut section = section_with(&[(ChipKind::BgmStart, 0)]);
        let state = PlayState::new(100.0);
        finish(&mut section, 0, &ChartInfo::new(100.0, 0.0), FormatProfile::Rev2_1, &state);
        assert_eq!(
            times(&section),
            vec![(ChipKind::BgmStart, 40_000), (ChipKind::Measure, 80_000)]
        );
    }
}
