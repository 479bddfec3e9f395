//! Chart compiler - turns courses into timed chip sequences
//!
//! A course is walked measure by measure and line by line. Instruction
//! lines change the running state (and usually leave a chip behind); note
//! lines split the measure into equal slots, one per digit. Once every
//! measure is consumed the section gets its movie marker and padding.

pub mod command;
pub mod note;
pub mod post;
pub mod profile;
pub mod roll;
pub mod state;

use crate::chart::{
    ChartFile, ChartInfo, ChipKind, Course, Difficulty, MedleyFile, NoteSymbol, Playable, Player,
    Section,
};
use crate::error::Result;
use command::Command;
use log::{debug, info};
use note::{seconds_to_time, Line, MeasureScan};
use roll::{RollLinker, DEFAULT_BALLOON};
use state::PlayState;
use std::path::Path;

pub use profile::FormatProfile;

/// Compiler settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Chart format revision
    pub profile: FormatProfile,
    /// Hit target for balloons without a listed count
    pub default_balloon: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            profile: FormatProfile::default(),
            default_balloon: DEFAULT_BALLOON,
        }
    }
}

/// Entry point for compiling courses and chart files
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one course into a single-section playable
    pub fn compile(&self, info: &ChartInfo, course: &Course) -> Playable {
        Playable::single(self.compile_section(info, course))
    }

    /// Compile one course into its chip sequence
    pub fn compile_section(&self, info: &ChartInfo, course: &Course) -> Section {
        Sequencer::new(info, course, &self.options).run(info, &course.measures)
    }

    /// Compile a course of a `.tci` chart, including its multiplayer charts
    pub fn compile_file(&self, path: &Path, difficulty: Difficulty) -> Result<Player> {
        let chart = ChartFile::open(path)?;
        let entry = chart.course_entry(difficulty)?;
        let info = chart.chart_info();

        info!(
            "Compiling {} course of '{}' ({})",
            difficulty,
            chart.path().display(),
            self.options.profile
        );

        let single = self.compile(&info, &chart.load_course(&entry.single)?);
        let multiple = entry
            .multiple
            .iter()
            .map(|file| Ok(self.compile(&info, &chart.load_course(file)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Player { single, multiple })
    }

    /// Compile a `.tcm` medley, one section per listed chart
    pub fn compile_medley(&self, path: &Path) -> Result<Playable> {
        let medley = MedleyFile::open(path)?;
        info!(
            "Compiling medley '{}' ({} charts)",
            path.display(),
            medley.info.charts.len()
        );

        let parts = medley
            .charts()
            .map(|(chart, difficulty)| Ok(self.compile_file(&chart, difficulty)?.single))
            .collect::<Result<Vec<_>>>()?;

        Ok(Playable::concat(parts))
    }
}

/// Timeline builder for one course
struct Sequencer<'a> {
    options: &'a CompileOptions,
    balloon_counts: &'a [Option<i32>],
    state: PlayState,
    section: Section,
    rolls: RollLinker,
    first_note_in_measure: bool,
}

impl<'a> Sequencer<'a> {
    fn new(info: &ChartInfo, course: &'a Course, options: &'a CompileOptions) -> Self {
        Self {
            options,
            balloon_counts: &course.balloon_counts,
            state: PlayState::new(info.bpm),
            section: Section::new(),
            rolls: RollLinker::new(options.default_balloon),
            first_note_in_measure: true,
        }
    }

    fn run(mut self, info: &ChartInfo, measures: &[Vec<String>]) -> Section {
        let origin = self.start(info.offset);

        for lines in measures {
            self.measure(lines);
        }

        post::finish(
            &mut self.section,
            origin,
            info,
            self.options.profile,
            &self.state,
        );
        self.section
    }

    /// Emit the BGM start chip and apply the chart offset
    fn start(&mut self, offset: f64) -> usize {
        let mut chip = self.state.snapshot(ChipKind::BgmStart);
        if offset < 0.0 {
            // BGM starts early, notes stay at the origin
            chip.time = -seconds_to_time(offset.abs());
        } else {
            self.state.clock += seconds_to_time(offset) as f64;
        }
        self.section.push(chip)
    }

    fn measure(&mut self, lines: &[String]) {
        let scan = MeasureScan::new(lines);

        for line in lines {
            match Line::classify(line) {
                Line::Instruction(text) => self.instruction(text),
                Line::Notes(text) => {
                    // Slot length follows commands seen so far in the measure
                    if let Some(step) = scan.time_per_note(self.state.measure_duration()) {
                        self.notes(text, step);
                    }
                }
            }
        }

        if scan.is_empty() {
            self.emit(ChipKind::Measure);
            self.state.clock += self.state.measure_duration();
        }

        self.state.measure_index += 1;
        self.first_note_in_measure = true;
    }

    fn instruction(&mut self, text: &str) {
        match Command::parse(text, self.options.profile) {
            Some(command) => {
                if let Some(kind) = command.apply(&mut self.state) {
                    self.emit(kind);
                }
            }
            None => debug!(
                "Measure {}: ignoring instruction '{}'",
                self.state.measure_index, text
            ),
        }
    }

    fn notes(&mut self, text: &str, step: f64) {
        let mut symbols = note::symbols(text).peekable();
        if symbols.peek().is_none() {
            return;
        }

        if self.first_note_in_measure {
            self.emit(ChipKind::Measure);
            self.first_note_in_measure = false;
        }

        for symbol in symbols {
            // Rests only take up their slot
            if symbol != NoteSymbol::Rest {
                let mut chip = self.state.snapshot(ChipKind::Note);
                chip.note = Some(symbol);
                let index = self.section.push(chip);
                self.rolls
                    .on_note(&mut self.section, index, self.balloon_counts);
            }
            self.state.clock += step;
        }
    }

    fn emit(&mut self, kind: ChipKind) -> usize {
        let chip = self.state.snapshot(kind);
        self.section.push(chip)
    }
}
