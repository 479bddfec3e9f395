//! Instruction lines (`#COMMAND param`)

use super::note::seconds_to_time;
use super::profile::FormatProfile;
use super::state::PlayState;
use crate::chart::{ChipKind, TimeSignature};

/// A decoded instruction line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Bpm(f64),
    Scroll(f64),
    /// Degrees
    Rotate(f64),
    TimeSignature(TimeSignature),
    GoGoBegin,
    GoGoEnd,
    /// Seconds
    Delay(f64),
    Bar(bool),
}

impl Command {
    /// Decode an instruction line.
    ///
    /// Returns `None` for unknown commands and for parameters that do not
    /// parse or would run the clock backwards.
    pub fn parse(line: &str, profile: FormatProfile) -> Option<Command> {
        let line = line.trim();
        let (name, param) = match line.split_once(char::is_whitespace) {
            Some((name, param)) => (name, param.trim()),
            None => (line, ""),
        };
        let name = name.to_ascii_uppercase();

        match name.as_str() {
            "#BPM" => read_float(param)
                .filter(|bpm| *bpm > 0.0)
                .map(Command::Bpm),
            "#SCROLL" => read_float(param).map(Command::Scroll),
            "#ROTATE" if profile.presentation_commands() => {
                read_float(param).map(Command::Rotate)
            }
            "#TSIGN" => {
                let (n, d) = param.split_once('/')?;
                let numerator = read_float(n)?;
                let denominator = read_float(d)?;
                let sig = TimeSignature::new(numerator, denominator);
                if numerator <= 0.0 || denominator <= 0.0 || !sig.beat_weight().is_finite() {
                    return None;
                }
                Some(Command::TimeSignature(sig))
            }
            "#GOGOBEGIN" => Some(Command::GoGoBegin),
            "#GOGOEND" => Some(Command::GoGoEnd),
            "#DELAY" => read_float(param)
                .filter(|delay| *delay >= 0.0)
                .map(Command::Delay),
            "#BAR" if profile.presentation_commands() => {
                if param.eq_ignore_ascii_case("show") {
                    Some(Command::Bar(true))
                } else if param.eq_ignore_ascii_case("hide") {
                    Some(Command::Bar(false))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Apply to the running state, returning the kind of chip to emit
    pub fn apply(self, state: &mut PlayState) -> Option<ChipKind> {
        match self {
            Command::Bpm(bpm) => {
                state.bpm = bpm;
                Some(ChipKind::BpmChange)
            }
            Command::Scroll(scroll) => {
                state.scroll = scroll;
                Some(ChipKind::ScrollChange)
            }
            Command::Rotate(degrees) => {
                state.rotation = degrees;
                Some(ChipKind::RotationChange)
            }
            Command::TimeSignature(sig) => {
                state.time_signature = sig;
                Some(ChipKind::TimeSignatureChange)
            }
            Command::GoGoBegin => {
                state.gogo = true;
                Some(ChipKind::GoGoStart)
            }
            Command::GoGoEnd => {
                state.gogo = false;
                Some(ChipKind::GoGoEnd)
            }
            Command::Delay(seconds) => {
                state.clock += seconds_to_time(seconds) as f64;
                None
            }
            Command::Bar(visible) => {
                state.bar_visible = visible;
                None
            }
        }
    }
}

fn read_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
