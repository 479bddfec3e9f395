//! Chart format revisions
//!
//! Revisions differ in which presentation commands they understand and in
//! how much silence is put in front of the first chip.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Lead-in used by the current revision, in time units
pub const FIXED_LEAD_IN: i64 = 3_000_000;

/// How far the whole timeline is pushed back before playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadIn {
    /// Constant amount of time
    Fixed(i64),
    /// One 4/4 measure at the BPM of the BGM start
    OriginMeasure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatProfile {
    /// Rev 2.1: no #ROTATE / #BAR, one-measure lead-in
    Rev2_1,
    /// Rev 2.2
    #[default]
    Rev2_2,
}

impl FormatProfile {
    /// Whether #ROTATE and #BAR are recognized
    pub fn presentation_commands(self) -> bool {
        matches!(self, FormatProfile::Rev2_2)
    }

    pub fn lead_in(self) -> LeadIn {
        match self {
            FormatProfile::Rev2_1 => LeadIn::OriginMeasure,
            FormatProfile::Rev2_2 => LeadIn::Fixed(FIXED_LEAD_IN),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatProfile::Rev2_1 => "2.1",
            FormatProfile::Rev2_2 => "2.2",
        }
    }
}

impl fmt::Display for FormatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rev{}", self.name())
    }
}

impl FromStr for FormatProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let version = lower.strip_prefix("rev").unwrap_or(&lower);
        match version.trim() {
            "2.1" => Ok(FormatProfile::Rev2_1),
            "2.2" => Ok(FormatProfile::Rev2_2),
            _ => Err(Error::UnknownProfile(s.to_string())),
        }
    }
}
