//! Chart data model and the JSON files it is read from

pub mod chip;
pub mod course;
pub mod medley;
pub mod tci;

pub use chip::{Chip, ChipKind, NoteSymbol, Playable, Player, Section, TimeSignature};
pub use course::{ChartInfo, Course};
pub use medley::{MedleyChart, MedleyFile, TcmFile};
pub use tci::{ChartFile, CourseEntry, Difficulty, SongSummary, TciFile};

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and decode a JSON file, keeping the path in any error
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open '{}': {}", path.display(), e),
        ))
    })?;
    let text = text.trim_start_matches('\u{FEFF}');
    serde_json::from_str(text).map_err(|source| Error::Json {
        path: path.display().to_string(),
        source,
    })
}
