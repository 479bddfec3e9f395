//! `.tcm` medley files

use super::course::null_as_default;
use super::read_json;
use super::tci::Difficulty;
use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct TcmFile {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub charts: Vec<MedleyChart>,
}

/// One song of a medley: a `.tci` path and the course to play
#[derive(Debug, Clone, Deserialize)]
pub struct MedleyChart {
    pub file: String,
    pub difficulty: Option<String>,
}

impl MedleyChart {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_name(self.difficulty.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone)]
pub struct MedleyFile {
    path: PathBuf,
    pub info: TcmFile,
}

impl MedleyFile {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            info: read_json(path)?,
        })
    }

    /// Chart paths, resolved against the medley's directory, with their difficulty
    pub fn charts(&self) -> impl Iterator<Item = (PathBuf, Difficulty)> + '_ {
        let dir = self.path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.info
            .charts
            .iter()
            .map(move |c| (dir.join(&c.file), c.difficulty()))
    }
}
