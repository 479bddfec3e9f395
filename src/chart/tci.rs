//! `.tci` chart-info files

use super::course::{null_as_default, ChartInfo, Course};
use super::read_json;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Extensions treated as movie backgrounds
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "avi", "wmv", "mpg", "mpeg", "mkv", "webm", "flv", "ogv",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Oni,
    Edit,
}

impl Difficulty {
    /// Lenient mapping used for chart files: unknown names are Oni.
    pub fn from_name(name: &str) -> Self {
        match name {
            "easy" => Difficulty::Easy,
            "normal" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            "edit" => Difficulty::Edit,
            _ => Difficulty::Oni,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Oni => "oni",
            Difficulty::Edit => "edit",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "oni" => Ok(Difficulty::Oni),
            "edit" => Ok(Difficulty::Edit),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Raw `.tci` contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct TciFile {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: Vec<String>,
    pub audio: Option<String>,
    pub background: Option<String>,
    pub movieoffset: Option<f64>,
    pub bpm: Option<f64>,
    pub offset: Option<f64>,
    pub songpreview: Option<f64>,
    pub albumart: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<CourseEntry>,
}

/// A course listing: difficulty, level and the course file(s)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseEntry {
    pub difficulty: Option<String>,
    pub level: Option<i32>,
    pub single: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multiple: Vec<String>,
}

impl CourseEntry {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_name(self.difficulty.as_deref().unwrap_or(""))
    }
}

impl TciFile {
    /// Timing parameters handed to the compiler
    pub fn chart_info(&self) -> ChartInfo {
        let has_movie = self.background.as_deref().is_some_and(is_video_path);
        ChartInfo {
            bpm: self.bpm.unwrap_or(ChartInfo::DEFAULT_BPM),
            offset: self.offset.unwrap_or(0.0),
            movie_offset: has_movie.then(|| self.movieoffset.unwrap_or(0.0)),
            has_movie,
        }
    }

    /// First course listed for a difficulty
    pub fn course(&self, difficulty: Difficulty) -> Option<&CourseEntry> {
        self.courses.iter().find(|c| c.difficulty() == difficulty)
    }
}

/// Song selection metadata
#[derive(Debug, Clone, Serialize)]
pub struct SongSummary {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub bpm: Option<f64>,
    pub artist: Vec<String>,
    pub creator: Vec<String>,
    pub preview_song: Option<PathBuf>,
    pub song_preview: Option<f64>,
    pub albumart: Option<PathBuf>,
    pub levels: BTreeMap<Difficulty, Option<i32>>,
}

/// A `.tci` file loaded from disk
#[derive(Debug, Clone)]
pub struct ChartFile {
    path: PathBuf,
    pub info: TciFile,
}

impl ChartFile {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            info: read_json(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a path relative to the chart's directory
    pub fn resolve(&self, relative: &str) -> PathBuf {
        match self.path.parent() {
            Some(dir) => dir.join(relative),
            None => PathBuf::from(relative),
        }
    }

    pub fn chart_info(&self) -> ChartInfo {
        self.info.chart_info()
    }

    pub fn course_entry(&self, difficulty: Difficulty) -> Result<&CourseEntry> {
        self.info
            .course(difficulty)
            .ok_or(Error::CourseNotFound(difficulty))
    }

    pub fn load_course(&self, relative: &str) -> Result<Course> {
        read_json(&self.resolve(relative))
    }

    pub fn summary(&self) -> SongSummary {
        let info = &self.info;
        SongSummary {
            title: info.title.clone(),
            subtitle: info.subtitle.clone(),
            bpm: info.bpm,
            artist: info.artist.clone(),
            creator: info.creator.clone(),
            preview_song: info.audio.as_deref().map(|p| self.resolve(p)),
            song_preview: info.songpreview,
            albumart: info.albumart.as_deref().map(|p| self.resolve(p)),
            levels: info
                .courses
                .iter()
                .map(|c| (c.difficulty(), c.level))
                .collect(),
        }
    }
}

pub fn is_video_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|v| ext.eq_ignore_ascii_case(v))
        })
}
