//! Compiler inputs: one course and the chart-wide timing info

use serde::{Deserialize, Deserializer};

/// One difficulty's note data
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Course {
    /// Measures in order, each a list of raw lines
    #[serde(default, deserialize_with = "null_as_default")]
    pub measures: Vec<Vec<String>>,
    /// Balloon hit targets, consumed one per balloon note
    #[serde(default, rename = "balloon", deserialize_with = "null_as_default")]
    pub balloon_counts: Vec<Option<i32>>,
}

impl Course {
    pub fn new(measures: Vec<Vec<String>>) -> Self {
        Self {
            measures,
            balloon_counts: Vec::new(),
        }
    }

    pub fn with_balloons(mut self, counts: Vec<Option<i32>>) -> Self {
        self.balloon_counts = counts;
        self
    }

    /// Build a course from string-slice measures
    pub fn from_lines(measures: &[&[&str]]) -> Self {
        Self::new(
            measures
                .iter()
                .map(|m| m.iter().map(|l| l.to_string()).collect())
                .collect(),
        )
    }
}

/// Chart-wide timing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartInfo {
    pub bpm: f64,
    /// Seconds between BGM start and the first measure
    pub offset: f64,
    /// Seconds between BGM start and movie start
    pub movie_offset: Option<f64>,
    pub has_movie: bool,
}

impl ChartInfo {
    pub const DEFAULT_BPM: f64 = 120.0;

    pub fn new(bpm: f64, offset: f64) -> Self {
        Self {
            bpm,
            offset,
            movie_offset: None,
            has_movie: false,
        }
    }

    pub fn with_movie(mut self, movie_offset: f64) -> Self {
        self.has_movie = true;
        self.movie_offset = Some(movie_offset);
        self
    }
}

impl Default for ChartInfo {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BPM, 0.0)
    }
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_from_json() {
        let json = r##"{
            "scoreinit": 300,
            "balloon": [10, null, 3],
            "measures": [["1111", "#BPM 150"], []]
        }"##;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.balloon_counts, vec![Some(10), None, Some(3)]);
        assert_eq!(course.measures.len(), 2);
        assert_eq!(course.measures[0][1], "#BPM 150");
    }

    #[test]
    fn test_course_negative_balloon_and_scoring_fields() {
        let course: Course = serde_json::from_str(
            r#"{"scoreinit": 1000, "scoreshinuchi": 500, "balloon": [-1, 4], "measures": [["7"]]}"#,
        )
        .unwrap();
        assert_eq!(course.balloon_counts, vec![Some(-1), Some(4)]);
    }

    #[test]
    fn test_course_null_arrays() {
        let course: Course =
            serde_json::from_str(r#"{"balloon": null, "measures": null}"#).unwrap();
        assert!(course.balloon_counts.is_empty());
        assert!(course.measures.is_empty());
    }
}
