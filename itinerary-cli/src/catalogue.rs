//! Offline task inference backed by a place catalogue and keyword hints.

use async_trait::async_trait;
use geo::Coord;
use itinerary_core::{InferenceError, Location, TaskInference};
use itinerary_planner::euclidean;
use serde::{Deserialize, Serialize};

/// Estimated duration for tasks whose text mentions `keyword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationHint {
    /// Case-insensitive word or phrase to look for.
    pub keyword: String,
    /// Minutes assumed for matching tasks.
    pub minutes: u32,
}

impl DurationHint {
    /// Construct a hint.
    pub fn new(keyword: impl Into<String>, minutes: u32) -> Self {
        Self {
            keyword: keyword.into(),
            minutes,
        }
    }

    /// Hints used when a request does not bring its own.
    pub fn defaults() -> Vec<Self> {
        [
            ("lecture", 90),
            ("seminar", 90),
            ("lab", 120),
            ("exam", 120),
            ("meeting", 30),
            ("office hours", 20),
            ("lunch", 45),
            ("coffee", 15),
            ("library", 60),
            ("gym", 60),
            ("print", 10),
        ]
        .into_iter()
        .map(|(keyword, minutes)| Self::new(keyword, minutes))
        .collect()
    }
}

/// [`TaskInference`] that resolves places named in the task text.
///
/// A task's location is the catalogue place whose name appears in the text,
/// preferring the one nearest to the bias point when several match. A
/// task's duration comes from the first [`DurationHint`] whose keyword
/// appears in the text. Matching ignores case. Lookups never fail.
#[derive(Debug, Clone, Default)]
pub struct CatalogueInference {
    places: Vec<Location>,
    hints: Vec<DurationHint>,
}

impl CatalogueInference {
    /// Construct an inference over `places` and `hints`.
    pub fn new(places: Vec<Location>, hints: Vec<DurationHint>) -> Self {
        Self { places, hints }
    }

    /// Minutes suggested for `text`, if any hint matches.
    pub fn duration_for(&self, text: &str) -> Option<u32> {
        let haystack = text.to_lowercase();
        self.hints
            .iter()
            .find(|hint| haystack.contains(&hint.keyword.to_lowercase()))
            .map(|hint| hint.minutes)
    }

    /// Catalogue place mentioned in `text` that lies nearest to `bias`.
    pub fn place_for(&self, text: &str, bias: Coord<f64>) -> Option<&Location> {
        let haystack = text.to_lowercase();
        self.places
            .iter()
            .filter(|place| {
                place
                    .name
                    .as_deref()
                    .is_some_and(|name| !name.is_empty() && haystack.contains(&name.to_lowercase()))
            })
            .min_by(|left, right| {
                euclidean(bias, left.coordinates).total_cmp(&euclidean(bias, right.coordinates))
            })
    }
}

#[async_trait(?Send)]
impl TaskInference for CatalogueInference {
    async fn infer_duration(&self, task_text: &str) -> Result<Option<u32>, InferenceError> {
        Ok(self.duration_for(task_text))
    }

    async fn infer_location(
        &self,
        task_text: &str,
        bias: Coord<f64>,
    ) -> Result<Option<Location>, InferenceError> {
        Ok(self.place_for(task_text, bias).cloned())
    }
}
