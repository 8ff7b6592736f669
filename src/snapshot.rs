use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::{Mood, MoodCounts};

/// One line of headless output describing the population after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub recorded_at: DateTime<Utc>,
    pub counts: MoodCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moods: Option<Vec<Mood>>,
}

impl TickSnapshot {
    pub fn new(tick: u64, moods: &[Mood], include_moods: bool) -> Self {
        Self {
            tick,
            recorded_at: Utc::now(),
            counts: MoodCounts::tally(moods),
            moods: include_moods.then(|| moods.to_vec()),
        }
    }

    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
