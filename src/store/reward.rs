//! Points and titles awarded for finished practice sessions.

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackResult;
use crate::store::record::{Record, RecordData};

/// Score bands, highest first: `(minimum overall, title)`.
const BANDS: &[(u8, &str)] = &[
    (90, "Outstanding"),
    (80, "Great work"),
    (70, "Good effort"),
    (0, "Keep practicing"),
];

/// A reward earned by one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub title: String,
    pub points: u32,
    /// Id of the session record the reward belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Reward {
    /// One point per ten overall-score points, titled by score band.
    pub fn for_session(feedback: &FeedbackResult, session_id: Option<String>) -> Self {
        let overall = feedback.scores.overall;
        let title = BANDS
            .iter()
            .find(|(min, _)| overall >= *min)
            .map(|(_, title)| *title)
            .unwrap_or("Keep practicing");
        Self {
            title: title.to_string(),
            points: u32::from(overall / 10),
            session_id,
        }
    }
}

/// Sum of points over every reward record.
pub fn total_points(records: &[Record]) -> u32 {
    records
        .iter()
        .filter_map(|r| match &r.data {
            RecordData::Reward(reward) => Some(reward.points),
            _ => None,
        })
        .sum()
}
