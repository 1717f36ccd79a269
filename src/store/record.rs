//! Record types kept by the practice store.

use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackResult, Mode};
use crate::store::reward::Reward;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// The learner using the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Free-form level label such as `"B1"`.
    pub level: String,
    pub daily_goal_minutes: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Learner".into(),
            level: "A2".into(),
            daily_goal_minutes: 10,
        }
    }
}

/// One analysed practice attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub mode: Mode,
    pub text: String,
    pub feedback: FeedbackResult,
}

/// Stored payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordData {
    User(UserProfile),
    Session(PracticeSession),
    Reward(Reward),
}

impl RecordData {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordData::User(_) => RecordKind::User,
            RecordData::Session(_) => RecordKind::Session,
            RecordData::Reward(_) => RecordKind::Reward,
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    User,
    Session,
    Reward,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Session => "session",
            RecordKind::Reward => "reward",
        }
    }
}

/// A stored payload with its opaque id and creation time (unix seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub created_at: u64,
    pub data: RecordData,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    /// Practice mode, for session records.
    pub fn mode(&self) -> Option<Mode> {
        match &self.data {
            RecordData::Session(session) => Some(session.mode),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RecordFilter
// ---------------------------------------------------------------------------

/// Conjunctive filter for [`Store::list`](crate::store::Store::list).
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub kind: Option<RecordKind>,
    pub mode: Option<Mode>,
    /// Only records created at or after this unix time.
    pub since: Option<u64>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn kind(kind: RecordKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn sessions(mode: Mode) -> Self {
        Self {
            kind: Some(RecordKind::Session),
            mode: Some(mode),
            since: None,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.kind.map_or(true, |k| record.kind() == k)
            && self.mode.map_or(true, |m| record.mode() == Some(m))
            && self.since.map_or(true, |t| record.created_at >= t)
    }
}
