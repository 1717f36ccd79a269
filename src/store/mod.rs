//! Practice record persistence.
//!
//! * [`Store`] — create/read/update/list over records keyed by opaque ids.
//! * [`JsonStore`] — the single implementation: in-memory map mirrored to a
//!   JSON file.
//! * [`Record`] / [`RecordData`] — users, practice sessions and rewards.
//! * [`Reward`] — points and titles earned by a session.

pub mod json_store;
pub mod record;
pub mod reward;

pub use json_store::{JsonStore, Store, StoreError};
pub use record::{PracticeSession, Record, RecordData, RecordFilter, RecordKind, UserProfile};
pub use reward::{total_points, Reward};
