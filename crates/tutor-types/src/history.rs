//! Interaction records and the bounded per-user history.
//!
//! A [`History`] is the ordered (oldest first) sequence of [`Interaction`]s for
//! one session key. It never holds more than [`MAX_HISTORY`] records: pushing
//! past the bound evicts from the front, so the survivors are always the most
//! recently appended records in their original order.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of interaction records retained per session key.
pub const MAX_HISTORY: usize = 20;

/// Number of most recent interactions used to condition a prompt.
pub const CONTEXT_WINDOW: usize = 5;

/// One completed chat turn: the user's message and the reply that was recorded.
///
/// Immutable once written. Serialized with the wire field names
/// `timestamp`, `userMessage` and `aiResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Epoch milliseconds at which the interaction was recorded.
    pub timestamp: i64,
    pub user_message: String,
    pub ai_response: String,
}

impl Interaction {
    /// Build a record stamped with the current time.
    pub fn new(user_message: impl Into<String>, ai_response: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            user_message: user_message.into(),
            ai_response: ai_response.into(),
        }
    }
}

/// A borrowed user/assistant pair from the context window.
///
/// Never persisted; it only lives as long as the history it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextTurn<'a> {
    pub user: &'a str,
    pub assistant: &'a str,
}

/// Bounded, insertion-ordered history for one session key.
///
/// Serializes as a plain JSON array of [`Interaction`]s. Deserializing an
/// array longer than [`MAX_HISTORY`] keeps only the newest records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Interaction>", into = "Vec<Interaction>")]
pub struct History {
    records: Vec<Interaction>,
}

impl History {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interaction> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Interaction] {
        &self.records
    }

    /// The newest record, if any.
    pub fn last(&self) -> Option<&Interaction> {
        self.records.last()
    }

    /// Append a record, evicting from the front to stay within [`MAX_HISTORY`].
    ///
    /// Returns the number of evicted records.
    pub fn push(&mut self, record: Interaction) -> usize {
        self.records.push(record);
        let overflow = self.records.len().saturating_sub(MAX_HISTORY);
        if overflow > 0 {
            self.records.drain(..overflow);
        }
        overflow
    }

    /// The last `n` records (fewer if the history is shorter), oldest first.
    pub fn recent(&self, n: usize) -> &[Interaction] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// The last [`CONTEXT_WINDOW`] records as borrowed user/assistant pairs.
    pub fn context_window(&self) -> Vec<ContextTurn<'_>> {
        self.recent(CONTEXT_WINDOW)
            .iter()
            .map(|record| ContextTurn {
                user: &record.user_message,
                assistant: &record.ai_response,
            })
            .collect()
    }

    pub fn into_vec(self) -> Vec<Interaction> {
        self.records
    }
}

impl From<Vec<Interaction>> for History {
    fn from(mut records: Vec<Interaction>) -> Self {
        let overflow = records.len().saturating_sub(MAX_HISTORY);
        if overflow > 0 {
            records.drain(..overflow);
        }
        Self { records }
    }
}

impl From<History> for Vec<Interaction> {
    fn from(history: History) -> Self {
        history.records
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Interaction;
    type IntoIter = std::slice::Iter<'a, Interaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
