//! Raw agent snapshots and the pages built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A paper as returned by the agent. Only `score` is interpreted.
pub type PaperRecord = serde_json::Map<String, Value>;

/// Decoded response of the agent's result polling endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResults {
    /// JSON-encoded object of papers, keyed by agent-assigned ids.
    #[serde(default)]
    pub papers: Value,

    /// Whether the agent has finished searching. Required once papers arrive.
    #[serde(default)]
    pub finish: Option<bool>,
}

impl RawResults {
    /// The papers payload, or `None` while the agent has nothing to show.
    ///
    /// Null and the empty string both mean "not ready yet".
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match &self.papers {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            other => Some(other),
        }
    }
}

/// One page of ranked papers.
///
/// Keys are positions in the ranked list; they serialize as `"0"`, `"1"`, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub papers: BTreeMap<usize, PaperRecord>,
    pub finish: bool,

    /// Number of ranked papers in the snapshot this page was cut from.
    #[serde(skip)]
    pub total: usize,
}

impl ResultPage {
    /// Empty page telling the caller to poll again.
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Positions present in this page, ascending.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.papers.keys().copied()
    }
}
