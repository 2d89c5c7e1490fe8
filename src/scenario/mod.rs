//! Scenario table
//!
//! An ordered, immutable list of expected transcripts. Each entry is paired
//! with a subject invocation by its position in the table; the index is
//! also the only argument the subject receives.

mod builtin;
mod file;

pub use builtin::{INTERNAL_ERROR_MESSAGE, INVALID_ARGUMENT_MESSAGE};
pub use file::{ScenarioEntry, ScenarioFile};

use serde::Serialize;

use crate::common::{Error, Result};

/// One expected control-flow transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Position in the table, passed to the subject as its argument
    pub index: usize,
    /// Short identifier
    pub name: String,
    /// What the transcript demonstrates
    pub description: Option<String>,
    /// Exact stdout the subject must produce, newlines included
    pub expected: String,
}

impl Scenario {
    /// Expected output as the raw bytes compared against the capture
    pub fn expected_bytes(&self) -> &[u8] {
        self.expected.as_bytes()
    }

    /// The subject argument for this scenario
    pub fn argument(&self) -> String {
        self.index.to_string()
    }
}

/// Ordered scenario list
#[derive(Debug, Clone)]
pub struct ScenarioTable {
    scenarios: Vec<Scenario>,
}

impl ScenarioTable {
    /// The five try/except/finally transcripts
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin::scenarios(),
        }
    }

    /// Build a table from entries in order, assigning indices by position
    pub(crate) fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>, String)>,
    {
        let scenarios = entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, description, expected))| Scenario {
                index,
                name,
                description,
                expected,
            })
            .collect();
        Self { scenarios }
    }

    /// Number of scenarios in the table
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the table has no scenarios
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Look up a scenario by index
    pub fn get(&self, index: usize) -> Result<&Scenario> {
        self.scenarios.get(index).ok_or(Error::ScenarioIndex {
            index,
            count: self.scenarios.len(),
        })
    }

    /// All scenarios in index order
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Resolve a user selection into scenarios, in the order given
    ///
    /// An empty selection means every scenario.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<&Scenario>> {
        if indices.is_empty() {
            return Ok(self.scenarios.iter().collect());
        }
        indices.iter().map(|&i| self.get(i)).collect()
    }
}
