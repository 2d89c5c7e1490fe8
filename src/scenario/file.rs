//! Scenario files
//!
//! Defines the YAML layout for custom scenario tables.

use serde::Deserialize;
use std::path::Path;

use super::ScenarioTable;
use crate::common::{Error, Result};

/// A scenario table loaded from a YAML file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Entries in index order
    pub scenarios: Vec<ScenarioEntry>,
}

/// One entry of a scenario file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEntry {
    /// Short identifier
    pub name: String,
    /// Optional description of what the transcript verifies
    pub description: Option<String>,
    /// Exact expected stdout; use a `|` block scalar to keep the final newline
    pub expected: String,
}

impl ScenarioFile {
    /// Parse a scenario file from YAML text
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let file: ScenarioFile = serde_yaml::from_str(content)
            .map_err(|e| Error::scenario_file(origin, e.to_string()))?;

        if file.scenarios.is_empty() {
            return Err(Error::scenario_file(origin, "no scenarios defined"));
        }

        Ok(file)
    }

    /// Load a scenario file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Turn the file into a table
    pub fn into_table(self) -> ScenarioTable {
        ScenarioTable::from_entries(
            self.scenarios
                .into_iter()
                .map(|e| (e.name, e.description, e.expected)),
        )
    }
}

impl ScenarioTable {
    /// Load a table from a YAML scenario file
    pub fn load(path: &Path) -> Result<Self> {
        ScenarioFile::load(path).map(ScenarioFile::into_table)
    }
}
