//! Teaching case scenarios.

use serde::{Deserialize, Serialize};

use critcare_logic::patient::PatientState;

use crate::persistence::PersistError;

/// Case catalog shipped with the workspace.
pub const BUILTIN_SCENARIOS_JSON: &str = include_str!("../../../data/case_scenarios.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A starting patient plus the teaching material around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseScenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    pub initial_state: PatientState,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Parse a JSON array of scenarios.
pub fn load_scenarios(json: &str) -> Result<Vec<CaseScenario>, PersistError> {
    Ok(serde_json::from_str(json)?)
}

/// The bundled catalog.
pub fn builtin_scenarios() -> Result<Vec<CaseScenario>, PersistError> {
    load_scenarios(BUILTIN_SCENARIOS_JSON)
}

pub fn find_scenario<'a>(scenarios: &'a [CaseScenario], id: &str) -> Option<&'a CaseScenario> {
    scenarios.iter().find(|s| s.id == id)
}
