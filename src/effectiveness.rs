//! Effectiveness scoring - how well one agent fits one task

use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentType};
use crate::task::Task;

/// Weight of capability overlap in the final score
pub const CAPABILITY_WEIGHT: f64 = 0.7;
/// Weight of the role keyword bonus in the final score
pub const TYPE_WEIGHT: f64 = 0.3;
/// Capability match assumed when the task states no requirement
pub const NEUTRAL_CAPABILITY_MATCH: f64 = 0.5;
/// Boost when the description names the agent's role
pub const MATCHED_TYPE_BOOST: f64 = 1.0;
/// Boost otherwise; never zero
pub const BASELINE_TYPE_BOOST: f64 = 0.3;

/// Keyword to role table, checked in order. Only the first keyword found in
/// the description counts.
pub const ROLE_KEYWORDS: &[(&str, &[AgentType])] = &[
    ("review", &[AgentType::Reviewer]),
    ("test", &[AgentType::Tester]),
    ("code", &[AgentType::Coder]),
    ("implement", &[AgentType::Coder]),
    ("document", &[AgentType::Documenter]),
    ("plan", &[AgentType::Planner]),
    ("optimize", &[AgentType::Optimizer]),
    ("research", &[AgentType::Researcher]),
    ("analyze", &[AgentType::Analyst]),
    ("architect", &[AgentType::Architect]),
    ("design", &[AgentType::Architect]),
    ("coordinate", &[AgentType::Coordinator]),
];

/// Components of an effectiveness score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effectiveness {
    pub capability_match: f64,
    pub type_boost: f64,
    pub score: f64,
}

impl Effectiveness {
    /// Score `agent` against `task`
    pub fn evaluate(agent: &Agent, task: &Task) -> Self {
        let capability_match = capability_match(agent, task);
        let type_boost = type_boost(agent.agent_type, &task.description);

        Self {
            capability_match,
            type_boost,
            score: CAPABILITY_WEIGHT * capability_match + TYPE_WEIGHT * type_boost,
        }
    }
}

/// Fraction of the task's required capabilities the agent declares
pub fn capability_match(agent: &Agent, task: &Task) -> f64 {
    if task.required_capabilities.is_empty() {
        return NEUTRAL_CAPABILITY_MATCH;
    }

    agent.shared_capabilities(&task.required_capabilities) as f64
        / task.required_capabilities.len() as f64
}

/// The role set of the first keyword present in `description`
pub fn keyword_roles(description: &str) -> Option<&'static [AgentType]> {
    let lowered = description.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, roles)| *roles)
}

pub fn type_boost(agent_type: AgentType, description: &str) -> f64 {
    match keyword_roles(description) {
        Some(roles) if roles.contains(&agent_type) => MATCHED_TYPE_BOOST,
        _ => BASELINE_TYPE_BOOST,
    }
}

/// Effectiveness score in [0, 1]
pub fn effectiveness(agent: &Agent, task: &Task) -> f64 {
    Effectiveness::evaluate(agent, task).score
}
