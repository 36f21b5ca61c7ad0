//! Agent records - the workers competing for a task

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque agent identifier, unique within a pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Role tag of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Researcher,
    Coder,
    Tester,
    Analyst,
    Architect,
    Reviewer,
    Coordinator,
    Optimizer,
    Documenter,
    Planner,
    Custom,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Researcher => "researcher",
            AgentType::Coder => "coder",
            AgentType::Tester => "tester",
            AgentType::Analyst => "analyst",
            AgentType::Architect => "architect",
            AgentType::Reviewer => "reviewer",
            AgentType::Coordinator => "coordinator",
            AgentType::Optimizer => "optimizer",
            AgentType::Documenter => "documenter",
            AgentType::Planner => "planner",
            AgentType::Custom => "custom",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single worker in a candidate pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier
    pub id: AgentId,
    /// Role tag
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    /// Declared capabilities (may be empty)
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
}

impl Agent {
    /// Create an agent with a generated id and no capabilities
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            id: AgentId::new(),
            agent_type,
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<AgentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Add capabilities; duplicates collapse
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    /// Whether the agent declared any capability at all
    pub fn has_capabilities(&self) -> bool {
        !self.capabilities.is_empty()
    }

    /// Number of capabilities shared with `other`
    pub fn shared_capabilities(&self, other: &BTreeSet<String>) -> usize {
        self.capabilities.intersection(other).count()
    }
}
