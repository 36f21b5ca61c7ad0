//! Request and event records exchanged with the selection service

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::Agent;
use crate::config::EquilibriumConfig;
use crate::solver::{AgentParticipation, EquilibriumStatus};
use crate::task::{Task, TaskId};

/// Correlates an op with the events it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operations submitted to the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionOp {
    /// Rank the whole pool
    FindEquilibrium {
        request_id: RequestId,
        task: Task,
        agents: Vec<Agent>,
    },
    /// Pick the `n` strongest agents
    SelectTop {
        request_id: RequestId,
        task: Task,
        agents: Vec<Agent>,
        n: usize,
    },
    /// Swap the selector configuration
    Configure {
        request_id: RequestId,
        config: EquilibriumConfig,
    },
}

impl SelectionOp {
    pub fn find_equilibrium(task: Task, agents: Vec<Agent>) -> Self {
        Self::FindEquilibrium {
            request_id: RequestId::new(),
            task,
            agents,
        }
    }

    pub fn select_top(task: Task, agents: Vec<Agent>, n: usize) -> Self {
        Self::SelectTop {
            request_id: RequestId::new(),
            task,
            agents,
            n,
        }
    }

    pub fn configure(config: EquilibriumConfig) -> Self {
        Self::Configure {
            request_id: RequestId::new(),
            config,
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            Self::FindEquilibrium { request_id, .. }
            | Self::SelectTop { request_id, .. }
            | Self::Configure { request_id, .. } => *request_id,
        }
    }
}

/// Events published by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    EquilibriumFound {
        request_id: RequestId,
        task_id: TaskId,
        status: EquilibriumStatus,
        iterations: usize,
        /// Positive participations, highest first
        participations: Vec<AgentParticipation>,
    },
    AgentsSelected {
        request_id: RequestId,
        task_id: TaskId,
        agents: Vec<Agent>,
    },
    Configured {
        request_id: RequestId,
        config: EquilibriumConfig,
    },
    Error {
        request_id: RequestId,
        message: String,
    },
}

impl SelectionEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            Self::EquilibriumFound { request_id, .. }
            | Self::AgentsSelected { request_id, .. }
            | Self::Configured { request_id, .. }
            | Self::Error { request_id, .. } => *request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentType;

    #[test]
    fn test_op_request_id() {
        let op = SelectionOp::select_top(Task::new("plan"), vec![], 2);
        let id = op.request_id();
        assert!(matches!(op, SelectionOp::SelectTop { request_id, n: 2, .. } if request_id == id));
    }

    #[test]
    fn test_op_json_is_tagged() {
        let op = SelectionOp::find_equilibrium(
            Task::new("plan the release").with_id("t-1"),
            vec![Agent::new(AgentType::Planner).with_id("p-1")],
        );

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "find_equilibrium");
        assert_eq!(json["task"]["id"], "t-1");
        assert_eq!(json["agents"][0]["type"], "planner");
    }

    #[test]
    fn test_event_from_json() {
        let raw = r#"{
            "type": "error",
            "request_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "message": "boom"
        }"#;
        let event: SelectionEvent = serde_json::from_str(raw).unwrap();
        assert!(matches!(event, SelectionEvent::Error { ref message, .. } if message == "boom"));
        assert_eq!(
            event.request_id().to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }
}
