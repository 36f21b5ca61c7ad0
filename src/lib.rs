//! # Parley
//!
//! Equilibrium-based agent selection - the goblins haggle over who takes the job.
//!
//! Instead of a fixed heuristic picking one winner, every candidate agent
//! bids a participation level for the task. Levels evolve under competitive
//! pressure from agents with overlapping skills until the pool stabilizes,
//! giving a ranked, weighted assignment.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  SELECTION SERVICE (optional queue)                  │
//! │        SelectionOp ──► SelectorChannel ──► SelectionEvent            │
//! └────────────────────────────┬────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                 ┌────────────────────────┐
//!                 │  EquilibriumSelector   │  last-run snapshot
//!                 └───────────┬────────────┘
//!                             ▼
//!                 ┌────────────────────────┐
//!                 │   EquilibriumSolver    │  best-response loop
//!                 └─────┬────────────┬─────┘
//!                       ▼            ▼
//!              ┌──────────────┐ ┌──────────────┐
//!              │ Effectiveness│ │ Competition  │
//!              │ (once/agent) │ │ (every iter) │
//!              └──────────────┘ └──────────────┘
//! ```
//!
//! ## Key Concepts
//!
//! - **Participation level**: fraction of a task an agent should take, in [0, 1]
//! - **Effectiveness**: fixed fitness of an agent for a task
//! - **Competition**: pressure from other agents, weighted by their levels
//! - **Equilibrium**: the fixed point (or best effort) of the dynamics
//!
//! ## Example
//!
//! ```
//! use parley::{Agent, AgentType, EquilibriumSelector, Task};
//!
//! let selector = EquilibriumSelector::default();
//! let task = Task::new("review the change");
//! let reviewer = Agent::new(AgentType::Reviewer);
//!
//! let ranked = selector.find_equilibrium(&task, &[reviewer]);
//! assert_eq!(ranked[0].participation_level, 1.0);
//! ```

pub mod agent;
pub mod task;
pub mod config;
pub mod effectiveness;
pub mod competition;
pub mod solver;
pub mod selector;
pub mod protocol;
pub mod channel;
pub mod service;
pub mod error;

pub use agent::{Agent, AgentId, AgentType};
pub use task::{Task, TaskId, TaskPriority, TaskComplexity};
pub use config::EquilibriumConfig;
pub use effectiveness::Effectiveness;
pub use competition::OverlapMatrix;
pub use solver::{
    AgentParticipation, Equilibrium, EquilibriumSolver, EquilibriumStatus, IterationRecord,
};
pub use selector::{EquilibriumSelector, SelectorHandle};
pub use protocol::{RequestId, SelectionEvent, SelectionOp};
pub use channel::{ChannelPair, SelectorChannel};
pub use service::SelectionService;
pub use error::ParleyError;
