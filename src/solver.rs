//! Equilibrium solver - best-response dynamics over a candidate pool
//!
//! Every agent starts at a uniform share of the task. Each iteration, all
//! agents move their participation along `effectiveness * level - 1.5 *
//! competition`, reading only the levels from the previous iteration, then
//! the pool is scaled back whenever total participation exceeds one. The
//! loop ends once no level moves by more than the convergence threshold, or
//! when the iteration cap is hit (a best-effort result, not an error).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::agent::{Agent, AgentId, AgentType};
use crate::competition::{redundancy_penalty, OverlapMatrix};
use crate::config::EquilibriumConfig;
use crate::effectiveness::effectiveness;
use crate::error::ParleyError;
use crate::task::{Task, TaskId};

/// One agent's share of a task at equilibrium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentParticipation {
    pub agent_id: AgentId,
    pub agent_type: AgentType,
    /// Fraction of the task this agent should take, in [0, 1]
    pub participation_level: f64,
    /// Fixed for the whole solve
    pub effectiveness_score: f64,
    pub redundancy_penalty: f64,
    /// Net utility at the last evaluated iteration
    pub utility: f64,
}

impl AgentParticipation {
    fn new(agent: &Agent, effectiveness_score: f64, participation_level: f64) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_type: agent.agent_type,
            participation_level,
            effectiveness_score,
            redundancy_penalty: 0.0,
            utility: 0.0,
        }
    }
}

/// Telemetry for one non-final iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: usize,
    pub total_utility: f64,
    /// Sum of levels after normalization
    pub total_participation: f64,
    /// Largest level change in this iteration
    pub max_delta: f64,
}

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumStatus {
    /// Empty pool, nothing to allocate
    Empty,
    /// Single agent takes the whole task
    Uncontested,
    Converged,
    /// Iteration cap hit; levels are the last computed ones
    MaxIterationsReached,
}

/// Outcome of one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub task_id: TaskId,
    pub status: EquilibriumStatus,
    /// Iterations executed, including the converging one
    pub iterations: usize,
    /// Every agent, in pool order, zeros included
    pub participations: Vec<AgentParticipation>,
    pub history: Vec<IterationRecord>,
}

impl Equilibrium {
    fn empty(task_id: TaskId) -> Self {
        Self {
            task_id,
            status: EquilibriumStatus::Empty,
            iterations: 0,
            participations: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Agents with positive participation, highest first.
    ///
    /// Ties keep pool order.
    pub fn ranked(&self) -> Vec<AgentParticipation> {
        let mut ranked: Vec<AgentParticipation> = self
            .participations
            .iter()
            .filter(|p| p.participation_level > 0.0)
            .cloned()
            .collect();
        ranked.sort_by(|a, b| b.participation_level.total_cmp(&a.participation_level));
        ranked
    }

    pub fn participation_map(&self) -> HashMap<AgentId, AgentParticipation> {
        self.participations
            .iter()
            .map(|p| (p.agent_id.clone(), p.clone()))
            .collect()
    }

    pub fn converged(&self) -> bool {
        self.status != EquilibriumStatus::MaxIterationsReached
    }

    pub fn total_participation(&self) -> f64 {
        self.participations
            .iter()
            .map(|p| p.participation_level)
            .sum()
    }
}

/// Runs the best-response dynamics for a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct EquilibriumSolver {
    config: EquilibriumConfig,
}

impl EquilibriumSolver {
    /// Create a solver after validating `config`
    pub fn new(config: EquilibriumConfig) -> Result<Self, ParleyError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// `config` must already have passed [`EquilibriumConfig::validate`]
    pub(crate) fn from_validated(config: EquilibriumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EquilibriumConfig {
        &self.config
    }

    /// Compute the participation equilibrium of `agents` for `task`
    #[instrument(skip_all, fields(task_id = %task.id, agents = agents.len()))]
    pub fn solve(&self, task: &Task, agents: &[Agent]) -> Equilibrium {
        match agents {
            [] => {
                debug!("Empty pool, nothing to solve");
                return Equilibrium::empty(task.id.clone());
            }
            [agent] => {
                let score = effectiveness(agent, task);
                let mut only = AgentParticipation::new(agent, score, 1.0);
                only.utility = score;

                debug!(agent_id = %agent.id, effectiveness = score, "Uncontested agent");
                return Equilibrium {
                    task_id: task.id.clone(),
                    status: EquilibriumStatus::Uncontested,
                    iterations: 0,
                    participations: vec![only],
                    history: Vec::new(),
                };
            }
            _ => {}
        }

        debug!(agents = agents.len(), "Solving equilibrium");
        let matrix = OverlapMatrix::new(agents);
        let uniform = 1.0 / agents.len() as f64;
        let mut records: Vec<AgentParticipation> = agents
            .iter()
            .map(|agent| AgentParticipation::new(agent, effectiveness(agent, task), uniform))
            .collect();

        let mut history = Vec::new();
        let mut status = EquilibriumStatus::MaxIterationsReached;
        let mut iterations = 0;

        for iteration in 1..=self.config.max_iterations {
            iterations = iteration;
            let snapshot: Vec<f64> = records.iter().map(|r| r.participation_level).collect();

            for (index, record) in records.iter_mut().enumerate() {
                self.best_response(record, matrix.competition(index, &snapshot));
            }

            let total: f64 = records.iter().map(|r| r.participation_level).sum();
            if total > 1.0 {
                for record in &mut records {
                    record.participation_level /= total;
                }
            }

            let total_participation: f64 = records.iter().map(|r| r.participation_level).sum();
            let max_delta = records
                .iter()
                .zip(&snapshot)
                .map(|(record, before)| (record.participation_level - before).abs())
                .fold(0.0, f64::max);

            let total_utility: f64 = records.iter().map(|r| r.utility).sum();
            trace!(iteration, max_delta, total_utility, "Iteration complete");

            if max_delta < self.config.convergence_threshold {
                status = EquilibriumStatus::Converged;
                break;
            }

            history.push(IterationRecord {
                iteration,
                total_utility,
                total_participation,
                max_delta,
            });
        }

        match status {
            EquilibriumStatus::Converged => {
                debug!(iterations, "Equilibrium converged");
            }
            _ => {
                warn!(
                    task_id = %task.id,
                    max_iterations = self.config.max_iterations,
                    "Equilibrium did not converge, returning best-effort levels"
                );
            }
        }

        Equilibrium {
            task_id: task.id.clone(),
            status,
            iterations,
            participations: records,
            history,
        }
    }

    /// Move one agent's level toward its best response.
    ///
    /// `competition` must come from the pre-iteration snapshot.
    fn best_response(&self, record: &mut AgentParticipation, competition: f64) {
        let utility = record.effectiveness_score * record.participation_level;
        let penalty = redundancy_penalty(competition);
        let net_utility = utility - penalty;
        let delta = self.config.learning_rate * (net_utility - competition);

        let mut level = (record.participation_level + delta).clamp(0.0, 1.0);
        if level < self.config.min_participation {
            level = 0.0;
        }

        record.participation_level = level;
        record.redundancy_penalty = penalty;
        record.utility = net_utility;
    }
}
