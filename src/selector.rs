//! Selector API - run equilibria and inspect the latest one

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use crate::agent::{Agent, AgentId};
use crate::config::EquilibriumConfig;
use crate::error::ParleyError;
use crate::solver::{AgentParticipation, Equilibrium, EquilibriumSolver, IterationRecord};
use crate::task::Task;

/// Equilibrium-based agent selector.
///
/// Solving is pure; the selector only keeps the latest result around for
/// introspection. When several callers share one selector the snapshot is
/// whichever run finished last.
pub struct EquilibriumSelector {
    config: RwLock<EquilibriumConfig>,
    last_run: RwLock<Option<Equilibrium>>,
}

impl EquilibriumSelector {
    /// Create a selector after validating `config`
    pub fn new(config: EquilibriumConfig) -> Result<Self, ParleyError> {
        config.validate()?;
        Ok(Self {
            config: RwLock::new(config),
            last_run: RwLock::new(None),
        })
    }

    /// Solve and keep the result as the last-run snapshot
    #[instrument(skip_all, fields(task_id = %task.id, agents = agents.len()))]
    pub fn solve(&self, task: &Task, agents: &[Agent]) -> Equilibrium {
        let solver = EquilibriumSolver::from_validated(self.config());
        let equilibrium = solver.solve(task, agents);

        info!(
            task_id = %task.id,
            status = ?equilibrium.status,
            iterations = equilibrium.iterations,
            "Equilibrium computed"
        );

        *self.last_run.write() = Some(equilibrium.clone());
        equilibrium
    }

    /// Agents with positive participation, highest first
    pub fn find_equilibrium(&self, task: &Task, agents: &[Agent]) -> Vec<AgentParticipation> {
        self.solve(task, agents).ranked()
    }

    /// The `n` strongest agents at equilibrium.
    ///
    /// Returns fewer than `n` when fewer ended with positive participation.
    pub fn select_top_agents(&self, task: &Task, agents: &[Agent], n: usize) -> Vec<Agent> {
        let by_id: HashMap<&AgentId, &Agent> = agents.iter().map(|a| (&a.id, a)).collect();

        let selected: Vec<Agent> = self
            .find_equilibrium(task, agents)
            .into_iter()
            .take(n)
            .filter_map(|p| by_id.get(&p.agent_id).map(|a| (*a).clone()))
            .collect();

        debug!(requested = n, selected = selected.len(), "Selected top agents");
        selected
    }

    /// Per-iteration trace of the last run
    pub fn iteration_history(&self) -> Vec<IterationRecord> {
        self.last_run
            .read()
            .as_ref()
            .map(|run| run.history.clone())
            .unwrap_or_default()
    }

    /// Final participation of every agent in the last run
    pub fn participations(&self) -> HashMap<AgentId, AgentParticipation> {
        self.last_run
            .read()
            .as_ref()
            .map(Equilibrium::participation_map)
            .unwrap_or_default()
    }

    /// Full result of the last run, if any
    pub fn last_equilibrium(&self) -> Option<Equilibrium> {
        self.last_run.read().clone()
    }

    pub fn config(&self) -> EquilibriumConfig {
        self.config.read().clone()
    }

    /// Replace the active configuration after validating it
    pub fn set_config(&self, config: EquilibriumConfig) -> Result<(), ParleyError> {
        config.validate()?;
        info!(?config, "Selector reconfigured");
        *self.config.write() = config;
        Ok(())
    }
}

impl Default for EquilibriumSelector {
    fn default() -> Self {
        Self {
            config: RwLock::new(EquilibriumConfig::default()),
            last_run: RwLock::new(None),
        }
    }
}

/// Shared handle to a selector
#[derive(Clone)]
pub struct SelectorHandle {
    inner: Arc<EquilibriumSelector>,
}

impl SelectorHandle {
    pub fn new(selector: EquilibriumSelector) -> Self {
        Self {
            inner: Arc::new(selector),
        }
    }
}

impl std::ops::Deref for SelectorHandle {
    type Target = EquilibriumSelector;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
