//! Competition model - pressure an agent feels from the rest of the pool

use crate::agent::Agent;

/// Overlap assumed between same-role agents lacking capability data
pub const SAME_TYPE_OVERLAP: f64 = 0.8;
/// Overlap assumed between different-role agents lacking capability data
pub const DIFFERENT_TYPE_OVERLAP: f64 = 0.2;
/// Share of competition charged as redundancy penalty
pub const REDUNDANCY_WEIGHT: f64 = 0.5;

/// Symmetric overlap between two agents in [0, 1].
///
/// Falls back to role identity when either side declares no capabilities.
pub fn overlap(a: &Agent, b: &Agent) -> f64 {
    if !a.has_capabilities() || !b.has_capabilities() {
        return if a.agent_type == b.agent_type {
            SAME_TYPE_OVERLAP
        } else {
            DIFFERENT_TYPE_OVERLAP
        };
    }

    let shared = a.shared_capabilities(&b.capabilities) as f64;
    let larger = a.capabilities.len().max(b.capabilities.len()) as f64;
    shared / larger
}

pub fn redundancy_penalty(competition: f64) -> f64 {
    REDUNDANCY_WEIGHT * competition
}

/// Pairwise overlaps for one pool, computed once per solve
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapMatrix {
    size: usize,
    /// Row-major, diagonal left at zero
    values: Vec<f64>,
}

impl OverlapMatrix {
    pub fn new(agents: &[Agent]) -> Self {
        let size = agents.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let value = overlap(&agents[i], &agents[j]);
                values[i * size + j] = value;
                values[j * size + i] = value;
            }
        }

        Self { size, values }
    }

    /// Overlap between agents at pool positions `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        self.values[i * self.size + j]
    }

    /// Competition felt by agent `index` given everyone's current `levels`.
    ///
    /// The agent itself never contributes to its own sum.
    pub fn competition(&self, index: usize, levels: &[f64]) -> f64 {
        levels
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(other, level)| self.get(index, other) * level)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentType;

    const EPS: f64 = 1e-12;

    fn coder(caps: &[&str]) -> Agent {
        Agent::new(AgentType::Coder).with_capabilities(caps.iter().copied())
    }

    // === Overlap Tests ===

    #[test]
    fn test_identical_capabilities() {
        let a = coder(&["x", "y"]);
        let b = coder(&["x", "y"]);
        assert!((overlap(&a, &b) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_overlap_divides_by_larger_set() {
        let a = coder(&["x", "y", "z", "w"]);
        let b = coder(&["x", "y"]);
        assert!((overlap(&a, &b) - 0.5).abs() < EPS);
        assert!((overlap(&b, &a) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_disjoint_capabilities() {
        let a = coder(&["x"]);
        let b = coder(&["y"]);
        assert_eq!(overlap(&a, &b), 0.0);
    }

    #[test]
    fn test_missing_capabilities_same_type() {
        let a = Agent::new(AgentType::Tester);
        let b = Agent::new(AgentType::Tester).with_capabilities(["x"]);
        assert_eq!(overlap(&a, &b), SAME_TYPE_OVERLAP);
    }

    #[test]
    fn test_missing_capabilities_different_type() {
        let a = Agent::new(AgentType::Tester);
        let b = coder(&["x"]);
        assert_eq!(overlap(&a, &b), DIFFERENT_TYPE_OVERLAP);
        assert_eq!(overlap(&b, &a), DIFFERENT_TYPE_OVERLAP);
    }

    // === Matrix Tests ===

    #[test]
    fn test_matrix_empty() {
        let matrix = OverlapMatrix::new(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.len(), 0);
    }

    #[test]
    fn test_matrix_symmetric_with_zero_diagonal() {
        let agents = vec![coder(&["x", "y"]), coder(&["y"]), Agent::new(AgentType::Analyst)];
        let matrix = OverlapMatrix::new(&agents);

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!((matrix.get(0, 1) - 0.5).abs() < EPS);
        assert_eq!(matrix.get(0, 2), DIFFERENT_TYPE_OVERLAP);
    }

    // === Competition Tests ===

    #[test]
    fn test_competition_excludes_self() {
        let agents = vec![coder(&["x"]), coder(&["x"])];
        let matrix = OverlapMatrix::new(&agents);

        // Own level of 1.0 must not count
        let competition = matrix.competition(0, &[1.0, 0.25]);
        assert!((competition - 0.25).abs() < EPS);
        assert!((redundancy_penalty(competition) - 0.125).abs() < EPS);
    }

    #[test]
    fn test_unrelated_agent_feels_little_pressure() {
        let agents = vec![
            coder(&["x", "y"]),
            coder(&["x", "y"]),
            Agent::new(AgentType::Documenter),
        ];
        let matrix = OverlapMatrix::new(&agents);
        let levels = [1.0 / 3.0; 3];

        let outsider = matrix.competition(2, &levels);
        let insider = matrix.competition(0, &levels);

        assert!((outsider - 0.4 / 3.0).abs() < EPS);
        assert!(outsider < insider);
    }
}
