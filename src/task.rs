//! Task records handed to the selector

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Advisory priority, carried for callers only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Advisory complexity, carried for callers only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    Simple,
    #[default]
    Moderate,
    Complex,
}

/// A unit of work to be shared out among agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Free text; scanned for role keywords
    pub description: String,
    /// Empty means no explicit requirement
    #[serde(default)]
    pub required_capabilities: BTreeSet<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub complexity: TaskComplexity,
}

impl Task {
    /// Create a task with a generated id and no capability requirement
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            description: description.into(),
            required_capabilities: BTreeSet::new(),
            priority: TaskPriority::default(),
            complexity: TaskComplexity::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    /// Add required capabilities; duplicates collapse
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_capabilities
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_complexity(mut self, complexity: TaskComplexity) -> Self {
        self.complexity = complexity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("implement the feature")
            .with_id("t-1")
            .with_capabilities(["rust", "async", "rust"])
            .with_priority(TaskPriority::High);

        assert_eq!(task.id.as_str(), "t-1");
        assert_eq!(task.required_capabilities.len(), 2);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.complexity, TaskComplexity::Moderate);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn test_task_from_json_with_missing_fields() {
        let task: Task =
            serde_json::from_str(r#"{"id":"t-9","description":"review the change"}"#).unwrap();

        assert_eq!(task.id, TaskId::from("t-9"));
        assert!(task.required_capabilities.is_empty());
        assert_eq!(task.priority, TaskPriority::Medium);
    }
}
