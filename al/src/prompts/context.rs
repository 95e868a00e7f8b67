//! Template contexts

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A prioritized objective for the agent
///
/// Lower `priority` values are more important.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub priority: u32,
    pub name: String,
    pub description: String,
}

impl Goal {
    pub fn new(priority: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            priority,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Context for the `agent` template
#[derive(Debug, Clone, Serialize)]
pub struct AgentPromptContext {
    /// Advertised tools, pretty-printed JSON
    pub tools: String,
    /// Goals sorted by ascending priority
    pub goals: Vec<Goal>,
}

impl AgentPromptContext {
    pub fn new(tools: &Value, goals: &[Goal]) -> Self {
        debug!(goals = goals.len(), "AgentPromptContext::new: called");
        let mut goals = goals.to_vec();
        goals.sort_by_key(|g| g.priority);

        Self {
            tools: serde_json::to_string_pretty(tools).unwrap_or_else(|_| tools.to_string()),
            goals,
        }
    }
}

/// Context for the `develop-*` templates
#[derive(Debug, Clone, Serialize)]
pub struct DevelopPromptContext {
    /// Fence tag, e.g. `python`
    pub language: String,
    /// Display name, e.g. `Python`
    pub language_title: String,
    pub test_framework: String,
    pub description: String,
}

impl DevelopPromptContext {
    pub fn new(language: &str, test_framework: &str, description: &str) -> Self {
        debug!(%language, %test_framework, "DevelopPromptContext::new: called");
        Self {
            language: language.to_string(),
            language_title: title_case(language),
            test_framework: test_framework.to_string(),
            description: description.to_string(),
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_context_sorts_goals() {
        let goals = vec![
            Goal::new(3, "Summarize", "Summarize what you found"),
            Goal::new(1, "Gather", "Read every file"),
            Goal::new(2, "Check", "Look for TODO notes"),
        ];
        let ctx = AgentPromptContext::new(&json!({}), &goals);

        let order: Vec<u32> = ctx.goals.iter().map(|g| g.priority).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_develop_context_titles_language() {
        let ctx = DevelopPromptContext::new("python", "pytest", "adds two numbers");
        assert_eq!(ctx.language_title, "Python");
        assert_eq!(DevelopPromptContext::new("", "x", "y").language_title, "");
    }

    #[test]
    fn test_goal_from_yaml() {
        let goal: Goal = serde_yaml::from_str("priority: 2\nname: Read\ndescription: Read the files\n").unwrap();
        assert_eq!(goal, Goal::new(2, "Read", "Read the files"));
    }
}
