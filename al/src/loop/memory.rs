//! Conversation memory for one agent run

use tracing::debug;

use crate::llm::Message;

/// Ordered conversation history, replayed in full on every model call
///
/// Starts as `[user(task)]` and grows by exactly one assistant/user pair per
/// recorded exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    messages: Vec<Message>,
}

impl Memory {
    /// Start a fresh memory holding only the task
    pub fn start(task: impl Into<String>) -> Self {
        debug!("Memory::start: called");
        Self {
            messages: vec![Message::user(task)],
        }
    }

    /// Record the model's raw reply and the observation it produced
    pub fn record_exchange(&mut self, reply: impl Into<String>, observation: impl Into<String>) {
        debug!(len = self.messages.len(), "Memory::record_exchange: called");
        self.messages.push(Message::assistant(reply));
        self.messages.push(Message::user(observation));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_memory_start() {
        let memory = Memory::start("List the files");
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.messages()[0], Message::user("List the files"));
    }

    #[test]
    fn test_record_exchange_appends_pair() {
        let mut memory = Memory::start("task");
        memory.record_exchange("reply", r#"{"result":[]}"#);
        memory.record_exchange("reply 2", r#"{"error":"boom"}"#);

        assert_eq!(memory.len(), 5);
        let roles: Vec<Role> = memory.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(memory.messages()[4].content, r#"{"error":"boom"}"#);
    }
}
