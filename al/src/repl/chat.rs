//! ChatSession - a system prompt plus a replayed user/assistant history

use std::sync::Arc;

use eyre::{Result, WrapErr};
use tracing::debug;

use crate::llm::{CompletionRequest, LlmClient, Message};

/// Stateful chat over a stateless client
pub struct ChatSession {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    messages: Vec<Message>,
    max_tokens: Option<u32>,
}

impl ChatSession {
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        debug!("ChatSession::new: called");
        Self {
            llm,
            system_prompt: system_prompt.into(),
            messages: Vec::new(),
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// History without the system prompt
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Forget the history, keeping the system prompt
    pub fn clear(&mut self) {
        debug!(len = self.messages.len(), "ChatSession::clear: called");
        self.messages.clear();
    }

    /// Send `text` with the full history and record the reply
    ///
    /// On failure the history is left as it was before the call.
    pub async fn ask(&mut self, text: &str) -> Result<String> {
        debug!(history_len = self.messages.len(), "ChatSession::ask: called");
        self.messages.push(Message::user(text));

        let request = CompletionRequest {
            system_prompt: self.system_prompt.clone(),
            messages: self.messages.clone(),
            max_tokens: self.max_tokens,
        };

        match self.llm.complete(request).await {
            Ok(response) => {
                let reply = response.into_text();
                self.messages.push(Message::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                debug!(error = %e, "ChatSession::ask: completion failed, dropping user message");
                self.messages.pop();
                Err(e).wrap_err("Chat completion failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::llm::client::mock::MockLlmClient;

    #[tokio::test]
    async fn test_ask_replays_history() {
        let llm = Arc::new(MockLlmClient::from_texts(&["Use map.", "Use fold."]));
        let mut session = ChatSession::new(llm.clone(), "Be functional");

        assert_eq!(session.ask("How do I transform a list?").await.unwrap(), "Use map.");
        assert_eq!(session.ask("And sum it?").await.unwrap(), "Use fold.");

        assert_eq!(session.messages().len(), 4);
        let second = &llm.requests()[1];
        assert_eq!(second.system_prompt, "Be functional");
        assert_eq!(second.messages.len(), 3);
        assert_eq!(second.messages[1], Message::assistant("Use map."));
    }

    #[tokio::test]
    async fn test_failed_ask_keeps_history_alternating() {
        let llm = Arc::new(MockLlmClient::from_texts(&["first"]));
        let mut session = ChatSession::new(llm, "sys");

        session.ask("one").await.unwrap();
        assert!(session.ask("two").await.is_err());

        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn test_clear() {
        let llm = Arc::new(MockLlmClient::from_texts(&["hi"]));
        let mut session = ChatSession::new(llm, "sys");

        session.ask("hello").await.unwrap();
        session.clear();
        assert!(session.messages().is_empty());
        assert_eq!(session.system_prompt(), "sys");
    }
}
