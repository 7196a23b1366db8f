//! Mapping from the editor's message sequence to the chat-completion request.

use super::message::{Message, Role};
use crate::app::config::PlaygroundConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire-level message type.
///
/// Only four names are recognized; anything else falls back to
/// [`MessageType::User`] through [`MessageType::from_role_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Assistant,
    System,
    Developer,
    User,
}

impl MessageType {
    pub fn from_role_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "assistant" => MessageType::Assistant,
            "system" => MessageType::System,
            "developer" => MessageType::Developer,
            _ => MessageType::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub role: String,
    pub content: String,
}

impl SubmissionMessage {
    pub fn from_message(message: &Message) -> Self {
        let role = message.role.display_name().to_lowercase();
        Self {
            message_type: MessageType::from_role_name(&role),
            role,
            content: message.content.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub provider: String,
    pub adapter: String,
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletionRequest {
    pub project_id: String,
    pub messages: Vec<SubmissionMessage>,
    pub model_params: ModelParams,
    pub streaming: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// Nothing to send: no messages, or every message is blank
    EmptyConversation,
    MissingConfiguration(&'static str),
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::EmptyConversation => {
                write!(f, "Please add at least one message with content")
            }
            SubmissionError::MissingConfiguration(field) => {
                write!(f, "Playground configuration is missing '{}'", field)
            }
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Drop placeholder slots and map the rest, in order, to wire messages
pub fn to_submission_messages(messages: &[Message]) -> Vec<SubmissionMessage> {
    messages
        .iter()
        .filter(|m| m.role != Role::Placeholder)
        .map(SubmissionMessage::from_message)
        .collect()
}

impl ChatCompletionRequest {
    pub fn build(messages: &[Message], config: &PlaygroundConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            messages: to_submission_messages(messages),
            model_params: ModelParams {
                provider: config.provider.clone(),
                adapter: config.adapter.clone(),
                model: config.model.clone(),
                temperature: config.temperature,
            },
            streaming: false,
        }
    }

    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.messages.is_empty() || self.messages.iter().all(|m| m.content.is_empty()) {
            return Err(SubmissionError::EmptyConversation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::chat::MessageId;

    #[test]
    fn test_unrecognized_role_name_defaults_to_user() {
        assert_eq!(MessageType::from_role_name("tool"), MessageType::User);
        assert_eq!(MessageType::from_role_name(""), MessageType::User);
        assert_eq!(MessageType::from_role_name("Developer"), MessageType::Developer);
        assert_eq!(MessageType::from_role_name("ASSISTANT"), MessageType::Assistant);
    }

    #[test]
    fn test_content_is_trimmed() {
        let message = Message::new(MessageId(1), Role::Assistant, "  hi there \n");
        let mapped = SubmissionMessage::from_message(&message);
        assert_eq!(mapped.content, "hi there");
        assert_eq!(mapped.role, "assistant");
        assert_eq!(mapped.message_type, MessageType::Assistant);
    }

    #[test]
    fn test_whitespace_only_conversation_is_rejected() {
        let messages = vec![
            Message::new(MessageId(1), Role::System, "   "),
            Message::new(MessageId(2), Role::User, ""),
        ];
        let request = ChatCompletionRequest::build(&messages, &PlaygroundConfig::default());
        assert_eq!(request.validate(), Err(SubmissionError::EmptyConversation));
    }
}
