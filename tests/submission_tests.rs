//! Chat Completion Request Tests
//!
//! Checks how an editor conversation becomes the JSON body posted to
//! `/api/chatCompletion`. The body format is what the backend parses, so it
//! is pinned with an inline snapshot.

use insta::assert_json_snapshot;
use pretty_assertions::assert_eq;
use promptlab::app::chat::{
    ChatCompletionRequest, MessageStore, MessageType, Role, SubmissionError,
};
use promptlab::app::config::PlaygroundConfig;

fn config() -> PlaygroundConfig {
    PlaygroundConfig {
        project_id: "proj-1".to_string(),
        ..PlaygroundConfig::default()
    }
}

#[test]
fn test_request_body_format() {
    let store = MessageStore::from_drafts([
        (Role::System, "You are a helpful assistant."),
        (Role::User, "  Hello  "),
        (Role::Placeholder, "msg_history"),
        (Role::Assistant, "Hi there"),
    ]);
    let request = ChatCompletionRequest::build(store.messages(), &config());

    assert_json_snapshot!(request, @r#"
    {
      "projectId": "proj-1",
      "messages": [
        {
          "type": "system",
          "role": "system",
          "content": "You are a helpful assistant."
        },
        {
          "type": "user",
          "role": "user",
          "content": "Hello"
        },
        {
          "type": "assistant",
          "role": "assistant",
          "content": "Hi there"
        }
      ],
      "modelParams": {
        "provider": "openai",
        "adapter": "openai",
        "model": "gpt-4o-mini",
        "temperature": 0.7
      },
      "streaming": false
    }
    "#);
}

#[test]
fn test_placeholders_are_excluded_in_order() {
    let store = MessageStore::from_drafts([
        (Role::System, "S"),
        (Role::Placeholder, "history"),
        (Role::User, "Q"),
    ]);
    let request = ChatCompletionRequest::build(store.messages(), &config());

    let sent: Vec<(MessageType, &str)> = request
        .messages
        .iter()
        .map(|m| (m.message_type, m.content.as_str()))
        .collect();
    assert_eq!(sent, vec![(MessageType::System, "S"), (MessageType::User, "Q")]);
    assert!(request.validate().is_ok());
}

#[test]
fn test_blank_conversation_is_rejected() {
    let store = MessageStore::from_drafts([(Role::User, "   "), (Role::Placeholder, "history")]);
    let request = ChatCompletionRequest::build(store.messages(), &config());
    assert_eq!(request.validate(), Err(SubmissionError::EmptyConversation));
    assert_eq!(
        SubmissionError::EmptyConversation.to_string(),
        "Please add at least one message with content"
    );
}

#[test]
fn test_only_placeholders_is_rejected() {
    let store = MessageStore::from_drafts([(Role::Placeholder, "a"), (Role::Placeholder, "b")]);
    let request = ChatCompletionRequest::build(store.messages(), &config());
    assert!(request.messages.is_empty());
    assert_eq!(request.validate(), Err(SubmissionError::EmptyConversation));
}

#[test]
fn test_model_params_follow_config() {
    let config = PlaygroundConfig {
        provider: "anthropic".to_string(),
        adapter: "anthropic".to_string(),
        model: "claude".to_string(),
        temperature: 0.2,
        ..config()
    };
    let request = ChatCompletionRequest::build(MessageStore::new().messages(), &config);
    assert_eq!(request.model_params.provider, "anthropic");
    assert_eq!(request.model_params.model, "claude");
    assert_eq!(request.model_params.temperature, 0.2);
    assert!(!request.streaming);
}
