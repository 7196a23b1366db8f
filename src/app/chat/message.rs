use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a message within a [`MessageStore`](super::MessageStore).
///
/// Ids are handed out by the owning store and are never reused after a
/// message is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
    /// Named slot for content substituted later by the backend
    Placeholder,
}

impl Role {
    /// Roles a user can pick from the role selector of a regular row.
    pub const SELECTABLE: [Role; 3] = [Role::System, Role::User, Role::Assistant];

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::Placeholder => "Placeholder",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Role::Placeholder)
    }

    /// Hint text shown in an empty content field for this role
    pub fn content_hint(&self) -> &'static str {
        match self {
            Role::System => "Enter a system message here.",
            Role::Assistant => "Enter an assistant message here.",
            Role::User => "Enter a user message here.",
            Role::Placeholder => "Enter placeholder name (e.g., \"msg_history\") here.",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One entry in the chat sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Chat content, or the placeholder name for [`Role::Placeholder`]
    pub content: String,
}

impl Message {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }
}

/// A single-field edit applied through
/// [`MessageStore::update_field`](super::MessageStore::update_field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageField {
    Role(Role),
    Content(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectable_roles_exclude_placeholder() {
        assert!(!Role::SELECTABLE.iter().any(|r| r.is_placeholder()));
        assert_eq!(Role::SELECTABLE.len(), 3);
    }

    #[test]
    fn test_content_hints_vary_by_role() {
        assert_eq!(Role::System.content_hint(), "Enter a system message here.");
        assert_eq!(
            Role::Assistant.content_hint(),
            "Enter an assistant message here."
        );
        assert_eq!(Role::User.content_hint(), "Enter a user message here.");
        assert!(Role::Placeholder.content_hint().contains("msg_history"));
    }
}
