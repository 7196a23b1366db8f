//! Ordered message sequence backing the chat editor.
//!
//! [`MessageStore`] is the only mutation surface for a conversation. Order in
//! the underlying vector is both the rendering order and the submission order.
//! Every mutation is a plain in-memory transition: lookups by id that miss are
//! silent no-ops so that stale row callbacks (a row removed earlier in the same
//! frame) never fail.

use super::message::{Message, MessageField, MessageId, Role};
use tracing::{debug, warn};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, PartialEq)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    /// Create a store holding the default system + user pair
    pub fn new() -> Self {
        Self::from_messages(Vec::new())
    }

    /// Create a store from existing messages.
    ///
    /// An empty input is seeded with the default system message followed by an
    /// empty user message. A non-empty input is kept as-is, and the id
    /// generator starts past the largest supplied id.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let next_id = messages
            .iter()
            .map(|m| m.id.0.saturating_add(1))
            .max()
            .unwrap_or(1);
        let mut store = Self { messages, next_id };

        if store.messages.is_empty() {
            let system_id = store.next_id();
            let user_id = store.next_id();
            store.messages = vec![
                Message::new(system_id, Role::System, DEFAULT_SYSTEM_PROMPT),
                Message::new(user_id, Role::User, ""),
            ];
            debug!("Seeded empty message store with default system and user messages");
        }

        store
    }

    /// Create a store from role/content pairs, assigning fresh ids in order
    pub fn from_drafts<I, S>(drafts: I) -> Self
    where
        I: IntoIterator<Item = (Role, S)>,
        S: Into<String>,
    {
        let messages = drafts
            .into_iter()
            .zip(1u64..)
            .map(|((role, content), id)| Message::new(MessageId(id), role, content))
            .collect();
        Self::from_messages(messages)
    }

    /// Reserve a fresh id. Ids are monotonic and never handed out twice.
    pub fn next_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn ids(&self) -> Vec<MessageId> {
        self.messages.iter().map(|m| m.id).collect()
    }

    /// Insert a message at the end.
    ///
    /// Returns `false` and leaves the store untouched when the id is already
    /// live.
    pub fn append(&mut self, message: Message) -> bool {
        if self.get(message.id).is_some() {
            warn!("Refusing to append message with duplicate id {}", message.id);
            return false;
        }
        self.next_id = self.next_id.max(message.id.0.saturating_add(1));
        self.messages.push(message);
        true
    }

    pub fn remove_by_id(&mut self, id: MessageId) {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        if self.messages.len() == before {
            debug!("remove_by_id: no message with id {}", id);
        }
    }

    /// Replace one field of the message with the given id.
    ///
    /// Role edits never move a message into or out of [`Role::Placeholder`].
    pub fn update_field(&mut self, id: MessageId, field: MessageField) {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            debug!("update_field: no message with id {}", id);
            return;
        };

        match field {
            MessageField::Role(role) => {
                if role.is_placeholder() != message.role.is_placeholder() {
                    warn!(
                        "Ignoring role change {} -> {} for message {}",
                        message.role, role, id
                    );
                    return;
                }
                message.role = role;
            }
            MessageField::Content(content) => message.content = content,
        }
    }

    /// Move the message at `from` so that it ends up at `to`.
    ///
    /// Indices refer to the current order. Out-of-range indices are ignored.
    pub fn move_to(&mut self, from: usize, to: usize) {
        let len = self.messages.len();
        if from >= len || to >= len {
            warn!("move_to({}, {}) out of range for {} messages", from, to, len);
            return;
        }
        if from == to {
            return;
        }
        let message = self.messages.remove(from);
        self.messages.insert(to, message);
    }

    /// Role a newly added message gets: an assistant reply after a user
    /// message, a user message otherwise.
    pub fn default_next_role(&self) -> Role {
        match self.last() {
            Some(last) if last.role == Role::User => Role::Assistant,
            _ => Role::User,
        }
    }

    /// Append an empty message with the default next role
    pub fn add_message(&mut self) -> MessageId {
        let role = self.default_next_role();
        let id = self.next_id();
        self.messages.push(Message::new(id, role, ""));
        id
    }

    /// Append an empty placeholder slot
    pub fn add_placeholder(&mut self) -> MessageId {
        let id = self.next_id();
        self.messages.push(Message::new(id, Role::Placeholder, ""));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(store: &MessageStore) -> Vec<Role> {
        store.messages().iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_seeded_store() {
        let store = MessageStore::new();
        assert_eq!(roles(&store), vec![Role::System, Role::User]);
        assert_eq!(store.messages()[0].content, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(store.messages()[1].content, "");
        assert_ne!(store.messages()[0].id, store.messages()[1].id);
    }

    #[test]
    fn test_non_empty_input_is_not_seeded() {
        let store = MessageStore::from_messages(vec![Message::new(
            MessageId(7),
            Role::Assistant,
            "hi",
        )]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].id, MessageId(7));
    }

    #[test]
    fn test_ids_continue_past_supplied_ids() {
        let mut store =
            MessageStore::from_messages(vec![Message::new(MessageId(41), Role::User, "")]);
        assert_eq!(store.next_id(), MessageId(42));
    }

    #[test]
    fn test_largest_possible_id_does_not_overflow() {
        let mut store =
            MessageStore::from_messages(vec![Message::new(MessageId(u64::MAX), Role::User, "")]);
        assert_eq!(store.len(), 1);

        let mut other = MessageStore::new();
        assert!(other.append(Message::new(MessageId(u64::MAX), Role::Assistant, "")));
        assert!(!store.append(Message::new(MessageId(u64::MAX), Role::User, "dup")));
        assert_eq!(store.next_id(), MessageId(u64::MAX));
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut store = MessageStore::new();
        let id = store.add_message();
        store.remove_by_id(id);
        let next = store.add_message();
        assert!(next > id);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut store = MessageStore::new();
        let existing = store.messages()[0].id;
        assert!(!store.append(Message::new(existing, Role::User, "dup")));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_content_and_role() {
        let mut store = MessageStore::new();
        let id = store.messages()[1].id;
        store.update_field(id, MessageField::Content("hello".to_string()));
        store.update_field(id, MessageField::Role(Role::Assistant));
        let message = store.get(id).unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(message.role, Role::Assistant);
    }

    #[test]
    fn test_role_never_crosses_placeholder_boundary() {
        let mut store = MessageStore::new();
        let user = store.messages()[1].id;
        let slot = store.add_placeholder();

        store.update_field(user, MessageField::Role(Role::Placeholder));
        store.update_field(slot, MessageField::Role(Role::User));

        assert_eq!(store.get(user).unwrap().role, Role::User);
        assert_eq!(store.get(slot).unwrap().role, Role::Placeholder);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store = MessageStore::new();
        let before = store.clone();
        store.update_field(MessageId(999), MessageField::Content("x".to_string()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_move_to_out_of_range_is_noop() {
        let mut store = MessageStore::new();
        let before = store.ids();
        store.move_to(0, 5);
        store.move_to(9, 0);
        assert_eq!(store.ids(), before);
    }

    #[test]
    fn test_default_role_after_placeholder_is_user() {
        let mut store = MessageStore::new();
        store.add_placeholder();
        assert_eq!(store.default_next_role(), Role::User);
    }
}
