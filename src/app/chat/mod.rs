//! Chat message model for the playground editor.
//!
//! - [`message`] - message records and roles
//! - [`store`] - the ordered [`MessageStore`] and its mutation operations
//! - [`drag`] - the [`DragReorderController`] state machine
//! - [`submission`] - mapping to the chat-completion request body

pub mod drag;
pub mod message;
pub mod store;
pub mod submission;

pub use drag::{DragReorderController, DragState, Reorder, RowBounds};
pub use message::{Message, MessageField, MessageId, Role};
pub use store::{MessageStore, DEFAULT_SYSTEM_PROMPT};
pub use submission::{
    to_submission_messages, ChatCompletionRequest, MessageType, ModelParams, SubmissionError,
    SubmissionMessage,
};
