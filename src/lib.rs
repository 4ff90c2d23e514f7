//! Chat message view-model.
//!
//! [`message`] holds the attribute record and the [`MessageViewModel`]
//! capability; [`resolver`] derives delivery status, mentions, styled text
//! and rich payloads from anything implementing it.

pub mod config;
pub mod error;
pub mod message;
pub mod resolver;

pub use message::{MessageModel, MessageViewModel};
pub use resolver::{MessageResolver, MessageStatus};
