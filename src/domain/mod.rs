//! Domain layer modules
//!
//! - `models`: records read from the external stores
//! - `message`: the message specification produced by content resolution

mod message;
mod models;

pub use message::{MessageDraft, MessageSpecification, TransportSettings};
pub use models::{parse_flag, EmailTemplate, Event, PlanEventMapping};
