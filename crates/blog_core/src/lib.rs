//! Blog core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{DocumentJob, Effect, SectionJob};
pub use msg::Msg;
pub use state::{BlogInput, BlogOutput, BlogState, OutputSlot, SectionInput, Ticket, DEFAULT_MODEL};
pub use update::update;
pub use view_model::{BlogViewModel, Notice, SectionInputView, SectionSlotView, PENDING_PLACEHOLDER};
