//! Chat core: pure conversation state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, FeedbackKind, RejectReason, RequestId, Source, SubmitOutcome, Turn, TurnKey,
    SCOPE_CHOICES,
};
pub use update::update;
pub use view_model::{AppViewModel, ScopeChoiceView, TurnView};
