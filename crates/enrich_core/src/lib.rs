//! Enrichment core: pure per-result state machine, wire messages and view-model helpers.
mod effect;
mod gate;
mod link;
mod msg;
mod profile;
mod reconcile;
mod state;
mod update;
mod view_model;
pub mod wire;

pub use effect::Effect;
pub use gate::{DataQualityIssue, Eligibility, ExtractedField, GateOutcome, RequestGate};
pub use link::LinkRequester;
pub use msg::Msg;
pub use profile::{Profile, RecentAssignment, RecentNote, Website};
pub use reconcile::{ProfileState, ReconcileOutcome, Reconciler};
pub use state::WidgetState;
pub use update::{render, update};
pub use view_model::{
    is_linked_in_url, AssignmentView, CurrentRoleView, ResultCardView, DEFAULT_ASSIGNMENT_STAGE,
    DEFAULT_ASSIGNMENT_STATUS,
};
pub use wire::{DecodeError, ExtractedFields, InboundEvent, OutboundRequest};
