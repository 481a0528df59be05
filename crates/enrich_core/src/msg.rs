#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Event received on the shared channel. May be addressed to another widget.
    Inbound(crate::InboundEvent),
    /// User asked to link this result to its candidate record.
    LinkClicked,
    /// The link request for this candidate never reached the background process.
    LinkDropped { candidate_pool_id: String },
}
