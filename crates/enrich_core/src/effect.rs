use crate::{DataQualityIssue, OutboundRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post a request on the shared channel.
    Send(OutboundRequest),
    /// Open the full record for a newly matched result.
    Navigate { matched_record_id: String },
    /// Extraction came back incomplete; the request was still sent.
    ReportDataQuality(DataQualityIssue),
}
