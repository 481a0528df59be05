use crate::{OutboundRequest, Profile};

/// Emits link-to-record requests for one identifier.
///
/// Tracks the candidate pool id of the last request so repeated clicks while
/// the match is unconfirmed do not send duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkRequester {
    pending: Option<String>,
}

impl LinkRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Clears the pending request for `candidate_pool_id` so the next click
    /// sends again. A release for any other candidate is ignored.
    pub fn release(&mut self, candidate_pool_id: &str) {
        if self.pending.as_deref() == Some(candidate_pool_id) {
            self.pending = None;
        }
    }

    /// Returns the request to send, or `None` when the snapshot has no
    /// candidate, is already matched, or the same candidate is already pending.
    pub fn request_link(
        &mut self,
        identifier: &str,
        snapshot: Option<&Profile>,
    ) -> Option<OutboundRequest> {
        let snapshot = snapshot?;
        if snapshot.is_matched() {
            return None;
        }
        let candidate_pool_id = snapshot.candidate_pool_id.as_ref()?;
        if self.pending.as_ref() == Some(candidate_pool_id) {
            return None;
        }

        self.pending = Some(candidate_pool_id.clone());
        Some(OutboundRequest::LinkToRecord {
            identifier: identifier.to_string(),
            candidate_pool_id: candidate_pool_id.clone(),
        })
    }
}
