use crate::view_model::ResultCardView;
use crate::{Eligibility, LinkRequester, Profile, ProfileState, Reconciler, RequestGate};

/// Everything one mounted result widget knows. Created fresh on every mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    gate: RequestGate,
    reconciler: Reconciler,
    linker: LinkRequester,
    dirty: bool,
}

impl WidgetState {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            gate: RequestGate::new(),
            reconciler: Reconciler::new(identifier),
            linker: LinkRequester::new(),
            dirty: false,
        }
    }

    pub fn identifier(&self) -> &str {
        self.reconciler.identifier()
    }

    pub fn profile_state(&self) -> &ProfileState {
        self.reconciler.state()
    }

    pub fn snapshot(&self) -> Option<&Profile> {
        self.reconciler.snapshot()
    }

    pub fn request_sent(&self) -> bool {
        self.gate.has_sent()
    }

    pub fn link_pending(&self) -> Option<&str> {
        self.linker.pending()
    }

    pub fn view(&self, eligibility: Eligibility) -> ResultCardView {
        ResultCardView::build(self.identifier(), self.snapshot(), eligibility)
    }

    /// Returns whether the snapshot changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut RequestGate, &mut Reconciler, &mut LinkRequester) {
        (&mut self.gate, &mut self.reconciler, &mut self.linker)
    }
}
