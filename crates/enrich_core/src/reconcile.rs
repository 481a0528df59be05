use crate::profile::non_blank;
use crate::{InboundEvent, Profile};

/// Per-identifier reconciliation state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileState {
    #[default]
    Unknown,
    HasSnapshot(Profile),
}

impl ProfileState {
    pub fn snapshot(&self) -> Option<&Profile> {
        match self {
            ProfileState::Unknown => None,
            ProfileState::HasSnapshot(profile) => Some(profile),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcileOutcome {
    /// The event was addressed to this identifier and folded into the snapshot.
    pub applied: bool,
    /// Set on the first `local-match-found` carrying a matched-record id.
    pub navigate_to: Option<String>,
}

/// Folds inbound events for a single identifier into one profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciler {
    identifier: String,
    state: ProfileState,
    /// Navigation to the full record happens at most once per instance.
    navigated: bool,
}

impl Reconciler {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            state: ProfileState::Unknown,
            navigated: false,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&Profile> {
        self.state.snapshot()
    }

    /// Applies one event. Events addressed to another identifier leave the
    /// state untouched. The next snapshot is computed entirely from the
    /// current one before returning.
    pub fn apply(&mut self, event: InboundEvent) -> ReconcileOutcome {
        if !event.is_addressed_to(&self.identifier) {
            return ReconcileOutcome::default();
        }
        let event = match event {
            InboundEvent::LocalMatchFound {
                identifier,
                matched_record_id,
            } => match non_blank(matched_record_id) {
                Some(id) => InboundEvent::LocalMatchFound {
                    identifier,
                    matched_record_id: Some(id),
                },
                None => return ReconcileOutcome::default(),
            },
            other => other,
        };

        let current = std::mem::take(&mut self.state);
        let mut navigate_to = None;

        let next = match event {
            InboundEvent::SetProfile { profile, .. } => {
                let mut next = profile.normalized();
                // A full replace never unlinks: keep the matched record unless
                // the payload names a new one.
                if next.matched_record_id.is_none() {
                    next.matched_record_id = current
                        .snapshot()
                        .and_then(|previous| previous.matched_record_id.clone());
                }
                next
            }
            InboundEvent::UpdateProfile { profile, .. } => {
                let mut next = match current {
                    ProfileState::Unknown => Profile::default(),
                    ProfileState::HasSnapshot(previous) => previous,
                };
                next.merge(profile.normalized());
                next
            }
            InboundEvent::LocalMatchFound {
                matched_record_id, ..
            } => {
                let mut next = match current {
                    ProfileState::Unknown => Profile::default(),
                    ProfileState::HasSnapshot(previous) => previous,
                };
                if let Some(id) = matched_record_id {
                    if !self.navigated {
                        self.navigated = true;
                        navigate_to = Some(id.clone());
                    }
                    next.matched_record_id = Some(id);
                }
                next
            }
        };

        self.state = ProfileState::HasSnapshot(next);
        ReconcileOutcome {
            applied: true,
            navigate_to,
        }
    }
}
