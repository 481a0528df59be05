use crate::{Effect, Eligibility, ExtractedFields, Msg, WidgetState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match msg {
        Msg::Inbound(event) => {
            let (_, reconciler, _) = state.parts_mut();
            let outcome = reconciler.apply(event);
            if !outcome.applied {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match outcome.navigate_to {
                Some(matched_record_id) => vec![Effect::Navigate { matched_record_id }],
                None => Vec::new(),
            }
        }
        Msg::LinkClicked => {
            let identifier = state.identifier().to_string();
            let (_, reconciler, linker) = state.parts_mut();
            match linker.request_link(&identifier, reconciler.snapshot()) {
                Some(request) => vec![Effect::Send(request)],
                None => Vec::new(),
            }
        }
        Msg::LinkDropped { candidate_pool_id } => {
            let (_, _, linker) = state.parts_mut();
            linker.release(&candidate_pool_id);
            Vec::new()
        }
    };

    (state, effects)
}

/// Render-time evaluation of the request gate. Safe to call on every render:
/// the fetch request is produced at most once per state instance, on the
/// first call where `eligibility` allows enrichment.
pub fn render<F>(
    mut state: WidgetState,
    eligibility: Eligibility,
    extract: F,
) -> (WidgetState, Vec<Effect>)
where
    F: FnOnce() -> ExtractedFields,
{
    let identifier = state.identifier().to_string();
    let (gate, _, _) = state.parts_mut();
    let Some(outcome) =
        gate.maybe_request_enrichment(&identifier, extract, eligibility.allows_enrichment())
    else {
        return (state, Vec::new());
    };

    let mut effects = Vec::with_capacity(1 + outcome.issues.len());
    effects.extend(outcome.issues.into_iter().map(Effect::ReportDataQuality));
    effects.push(Effect::Send(outcome.request));
    (state, effects)
}
