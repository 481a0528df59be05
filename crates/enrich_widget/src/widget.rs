use std::sync::mpsc;

use enrich_channel::ListenerId;
use enrich_core::{render, update, Effect, Eligibility, Msg, Profile, ResultCardView, WidgetState};
use enrich_logging::enrich_debug;

use crate::{EffectRunner, Extractor};

/// One mounted enrichment widget.
///
/// Mounting registers exactly one listener on the shared channel; dropping
/// the widget (or calling [`ResultWidget::unmount`]) removes exactly that
/// listener. All state lives and dies with the instance.
pub struct ResultWidget {
    state: WidgetState,
    runner: EffectRunner,
    listener: Option<ListenerId>,
    inbox: mpsc::Receiver<Msg>,
}

impl ResultWidget {
    pub fn mount(identifier: impl Into<String>, runner: EffectRunner) -> Self {
        let identifier = identifier.into();
        let (msg_tx, inbox) = mpsc::channel();
        let own_identifier = identifier.clone();
        let listener = runner.channel().subscribe(move |event| {
            if event.is_addressed_to(&own_identifier) {
                let _ = msg_tx.send(Msg::Inbound(event.clone()));
            }
        });
        enrich_debug!("Mounted widget {} (listener {})", identifier, listener);

        Self {
            state: WidgetState::new(identifier),
            runner,
            listener: Some(listener),
            inbox,
        }
    }

    pub fn identifier(&self) -> &str {
        self.state.identifier()
    }

    pub fn snapshot(&self) -> Option<&Profile> {
        self.state.snapshot()
    }

    pub fn request_sent(&self) -> bool {
        self.state.request_sent()
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Applies every event the listener queued since the last call, in order.
    /// Returns whether the snapshot changed.
    pub fn pump(&mut self) -> bool {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.inbox.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch(msg);
        }
        self.state.consume_dirty()
    }

    /// Render pass: evaluates the request gate, then returns the card view.
    pub fn render(
        &mut self,
        eligibility: Eligibility,
        extractor: &dyn Extractor,
    ) -> ResultCardView {
        self.step(|state| render(state, eligibility, || extractor.extract()));
        self.state.view(eligibility)
    }

    pub fn view(&self, eligibility: Eligibility) -> ResultCardView {
        self.state.view(eligibility)
    }

    pub fn link_clicked(&mut self) {
        self.dispatch(Msg::LinkClicked);
    }

    pub fn unmount(mut self) {
        self.detach();
    }

    fn dispatch(&mut self, msg: Msg) {
        self.step(|state| update(state, msg));
    }

    fn step<F>(&mut self, f: F)
    where
        F: FnOnce(WidgetState) -> (WidgetState, Vec<Effect>),
    {
        let placeholder = WidgetState::new(String::new());
        let state = std::mem::replace(&mut self.state, placeholder);
        let (state, effects) = f(state);
        self.state = state;
        for follow_up in self.runner.run(effects) {
            self.dispatch(follow_up);
        }
    }

    fn detach(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.runner.channel().unsubscribe(listener);
            enrich_debug!(
                "Unmounted widget {} (listener {})",
                self.state.identifier(),
                listener
            );
        }
    }
}

impl Drop for ResultWidget {
    fn drop(&mut self) {
        self.detach();
    }
}
