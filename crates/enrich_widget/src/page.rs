use std::sync::Arc;

use enrich_core::ResultCardView;
use enrich_logging::enrich_trace;

use crate::{EffectRunner, EligibilitySource, Extractor, ResultWidget};

struct MountedResult {
    widget: ResultWidget,
    extractor: Box<dyn Extractor>,
}

/// Host for a streaming result listing: one widget per mounted result, all
/// on the runner's shared channel.
pub struct ResultsPage {
    runner: EffectRunner,
    eligibility: Arc<dyn EligibilitySource>,
    results: Vec<MountedResult>,
}

impl ResultsPage {
    pub fn new(runner: EffectRunner, eligibility: Arc<dyn EligibilitySource>) -> Self {
        Self {
            runner,
            eligibility,
            results: Vec::new(),
        }
    }

    /// Mounts a widget for a newly streamed result and gives it its first render.
    pub fn mount_result(
        &mut self,
        identifier: impl Into<String>,
        extractor: Box<dyn Extractor>,
    ) -> ResultCardView {
        let mut widget = ResultWidget::mount(identifier, self.runner.clone());
        let view = widget.render(self.eligibility.eligibility(), extractor.as_ref());
        self.results.push(MountedResult { widget, extractor });
        view
    }

    /// Unmounts the first widget for `identifier`. Returns false if none is mounted.
    pub fn unmount_result(&mut self, identifier: &str) -> bool {
        let Some(index) = self
            .results
            .iter()
            .position(|result| result.widget.identifier() == identifier)
        else {
            return false;
        };
        let removed = self.results.remove(index);
        removed.widget.unmount();
        true
    }

    /// One event-loop turn: drains the shared channel, lets every widget fold
    /// its events, then re-renders. Returns the identifiers whose snapshot changed.
    pub fn tick(&mut self) -> Vec<String> {
        let dispatched = self.runner.channel().poll();
        enrich_trace!("Tick dispatched {} events", dispatched);

        let eligibility = self.eligibility.eligibility();
        let mut changed = Vec::new();
        for result in &mut self.results {
            if result.widget.pump() {
                changed.push(result.widget.identifier().to_string());
            }
            result.widget.render(eligibility, result.extractor.as_ref());
        }
        changed
    }

    pub fn link_clicked(&mut self, identifier: &str) -> bool {
        match self.widget_mut(identifier) {
            Some(widget) => {
                widget.link_clicked();
                true
            }
            None => false,
        }
    }

    pub fn widget(&self, identifier: &str) -> Option<&ResultWidget> {
        self.results
            .iter()
            .map(|result| &result.widget)
            .find(|widget| widget.identifier() == identifier)
    }

    pub fn widget_mut(&mut self, identifier: &str) -> Option<&mut ResultWidget> {
        self.results
            .iter_mut()
            .map(|result| &mut result.widget)
            .find(|widget| widget.identifier() == identifier)
    }

    pub fn view(&self, identifier: &str) -> Option<ResultCardView> {
        self.widget(identifier)
            .map(|widget| widget.view(self.eligibility.eligibility()))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
