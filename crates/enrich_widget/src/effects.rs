use std::sync::Arc;

use enrich_channel::{ChannelManager, Delivery};
use enrich_core::{Effect, Msg, OutboundRequest};
use enrich_logging::{enrich_debug, enrich_info, enrich_warn};

use crate::{Navigator, RecordLinks};

/// Executes core effects against the shared channel and the host's navigation.
#[derive(Clone)]
pub struct EffectRunner {
    channel: ChannelManager,
    links: Arc<dyn RecordLinks>,
    navigator: Arc<dyn Navigator>,
}

impl EffectRunner {
    pub fn new(
        channel: ChannelManager,
        links: Arc<dyn RecordLinks>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            channel,
            links,
            navigator,
        }
    }

    pub fn channel(&self) -> &ChannelManager {
        &self.channel
    }

    /// Runs `effects` in order and returns the messages they feed back into
    /// the widget.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Send(request) => {
                    if self.channel.send(&request) == Delivery::Delivered {
                        continue;
                    }
                    enrich_debug!("Request for {} was not delivered", request.identifier());
                    if let OutboundRequest::LinkToRecord {
                        candidate_pool_id, ..
                    } = request
                    {
                        follow_ups.push(Msg::LinkDropped { candidate_pool_id });
                    }
                }
                Effect::Navigate { matched_record_id } => {
                    let url = self.links.full_record_link(&matched_record_id);
                    enrich_info!("Opening matched record {} at {}", matched_record_id, url);
                    self.navigator.open_in_new_tab(&url);
                }
                Effect::ReportDataQuality(issue) => {
                    enrich_warn!(
                        "Scraping result - {} is missing ({})",
                        issue.missing.label(),
                        issue.identifier
                    );
                }
            }
        }
        follow_ups
    }
}
