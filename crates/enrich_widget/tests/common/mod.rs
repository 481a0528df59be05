#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use enrich_channel::{
    memory_channel, BackgroundConnection, BackgroundEndpoint, ChannelManager, ChannelSettings,
};
use enrich_core::{InboundEvent, OutboundRequest};
use enrich_widget::{EffectRunner, Navigator, TemplateRecordLinks};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(enrich_logging::initialize_for_tests);
}

#[derive(Default)]
pub struct RecordingNavigator {
    opened: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open_in_new_tab(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

pub struct Harness {
    pub runner: EffectRunner,
    pub navigator: Arc<RecordingNavigator>,
    pub background: BackgroundEndpoint,
    pub connection: BackgroundConnection,
}

impl Harness {
    pub fn new() -> Self {
        let (connector, mut background) = memory_channel();
        let channel = ChannelManager::open(connector, ChannelSettings::default());
        let connection = background.try_accept().expect("initial connection");
        let navigator = Arc::new(RecordingNavigator::default());
        let runner = EffectRunner::new(
            channel,
            Arc::new(TemplateRecordLinks::new("https://records.example/persons/{id}")),
            navigator.clone(),
        );
        Self {
            runner,
            navigator,
            background,
            connection,
        }
    }

    pub fn channel(&self) -> &ChannelManager {
        self.runner.channel()
    }

    pub fn requests(&mut self) -> Vec<OutboundRequest> {
        let mut requests = Vec::new();
        while let Some(request) = self.connection.try_recv_request() {
            requests.push(request);
        }
        requests
    }

    pub fn push(&self, event: InboundEvent) {
        self.connection.push(&event).expect("push event");
    }
}
