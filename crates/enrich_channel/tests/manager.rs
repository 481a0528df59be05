use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use enrich_channel::{ChannelManager, ChannelSettings, Connector, Delivery, Port, TransportError};
use enrich_core::{InboundEvent, OutboundRequest};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(enrich_logging::initialize_for_tests);
}

/// Shared script for the fake transport.
#[derive(Default)]
struct Script {
    /// Outcomes for upcoming connect attempts; `true` succeeds. Empty means succeed.
    connects: VecDeque<bool>,
    connect_names: Vec<String>,
    /// Number of upcoming posts that fail.
    failing_posts: usize,
    posted: Vec<String>,
    inbound: VecDeque<Result<String, TransportError>>,
}

#[derive(Clone, Default)]
struct FakeConnector {
    script: Arc<Mutex<Script>>,
}

impl FakeConnector {
    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }
}

impl Connector for FakeConnector {
    fn connect(&self, name: &str) -> Result<Box<dyn Port>, TransportError> {
        let mut script = self.script();
        script.connect_names.push(name.to_string());
        if script.connects.pop_front().unwrap_or(true) {
            Ok(Box::new(FakePort {
                script: self.script.clone(),
            }))
        } else {
            Err(TransportError::ConnectFailed {
                name: name.to_string(),
                reason: "scripted".into(),
            })
        }
    }
}

struct FakePort {
    script: Arc<Mutex<Script>>,
}

impl Port for FakePort {
    fn post(&mut self, frame: &str) -> Result<(), TransportError> {
        let mut script = self.script.lock().unwrap();
        if script.failing_posts > 0 {
            script.failing_posts -= 1;
            return Err(TransportError::PostFailed("scripted".into()));
        }
        script.posted.push(frame.to_string());
        Ok(())
    }

    fn try_recv(&mut self) -> Result<Option<String>, TransportError> {
        match self.script.lock().unwrap().inbound.pop_front() {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

fn fetch(identifier: &str) -> OutboundRequest {
    OutboundRequest::FetchProfile {
        identifier: identifier.into(),
        title: None,
        snippet: None,
        metadata: None,
    }
}

fn recorder(manager: &ChannelManager) -> (u64, Arc<Mutex<Vec<InboundEvent>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let id = manager.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    (id, seen)
}

#[test]
fn send_posts_encoded_frame() {
    init_logging();
    let connector = FakeConnector::default();
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());

    assert_eq!(manager.channel_name(), "google-search");
    assert_eq!(manager.send(&fetch("abc")), Delivery::Delivered);
    assert_eq!(
        connector.script().posted,
        vec![r#"{"kind":"fetch-profile","identifier":"abc"}"#.to_string()]
    );
    assert_eq!(connector.script().connect_names, vec!["google-search".to_string()]);
}

#[test]
fn failed_send_reconnects_under_same_name_and_drops_message() {
    init_logging();
    let connector = FakeConnector::default();
    let settings = ChannelSettings {
        name: "results".into(),
    };
    let manager = ChannelManager::open(connector.clone(), settings);
    connector.script().failing_posts = 1;

    assert_eq!(manager.send(&fetch("a")), Delivery::Dropped);
    assert_eq!(manager.reconnect_count(), 1);
    assert!(manager.is_connected());

    assert_eq!(manager.send(&fetch("b")), Delivery::Delivered);
    let script = connector.script();
    assert_eq!(script.posted.len(), 1);
    assert!(script.posted[0].contains(r#""identifier":"b""#));
    assert_eq!(script.connect_names, vec!["results".to_string(), "results".to_string()]);
}

#[test]
fn failed_initial_connect_is_retried_on_send() {
    init_logging();
    let connector = FakeConnector::default();
    connector.script().connects = VecDeque::from([false]);
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());
    assert!(!manager.is_connected());

    assert_eq!(manager.send(&fetch("abc")), Delivery::Delivered);
    assert!(manager.is_connected());
    assert_eq!(connector.script().posted.len(), 1);
}

#[test]
fn send_is_dropped_quietly_when_background_unreachable() {
    init_logging();
    let connector = FakeConnector::default();
    connector.script().connects = VecDeque::from([false, false]);
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());

    assert_eq!(manager.send(&fetch("abc")), Delivery::Dropped);
    assert!(!manager.is_connected());
    assert!(connector.script().posted.is_empty());
}

#[test]
fn subscribe_on_broken_channel_triggers_reconnect() {
    init_logging();
    let connector = FakeConnector::default();
    connector.script().connects = VecDeque::from([false]);
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());

    let _ = recorder(&manager);
    assert!(manager.is_connected());
    assert_eq!(manager.listener_count(), 1);
}

#[test]
fn poll_dispatches_in_order_and_skips_malformed_frames() {
    init_logging();
    let connector = FakeConnector::default();
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());
    let (_, seen) = recorder(&manager);

    connector.script().inbound = VecDeque::from([
        Ok(r#"{"kind":"set-profile","identifier":"a","profile":{"jobTitle":"X"}}"#.to_string()),
        Ok("garbage".to_string()),
        Ok(r#"{"kind":"mystery","identifier":"a"}"#.to_string()),
        Ok(r#"{"kind":"local-match-found","identifier":"b","matchedRecordId":"9"}"#.to_string()),
    ]);

    assert_eq!(manager.poll(), 2);
    let identifiers: Vec<_> = seen
        .lock()
        .unwrap()
        .iter()
        .map(|event| event.identifier().to_string())
        .collect();
    assert_eq!(identifiers, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn listeners_survive_reconnection() {
    init_logging();
    let connector = FakeConnector::default();
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());
    let (_, seen) = recorder(&manager);

    connector.script().inbound = VecDeque::from([
        Ok(r#"{"kind":"update-profile","identifier":"a","profile":{}}"#.to_string()),
        Err(TransportError::Disconnected),
    ]);
    assert_eq!(manager.poll(), 1);
    assert_eq!(manager.reconnect_count(), 1);

    connector.script().inbound = VecDeque::from([Ok(
        r#"{"kind":"update-profile","identifier":"a","profile":{}}"#.to_string(),
    )]);
    assert_eq!(manager.poll(), 1);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn unsubscribe_removes_exactly_one_listener_and_is_idempotent() {
    init_logging();
    let connector = FakeConnector::default();
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());
    let (first, first_seen) = recorder(&manager);
    let (_second, second_seen) = recorder(&manager);

    assert!(manager.unsubscribe(first));
    assert!(!manager.unsubscribe(first));
    assert_eq!(manager.listener_count(), 1);

    connector.script().inbound = VecDeque::from([Ok(
        r#"{"kind":"set-profile","identifier":"a","profile":{}}"#.to_string(),
    )]);
    manager.poll();
    assert!(first_seen.lock().unwrap().is_empty());
    assert_eq!(second_seen.lock().unwrap().len(), 1);
}

#[test]
fn listener_removed_during_dispatch_is_not_called() {
    init_logging();
    let connector = FakeConnector::default();
    let manager = ChannelManager::open(connector.clone(), ChannelSettings::default());

    let victim: Arc<Mutex<Option<u64>>> = Arc::new(Mutex::new(None));
    let handle = manager.clone();
    let target = victim.clone();
    manager.subscribe(move |_| {
        if let Some(id) = target.lock().unwrap().take() {
            handle.unsubscribe(id);
        }
    });
    let (victim_id, victim_seen) = recorder(&manager);
    *victim.lock().unwrap() = Some(victim_id);

    connector.script().inbound = VecDeque::from([Ok(
        r#"{"kind":"set-profile","identifier":"a","profile":{}}"#.to_string(),
    )]);
    manager.poll();

    assert!(victim_seen.lock().unwrap().is_empty());
    assert_eq!(manager.listener_count(), 1);
}
