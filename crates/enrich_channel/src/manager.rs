use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use enrich_core::wire::{decode_event, encode_request};
use enrich_core::{InboundEvent, OutboundRequest};
use enrich_logging::{enrich_debug, enrich_error, enrich_info, enrich_trace, enrich_warn};

use crate::{ChannelSettings, Connector, Delivery, ListenerId, Port};

/// Callback invoked for every inbound event, whatever its identifier.
pub type Listener = Arc<dyn Fn(&InboundEvent) + Send + Sync>;

/// The single shared connection to the background process.
///
/// Cloning yields another handle to the same connection. Transport failures
/// never reach callers: a failed connect, send or receive drops the current
/// port and opens a new one under the same channel name. Listeners belong to
/// the manager, not the port, so they survive reconnection.
#[derive(Clone)]
pub struct ChannelManager {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    settings: ChannelSettings,
    connector: Box<dyn Connector>,
    port: Option<Box<dyn Port>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
    reconnects: u64,
}

impl ChannelManager {
    /// Opens the channel. A failed initial connect is logged and retried on
    /// the next send, subscribe or poll.
    pub fn open(connector: impl Connector + 'static, settings: ChannelSettings) -> Self {
        let mut inner = Inner {
            settings,
            connector: Box::new(connector),
            port: None,
            listeners: Vec::new(),
            next_listener_id: 1,
            reconnects: 0,
        };
        inner.establish();
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Best-effort send. On failure the connection is reestablished and the
    /// message is dropped; there is no retry.
    pub fn send(&self, request: &OutboundRequest) -> Delivery {
        let frame = match encode_request(request) {
            Ok(frame) => frame,
            Err(err) => {
                enrich_error!(
                    "Failed to encode request for {}: {}",
                    request.identifier(),
                    err
                );
                return Delivery::Dropped;
            }
        };

        let mut inner = self.lock();
        if inner.port.is_none() {
            inner.reconnect();
        }
        let Some(port) = inner.port.as_mut() else {
            enrich_warn!(
                "Dropping request for {}: channel unavailable",
                request.identifier()
            );
            return Delivery::Dropped;
        };

        match port.post(&frame) {
            Ok(()) => {
                enrich_trace!("Sent frame {}", frame);
                Delivery::Delivered
            }
            Err(err) => {
                enrich_warn!(
                    "Send failed for {} ({}); reconnecting",
                    request.identifier(),
                    err
                );
                inner.reconnect();
                Delivery::Dropped
            }
        }
    }

    /// Registers a listener and returns the id that unregisters exactly it.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&InboundEvent) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        if inner.port.is_none() {
            inner.reconnect();
        }
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        let listener: Listener = Arc::new(listener);
        inner.listeners.push((id, listener));
        enrich_debug!("Listener {} subscribed ({} total)", id, inner.listeners.len());
        id
    }

    /// Removes the listener registered under `id`. Returns false if it was
    /// already gone, so calling this twice is harmless.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = inner.listeners.len() != before;
        if removed {
            enrich_debug!(
                "Listener {} unsubscribed ({} remaining)",
                id,
                inner.listeners.len()
            );
        }
        removed
    }

    /// Drains waiting inbound frames and delivers each decoded event to every
    /// listener, in arrival order. Malformed frames are skipped. Returns the
    /// number of events dispatched.
    pub fn poll(&self) -> usize {
        let frames = self.lock().drain_frames();
        let mut dispatched = 0;
        for frame in frames {
            match decode_event(&frame) {
                Ok(event) => {
                    self.dispatch(&event);
                    dispatched += 1;
                }
                Err(err) => enrich_debug!("Ignoring inbound frame ({}): {}", err, frame),
            }
        }
        dispatched
    }

    pub fn is_connected(&self) -> bool {
        self.lock().port.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Number of successful reconnections after the initial connect.
    pub fn reconnect_count(&self) -> u64 {
        self.lock().reconnects
    }

    pub fn channel_name(&self) -> String {
        self.lock().settings.name.clone()
    }

    fn dispatch(&self, event: &InboundEvent) {
        // The lock is released while listeners run so they may send or
        // unsubscribe.
        let listeners = self.lock().listeners.clone();
        for (id, listener) in listeners {
            if !self.is_subscribed(id) {
                continue;
            }
            listener(event);
        }
    }

    fn is_subscribed(&self, id: ListenerId) -> bool {
        self.lock()
            .listeners
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn establish(&mut self) -> bool {
        match self.connector.connect(&self.settings.name) {
            Ok(port) => {
                self.port = Some(port);
                true
            }
            Err(err) => {
                enrich_warn!("Could not open channel {}: {}", self.settings.name, err);
                self.port = None;
                false
            }
        }
    }

    fn reconnect(&mut self) {
        self.port = None;
        if self.establish() {
            self.reconnects += 1;
            enrich_info!(
                "Reconnected channel {} (reconnect #{})",
                self.settings.name,
                self.reconnects
            );
        }
    }

    fn drain_frames(&mut self) -> Vec<String> {
        if self.port.is_none() {
            self.reconnect();
        }
        let mut frames = Vec::new();
        let Some(port) = self.port.as_mut() else {
            return frames;
        };
        loop {
            match port.try_recv() {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => break,
                Err(err) => {
                    enrich_warn!(
                        "Receive failed on {} ({}); reconnecting",
                        self.settings.name,
                        err
                    );
                    self.reconnect();
                    break;
                }
            }
        }
        frames
    }
}
