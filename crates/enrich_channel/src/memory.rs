//! In-process transport backed by tokio channels.
//!
//! The widget side gets a [`MemoryConnector`]; the background side accepts
//! one [`BackgroundConnection`] per successful connect.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use enrich_core::wire::{decode_request, encode_event};
use enrich_core::{InboundEvent, OutboundRequest};
use enrich_logging::enrich_debug;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::{Connector, Port, TransportError};

pub fn memory_channel() -> (MemoryConnector, BackgroundEndpoint) {
    let (accept_tx, accept_rx) = mpsc::unbounded_channel();
    let refusing = Arc::new(AtomicBool::new(false));
    (
        MemoryConnector {
            accept_tx,
            refusing: refusing.clone(),
        },
        BackgroundEndpoint {
            accept_rx,
            refusing,
        },
    )
}

pub struct MemoryConnector {
    accept_tx: UnboundedSender<BackgroundConnection>,
    refusing: Arc<AtomicBool>,
}

impl Connector for MemoryConnector {
    fn connect(&self, name: &str) -> Result<Box<dyn Port>, TransportError> {
        if self.refusing.load(Ordering::SeqCst) {
            return Err(TransportError::ConnectFailed {
                name: name.to_string(),
                reason: "background refused connection".to_string(),
            });
        }

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let connection = BackgroundConnection {
            name: name.to_string(),
            requests: request_rx,
            events: event_tx,
        };
        self.accept_tx
            .send(connection)
            .map_err(|_| TransportError::ConnectFailed {
                name: name.to_string(),
                reason: "background process is gone".to_string(),
            })?;

        Ok(Box::new(MemoryPort {
            requests: request_tx,
            events: event_rx,
        }))
    }
}

struct MemoryPort {
    requests: UnboundedSender<String>,
    events: UnboundedReceiver<String>,
}

impl Port for MemoryPort {
    fn post(&mut self, frame: &str) -> Result<(), TransportError> {
        self.requests
            .send(frame.to_string())
            .map_err(|_| TransportError::Disconnected)
    }

    fn try_recv(&mut self) -> Result<Option<String>, TransportError> {
        match self.events.try_recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::Disconnected),
        }
    }
}

/// Background side of the in-process transport.
pub struct BackgroundEndpoint {
    accept_rx: UnboundedReceiver<BackgroundConnection>,
    refusing: Arc<AtomicBool>,
}

impl BackgroundEndpoint {
    /// Waits for the next connection. Returns `None` once the connector is dropped.
    pub async fn accept(&mut self) -> Option<BackgroundConnection> {
        self.accept_rx.recv().await
    }

    /// Returns an already-established connection without waiting.
    pub fn try_accept(&mut self) -> Option<BackgroundConnection> {
        self.accept_rx.try_recv().ok()
    }

    /// While set, every connect attempt fails.
    pub fn refuse_connections(&self, refuse: bool) {
        self.refusing.store(refuse, Ordering::SeqCst);
    }
}

/// One connection as seen by the background process.
pub struct BackgroundConnection {
    name: String,
    requests: UnboundedReceiver<String>,
    events: UnboundedSender<String>,
}

impl BackgroundConnection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waits for the next decodable request. Undecodable frames are skipped.
    /// Returns `None` once the widget side has dropped the connection.
    pub async fn recv_request(&mut self) -> Option<OutboundRequest> {
        while let Some(frame) = self.requests.recv().await {
            match decode_request(&frame) {
                Ok(request) => return Some(request),
                Err(err) => enrich_debug!("Background skipping frame ({}): {}", err, frame),
            }
        }
        None
    }

    /// Returns a waiting request without blocking.
    pub fn try_recv_request(&mut self) -> Option<OutboundRequest> {
        while let Ok(frame) = self.requests.try_recv() {
            if let Ok(request) = decode_request(&frame) {
                return Some(request);
            }
        }
        None
    }

    pub fn push(&self, event: &InboundEvent) -> Result<(), TransportError> {
        let frame =
            encode_event(event).map_err(|err| TransportError::PostFailed(err.to_string()))?;
        self.push_raw(frame)
    }

    /// Pushes an arbitrary frame, well-formed or not.
    pub fn push_raw(&self, frame: impl Into<String>) -> Result<(), TransportError> {
        self.events
            .send(frame.into())
            .map_err(|_| TransportError::Disconnected)
    }
}
