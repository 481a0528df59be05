use crate::TransportError;

/// Opens connections to the background process.
pub trait Connector: Send {
    fn connect(&self, name: &str) -> Result<Box<dyn Port>, TransportError>;
}

/// One open duplex connection carrying JSON text frames.
pub trait Port: Send {
    fn post(&mut self, frame: &str) -> Result<(), TransportError>;

    /// Returns the next waiting inbound frame, `Ok(None)` when none is waiting,
    /// or an error once the connection is gone.
    fn try_recv(&mut self) -> Result<Option<String>, TransportError>;
}
