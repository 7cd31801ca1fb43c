//! The typed context threaded through command handlers.
//!
//! [`ControlContext`] owns the destination endpoint and, after the first
//! send, the live connection. At most one connection exists per context; the
//! connection is opened lazily so usage validation always runs before any
//! transport I/O, and it is torn down with the context on every exit path.

use std::io::Write;

use cornice_config::SocketEndpoint;
use cornice_ipc::WireMessage;

use crate::errors::AppError;
use crate::transport::{self, Connection};

/// Client-side transport context handed to command handlers.
#[derive(Debug)]
pub struct ControlContext {
    endpoint: SocketEndpoint,
    connection: Option<Connection>,
}

impl ControlContext {
    /// Creates a context targeting `endpoint`; no connection is opened yet.
    #[must_use]
    pub fn new(endpoint: SocketEndpoint) -> Self {
        Self {
            endpoint,
            connection: None,
        }
    }

    /// The destination endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &SocketEndpoint {
        &self.endpoint
    }

    /// Encodes `message` and delivers it to the daemon in full.
    ///
    /// Connects on first use. A partial write or a connection closed by the
    /// peer mid-write fails the whole command: there are no partial-command
    /// semantics and no retries, so an error here means the command was not
    /// delivered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connect`] when the endpoint is unreachable and
    /// [`AppError::Send`] when delivery fails after the connection opened.
    pub fn send<M: WireMessage>(&mut self, message: &M) -> Result<(), AppError> {
        let mut connection = match self.connection.take() {
            Some(connection) => connection,
            None => transport::connect(&self.endpoint)?,
        };
        let delivery = write_frame(&mut connection, message);
        self.connection = Some(connection);
        delivery.map_err(AppError::Send)
    }
}

fn write_frame<W: Write, M: WireMessage>(writer: &mut W, message: &M) -> std::io::Result<()> {
    writer.write_all(&message.encode())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use cornice_ipc::{NightLightOn, VolumeSet, VolumeUp};

    use super::*;

    #[test]
    fn frames_are_written_in_full() {
        let mut buffer = Vec::new();
        write_frame(&mut buffer, &VolumeUp).expect("write volume-up");
        write_frame(&mut buffer, &VolumeSet { level: 0.5 }).expect("write volume-set");
        write_frame(&mut buffer, &NightLightOn { temperature: 3000 }).expect("write night-light");

        let mut expected = VolumeUp.encode();
        expected.extend(VolumeSet { level: 0.5 }.encode());
        expected.extend(NightLightOn { temperature: 3000 }.encode());
        assert_eq!(buffer, expected);
    }

    #[cfg(unix)]
    #[test]
    fn send_reuses_one_connection() {
        use std::io::Read;
        use std::os::unix::net::UnixListener;

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cornice.sock");
        let listener = UnixListener::bind(&path).expect("bind listener");

        let endpoint = SocketEndpoint::new(path.to_str().expect("utf8 path").to_owned());
        let mut context = ControlContext::new(endpoint);
        context.send(&VolumeUp).expect("first send");
        context.send(&VolumeSet { level: 1.0 }).expect("second send");
        drop(context);

        // Both frames arrive on a single accepted connection.
        let (mut stream, _) = listener.accept().expect("accept");
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("read frames");
        let mut expected = VolumeUp.encode();
        expected.extend(VolumeSet { level: 1.0 }.encode());
        assert_eq!(received, expected);
    }

    #[cfg(unix)]
    #[test]
    fn unreachable_endpoint_surfaces_connect_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.sock");
        let endpoint = SocketEndpoint::new(path.to_str().expect("utf8 path").to_owned());
        let mut context = ControlContext::new(endpoint);
        let error = context.send(&VolumeUp).expect_err("send should fail");
        assert!(matches!(error, AppError::Connect { .. }));
    }
}
