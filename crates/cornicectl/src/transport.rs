//! Socket transport for the control client.
//!
//! Encapsulates establishing the connection to the daemon's control socket
//! so the rest of the CLI stays transport agnostic. Connections are opened
//! with a bounded timeout; nothing here retries or blocks indefinitely.

use std::io::{self, Write};
use std::time::Duration;

use cornice_config::SocketEndpoint;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

#[cfg(unix)]
use socket2::{Domain, SockAddr, Socket, Type};

use crate::errors::AppError;

pub(crate) const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// An established connection to the daemon's control socket.
#[derive(Debug)]
pub(crate) struct Connection {
    #[cfg(unix)]
    stream: UnixStream,
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        #[cfg(unix)]
        {
            self.stream.write(buf)
        }

        #[cfg(not(unix))]
        {
            let _ = buf;
            Err(io::Error::from(io::ErrorKind::Unsupported))
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        #[cfg(unix)]
        {
            self.stream.flush()
        }

        #[cfg(not(unix))]
        {
            Err(io::Error::from(io::ErrorKind::Unsupported))
        }
    }
}

/// Connects to the daemon endpoint.
pub(crate) fn connect(endpoint: &SocketEndpoint) -> Result<Connection, AppError> {
    #[cfg(unix)]
    {
        connect_unix(endpoint.path().as_str()).map_err(|source| AppError::Connect {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    #[cfg(not(unix))]
    {
        Err(AppError::UnsupportedUnixTransport(endpoint.to_string()))
    }
}

#[cfg(unix)]
fn connect_unix(path: &str) -> io::Result<Connection> {
    let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
    let address = SockAddr::unix(path)?;
    socket.connect_timeout(&address, CONNECTION_TIMEOUT)?;
    let stream = UnixStream::from(std::os::fd::OwnedFd::from(socket));
    Ok(Connection { stream })
}

#[cfg(all(test, unix))]
mod tests {
    use std::io::Read;
    use std::os::unix::net::UnixListener;

    use super::*;

    #[test]
    fn connects_to_listening_socket() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cornice.sock");
        let listener = UnixListener::bind(&path).expect("bind listener");

        let endpoint = SocketEndpoint::new(path.to_str().expect("utf8 path").to_owned());
        let mut connection = connect(&endpoint).expect("connect");
        connection.write_all(b"\x01").expect("write frame");
        connection.flush().expect("flush");
        drop(connection);

        let (mut stream, _) = listener.accept().expect("accept");
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("read frame");
        assert_eq!(received, vec![0x01]);
    }

    #[test]
    fn missing_socket_is_a_connection_error() {
        let endpoint = SocketEndpoint::new("/nonexistent/cornice/cornice.sock");
        let error = connect(&endpoint).expect_err("connect should fail");
        match error {
            AppError::Connect {
                endpoint: reported, ..
            } => {
                assert_eq!(reported, "/nonexistent/cornice/cornice.sock");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
