use crate::error::{Result, ScanError};
use crate::target::{Scheme, Target};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

enum Stream {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

/// A one-shot byte stream to a single target. Opened for exactly one
/// request/response exchange; dropping it closes the socket, so every exit
/// path releases the descriptor.
pub struct Connection {
    stream: Stream,
}

impl Connection {
    /// Resolve the target, connect with a deadline and, for HTTPS, run the
    /// TLS handshake eagerly. Single attempt per resolved address, no
    /// retries: DNS, connect and handshake failures all surface here.
    pub fn open(target: &Target, timeout: Duration) -> Result<Self> {
        let addr = target.connect_addr();
        let connect_timeout = timeout / 2;

        let addrs = addr
            .to_socket_addrs()
            .map_err(|e| ScanError::Transport(format!("failed to resolve {addr}: {e}")))?;

        let mut tcp = None;
        let mut last_err = None;
        for sock_addr in addrs {
            debug!("connecting to {} ({})", addr, sock_addr);
            match TcpStream::connect_timeout(&sock_addr, connect_timeout) {
                Ok(stream) => {
                    tcp = Some(stream);
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }
        let tcp = match (tcp, last_err) {
            (Some(stream), _) => stream,
            (None, Some(e)) => {
                return Err(ScanError::Transport(format!(
                    "failed to connect to {addr}: {e}"
                )));
            }
            (None, None) => {
                return Err(ScanError::Transport(format!(
                    "{addr} did not resolve to any address"
                )));
            }
        };

        tcp.set_read_timeout(Some(timeout))?;
        tcp.set_write_timeout(Some(timeout))?;

        let stream = match target.scheme {
            Scheme::Http => Stream::Plain(tcp),
            Scheme::Https => {
                let tls = tls_handshake(target.hostname(), tcp)?;
                Stream::Tls(Box::new(tls))
            }
        };

        Ok(Connection { stream })
    }

    /// Write the full request and flush it.
    pub fn send(&mut self, bytes: &[u8]) -> Result<()> {
        match &mut self.stream {
            Stream::Plain(stream) => {
                stream.write_all(bytes)?;
                stream.flush()?;
            }
            Stream::Tls(stream) => {
                stream.write_all(bytes)?;
                stream.flush()?;
            }
        }
        Ok(())
    }

    /// Read the next chunk into `buf`. Returns 0 at end of stream, which is
    /// the expected completion signal under `Connection: Close`.
    pub fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        let read = match &mut self.stream {
            Stream::Plain(stream) => stream.read(buf),
            Stream::Tls(stream) => stream.read(buf),
        };
        match read {
            Ok(n) => Ok(n),
            // Close-delimited servers routinely drop the link without a TLS
            // close_notify; rustls reports that as UnexpectedEof.
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(0),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => Err(
                ScanError::Transport(format!("receive timed out: {e}")),
            ),
            Err(e) => Err(e.into()),
        }
    }
}

/// Wrap a connected socket in TLS and drive the handshake to completion, so
/// certificate and protocol problems surface at open time rather than on the
/// first read. The server certificate is verified against `hostname` using
/// the webpki root set; protocol versions are rustls defaults (1.2/1.3).
fn tls_handshake(
    hostname: &str,
    mut tcp: TcpStream,
) -> Result<StreamOwned<ClientConnection, TcpStream>> {
    let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|e| ScanError::Tls(format!("invalid server name {hostname}: {e}")))?;

    let mut conn = ClientConnection::new(Arc::new(config), server_name)
        .map_err(|e| ScanError::Tls(e.to_string()))?;

    while conn.is_handshaking() {
        conn.complete_io(&mut tcp)
            .map_err(|e| ScanError::Tls(format!("handshake with {hostname} failed: {e}")))?;
    }
    debug!("TLS handshake with {} complete", hostname);

    Ok(StreamOwned::new(conn, tcp))
}
