use crate::error::{Result, ScanError};
use crate::transport::Connection;
use tracing::debug;

/// Fixed receive chunk size for draining close-delimited responses.
pub const RECV_CHUNK: usize = 8192;

/// A fully drained HTTP response. `text` holds everything the server sent
/// (status line, headers and body) decoded permissively; link extraction
/// runs over the whole thing, and header fields never look like markup, so
/// no framing pass is needed.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    pub status: u16,
    pub text: String,
}

/// Drain the connection to end of stream in fixed-size chunks and parse the
/// status line. The server closes the socket when it is done (the request
/// asks for `Connection: Close`), so EOF is the completion signal.
pub fn read_response(conn: &mut Connection) -> Result<ResponseDocument> {
    let mut text = String::new();
    let mut buf = [0u8; RECV_CHUNK];
    let mut chunks = 0usize;

    loop {
        let n = conn.recv(&mut buf)?;
        if n == 0 {
            break;
        }
        chunks += 1;
        push_decoded(&mut text, &buf[..n]);
    }
    debug!("response drained: {} chunks, {} bytes", chunks, text.len());

    let status = parse_status(&text)?;
    Ok(ResponseDocument { status, text })
}

/// Decode a received chunk as UTF-8, dropping invalid sequences outright.
/// Each chunk is decoded independently, so a multi-byte character split
/// across a chunk boundary is lost rather than recovered. Pages served in
/// legacy encodings degrade to their ASCII subset, which is where the URLs
/// live anyway.
fn push_decoded(out: &mut String, chunk: &[u8]) {
    let mut bytes = chunk;
    while !bytes.is_empty() {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    out.push_str(s);
                }
                // error_len() is None for a sequence truncated at the end of
                // the chunk; everything left is undecodable either way.
                let skip = match e.error_len() {
                    Some(len) => len,
                    None => rest.len(),
                };
                bytes = &rest[skip..];
            }
        }
    }
}

/// Pull the status code out of the first line: second whitespace-delimited
/// token, as in `HTTP/1.1 200 OK`. Anything that does not yield a numeric
/// second token is a malformed response, including an empty stream.
fn parse_status(text: &str) -> Result<u16> {
    let status_line = text.lines().next().unwrap_or("");
    let token = status_line.split_whitespace().nth(1).ok_or_else(|| {
        ScanError::MalformedResponse(format!("no status code in {status_line:?}"))
    })?;
    token
        .parse::<u16>()
        .map_err(|_| ScanError::MalformedResponse(format!("non-numeric status code {token:?}")))
}
