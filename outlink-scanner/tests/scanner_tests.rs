use outlink_scanner::{ScanError, Scanner};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serve exactly one connection with a canned response, then close the
/// socket. Returns the URL to scan and a handle yielding the bytes the
/// client sent.
fn serve_once(response: Vec<u8>) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut sock, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = sock.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        sock.write_all(&response).unwrap();
        request
    });

    (format!("http://127.0.0.1:{port}"), handle)
}

fn html_response(body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n{body}"
    )
    .into_bytes()
}

// ====================
// end-to-end scanning
// ====================

#[test]
fn test_scan_reports_external_links_only() {
    let body = concat!(
        r#"<html><body>"#,
        r#"<a href="https://foo.example/x">"#,
        r#"<a href="http://bar.example/y">"#,
        r#"<a href="http://127.0.0.1/local">"#,
        r#"</body></html>"#,
    );
    let (url, server) = serve_once(html_response(body));

    let result = Scanner::new().scan(&format!("{url}/")).unwrap();
    server.join().unwrap();

    assert_eq!(result.status_code, 200);
    assert!(result.error.is_none());
    assert!(result.response_len > 0);

    let found: Vec<String> = result.urls_found.iter().map(|u| u.to_string()).collect();
    assert_eq!(
        found,
        vec!["https://foo.example", "http://bar.example", "http://127.0.0.1"]
    );

    // The loopback reference shares the target host, so it is internal.
    let external: Vec<String> = result.external_links.iter().map(|u| u.to_string()).collect();
    assert_eq!(external, vec!["https://foo.example", "http://bar.example"]);
}

#[test]
fn test_request_shape_on_the_wire() {
    let (url, server) = serve_once(html_response("<html></html>"));
    let host = url.trim_start_matches("http://").to_string();

    Scanner::new().scan(&format!("{url}/landing?x=1")).unwrap();
    let request = String::from_utf8(server.join().unwrap()).unwrap();

    assert!(request.starts_with("GET /landing?x=1 HTTP/1.1\r\n"));
    assert!(request.contains("Accept-Encoding: identity\r\n"));
    assert!(request.contains(&format!("Host: {host}\r\n")));
    assert!(request.contains("User-Agent: outlink/"));
    assert!(request.contains("Connection: Close\r\n"));
    assert!(request.ends_with("\r\n\r\n"));
}

#[test]
fn test_response_larger_than_one_chunk() {
    // Push the link past the first 8192-byte read.
    let mut body = String::from("<html><body>");
    body.push_str(&"<p>padding</p>".repeat(1500));
    body.push_str(r#"<a href="https://deep.example/found">"#);
    body.push_str("</body></html>");
    let (url, server) = serve_once(html_response(&body));

    let result = Scanner::new().scan(&format!("{url}/")).unwrap();
    server.join().unwrap();

    let found: Vec<String> = result.urls_found.iter().map(|u| u.to_string()).collect();
    assert_eq!(found, vec!["https://deep.example"]);
}

#[test]
fn test_invalid_bytes_in_body_are_dropped() {
    let mut response = b"HTTP/1.1 200 OK\r\n\r\n<a href=\"https://caf".to_vec();
    response.push(0xff);
    response.extend_from_slice(b"e.example/menu\">");
    let (url, server) = serve_once(response);

    let result = Scanner::new().scan(&format!("{url}/")).unwrap();
    server.join().unwrap();

    let found: Vec<String> = result.urls_found.iter().map(|u| u.to_string()).collect();
    assert_eq!(found, vec!["https://cafe.example"]);
}

// ====================
// failure paths
// ====================

#[test]
fn test_non_200_status_aborts_without_extraction() {
    let response =
        b"HTTP/1.1 404 Not Found\r\n\r\n<a href=\"https://ignored.example/x\">".to_vec();
    let (url, server) = serve_once(response);

    let result = Scanner::new().scan(&format!("{url}/missing"));
    server.join().unwrap();

    assert!(matches!(result, Err(ScanError::UnexpectedStatus(404))));
}

#[test]
fn test_garbage_status_line_is_malformed() {
    let (url, server) = serve_once(b"<html><body>not-http</body></html>".to_vec());

    let result = Scanner::new().scan(&format!("{url}/"));
    server.join().unwrap();

    assert!(matches!(result, Err(ScanError::MalformedResponse(_))));
}

#[test]
fn test_immediate_close_is_malformed() {
    let (url, server) = serve_once(Vec::new());

    let result = Scanner::new().scan(&format!("{url}/"));
    server.join().unwrap();

    assert!(matches!(result, Err(ScanError::MalformedResponse(_))));
}

#[test]
fn test_connection_refused_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = Scanner::with_timeout(2).scan(&format!("http://127.0.0.1:{port}/"));
    assert!(matches!(result, Err(ScanError::Transport(_))));
}

#[test]
fn test_tls_handshake_failure_surfaces_as_tls_error() {
    // Accept and immediately hang up; the eager handshake gets EOF.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (sock, _) = listener.accept().unwrap();
        drop(sock);
    });

    let result = Scanner::with_timeout(2).scan(&format!("https://127.0.0.1:{port}/"));
    server.join().unwrap();

    assert!(matches!(result, Err(ScanError::Tls(_))));
}

// ====================
// input validation
// ====================

#[test]
fn test_too_short_link_rejected() {
    let result = Scanner::new().scan("x");
    assert!(matches!(result, Err(ScanError::EmptyLink)));
}

#[test]
fn test_link_without_separator_rejected() {
    let result = Scanner::new().scan("example.com/page");
    assert!(matches!(result, Err(ScanError::MissingSchemeSeparator)));
}

#[test]
fn test_non_http_scheme_rejected() {
    let result = Scanner::new().scan("ftp://files.example.com/pub");
    assert!(matches!(result, Err(ScanError::UnsupportedScheme(_))));
}

#[test]
fn test_http_substring_passes_validation_but_not_parsing() {
    // The validator only asks for "http" somewhere in the link; the parser
    // then insists on an exact scheme token.
    let result = Scanner::new().scan("ftp://http-mirror.example/pub");
    assert!(matches!(result, Err(ScanError::UnsupportedScheme(_))));
}

#[test]
fn test_validation_happens_before_any_io() {
    // Nothing listens anywhere near this port, but the malformed link is
    // rejected first, so no transport error can appear.
    let result = Scanner::new().scan("??");
    assert!(matches!(result, Err(ScanError::MissingSchemeSeparator)));
}
