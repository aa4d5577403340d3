use crate::target::Target;

/// Fixed User-Agent sent with every request.
pub const USER_AGENT: &str = concat!(
    "outlink/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/trapdoorsec/outlink)"
);

/// Serialize the one request this tool ever sends: a minimal HTTP/1.1 GET.
///
/// `Accept-Encoding: identity` keeps the body uncompressed and
/// `Connection: Close` makes the server end the stream after one response,
/// which is what lets the response reader treat EOF as completion.
pub fn build_request(target: &Target) -> String {
    format!(
        "GET {path} HTTP/1.1\r\n\
         Accept-Encoding: identity\r\n\
         Host: {host}\r\n\
         User-Agent: {ua}\r\n\
         Connection: Close\r\n\
         \r\n",
        path = target.path,
        host = target.host,
        ua = USER_AGENT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let target = Target::parse("http://example.com/a/b").unwrap();
        let request = build_request(&target);

        assert!(request.starts_with("GET /a/b HTTP/1.1\r\n"));
        assert!(request.contains("Accept-Encoding: identity\r\n"));
        assert!(request.contains("Host: example.com\r\n"));
        assert!(request.contains(&format!("User-Agent: {USER_AGENT}\r\n")));
        assert!(request.contains("Connection: Close\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_request_defaults_to_root_path() {
        let target = Target::parse("https://example.com").unwrap();
        let request = build_request(&target);
        assert!(request.starts_with("GET / HTTP/1.1\r\n"));
    }

    #[test]
    fn test_request_keeps_explicit_port_in_host_header() {
        let target = Target::parse("http://localhost:8080/x").unwrap();
        let request = build_request(&target);
        assert!(request.contains("Host: localhost:8080\r\n"));
    }

    #[test]
    fn test_request_is_deterministic() {
        let target = Target::parse("http://example.com/a").unwrap();
        assert_eq!(build_request(&target), build_request(&target));
    }
}
