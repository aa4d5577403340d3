use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute markers whose values carry URLs. HTML 4 attribute index plus
/// the usual HTML5 additions, deliberately greedy (`data=` also fires on
/// cookie fields, `value=` on option lists).
const URL_ATTRIBUTES: [&str; 17] = [
    "action=",
    "src=",
    "cite=",
    "data=",
    "codebase=",
    "classid=",
    "href=",
    "manifest=",
    "poster=",
    "longdesc=",
    "background=",
    "profile=",
    "srcset=",
    "code=",
    "usemap=",
    "formaction=",
    "value=",
];

/// A candidate value must contain one of these to count as a URL at all.
const URL_KEYWORDS: [&str; 3] = ["https", "http", "www"];

/// Characters deleted from a candidate before splitting. Covers quoting,
/// tag remnants from unquoted values, and JS-escaped URLs like `https:\/\/`.
const STRIP_CHARS: [char; 5] = ['"', '\'', '<', '>', '\\'];

/// The host ends at the first of these, which drops path, query and port.
const STOP_CHARS: [char; 4] = ['\\', '/', '?', ':'];

/// A scheme+host pair pulled out of page text. Path, query and fragment are
/// discarded; two references to the same origin compare equal no matter how
/// deep they pointed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedUrl {
    pub scheme: String,
    pub host: String,
}

impl fmt::Display for ExtractedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Scan raw page text for URL-bearing attribute values and return the unique
/// origins in first-seen order.
///
/// This is a textual pass, not an HTML parse: adjacent tags are first split
/// onto their own lines (`><` becomes `>\n<`), then each line containing an
/// attribute marker is broken on single spaces and every token carrying the
/// marker donates the text after it as a candidate. Candidates are filtered,
/// cleaned and clipped down to `scheme://host`. Within a line the attribute
/// table order decides extraction order, so results are deterministic for a
/// given input.
pub fn extract_urls(text: &str) -> Vec<ExtractedUrl> {
    let text = text.replace("><", ">\n<");
    let mut urls: Vec<ExtractedUrl> = Vec::new();

    for line in text.split('\n') {
        for attribute in URL_ATTRIBUTES {
            if !line.contains(attribute) {
                continue;
            }
            for token in line.split(' ') {
                let Some(at) = token.find(attribute) else {
                    continue;
                };
                let candidate = &token[at + attribute.len()..];
                if let Some(url) = url_from_candidate(candidate) {
                    if !urls.contains(&url) {
                        urls.push(url);
                    }
                }
            }
        }
    }

    urls
}

/// Reduce one raw candidate to an origin, or reject it. Rejection is always
/// silent; a candidate this heuristic cannot place is skipped, never an
/// error.
fn url_from_candidate(candidate: &str) -> Option<ExtractedUrl> {
    // Values are usually quote-wrapped, so a root-relative path like
    // (")/about shows its slash at index 1. A single-character candidate
    // carries nothing usable either way.
    match candidate.chars().nth(1) {
        None | Some('/') => return None,
        Some(_) => {}
    }

    if !URL_KEYWORDS.iter().any(|kw| candidate.contains(kw)) {
        return None;
    }

    let cleaned: String = candidate.chars().filter(|c| !STRIP_CHARS.contains(c)).collect();

    // No separator after cleaning means a keyword matched on a bare word
    // like www.example.com; those never resolve to an origin here.
    let (scheme, rest) = cleaned.split_once("://")?;
    let host = match rest.find(&STOP_CHARS[..]) {
        Some(i) => &rest[..i],
        None => rest,
    };

    Some(ExtractedUrl {
        scheme: scheme.to_string(),
        host: host.to_string(),
    })
}
