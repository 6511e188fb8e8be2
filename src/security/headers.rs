//! Header manipulation for proxied requests.

use axum::http::HeaderMap;

/// Headers that reveal the original caller's network address or the
/// forwarding chain. Removed from every outbound request, whatever their
/// case or multiplicity on the inbound side.
const CLIENT_IDENTITY_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "forwarded"];

/// Connection-scoped headers that must not cross a proxy hop.
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Remove every client-identifying header. `HeaderMap` keys are
/// case-insensitive, and removal drops all values for a name.
pub fn sanitize(headers: &mut HeaderMap) {
    for name in CLIENT_IDENTITY_HEADERS {
        headers.remove(name);
    }
}

/// Remove hop-by-hop headers. Applied to the outbound request and to the
/// relayed response; end-to-end headers pass through untouched.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// Merge a target's static headers into the outbound set. A static header
/// replaces any inbound value under the same name.
pub fn merge_static(headers: &mut HeaderMap, static_headers: &HeaderMap) {
    for (name, value) in static_headers {
        headers.insert(name.clone(), value.clone());
    }
}
