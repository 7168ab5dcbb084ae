//! Cache-busting header module
//!
//! The whole point of this server is that clients never reuse a cached
//! copy. Every response, success or error, carries the same three headers.

use hyper::http::response::Builder;

/// `Cache-Control` value sent on every response
pub const CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate";

/// `Pragma` value sent on every response (HTTP/1.0 caches)
pub const PRAGMA: &str = "no-cache";

/// `Expires` value sent on every response
pub const EXPIRES: &str = "0";

/// Attach the cache-busting headers to a response under construction.
///
/// Applied by every response builder, so the headers are recomputed per
/// response and never shared or memoized.
pub fn apply_no_cache(builder: Builder) -> Builder {
    builder
        .header("Cache-Control", CACHE_CONTROL)
        .header("Pragma", PRAGMA)
        .header("Expires", EXPIRES)
}
