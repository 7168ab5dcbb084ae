//! HTTP response building module
//!
//! Builders for the response shapes this server produces. Every builder
//! routes through [`cache::apply_no_cache`] so no response escapes without
//! the cache-busting headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::cache;

/// Build 200 OK response for a served file
pub fn build_file_response(data: Bytes, content_type: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    cache::apply_no_cache(
        Response::builder()
            .status(200)
            .header("Content-Type", content_type)
            .header("Content-Length", content_length),
    )
    .body(Full::new(body))
    .unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    cache::apply_no_cache(
        Response::builder()
            .status(404)
            .header("Content-Type", "text/plain"),
    )
    .body(Full::new(Bytes::from("404 Not Found")))
    .unwrap_or_else(|e| {
        log_build_error("404", &e);
        Response::new(Full::new(Bytes::from("404 Not Found")))
    })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    cache::apply_no_cache(
        Response::builder()
            .status(403)
            .header("Content-Type", "text/plain"),
    )
    .body(Full::new(Bytes::from("403 Forbidden")))
    .unwrap_or_else(|e| {
        log_build_error("403", &e);
        Response::new(Full::new(Bytes::from("403 Forbidden")))
    })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    cache::apply_no_cache(
        Response::builder()
            .status(405)
            .header("Content-Type", "text/plain")
            .header("Allow", "GET, HEAD, OPTIONS"),
    )
    .body(Full::new(Bytes::from("405 Method Not Allowed")))
    .unwrap_or_else(|e| {
        log_build_error("405", &e);
        Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
    })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    cache::apply_no_cache(
        Response::builder()
            .status(204)
            .header("Allow", "GET, HEAD, OPTIONS"),
    )
    .body(Full::new(Bytes::new()))
    .unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_cache(resp: &Response<Full<Bytes>>) {
        assert_eq!(
            resp.headers().get("Cache-Control").unwrap(),
            "no-store, no-cache, must-revalidate"
        );
        assert_eq!(resp.headers().get("Pragma").unwrap(), "no-cache");
        assert_eq!(resp.headers().get("Expires").unwrap(), "0");
    }

    #[test]
    fn test_file_response() {
        let resp = build_file_response(Bytes::from_static(b"hello"), "text/plain; charset=utf-8", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "5");
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_no_cache(&resp);
    }

    #[test]
    fn test_head_keeps_length_drops_body() {
        use hyper::body::Body as _;

        let resp = build_file_response(Bytes::from_static(b"hello"), "text/plain", true);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "5");
        assert_eq!(resp.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_error_responses_carry_no_cache_headers() {
        for resp in [
            build_404_response(),
            build_403_response(),
            build_405_response(),
            build_options_response(),
        ] {
            assert_no_cache(&resp);
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_403_response().status(), 403);
        assert_eq!(build_405_response().status(), 405);
        assert_eq!(build_options_response().status(), 204);
        assert_eq!(
            build_405_response().headers().get("Allow").unwrap(),
            "GET, HEAD, OPTIONS"
        );
    }

    #[test]
    fn test_headers_rebuilt_per_response() {
        // Two responses for the same content get independent header maps.
        let a = build_file_response(Bytes::from_static(b"same"), "text/plain", false);
        let b = build_file_response(Bytes::from_static(b"same"), "text/plain", false);
        assert_no_cache(&a);
        assert_no_cache(&b);
    }
}
