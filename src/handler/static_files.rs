//! Static file serving module
//!
//! Resolves request paths under the served root and builds file responses.
//! Resolution canonicalizes both the root and the candidate, so a path can
//! never escape the root through `..` segments or symlink tricks.

use crate::config::FilesConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a request path from the configured file tree.
pub async fn serve(ctx: &RequestContext<'_>, files: &FilesConfig) -> Response<Full<Bytes>> {
    match load_file(&files.root, ctx.path, &files.index).await {
        Ok((content, content_type)) => {
            http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Access denied for '{}': {e}", ctx.path));
            http::build_403_response()
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read '{}': {e}", ctx.path));
            http::build_404_response()
        }
    }
}

/// Resolve a request path under `root` and read the file.
///
/// Directories (and the empty path) are retried with the index file names.
/// No directory listing is generated: a directory without an index resolves
/// to `NotFound`.
pub async fn load_file(
    root: &str,
    request_path: &str,
    index_files: &[String],
) -> io::Result<(Vec<u8>, &'static str)> {
    let file_path = resolve_path(root, request_path, index_files)?;
    let content = fs::read(&file_path).await?;
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Ok((content, content_type))
}

/// Map a request path to a canonical filesystem path inside `root`.
fn resolve_path(root: &str, request_path: &str, index_files: &[String]) -> io::Result<PathBuf> {
    let decoded = percent_decode(request_path);
    let relative = decoded.trim_start_matches('/');

    // Root missing or unreadable is indistinguishable from "no such file"
    // for the client; canonicalize surfaces the right error kind.
    let root_canonical = Path::new(root).canonicalize()?;

    let mut file_path = Path::new(root).join(relative);

    // Directory requests fall through to the index files
    if relative.is_empty() || relative.ends_with('/') || file_path.is_dir() {
        for index in index_files {
            let candidate = file_path.join(index);
            if candidate.is_file() {
                file_path = candidate;
                break;
            }
        }
    }

    let canonical = file_path.canonicalize()?;

    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "path escapes server root",
        ));
    }

    if canonical.is_dir() {
        // No index file matched and listings are not generated
        return Err(io::ErrorKind::NotFound.into());
    }

    Ok(canonical)
}

/// Decode `%XX` escapes in a request path.
///
/// Malformed escapes are passed through untouched; invalid UTF-8 decodes
/// lossily and will simply fail to match a file.
fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
