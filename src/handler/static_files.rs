//! Static file serving module
//!
//! Resolves request paths below the served root and builds file, index and
//! directory listing responses.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, ResolvedPath};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What a request path points at, after resolution and the root check
#[derive(Debug, PartialEq, Eq)]
pub enum Target {
    File(ServedFile),
    Directory(PathBuf),
    NotFound,
}

/// A regular file inside the root
#[derive(Debug, PartialEq, Eq)]
pub struct ServedFile {
    /// Canonical location, used for I/O
    pub path: PathBuf,
    /// Path as requested; its extension picks the content type
    pub requested: PathBuf,
}

/// Serve the file or directory a request path maps to
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let resolved = http::resolve(&state.root, ctx.path);

    match locate(&state.root, &resolved).await {
        Target::File(file) => serve_file(ctx, state, &file).await,
        Target::Directory(dir) => serve_directory(ctx, state, &dir).await,
        Target::NotFound => http::build_404_response(),
    }
}

/// Classify a resolved path
///
/// Anything whose canonical form leaves the root is reported as missing,
/// as is a regular file requested with a trailing slash.
pub async fn locate(root: &Path, resolved: &ResolvedPath) -> Target {
    // File not found is common (404), no need to log at warning level
    let Ok(canonical) = fs::canonicalize(&resolved.fs_path).await else {
        return Target::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            resolved.fs_path.display(),
            canonical.display()
        ));
        return Target::NotFound;
    }

    match fs::metadata(&canonical).await {
        Ok(meta) if meta.is_dir() => Target::Directory(canonical),
        Ok(meta) if meta.is_file() && !resolved.trailing_slash => Target::File(ServedFile {
            path: canonical,
            requested: resolved.fs_path.clone(),
        }),
        _ => Target::NotFound,
    }
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        let location = ctx.query.map_or_else(
            || format!("{}/", ctx.path),
            |q| format!("{}/?{q}", ctx.path),
        );
        return http::build_redirect_response(&location);
    }

    if let Some(index) = find_index_file(&state.root, dir, &state.config.http.index_files).await {
        return serve_file(ctx, state, &index).await;
    }

    if !state.config.http.directory_listing {
        return http::build_404_response();
    }

    match listing::read_entries(dir).await {
        Ok(entries) => http::build_html_response(listing::render(ctx.path, &entries), ctx.is_head),
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_listing_denied_response()
        }
    }
}

/// First configured index file present in `dir` that stays inside `root`
pub async fn find_index_file(
    root: &Path,
    dir: &Path,
    index_files: &[String],
) -> Option<ServedFile> {
    for index_file in index_files {
        let candidate = ResolvedPath {
            fs_path: dir.join(index_file),
            trailing_slash: false,
        };
        if let Target::File(file) = locate(root, &candidate).await {
            return Some(file);
        }
    }
    None
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    file: &ServedFile,
) -> Response<Full<Bytes>> {
    let meta = match fs::metadata(&file.path).await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!("Failed to stat file '{}': {e}", file.path.display()));
            return http::build_404_response();
        }
    };

    let body = if ctx.is_head {
        None
    } else {
        match fs::read(&file.path).await {
            Ok(c) => Some(c),
            Err(e) => {
                logger::log_error(&format!("Failed to read file '{}': {e}", file.path.display()));
                return http::build_404_response();
            }
        }
    };
    let content_length = body
        .as_ref()
        .map_or(meta.len(), |c| u64::try_from(c.len()).unwrap_or(u64::MAX));
    let content_type = state.mime.content_type_for(&file.requested);

    http::build_file_response(body, content_length, content_type, meta.modified().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(root: &Path, url: &str) -> ResolvedPath {
        http::resolve(root, url)
    }

    #[tokio::test]
    async fn test_locate_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("tool")).unwrap();
        std::fs::write(root.join("tool/app.wasm"), b"\0asm").unwrap();

        assert_eq!(
            locate(&root, &resolved(&root, "/tool/app.wasm")).await,
            Target::File(ServedFile {
                path: root.join("tool/app.wasm"),
                requested: root.join("tool/app.wasm"),
            })
        );
        assert_eq!(
            locate(&root, &resolved(&root, "/tool")).await,
            Target::Directory(root.join("tool"))
        );
        assert_eq!(
            locate(&root, &resolved(&root, "/tool/missing.txt")).await,
            Target::NotFound
        );
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("page.html"), "x").unwrap();

        assert_eq!(
            locate(&root, &resolved(&root, "/page.html/")).await,
            Target::NotFound
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_blocked() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("escape")).unwrap();

        assert_eq!(
            locate(&root, &resolved(&root, "/escape/secret.txt")).await,
            Target::NotFound
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_file_keeps_requested_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.join("build")).unwrap();
        std::fs::create_dir_all(root.join("tool")).unwrap();
        std::fs::write(root.join("build/app-3f2a.bin"), b"\0asm").unwrap();
        std::os::unix::fs::symlink("../build/app-3f2a.bin", root.join("tool/app.wasm")).unwrap();

        assert_eq!(
            locate(&root, &resolved(&root, "/tool/app.wasm")).await,
            Target::File(ServedFile {
                path: root.join("build/app-3f2a.bin"),
                requested: root.join("tool/app.wasm"),
            })
        );
    }

    #[tokio::test]
    async fn test_find_index_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("index.htm"), "htm").unwrap();
        let index_files = vec!["index.html".to_string(), "index.htm".to_string()];

        let found = find_index_file(&root, &root, &index_files).await.unwrap();
        assert_eq!(found.path, root.join("index.htm"));

        std::fs::write(root.join("index.html"), "html").unwrap();
        let found = find_index_file(&root, &root, &index_files).await.unwrap();
        assert_eq!(found.path, root.join("index.html"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_index_symlink_escape_skipped() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.html"), "secret").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("docs")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.html"), root.join("docs/index.html"))
            .unwrap();
        let index_files = vec!["index.html".to_string(), "index.htm".to_string()];

        assert_eq!(find_index_file(&root, &root.join("docs"), &index_files).await, None);

        std::fs::write(root.join("docs/index.htm"), "inside").unwrap();
        let found = find_index_file(&root, &root.join("docs"), &index_files).await.unwrap();
        assert_eq!(found.path, root.join("docs/index.htm"));
    }
}
