//! Request path translation
//!
//! Turns a URL path into a filesystem path below the served root. Parent
//! segments can never climb above the root: `..` pops a previous segment or
//! is dropped. Also holds the small escaping helpers used by directory listings.

use std::path::{Path, PathBuf};

/// A URL path mapped onto the served root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub fs_path: PathBuf,
    /// Raw URL path ended with `/`
    pub trailing_slash: bool,
}

/// Map a URL path (no query string) to a path below `root`
pub fn resolve(root: &Path, url_path: &str) -> ResolvedPath {
    let trailing_slash = url_path.trim_end().ends_with('/');
    let decoded = percent_decode(url_path);

    let fs_path = normalize_segments(&decoded)
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment));

    ResolvedPath {
        fs_path,
        trailing_slash,
    }
}

/// Split a decoded path into safe segments
///
/// Empty and `.` segments are dropped, `..` removes the previous segment.
/// Segments carrying a backslash or NUL are skipped entirely.
pub fn normalize_segments(decoded: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains(['\\', '\0']) => {}
            s => segments.push(s),
        }
    }
    segments
}

/// Decode `%XX` escapes; malformed escapes are kept literally
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
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

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a path for use in an `href`, keeping `/` intact
pub fn quote_path(input: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-' | b'~' | b'/') {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// Escape text for inclusion in HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_file() {
        let resolved = resolve(Path::new("/srv"), "/tool/wasm_demo.html");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/tool/wasm_demo.html"));
        assert!(!resolved.trailing_slash);
    }

    #[test]
    fn test_resolve_root_and_directory() {
        let resolved = resolve(Path::new("/srv"), "/");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv"));
        assert!(resolved.trailing_slash);

        let resolved = resolve(Path::new("/srv"), "/tool/");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/tool"));
        assert!(resolved.trailing_slash);
    }

    #[test]
    fn test_traversal_stays_in_root() {
        let resolved = resolve(Path::new("/srv"), "/../../etc/passwd");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/etc/passwd"));

        let resolved = resolve(Path::new("/srv"), "/tool/../../../etc/passwd");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/etc/passwd"));
    }

    #[test]
    fn test_encoded_traversal_stays_in_root() {
        let resolved = resolve(Path::new("/srv"), "/%2e%2e/%2E%2E/etc%2fpasswd");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/etc/passwd"));
    }

    #[test]
    fn test_parent_inside_root() {
        let resolved = resolve(Path::new("/srv"), "/tool/sub/../app.wasm");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/tool/app.wasm"));
    }

    #[test]
    fn test_suspicious_segments_skipped() {
        assert_eq!(normalize_segments("a/..\\b/c"), vec!["a", "c"]);
        assert_eq!(normalize_segments("a/b\0/c"), vec!["a", "c"]);
        assert_eq!(normalize_segments("//a/./b//"), vec!["a", "b"]);
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("/my%20file.txt"), "/my file.txt");
        assert_eq!(percent_decode("/caf%C3%A9"), "/café");
        assert_eq!(percent_decode("/100%"), "/100%");
        assert_eq!(percent_decode("/%zz"), "/%zz");
        assert_eq!(percent_decode("/%4"), "/%4");
    }

    #[test]
    fn test_quote_path() {
        assert_eq!(quote_path("my file.txt"), "my%20file.txt");
        assert_eq!(quote_path("sub/"), "sub/");
        assert_eq!(quote_path("a&b"), "a%26b");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
