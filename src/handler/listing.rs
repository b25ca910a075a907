//! Directory listing page
//!
//! Plain HTML index of a directory, in the shape browsers have long been
//! shown by simple development servers.

use std::io;
use std::path::Path;
use tokio::fs;

use crate::http::path::{escape_html, percent_decode, quote_path};

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown to the user: `name/` for directories, `name@` for links
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn link_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Read a directory, sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().await?;
        let is_symlink = file_type.is_symlink();
        // Links count as directories when their target is one
        let is_dir = if is_symlink {
            fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };
        entries.push(ListingEntry {
            name,
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page for `url_path`
pub fn render(url_path: &str, entries: &[ListingEntry]) -> String {
    let display_path = escape_html(&percent_decode(url_path));
    let mut html = String::with_capacity(256 + entries.len() * 64);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Directory listing for {display_path}</title>\n</head>\n<body>\n"
    ));
    html.push_str(&format!("<h2>Directory listing for {display_path}</h2>\n<hr>\n<ul>\n"));
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            quote_path(&entry.link_name()),
            escape_html(&entry.display_name()),
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("A.html"), "a").unwrap();
        std::fs::create_dir(dir.path().join("tool")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A.html", "b.txt", "tool"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[tokio::test]
    async fn test_read_entries_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(&dir.path().join("nope")).await.is_err());
    }

    #[test]
    fn test_render_escapes_and_quotes() {
        let entries = vec![
            ListingEntry {
                name: "my demo.html".to_string(),
                is_dir: false,
                is_symlink: false,
            },
            ListingEntry {
                name: "<sub>".to_string(),
                is_dir: true,
                is_symlink: false,
            },
            ListingEntry {
                name: "latest".to_string(),
                is_dir: true,
                is_symlink: true,
            },
        ];
        let html = render("/tool%20kit/", &entries);
        assert!(html.contains("<title>Directory listing for /tool kit/</title>"));
        assert!(html.contains("<a href=\"my%20demo.html\">my demo.html</a>"));
        assert!(html.contains("<a href=\"%3Csub%3E/\">&lt;sub&gt;/</a>"));
        assert!(html.contains("<a href=\"latest/\">latest@</a>"));
    }
}
