//! HTML directory listings.

use std::io;
use std::path::Path;

use crate::http::codec::{encode, html_escape};

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw file name bytes, used for the link target.
    pub name: Vec<u8>,
    pub is_dir: bool,
}

impl Entry {
    fn parent() -> Self {
        Self {
            name: b"..".to_vec(),
            is_dir: true,
        }
    }

    fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

/// Reads the immediate entries of `dir`, dotfiles included, sorted by name.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        // Follows symlinks so a link to a directory lists as one.
        let is_dir = match tokio::fs::metadata(entry.path()).await {
            Ok(meta) => meta.is_dir(),
            Err(_) => entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false),
        };

        entries.push(Entry {
            name: entry.file_name().as_encoded_bytes().to_vec(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Renders a complete HTML page listing `entries` under the heading `title`.
///
/// The first item always links to the parent directory.
pub fn render_entries(title: &str, entries: &[Entry]) -> String {
    let title = html_escape(title);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<ul>\n"
    );

    for entry in std::iter::once(&Entry::parent()).chain(entries) {
        let (icon, suffix) = if entry.is_dir { ("📁", "/") } else { ("📄", "") };

        html.push_str(&format!(
            "<li><a href=\"{}\">{} {}{}</a></li>\n",
            encode(&entry.name),
            icon,
            html_escape(&entry.display_name()),
            suffix,
        ));
    }

    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// Lists `dir` as an HTML page titled `title`.
pub async fn render(dir: &Path, title: &str) -> io::Result<String> {
    let entries = read_entries(dir).await?;
    Ok(render_entries(title, &entries))
}
