//! Lazy line reader yielding URLs in file order.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// Applies the manifest line rule: trimmed, non-empty, not a `#` comment.
pub fn parse_line(line: &str) -> Option<&str> {
    let s = line.trim();
    if s.is_empty() || s.starts_with('#') {
        None
    } else {
        Some(s)
    }
}

/// Iterator over the URLs of a manifest file. Opening the file again restarts the sequence.
pub struct UrlReader<R> {
    lines: Lines<R>,
}

impl UrlReader<BufReader<File>> {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> UrlReader<R> {
    pub fn new(reader: R) -> Self {
        UrlReader {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for UrlReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if let Some(url) = parse_line(&line) {
                        return Some(Ok(url.to_string()));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Collects every URL of the manifest at `path`.
pub fn read_urls(path: &Path) -> io::Result<Vec<String>> {
    UrlReader::open(path)?.collect()
}
