//! Text input handling
//!
//! Both file formats are small line-oriented text files. They are read whole,
//! decoded, and split into lines before any section parsing happens.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Read a text file from disk, handling encoding issues
///
/// ECU description files are frequently saved as Windows-1252, so invalid
/// UTF-8 falls back to a Latin-1 byte-to-codepoint mapping.
pub fn read_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode(bytes))
}

/// Read all text from an arbitrary reader
pub fn read_text_from<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    }
}

/// Split text into lines, accepting LF, CRLF and lone CR terminators
///
/// A trailing terminator does not produce an extra empty line.
pub fn lines(content: &str) -> Lines<'_> {
    Lines { rest: content }
}

/// Iterator returned by [`lines`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(['\r', '\n']) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + skip..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
