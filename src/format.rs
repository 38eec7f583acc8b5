//! # Response Formatting
//!
//! Renders a [`ResponseView`] as sectioned text. JSON bodies are
//! pretty-printed; bodies longer than [`INLINE_BODY_LIMIT`] characters are
//! saved to a file and only their head is shown.

use crate::http::ResponseView;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Longest body, in characters, printed in full
pub const INLINE_BODY_LIMIT: usize = 100;

/// Pretty-print `body` if it is JSON, otherwise return it unchanged
pub fn body_text(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| body.to_string())
}

/// Name for a saved body, unique per call
pub fn saved_body_file_name() -> String {
    format!("response_{}.txt", uuid::Uuid::new_v4())
}

/// First `limit` characters of `text`, or `None` if it already fits
fn truncate_chars(text: &str, limit: usize) -> Option<&str> {
    text.char_indices().nth(limit).map(|(idx, _)| &text[..idx])
}

pub struct ResponseFormatter {
    output_dir: PathBuf,
}

impl ResponseFormatter {
    /// Formatter that saves long bodies under `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the response view to `out`.
    ///
    /// Returns the path of the saved body file when the body was too long
    /// to print inline.
    pub fn format<W: Write>(
        &self,
        response: &ResponseView,
        out: &mut W,
    ) -> io::Result<Option<PathBuf>> {
        writeln!(out, "\n=== Request URL ===")?;
        writeln!(out, "{}", response.requested_url)?;

        writeln!(out, "\n=== Response ===")?;
        writeln!(out, "Status Code: {}", response.status_code)?;

        writeln!(out, "\n=== Headers ===")?;
        // order and case as kept by `ResponseView::headers`
        for (name, value) in &response.headers {
            writeln!(out, "{name}: {value}")?;
        }

        writeln!(out, "\n=== Body ===")?;
        let text = body_text(&response.body_text);
        let saved = match truncate_chars(&text, INLINE_BODY_LIMIT) {
            None => {
                writeln!(out, "{text}")?;
                None
            }
            Some(head) => {
                let path = self.save_body(&text)?;
                writeln!(
                    out,
                    "{head}... [Output too long. Saved to {}]",
                    path.display()
                )?;
                Some(path)
            }
        };
        out.flush()?;
        Ok(saved)
    }

    fn save_body(&self, text: &str) -> io::Result<PathBuf> {
        let path = self.output_dir.join(saved_body_file_name());
        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(text.as_bytes())?;
        tracing::info!("saved response body to {}", path.display());
        Ok(path)
    }
}
