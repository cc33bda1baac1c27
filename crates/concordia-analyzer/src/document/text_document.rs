use std::path::PathBuf;

use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent, Url};

// ── Document ────────────────────────────────────────────────────────────────

/// Snapshot of one open `.cnd` buffer.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: Url,
    pub text: String,
    /// Version as reported by the client.
    pub version: i32,
    /// Byte offset of each line start, rebuilt on every mutation.
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = line_starts(&text);
        Self {
            uri,
            text,
            version,
            line_offsets,
        }
    }

    /// File-system path behind the URI; `None` for non-`file` schemes.
    pub fn path(&self) -> Option<PathBuf> {
        self.uri.to_file_path().ok()
    }

    // ── queries ─────────────────────────────────────────────────────────

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Text of a 0-based line without its line terminator.
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        Some(self.text[start..end].trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Byte offset of an LSP position. Characters are UTF-16 code units; a
    /// character past the end of the line clamps to the line end.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        let line_start = *self.line_offsets.get(pos.line as usize)?;
        let line = self.line_text(pos.line as usize)?;

        let mut units = 0u32;
        for (index, ch) in line.char_indices() {
            if units >= pos.character {
                return Some(line_start + index);
            }
            units += ch.len_utf16() as u32;
        }
        Some(line_start + line.len())
    }

    pub fn position_of(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.line_offsets[line];
        let character = self.text[line_start..offset].chars().map(|c| c.len_utf16() as u32).sum();
        Position::new(line as u32, character)
    }

    /// Position just past the last character of the buffer.
    pub fn end_position(&self) -> Position {
        self.position_of(self.text.len())
    }

    /// Text of the cursor's line up to the cursor.
    pub fn line_prefix(
        &self,
        pos: Position,
    ) -> Option<&str> {
        let line_start = *self.line_offsets.get(pos.line as usize)?;
        let cursor = self.offset_of(pos)? - line_start;
        let line = self.line_text(pos.line as usize)?;
        Some(&line[..cursor])
    }

    /// Identifier touching the cursor, with its range. A cursor directly after
    /// the last character of a word still selects it.
    pub fn word_at(
        &self,
        pos: Position,
    ) -> Option<(String, Range)> {
        let line_start = *self.line_offsets.get(pos.line as usize)?;
        let line = self.line_text(pos.line as usize)?;
        let cursor = self.offset_of(pos)? - line_start;

        let start = line[..cursor]
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_identifier_char(c))
            .last()
            .map_or(cursor, |(index, _)| index);
        let end = line[cursor..]
            .char_indices()
            .find(|&(_, c)| !is_identifier_char(c))
            .map_or(line.len(), |(index, _)| cursor + index);

        if start == end {
            return None;
        }
        let range = Range::new(self.position_of(line_start + start), self.position_of(line_start + end));
        Some((line[start..end].to_string(), range))
    }

    // ── mutations ───────────────────────────────────────────────────────

    pub fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.line_offsets = line_starts(&self.text);
    }

    /// Apply incremental or full-content changes in order.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            match change.range {
                Some(range) => {
                    if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end))
                        && start <= end
                    {
                        self.text.replace_range(start..end, &change.text);
                    }
                },
                None => self.text = change.text,
            }
            self.line_offsets = line_starts(&self.text);
        }
        self.version = version;
    }
}

// ── helpers ─────────────────────────────────────────────────────────────────

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1)).collect()
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
