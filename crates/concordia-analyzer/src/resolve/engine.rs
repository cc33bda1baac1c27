use std::{
    collections::HashSet,
    ops::Range,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{
    loader::{FsLoader, SourceLoader, normalize_path},
    rules::{LineRules, RegexLineRules},
    types::{Definition, DefinitionKind, Member},
};

/// Import chains deeper than this are not followed.
pub const DEFAULT_MAX_IMPORT_DEPTH: usize = 64;

/// Walks a file and everything it transitively imports, collecting type
/// definitions in depth-first order.
///
/// The traversal keeps an explicit stack of per-file scan frames instead of
/// recursing, so a long import chain cannot exhaust the thread stack. Output
/// order is identical to a recursive walk: definitions of an imported file
/// appear where its `@import` line sits in the importer.
#[derive(Debug, Clone)]
pub struct Resolver<L = FsLoader, R = RegexLineRules> {
    loader: L,
    rules: R,
    max_depth: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(FsLoader, RegexLineRules)
    }
}

impl<L: SourceLoader, R: LineRules> Resolver<L, R> {
    pub fn new(
        loader: L,
        rules: R,
    ) -> Self {
        Self {
            loader,
            rules,
            max_depth: DEFAULT_MAX_IMPORT_DEPTH,
        }
    }

    /// Maximum number of nested imports followed from the entry file.
    /// Zero scans the entry file only.
    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolve all definitions visible from `entry_path`.
    ///
    /// `entry_text` replaces the on-disk content of the entry file only, so an
    /// unsaved editor buffer can be scanned. Imported files are always read
    /// through the loader.
    pub fn resolve(
        &self,
        entry_path: &Path,
        entry_text: Option<&str>,
    ) -> Vec<Definition> {
        let mut visited = HashSet::new();
        self.resolve_with_visited(entry_path, entry_text, &mut visited)
    }

    /// Like [`Resolver::resolve`], sharing `visited` with the caller.
    ///
    /// Files already in `visited` are skipped, including the entry file. Every
    /// file reached is added, whether or not it could be read.
    pub fn resolve_with_visited(
        &self,
        entry_path: &Path,
        entry_text: Option<&str>,
        visited: &mut HashSet<PathBuf>,
    ) -> Vec<Definition> {
        let mut definitions = Vec::new();
        let entry = normalize_path(entry_path);
        let Some(root) = self.open_frame(entry, entry_text.map(str::to_owned), 0, 0, visited) else {
            return definitions;
        };

        let mut stack = vec![root];
        while let Some(frame) = stack.last_mut() {
            let Some(import) = frame.advance(&self.rules, &mut definitions) else {
                debug!(
                    "Scanned {} ({} definitions including imports)",
                    frame.path.display(),
                    definitions.len() - frame.first_definition
                );
                stack.pop();
                continue;
            };

            let depth = frame.depth + 1;
            let target = self.loader.resolve_import(frame.dir(), &import);
            if depth > self.max_depth {
                debug!(
                    "Import depth limit ({}) reached in {}; not following {}",
                    self.max_depth,
                    frame.path.display(),
                    target.display()
                );
                continue;
            }
            if let Some(child) = self.open_frame(target, None, depth, definitions.len(), visited) {
                stack.push(child);
            }
        }
        definitions
    }

    fn open_frame(
        &self,
        path: PathBuf,
        text: Option<String>,
        depth: usize,
        first_definition: usize,
        visited: &mut HashSet<PathBuf>,
    ) -> Option<ScanFrame> {
        if !visited.insert(path.clone()) {
            debug!("Skipping already visited {}", path.display());
            return None;
        }
        let text = match text {
            Some(text) => text,
            None => self.loader.read(&path)?,
        };
        debug!("Scanning {} (depth {depth})", path.display());
        Some(ScanFrame {
            path,
            lines: SourceLines::new(text),
            cursor: 0,
            docs: DocBuffer::default(),
            depth,
            first_definition,
        })
    }
}

/// Pending doc-comment lines awaiting a definition or member.
#[derive(Debug, Default)]
struct DocBuffer(Vec<String>);

impl DocBuffer {
    fn push(
        &mut self,
        line: &str,
    ) {
        self.0.push(line.to_owned());
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn take(&mut self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        let doc = self.0.join("\n");
        self.0.clear();
        Some(doc)
    }
}

/// Source text split on `\n`, kept as byte ranges into the owned text.
#[derive(Debug)]
struct SourceLines {
    text: String,
    spans: Vec<Range<usize>>,
}

impl SourceLines {
    fn new(text: String) -> Self {
        let mut spans = Vec::new();
        let mut start = 0;
        for (index, _) in text.match_indices('\n') {
            spans.push(start..index);
            start = index + 1;
        }
        spans.push(start..text.len());
        Self {
            text,
            spans,
        }
    }

    fn get(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.spans.get(index).map(|span| &self.text[span.clone()])
    }
}

/// Scan state for one file on the traversal stack.
#[derive(Debug)]
struct ScanFrame {
    path: PathBuf,
    lines: SourceLines,
    cursor: usize,
    docs: DocBuffer,
    depth: usize,
    /// Length of the output when this frame was opened.
    first_definition: usize,
}

impl ScanFrame {
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Scan forward, appending definitions, until the next `@import` (whose
    /// path is returned so the caller can descend) or the end of the file.
    fn advance(
        &mut self,
        rules: &impl LineRules,
        definitions: &mut Vec<Definition>,
    ) -> Option<String> {
        while let Some(line) = self.lines.get(self.cursor) {
            let index = self.cursor;
            self.cursor += 1;
            let trimmed = line.trim();

            if let Some(doc) = rules.doc_text(trimmed) {
                self.docs.push(doc);
                continue;
            }

            if rules.is_decorator(trimmed) {
                // Other decorators sit between a doc comment and its definition.
                if let Some(import) = rules.import_path(line) {
                    self.docs.clear();
                    return Some(import.to_owned());
                }
                continue;
            }

            if let Some(head) = rules.definition(line) {
                let doc = self.docs.take();
                let members = if head.kind == DefinitionKind::Enum {
                    scan_members(rules, &self.lines, &mut self.cursor)
                } else {
                    Vec::new()
                };
                definitions.push(Definition {
                    name: head.name.to_owned(),
                    kind: head.kind,
                    source_file: self.path.clone(),
                    line: index,
                    doc,
                    members,
                });
                continue;
            }

            self.docs.clear();
        }
        None
    }
}

/// Collect enumerators starting at `cursor`, leaving it just past the closing
/// brace. Without a closing brace the cursor is restored, so the outer scan
/// still sees the lines after a half-typed enum head.
fn scan_members(
    rules: &impl LineRules,
    lines: &SourceLines,
    cursor: &mut usize,
) -> Vec<Member> {
    let body_start = *cursor;
    let mut members = Vec::new();
    let mut docs = DocBuffer::default();
    loop {
        let Some(line) = lines.get(*cursor) else {
            *cursor = body_start;
            break;
        };
        let index = *cursor;
        *cursor += 1;
        let trimmed = line.trim();

        if let Some(doc) = rules.doc_text(trimmed) {
            docs.push(doc);
            continue;
        }
        if rules.closes_enum(trimmed) {
            break;
        }
        match rules.member(trimmed) {
            Some(name) => members.push(Member {
                name: name.to_owned(),
                line: index,
                doc: docs.take(),
            }),
            None => docs.clear(),
        }
    }
    members
}

#[cfg(test)]
#[path = "../../tests/src/resolve/engine_tests.rs"]
mod tests;
