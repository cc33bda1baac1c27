use tower_lsp::lsp_types::{Position, Range, TextEdit};

use crate::{
    compiler::{CndCompiler, CompilerError},
    document::Document,
};

/// Run `cnd fmt` over the buffer. `None` when the output matches the input.
pub(crate) async fn format_document(
    compiler: &CndCompiler,
    document: &Document,
) -> Result<Option<TextEdit>, CompilerError> {
    let formatted = compiler.format(&document.text).await?;
    Ok(replacement_edit(document, formatted))
}

fn replacement_edit(
    document: &Document,
    formatted: String,
) -> Option<TextEdit> {
    if formatted == document.text {
        return None;
    }
    Some(TextEdit {
        range: full_document_range(document),
        new_text: formatted,
    })
}

fn full_document_range(document: &Document) -> Range {
    Range {
        start: Position::new(0, 0),
        end: document.end_position(),
    }
}

#[cfg(test)]
#[path = "../../tests/src/server/formatting_tests.rs"]
mod tests;
