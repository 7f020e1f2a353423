use thiserror::Error;

/// A decode failure that no date/time heuristic explains.
///
/// Carries the parser's failure, the offending text and the character offset
/// at which decoding gave up.
#[derive(Error, Debug)]
#[error("cannot decode {text:?}: {source} (position {offset})")]
pub struct DiagnosticError {
    #[source]
    source: serde_json::Error,
    text: String,
    offset: usize,
}

impl DiagnosticError {
    pub fn new(source: serde_json::Error, text: impl Into<String>) -> Self {
        let text = text.into();
        let offset = failure_offset(&text, &source);
        DiagnosticError { source, text, offset }
    }

    /// Character index at which decoding gave up.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn offending_text(&self) -> &str {
        &self.text
    }

    pub fn raw_failure(&self) -> &serde_json::Error {
        &self.source
    }

    /// The unparsed remainder of the text, prefixed with `> `.
    pub fn excerpt(&self) -> String {
        let rest: String = self.text.chars().skip(self.offset).collect();
        format!("> {}", rest)
    }
}

#[derive(Error, Debug)]
pub enum CoerceError {
    #[error(transparent)]
    Ambiguous(#[from] DiagnosticError),

    #[error("cannot hydrate target type: {0}")]
    Hydrate(#[source] serde_json::Error),
}

/// Converts serde_json's 1-based line/column into a character offset.
pub(crate) fn failure_offset(text: &str, err: &serde_json::Error) -> usize {
    let line = err.line().max(1);
    let line_start: usize = text.split_inclusive('\n').take(line - 1).map(str::len).sum();
    let byte = (line_start + err.column().saturating_sub(1)).min(text.len());
    text.char_indices().take_while(|(i, _)| *i < byte).count()
}
