use thiserror::Error;

/// One kind of syntactic failure, with enough context to render a caret excerpt.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub found: String,
    pub expected: Vec<String>,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        line: usize,
        column: usize,
        found: impl Into<String>,
        expected: Vec<String>,
    ) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            found: found.into(),
            expected,
        }
    }

    /// Render a rustc-style excerpt: the offending source line, a caret under
    /// the column, and the message.
    pub fn render(&self, source: &str) -> String {
        let line_text = source.lines().nth(self.line.saturating_sub(1)).unwrap_or("");
        let caret_pad = " ".repeat(self.column.saturating_sub(1));
        let expected = if self.expected.is_empty() {
            String::new()
        } else {
            format!(" (expected one of: {})", self.expected.join(", "))
        };
        format!(
            "{msg} at {line}:{col}{expected}\n  | {text}\n  | {pad}^",
            msg = self.message,
            line = self.line,
            col = self.column,
            expected = expected,
            text = line_text,
            pad = caret_pad,
        )
    }
}

/// The union of everything the RHP pipeline can raise, from lexical failure
/// through to coercion policy under `error` strategies.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RhpError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("recursion limit of {max_depth} exceeded at line {line}, column {column}")]
    RecursionLimitExceeded {
        max_depth: usize,
        line: usize,
        column: usize,
    },

    #[error("binary data encountered in string literal: {bytes:?}")]
    BinaryData { bytes: Vec<u8> },

    #[error("cyclic reference encountered ({kind})")]
    CyclicReference { kind: CyclicKind },

    #[error("non-finite number encountered: {value}")]
    NonFinite { value: String },

    #[error("range enumeration of {len} elements exceeds the cap of {cap}")]
    RangeTooLarge { len: u64, cap: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclicKind {
    Hash,
    Array,
}

impl std::fmt::Display for CyclicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CyclicKind::Hash => write!(f, "hash"),
            CyclicKind::Array => write!(f, "array"),
        }
    }
}

pub type RhpResult<T> = Result<T, RhpError>;
