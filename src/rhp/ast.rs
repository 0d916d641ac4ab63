use crate::rhp::error::CyclicKind;

/// Source position attached to a node for error localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLoc {
    pub line: usize,
    pub column: usize,
}

/// The raw lexical format a number literal was written in; the coercion
/// layer narrows this to a native numeric type, but parsing keeps it so
/// callers of `parseToAST` can see exactly how the source spelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Decimal,
    Binary,
    Octal,
    Hex,
    Float,
    Scientific,
}

/// A parsed number: the raw source text, the format it was written in, and
/// the already-computed value (integer or float; non-finite sentinels are
/// represented as `NumberValue::NonFinite`).
#[derive(Debug, Clone, PartialEq)]
pub enum NumberValue {
    Integer(i64),
    Float(f64),
    NonFinite(NonFinite),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFinite {
    Infinity,
    NegInfinity,
    NaN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

/// Tagged sum over everything the grammar can produce. Deliberately not an
/// inheritance hierarchy: every coercion is a single `match` over this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Hash {
        pairs: Vec<(Ast, Ast)>,
        loc: SourceLoc,
    },
    Array {
        items: Vec<Ast>,
        loc: SourceLoc,
    },
    String {
        value: String,
        /// Raw decoded bytes, prior to any lossy UTF-8 re-encoding. The
        /// binary-payload policy (§4.2) must inspect these, not `value`'s
        /// own UTF-8 bytes, since a lossy re-encode has already replaced
        /// any non-UTF-8 byte by the time `value` exists.
        bytes: Vec<u8>,
        quote: QuoteKind,
        loc: SourceLoc,
    },
    Number {
        value: NumberValue,
        raw: String,
        format: NumberFormat,
        loc: SourceLoc,
    },
    Symbol {
        value: String,
        quoted: bool,
        loc: SourceLoc,
    },
    Boolean {
        value: bool,
        loc: SourceLoc,
    },
    Nil {
        loc: SourceLoc,
    },
    Range {
        begin: Box<Ast>,
        end: Box<Ast>,
        exclude_end: bool,
        loc: SourceLoc,
    },
    Set {
        items: Vec<Ast>,
        loc: SourceLoc,
    },
    BigDecimal {
        value: String,
        precision: usize,
        loc: SourceLoc,
    },
    CyclicRef {
        kind: CyclicKind,
        loc: SourceLoc,
    },
    ObjectInspect {
        class_name: String,
        address: String,
        ivars: Vec<(String, Ast)>,
        loc: SourceLoc,
    },
}

impl Ast {
    pub fn loc(&self) -> SourceLoc {
        match self {
            Ast::Hash { loc, .. }
            | Ast::Array { loc, .. }
            | Ast::String { loc, .. }
            | Ast::Number { loc, .. }
            | Ast::Symbol { loc, .. }
            | Ast::Boolean { loc, .. }
            | Ast::Nil { loc }
            | Ast::Range { loc, .. }
            | Ast::Set { loc, .. }
            | Ast::BigDecimal { loc, .. }
            | Ast::CyclicRef { loc, .. }
            | Ast::ObjectInspect { loc, .. } => *loc,
        }
    }
}
