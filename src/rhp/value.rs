use indexmap::IndexMap;

/// The plain value tree produced by the coercion layer (§3.1). A tagged sum,
/// not a trait-object hierarchy: every serializer/consumer is a single
/// `match` over this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// May hold a non-finite value when `nonFiniteNumbers: literal` was
    /// selected; JSON has no literal for these, so the serializer emits the
    /// bare identifier (`Infinity`/`-Infinity`/`NaN`) rather than quoting it,
    /// matching the `json5` preset's intent.
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn map() -> IndexMap<String, Value> {
        IndexMap::new()
    }
}
