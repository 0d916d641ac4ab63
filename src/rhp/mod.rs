//! Ruby-Hash Parser: parses `Hash#inspect`/`pp` output into a plain value
//! tree with configurable coercion policies, and serializes that tree to
//! JSON (spec §4.1–4.4).

pub mod ast;
pub mod coerce;
pub mod error;
pub mod escapes;
pub mod numbers;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod value;

pub use ast::Ast;
pub use error::{ParseError, RhpError, RhpResult};
pub use options::{ParseOptions, Preset};
pub use value::Value;

use parser::Parser;
use serializer::SerializeOptions;

/// Parse Ruby-hash-inspect text into the untyped AST, with no coercion
/// applied. Declared but unimplemented in the source this was ported from;
/// this crate implements it as a direct exposure of the grammar's output
/// (spec.md §9, open question).
pub fn parse_to_ast(text: &str, opts: &ParseOptions) -> RhpResult<Ast> {
    let mut parser = Parser::new(text, opts);
    parser.parse_document()
}

/// Parse Ruby-hash-inspect text into a plain value tree.
pub fn parse(text: &str, opts: &ParseOptions) -> RhpResult<Value> {
    let ast = parse_to_ast(text, opts)?;
    coerce::coerce(&ast, opts)
}

/// Parse and serialize to JSON text. Two-space indent by default.
pub fn to_json(text: &str, opts: &ParseOptions) -> RhpResult<String> {
    to_json_with(text, opts, &SerializeOptions::default())
}

pub fn to_json_with(
    text: &str,
    opts: &ParseOptions,
    serialize_opts: &SerializeOptions,
) -> RhpResult<String> {
    let value = parse(text, opts)?;
    Ok(serializer::to_json(&value, serialize_opts))
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ValidateResult {
    Valid { valid: bool },
    Invalid { valid: bool, error: String },
}

/// Wraps `parse`; never panics and never propagates a `Result::Err` to the
/// caller. Empty or whitespace-only input is invalid.
pub fn validate(text: &str) -> ValidateResult {
    if text.trim().is_empty() {
        return ValidateResult::Invalid {
            valid: false,
            error: "empty or whitespace-only input".to_string(),
        };
    }
    match parse(text, &ParseOptions::default()) {
        Ok(_) => ValidateResult::Valid { valid: true },
        Err(e) => ValidateResult::Invalid {
            valid: false,
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_mixed_hash() {
        let opts = ParseOptions::default();
        let json = to_json_with(
            r#"{:name => "Alice", age: 30, items: [1, 2, 3]}"#,
            &opts,
            &SerializeOptions { pretty: false, indent_width: 2 },
        )
        .unwrap();
        assert_eq!(json, r#"{"name":"Alice","age":30,"items":[1,2,3]}"#);
    }

    #[test]
    fn end_to_end_numeric_bases() {
        let opts = ParseOptions::default();
        let json = to_json_with(
            "{a:0b1010,b:0o755,c:0xFF,d:1_000_000,e:1.5e10}",
            &opts,
            &SerializeOptions { pretty: false, indent_width: 2 },
        )
        .unwrap();
        assert_eq!(
            json,
            r#"{"a":10,"b":493,"c":255,"d":1000000,"e":15000000000}"#
        );
    }

    #[test]
    fn validate_never_throws() {
        assert_eq!(validate("   "), ValidateResult::Invalid {
            valid: false,
            error: "empty or whitespace-only input".to_string(),
        });
        assert_eq!(validate("{a: 1}"), ValidateResult::Valid { valid: true });
        assert!(matches!(validate("{a: "), ValidateResult::Invalid { .. }));
    }

    #[test]
    fn range_strategy_variants() {
        let array_opts = ParseOptions {
            range_strategy: options::RangeStrategy::Array,
            ..ParseOptions::default()
        };
        assert_eq!(
            to_json_with("{r:1..5}", &array_opts, &SerializeOptions { pretty: false, indent_width: 2 }).unwrap(),
            r#"{"r":[1,2,3,4,5]}"#
        );

        let string_opts = ParseOptions {
            range_strategy: options::RangeStrategy::String,
            ..ParseOptions::default()
        };
        assert_eq!(
            to_json_with("{r:1..5}", &string_opts, &SerializeOptions { pretty: false, indent_width: 2 }).unwrap(),
            r#"{"r":"1..5"}"#
        );

        let object_opts = ParseOptions::default();
        assert_eq!(
            to_json_with("{r:1..5}", &object_opts, &SerializeOptions { pretty: false, indent_width: 2 }).unwrap(),
            r#"{"r":{"begin":1,"end":5,"exclude_end":false}}"#
        );
    }
}
