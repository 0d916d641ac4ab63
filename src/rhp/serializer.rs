//! Value tree → JSON text. Hand-rolled rather than routed through
//! `serde_json::Value` because the `literal` non-finite-number policy needs
//! to emit bare `Infinity`/`-Infinity`/`NaN` tokens, which `serde_json`
//! cannot represent (RFC 8259 has no literal for them).

use crate::rhp::value::Value;

pub struct SerializeOptions {
    pub pretty: bool,
    pub indent_width: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent_width: 2,
        }
    }
}

pub fn to_json(value: &Value, opts: &SerializeOptions) -> String {
    let mut out = String::new();
    write_value(value, opts, 0, &mut out);
    out
}

fn write_value(value: &Value, opts: &SerializeOptions, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => write_float(*f, out),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => write_array(items, opts, depth, out),
        Value::Map(map) => write_map(map, opts, depth, out),
    }
}

fn write_float(f: f64, out: &mut String) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        // Matches the common JSON.stringify-style rendering: no forced
        // trailing `.0`, no forced exponent notation for values in the
        // normal range. Numeric correctness (§8.1 "number purity"), not
        // the source literal's exact spelling, is what's preserved.
        out.push_str(&format!("{f}"));
    }
}

fn write_array(items: &[Value], opts: &SerializeOptions, depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline_indent(opts, depth + 1, out);
        write_value(item, opts, depth + 1, out);
    }
    newline_indent(opts, depth, out);
    out.push(']');
}

fn write_map(map: &indexmap::IndexMap<String, Value>, opts: &SerializeOptions, depth: usize, out: &mut String) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        newline_indent(opts, depth + 1, out);
        write_json_string(key, out);
        out.push(':');
        if opts.pretty {
            out.push(' ');
        }
        write_value(value, opts, depth + 1, out);
    }
    newline_indent(opts, depth, out);
    out.push('}');
}

fn newline_indent(opts: &SerializeOptions, depth: usize, out: &mut String) {
    if opts.pretty {
        out.push('\n');
        out.push_str(&" ".repeat(depth * opts.indent_width));
    }
}

fn write_json_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn compact_and_pretty() {
        let mut m = IndexMap::new();
        m.insert("a".to_string(), Value::Int(1));
        let v = Value::Map(m);

        let compact = to_json(&v, &SerializeOptions { pretty: false, indent_width: 2 });
        assert_eq!(compact, r#"{"a":1}"#);

        let pretty = to_json(&v, &SerializeOptions::default());
        assert_eq!(pretty, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn non_finite_literal_tokens() {
        assert_eq!(to_json(&Value::Float(f64::NAN), &SerializeOptions::default()), "NaN");
        assert_eq!(
            to_json(&Value::Float(f64::INFINITY), &SerializeOptions::default()),
            "Infinity"
        );
    }

    #[test]
    fn escapes_control_characters() {
        let v = Value::String("a\nb\"c".to_string());
        assert_eq!(to_json(&v, &SerializeOptions { pretty: false, indent_width: 2 }), r#""a\nb\"c""#);
    }
}
