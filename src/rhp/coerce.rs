//! AST → value-tree coercion, policy-driven (§4.3). Each function here is
//! total under its respective policy: every branch of every option enum is
//! handled, with no silent default case.

use indexmap::IndexMap;

use crate::rhp::ast::{Ast, NonFinite, NumberValue, QuoteKind};
use crate::rhp::error::{CyclicKind, RhpError, RhpResult};
use crate::rhp::escapes::{self, BinaryStrategy};
use crate::rhp::options::{
    BigDecimalStrategy, CyclicStrategy, NonFiniteNumbers, ObjectBehavior, ParseOptions,
    RangeStrategy, SetStrategy, SymbolHandler, RANGE_ENUMERATION_CAP,
};
use crate::rhp::value::Value;

pub fn coerce(ast: &Ast, opts: &ParseOptions) -> RhpResult<Value> {
    match ast {
        Ast::Hash { pairs, .. } => {
            let mut map: IndexMap<String, Value> = IndexMap::new();
            for (k, v) in pairs {
                let key = key_to_string(k)?;
                let value = coerce(v, opts)?;
                // Later duplicate keys overwrite earlier ones (§8.1 "idempotent keys").
                map.insert(key, value);
            }
            Ok(Value::Map(map))
        }
        Ast::Array { items, .. } => {
            let values = items
                .iter()
                .map(|item| coerce(item, opts))
                .collect::<RhpResult<Vec<_>>>()?;
            Ok(Value::Array(values))
        }
        Ast::String { value, bytes, quote, .. } => coerce_string(value, bytes, *quote, opts),
        Ast::Number { value, .. } => coerce_number(value, opts),
        Ast::Symbol { value, .. } => Ok(coerce_symbol(value, opts)),
        Ast::Boolean { value, .. } => Ok(Value::Bool(*value)),
        Ast::Nil { .. } => Ok(Value::Null),
        Ast::Range {
            begin,
            end,
            exclude_end,
            ..
        } => coerce_range(begin, end, *exclude_end, opts),
        Ast::Set { items, .. } => coerce_set(items, opts),
        Ast::BigDecimal {
            value, precision, ..
        } => coerce_bigdecimal(value, *precision, opts),
        Ast::CyclicRef { kind, .. } => coerce_cyclic(*kind, opts),
        Ast::ObjectInspect {
            class_name,
            address,
            ivars,
            ..
        } => coerce_object_inspect(class_name, address, ivars, opts),
    }
}

fn coerce_string(value: &str, bytes: &[u8], quote: QuoteKind, opts: &ParseOptions) -> RhpResult<Value> {
    // Only double-quoted strings can contain the byte-level escapes that
    // trigger the binary-payload policy; single-quoted bodies are decoded
    // character-wise and never flagged. The policy must inspect the raw
    // decoded bytes, not `value`'s own UTF-8 bytes — by the time `value`
    // exists, any non-UTF-8 byte has already been lossily replaced.
    if quote == QuoteKind::Double && escapes::has_flagged_bytes(bytes) {
        let strategy: BinaryStrategy = opts.binary_strategy.into();
        return match escapes::apply_binary_strategy(bytes.to_vec(), strategy)? {
            escapes::BinaryPayload::Utf8(s) => Ok(Value::String(s)),
            escapes::BinaryPayload::Base64(s) => Ok(Value::String(s)),
            escapes::BinaryPayload::ByteArray(bytes) => {
                Ok(Value::Array(bytes.into_iter().map(|b| Value::Int(b as i64)).collect()))
            }
        };
    }
    Ok(Value::String(value.to_string()))
}

fn coerce_number(value: &NumberValue, opts: &ParseOptions) -> RhpResult<Value> {
    match value {
        NumberValue::Integer(i) => Ok(Value::Int(*i)),
        NumberValue::Float(f) => Ok(Value::Float(*f)),
        NumberValue::NonFinite(nf) => match opts.non_finite_numbers {
            NonFiniteNumbers::Null => Ok(Value::Null),
            NonFiniteNumbers::String => Ok(Value::String(non_finite_label(*nf).to_string())),
            NonFiniteNumbers::Literal => Ok(Value::Float(non_finite_f64(*nf))),
            NonFiniteNumbers::Error => Err(RhpError::NonFinite {
                value: non_finite_label(*nf).to_string(),
            }),
        },
    }
}

fn non_finite_label(nf: NonFinite) -> &'static str {
    match nf {
        NonFinite::Infinity => "Infinity",
        NonFinite::NegInfinity => "-Infinity",
        NonFinite::NaN => "NaN",
    }
}

fn non_finite_f64(nf: NonFinite) -> f64 {
    match nf {
        NonFinite::Infinity => f64::INFINITY,
        NonFinite::NegInfinity => f64::NEG_INFINITY,
        NonFinite::NaN => f64::NAN,
    }
}

fn coerce_symbol(value: &str, opts: &ParseOptions) -> Value {
    match opts.symbol_handler {
        SymbolHandler::String => Value::String(value.to_string()),
        SymbolHandler::Preserve => {
            let mut map = Value::map();
            map.insert("__type__".into(), Value::String("symbol".into()));
            map.insert("value".into(), Value::String(value.to_string()));
            Value::Map(map)
        }
    }
}

fn coerce_range(begin: &Ast, end: &Ast, exclude_end: bool, opts: &ParseOptions) -> RhpResult<Value> {
    let both_numeric = matches!(begin, Ast::Number { value: NumberValue::Integer(_), .. })
        && matches!(end, Ast::Number { value: NumberValue::Integer(_), .. });

    match opts.range_strategy {
        RangeStrategy::Object => {
            let mut map = Value::map();
            map.insert("begin".into(), coerce(begin, opts)?);
            map.insert("end".into(), coerce(end, opts)?);
            map.insert("exclude_end".into(), Value::Bool(exclude_end));
            Ok(Value::Map(map))
        }
        RangeStrategy::String => {
            let sep = if exclude_end { "..." } else { ".." };
            Ok(Value::String(format!(
                "{}{}{}",
                range_endpoint_text(begin),
                sep,
                range_endpoint_text(end)
            )))
        }
        RangeStrategy::Array => {
            if !both_numeric {
                // Non-numeric ranges fall back to `object`.
                let mut map = Value::map();
                map.insert("begin".into(), coerce(begin, opts)?);
                map.insert("end".into(), coerce(end, opts)?);
                map.insert("exclude_end".into(), Value::Bool(exclude_end));
                return Ok(Value::Map(map));
            }
            let (Ast::Number { value: NumberValue::Integer(b), .. }, Ast::Number { value: NumberValue::Integer(e), .. }) =
                (begin, end)
            else {
                unreachable!("both_numeric guard above");
            };
            let last = if exclude_end { *e - 1 } else { *e };
            if *b > last {
                return Ok(Value::Array(vec![]));
            }
            let len = (last - b + 1) as u64;
            if len > RANGE_ENUMERATION_CAP {
                return Err(RhpError::RangeTooLarge {
                    len,
                    cap: RANGE_ENUMERATION_CAP,
                });
            }
            Ok(Value::Array((*b..=last).map(Value::Int).collect()))
        }
    }
}

fn range_endpoint_text(ast: &Ast) -> String {
    match ast {
        Ast::Number { raw, value, .. } => match value {
            NumberValue::Integer(i) => i.to_string(),
            NumberValue::Float(f) => {
                if raw.is_empty() {
                    f.to_string()
                } else {
                    raw.clone()
                }
            }
            NumberValue::NonFinite(nf) => non_finite_label(*nf).to_string(),
        },
        Ast::String { value, .. } => format!("\"{value}\""),
        Ast::Symbol { value, .. } => value.clone(),
        _ => String::new(),
    }
}

fn coerce_set(items: &[Ast], opts: &ParseOptions) -> RhpResult<Value> {
    let values = items
        .iter()
        .map(|item| coerce(item, opts))
        .collect::<RhpResult<Vec<_>>>()?;
    match opts.set_strategy {
        SetStrategy::Array => Ok(Value::Array(values)),
        SetStrategy::Object => {
            let mut map = Value::map();
            map.insert("__type__".into(), Value::String("set".into()));
            map.insert("values".into(), Value::Array(values));
            Ok(Value::Map(map))
        }
    }
}

fn coerce_bigdecimal(value: &str, precision: usize, opts: &ParseOptions) -> RhpResult<Value> {
    match opts.big_decimal_strategy {
        BigDecimalStrategy::String => Ok(Value::String(value.to_string())),
        BigDecimalStrategy::Number => {
            let f: f64 = value.parse().unwrap_or(f64::NAN);
            Ok(Value::Float(f))
        }
        BigDecimalStrategy::Object => {
            let mut map = Value::map();
            map.insert("__type__".into(), Value::String("bigdecimal".into()));
            map.insert("value".into(), Value::String(value.to_string()));
            map.insert("precision".into(), Value::Int(precision as i64));
            Ok(Value::Map(map))
        }
    }
}

fn coerce_cyclic(kind: CyclicKind, opts: &ParseOptions) -> RhpResult<Value> {
    match opts.cyclic_strategy {
        CyclicStrategy::Sentinel => Ok(Value::String("[Circular]".to_string())),
        CyclicStrategy::Null => Ok(Value::Null),
        CyclicStrategy::Error => Err(RhpError::CyclicReference { kind }),
    }
}

fn coerce_object_inspect(
    class_name: &str,
    address: &str,
    ivars: &[(String, Ast)],
    opts: &ParseOptions,
) -> RhpResult<Value> {
    match opts.object_behavior {
        ObjectBehavior::String => Ok(Value::String(format!("#<{class_name}:{address}>"))),
        ObjectBehavior::Object => {
            let mut instance_vars = IndexMap::new();
            for (name, value) in ivars {
                instance_vars.insert(name.clone(), coerce(value, opts)?);
            }
            let mut map = Value::map();
            map.insert("class_name".into(), Value::String(class_name.to_string()));
            map.insert("address".into(), Value::String(address.to_string()));
            map.insert("instance_variables".into(), Value::Map(instance_vars));
            Ok(Value::Map(map))
        }
    }
}

/// Hash keys are always stringified regardless of `symbolHandler` — symbols
/// and numeric keys become their string representation for the value tree
/// (§4.3, "Key coercion in hashes").
fn key_to_string(key: &Ast) -> RhpResult<String> {
    Ok(match key {
        Ast::Symbol { value, .. } => value.clone(),
        Ast::String { value, .. } => value.clone(),
        Ast::Number {
            value: NumberValue::Integer(i),
            ..
        } => i.to_string(),
        Ast::Number {
            value: NumberValue::Float(f),
            ..
        } => f.to_string(),
        Ast::Number {
            value: NumberValue::NonFinite(nf),
            ..
        } => non_finite_label(*nf).to_string(),
        Ast::Boolean { value, .. } => value.to_string(),
        Ast::Nil { .. } => String::new(),
        other => format!("{other:?}"),
    })
}
