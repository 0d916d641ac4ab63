//! Recursive-descent grammar over Ruby `Hash#inspect`/`pp` output (§4.1).
//! Hand-rolled char scanning rather than a parser-combinator or
//! grammar-generator crate.

use crate::rhp::ast::{Ast, NonFinite, NumberFormat, NumberValue, QuoteKind, SourceLoc};
use crate::rhp::error::{CyclicKind, ParseError, RhpError, RhpResult};
use crate::rhp::numbers;
use crate::rhp::options::ParseOptions;

const OPERATOR_SYMBOLS: &[&str] = &[
    "<=>", "===", "==", "!=", "<=", ">=", "<<", ">>", "**", "[]=", "[]", "+", "-", "*", "/", "%",
    "<", ">", "!", "~", "&", "|", "^",
];

pub struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    opts: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &str, opts: &'a ParseOptions) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            opts,
        }
    }

    pub fn parse_document(&mut self) -> RhpResult<Ast> {
        self.skip_ws();
        if self.pos >= self.chars.len() {
            return Err(self.error("unexpected end of input", vec!["a value".into()]).into());
        }
        let value = self.parse_top_level(0)?;
        self.skip_ws();
        if self.pos < self.chars.len() {
            return Err(self
                .error("trailing input after value", vec!["end of input".into()])
                .into());
        }
        Ok(value)
    }

    fn parse_top_level(&mut self, depth: usize) -> RhpResult<Ast> {
        self.skip_ws();
        if self.opts.allow_implicit_hash && depth == 0 && self.looks_like_implicit_hash() {
            return self.parse_implicit_hash(depth);
        }
        self.parse_value(depth)
    }

    fn looks_like_implicit_hash(&self) -> bool {
        let save = (self.pos, self.line, self.column);
        let mut probe = Parser {
            chars: self.chars.clone(),
            pos: save.0,
            line: save.1,
            column: save.2,
            opts: self.opts,
        };
        probe.skip_ws();
        if matches!(probe.peek(), Some('{') | Some('[') | Some('#') | None) {
            return false;
        }
        probe.parse_pair(0).is_ok()
    }

    fn parse_value(&mut self, depth: usize) -> RhpResult<Ast> {
        self.check_depth(depth)?;
        self.skip_ws();
        match self.peek() {
            Some('{') => self.parse_hash_or_cyclic(depth),
            Some('[') => self.parse_array_or_cyclic(depth),
            Some('#') => self.parse_object_inspect_like(depth),
            Some(':') => self.parse_symbol_then_range(depth),
            Some('\'') | Some('"') => self.parse_string_then_range(depth),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number_then_range(depth),
            _ => self.parse_keyword_literal(depth),
        }
    }

    fn check_depth(&self, depth: usize) -> RhpResult<()> {
        if depth > self.opts.max_depth {
            return Err(RhpError::RecursionLimitExceeded {
                max_depth: self.opts.max_depth,
                line: self.line,
                column: self.column,
            });
        }
        Ok(())
    }

    // ---- hash / array / cyclic markers ----

    fn parse_hash_or_cyclic(&mut self, depth: usize) -> RhpResult<Ast> {
        let loc = self.here();
        if self.is_cyclic_marker('{', '}') {
            self.consume_cyclic_marker('{', '}');
            return Ok(Ast::CyclicRef {
                kind: CyclicKind::Hash,
                loc,
            });
        }
        self.expect_char('{')?;
        let mut pairs = Vec::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.advance();
            return Ok(Ast::Hash { pairs, loc });
        }
        loop {
            self.skip_ws();
            let (k, v) = self.parse_pair(depth + 1)?;
            pairs.push((k, v));
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.advance();
                    self.skip_ws();
                    if self.peek() == Some('}') {
                        self.advance();
                        break;
                    }
                }
                Some('}') => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(self
                        .error("expected ',' or '}'", vec![",".into(), "}".into()])
                        .into())
                }
            }
        }
        Ok(Ast::Hash { pairs, loc })
    }

    fn parse_implicit_hash(&mut self, depth: usize) -> RhpResult<Ast> {
        let loc = self.here();
        let mut pairs = Vec::new();
        loop {
            self.skip_ws();
            if self.pos >= self.chars.len() {
                break;
            }
            let (k, v) = self.parse_pair(depth + 1)?;
            pairs.push((k, v));
            self.skip_ws();
            if self.peek() == Some(',') {
                self.advance();
                self.skip_ws();
                if self.pos >= self.chars.len() {
                    break;
                }
            } else {
                break;
            }
        }
        if pairs.is_empty() {
            return Err(self
                .error("implicit hash requires at least one pair", vec!["a pair".into()])
                .into());
        }
        Ok(Ast::Hash { pairs, loc })
    }

    fn parse_array_or_cyclic(&mut self, depth: usize) -> RhpResult<Ast> {
        let loc = self.here();
        if self.is_cyclic_marker('[', ']') {
            self.consume_cyclic_marker('[', ']');
            return Ok(Ast::CyclicRef {
                kind: CyclicKind::Array,
                loc,
            });
        }
        self.expect_char('[')?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(']') {
            self.advance();
            return Ok(Ast::Array { items, loc });
        }
        loop {
            self.skip_ws();
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.advance();
                    self.skip_ws();
                    if self.peek() == Some(']') {
                        self.advance();
                        break;
                    }
                }
                Some(']') => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(self
                        .error("expected ',' or ']'", vec![",".into(), "]".into()])
                        .into())
                }
            }
        }
        Ok(Ast::Array { items, loc })
    }

    fn is_cyclic_marker(&self, open: char, close: char) -> bool {
        let mut i = self.pos;
        if i >= self.chars.len() || self.chars[i] != open {
            return false;
        }
        i += 1;
        while i < self.chars.len() && self.chars[i].is_whitespace() {
            i += 1;
        }
        if i + 2 >= self.chars.len() {
            return false;
        }
        if self.chars[i] != '.' || self.chars[i + 1] != '.' || self.chars[i + 2] != '.' {
            return false;
        }
        i += 3;
        while i < self.chars.len() && self.chars[i].is_whitespace() {
            i += 1;
        }
        i < self.chars.len() && self.chars[i] == close
    }

    fn consume_cyclic_marker(&mut self, open: char, close: char) {
        self.expect_char(open).ok();
        self.skip_ws();
        for _ in 0..3 {
            self.advance();
        }
        self.skip_ws();
        self.expect_char(close).ok();
    }

    // ---- pairs ----

    fn parse_pair(&mut self, depth: usize) -> RhpResult<(Ast, Ast)> {
        self.skip_ws();
        if let Some(key) = self.try_parse_json_style_key()? {
            self.skip_ws();
            self.expect_char(':')?;
            self.skip_ws();
            let value = self.parse_value(depth)?;
            return Ok((key, value));
        }
        let key = self.parse_hash_key(depth)?;
        self.skip_ws();
        self.expect_str("=>")?;
        self.skip_ws();
        let value = self.parse_value(depth)?;
        Ok((key, value))
    }

    /// `ident:` (no quotes, no space before the colon) is JSON-style sugar
    /// for a symbol key. Backtracks cleanly if the colon isn't there.
    fn try_parse_json_style_key(&mut self) -> RhpResult<Option<Ast>> {
        let save = (self.pos, self.line, self.column);
        if !matches!(self.peek(), Some(c) if c.is_alphabetic() || c == '_') {
            return Ok(None);
        }
        let loc = self.here();
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        if self.peek() == Some(':') && self.peek_at(1) != Some(':') {
            return Ok(Some(Ast::Symbol {
                value: name,
                quoted: false,
                loc,
            }));
        }
        self.restore(save);
        Ok(None)
    }

    fn parse_hash_key(&mut self, depth: usize) -> RhpResult<Ast> {
        match self.peek() {
            Some(':') => self.parse_symbol(),
            Some('\'') | Some('"') => self.parse_string(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            _ => self.parse_keyword_literal(depth),
        }
    }

    // ---- scalars with optional trailing range ----

    fn parse_symbol_then_range(&mut self, depth: usize) -> RhpResult<Ast> {
        let v = self.parse_symbol()?;
        self.maybe_range(v, depth)
    }

    fn parse_string_then_range(&mut self, depth: usize) -> RhpResult<Ast> {
        let v = self.parse_string()?;
        self.maybe_range(v, depth)
    }

    fn parse_number_then_range(&mut self, depth: usize) -> RhpResult<Ast> {
        let v = self.parse_number()?;
        self.maybe_range(v, depth)
    }

    fn maybe_range(&mut self, begin: Ast, depth: usize) -> RhpResult<Ast> {
        let loc = begin.loc();
        let save = (self.pos, self.line, self.column);
        if self.peek() == Some('.') && self.peek_at(1) == Some('.') {
            self.advance();
            self.advance();
            let exclude_end = if self.peek() == Some('.') {
                self.advance();
                true
            } else {
                false
            };
            self.skip_ws();
            match self.parse_value(depth) {
                Ok(end) => {
                    return Ok(Ast::Range {
                        begin: Box::new(begin),
                        end: Box::new(end),
                        exclude_end,
                        loc,
                    })
                }
                Err(_) => self.restore(save),
            }
        }
        Ok(begin)
    }

    // ---- symbols ----

    fn parse_symbol(&mut self) -> RhpResult<Ast> {
        let loc = self.here();
        self.expect_char(':')?;
        if self.peek() == Some('\'') {
            self.advance();
            let body = self.read_until('\'')?;
            self.expect_char('\'')?;
            return Ok(Ast::Symbol {
                value: crate::rhp::escapes::decode_single_quoted(&body),
                quoted: true,
                loc,
            });
        }
        if self.peek() == Some('"') {
            self.advance();
            let body = self.read_until('"')?;
            self.expect_char('"')?;
            let decoded = crate::rhp::escapes::decode_double_quoted(&body);
            return Ok(Ast::Symbol {
                value: crate::rhp::escapes::bytes_to_string_lossless(&decoded.bytes),
                quoted: true,
                loc,
            });
        }
        if let Some(op) = self.try_match_operator_symbol() {
            return Ok(Ast::Symbol {
                value: op,
                quoted: false,
                loc,
            });
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        // Allow a trailing `?`, `!`, or `=` predicate/bang/setter marker.
        if matches!(self.peek(), Some('?') | Some('!') | Some('=')) {
            name.push(self.peek().unwrap());
            self.advance();
        }
        if name.is_empty() {
            return Err(self
                .error("expected a symbol name after ':'", vec!["symbol name".into()])
                .into());
        }
        Ok(Ast::Symbol {
            value: name,
            quoted: false,
            loc,
        })
    }

    fn try_match_operator_symbol(&mut self) -> Option<String> {
        for op in OPERATOR_SYMBOLS {
            let len = op.chars().count();
            if self.matches_ahead(op) {
                for _ in 0..len {
                    self.advance();
                }
                return Some((*op).to_string());
            }
        }
        None
    }

    fn matches_ahead(&self, s: &str) -> bool {
        let mut i = self.pos;
        for c in s.chars() {
            if i >= self.chars.len() || self.chars[i] != c {
                return false;
            }
            i += 1;
        }
        true
    }

    // ---- strings ----

    fn parse_string(&mut self) -> RhpResult<Ast> {
        let loc = self.here();
        match self.peek() {
            Some('\'') => {
                self.advance();
                let body = self.read_until('\'')?;
                self.expect_char('\'')?;
                let value = crate::rhp::escapes::decode_single_quoted(&body);
                Ok(Ast::String {
                    bytes: value.as_bytes().to_vec(),
                    value,
                    quote: QuoteKind::Single,
                    loc,
                })
            }
            Some('"') => {
                self.advance();
                let body = self.read_until('"')?;
                self.expect_char('"')?;
                let decoded = crate::rhp::escapes::decode_double_quoted(&body);
                Ok(Ast::String {
                    value: crate::rhp::escapes::bytes_to_string_lossless(&decoded.bytes),
                    bytes: decoded.bytes,
                    quote: QuoteKind::Double,
                    loc,
                })
            }
            _ => Err(self.error("expected a string", vec!["'\"'".into(), "\"'\"".into()]).into()),
        }
    }

    /// Read the raw (still-escaped) body of a quoted string up to, but not
    /// including, the unescaped closing quote.
    fn read_until(&mut self, quote: char) -> RhpResult<String> {
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(self
                        .error("unterminated string literal", vec![quote.to_string()])
                        .into())
                }
                Some('\\') => {
                    out.push('\\');
                    self.advance();
                    if let Some(c) = self.peek() {
                        out.push(c);
                        self.advance();
                    }
                }
                Some(c) if c == quote => break,
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }
        Ok(out)
    }

    // ---- numbers ----

    fn parse_number(&mut self) -> RhpResult<Ast> {
        let loc = self.here();
        if self.matches_ahead("-Infinity") {
            for _ in 0.."-Infinity".chars().count() {
                self.advance();
            }
            return Ok(Ast::Number {
                value: NumberValue::NonFinite(NonFinite::NegInfinity),
                raw: "-Infinity".into(),
                format: NumberFormat::Float,
                loc,
            });
        }
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        if self.matches_ahead("0x") || self.matches_ahead("0X") {
            self.advance();
            self.advance();
            self.consume_while(|c| c.is_ascii_hexdigit() || c == '_');
        } else if self.matches_ahead("0b") || self.matches_ahead("0B") {
            self.advance();
            self.advance();
            self.consume_while(|c| c == '0' || c == '1' || c == '_');
        } else if self.matches_ahead("0o") || self.matches_ahead("0O") {
            self.advance();
            self.advance();
            self.consume_while(|c| c.is_digit(8) || c == '_');
        } else {
            self.consume_while(|c| c.is_ascii_digit() || c == '_');
            if self.peek() == Some('.') && self.peek_at(1).map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.advance();
                self.consume_while(|c| c.is_ascii_digit() || c == '_');
            }
            if matches!(self.peek(), Some('e') | Some('E')) {
                let save = (self.pos, self.line, self.column);
                self.advance();
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.advance();
                }
                if self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                    self.consume_while(|c| c.is_ascii_digit() || c == '_');
                } else {
                    self.restore(save);
                }
            }
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        if raw.is_empty() || raw == "-" {
            return Err(self.error("expected a number", vec!["digit".into()]).into());
        }
        if numbers::is_invalid_legacy_octal(&raw) {
            return Err(self
                .error(
                    format!("'{raw}' is not a valid legacy octal literal"),
                    vec!["octal digit (0-7)".into()],
                )
                .into());
        }
        let parsed = numbers::parse_number(&raw)
            .ok_or_else(|| self.error(format!("invalid numeric literal '{raw}'"), vec![]))?;
        Ok(Ast::Number {
            value: parsed.value,
            raw,
            format: parsed.format,
            loc,
        })
    }

    // ---- keywords: nil / true / false / Infinity / NaN ----

    fn parse_keyword_literal(&mut self, depth: usize) -> RhpResult<Ast> {
        let loc = self.here();
        if self.matches_ahead("nil") {
            self.advance_n(3);
            return Ok(Ast::Nil { loc });
        }
        if self.matches_ahead("true") {
            self.advance_n(4);
            return self.maybe_range(Ast::Boolean { value: true, loc }, depth);
        }
        if self.matches_ahead("false") {
            self.advance_n(5);
            return self.maybe_range(Ast::Boolean { value: false, loc }, depth);
        }
        if self.matches_ahead("Infinity") {
            self.advance_n(8);
            return Ok(Ast::Number {
                value: NumberValue::NonFinite(NonFinite::Infinity),
                raw: "Infinity".into(),
                format: NumberFormat::Float,
                loc,
            });
        }
        if self.matches_ahead("NaN") {
            self.advance_n(3);
            return Ok(Ast::Number {
                value: NumberValue::NonFinite(NonFinite::NaN),
                raw: "NaN".into(),
                format: NumberFormat::Float,
                loc,
            });
        }
        Err(self
            .error(
                "unexpected token",
                vec![
                    "hash".into(),
                    "array".into(),
                    "string".into(),
                    "number".into(),
                    "symbol".into(),
                    "nil".into(),
                    "true".into(),
                    "false".into(),
                ],
            )
            .into())
    }

    // ---- `#<...>` forms: Set, BigDecimal, generic ObjectInspect ----

    fn parse_object_inspect_like(&mut self, depth: usize) -> RhpResult<Ast> {
        let loc = self.here();
        self.expect_str("#<")?;
        let mut class_name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                class_name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if class_name == "Set" {
            return self.parse_set_body(depth, loc);
        }
        if class_name == "BigDecimal" {
            return self.parse_bigdecimal_body(loc);
        }

        self.skip_ws();
        self.expect_char(':')?;
        let mut address = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_hexdigit() || c == 'x' || c == 'X' {
                address.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let mut ivars = Vec::new();
        self.skip_ws();
        // Ruby's actual `inspect` separates the address from the first
        // instance variable with whitespace only (`#<Point:0x1 @x=1>`); a
        // comma before `@var` is also accepted, but neither is required to
        // enter the ivar loop.
        if self.peek() == Some(',') {
            self.advance();
            self.skip_ws();
        }
        while self.peek() == Some('@') {
            self.advance();
            let mut name = String::new();
            while let Some(c) = self.peek() {
                if c.is_alphanumeric() || c == '_' {
                    name.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            self.skip_ws();
            self.expect_char('=')?;
            self.skip_ws();
            let value = self.parse_value(depth + 1)?;
            ivars.push((name, value));
            self.skip_ws();
            if self.peek() == Some(',') {
                self.advance();
                self.skip_ws();
            } else {
                break;
            }
        }
        self.skip_ws();
        self.expect_char('>')?;
        Ok(Ast::ObjectInspect {
            class_name,
            address,
            ivars,
            loc,
        })
    }

    fn parse_set_body(&mut self, depth: usize, loc: SourceLoc) -> RhpResult<Ast> {
        self.skip_ws();
        self.expect_char(':')?;
        self.skip_ws();
        self.expect_char('{')?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() != Some('}') {
            loop {
                self.skip_ws();
                items.push(self.parse_value(depth + 1)?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => {
                        self.advance();
                    }
                    Some('}') => break,
                    _ => {
                        return Err(self
                            .error("expected ',' or '}' in Set body", vec![",".into(), "}".into()])
                            .into())
                    }
                }
            }
        }
        self.expect_char('}')?;
        self.skip_ws();
        self.expect_char('>')?;
        Ok(Ast::Set { items, loc })
    }

    fn parse_bigdecimal_body(&mut self, loc: SourceLoc) -> RhpResult<Ast> {
        self.skip_ws();
        self.expect_char(':')?;
        let mut address = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_hexdigit() || c == 'x' || c == 'X' {
                address.push(c);
                self.advance();
            } else {
                break;
            }
        }
        self.expect_char(',')?;
        self.expect_char('\'')?;
        let raw_value = self.read_until('\'')?;
        self.expect_char('\'')?;
        self.expect_char(',')?;
        let mut precision_digits = String::new();
        self.consume_while_into(|c| c.is_ascii_digit(), &mut precision_digits);
        let precision: usize = precision_digits.parse().unwrap_or(0);
        // optional trailing "(NN)" significant-digit count; skip it.
        if self.peek() == Some('(') {
            while self.peek().is_some() && self.peek() != Some(')') {
                self.advance();
            }
            if self.peek() == Some(')') {
                self.advance();
            }
        }
        self.skip_ws();
        self.expect_char('>')?;
        Ok(Ast::BigDecimal {
            value: expand_bigdecimal_scientific(&raw_value),
            precision,
            loc,
        })
    }

    // ---- scanner primitives ----

    fn here(&self) -> SourceLoc {
        SourceLoc {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if let Some(c) = c {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn restore(&mut self, save: (usize, usize, usize)) {
        self.pos = save.0;
        self.line = save.1;
        self.column = save.2;
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if pred(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn consume_while_into(&mut self, pred: impl Fn(char) -> bool, out: &mut String) {
        while let Some(c) = self.peek() {
            if pred(c) {
                out.push(c);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect_char(&mut self, expected: char) -> RhpResult<()> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self
                .error(
                    format!("expected '{expected}'"),
                    vec![expected.to_string()],
                )
                .into())
        }
    }

    fn expect_str(&mut self, expected: &str) -> RhpResult<()> {
        if self.matches_ahead(expected) {
            self.advance_n(expected.chars().count());
            Ok(())
        } else {
            Err(self
                .error(format!("expected '{expected}'"), vec![expected.to_string()])
                .into())
        }
    }

    fn error(&self, message: impl Into<String>, expected: Vec<String>) -> ParseError {
        let found = self
            .peek()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "<eof>".to_string());
        ParseError::new(message, self.line, self.column, found, expected)
    }
}

/// Expand a BigDecimal scientific string (`"0.314E1"`) to positional form
/// (`"3.14"`). Source ambiguity noted in spec.md §9; this follows Ruby's own
/// `BigDecimal#to_s('F')` semantics: mantissa * 10^exponent.
fn expand_bigdecimal_scientific(raw: &str) -> String {
    let Some((mantissa, exponent)) = raw.split_once(['E', 'e']) else {
        return raw.to_string();
    };
    let exponent: i32 = match exponent.parse() {
        Ok(e) => e,
        Err(_) => return raw.to_string(),
    };
    let negative = mantissa.starts_with('-');
    let mantissa = mantissa.trim_start_matches('-');
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits: String = format!("{int_part}{frac_part}");
    let mut point_pos = int_part.len() as i32 + exponent;

    // Normalize away leading zeros, keeping point_pos in sync so the
    // implied decimal position stays correct.
    while digits.len() > 1 && digits.starts_with('0') {
        digits.remove(0);
        point_pos -= 1;
    }

    let mut result = String::new();
    if negative {
        result.push('-');
    }
    if point_pos <= 0 {
        result.push_str("0.");
        for _ in 0..(-point_pos) {
            result.push('0');
        }
        result.push_str(&digits);
    } else if (point_pos as usize) >= digits.len() {
        result.push_str(&digits);
        for _ in 0..(point_pos as usize - digits.len()) {
            result.push('0');
        }
    } else {
        let (whole, frac) = digits.split_at(point_pos as usize);
        result.push_str(whole);
        if !frac.is_empty() {
            result.push('.');
            result.push_str(frac);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> RhpResult<Ast> {
        let opts = ParseOptions::default();
        let mut p = Parser::new(input, &opts);
        p.parse_document()
    }

    #[test]
    fn mixed_hash_rocket_and_json_style() {
        let ast = parse(r#"{:name => "Alice", age: 30, items: [1, 2, 3]}"#).unwrap();
        match ast {
            Ast::Hash { pairs, .. } => assert_eq!(pairs.len(), 3),
            _ => panic!("expected hash"),
        }
    }

    #[test]
    fn trailing_comma_allowed() {
        assert!(parse("{a: 1, b: 2,}").is_ok());
        assert!(parse("[1, 2, 3,]").is_ok());
    }

    #[test]
    fn cyclic_marker_detected() {
        let ast = parse("{self: {...}}").unwrap();
        match ast {
            Ast::Hash { pairs, .. } => match &pairs[0].1 {
                Ast::CyclicRef {
                    kind: CyclicKind::Hash,
                    ..
                } => {}
                other => panic!("expected cyclic ref, got {other:?}"),
            },
            _ => panic!("expected hash"),
        }
    }

    #[test]
    fn range_inclusive_and_exclusive() {
        match parse("{r: 1..5}").unwrap() {
            Ast::Hash { pairs, .. } => match &pairs[0].1 {
                Ast::Range { exclude_end, .. } => assert!(!exclude_end),
                _ => panic!("expected range"),
            },
            _ => panic!(),
        }
        match parse("{r: 1...5}").unwrap() {
            Ast::Hash { pairs, .. } => match &pairs[0].1 {
                Ast::Range { exclude_end, .. } => assert!(exclude_end),
                _ => panic!("expected range"),
            },
            _ => panic!(),
        }
    }

    #[test]
    fn operator_symbol_keys() {
        let ast = parse("{:+ => 1, :[] => 2, :<=> => 3}").unwrap();
        match ast {
            Ast::Hash { pairs, .. } => assert_eq!(pairs.len(), 3),
            _ => panic!(),
        }
    }

    #[test]
    fn object_inspect_with_ivars() {
        let ast = parse(r#"#<Point:0x00007f 1, @x=1, @y=2>"#);
        assert!(ast.is_err(), "malformed inspect should fail cleanly");
        let ast = parse(r#"#<Point:0x00007f, @x=1, @y=2>"#).unwrap();
        match ast {
            Ast::ObjectInspect {
                class_name, ivars, ..
            } => {
                assert_eq!(class_name, "Point");
                assert_eq!(ivars.len(), 2);
            }
            _ => panic!("expected object inspect"),
        }
    }

    #[test]
    fn object_inspect_whitespace_only_separator() {
        // Ruby's actual `inspect` output, and the spec's own example
        // (`#<ClassName:0xADDR @var=value, …>`), separate the address from
        // the first ivar with whitespace only, no comma.
        let ast = parse(r#"#<Point:0x00007f @x=1, @y=2>"#).unwrap();
        match ast {
            Ast::ObjectInspect {
                class_name, address, ivars, ..
            } => {
                assert_eq!(class_name, "Point");
                assert_eq!(address, "0x00007f");
                assert_eq!(ivars.len(), 2);
                assert_eq!(ivars[0].0, "x");
                assert_eq!(ivars[1].0, "y");
            }
            _ => panic!("expected object inspect"),
        }
    }

    #[test]
    fn implicit_hash_without_braces() {
        let ast = parse("name: \"Bob\", age: 5").unwrap();
        match ast {
            Ast::Hash { pairs, .. } => assert_eq!(pairs.len(), 2),
            _ => panic!("expected implicit hash"),
        }
    }

    #[test]
    fn depth_limit_triggers() {
        let opts = ParseOptions {
            max_depth: 2,
            ..ParseOptions::default()
        };
        let mut p = Parser::new("[[[1]]]", &opts);
        let err = p.parse_document().unwrap_err();
        assert!(matches!(err, RhpError::RecursionLimitExceeded { .. }));
    }

    #[test]
    fn bigdecimal_scientific_expansion() {
        assert_eq!(expand_bigdecimal_scientific("0.314E1"), "3.14");
        assert_eq!(expand_bigdecimal_scientific("0.1E1"), "1");
    }
}
