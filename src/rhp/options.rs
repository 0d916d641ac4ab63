//! Option records and presets (§6). Plain structs instead of a dynamic
//! option bag: every recognized coercion-policy key is a typed field with
//! its documented default.

use crate::rhp::escapes::BinaryStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolHandler {
    String,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonFiniteNumbers {
    Null,
    String,
    Literal,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeStrategy {
    Object,
    String,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BigDecimalStrategy {
    String,
    Number,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetStrategy {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclicStrategy {
    Sentinel,
    Null,
    Error,
}

/// Everything needed to parse an `ObjectInspect` node back through the
/// coercion layer. `ObjectInspect` AST nodes always exist; this only
/// controls whether the coercion layer renders them as a plain string or
/// as a structured object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectBehavior {
    String,
    Object,
}

pub const DEFAULT_MAX_DEPTH: usize = 500;
pub const RANGE_ENUMERATION_CAP: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub max_depth: usize,
    pub allow_implicit_hash: bool,
    pub symbol_handler: SymbolHandler,
    pub non_finite_numbers: NonFiniteNumbers,
    pub object_behavior: ObjectBehavior,
    pub binary_strategy: BinaryStrategyOpt,
    pub range_strategy: RangeStrategy,
    pub big_decimal_strategy: BigDecimalStrategy,
    pub set_strategy: SetStrategy,
    pub cyclic_strategy: CyclicStrategy,
}

/// `serde`-friendly mirror of `BinaryStrategy` (kept distinct so the escape
/// module doesn't need a serde dependency of its own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryStrategyOpt {
    Base64,
    Array,
    Replacement,
    Error,
}

impl From<BinaryStrategyOpt> for BinaryStrategy {
    fn from(v: BinaryStrategyOpt) -> Self {
        match v {
            BinaryStrategyOpt::Base64 => BinaryStrategy::Base64,
            BinaryStrategyOpt::Array => BinaryStrategy::Array,
            BinaryStrategyOpt::Replacement => BinaryStrategy::Replacement,
            BinaryStrategyOpt::Error => BinaryStrategy::Error,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_implicit_hash: true,
            symbol_handler: SymbolHandler::String,
            non_finite_numbers: NonFiniteNumbers::Null,
            object_behavior: ObjectBehavior::String,
            binary_strategy: BinaryStrategyOpt::Replacement,
            range_strategy: RangeStrategy::Object,
            big_decimal_strategy: BigDecimalStrategy::String,
            set_strategy: SetStrategy::Array,
            cyclic_strategy: CyclicStrategy::Sentinel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Strict,
    Preserving,
    Json5,
    Lenient,
    Pedantic,
}

impl ParseOptions {
    pub fn from_preset(preset: Preset) -> Self {
        let mut opts = ParseOptions::default();
        match preset {
            Preset::Strict => {
                opts.non_finite_numbers = NonFiniteNumbers::Null;
                opts.cyclic_strategy = CyclicStrategy::Null;
                opts.range_strategy = RangeStrategy::String;
                opts.big_decimal_strategy = BigDecimalStrategy::String;
                opts.set_strategy = SetStrategy::Array;
            }
            Preset::Preserving => {
                opts.non_finite_numbers = NonFiniteNumbers::String;
                opts.range_strategy = RangeStrategy::Object;
                opts.big_decimal_strategy = BigDecimalStrategy::Object;
                opts.set_strategy = SetStrategy::Object;
                opts.cyclic_strategy = CyclicStrategy::Sentinel;
            }
            Preset::Json5 => {
                opts.non_finite_numbers = NonFiniteNumbers::Literal;
            }
            Preset::Lenient => {
                opts.allow_implicit_hash = true;
                opts.max_depth = 1000;
                opts.binary_strategy = BinaryStrategyOpt::Replacement;
                opts.cyclic_strategy = CyclicStrategy::Sentinel;
            }
            Preset::Pedantic => {
                opts.non_finite_numbers = NonFiniteNumbers::Error;
                opts.binary_strategy = BinaryStrategyOpt::Error;
                opts.cyclic_strategy = CyclicStrategy::Error;
                opts.allow_implicit_hash = false;
            }
        }
        opts
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Preset::Strict),
            "preserving" => Ok(Preset::Preserving),
            "json5" => Ok(Preset::Json5),
            "lenient" => Ok(Preset::Lenient),
            "pedantic" => Ok(Preset::Pedantic),
            other => Err(format!("unknown preset '{other}'")),
        }
    }
}
