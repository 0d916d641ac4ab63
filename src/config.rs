//! Global CLI configuration (SPEC_FULL.md §6.1, §6.2): merges built-in
//! option defaults, config-file values, and CLI flags, three tiers deep,
//! with CLI flags taking precedence over the config file and the config
//! file taking precedence over built-in defaults.

use crate::error_handling::ErrorReportStyle;
use crate::{rhp, tto};

/// Config-file-shaped option overlays: every field optional, since a TOML
/// file or CLI invocation may specify only a subset (§6.2 "partial
/// configurations merge over defaults").
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct RhpOverrides {
    pub max_depth: Option<usize>,
    pub allow_implicit_hash: Option<bool>,
    pub symbol_handler: Option<String>,
    pub non_finite_numbers: Option<String>,
    pub object_behavior: Option<String>,
    pub binary_strategy: Option<String>,
    pub range_strategy: Option<String>,
    pub big_decimal_strategy: Option<String>,
    pub set_strategy: Option<String>,
    pub cyclic_strategy: Option<String>,
    pub preset: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct TtoOverrides {
    pub density: Option<f64>,
    pub strategies: Option<Vec<String>>,
    pub tone_strategy: Option<String>,
    pub font_style: Option<String>,
    pub random_seed: Option<u32>,
    pub preserve_spaces: Option<bool>,
    pub preserve_newlines: Option<bool>,
    pub min_confidence: Option<f64>,
    pub inject_zero_width: Option<bool>,
    pub preserve_characters: Option<Vec<char>>,
    pub symbol_injection_rate: Option<f64>,
}

/// Applies a config-file/CLI overlay onto `rhp::ParseOptions` defaults (or
/// a preset base, if `preset` is set) — the RHP half of the three-tier
/// merge (built-ins < config file < CLI flags, enforced by caller ordering).
pub fn build_rhp_options(base: &RhpOverrides, cli: &RhpOverrides) -> anyhow::Result<rhp::ParseOptions> {
    let mut opts = match cli.preset.as_ref().or(base.preset.as_ref()) {
        Some(name) => rhp::ParseOptions::from_preset(name.parse()?),
        None => rhp::ParseOptions::default(),
    };

    apply_rhp_overlay(&mut opts, base)?;
    apply_rhp_overlay(&mut opts, cli)?;
    Ok(opts)
}

fn apply_rhp_overlay(opts: &mut rhp::ParseOptions, overlay: &RhpOverrides) -> anyhow::Result<()> {
    use rhp::options::*;

    if let Some(v) = overlay.max_depth {
        opts.max_depth = v;
    }
    if let Some(v) = overlay.allow_implicit_hash {
        opts.allow_implicit_hash = v;
    }
    if let Some(ref v) = overlay.symbol_handler {
        opts.symbol_handler = match v.as_str() {
            "string" => SymbolHandler::String,
            "preserve" => SymbolHandler::Preserve,
            other => anyhow::bail!("unknown symbolHandler: {other}"),
        };
    }
    if let Some(ref v) = overlay.non_finite_numbers {
        opts.non_finite_numbers = match v.as_str() {
            "null" => NonFiniteNumbers::Null,
            "string" => NonFiniteNumbers::String,
            "literal" => NonFiniteNumbers::Literal,
            "error" => NonFiniteNumbers::Error,
            other => anyhow::bail!("unknown nonFiniteNumbers: {other}"),
        };
    }
    if let Some(ref v) = overlay.object_behavior {
        opts.object_behavior = match v.as_str() {
            "string" => ObjectBehavior::String,
            "object" => ObjectBehavior::Object,
            other => anyhow::bail!("unknown objectBehavior: {other}"),
        };
    }
    if let Some(ref v) = overlay.binary_strategy {
        opts.binary_strategy = match v.as_str() {
            "base64" => BinaryStrategyOpt::Base64,
            "array" => BinaryStrategyOpt::Array,
            "replacement" => BinaryStrategyOpt::Replacement,
            "error" => BinaryStrategyOpt::Error,
            other => anyhow::bail!("unknown binaryStrategy: {other}"),
        };
    }
    if let Some(ref v) = overlay.range_strategy {
        opts.range_strategy = match v.as_str() {
            "object" => RangeStrategy::Object,
            "string" => RangeStrategy::String,
            "array" => RangeStrategy::Array,
            other => anyhow::bail!("unknown rangeStrategy: {other}"),
        };
    }
    if let Some(ref v) = overlay.big_decimal_strategy {
        opts.big_decimal_strategy = match v.as_str() {
            "string" => BigDecimalStrategy::String,
            "number" => BigDecimalStrategy::Number,
            "object" => BigDecimalStrategy::Object,
            other => anyhow::bail!("unknown bigDecimalStrategy: {other}"),
        };
    }
    if let Some(ref v) = overlay.set_strategy {
        opts.set_strategy = match v.as_str() {
            "array" => SetStrategy::Array,
            "object" => SetStrategy::Object,
            other => anyhow::bail!("unknown setStrategy: {other}"),
        };
    }
    if let Some(ref v) = overlay.cyclic_strategy {
        opts.cyclic_strategy = match v.as_str() {
            "sentinel" => CyclicStrategy::Sentinel,
            "null" => CyclicStrategy::Null,
            "error" => CyclicStrategy::Error,
            other => anyhow::bail!("unknown cyclicStrategy: {other}"),
        };
    }

    Ok(())
}

pub fn build_tto_options(base: &TtoOverrides, cli: &TtoOverrides) -> anyhow::Result<tto::Options> {
    let mut opts = tto::Options::default();
    apply_tto_overlay(&mut opts, base)?;
    apply_tto_overlay(&mut opts, cli)?;
    Ok(opts)
}

fn apply_tto_overlay(opts: &mut tto::Options, overlay: &TtoOverrides) -> anyhow::Result<()> {
    use crate::tto::options::{FontStyleOpt, ToneStrategy};

    if let Some(v) = overlay.density {
        opts.density = v;
    }
    if let Some(ref v) = overlay.strategies {
        opts.strategies = v.clone();
    }
    if let Some(ref v) = overlay.tone_strategy {
        opts.tone_strategy = match v.as_str() {
            "latin" => ToneStrategy::Latin,
            "remove" => ToneStrategy::Remove,
            "retain" => ToneStrategy::Retain,
            other => anyhow::bail!("unknown toneStrategy: {other}"),
        };
    }
    if let Some(ref v) = overlay.font_style {
        opts.font_style = match v.as_str() {
            "loopless" => FontStyleOpt::Loopless,
            "traditional" => FontStyleOpt::Traditional,
            "any" => FontStyleOpt::Any,
            other => anyhow::bail!("unknown fontStyle: {other}"),
        };
    }
    if let Some(v) = overlay.random_seed {
        opts.random_seed = Some(v);
    }
    if let Some(v) = overlay.preserve_spaces {
        opts.preserve_spaces = v;
    }
    if let Some(v) = overlay.preserve_newlines {
        opts.preserve_newlines = v;
    }
    if let Some(v) = overlay.min_confidence {
        opts.min_confidence = v;
    }
    if let Some(v) = overlay.inject_zero_width {
        opts.inject_zero_width = v;
    }
    if let Some(ref v) = overlay.preserve_characters {
        opts.preserve_characters = v.clone();
    }
    if let Some(v) = overlay.symbol_injection_rate {
        opts.symbol_injection_rate = v;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct GlobalConfig {
    pub error_report: ErrorReportStyle,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self { error_report: ErrorReportStyle::Print }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overlay_wins_over_base_overlay() {
        let base = RhpOverrides { max_depth: Some(10), ..Default::default() };
        let cli = RhpOverrides { max_depth: Some(20), ..Default::default() };
        let opts = build_rhp_options(&base, &cli).unwrap();
        assert_eq!(opts.max_depth, 20);
    }

    #[test]
    fn base_overlay_applies_when_cli_silent() {
        let base = RhpOverrides { max_depth: Some(10), ..Default::default() };
        let cli = RhpOverrides::default();
        let opts = build_rhp_options(&base, &cli).unwrap();
        assert_eq!(opts.max_depth, 10);
    }

    #[test]
    fn preset_then_overlay() {
        let base = RhpOverrides { preset: Some("strict".to_string()), ..Default::default() };
        let cli = RhpOverrides { max_depth: Some(5), ..Default::default() };
        let opts = build_rhp_options(&base, &cli).unwrap();
        assert_eq!(opts.max_depth, 5);
        assert_eq!(opts.non_finite_numbers, rhp::options::NonFiniteNumbers::Null);
    }

    #[test]
    fn tto_overlay_merges_strategies() {
        let base = TtoOverrides::default();
        let cli = TtoOverrides { strategies: Some(vec!["phonetic".to_string()]), ..Default::default() };
        let opts = build_tto_options(&base, &cli).unwrap();
        assert_eq!(opts.strategies, vec!["phonetic".to_string()]);
    }
}
