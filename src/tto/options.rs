//! Obfuscation options (§6) and their validation/clamping rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStrategy {
    Latin,
    Remove,
    Retain,
}

impl Default for ToneStrategy {
    fn default() -> Self {
        ToneStrategy::Latin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyleOpt {
    Loopless,
    Traditional,
    Any,
}

impl Default for FontStyleOpt {
    fn default() -> Self {
        FontStyleOpt::Loopless
    }
}

impl From<FontStyleOpt> for crate::tto::tables::FontStyle {
    fn from(value: FontStyleOpt) -> Self {
        match value {
            FontStyleOpt::Loopless => crate::tto::tables::FontStyle::Loopless,
            FontStyleOpt::Traditional => crate::tto::tables::FontStyle::Traditional,
            FontStyleOpt::Any => crate::tto::tables::FontStyle::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyName {
    Simple,
    Composite,
    Phonetic,
    ZeroWidth,
    SymbolInjection,
}

impl StrategyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyName::Simple => "simple",
            StrategyName::Composite => "composite",
            StrategyName::Phonetic => "phonetic",
            StrategyName::ZeroWidth => "zeroWidth",
            StrategyName::SymbolInjection => "symbolInjection",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(StrategyName::Simple),
            "composite" => Some(StrategyName::Composite),
            "phonetic" => Some(StrategyName::Phonetic),
            "zeroWidth" => Some(StrategyName::ZeroWidth),
            "symbolInjection" => Some(StrategyName::SymbolInjection),
            _ => None,
        }
    }
}

pub const DEFAULT_SYMBOL_INJECTION_RATE: f64 = 0.3;
pub const LARGE_INPUT_WARNING_BYTES: usize = 1_000_000;

fn default_strategy_names() -> Vec<String> {
    vec!["simple".to_string(), "composite".to_string(), "zeroWidth".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub density: f64,
    /// Raw strategy names as configured; unknown names survive here and are
    /// dropped (with a warning) only once resolved by `validate_options`.
    pub strategies: Vec<String>,
    pub tone_strategy: ToneStrategy,
    pub font_style: FontStyleOpt,
    pub random_seed: Option<u32>,
    pub preserve_spaces: bool,
    pub preserve_newlines: bool,
    pub min_confidence: f64,
    pub inject_zero_width: bool,
    pub preserve_characters: Vec<char>,
    pub symbol_injection_rate: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            density: 1.0,
            strategies: default_strategy_names(),
            tone_strategy: ToneStrategy::default(),
            font_style: FontStyleOpt::default(),
            random_seed: None,
            preserve_spaces: true,
            preserve_newlines: true,
            min_confidence: 0.6,
            inject_zero_width: false,
            preserve_characters: Vec::new(),
            symbol_injection_rate: DEFAULT_SYMBOL_INJECTION_RATE,
        }
    }
}

/// Clamps out-of-range fields, resolves strategy names, and drops unknown
/// ones, collecting a human-readable warning for each adjustment (§7
/// "policy violations ... accumulated in warnings[]").
pub fn validate_options(mut opts: Options) -> (Options, Vec<StrategyName>, Vec<String>) {
    let mut warnings = Vec::new();

    if !(0.0..=1.0).contains(&opts.density) {
        warnings.push(format!("density {} out of range, clamped to [0,1]", opts.density));
        opts.density = opts.density.clamp(0.0, 1.0);
    }
    if !(0.0..=1.0).contains(&opts.min_confidence) {
        warnings.push(format!(
            "minConfidence {} out of range, clamped to [0,1]",
            opts.min_confidence
        ));
        opts.min_confidence = opts.min_confidence.clamp(0.0, 1.0);
    }
    if !(0.0..=1.0).contains(&opts.symbol_injection_rate) {
        warnings.push(format!(
            "symbolInjectionRate {} out of range, clamped to [0,1]",
            opts.symbol_injection_rate
        ));
        opts.symbol_injection_rate = opts.symbol_injection_rate.clamp(0.0, 1.0);
    }

    let mut resolved: Vec<StrategyName> = Vec::new();
    for name in &opts.strategies {
        match StrategyName::from_name(name) {
            Some(s) => resolved.push(s),
            None => warnings.push(format!("unknown strategy '{name}' dropped")),
        }
    }
    if resolved.is_empty() {
        if opts.strategies.is_empty() {
            warnings.push("empty strategies list, falling back to default".to_string());
        }
        opts.strategies = default_strategy_names();
        resolved = opts
            .strategies
            .iter()
            .map(|n| StrategyName::from_name(n).unwrap())
            .collect();
    }

    (opts, resolved, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_density_is_clamped_with_warning() {
        let opts = Options { density: 1.5, ..Options::default() };
        let (opts, _resolved, warnings) = validate_options(opts);
        assert_eq!(opts.density, 1.0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_strategies_falls_back_to_default() {
        let opts = Options { strategies: vec![], ..Options::default() };
        let (opts, resolved, warnings) = validate_options(opts);
        assert_eq!(opts.strategies, default_strategy_names());
        assert_eq!(resolved.len(), 3);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_strategy_name_is_dropped_with_warning() {
        let opts = Options { strategies: vec!["simple".into(), "bogus".into()], ..Options::default() };
        let (_opts, resolved, warnings) = validate_options(opts);
        assert_eq!(resolved, vec![StrategyName::Simple]);
        assert_eq!(warnings.len(), 1);
    }
}
