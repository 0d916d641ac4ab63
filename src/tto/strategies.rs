//! Strategy dispatcher and individual strategies (§4.6, §4.7).

use crate::tto::options::{Options, StrategyName, ToneStrategy};
use crate::tto::rng::Rng;
use crate::tto::segment::{GraphemeCluster, RecommendedStrategy};
use crate::tto::tables::{self, FontStyle, Replacement};

const ZERO_WIDTH_CHARS: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}'];
const SYMBOL_INJECTION_CHARS: [char; 5] = ['-', '.', '_', '\u{00B7}', '\u{2027}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedStrategy {
    None,
    Simple,
    Composite,
    Phonetic,
    ZeroWidth,
    SymbolInjection,
}

impl AppliedStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppliedStrategy::None => "none",
            AppliedStrategy::Simple => "simple",
            AppliedStrategy::Composite => "composite",
            AppliedStrategy::Phonetic => "phonetic",
            AppliedStrategy::ZeroWidth => "zeroWidth",
            AppliedStrategy::SymbolInjection => "symbolInjection",
        }
    }
}

pub struct StrategyResult {
    pub output: String,
    pub was_obfuscated: bool,
    pub applied: AppliedStrategy,
    pub warnings: Vec<String>,
}

fn verbatim(cluster: &GraphemeCluster) -> StrategyResult {
    StrategyResult {
        output: cluster.segment.clone(),
        was_obfuscated: false,
        applied: AppliedStrategy::None,
        warnings: Vec::new(),
    }
}

/// Weighted selection by confidence, via inverse-CDF over the filtered set
/// (§9 "confidence-weighted sampling must use inverse-CDF ... to keep
/// results reproducible under randomSeed").
fn filter_and_select<'a>(
    replacements: &'a [Replacement],
    min_confidence: f64,
    font_style: FontStyle,
    rng: &mut dyn Rng,
) -> Option<&'a Replacement> {
    let pool: Vec<&Replacement> = replacements
        .iter()
        .filter(|r| r.confidence >= min_confidence && r.best_font_style.matches(font_style))
        .collect();
    if pool.is_empty() {
        return None;
    }
    let total: f64 = pool.iter().map(|r| r.confidence).sum();
    if total <= 0.0 {
        return pool.first().copied();
    }
    let target = rng.next_f64() * total;
    let mut acc = 0.0;
    for r in &pool {
        acc += r.confidence;
        if target < acc {
            return Some(r);
        }
    }
    pool.last().copied()
}

fn strategy_simple(
    cluster: &GraphemeCluster,
    opts: &Options,
    rng: &mut dyn Rng,
) -> Option<StrategyResult> {
    let base = cluster.composition.base?;
    let mapping = tables::get_mapping(base)?;
    let font_style: FontStyle = opts.font_style.into();
    let chosen = filter_and_select(&mapping.replacements, opts.min_confidence, font_style, rng)?;
    Some(StrategyResult {
        output: chosen.string.to_string(),
        was_obfuscated: true,
        applied: AppliedStrategy::Simple,
        warnings: Vec::new(),
    })
}

fn strategy_composite(
    cluster: &GraphemeCluster,
    opts: &Options,
    rng: &mut dyn Rng,
) -> Option<StrategyResult> {
    let comp = &cluster.composition;
    let base = comp.base?;
    let mapping = tables::get_mapping(base)?;
    let font_style: FontStyle = opts.font_style.into();
    let base_replacement =
        filter_and_select(&mapping.replacements, opts.min_confidence, font_style, rng)?;

    let mut out = String::new();
    let mut warnings = Vec::new();

    if let Some(lv) = comp.leading_vowel {
        match tables::get_mapping(lv).and_then(|m| {
            filter_and_select(&m.replacements, opts.min_confidence, font_style, rng)
        }) {
            Some(r) => out.push_str(r.string),
            None => out.push(lv),
        }
    }

    out.push_str(base_replacement.string);

    // Tone mark, governed by toneStrategy.
    if let Some(tone) = comp.tone_mark {
        match opts.tone_strategy {
            ToneStrategy::Remove => {}
            ToneStrategy::Latin => match tables::latin_combining_form(tone) {
                Some(latin) => out.push(latin),
                None => warnings.push(format!("no Latin combining form for tone mark U+{:04X}", tone as u32)),
            },
            ToneStrategy::Retain => {
                out.push(tone);
                warnings.push(
                    "retaining Thai tone mark on a Latin base risks a dotted-circle rendering"
                        .to_string(),
                );
            }
        }
    }

    // Non-tone combining marks (above/below, plus overflow diacritics)
    // always route through the Latin-combining map (§4.7).
    for &mark in comp
        .above_vowel
        .iter()
        .chain(comp.below_vowel.iter())
        .chain(comp.diacritics.iter())
    {
        match tables::latin_combining_form(mark) {
            Some(latin) => out.push(latin),
            None => warnings.push(format!("no Latin combining form for U+{:04X}, dropped", mark as u32)),
        }
    }

    if let Some(fv) = comp.following_vowel {
        match tables::get_mapping(fv).and_then(|m| {
            filter_and_select(&m.replacements, opts.min_confidence, font_style, rng)
        }) {
            Some(r) => out.push_str(r.string),
            None => out.push(fv),
        }
    }

    Some(StrategyResult {
        output: out,
        was_obfuscated: true,
        applied: AppliedStrategy::Composite,
        warnings,
    })
}

fn strategy_phonetic(cluster: &GraphemeCluster) -> Option<StrategyResult> {
    let base = cluster.composition.base?;
    let mut equivalents = tables::phonetic_equivalents(base)?;
    if equivalents.is_empty() {
        return None;
    }
    // Deterministic without needing the rng: §4.7 fixes confidence, not
    // selection; pick the first equivalent to keep this strategy reproducible
    // by construction.
    let replacement = equivalents.remove(0);
    let output = cluster.segment.replacen(base, &replacement.to_string(), 1);
    Some(StrategyResult {
        output,
        was_obfuscated: true,
        applied: AppliedStrategy::Phonetic,
        warnings: Vec::new(),
    })
}

fn strategy_zero_width(cluster: &GraphemeCluster, rng: &mut dyn Rng) -> StrategyResult {
    let idx = rng.next_index(ZERO_WIDTH_CHARS.len());
    let mut output = cluster.segment.clone();
    output.push(ZERO_WIDTH_CHARS[idx]);
    StrategyResult {
        output,
        was_obfuscated: true,
        applied: AppliedStrategy::ZeroWidth,
        warnings: Vec::new(),
    }
}

/// Intra-cluster variant: injects between code points with 50% probability
/// each (§4.7). Not wired into the default dispatcher.
pub fn zero_width_intra_cluster(cluster: &GraphemeCluster, rng: &mut dyn Rng) -> String {
    let mut out = String::new();
    for &cp in &cluster.code_points {
        out.push(cp);
        if rng.next_f64() < 0.5 {
            let idx = rng.next_index(ZERO_WIDTH_CHARS.len());
            out.push(ZERO_WIDTH_CHARS[idx]);
        }
    }
    out
}

fn strategy_symbol_injection(
    cluster: &GraphemeCluster,
    opts: &Options,
    rng: &mut dyn Rng,
    is_final_cluster: bool,
) -> Option<StrategyResult> {
    if is_final_cluster {
        return None;
    }
    if rng.next_f64() >= opts.symbol_injection_rate {
        return None;
    }
    let idx = rng.next_index(SYMBOL_INJECTION_CHARS.len());
    let mut output = cluster.segment.clone();
    output.push(SYMBOL_INJECTION_CHARS[idx]);
    Some(StrategyResult {
        output,
        was_obfuscated: true,
        applied: AppliedStrategy::SymbolInjection,
        warnings: Vec::new(),
    })
}

fn precondition_holds(name: StrategyName, cluster: &GraphemeCluster) -> bool {
    match name {
        StrategyName::Simple => cluster.recommended_strategy == RecommendedStrategy::Simple,
        StrategyName::Composite => cluster.recommended_strategy == RecommendedStrategy::Composite,
        StrategyName::Phonetic => cluster
            .composition
            .base
            .and_then(tables::phonetic_equivalents)
            .map(|v| !v.is_empty())
            .unwrap_or(false),
        StrategyName::ZeroWidth => true,
        StrategyName::SymbolInjection => true,
    }
}

/// Runs the ordered dispatcher for a single cluster (§4.6). `is_final_cluster`
/// gates `symbolInjection`'s "never inject after final cluster" rule.
pub fn dispatch(
    cluster: &GraphemeCluster,
    opts: &Options,
    resolved_strategies: &[StrategyName],
    rng: &mut dyn Rng,
    is_final_cluster: bool,
) -> StrategyResult {
    if opts.preserve_spaces && cluster.segment == " " {
        return verbatim(cluster);
    }
    if opts.preserve_newlines && (cluster.segment == "\n" || cluster.segment == "\r") {
        return verbatim(cluster);
    }

    let draw = rng.next_f64();
    if draw > opts.density {
        return verbatim(cluster);
    }
    if !cluster.obfuscatable || opts.preserve_characters.contains(&first_char(cluster)) {
        return verbatim(cluster);
    }

    for &name in resolved_strategies {
        if !precondition_holds(name, cluster) {
            continue;
        }
        let result = match name {
            StrategyName::Simple => strategy_simple(cluster, opts, rng),
            StrategyName::Composite => strategy_composite(cluster, opts, rng),
            StrategyName::Phonetic => strategy_phonetic(cluster),
            StrategyName::ZeroWidth => Some(strategy_zero_width(cluster, rng)),
            StrategyName::SymbolInjection => {
                strategy_symbol_injection(cluster, opts, rng, is_final_cluster)
            }
        };
        if let Some(mut result) = result {
            if result.was_obfuscated {
                if opts.inject_zero_width && name != StrategyName::ZeroWidth {
                    let idx = rng.next_index(ZERO_WIDTH_CHARS.len());
                    result.output.push(ZERO_WIDTH_CHARS[idx]);
                }
                return result;
            }
        }
    }

    verbatim(cluster)
}

fn first_char(cluster: &GraphemeCluster) -> char {
    cluster.code_points.first().copied().unwrap_or('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tto::rng::Mulberry32;
    use crate::tto::segment::segment_text;

    #[test]
    fn phonetic_replaces_only_base() {
        let result = segment_text("สวัสดี");
        let cluster = &result.clusters[0];
        let out = strategy_phonetic(cluster).unwrap();
        assert!(out.output.starts_with('ศ') || out.output.starts_with('ษ'));
        assert!(out.was_obfuscated);
    }

    #[test]
    fn zero_width_appends_exactly_one_invisible_char() {
        let result = segment_text("ท");
        let cluster = &result.clusters[0];
        let mut rng = Mulberry32::new(7);
        let out = strategy_zero_width(cluster, &mut rng);
        assert_eq!(out.output.chars().count(), 2);
        assert!(ZERO_WIDTH_CHARS.contains(&out.output.chars().nth(1).unwrap()));
    }

    #[test]
    fn symbol_injection_never_fires_on_final_cluster() {
        let result = segment_text("ท");
        let cluster = &result.clusters[0];
        let opts = Options { symbol_injection_rate: 1.0, ..Options::default() };
        let mut rng = Mulberry32::new(1);
        assert!(strategy_symbol_injection(cluster, &opts, &mut rng, true).is_none());
    }

    #[test]
    fn preserved_space_bypasses_dispatch() {
        let result = segment_text(" ");
        let cluster = &result.clusters[0];
        let opts = Options::default();
        let mut rng = Mulberry32::new(3);
        let out = dispatch(cluster, &opts, &opts_strategies(&opts), &mut rng, true);
        assert_eq!(out.output, " ");
        assert_eq!(out.applied, AppliedStrategy::None);
    }

    fn opts_strategies(opts: &Options) -> Vec<StrategyName> {
        opts.strategies
            .iter()
            .filter_map(|s| StrategyName::from_name(s))
            .collect()
    }
}
