//! Thai Text Obfuscator: segments Thai input into grapheme clusters and
//! rewrites each cluster via a configurable strategy chain while preserving
//! visual appearance (spec §4.5–§4.8).

pub mod analysis;
pub mod category;
pub mod composition;
pub mod error;
pub mod normalize;
pub mod options;
pub mod rng;
pub mod segment;
pub mod strategies;
pub mod tables;

pub use error::{TtoError, TtoResult};
pub use options::Options;
pub use segment::{segment_text, GraphemeCluster, SegmentationResult};
pub use tables::{get_mapping, CharacterMapping, Replacement};

#[derive(Debug, Clone)]
pub struct ObfuscateResult {
    pub output: String,
    pub original: String,
    pub stats: ObfuscateStats,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ObfuscateStats {
    pub total_clusters: usize,
    pub obfuscated_clusters: usize,
    pub strategy_counts: std::collections::HashMap<&'static str, usize>,
}

/// Rejects non-string callers before any processing begins (§7
/// "`validateInput` surfaces non-string inputs as hard errors").
/// All Rust callers already hold a `&str`; this exists to mirror the
/// dynamically-typed entry point and to reject degenerate byte content.
pub fn validate_input(text: &str) -> TtoResult<()> {
    if text.as_bytes().contains(&0) {
        return Err(TtoError::InvalidInput("input contains a NUL byte".to_string()));
    }
    Ok(())
}

pub fn validate_options(opts: Options) -> (Options, Vec<String>) {
    let (opts, _resolved, warnings) = options::validate_options(opts);
    (opts, warnings)
}

pub fn analyze_cluster(code_points: &[char]) -> composition::ClusterComposition {
    composition::analyze_cluster(code_points)
}

pub fn get_best_replacement(thai_char: char, min_confidence: f64, font_style: options::FontStyleOpt) -> Option<&'static Replacement> {
    let mapping = tables::get_mapping(thai_char)?;
    let style: tables::FontStyle = font_style.into();
    mapping
        .replacements
        .iter()
        .filter(|r| r.confidence >= min_confidence && r.best_font_style.matches(style))
        .max_by(|a, b| a.confidence.partial_cmp(&b.confidence).unwrap())
}

pub fn get_random_replacement(
    thai_char: char,
    min_confidence: f64,
    font_style: options::FontStyleOpt,
    rng: &mut dyn rng::Rng,
) -> Option<&'static Replacement> {
    let mapping = tables::get_mapping(thai_char)?;
    let style: tables::FontStyle = font_style.into();
    let pool: Vec<&Replacement> = mapping
        .replacements
        .iter()
        .filter(|r| r.confidence >= min_confidence && r.best_font_style.matches(style))
        .collect();
    if pool.is_empty() {
        return None;
    }
    let idx = rng.next_index(pool.len());
    Some(pool[idx])
}

pub fn analyze_text(text: &str) -> analysis::TextAnalysis {
    analysis::analyze_text(text)
}

pub fn estimate_threat_resistance(text: &str) -> std::collections::HashMap<&'static str, f64> {
    analysis::estimate_threat_resistance(text)
}

pub fn normalize(text: &str, opts: &normalize::NormalizeOptions) -> String {
    normalize::normalize(text, opts)
}

pub fn detect(text: &str) -> normalize::DetectResult {
    normalize::detect(text)
}

/// Runs the full pipeline: segment -> dispatch per cluster -> concatenate ->
/// aggregate stats/warnings (§2 "TTO pipeline").
pub fn obfuscate(text: &str, opts: &Options) -> ObfuscateResult {
    let (opts, mut warnings) = validate_options(opts.clone());
    let resolved_strategies: Vec<options::StrategyName> = opts
        .strategies
        .iter()
        .filter_map(|n| options::StrategyName::from_name(n))
        .collect();

    if text.len() > options::LARGE_INPUT_WARNING_BYTES {
        warnings.push(format!(
            "input is {} bytes, above the 1 MB advisory threshold",
            text.len()
        ));
    }

    let seg = segment_text(text);
    let mut rng = rng::from_seed(opts.random_seed);

    let mut output = String::new();
    let mut obfuscated_clusters = 0usize;
    let mut strategy_counts: std::collections::HashMap<&'static str, usize> =
        std::collections::HashMap::new();

    let last_index = seg.clusters.len().saturating_sub(1);
    for (i, cluster) in seg.clusters.iter().enumerate() {
        let result = strategies::dispatch(
            cluster,
            &opts,
            &resolved_strategies,
            rng.as_mut(),
            i == last_index,
        );
        if result.was_obfuscated {
            obfuscated_clusters += 1;
        }
        *strategy_counts.entry(result.applied.as_str()).or_insert(0) += 1;
        warnings.extend(result.warnings);
        output.push_str(&result.output);
    }

    ObfuscateResult {
        output,
        original: text.to_string(),
        stats: ObfuscateStats {
            total_clusters: seg.stats.total_clusters,
            obfuscated_clusters,
            strategy_counts,
        },
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tto::options::StrategyName;
    use crate::tto::strategies::AppliedStrategy;

    #[test]
    fn phonetic_scenario_preserves_length_modulo_zero_width() {
        let opts = Options {
            strategies: vec!["phonetic".to_string()],
            density: 1.0,
            random_seed: Some(1),
            ..Options::default()
        };
        let result = obfuscate("สวัสดี", &opts);
        assert_eq!(
            result.output.chars().count(),
            "สวัสดี".chars().count()
        );
        assert!(result.output.chars().all(|c| (c as u32) < 0x0080 || category::is_thai(c)));
    }

    #[test]
    fn invisible_preset_round_trips_under_strip_zero_width() {
        let opts = Options {
            strategies: vec!["zeroWidth".to_string()],
            density: 1.0,
            inject_zero_width: true,
            random_seed: Some(7),
            ..Options::default()
        };
        let result = obfuscate("ทดสอบ", &opts);
        assert_eq!(normalize::strip_zero_width(&result.output), "ทดสอบ");
        assert_ne!(result.output, "ทดสอบ");
    }

    #[test]
    fn determinism_under_fixed_seed() {
        let opts = Options { random_seed: Some(42), ..Options::default() };
        let a = obfuscate("สวัสดีครับ", &opts);
        let b = obfuscate("สวัสดีครับ", &opts);
        assert_eq!(a.output, b.output);
    }

    #[test]
    fn space_preservation_keeps_ordinal_positions() {
        let opts = Options { preserve_spaces: true, random_seed: Some(3), ..Options::default() };
        let result = obfuscate("ก ข", &opts);
        let space_positions: Vec<usize> = result
            .output
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == ' ')
            .map(|(i, _)| i)
            .collect();
        assert_eq!(space_positions, vec![1]);
    }

    #[test]
    fn unknown_strategy_warning_surfaces_through_obfuscate() {
        let opts = Options { strategies: vec!["bogus".to_string()], ..Options::default() };
        let result = obfuscate("ก", &opts);
        assert!(result.warnings.iter().any(|w| w.contains("bogus")));
        // fell back to default set, which includes zeroWidth
        assert!(result.stats.strategy_counts.contains_key(
            AppliedStrategy::ZeroWidth.as_str()
        ) || result.stats.strategy_counts.contains_key(AppliedStrategy::Simple.as_str()));
        let _ = StrategyName::Simple;
    }
}
