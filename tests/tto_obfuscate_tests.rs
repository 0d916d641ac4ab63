use textkit::tto::options::{FontStyleOpt, Options, ToneStrategy};
use textkit::tto::{self, normalize::NormalizeOptions};

#[test]
fn obfuscate_simple_strategy_replaces_mapped_bases() {
    let opts = Options {
        strategies: vec!["simple".to_string()],
        density: 1.0,
        random_seed: Some(11),
        ..Options::default()
    };
    let result = tto::obfuscate("อก", &opts);
    assert_ne!(result.output, "อก");
    assert_eq!(result.stats.total_clusters, 2);
    assert!(result.stats.obfuscated_clusters >= 1);
}

#[test]
fn preserve_characters_are_never_touched() {
    let opts = Options {
        strategies: vec!["simple".to_string(), "phonetic".to_string()],
        density: 1.0,
        preserve_characters: vec!['อ'],
        random_seed: Some(5),
        ..Options::default()
    };
    let result = tto::obfuscate("อกข", &opts);
    assert!(result.output.starts_with('อ'));
}

#[test]
fn zero_density_leaves_text_untouched() {
    let opts = Options { density: 0.0, random_seed: Some(17), ..Options::default() };
    let result = tto::obfuscate("สวัสดีครับ", &opts);
    assert_eq!(result.output, "สวัสดีครับ");
    assert_eq!(result.stats.obfuscated_clusters, 0);
}

#[test]
fn tone_strategy_remove_drops_tone_marks() {
    let opts = Options {
        strategies: vec!["composite".to_string()],
        density: 1.0,
        tone_strategy: ToneStrategy::Remove,
        random_seed: Some(9),
        ..Options::default()
    };
    let result = tto::obfuscate("น้", &opts);
    assert!(!result.output.contains('\u{0E49}'));
}

#[test]
fn any_font_style_widens_candidate_pool() {
    // 'ด' has a Traditional-only high-confidence replacement and a
    // lower-confidence Loopless one; requesting `Any` must surface the
    // Traditional-only option that a `Loopless` request can't see.
    let loopless_best = tto::get_best_replacement('ด', 0.0, FontStyleOpt::Loopless).unwrap();
    let any_best = tto::get_best_replacement('ด', 0.0, FontStyleOpt::Any).unwrap();
    assert_eq!(loopless_best.string, "o");
    assert_eq!(any_best.string, "P");
    assert!(any_best.confidence > loopless_best.confidence);
}

#[test]
fn determinism_across_repeated_runs_with_same_seed() {
    let opts = Options { random_seed: Some(123), ..Options::default() };
    let a = tto::obfuscate("ประเทศไทย", &opts);
    let b = tto::obfuscate("ประเทศไทย", &opts);
    assert_eq!(a.output, b.output);
    assert_eq!(a.stats.obfuscated_clusters, b.stats.obfuscated_clusters);
}

#[test]
fn unseeded_runs_still_preserve_cluster_count() {
    let opts = Options { strategies: vec!["simple".to_string()], ..Options::default() };
    let result = tto::obfuscate("กขค", &opts);
    assert_eq!(result.stats.total_clusters, 3);
}

#[test]
fn large_input_warns_above_advisory_threshold() {
    let text = "ก".repeat(1_100_000 / "ก".len());
    let opts = Options { density: 0.0, random_seed: Some(1), ..Options::default() };
    let result = tto::obfuscate(&text, &opts);
    assert!(result.warnings.iter().any(|w| w.contains("advisory")));
}

#[test]
fn normalize_then_detect_round_trips_plain_thai() {
    let opts = Options {
        strategies: vec!["zeroWidth".to_string()],
        density: 1.0,
        inject_zero_width: true,
        random_seed: Some(4),
        ..Options::default()
    };
    let obfuscated = tto::obfuscate("ขอบคุณ", &opts);
    let normalized = tto::normalize(&obfuscated.output, &NormalizeOptions::default());
    assert_eq!(normalized, "ขอบคุณ");

    let detection = tto::detect(&obfuscated.output);
    assert!(detection.has_zero_width);
}
