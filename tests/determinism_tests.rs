use textkit::rhp::{self, options::ParseOptions};
use textkit::tto::{self, options::Options};

#[test]
fn rhp_parse_is_referentially_stable_across_calls() {
    let opts = ParseOptions::default();
    let source = r#"{:b => 2, :a => 1, nested: {z: [3, 2, 1]}}"#;
    let first = rhp::to_json(source, &opts).unwrap();
    let second = rhp::to_json(source, &opts).unwrap();
    assert_eq!(first, second);
    // key order survives coercion unchanged (insertion order, not sorted).
    assert_eq!(first, r#"{"b":2,"a":1,"nested":{"z":[3,2,1]}}"#);
}

#[test]
fn tto_same_seed_reproduces_output_across_independent_calls() {
    let opts = Options { random_seed: Some(999), ..Options::default() };
    let text = "ขอบคุณมากครับสำหรับความช่วยเหลือ";
    let a = tto::obfuscate(text, &opts);
    let b = tto::obfuscate(text, &opts);
    assert_eq!(a.output, b.output);
    assert_eq!(a.stats.obfuscated_clusters, b.stats.obfuscated_clusters);
    assert_eq!(a.stats.total_clusters, b.stats.total_clusters);
}

#[test]
fn tto_different_seeds_usually_diverge() {
    let text = "สวัสดีครับยินดีต้อนรับสู่ประเทศไทย";
    let a = tto::obfuscate(text, &Options { random_seed: Some(1), density: 1.0, ..Options::default() });
    let b = tto::obfuscate(text, &Options { random_seed: Some(2), density: 1.0, ..Options::default() });
    assert_ne!(a.output, b.output);
}

#[test]
fn tto_unseeded_runs_are_internally_consistent_but_not_pinned() {
    let opts = Options { strategies: vec!["simple".to_string()], ..Options::default() };
    let text = "ภาษาไทย";
    let result = tto::obfuscate(text, &opts);
    // Cluster accounting must hold regardless of which random path the
    // unseeded platform RNG took.
    assert_eq!(
        result.stats.total_clusters,
        tto::segment_text(text).stats.total_clusters
    );
}

#[test]
fn rhp_validate_agrees_with_parse_on_the_same_input() {
    let ok_source = "{a: 1, b: [1, 2, 3]}";
    let bad_source = "{a: ";
    assert_eq!(rhp::validate(ok_source), rhp::ValidateResult::Valid { valid: true });
    assert!(rhp::parse(ok_source, &ParseOptions::default()).is_ok());

    assert!(matches!(rhp::validate(bad_source), rhp::ValidateResult::Invalid { .. }));
    assert!(rhp::parse(bad_source, &ParseOptions::default()).is_err());
}
