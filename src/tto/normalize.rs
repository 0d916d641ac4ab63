//! Reverse-direction helpers: `normalize` and `detect` (§4.8).

use unicode_normalization::UnicodeNormalization;

use crate::tto::category;
use crate::tto::tables;

const ZERO_WIDTH: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub reverse_homoglyphs: bool,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self { reverse_homoglyphs: true }
    }
}

pub fn strip_zero_width(text: &str) -> String {
    text.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect()
}

fn thai_ratio_over_non_space(text: &str) -> f64 {
    let mut thai = 0usize;
    let mut non_space = 0usize;
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        non_space += 1;
        if category::is_thai(c) {
            thai += 1;
        }
    }
    if non_space == 0 {
        0.0
    } else {
        thai as f64 / non_space as f64
    }
}

/// Builds a Latin -> most-confident-Thai-preimage map by inverting the
/// homoglyph table, keeping only the highest-confidence source per Latin
/// string (best-effort, ambiguous by construction — §8.1 "TTO visual
/// preservation ... documented ambiguous pre-images").
fn reverse_homoglyph_lookup(latin: &str) -> Option<char> {
    let mut best: Option<(char, f64)> = None;
    for thai in ('\u{0E01}'..='\u{0E5B}').filter(|&c| category::is_thai(c)) {
        if let Some(mapping) = tables::get_mapping(thai) {
            for r in &mapping.replacements {
                if r.string == latin {
                    let better = match best {
                        Some((_, c)) => r.confidence > c,
                        None => true,
                    };
                    if better {
                        best = Some((thai, r.confidence));
                    }
                }
            }
        }
    }
    best.map(|(c, _)| c)
}

/// `strip zero-width -> NFKC -> reverse-homoglyph map`, in that order (§4.8).
pub fn normalize(text: &str, opts: &NormalizeOptions) -> String {
    let stripped = strip_zero_width(text);
    let nfkc: String = stripped.nfkc().collect();

    if !opts.reverse_homoglyphs || thai_ratio_over_non_space(&nfkc) <= 0.3 {
        return nfkc;
    }

    // Reverse-map longest-match-first so multi-char replacements (e.g. "e1")
    // are not shadowed by any single-char prefix.
    let chars: Vec<char> = nfkc.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let mut matched = false;
        for len in (1..=3.min(chars.len() - i)).rev() {
            let candidate: String = chars[i..i + len].iter().collect();
            if let Some(thai) = reverse_homoglyph_lookup(&candidate) {
                out.push(thai);
                i += len;
                matched = true;
                break;
            }
        }
        if !matched {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectResult {
    pub has_zero_width: bool,
    pub has_latin_mix: bool,
    pub suspicion_score: f64,
}

pub fn detect(text: &str) -> DetectResult {
    let has_zero_width = text.chars().any(|c| ZERO_WIDTH.contains(&c));

    let thai = text.chars().filter(|&c| category::is_thai(c)).count();
    let latin = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let has_latin_mix = thai > 0 && latin > 0 && (latin as f64 / (latin + thai) as f64) > 0.1;

    let mut score = 0.0;
    if has_zero_width {
        score += 0.5;
    }
    if has_latin_mix {
        score += 0.5;
    }

    DetectResult {
        has_zero_width,
        has_latin_mix,
        suspicion_score: score.min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_zero_width_then_nfkc_is_idempotent() {
        let text = "ทดสอบ\u{200B}ทดสอบ";
        let once = strip_zero_width(&text.nfkc().collect::<String>());
        let twice = strip_zero_width(&once.nfkc().collect::<String>());
        assert_eq!(once, twice);
    }

    #[test]
    fn detect_flags_zero_width_and_latin_mix() {
        let d = detect("สวัสดีabc\u{200B}");
        assert!(d.has_zero_width);
        assert!(d.suspicion_score > 0.0);
    }

    #[test]
    fn detect_pure_thai_has_no_latin_mix() {
        let d = detect("สวัสดี");
        assert!(!d.has_latin_mix);
        assert_eq!(d.suspicion_score, 0.0);
    }

    use proptest::prelude::*;

    fn arb_thai_passage() -> impl Strategy<Value = String> {
        // A closed alphabet of consonants/vowels/tone marks rather than the
        // full Thai block — keeps generated clusters grammatically plausible
        // instead of wandering into reserved code points.
        let alphabet: Vec<char> = "กขคงจฉชทนบปผพมยรลวสหอะาิีึืุูเแโใไ่้๊๋".chars().collect();
        proptest::collection::vec(proptest::sample::select(alphabet), 0..20)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        // "strip zero-width followed by NFKC is idempotent" (§8.1 strict law).
        #[test]
        fn prop_strip_then_nfkc_is_idempotent(text in arb_thai_passage()) {
            let once: String = strip_zero_width(&text).nfkc().collect();
            let twice: String = strip_zero_width(&once).nfkc().collect();
            prop_assert_eq!(once, twice);
        }

        // zero-width-only obfuscation is exactly invertible by stripZeroWidth:
        // no base character is ever substituted, only invisible markers are
        // injected between clusters.
        #[test]
        fn prop_zero_width_strategy_round_trips(text in arb_thai_passage()) {
            use crate::tto::{obfuscate, Options};
            let opts = Options {
                strategies: vec!["zeroWidth".to_string()],
                density: 1.0,
                inject_zero_width: true,
                random_seed: Some(11),
                ..Options::default()
            };
            let result = obfuscate(&text, &opts);
            prop_assert_eq!(strip_zero_width(&result.output), text);
        }
    }
}
