//! `analyzeText` and `estimateThreatResistance` (§4.8).

use crate::tto::segment::segment_text;
use crate::tto::tables;

#[derive(Debug, Clone, Default)]
pub struct CategoryBreakdown {
    pub consonants: usize,
    pub vowels: usize,
    pub tone_marks: usize,
    pub numerals: usize,
    pub other: usize,
}

#[derive(Debug, Clone)]
pub struct TextAnalysis {
    pub thai_ratio: f64,
    pub effectiveness: f64,
    pub breakdown: CategoryBreakdown,
    pub recommendations: Vec<String>,
}

pub fn analyze_text(text: &str) -> TextAnalysis {
    let seg = segment_text(text);

    let mut breakdown = CategoryBreakdown::default();
    let mut mappable = 0usize;
    let mut unmappable = 0usize;
    let mut high_confidence = 0usize;
    let mut confidence_sum = 0.0;

    for cluster in &seg.clusters {
        let comp = &cluster.composition;
        if comp.base.is_some() {
            breakdown.consonants += 1;
            let base = comp.base.unwrap();
            match tables::get_mapping(base) {
                Some(mapping) if !mapping.replacements.is_empty() => {
                    mappable += 1;
                    let best = mapping
                        .replacements
                        .iter()
                        .map(|r| r.confidence)
                        .fold(0.0_f64, f64::max);
                    confidence_sum += best;
                    if best >= 0.85 {
                        high_confidence += 1;
                    }
                }
                _ => unmappable += 1,
            }
        }
        if comp.leading_vowel.is_some()
            || comp.following_vowel.is_some()
            || comp.above_vowel.is_some()
            || comp.below_vowel.is_some()
        {
            breakdown.vowels += 1;
        }
        if comp.tone_mark.is_some() {
            breakdown.tone_marks += 1;
        }
        if cluster.code_points.iter().any(|&c| crate::tto::category::classify(c) == crate::tto::category::Category::Numeral) {
            breakdown.numerals += 1;
        }
        if comp.base.is_none()
            && comp.leading_vowel.is_none()
            && comp.following_vowel.is_none()
            && comp.above_vowel.is_none()
            && comp.below_vowel.is_none()
            && comp.tone_mark.is_none()
        {
            breakdown.other += 1;
        }
    }

    let effectiveness = if mappable == 0 { 0.0 } else { confidence_sum / mappable as f64 };

    let mut recommendations = Vec::new();
    if seg.stats.thai_ratio < 0.5 {
        recommendations.push("low Thai-character ratio; obfuscation coverage will be limited".to_string());
    }
    if mappable > 0 && unmappable as f64 > 0.3 * mappable as f64 {
        recommendations.push("many unmappable bases; consider the zeroWidth strategy".to_string());
    }
    if mappable > 0 && (high_confidence as f64) < 0.5 * mappable as f64 {
        recommendations.push("few high-confidence replacements; try fontStyle=loopless".to_string());
    }
    if breakdown.consonants > 0 && breakdown.tone_marks as f64 > 0.5 * breakdown.consonants as f64 {
        recommendations.push("many tone marks; consider toneStrategy=latin".to_string());
    }

    TextAnalysis {
        thai_ratio: seg.stats.thai_ratio,
        effectiveness,
        breakdown,
        recommendations,
    }
}

pub fn estimate_threat_resistance(text: &str) -> std::collections::HashMap<&'static str, f64> {
    let effectiveness = analyze_text(text).effectiveness;
    let weights: [(&str, f64); 5] = [
        ("keyword", 0.95),
        ("regex", 0.90),
        ("machine-translation", 0.85),
        ("ocr", 0.60),
        ("nlp-tokenization", 0.80),
    ];
    weights
        .into_iter()
        .map(|(name, weight)| (name, effectiveness * weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_thai_ratio_triggers_warning() {
        let analysis = analyze_text("abc ก");
        assert!(analysis.recommendations.iter().any(|r| r.contains("low Thai")));
    }

    #[test]
    fn threat_resistance_scales_with_effectiveness() {
        let resistance = estimate_threat_resistance("สวัสดี");
        assert_eq!(resistance.len(), 5);
        assert!(resistance["keyword"] >= resistance["ocr"]);
    }
}
