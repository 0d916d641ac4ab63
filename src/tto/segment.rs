//! Unicode grapheme segmentation (§4.5) and per-cluster aggregation into a
//! `SegmentationResult`.

use unicode_segmentation::UnicodeSegmentation;

use crate::tto::category::{self, Category};
use crate::tto::composition::{self, ClusterComposition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendedStrategy {
    Simple,
    Composite,
}

#[derive(Debug, Clone)]
pub struct GraphemeCluster {
    pub segment: String,
    /// Byte offset of this cluster's start within the original text.
    pub byte_index: usize,
    /// Code-point (char) offset of this cluster's start.
    pub char_index: usize,
    pub code_points: Vec<char>,
    pub composition: ClusterComposition,
    pub obfuscatable: bool,
    pub recommended_strategy: RecommendedStrategy,
}

#[derive(Debug, Clone, Default)]
pub struct SegmentationStats {
    pub total_clusters: usize,
    pub obfuscatable_clusters: usize,
    pub thai_ratio: f64,
    pub simple_count: usize,
    pub composite_count: usize,
    pub clusters_with_tones: usize,
}

#[derive(Debug, Clone)]
pub struct SegmentationResult {
    pub clusters: Vec<GraphemeCluster>,
    pub stats: SegmentationStats,
}

/// A cluster is eligible for obfuscation iff it carries a base or a
/// standalone leading vowel (§4.5).
fn is_obfuscatable(code_points: &[char], comp: &ClusterComposition) -> bool {
    if comp.base.is_some() {
        return true;
    }
    code_points.len() == 1 && category::classify(code_points[0]) == Category::VowelLeading
}

pub fn segment_text(text: &str) -> SegmentationResult {
    let mut clusters = Vec::new();
    let mut char_index = 0usize;
    let mut thai_code_points = 0usize;
    let mut total_code_points = 0usize;
    let mut simple_count = 0usize;
    let mut composite_count = 0usize;
    let mut clusters_with_tones = 0usize;
    let mut obfuscatable_clusters = 0usize;

    for (byte_index, segment) in text.grapheme_indices(true) {
        let code_points: Vec<char> = segment.chars().collect();
        let comp = composition::analyze_cluster(&code_points);
        let obfuscatable = is_obfuscatable(&code_points, &comp);
        let recommended_strategy = if comp.is_simple {
            simple_count += 1;
            RecommendedStrategy::Simple
        } else {
            composite_count += 1;
            RecommendedStrategy::Composite
        };

        if obfuscatable {
            obfuscatable_clusters += 1;
        }
        if comp.tone_mark.is_some() {
            clusters_with_tones += 1;
        }
        total_code_points += code_points.len();
        thai_code_points += code_points.iter().filter(|&&c| category::is_thai(c)).count();

        clusters.push(GraphemeCluster {
            segment: segment.to_string(),
            byte_index,
            char_index,
            code_points,
            composition: comp,
            obfuscatable,
            recommended_strategy,
        });
        char_index += segment.chars().count();
    }

    let total_clusters = clusters.len();
    let thai_ratio = if total_code_points == 0 {
        0.0
    } else {
        thai_code_points as f64 / total_code_points as f64
    };

    SegmentationResult {
        clusters,
        stats: SegmentationStats {
            total_clusters,
            obfuscatable_clusters,
            thai_ratio,
            simple_count,
            composite_count,
            clusters_with_tones,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_combining_cluster_as_one() {
        let result = segment_text("กั่น");
        // ก + ั + ่  then  น : two clusters
        assert_eq!(result.clusters.len(), 2);
        assert_eq!(result.clusters[0].code_points.len(), 3);
        assert_eq!(result.clusters[1].code_points.len(), 1);
    }

    #[test]
    fn ascii_text_is_all_simple_non_thai() {
        let result = segment_text("abc");
        assert_eq!(result.stats.total_clusters, 3);
        assert_eq!(result.stats.thai_ratio, 0.0);
        assert_eq!(result.stats.obfuscatable_clusters, 0);
    }

    #[test]
    fn empty_input_has_zero_ratio() {
        let result = segment_text("");
        assert_eq!(result.stats.total_clusters, 0);
        assert_eq!(result.stats.thai_ratio, 0.0);
    }
}
