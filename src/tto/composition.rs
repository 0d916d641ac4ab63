//! Per-cluster composition analysis (§3.2, §4.5): decomposes a grapheme
//! cluster's code points into their Thai-script roles.

use crate::tto::category::{self, Category};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterComposition {
    pub base: Option<char>,
    pub leading_vowel: Option<char>,
    pub following_vowel: Option<char>,
    pub above_vowel: Option<char>,
    pub below_vowel: Option<char>,
    pub tone_mark: Option<char>,
    /// Ordered list; overflow beyond the single-slot fields above also
    /// lands here (§3.2 invariant: "overflow goes to diacritics").
    pub diacritics: Vec<char>,
    pub combining_mark_count: usize,
    pub is_pure_thai: bool,
    pub is_simple: bool,
}

pub fn analyze_cluster(code_points: &[char]) -> ClusterComposition {
    let mut comp = ClusterComposition {
        is_simple: code_points.len() == 1,
        is_pure_thai: code_points.iter().all(|&c| category::is_thai(c)),
        ..Default::default()
    };

    for &cp in code_points {
        let cat = category::classify(cp);
        match cat {
            Category::Consonant | Category::Numeral if comp.base.is_none() => {
                // "First consonant/numeral encountered wins; subsequent
                // consonants are not promoted" (§3.2 invariant).
                comp.base = Some(cp);
            }
            Category::VowelLeading if comp.leading_vowel.is_none() => {
                comp.leading_vowel = Some(cp);
            }
            Category::VowelFollowing if comp.following_vowel.is_none() => {
                comp.following_vowel = Some(cp);
            }
            Category::VowelAbove if comp.above_vowel.is_none() => {
                comp.above_vowel = Some(cp);
            }
            Category::VowelBelow if comp.below_vowel.is_none() => {
                comp.below_vowel = Some(cp);
            }
            Category::ToneMark if comp.tone_mark.is_none() => {
                comp.tone_mark = Some(cp);
            }
            Category::Diacritic => comp.diacritics.push(cp),
            // Any additional consonant/vowel-kind/tone beyond the single
            // slot overflows into diacritics too, per the "at most one of
            // each kind ... overflow goes to diacritics" invariant.
            _ => {
                if cat != Category::Unknown && cat != Category::Punctuation {
                    comp.diacritics.push(cp);
                }
            }
        }
        if category::is_combining(cat) {
            comp.combining_mark_count += 1;
        }
    }

    comp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_base_wins() {
        let comp = analyze_cluster(&['ก', 'ข']);
        assert_eq!(comp.base, Some('ก'));
        // the second consonant has nowhere else to go
        assert_eq!(comp.diacritics, vec!['ข']);
    }

    #[test]
    fn full_cluster_decomposition() {
        // consonant + above vowel + tone mark
        let comp = analyze_cluster(&['ก', 'ั', '่']);
        assert_eq!(comp.base, Some('ก'));
        assert_eq!(comp.above_vowel, Some('ั'));
        assert_eq!(comp.tone_mark, Some('่'));
        assert_eq!(comp.combining_mark_count, 2);
        assert!(comp.is_pure_thai);
        assert!(!comp.is_simple);
    }

    #[test]
    fn simple_iff_single_code_point() {
        assert!(analyze_cluster(&['ก']).is_simple);
        assert!(!analyze_cluster(&['ก', 'ั']).is_simple);
    }
}
