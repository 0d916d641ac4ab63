//! Immutable lookup tables (§3.2, §9 "Homoglyph tables as immutable data").
//! Loaded once via `once_cell::sync::Lazy` and shared by reference across
//! threads — there is no mutation after process start, so concurrent callers
//! never need to coordinate (§5).

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Loopless,
    Traditional,
    Any,
}

impl FontStyle {
    pub fn matches(&self, requested: FontStyle) -> bool {
        requested == FontStyle::Any || *self == FontStyle::Any || *self == requested
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

pub fn confidence_level(confidence: f64) -> ConfidenceLevel {
    if confidence >= 0.85 {
        ConfidenceLevel::High
    } else if confidence >= 0.6 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

#[derive(Debug, Clone)]
pub struct Replacement {
    pub string: &'static str,
    pub confidence: f64,
    pub best_font_style: FontStyle,
    pub notes: Option<&'static str>,
}

impl Replacement {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        confidence_level(self.confidence)
    }
}

#[derive(Debug, Clone)]
pub struct CharacterMapping {
    pub thai_char: char,
    pub is_combining: bool,
    /// Highest confidence first (§3.2 invariant).
    pub replacements: Vec<Replacement>,
}

fn r(string: &'static str, confidence: f64, style: FontStyle) -> Replacement {
    Replacement {
        string,
        confidence,
        best_font_style: style,
        notes: None,
    }
}

static HOMOGLYPH_MAP: Lazy<HashMap<char, CharacterMapping>> = Lazy::new(|| {
    use FontStyle::*;
    let mut m = HashMap::new();
    let mut add = |c: char, reps: Vec<Replacement>| {
        m.insert(
            c,
            CharacterMapping {
                thai_char: c,
                is_combining: false,
                replacements: reps,
            },
        );
    };

    // Consonants whose loopless-font glyph is visually close to a Latin
    // letter or digit. Confidences are best-effort, not measured.
    add('ก', vec![r("n", 0.55, Loopless)]);
    add('ข', vec![r("U", 0.45, Loopless)]);
    add('ค', vec![r("P", 0.4, Loopless)]);
    add('ง', vec![r("1", 0.5, Loopless)]);
    add('จ', vec![r("ʏ", 0.35, Any)]);
    add('ด', vec![r("P", 0.5, Traditional), r("o", 0.4, Loopless)]);
    add('ต', vec![r("e", 0.55, Loopless)]);
    add('ถ', vec![r("o", 0.4, Loopless)]);
    add('ท', vec![r("n", 0.6, Loopless)]);
    add('น', vec![r("u", 0.65, Loopless)]);
    add('บ', vec![r("U", 0.55, Loopless)]);
    add('ป', vec![r("1J", 0.35, Any)]);
    add('ผ', vec![r("ผ", 0.2, Any)]);
    add('พ', vec![r("W", 0.45, Loopless)]);
    add('ม', vec![r("ม", 0.2, Any)]);
    add('ย', vec![r("e1", 0.3, Any)]);
    add('ร', vec![r("s", 0.6, Loopless)]);
    add('ล', vec![r("a", 0.55, Loopless), r("l", 0.4, Traditional)]);
    add('ว', vec![r("3", 0.6, Loopless)]);
    add('ศ', vec![r("P", 0.35, Any)]);
    add('ส', vec![r("a", 0.45, Loopless)]);
    add('ห', vec![r("vi", 0.35, Any)]);
    add('อ', vec![r("o", 0.85, Any)]);
    add('ฮ', vec![r("ช", 0.2, Any)]);

    // Thai digits map to Latin digits with very high confidence, independent
    // of font style — the glyphs are near-identical across common fonts.
    for (thai, latin) in [
        ('๐', "0"), ('๑', "1"), ('๒', "2"), ('๓', "3"), ('๔', "4"),
        ('๕', "5"), ('๖', "6"), ('๗', "7"), ('๘', "8"), ('๙', "9"),
    ] {
        add(thai, vec![r(latin, 0.95, Any)]);
    }

    // A couple of spacing vowels for the composite strategy's optional
    // leading/following-vowel replacement step.
    add('เ', vec![r("l", 0.3, Loopless)]);
    add('า', vec![r("า", 0.2, Any)]);

    m
});

pub fn get_mapping(thai_char: char) -> Option<&'static CharacterMapping> {
    HOMOGLYPH_MAP.get(&thai_char)
}

/// Same-sound consonant equivalence classes (§4.7 "Phonetic"). Thai has more
/// homophone consonants than this; these are the well-known, unambiguous
/// groups.
static PHONETIC_GROUPS: Lazy<Vec<Vec<char>>> = Lazy::new(|| {
    vec![
        vec!['ส', 'ศ', 'ษ'],
        vec!['ท', 'ฑ', 'ฒ'],
        vec!['น', 'ณ'],
        vec!['ค', 'ฅ', 'ฆ'],
        vec!['ช', 'ฌ'],
    ]
});

pub fn phonetic_equivalents(c: char) -> Option<Vec<char>> {
    PHONETIC_GROUPS
        .iter()
        .find(|group| group.contains(&c))
        .map(|group| group.iter().copied().filter(|&x| x != c).collect())
}

/// Thai combining mark → Latin combining diacritic (U+0300 block), used by
/// the composite strategy's `toneStrategy: latin` and for non-tone combining
/// marks generally (§4.7). A handful of rarer diacritics are deliberately
/// left unmapped so the "unmapped combining mark" warning path is reachable.
static LATIN_COMBINING_MAP: Lazy<HashMap<char, char>> = Lazy::new(|| {
    HashMap::from([
        ('\u{0E48}', '\u{0300}'), // mai ek -> combining grave accent
        ('\u{0E49}', '\u{0301}'), // mai tho -> combining acute accent
        ('\u{0E4A}', '\u{0302}'), // mai tri -> combining circumflex accent
        ('\u{0E4B}', '\u{030C}'), // mai chattawa -> combining caron
        ('\u{0E31}', '\u{0306}'), // mai han-akat -> combining breve
        ('\u{0E34}', '\u{0307}'), // sara i -> combining dot above
        ('\u{0E35}', '\u{0304}'), // sara ii -> combining macron
        ('\u{0E36}', '\u{0303}'), // sara ue -> combining tilde
        ('\u{0E47}', '\u{0311}'), // mai taikhu -> combining inverted breve
        ('\u{0E38}', '\u{0326}'), // sara u -> combining comma below
        ('\u{0E39}', '\u{0325}'), // sara uu -> combining ring below
        ('\u{0E3A}', '\u{0323}'), // phinthu -> combining dot below
        ('\u{0E4C}', '\u{0313}'), // thanthakhat -> combining comma above
        // U+0E37 (sara uee), U+0E4D (nikhahit), U+0E4E (yamakkan): no
        // reasonable Latin combining analogue; left unmapped.
    ])
});

pub fn latin_combining_form(mark: char) -> Option<char> {
    LATIN_COMBINING_MAP.get(&mark).copied()
}
