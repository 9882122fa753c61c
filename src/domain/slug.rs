//! Filesystem-safe slugs for cover filenames, including a Revised-Romanization
//! style transliteration of Hangul syllables.

/// Romanization of the 19 Hangul initial consonants (choseong).
const INITIALS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];

/// Romanization of the 21 Hangul medial vowels (jungseong).
const MEDIALS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "weo", "we",
    "wi", "yu", "eu", "ui", "i",
];

/// Romanization of the 28 Hangul final consonants (jongseong), index 0 = none.
const FINALS: [&str; 28] = [
    "", "k", "k", "k", "n", "n", "n", "t", "l", "l", "l", "l", "l", "l", "l", "l", "m", "p", "p",
    "t", "t", "ng", "t", "t", "k", "t", "p", "t",
];

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

/// Transliterate Hangul syllables (U+AC00..=U+D7A3) to Latin.
///
/// Each syllable decomposes arithmetically into initial/medial/final jamo,
/// which map through the fixed tables above. Non-Hangul characters pass
/// through unchanged.
pub fn romanize_hangul(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        let code = ch as u32;
        if (HANGUL_BASE..=HANGUL_LAST).contains(&code) {
            let syllable = code - HANGUL_BASE;
            let initial = syllable / (MEDIAL_COUNT * FINAL_COUNT);
            let medial = (syllable % (MEDIAL_COUNT * FINAL_COUNT)) / FINAL_COUNT;
            let fin = syllable % FINAL_COUNT;

            out.push_str(INITIALS[initial as usize]);
            out.push_str(MEDIALS[medial as usize]);
            out.push_str(FINALS[fin as usize]);
        } else {
            out.push(ch);
        }
    }

    out
}

/// Build a filename-safe slug: romanize, trim, whitespace to hyphens, drop
/// anything that is not ASCII alphanumeric or a hyphen, collapse hyphen runs,
/// lowercase. Inputs with nothing usable left become `unknown`.
pub fn to_slug(input: &str) -> String {
    let romanized = romanize_hangul(input);

    let mut slug = String::with_capacity(romanized.len());
    let mut pending_hyphen = false;
    for ch in romanized.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = !slug.is_empty();
        } else if ch.is_ascii_alphanumeric() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch.to_ascii_lowercase());
        }
    }

    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug
    }
}
