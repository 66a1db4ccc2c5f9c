//! Character folding table.
//!
//! Maps accented Latin and Turkish letters to their ASCII base form. A
//! replacement can be empty (apostrophes are dropped), a single letter, or a
//! two letter expansion such as `æ -> ae`. Characters without an entry are kept
//! as they are and only case folded by the normalizer.
//!
//! Note that `İ`, `I`, `ı` and `i` all end up as `i` after folding and case
//! folding.
//!
//! # Examples
//!
//! ```
//! use archivist::analysis::folding::fold_char;
//!
//! assert_eq!(fold_char('ş'), Some("s"));
//! assert_eq!(fold_char('æ'), Some("ae"));
//! assert_eq!(fold_char('\''), Some(""));
//! assert_eq!(fold_char('x'), None);
//! ```

use ahash::AHashMap;
use lazy_static::lazy_static;

/// Source characters and their replacements.
///
/// Every replacement is lowercase ASCII so that folding is idempotent.
const FOLDING_ENTRIES: &[(char, &str)] = &[
    // Turkish
    ('ç', "c"),
    ('Ç', "c"),
    ('ğ', "g"),
    ('Ğ', "g"),
    ('ı', "i"),
    ('İ', "i"),
    ('ö', "o"),
    ('Ö', "o"),
    ('ş', "s"),
    ('Ş', "s"),
    ('ü', "u"),
    ('Ü', "u"),
    // a
    ('à', "a"),
    ('á', "a"),
    ('â', "a"),
    ('ã', "a"),
    ('ä', "a"),
    ('å', "a"),
    ('ā', "a"),
    ('ă', "a"),
    ('ą', "a"),
    ('À', "a"),
    ('Á', "a"),
    ('Â', "a"),
    ('Ã', "a"),
    ('Ä', "a"),
    ('Å', "a"),
    ('Ā', "a"),
    // c, d
    ('ć', "c"),
    ('č', "c"),
    ('Ć', "c"),
    ('Č', "c"),
    ('ď', "d"),
    ('đ', "d"),
    ('Ď', "d"),
    ('Đ', "d"),
    // e
    ('è', "e"),
    ('é', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('ē', "e"),
    ('ė', "e"),
    ('ę', "e"),
    ('ě', "e"),
    ('È', "e"),
    ('É', "e"),
    ('Ê', "e"),
    ('Ë', "e"),
    ('Ē', "e"),
    // i
    ('ì', "i"),
    ('í', "i"),
    ('î', "i"),
    ('ï', "i"),
    ('ī', "i"),
    ('Ì', "i"),
    ('Í', "i"),
    ('Î', "i"),
    ('Ï', "i"),
    ('Ī', "i"),
    // l, n
    ('ł', "l"),
    ('Ł', "l"),
    ('ñ', "n"),
    ('ń', "n"),
    ('ň', "n"),
    ('Ñ', "n"),
    ('Ń', "n"),
    // o
    ('ò', "o"),
    ('ó', "o"),
    ('ô', "o"),
    ('õ', "o"),
    ('ø', "o"),
    ('ō', "o"),
    ('ő', "o"),
    ('Ò', "o"),
    ('Ó', "o"),
    ('Ô', "o"),
    ('Õ', "o"),
    ('Ø', "o"),
    ('Ō', "o"),
    ('Ő', "o"),
    // r, s, t
    ('ř', "r"),
    ('Ř', "r"),
    ('ś', "s"),
    ('š', "s"),
    ('Ś', "s"),
    ('Š', "s"),
    ('ť', "t"),
    ('Ť', "t"),
    // u
    ('ù', "u"),
    ('ú', "u"),
    ('û', "u"),
    ('ū', "u"),
    ('ů', "u"),
    ('ű', "u"),
    ('Ù', "u"),
    ('Ú', "u"),
    ('Û', "u"),
    ('Ū', "u"),
    ('Ů', "u"),
    ('Ű', "u"),
    // y, z
    ('ý', "y"),
    ('ÿ', "y"),
    ('Ý', "y"),
    ('Ÿ', "y"),
    ('ź', "z"),
    ('ż', "z"),
    ('ž', "z"),
    ('Ź', "z"),
    ('Ż', "z"),
    ('Ž', "z"),
    // Expansions
    ('æ', "ae"),
    ('Æ', "ae"),
    ('œ', "oe"),
    ('Œ', "oe"),
    ('ß', "ss"),
    ('ẞ', "ss"),
    // Apostrophes are dropped so "Ankara'da" matches "ankarada"
    ('\'', ""),
    ('\u{2018}', ""),
    ('\u{2019}', ""),
    ('\u{02BC}', ""),
];

lazy_static! {
    static ref FOLDING_TABLE: AHashMap<char, &'static str> =
        FOLDING_ENTRIES.iter().copied().collect();
}

/// Look up the replacement for a single source character.
///
/// Returns `None` when the character has no entry and must be kept as is.
#[inline]
pub fn fold_char(c: char) -> Option<&'static str> {
    if c.is_ascii() && c != '\'' {
        return None;
    }
    FOLDING_TABLE.get(&c).copied()
}
