//! Phonetic matching algorithms
//!
//! These encode strings by how they sound, useful for name matching
//! and handling spelling variations of the same pronunciation.
//!
//! # Algorithms
//! - **Soundex**: Classic 4-character code (first letter + 3 digits)
//! - **Metaphone**: Variable-length consonant skeleton, `0` standing for "TH"
//!
//! Both rule sets are English-oriented and operate on ASCII letters only.

use super::PhoneticEncoder;

/// Soundex digit for each letter `A..=Z`.
///
/// `0` marks vowels and `Y`: no digit is emitted and adjacency is reset.
/// `H` and `W` also carry `0` here but are skipped before lookup, so they
/// never reset adjacency.
const SOUNDEX_CODES: [u8; 26] = *b"01230120022455012623010202";

/// Leading clusters whose first letter is silent
const SILENT_STARTS: [&str; 5] = ["KN", "GN", "PN", "AE", "WR"];

/// Soundex phonetic encoder
///
/// Produces a 4-character code: first letter + 3 digits.
/// Stateless encoder - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Soundex;

impl Soundex {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticEncoder for Soundex {
    fn encode(&self, s: &str) -> String {
        soundex(s)
    }

    fn name(&self) -> &'static str {
        "soundex"
    }
}

/// Metaphone phonetic encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metaphone;

impl Metaphone {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PhoneticEncoder for Metaphone {
    fn encode(&self, s: &str) -> String {
        metaphone(s)
    }

    fn name(&self) -> &'static str {
        "metaphone"
    }
}

#[inline]
fn soundex_digit(letter: u8) -> u8 {
    SOUNDEX_CODES[usize::from(letter - b'A')]
}

/// Encode a string using the Soundex algorithm.
///
/// Returns a 4-character code: first letter + 3 digits.
///
/// # Empty String Handling
///
/// Returns an empty string for input containing no ASCII letters, rather
/// than `"0000"`. This keeps the empty code usable as a "no key" sentinel.
///
/// # Examples
/// ```
/// use recordlink::soundex;
/// assert_eq!(soundex("Robert"), "R163");
/// assert_eq!(soundex("Rupert"), "R163");
/// assert_eq!(soundex(""), "");
/// ```
#[must_use]
pub fn soundex(s: &str) -> String {
    let upper = s.to_uppercase();
    let mut letters = upper.bytes().filter(u8::is_ascii_uppercase);

    let Some(first) = letters.next() else {
        return String::new();
    };

    let mut result = String::with_capacity(4);
    result.push(char::from(first));

    // The first letter's own code suppresses an identical second code
    let mut prev_code = soundex_digit(first);

    for letter in letters {
        if result.len() >= 4 {
            break;
        }

        // H and W are transparent: no digit, adjacency untouched
        if matches!(letter, b'H' | b'W') {
            continue;
        }

        let code = soundex_digit(letter);
        if code != b'0' && code != prev_code {
            result.push(char::from(code));
        }
        prev_code = code;
    }

    while result.len() < 4 {
        result.push('0');
    }

    result
}

/// Check if two strings have the same non-empty Soundex code.
#[must_use]
pub fn soundex_match(a: &str, b: &str) -> bool {
    Soundex.matches(a, b)
}

#[inline]
fn is_vowel(c: Option<char>) -> bool {
    matches!(c, Some('A' | 'E' | 'I' | 'O' | 'U'))
}

#[inline]
fn is_front_vowel(c: Option<char>) -> bool {
    matches!(c, Some('I' | 'E' | 'Y'))
}

/// Encode a string using the Metaphone algorithm.
///
/// The word is upper-cased and one silent leading letter is dropped for
/// `KN`, `GN`, `PN`, `AE` and `WR`. A single left-to-right scan then
/// applies one rule per letter with one letter of lookback and two of
/// lookahead; some rules consume the letters they look at. Doubled letters
/// other than `C` collapse. Characters outside `A..=Z` emit nothing but
/// still count as neighbours. The end of the word never counts as a vowel.
///
/// `TH` is encoded as `'0'`.
///
/// # Examples
/// ```
/// use recordlink::metaphone;
/// assert_eq!(metaphone("Smith"), "SM0");
/// assert_eq!(metaphone("Knight"), "NFT");
/// assert_eq!(metaphone("Alex"), "ALKS");
/// ```
#[must_use]
pub fn metaphone(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let upper = s.to_uppercase();
    let skip = usize::from(SILENT_STARTS.iter().any(|p| upper.starts_with(p)));
    let chars: Vec<char> = upper.chars().skip(skip).collect();

    let len = chars.len();
    let at = |pos: usize| chars.get(pos).copied();

    let mut result = String::with_capacity(len);
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if i > 0 && prev == Some(c) && c != 'C' {
            i += 1;
            continue;
        }

        let next = at(i + 1);
        let next2 = at(i + 2);

        match c {
            'A' | 'E' | 'I' | 'O' | 'U' => {
                if i == 0 {
                    result.push(c);
                }
            }
            'B' => {
                // Silent after M at the end ("dumb", "lamb")
                if !(i == len - 1 && prev == Some('M')) {
                    result.push('B');
                }
            }
            'C' => {
                if next == Some('H') {
                    result.push('X');
                    i += 1;
                } else if is_front_vowel(next) {
                    result.push('S');
                } else {
                    result.push('K');
                }
            }
            'D' => {
                if next == Some('G') && is_front_vowel(next2) {
                    result.push('J');
                    i += 2;
                } else {
                    result.push('T');
                }
            }
            'G' => {
                if next == Some('H') {
                    result.push('F');
                    i += 1;
                } else if next == Some('N') {
                    // Silent G
                } else if is_front_vowel(next) {
                    result.push('J');
                } else {
                    result.push('K');
                }
            }
            'H' => {
                if is_vowel(prev) && is_vowel(next) {
                    result.push('H');
                }
            }
            'K' => {
                if prev != Some('C') {
                    result.push('K');
                }
            }
            'P' => {
                if next == Some('H') {
                    result.push('F');
                    i += 1;
                } else {
                    result.push('P');
                }
            }
            'Q' => result.push('K'),
            'S' => {
                if next == Some('H') {
                    result.push('X');
                    i += 1;
                } else if next == Some('I') && matches!(next2, Some('O' | 'A')) {
                    result.push('X');
                    i += 2;
                } else {
                    result.push('S');
                }
            }
            'T' => {
                if next == Some('H') {
                    result.push('0'); // theta
                    i += 1;
                } else if next == Some('I') && matches!(next2, Some('O' | 'A')) {
                    result.push('X');
                    i += 2;
                } else if next == Some('C') && next2 == Some('H') {
                    // Silent T in TCH
                } else {
                    result.push('T');
                }
            }
            'V' => result.push('F'),
            'W' | 'Y' => {
                if is_vowel(next) {
                    result.push(c);
                }
            }
            'X' => result.push_str("KS"),
            'Z' => result.push('S'),
            'F' | 'J' | 'L' | 'M' | 'N' | 'R' => result.push(c),
            _ => {}
        }

        prev = Some(c);
        i += 1;
    }

    result
}

/// Check if two strings have the same non-empty Metaphone code.
#[must_use]
pub fn metaphone_match(a: &str, b: &str) -> bool {
    Metaphone.matches(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soundex() {
        assert_eq!(soundex("Robert"), "R163");
        assert_eq!(soundex("Rupert"), "R163");
        assert_eq!(soundex("Rubin"), "R150");
        assert_eq!(soundex("Lee"), "L000");
        assert_eq!(soundex("Jackson"), "J250");
    }

    #[test]
    fn test_soundex_h_w_do_not_break_adjacency() {
        // S and C straddle an H and collapse to a single 2
        assert_eq!(soundex("Ashcraft"), "A261");
        assert_eq!(soundex("Ashcroft"), "A261");
    }

    #[test]
    fn test_soundex_vowel_breaks_adjacency() {
        // C, Z and K are separated by a vowel so both 2s survive
        assert_eq!(soundex("Tymczak"), "T522");
    }

    #[test]
    fn test_soundex_first_letter_seeds_adjacency() {
        // F repeats P's code and is dropped
        assert_eq!(soundex("Pfister"), "P236");
    }

    #[test]
    fn test_soundex_ignores_non_letters() {
        assert_eq!(soundex("  o'Rahman-2 "), soundex("ORahman"));
        assert_eq!(soundex("rahman"), "R550");
    }

    #[test]
    fn test_soundex_empty() {
        assert_eq!(soundex(""), "");
        assert_eq!(soundex("1234 !?"), "");
        assert_eq!(soundex("日本"), "");
    }

    #[test]
    fn test_soundex_match() {
        assert!(soundex_match("Robert", "Rupert"));
        assert!(soundex_match("Smith", "Smyth"));
        assert!(!soundex_match("Robert", "Rubin"));
        assert!(!soundex_match("", "!!"));
    }

    #[test]
    fn test_metaphone_common() {
        assert_eq!(metaphone("Smith"), "SM0");
        assert_eq!(metaphone("Smyth"), "SM0");
        assert_eq!(metaphone("Alex"), "ALKS");
        assert_eq!(metaphone("Thompson"), "0MPSN");
        assert_eq!(metaphone("Rahman"), "RMN");
    }

    #[test]
    fn test_metaphone_silent_starts() {
        assert_eq!(metaphone("Knight"), "NFT");
        assert_eq!(metaphone("Gnome"), "NM");
        assert_eq!(metaphone("Pneumonia"), "NMN");
        assert_eq!(metaphone("Wright"), "RFT");
        assert_eq!(metaphone("Aeon"), "EN");
    }

    #[test]
    fn test_metaphone_c_rules() {
        assert_eq!(metaphone("Church"), "XRX");
        assert_eq!(metaphone("Cyrus"), "SRS");
        assert_eq!(metaphone("Cello"), "SL");
        assert_eq!(metaphone("Mac"), "MK");
        assert_eq!(metaphone("Jackson"), "JKSN");
    }

    #[test]
    fn test_metaphone_d_and_g_rules() {
        assert_eq!(metaphone("Judge"), "JJ");
        assert_eq!(metaphone("Edge"), "EJ");
        assert_eq!(metaphone("Doug"), "TK");
        assert_eq!(metaphone("Ghost"), "FST");
        assert_eq!(metaphone("Laugh"), "LF");
        assert_eq!(metaphone("Gem"), "JM");
        assert_eq!(metaphone("Giles"), "JLS");
        assert_eq!(metaphone("Signal"), "SNL");
        assert_eq!(metaphone("Edgar"), "ETKR");
    }

    #[test]
    fn test_metaphone_h_needs_vowels_on_both_sides() {
        assert_eq!(metaphone("Ahead"), "AHT");
        assert_eq!(metaphone("Hugh"), "F");
        assert_eq!(metaphone("Whale"), "L");
    }

    #[test]
    fn test_metaphone_s_and_t_rules() {
        assert_eq!(metaphone("Nation"), "NXN");
        assert_eq!(metaphone("Question"), "KSXN");
        assert_eq!(metaphone("Bitch"), "BX");
        assert_eq!(metaphone("Sugar"), "SKR");
        assert_eq!(metaphone("Catherine"), "K0RN");
        assert_eq!(metaphone("Shaw"), "X");
        assert_eq!(metaphone("Asia"), "AX");
        assert_eq!(metaphone("Fusion"), "FXN");
        assert_eq!(metaphone("Zeta"), "ST");
    }

    #[test]
    fn test_metaphone_terminal_mb() {
        assert_eq!(metaphone("Dumb"), "TM");
        assert_eq!(metaphone("Lamb"), "LM");
    }

    #[test]
    fn test_metaphone_doubles_collapse() {
        assert_eq!(metaphone("Mission"), "MSN");
        assert_eq!(metaphone("Phillip"), "FLP");
        assert_eq!(metaphone("Bbb"), "B");
    }

    #[test]
    fn test_metaphone_x_w_y() {
        assert_eq!(metaphone("Xavier"), "KSFR");
        assert_eq!(metaphone("Box"), "BKS");
        assert_eq!(metaphone("Yes"), "YS");
        assert_eq!(metaphone("Yeti"), "YT");
        assert_eq!(metaphone("Wolf"), "WLF");
    }

    #[test]
    fn test_metaphone_empty() {
        assert_eq!(metaphone(""), "");
        assert_eq!(metaphone("123"), "");
    }

    #[test]
    fn test_metaphone_match() {
        assert!(metaphone_match("Stephen", "Steven"));
        assert!(metaphone_match("Catherine", "Kathryn"));
        assert!(metaphone_match("Knight", "Night"));
        assert!(!metaphone_match("John", "Mary"));
    }

    #[test]
    fn test_encoder_names() {
        assert_eq!(Soundex.name(), "soundex");
        assert_eq!(Metaphone::new().encode("Smith"), "SM0");
    }
}
