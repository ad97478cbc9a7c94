//! Normalized forms for phrase keys
//!
//! Pronouns and proper nouns collapse to `SB` and numerals to `NUM`, so that
//! "tell him" and "tell Maria" count as the same pattern.

use crate::types::PosTag;

/// Placeholder for pronouns and proper nouns
pub const SOMEBODY: &str = "SB";
/// Placeholder for numerals
pub const NUMBER: &str = "NUM";

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];

const ORDINAL_WORDS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
    "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth", "sixteenth",
    "seventeenth", "eighteenth", "nineteenth", "twentieth", "thirtieth", "fortieth", "fiftieth",
    "sixtieth", "seventieth", "eightieth", "ninetieth", "hundredth", "thousandth", "millionth",
    "billionth", "trillionth",
];

/// Compute the normalized form of a token
pub fn normalized_form(lemma: &str, pos: PosTag, like_num: bool) -> String {
    match pos {
        PosTag::Pronoun | PosTag::ProperNoun => SOMEBODY.to_string(),
        PosTag::Numeral => NUMBER.to_string(),
        _ if like_num => NUMBER.to_string(),
        _ => lemma.to_lowercase(),
    }
}

/// Whether surface text reads as a number ("42", "3.5", "1,000", "7th", "twelve", "third")
pub fn looks_numeric(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let digits: String = text
        .trim_start_matches(['+', '-', '$'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if digits.chars().any(|c| c.is_ascii_digit()) && digits.parse::<f64>().is_ok() {
        return true;
    }

    let lower = text.to_lowercase();
    let stripped = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| lower.strip_suffix(suffix))
        .unwrap_or(&lower);
    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    NUMBER_WORDS.contains(&lower.as_str()) || ORDINAL_WORDS.contains(&lower.as_str())
}
