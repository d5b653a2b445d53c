//! Value normalization
//!
//! Applied to every stored value once the whole file has been read. Only
//! textual cleanup happens here; numbers stay strings until a typed lookup.

const TRUE_WORDS: [&str; 4] = ["yes", "y", "true", "t"];
const FALSE_WORDS: [&str; 4] = ["no", "n", "false", "f"];

/// Strip all double quotes, trim, and map boolean words to `"1"` / `"0"`.
pub fn normalize_value(raw: &str) -> String {
    let unquoted = raw.replace('"', "");
    let trimmed = unquoted.trim();

    if TRUE_WORDS.iter().any(|word| trimmed.eq_ignore_ascii_case(word)) {
        "1".to_string()
    } else if FALSE_WORDS.iter().any(|word| trimmed.eq_ignore_ascii_case(word)) {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
