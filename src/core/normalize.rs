/// Parses a locale-formatted count such as `"1 234"` or `"5\u{a0}678"`.
///
/// Ordinary, non-breaking and thin spaces are all dropped before parsing.
/// Empty or malformed input counts as zero rather than an error.
pub fn clean_number(text: &str) -> u64 {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.parse().unwrap_or(0)
}
