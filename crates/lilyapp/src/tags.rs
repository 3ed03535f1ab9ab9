//! Tag input parsing.
//!
//! Tags are typed as one free-text field. Separators are ASCII commas,
//! full-width commas (`，`) and spaces, in any run length. Stored tags never
//! contain empty strings.

const SEPARATORS: [char; 3] = [',', '，', ' '];

/// Splits raw tag input into tokens, preserving input order.
///
/// # Examples
/// ```
/// use lilyapp::tags::parse_tags;
///
/// assert_eq!(parse_tags("school, yuri，drama"), vec!["school", "yuri", "drama"]);
/// assert_eq!(parse_tags("  ,, "), Vec::<String>::new());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(|c: char| SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
