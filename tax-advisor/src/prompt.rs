//! User-message template for the advisory request.

use std::fmt::Display;

const DATA_HEADER: &str = "Here is the user's tax-related data:";
const COMMENTS_HEADER: &str = "The user has also shared the following comments:";
const INSTRUCTION: &str = "Based on this information, please provide personalized suggestions and advice regarding their taxes.";

/// Renders `fields` one `key: value` per line, then the comments block when
/// `comments` is non-empty, then the closing instruction.
///
/// ```
/// use tax_advisor::build_prompt;
///
/// let prompt = build_prompt(&[("a", 1), ("b", 2)], "");
///
/// assert_eq!(
///     prompt,
///     "Here is the user's tax-related data:\na: 1\nb: 2\n\n\
///      Based on this information, please provide personalized suggestions and advice regarding their taxes."
/// );
/// ```
pub fn build_prompt<K, V>(
    fields: &[(K, V)],
    comments: &str,
) -> String
where
    K: Display,
    V: Display,
{
    let data = fields
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!("{DATA_HEADER}\n{data}\n\n");
    if !comments.is_empty() {
        prompt.push_str(&format!("{COMMENTS_HEADER}\n{comments}\n\n"));
    }
    prompt.push_str(INSTRUCTION);
    prompt
}
