//! Distress phrase detection
//!
//! Flags messages containing acute-risk language. This is a substring
//! heuristic that favours recall: a false positive only surfaces crisis
//! resources, a false negative can hide someone at risk.

/// Lower-case phrases that mark a message as distressed when they occur
/// anywhere in it.
pub const DISTRESS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end it all",
    "end my life",
    "hurt myself",
    "cutting myself",
    "self harm",
    "self-harm",
    "selfharm",
    "hopeless",
    "worthless",
    "can't go on",
    "cannot go on",
    "want to die",
    "don't want to live",
    "no reason to live",
    "emergency",
];

/// Typographic apostrophes inserted by phone keyboards
const APOSTROPHE_VARIANTS: &[char] = &['\u{2019}', '\u{2018}', '\u{02BC}'];

/// Return true if any distress phrase occurs in the message.
///
/// Curly apostrophes are folded to `'` first, so "can’t go on"
/// matches "can't go on".
pub fn detect_distress(message: &str) -> bool {
    let message = message.to_lowercase().replace(APOSTROPHE_VARIANTS, "'");
    DISTRESS_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
}
