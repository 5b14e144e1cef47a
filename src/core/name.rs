//! State name normalization.
//!
//! Lookup inputs are trimmed before resolution; stored names never are.

/// Characters stripped from both ends of a lookup name.
const TRIMMED: [char; 4] = [' ', '\t', '\n', '\r'];

/// Trim leading and trailing whitespace from a lookup name.
///
/// Only space, tab, newline and carriage return are stripped. Whitespace
/// inside the name is kept. Returns `None` when nothing is left, so a
/// whitespace-only name is never a valid key.
///
/// # Example
///
/// ```rust
/// use smile_fsm::core::trim_name;
///
/// assert_eq!(trim_name("  Main Menu\n"), Some("Main Menu"));
/// assert_eq!(trim_name(" \t\r\n"), None);
/// assert_eq!(trim_name(""), None);
/// ```
pub fn trim_name(name: &str) -> Option<&str> {
    let trimmed = name.trim_matches(&TRIMMED[..]);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
