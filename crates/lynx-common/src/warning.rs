//! Layout warnings with colored terminal output.
//!
//! Provides deduplication so a layout pass that runs on every mutation does
//! not print the same complaint once per pass. Used by the text and layout
//! crates to report inputs that were clamped instead of rejected.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-written.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recoverable layout problem (prints once per unique message).
///
/// # Example
/// ```
/// use lynx_common::warning::warn_once;
///
/// warn_once("Text", "negative line height -1 clamped to 0");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!(
            "{}",
            format!("[Lynx {component}] warning: {message}").yellow()
        );
    }
}

/// Whether `warn_once` has already reported this component/message pair.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when a new document is created).
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
