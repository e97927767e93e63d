//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so a document full of the same defect does not
//! flood the terminal. The HTML parser routes its recoverable diagnostics
//! through here when warnings are switched on.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are written with ANSI colors
static COLORED: AtomicBool = AtomicBool::new(true);

/// A poisoned lock only means another thread panicked mid-insert; the set
/// itself is still usable.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

fn format_warning(component: &str, message: &str, colored: bool) -> String {
    let line = format!("[Thicket {component}] ⚠ {message}");
    if colored {
        line.yellow().to_string()
    } else {
        line
    }
}

/// Turn ANSI colors in warning output on or off (on by default).
pub fn set_colored(enabled: bool) {
    COLORED.store(enabled, Ordering::Relaxed);
}

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "unexpected closing tag '</span>'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!(
            "{}",
            format_warning(component, message, COLORED.load(Ordering::Relaxed))
        );
    }
}

/// Whether `warn_once` has already reported this exact message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = key(component, message);
    let guard = warned();
    guard.as_ref().is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
