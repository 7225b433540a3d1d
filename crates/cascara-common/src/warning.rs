//! Parser warnings with colored terminal output.
//!
//! Recoverable lexical problems (an unterminated string, an unclosed comment)
//! never abort a parse, but they are worth surfacing. Each distinct message is
//! printed once and kept so tools can list them afterwards.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Messages already reported, in first-seen order.
#[derive(Default)]
struct Recorded {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

static WARNED: Mutex<Option<Recorded>> = Mutex::new(None);

static QUIET: AtomicBool = AtomicBool::new(false);

fn recorded() -> MutexGuard<'static, Option<Recorded>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about a recoverable problem (prints once per unique message).
///
/// # Example
/// ```
/// use cascara_common::warning::{clear_warnings, recorded_warnings, warn_once};
///
/// clear_warnings();
/// warn_once("CSS", "unterminated string at line 3, char 9");
/// warn_once("CSS", "unterminated string at line 3, char 9");
/// assert_eq!(recorded_warnings().len(), 1);
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = {
        let mut guard = recorded();
        let set = guard.get_or_insert_with(Recorded::default);
        let inserted = set.seen.insert(key.clone());
        if inserted {
            set.ordered.push(key);
        }
        inserted
    };

    if first_time && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[Cascara {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call before parsing an unrelated stylesheet).
pub fn clear_warnings() {
    if let Some(set) = recorded().as_mut() {
        set.seen.clear();
        set.ordered.clear();
    }
}

/// Return every warning recorded since the last [`clear_warnings`], formatted
/// as `[component] message`.
#[must_use]
pub fn recorded_warnings() -> Vec<String> {
    recorded()
        .as_ref()
        .map(|set| set.ordered.clone())
        .unwrap_or_default()
}

/// Suppress (or re-enable) printing. Warnings are still recorded while quiet.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}
