//! # Free-Text Sanitizer
//!
//! Best-effort defensive filter for customer-supplied text before it lands
//! in a persisted transaction (and later in CSV exports and HTML receipts).
//!
//! ## What It Strips
//! - `<script>…</script>` blocks (case-insensitive, any attributes)
//! - `javascript:` scheme prefixes
//! - inline-event-handler-like substrings (`onload=`, `onclick =`, ...)
//!
//! ## What It Is NOT
//! This is not full HTML sanitization. It removes the obvious injection
//! vectors from free-text fields; rendering layers still own their own
//! escaping. Treat it as defense in depth, not a security boundary.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    // A <script> open tag through the nearest close tag, tolerating
    // attributes and anything (including newlines) in between.
    Regex::new(r"(?is)<script\b.*?</script>").expect("script-block pattern is valid")
});

static JS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("scheme pattern is valid"));

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").expect("handler pattern is valid"));

/// Strips embedded markup/script sequences from free text.
///
/// ## Example
/// ```rust
/// use paypro_core::sanitize::sanitize_text;
///
/// let clean = sanitize_text("Budi <script>alert(1)</script>Santoso");
/// assert_eq!(clean, "Budi Santoso");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let pass = SCRIPT_BLOCK.replace_all(input, "");
    let pass = JS_SCHEME.replace_all(&pass, "");
    EVENT_HANDLER.replace_all(&pass, "").into_owned()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(sanitize_text("Budi Santoso"), "Budi Santoso");
        assert_eq!(sanitize_text("budi@example.com"), "budi@example.com");
    }

    #[test]
    fn test_script_blocks_removed() {
        assert_eq!(sanitize_text("<script>alert('x')</script>ok"), "ok");
        assert_eq!(
            sanitize_text("a<SCRIPT src=\"evil.js\">b</SCRIPT>c"),
            "ac"
        );
    }

    #[test]
    fn test_javascript_scheme_removed() {
        assert_eq!(sanitize_text("javascript:alert(1)"), "alert(1)");
        assert_eq!(sanitize_text("JaVaScRiPt:void(0)"), "void(0)");
    }

    #[test]
    fn test_event_handlers_removed() {
        assert_eq!(sanitize_text("x onclick=steal()"), "x steal()");
        assert_eq!(sanitize_text("x ONLOAD = run()"), "x run()");
    }

    #[test]
    fn test_non_script_markup_is_kept() {
        // Only the listed vectors are stripped; other markup is the
        // rendering layer's escaping problem.
        assert_eq!(sanitize_text("a <b>bold</b> name"), "a <b>bold</b> name");
    }
}
