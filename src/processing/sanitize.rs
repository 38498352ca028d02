//! Identifier sanitization.
//!
//! Node ids arriving from an LLM may contain anything. [`SanitizeSession`]
//! strips every character outside `[A-Za-z0-9_]` and hands out
//! deterministic generated ids (`n0`, `n1`, ...) for input that sanitizes
//! to nothing. One session is created per pipeline invocation so the
//! counter restarts at zero for every request; there is never a global
//! counter.

/// Stateful id sanitizer scoped to one normalization pass.
#[derive(Debug, Default)]
pub struct SanitizeSession {
    counter: u32,
}

impl SanitizeSession {
    pub fn new() -> SanitizeSession {
        SanitizeSession { counter: 0 }
    }

    /// Sanitize a candidate id.
    ///
    /// Valid input maps to the same output on every call; missing or
    /// degenerate input (empty, or underscores only) consumes the next
    /// generated id.
    pub fn sanitize(&mut self, candidate: Option<&str>) -> String {
        let cleaned: String = candidate
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();

        if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
            let generated = format!("n{}", self.counter);
            self.counter += 1;
            return generated;
        }
        cleaned
    }

    /// Next generated id, for callers that need to disambiguate a
    /// colliding sanitized id deterministically.
    pub fn next_generated(&mut self) -> String {
        let generated = format!("n{}", self.counter);
        self.counter += 1;
        generated
    }
}
