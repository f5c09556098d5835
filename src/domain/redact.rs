//! Redaction-by-type for values that must not reach the logs.

/// Wraps a personal value so that `Debug` and `Display` never print it.
///
/// Access the inner value explicitly with [`Redacted::expose`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> std::fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> std::fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_formatting() {
        let name = Redacted::new("John Doe");
        assert_eq!(format!("{name}"), "[REDACTED]");
        assert_eq!(format!("{name:?}"), "[REDACTED]");
        assert_eq!(*name.expose(), "John Doe");
    }
}
