use std::fmt;

/// Bearer credential for the speech-to-text provider.
///
/// The value is only reachable through [`ApiKey::expose`]; `Debug` never
/// prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn test_blank_key_is_rejected(#[case] input: &str) {
        assert!(ApiKey::new(input).is_none());
    }

    #[test]
    fn test_key_is_trimmed() {
        let key = ApiKey::new("  sk-test  ").unwrap();
        assert_eq!(key.expose(), "sk-test");
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("sk-secret-value").unwrap();
        let printed = format!("{key:?}");
        assert!(!printed.contains("secret"), "leaked key: {printed}");
    }
}
