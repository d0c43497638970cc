//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` is left alone. Strings without `${` are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVIDOCS_TEST_SIMPLE", "docs.example.com");
        }
        let result = expand_env("${NAVIDOCS_TEST_SIMPLE}", "server.host").unwrap();
        assert_eq!(result, "docs.example.com");
        unsafe {
            std::env::remove_var("NAVIDOCS_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVIDOCS_TEST_UNSET");
        }
        let result = expand_env("${NAVIDOCS_TEST_UNSET:-content}", "content.source_dir").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVIDOCS_TEST_MISSING");
        }
        let err = expand_env("${NAVIDOCS_TEST_MISSING}", "site.name").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NAVIDOCS_TEST_MISSING"));
        assert!(err.to_string().contains("site.name"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVIDOCS_TEST_ROOT", "/srv/navi");
        }
        let result = expand_env("${NAVIDOCS_TEST_ROOT}/content", "content.source_dir").unwrap();
        assert_eq!(result, "/srv/navi/content");
        unsafe {
            std::env::remove_var("NAVIDOCS_TEST_ROOT");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("$HOME", "site.name").unwrap(), "$HOME");
    }
}
