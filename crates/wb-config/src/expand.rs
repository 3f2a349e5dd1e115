//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Bare `$VAR` is left alone; only the braced forms are expanded. `field`
/// names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var_and_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WB_EXPAND_DIR", "/srv/wb");
            std::env::remove_var("WB_EXPAND_UNSET");
        }

        assert_eq!(
            expand_env("${WB_EXPAND_DIR}/data", "storage.dir").unwrap(),
            "/srv/wb/data"
        );
        assert_eq!(
            expand_env("${WB_EXPAND_UNSET:-sites}", "storage.slot").unwrap(),
            "sites"
        );

        unsafe {
            std::env::remove_var("WB_EXPAND_DIR");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WB_EXPAND_MISSING");
        }

        let err = expand_env("${WB_EXPAND_MISSING}", "storage.dir").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in storage.dir: ${WB_EXPAND_MISSING} not set"
        );
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("price$5", "storage.slot").unwrap(), "price$5");
    }
}
