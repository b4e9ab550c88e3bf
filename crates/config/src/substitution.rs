use anyhow::Result;
use regex::{Captures, Regex};
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{(\w+)\}|\$(\w+)").expect("placeholder pattern is a valid regex")
    })
}

/// Substituted text plus the names that had no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substituted {
    pub content: String,
    /// Variables left as placeholders, in first-seen order, without duplicates
    pub unresolved: Vec<String>,
}

/// Substitute environment variables in the format ${VAR_NAME} or $VAR_NAME.
///
/// Unset variables keep their placeholder and are listed in
/// [`Substituted::unresolved`] so validation can report them.
pub fn substitute_env_vars(content: &str) -> Result<Substituted> {
    substitute_with(content, |name| env::var(name).ok())
}

/// Substitution with a caller-supplied lookup, used by tests to avoid
/// touching the process environment.
pub fn substitute_with<F>(content: &str, lookup: F) -> Result<Substituted>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing_vars: Vec<String> = Vec::new();

    let result = placeholder_pattern().replace_all(content, |caps: &Captures<'_>| {
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();

        match lookup(var_name) {
            Some(value) => {
                debug!(var = var_name, "Substituting environment variable");
                value
            }
            None => {
                warn!("Environment variable '{}' not set", var_name);
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            ?missing_vars,
            "Environment variables not set (validation may reject the config)"
        );
    }

    Ok(Substituted {
        content: result.into_owned(),
        unresolved: missing_vars,
    })
}

/// True if `value` still holds a placeholder for one of the `unresolved`
/// variables.
///
/// Only names that were actually left unset count, so a literal `$` inside
/// a substituted value is never mistaken for a placeholder.
pub fn has_unresolved_env_vars(value: &str, unresolved: &[String]) -> bool {
    if unresolved.is_empty() {
        return false;
    }

    placeholder_pattern().captures_iter(value).any(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .is_some_and(|m| unresolved.iter().any(|name| name == m.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "APP_NAME" => Some("xray-demo".to_string()),
            "DB_HOST" => Some("db.internal".to_string()),
            "DB_URL" => Some("postgres://u:pa$word@db/demo".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_braced_and_bare_placeholders() {
        let out = substitute_with("name: ${APP_NAME}\nhost: $DB_HOST", lookup).unwrap();
        assert_eq!(out.content, "name: xray-demo\nhost: db.internal");
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_missing_variable_keeps_placeholder() {
        let out = substitute_with("url: ${DATABASE_URL}\nalt: $DATABASE_URL", lookup).unwrap();
        assert_eq!(out.content, "url: ${DATABASE_URL}\nalt: $DATABASE_URL");
        assert_eq!(out.unresolved, vec!["DATABASE_URL"]);
        assert!(has_unresolved_env_vars(&out.content, &out.unresolved));
    }

    #[test]
    fn test_dollar_in_substituted_value_is_not_a_placeholder() {
        let out = substitute_with("url: ${DB_URL}", lookup).unwrap();
        assert_eq!(out.content, "url: postgres://u:pa$word@db/demo");
        assert!(out.unresolved.is_empty());
        assert!(!has_unresolved_env_vars(&out.content, &out.unresolved));

        // Even with something else unresolved, `$word` is not that variable
        let unresolved = vec!["APPLICATION_NAME".to_string()];
        assert!(!has_unresolved_env_vars(&out.content, &unresolved));
    }

    #[test]
    fn test_plain_text_untouched() {
        let out = substitute_with("region: us-east-1", lookup).unwrap();
        assert_eq!(out.content, "region: us-east-1");
        assert!(!has_unresolved_env_vars(&out.content, &out.unresolved));
    }
}
