//! `${VAR}` substitution in config string values.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are matched. `$${VAR}` is an
//! escape and yields the literal `${VAR}`.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

/// Matches `${VAR}` with an optional leading `$` marking an escape.
static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references from the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute `${VAR}` references from `env`.
///
/// Unset or empty variables are an error naming the config path.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    Ok(substitute(value, env, "")?)
}

fn substitute(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => substitute_str(s, env, path).map(Value::String),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| substitute(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, v) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                out.insert(key.clone(), substitute(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_str(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing = None;
    let replaced = ENV_REF.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_inside_strings() {
        let v = json!({"backend": {"baseUrl": "https://${OCR_HOST}/v1"}});
        let result = resolve_env_vars_with(&v, &env(&[("OCR_HOST", "ocr.example.com")])).unwrap();
        assert_eq!(result["backend"]["baseUrl"], "https://ocr.example.com/v1");
    }

    #[test]
    fn error_names_var_and_path() {
        let v = json!({"output": {"downloadDir": "${MISSING_DIR}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("MISSING_DIR"));
        assert!(err.contains("output.downloadDir"));
    }

    #[test]
    fn escaped_reference_stays_literal() {
        let v = json!({"note": "$${HOME} stays"});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["note"], "${HOME} stays");
    }

    #[test]
    fn non_strings_pass_through() {
        let v = json!({"camera": {"jpegQuality": 90, "enabled": true}});
        assert_eq!(resolve_env_vars_with(&v, &HashMap::new()).unwrap(), v);
    }
}
