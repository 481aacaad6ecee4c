//! Checker service configuration.

use anyhow::{Context, Result};
use crossover::CrossoverConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Root of the DSG file tree
    pub dsg_dir: PathBuf,

    /// Number of worker threads for parallel searches (1 = sequential)
    pub workers: usize,

    /// Crossover thresholds
    pub crossover: CrossoverConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dsg_dir: PathBuf::from("/data/socat/dsg"),
            workers: default_workers(),
            crossover: CrossoverConfig::default(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl ServiceConfig {
    /// Load configuration from a YAML file, expanding `${VAR}` references.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from YAML text, expanding `${VAR}` references.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;
        let config: Self = serde_yaml::from_str(&expanded).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            dsg_dir: env::var("CROSSOVER_DSG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/data/socat/dsg")),
            workers: env::var("CROSSOVER_WORKERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_workers),
            crossover: CrossoverConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.workers > 0, "workers must be greater than 0");
        anyhow::ensure!(
            !self.dsg_dir.as_os_str().is_empty(),
            "dsg_dir cannot be empty"
        );
        self.crossover.validate()?;
        Ok(())
    }
}

// ============================================================================
// Environment variable substitution
// ============================================================================

/// Expand environment variables in the format `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::new();
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut brace_count = 1;

            while brace_count > 0 {
                match chars.next() {
                    Some('{') => {
                        brace_count += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        brace_count -= 1;
                        if brace_count > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars_simple() {
        env::set_var("CROSSOVER_TEST_DIR", "/srv/dsg");
        let result = expand_env_vars("dsg_dir: ${CROSSOVER_TEST_DIR}/full").unwrap();
        assert_eq!(result, "dsg_dir: /srv/dsg/full");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        env::remove_var("CROSSOVER_TEST_UNSET");
        let result = expand_env_vars("workers: ${CROSSOVER_TEST_UNSET:-4}").unwrap();
        assert_eq!(result, "workers: 4");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        env::remove_var("CROSSOVER_TEST_REQUIRED");
        assert!(expand_env_vars("${CROSSOVER_TEST_REQUIRED}").is_err());
        assert!(expand_env_vars("${UNCLOSED").is_err());
    }

    #[test]
    fn test_from_yaml_str_partial() {
        let config = ServiceConfig::from_yaml_str(
            "dsg_dir: /tmp/dsg\nworkers: 2\ncrossover:\n  max_fco2_diff: 2.5\n",
        )
        .unwrap();
        assert_eq!(config.dsg_dir, PathBuf::from("/tmp/dsg"));
        assert_eq!(config.workers, 2);
        assert_eq!(config.crossover.max_fco2_diff, 2.5);
        assert_eq!(config.crossover.max_temp_diff, 0.3);
        assert_eq!(config.crossover.max_time_diff_secs, 230_400.0);
    }

    #[test]
    fn test_from_yaml_str_rejects_invalid() {
        assert!(ServiceConfig::from_yaml_str("workers: 0\n").is_err());
        assert!(ServiceConfig::from_yaml_str("crossover:\n  max_crossover_dist_km: -1.0\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.yaml");
        std::fs::write(&path, "dsg_dir: ${CROSSOVER_TEST_FILE_DIR:-/data/dsg}\n").unwrap();
        let config = ServiceConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.dsg_dir, PathBuf::from("/data/dsg"));

        assert!(ServiceConfig::from_yaml_file(dir.path().join("missing.yaml")).is_err());
    }
}
