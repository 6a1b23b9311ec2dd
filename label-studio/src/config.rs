use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;

/// Label studio configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./label-studio | Working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/labels.db | SQLite database file |
/// | TENANT_ID | default | Tenant every command acts for |
/// | TIMEZONE | UTC | Business timezone for date attributes |
/// | LOG_LEVEL | info | Log filter when RUST_LOG is unset |
/// | LOG_DIR | (unset) | Write daily log files here instead of stderr |
/// | PREVIEW_DPI | 96 | Screen density for previews |
///
/// A `.env` file in the current directory is loaded first.
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub tenant_id: String,
    pub timezone: Tz,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub preview_dpi: f32,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup; unset or unparsable values use defaults
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let work_dir = var("WORK_DIR").unwrap_or_else(|| "./label-studio".into());
        let database_path = var("DATABASE_PATH").unwrap_or_else(|| {
            Path::new(&work_dir)
                .join("labels.db")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            database_path,
            tenant_id: var("TENANT_ID")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "default".into()),
            timezone: var("TIMEZONE")
                .and_then(|tz| Tz::from_str(&tz).ok())
                .unwrap_or(Tz::UTC),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR").filter(|d| !d.is_empty()),
            preview_dpi: var("PREVIEW_DPI")
                .and_then(|v| v.parse().ok())
                .filter(|dpi: &f32| dpi.is_finite() && *dpi > 0.0)
                .unwrap_or(96.0),
            work_dir,
        }
    }

    /// Create the working directory and the database's parent directory
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        if let Some(parent) = Path::new(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(dir) = &self.log_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.work_dir, "./label-studio");
        assert!(config.database_path.ends_with("labels.db"));
        assert_eq!(config.tenant_id, "default");
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.preview_dpi, 96.0);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("WORK_DIR", "/tmp/ls"),
            ("TENANT_ID", "bakery"),
            ("TIMEZONE", "Europe/Madrid"),
            ("PREVIEW_DPI", "144"),
            ("LOG_DIR", "/tmp/ls/logs"),
        ]);
        assert_eq!(config.database_path, "/tmp/ls/labels.db");
        assert_eq!(config.tenant_id, "bakery");
        assert_eq!(config.timezone, chrono_tz::Europe::Madrid);
        assert_eq!(config.preview_dpi, 144.0);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/ls/logs"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[
            ("TIMEZONE", "Mars/Olympus"),
            ("PREVIEW_DPI", "-3"),
            ("TENANT_ID", "  "),
        ]);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.preview_dpi, 96.0);
        assert_eq!(config.tenant_id, "default");
    }
}
