//! User configuration at ~/.config/monthgrid/config.toml
//!
//! Every key is optional. `MONTHGRID_*` environment variables override the
//! file (e.g. `MONTHGRID_EDIT_POLICY=relocate`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::form::DEFAULT_EVENT_DURATION_HOURS;
use crate::reducer::EditPolicy;

static DEFAULT_LOG_LEVEL: &str = "warn";
static ENV_PREFIX: &str = "MONTHGRID";

fn default_event_duration_hours() -> i64 {
    DEFAULT_EVENT_DURATION_HOURS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthgridConfig {
    #[serde(default)]
    pub edit_policy: EditPolicy,

    /// Length of a new event when the form is opened on a day.
    #[serde(default = "default_event_duration_hours")]
    pub default_event_duration_hours: i64,

    /// Log level, e.g. "warn" or "monthgrid_core=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to rotating files here instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for MonthgridConfig {
    fn default() -> Self {
        MonthgridConfig {
            edit_policy: EditPolicy::default(),
            default_event_duration_hours: default_event_duration_hours(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl MonthgridConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("monthgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, writing a commented template there first
    /// if nothing exists yet.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from `path` with `env` layered on top.
    fn load_with(path: &Path, env: Environment) -> CalendarResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> CalendarResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# monthgrid configuration

# How editing an event onto another day treats the old entry:
#   \"target_day_only\" keeps it, \"relocate\" moves the event.
# edit_policy = \"target_day_only\"

# Length of new events, in hours:
# default_event_duration_hours = {}

# Log level, optionally per module:
# log_level = \"{}\"

# Log to rotating files in this directory instead of stderr:
# log_dir = \"/tmp/monthgrid-logs\"
",
            DEFAULT_EVENT_DURATION_HOURS, DEFAULT_LOG_LEVEL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Environment source fed from `vars` instead of the process environment.
    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn load(path: &Path) -> CalendarResult<MonthgridConfig> {
        MonthgridConfig::load_with(path, env(&[]))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.edit_policy, EditPolicy::TargetDayOnly);
        assert_eq!(config.default_event_duration_hours, 1);
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        MonthgridConfig::create_default_config(&path).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.default_event_duration_hours, 1);
        assert_eq!(config.edit_policy, EditPolicy::TargetDayOnly);
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "edit_policy = \"relocate\"\ndefault_event_duration_hours = 2\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.edit_policy, EditPolicy::Relocate);
        assert_eq!(config.default_event_duration_hours, 2);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = MonthgridConfig {
            edit_policy: EditPolicy::Relocate,
            default_event_duration_hours: 3,
            log_level: "info".to_string(),
            log_dir: Some(dir.path().join("logs")),
        };
        config.save_to(&path).unwrap();

        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "edit_policy = \"sideways\"\n").unwrap();

        assert!(matches!(
            load(&path),
            Err(CalendarError::Config(_))
        ));
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "edit_policy = \"target_day_only\"\nlog_level = \"info\"\n").unwrap();

        let config = MonthgridConfig::load_with(
            &path,
            env(&[
                ("MONTHGRID_EDIT_POLICY", "relocate"),
                ("MONTHGRID_DEFAULT_EVENT_DURATION_HOURS", "3"),
            ]),
        )
        .unwrap();
        assert_eq!(config.edit_policy, EditPolicy::Relocate);
        assert_eq!(config.default_event_duration_hours, 3);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let result = MonthgridConfig::create_default_config(&blocker.join("config.toml"));
        assert!(matches!(result, Err(CalendarError::Io(_))));
    }
}
