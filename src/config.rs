//! # Global runtime configuration.
//!
//! Provides [`Config`], the settings shared by the registry and every component
//! built by the container.
//!
//! Config is used in three ways:
//! 1. **Registration**: exclusion predicates see the [`ProjectStage`] once, when a
//!    descriptor is registered.
//! 2. **Alternative selection**: alternatives without a priority are only enabled
//!    when listed in [`Config::selected_alternatives`].
//! 3. **Value lookup**: components read plain string properties by key
//!    (e.g. `app.name`).
//!
//! Configuration files are not read here; [`Config::from_env`] only overlays a
//! couple of environment variables on top of the defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by [`Config::from_env`] for the project stage.
pub const STAGE_VAR: &str = "TASKFORGE_PROJECT_STAGE";
/// Environment variable consulted by [`Config::from_env`] for `app.name`.
pub const APP_NAME_VAR: &str = "TASKFORGE_APP_NAME";

/// Deployment stage used by exclusion predicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectStage {
    Development,
    UnitTest,
    SystemTest,
    IntegrationTest,
    Staging,
    /// Default stage.
    #[default]
    Production,
}

impl ProjectStage {
    /// Returns the canonical name of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStage::Development => "Development",
            ProjectStage::UnitTest => "UnitTest",
            ProjectStage::SystemTest => "SystemTest",
            ProjectStage::IntegrationTest => "IntegrationTest",
            ProjectStage::Staging => "Staging",
            ProjectStage::Production => "Production",
        }
    }
}

impl fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStage {
    type Err = String;

    /// Accepts canonical names as well as kebab/snake case (`unit-test`, `unit_test`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "development" | "dev" => Ok(ProjectStage::Development),
            "unittest" => Ok(ProjectStage::UnitTest),
            "systemtest" => Ok(ProjectStage::SystemTest),
            "integrationtest" => Ok(ProjectStage::IntegrationTest),
            "staging" => Ok(ProjectStage::Staging),
            "production" | "prod" => Ok(ProjectStage::Production),
            _ => Err(format!("unknown project stage '{s}'")),
        }
    }
}

/// Global configuration for the container.
///
/// ## Field semantics
/// - `project_stage`: evaluated by exclusion predicates at registration
/// - `selected_alternatives`: names of priority-less alternatives to enable
/// - `properties`: string values looked up by key
///
/// All fields are public; prefer the helper accessors for lookups.
#[derive(Clone, Debug)]
pub struct Config {
    /// Deployment stage.
    pub project_stage: ProjectStage,

    /// Alternatives enabled by name even though they declare no priority.
    ///
    /// Such alternatives rank with an effective priority of `0`.
    pub selected_alternatives: Vec<String>,

    /// Plain key/value properties.
    pub properties: BTreeMap<String, String>,
}

impl Config {
    /// Returns the property stored under `key`.
    #[inline]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns the property stored under `key`, or `default` when absent.
    #[inline]
    pub fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    /// Returns true if the alternative named `name` was selected explicitly.
    #[inline]
    pub fn is_alternative_selected(&self, name: &str) -> bool {
        self.selected_alternatives.iter().any(|n| n == name)
    }

    /// Returns a new config with `key` set to `value`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns a new config with the given project stage.
    pub fn with_project_stage(mut self, stage: ProjectStage) -> Self {
        self.project_stage = stage;
        self
    }

    /// Returns a new config with `name` added to the selected alternatives.
    pub fn with_selected_alternative(mut self, name: impl Into<String>) -> Self {
        self.selected_alternatives.push(name.into());
        self
    }

    /// Defaults overlaid with the process environment.
    ///
    /// See [`Config::from_vars`] for the variables consulted.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values produced by `lookup`.
    ///
    /// - [`STAGE_VAR`]: project stage; unparsable values are ignored with a warning
    /// - [`APP_NAME_VAR`]: overrides `app.name`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(STAGE_VAR) {
            match raw.parse::<ProjectStage>() {
                Ok(stage) => cfg.project_stage = stage,
                Err(reason) => tracing::warn!(var = STAGE_VAR, %reason, "ignoring project stage"),
            }
        }
        if let Some(name) = lookup(APP_NAME_VAR) {
            cfg.properties.insert("app.name".to_string(), name);
        }
        cfg
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `project_stage = Production`
    /// - no selected alternatives
    /// - `app.name = TaskForge`, `app.version = 1.0`, `app.maxTasks = 100`
    fn default() -> Self {
        let properties = [
            ("app.name", "TaskForge"),
            ("app.version", "1.0"),
            ("app.maxTasks", "100"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            project_stage: ProjectStage::default(),
            selected_alternatives: Vec::new(),
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_app_properties() {
        let cfg = Config::default();
        assert_eq!(cfg.value("app.name"), Some("TaskForge"));
        assert_eq!(cfg.value_or("app.missing", "?"), "?");
        assert_eq!(cfg.project_stage, ProjectStage::Production);
    }

    #[test]
    fn stage_parses_loosely() {
        assert_eq!("unit-test".parse(), Ok(ProjectStage::UnitTest));
        assert_eq!("UnitTest".parse(), Ok(ProjectStage::UnitTest));
        assert_eq!("prod".parse(), Ok(ProjectStage::Production));
        assert!("moon".parse::<ProjectStage>().is_err());
    }

    #[test]
    fn vars_overlay_defaults() {
        let cfg = Config::from_vars(|key| match key {
            STAGE_VAR => Some("unit_test".to_string()),
            APP_NAME_VAR => Some("Board".to_string()),
            _ => None,
        });
        assert_eq!(cfg.project_stage, ProjectStage::UnitTest);
        assert_eq!(cfg.value("app.name"), Some("Board"));
        assert_eq!(cfg.value("app.version"), Some("1.0"));
    }

    #[test]
    fn bad_stage_keeps_default() {
        let cfg = Config::from_vars(|key| (key == STAGE_VAR).then(|| "nope".to_string()));
        assert_eq!(cfg.project_stage, ProjectStage::Production);
    }
}
