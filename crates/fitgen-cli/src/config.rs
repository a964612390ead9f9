use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use fitgen_generate::GenerateOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// Generation options from a TOML file, or defaults when no file is given.
///
/// Missing keys keep their default value.
pub fn load_options(path: Option<&Path>) -> Result<GenerateOptions, ConfigError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            parse_options(&content)
        }
        None => Ok(GenerateOptions::default()),
    }
}

pub fn parse_options(content: &str) -> Result<GenerateOptions, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub users: Option<u32>,
    /// Applied to every per-user table count.
    pub per_user: Option<u32>,
    pub seed: Option<u64>,
    pub today: Option<NaiveDate>,
}

impl Overrides {
    pub fn apply(self, options: &mut GenerateOptions) {
        if let Some(users) = self.users {
            options.users = users;
        }
        if let Some(count) = self.per_user {
            options.workouts_per_user = count;
            options.nutrition_logs_per_user = count;
            options.sleep_logs_per_user = count;
            options.health_metrics_per_user = count;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if self.today.is_some() {
            options.today = self.today;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let options = parse_options(
            r#"
            users = 12
            seed = 77
            today = "2026-10-19"
            stress_note_probability = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(options.users, 12);
        assert_eq!(options.seed, Some(77));
        assert_eq!(options.today, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(options.stress_note_probability, 0.25);
        assert_eq!(options.workouts_per_user, 200);
        assert_eq!(options.caloric_intake_probability, 0.5);
    }

    #[test]
    fn flags_override_file_values() {
        let mut options = parse_options("users = 12\nseed = 77\nsleep_logs_per_user = 3").unwrap();
        Overrides {
            users: Some(2),
            per_user: Some(5),
            seed: None,
            today: None,
        }
        .apply(&mut options);
        assert_eq!(options.users, 2);
        assert_eq!(options.sleep_logs_per_user, 5);
        assert_eq!(options.health_metrics_per_user, 5);
        assert_eq!(options.seed, Some(77));
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(parse_options("users = \"many\"").is_err());
    }
}
