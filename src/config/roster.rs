use crate::adapters::render::DisplayFormat;
use crate::core::{CatProfile, RosterProvider};
use crate::utils::error::{RankError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub roster: RosterSection,
    pub cats: Vec<CatEntry>,
    #[serde(default)]
    pub late_entries: Vec<LateEntry>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSection {
    pub title: String,
}

impl Default for RosterSection {
    fn default() -> Self {
        Self {
            title: "Angry Cats".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatEntry {
    pub name: String,
    pub image_path: String,
}

/// A cat added after the initial roster has been ranked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateEntry {
    pub name: String,
    pub image_path: String,
    /// When set, goes through the validated insert path and must be N+1.
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub format: Option<String>,
}

impl Default for RosterConfig {
    /// 內建名單：三隻初始貓咪，加上啟動後追加的 Cranky Cat
    fn default() -> Self {
        let cat = |name: &str, image: &str| CatEntry {
            name: name.to_string(),
            image_path: image.to_string(),
        };

        Self {
            roster: RosterSection::default(),
            cats: vec![
                cat("Wet Cat", "assets/images/cat1.jpg"),
                cat("Bitey Cat", "assets/images/cat2.jpg"),
                cat("Surprised Cat", "assets/images/cat3.jpg"),
            ],
            late_entries: vec![LateEntry {
                name: "Cranky Cat".to_string(),
                image_path: "assets/images/cat4.jpg".to_string(),
                rank: Some(4),
            }],
            display: None,
        }
    }
}

impl RosterConfig {
    /// 從 TOML 檔案載入名單
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RankError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析名單
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RankError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CAT_IMAGES})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RankError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("roster.title", &self.roster.title)?;
        validation::validate_positive_number("cats", self.cats.len(), 1)?;

        for (index, cat) in self.cats.iter().enumerate() {
            validation::validate_non_empty_string(&format!("cats[{}].name", index), &cat.name)?;
            validation::validate_path(&format!("cats[{}].image_path", index), &cat.image_path)?;
        }

        for (index, entry) in self.late_entries.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("late_entries[{}].name", index),
                &entry.name,
            )?;
            validation::validate_path(
                &format!("late_entries[{}].image_path", index),
                &entry.image_path,
            )?;
        }

        if let Some(format) = self.display.as_ref().and_then(|d| d.format.as_deref()) {
            validation::validate_one_of("display.format", format, DisplayFormat::NAMES)?;
        }

        Ok(())
    }

    /// Display format from the file, `None` when unset.
    pub fn display_format(&self) -> Result<Option<DisplayFormat>> {
        self.display
            .as_ref()
            .and_then(|d| d.format.as_deref())
            .map(str::parse)
            .transpose()
    }
}

impl RosterProvider for RosterConfig {
    fn title(&self) -> &str {
        &self.roster.title
    }

    fn initial_cats(&self) -> Vec<CatProfile> {
        self.cats
            .iter()
            .map(|cat| CatProfile::new(cat.name.clone(), cat.image_path.clone()))
            .collect()
    }

    fn late_entries(&self) -> Vec<(CatProfile, Option<u32>)> {
        self.late_entries
            .iter()
            .map(|entry| {
                (
                    CatProfile::new(entry.name.clone(), entry.image_path.clone()),
                    entry.rank,
                )
            })
            .collect()
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_roster() {
        let toml_content = r#"
[roster]
title = "Grumpy Finalists"

[[cats]]
name = "Wet Cat"
image_path = "assets/images/cat1.jpg"

[[cats]]
name = "Bitey Cat"
image_path = "assets/images/cat2.jpg"

[[late_entries]]
name = "Cranky Cat"
image_path = "assets/images/cat4.jpg"
rank = 3

[display]
format = "csv"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.title(), "Grumpy Finalists");
        assert_eq!(config.initial_cats().len(), 2);
        assert_eq!(config.late_entries()[0].1, Some(3));
        assert_eq!(config.display_format().unwrap(), Some(DisplayFormat::Csv));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_sections_default() {
        let toml_content = r#"
[[cats]]
name = "Solo Cat"
image_path = "solo.jpg"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.title(), "Angry Cats");
        assert!(config.late_entries().is_empty());
        assert_eq!(config.display_format().unwrap(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ANGRY_CATS_TEST_IMAGE", "cdn/wet.jpg");

        let toml_content = r#"
[[cats]]
name = "Wet Cat"
image_path = "${ANGRY_CATS_TEST_IMAGE}"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.cats[0].image_path, "cdn/wet.jpg");

        std::env::remove_var("ANGRY_CATS_TEST_IMAGE");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let empty_name = r#"
[[cats]]
name = "  "
image_path = "a.jpg"
"#;
        let config = RosterConfig::from_toml_str(empty_name).unwrap();
        assert!(config.validate().is_err());

        let bad_format = r#"
[[cats]]
name = "Wet Cat"
image_path = "a.jpg"

[display]
format = "xml"
"#;
        let config = RosterConfig::from_toml_str(bad_format).unwrap();
        assert!(matches!(
            config.validate(),
            Err(RankError::InvalidConfigValueError { .. })
        ));

        let no_cats = "cats = []\n";
        let config = RosterConfig::from_toml_str(no_cats).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = RosterConfig::from_toml_str("[[cats]\nname = ").unwrap_err();
        assert!(matches!(err, RankError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_roster_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[[cats]]\nname = \"File Cat\"\nimage_path = \"file.jpg\"\n")
            .unwrap();

        let config = RosterConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.cats[0].name, "File Cat");
    }

    #[test]
    fn test_default_roster_matches_builtin_cats() {
        let config = RosterConfig::default();
        assert!(config.validate().is_ok());
        let names: Vec<String> = config.initial_cats().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Wet Cat", "Bitey Cat", "Surprised Cat"]);
        assert_eq!(config.late_entries()[0].0.name, "Cranky Cat");
    }
}
