use crate::utils::error::{MapperError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_single_byte, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Turn a partial copy into an error.
    pub strict: Option<bool>,
    pub trim_text: Option<bool>,
}

impl MappingConfig {
    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn trim_text(&self) -> bool {
        self.trim_text.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvConfig {
    pub delimiter: Option<String>,
    pub include_headers: Option<bool>,
}

impl CsvConfig {
    pub fn delimiter(&self) -> Result<u8> {
        match &self.delimiter {
            Some(delimiter) => validate_single_byte("csv.delimiter", delimiter),
            None => Ok(b','),
        }
    }

    pub fn include_headers(&self) -> bool {
        self.include_headers.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}

impl MapperConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapperError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MapperError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| match Regex::new(r"\$\{([^}]+)\}") {
            Ok(re) => re,
            Err(e) => panic!("env var pattern: {}", e),
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        self.csv.delimiter()?;

        if let Some(level) = &self.logging.level {
            validate_non_empty_string("logging.level", level)?;
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

impl Validate for MapperConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
