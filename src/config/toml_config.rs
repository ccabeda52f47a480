use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Optional TOML configuration. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub http: HttpConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("volby-scrape/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// CSS selectors for the volby.cz PS 2017 pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub listing_rows: String,
    pub municipality_link: String,
    pub municipality_name: String,
    pub registered: String,
    pub envelopes: String,
    pub valid: String,
    pub party_container: String,
    pub party_table: String,
    pub party_row: String,
    pub party_cell: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_rows: "table.table tr".to_string(),
            municipality_link: "td.cislo a".to_string(),
            municipality_name: "td.overflow_name".to_string(),
            registered: r#"td[headers="sa2"]"#.to_string(),
            envelopes: r#"td[headers="sa3"]"#.to_string(),
            valid: r#"td[headers="sa6"]"#.to_string(),
            party_container: "div.t2_470".to_string(),
            party_table: "table".to_string(),
            party_row: "tr".to_string(),
            party_cell: "td".to_string(),
        }
    }
}

impl SelectorConfig {
    fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("selectors.listing_rows", &self.listing_rows),
            ("selectors.municipality_link", &self.municipality_link),
            ("selectors.municipality_name", &self.municipality_name),
            ("selectors.registered", &self.registered),
            ("selectors.envelopes", &self.envelopes),
            ("selectors.valid", &self.valid),
            ("selectors.party_container", &self.party_container),
            ("selectors.party_table", &self.party_table),
            ("selectors.party_row", &self.party_row),
            ("selectors.party_cell", &self.party_cell),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// `.tsv` and `.json` select their format, anything else is CSV.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("tsv") => OutputFormat::Tsv,
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Overrides the format derived from the output file extension.
    pub format: Option<OutputFormat>,
}

impl ScraperConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` with the environment value, leaving unknown variables untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 600)?;
        validation::validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        for (field, selector) in self.selectors.fields() {
            validation::validate_selector(field, selector)?;
        }

        Ok(())
    }
}
