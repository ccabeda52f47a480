pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::{OutputFormat, ScraperConfig, SelectorConfig};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "volby-scrape")]
#[command(about = "Scraping volebního webu volby.cz pro volby do PS 2017.")]
#[command(
    after_help = "Příklad použití:\n  volby-scrape \"https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103\" \"vysledky.csv\""
)]
pub struct CliConfig {
    /// URL adresa územního celku (v uvozovkách).
    pub url: String,

    /// Název výstupního CSV souboru (v uvozovkách).
    pub filename: String,

    /// Volitelný konfigurační soubor TOML.
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the optional TOML file and combines it with the positional arguments.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let scraper = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };
        Ok(RunConfig::new(self.url, self.filename, scraper))
    }
}

/// Everything one run needs: where to scrape, where to write, and how.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub listing_url: String,
    pub output_path: String,
    pub scraper: ScraperConfig,
}

impl RunConfig {
    pub fn new(listing_url: String, output_path: String, scraper: ScraperConfig) -> Self {
        Self {
            listing_url,
            output_path,
            scraper,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn selectors(&self) -> &SelectorConfig {
        &self.scraper.selectors
    }

    fn output_format(&self) -> OutputFormat {
        self.scraper
            .output
            .format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output_path))
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("url", &self.listing_url)?;
        validation::validate_path("filename", &self.output_path)?;
        self.scraper.validate()
    }
}
