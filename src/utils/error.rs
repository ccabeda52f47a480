use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Listing page {url} could not be fetched: {source}")]
    ListingUnavailable {
        url: String,
        #[source]
        source: Box<EtlError>,
    },

    #[error("No municipalities found on listing page {url}")]
    NoMunicipalities { url: String },

    #[error("Writing output to {path} failed: {source}")]
    ExportFailed {
        path: String,
        #[source]
        source: Box<EtlError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    Write,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::HttpError(_) | EtlError::ListingUnavailable { .. } => ErrorCategory::Network,
            EtlError::UrlError(_) | EtlError::NoMunicipalities { .. } => ErrorCategory::Parse,
            EtlError::CsvError(_)
            | EtlError::IoError(_)
            | EtlError::SerializationError(_)
            | EtlError::ExportFailed { .. } => ErrorCategory::Write,
            EtlError::TomlError(_)
            | EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Write => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Czech message printed to the user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ListingUnavailable { .. } => {
                "Nepodařilo se stáhnout hlavní stránku. Ukončuji program.".to_string()
            }
            EtlError::NoMunicipalities { .. } => {
                "Nebyly nalezeny žádné obce. Ukončuji program.".to_string()
            }
            EtlError::ExportFailed { path, source } => {
                format!("CHYBA: Nepodařilo se zapsat do souboru {}: {}", path, source)
            }
            EtlError::HttpError(e) => format!("CHYBA: Nepodařilo se stáhnout stránku: {}", e),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Neplatná hodnota parametru '{}': {}", field, reason)
            }
            EtlError::TomlError(_) | EtlError::ConfigError { .. } => {
                format!("Chybná konfigurace: {}", self)
            }
            other => format!("CHYBA: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Zkontrolujte připojení k internetu a URL adresu.",
            ErrorCategory::Parse => {
                "Ověřte, že URL vede na stránku územního celku (např. ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103)."
            }
            ErrorCategory::Write => "Zkontrolujte, že cílový adresář existuje a je zapisovatelný.",
            ErrorCategory::Configuration => {
                "Opravte konfigurační soubor nebo argumenty příkazové řádky."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_severity() {
        let listing = EtlError::ListingUnavailable {
            url: "http://example.com".to_string(),
            source: Box::new(EtlError::ConfigError {
                message: "boom".to_string(),
            }),
        };
        assert_eq!(listing.category(), ErrorCategory::Network);
        assert_eq!(listing.exit_code(), 2);

        let empty = EtlError::NoMunicipalities {
            url: "http://example.com".to_string(),
        };
        assert_eq!(empty.exit_code(), 1);

        let write = EtlError::ExportFailed {
            path: "out.csv".to_string(),
            source: Box::new(EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            ))),
        };
        assert_eq!(write.category(), ErrorCategory::Write);
        assert_eq!(write.exit_code(), 3);
    }

    #[test]
    fn test_config_errors_never_exit_successfully() {
        let errors = [
            EtlError::ConfigError {
                message: "missing url".to_string(),
            },
            EtlError::InvalidConfigValueError {
                field: "timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "must be between 1 and 600".to_string(),
            },
            EtlError::UrlError(url::ParseError::EmptyHost),
        ];

        for error in &errors {
            assert_eq!(error.severity(), ErrorSeverity::High);
            assert_eq!(error.exit_code(), 1);
        }
    }

    #[test]
    fn test_user_friendly_messages_are_czech() {
        let empty = EtlError::NoMunicipalities {
            url: "http://example.com".to_string(),
        };
        assert_eq!(
            empty.user_friendly_message(),
            "Nebyly nalezeny žádné obce. Ukončuji program."
        );
    }
}
