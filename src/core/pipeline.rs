use crate::adapters::HtmlDocument;
use crate::config::toml_config::SelectorConfig;
use crate::core::detail::extract_detail;
use crate::core::export::render;
use crate::core::flatten::flatten;
use crate::core::listing::extract_municipalities;
use crate::core::{
    ConfigProvider, ElectionDetail, ExportTable, MunicipalityRecord, MunicipalityStub, PageFetcher,
    Pipeline, Storage,
};
use crate::utils::error::{EtlError, Result};
use url::Url;

/// Scrapes one territorial unit of the PS 2017 results site.
pub struct ElectionPipeline<S: Storage, F: PageFetcher, C: ConfigProvider> {
    storage: S,
    fetcher: F,
    config: C,
}

impl<S: Storage, F: PageFetcher, C: ConfigProvider> ElectionPipeline<S, F, C> {
    pub fn new(storage: S, fetcher: F, config: C) -> Self {
        Self {
            storage,
            fetcher,
            config,
        }
    }
}

fn parse_detail(markup: &str, selectors: &SelectorConfig) -> ElectionDetail {
    let doc = HtmlDocument::parse(markup);
    extract_detail(&doc, selectors)
}

#[async_trait::async_trait]
impl<S: Storage, F: PageFetcher, C: ConfigProvider> Pipeline for ElectionPipeline<S, F, C> {
    fn listing_url(&self) -> &str {
        self.config.listing_url()
    }

    async fn extract_listing(&self) -> Result<String> {
        self.fetcher.fetch(self.config.listing_url()).await
    }

    fn parse_listing(&self, markup: &str) -> Result<Vec<MunicipalityStub>> {
        let base_url = Url::parse(self.config.listing_url())?;
        let doc = HtmlDocument::parse(markup);
        Ok(extract_municipalities(&doc, &base_url, self.config.selectors()))
    }

    async fn extract_detail(&self, stub: &MunicipalityStub) -> Result<ElectionDetail> {
        let markup = self.fetcher.fetch(stub.detail_link.as_str()).await?;
        Ok(parse_detail(&markup, self.config.selectors()))
    }

    fn transform(&self, records: &[MunicipalityRecord]) -> ExportTable {
        flatten(records)
    }

    async fn load(&self, table: ExportTable) -> Result<String> {
        let format = self.config.output_format();
        tracing::info!(
            "Exportuji data do souboru: {} ({:?})",
            self.config.output_path(),
            format
        );

        let output_path = self.config.output_path();
        let written = match render(&table, format) {
            Ok(data) => {
                tracing::debug!("Writing {} bytes", data.len());
                self.storage.write_file(output_path, &data).await
            }
            Err(e) => Err(e),
        };

        written.map_err(|e| EtlError::ExportFailed {
            path: output_path.to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::OutputFormat;
    use crate::domain::model::{OutputRow, PartyColumn};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(path.to_string())
        }
    }

    struct MockFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait::async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| EtlError::ConfigError {
                    message: format!("no page for {}", url),
                })
        }
    }

    struct MockConfig {
        listing_url: String,
        output_path: String,
        selectors: SelectorConfig,
        format: OutputFormat,
    }

    impl MockConfig {
        fn new(format: OutputFormat) -> Self {
            Self {
                listing_url: "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103"
                    .to_string(),
                output_path: "vysledky.csv".to_string(),
                selectors: SelectorConfig::default(),
                format,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn listing_url(&self) -> &str {
            &self.listing_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn selectors(&self) -> &SelectorConfig {
            &self.selectors
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }
    }

    const LISTING: &str = r#"
<table class="table">
  <tr><th>číslo</th><th>název</th></tr>
  <tr><td class="cislo"><a href="ps311?xobec=1">1</a></td><td class="overflow_name">Alpha</td></tr>
</table>
"#;

    const DETAIL: &str = r#"
<table><tr>
  <td headers="sa2">10</td><td headers="sa3">8</td><td headers="sa6">7</td>
</tr></table>
<div class="t2_470"><table>
  <tr><th>číslo</th><th>název</th><th>celkem</th></tr>
  <tr><td>1</td><td>PartyX</td><td>7</td></tr>
</table></div>
"#;

    fn pipeline(
        pages: &[(&str, &str)],
        format: OutputFormat,
    ) -> (ElectionPipeline<MockStorage, MockFetcher, MockConfig>, MockStorage) {
        let storage = MockStorage::default();
        let fetcher = MockFetcher {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        };
        (
            ElectionPipeline::new(storage.clone(), fetcher, MockConfig::new(format)),
            storage,
        )
    }

    #[tokio::test]
    async fn test_listing_round_trip_through_fetcher() {
        let listing_url = MockConfig::new(OutputFormat::Csv).listing_url;
        let (pipeline, _) = pipeline(&[(listing_url.as_str(), LISTING)], OutputFormat::Csv);

        let markup = pipeline.extract_listing().await.unwrap();
        let stubs = pipeline.parse_listing(&markup).unwrap();

        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].location, "Alpha");
        assert_eq!(
            stubs[0].detail_link.as_str(),
            "https://www.volby.cz/pls/ps2017nss/ps311?xobec=1"
        );
    }

    #[tokio::test]
    async fn test_extract_detail_parses_fetched_page() {
        let (pipeline, _) = pipeline(
            &[("https://www.volby.cz/pls/ps2017nss/ps311?xobec=1", DETAIL)],
            OutputFormat::Csv,
        );
        let stub = pipeline.parse_listing(LISTING).unwrap().remove(0);

        let detail = pipeline.extract_detail(&stub).await.unwrap();

        assert_eq!((detail.registered, detail.envelopes, detail.valid), (10, 8, 7));
        assert_eq!(detail.parties["1"].name, "PartyX");
    }

    #[tokio::test]
    async fn test_extract_detail_propagates_fetch_failure() {
        let (pipeline, _) = pipeline(&[], OutputFormat::Csv);
        let stub = MunicipalityStub {
            code: "1".to_string(),
            location: "Alpha".to_string(),
            detail_link: Url::parse("https://www.volby.cz/pls/ps2017nss/ps311?xobec=404").unwrap(),
        };

        assert!(pipeline.extract_detail(&stub).await.is_err());
    }

    #[tokio::test]
    async fn test_load_writes_rendered_table() {
        let (pipeline, storage) = pipeline(&[], OutputFormat::Csv);
        let table = ExportTable {
            parties: vec![PartyColumn {
                id: "1".to_string(),
                name: "PartyX".to_string(),
            }],
            rows: vec![OutputRow {
                code: "1".to_string(),
                location: "Alpha".to_string(),
                registered: 10,
                envelopes: 8,
                valid: 7,
                votes: vec![7],
            }],
        };

        let output_path = pipeline.load(table).await.unwrap();

        assert_eq!(output_path, "vysledky.csv");
        let written = String::from_utf8(storage.get_file("vysledky.csv").await.unwrap()).unwrap();
        assert_eq!(
            written,
            "code,location,registered,envelopes,valid,PartyX\n1,Alpha,10,8,7,7\n"
        );
    }

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        async fn write_file(&self, _path: &str, _data: &[u8]) -> Result<String> {
            Err(EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only file system",
            )))
        }
    }

    #[tokio::test]
    async fn test_load_failure_names_destination() {
        let fetcher = MockFetcher {
            pages: HashMap::new(),
        };
        let pipeline =
            ElectionPipeline::new(ReadOnlyStorage, fetcher, MockConfig::new(OutputFormat::Csv));

        let result = pipeline.load(ExportTable::default()).await;

        match result {
            Err(EtlError::ExportFailed { path, .. }) => assert_eq!(path, "vysledky.csv"),
            other => panic!("expected ExportFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_honours_output_format() {
        let (pipeline, storage) = pipeline(&[], OutputFormat::Json);

        pipeline.load(ExportTable::default()).await.unwrap();

        let written = storage.get_file("vysledky.csv").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(value["rows"], serde_json::json!([]));
    }
}
