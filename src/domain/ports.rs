use crate::config::toml_config::{OutputFormat, SelectorConfig};
use crate::domain::model::{ElectionDetail, ExportTable, MunicipalityRecord, MunicipalityStub};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path` as a whole; a failed write leaves nothing at `path`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn selectors(&self) -> &SelectorConfig;
    fn output_format(&self) -> OutputFormat;
}

/// Retrieves the raw markup of one page. A single attempt, no retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// A node of a parsed page that can be queried with CSS selectors.
pub trait Element: Sized {
    fn select_all(&self, selector: &str) -> Vec<Self>;

    fn select_first(&self, selector: &str) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }

    /// Concatenated text of the node; with `strip` every text piece is trimmed first.
    fn text(&self, strip: bool) -> String;

    fn attr(&self, name: &str) -> Option<String>;
}

pub trait Document {
    type Element<'a>: Element
    where
        Self: 'a;

    fn select_all(&self, selector: &str) -> Vec<Self::Element<'_>>;

    fn select_first(&self, selector: &str) -> Option<Self::Element<'_>> {
        self.select_all(selector).into_iter().next()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn listing_url(&self) -> &str;
    async fn extract_listing(&self) -> Result<String>;
    fn parse_listing(&self, markup: &str) -> Result<Vec<MunicipalityStub>>;
    async fn extract_detail(&self, stub: &MunicipalityStub) -> Result<ElectionDetail>;
    fn transform(&self, records: &[MunicipalityRecord]) -> ExportTable;
    async fn load(&self, table: ExportTable) -> Result<String>;
}
