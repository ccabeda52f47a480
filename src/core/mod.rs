pub mod detail;
pub mod etl;
pub mod export;
#[cfg(test)]
pub(crate) mod fake_document;
pub mod flatten;
pub mod listing;
pub mod normalize;
pub mod pipeline;

pub use crate::domain::model::{
    ElectionDetail, ExportTable, MunicipalityRecord, MunicipalityStub, OutputRow, PartyColumn,
    PartyResult,
};
pub use crate::domain::ports::{ConfigProvider, Document, Element, PageFetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
