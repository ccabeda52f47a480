use crate::core::{MunicipalityRecord, Pipeline};
use crate::utils::error::{EtlError, Result};
use std::sync::{Mutex, PoisonError};

/// Progress of one scraping run. A run only moves forward; `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ListingFetched,
    ListingParsed,
    DetailsProcessed,
    Exported,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: String,
    pub municipalities: usize,
    pub failed_details: usize,
    pub party_columns: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    state: Mutex<RunState>,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            state: Mutex::new(RunState::Idle),
        }
    }

    /// Where the last run stopped; `Idle` before the first one.
    pub fn state(&self) -> RunState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self, next: RunState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!("Run state: {:?} -> {:?}", *state, next);
        *state = next;
    }

    fn fail(&self, error: EtlError) -> EtlError {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::error!("❌ Run failed in state {:?}: {}", *state, error);
        *state = RunState::Failed;
        error
    }

    /// Listing, then every detail page in listing order, then one export.
    ///
    /// A missing listing or an empty one ends the run before any detail is
    /// requested. A municipality whose detail page fails keeps zero counts.
    pub async fn run(&self) -> Result<RunReport> {
        self.advance(RunState::Idle);
        let listing_url = self.pipeline.listing_url().to_string();

        tracing::info!("Stahuji hlavní stránku: {}", listing_url);
        let markup = match self.pipeline.extract_listing().await {
            Ok(markup) => markup,
            Err(e) => {
                return Err(self.fail(EtlError::ListingUnavailable {
                    url: listing_url,
                    source: Box::new(e),
                }))
            }
        };
        self.advance(RunState::ListingFetched);

        tracing::info!("Získávám seznam obcí...");
        let stubs = match self.pipeline.parse_listing(&markup) {
            Ok(stubs) if stubs.is_empty() => {
                return Err(self.fail(EtlError::NoMunicipalities { url: listing_url }))
            }
            Ok(stubs) => stubs,
            Err(e) => return Err(self.fail(e)),
        };
        self.advance(RunState::ListingParsed);

        let total = stubs.len();
        let mut records: Vec<MunicipalityRecord> = stubs.into_iter().map(Into::into).collect();

        tracing::info!("--- Zahajuji stahování detailů pro všechny obce ---");
        for (index, record) in records.iter_mut().enumerate() {
            tracing::info!(
                "[{}/{}] Zpracovávám obec {} ({})",
                index + 1,
                total,
                record.stub.location,
                record.stub.code
            );

            match self.pipeline.extract_detail(&record.stub).await {
                Ok(detail) => record.merge_detail(detail),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Detail for {} ({}) unavailable, exporting zero counts: {}",
                        record.stub.location,
                        record.stub.code,
                        e
                    );
                }
            }
        }
        let failed_details = records.iter().filter(|r| !r.has_detail()).count();
        self.advance(RunState::DetailsProcessed);
        tracing::info!("Stahování detailů dokončeno.");

        let table = self.pipeline.transform(&records);
        let party_columns = table.parties.len();

        let output_path = match self.pipeline.load(table).await {
            Ok(path) => path,
            Err(e) => return Err(self.fail(e)),
        };
        self.advance(RunState::Exported);
        tracing::info!("Data byla úspěšně uložena do {}.", output_path);

        self.advance(RunState::Done);
        Ok(RunReport {
            output_path,
            municipalities: total,
            failed_details,
            party_columns,
        })
    }
}
