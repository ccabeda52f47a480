use crate::config::toml_config::SelectorConfig;
use crate::domain::model::MunicipalityStub;
use crate::domain::ports::{Document, Element};
use url::Url;

/// Collects the municipalities listed on a territorial unit page.
///
/// Rows without a code link or a name cell (headers, spacers) are skipped, as
/// are rows whose href, code or name is empty. Row order is preserved.
pub fn extract_municipalities<D: Document>(
    doc: &D,
    base_url: &Url,
    selectors: &SelectorConfig,
) -> Vec<MunicipalityStub> {
    let mut municipalities = Vec::new();

    for row in doc.select_all(&selectors.listing_rows) {
        let (Some(link), Some(name_cell)) = (
            row.select_first(&selectors.municipality_link),
            row.select_first(&selectors.municipality_name),
        ) else {
            continue;
        };

        let href = link.attr("href").unwrap_or_default();
        let code = link.text(true);
        let location = name_cell.text(true);

        if href.is_empty() || code.is_empty() || location.is_empty() {
            continue;
        }

        match base_url.join(&href) {
            Ok(detail_link) => municipalities.push(MunicipalityStub {
                code,
                location,
                detail_link,
            }),
            Err(e) => {
                tracing::warn!("Skipping municipality {} with bad link '{}': {}", code, href, e);
            }
        }
    }

    tracing::info!("Nalezeno {} obcí ke zpracování.", municipalities.len());
    municipalities
}
