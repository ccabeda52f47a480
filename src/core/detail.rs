use crate::config::toml_config::SelectorConfig;
use crate::core::normalize::clean_number;
use crate::domain::model::{ElectionDetail, PartyResult};
use crate::domain::ports::{Document, Element};

/// Placeholder the results site prints in place of a withdrawn party.
pub const INVALID_PARTY_NAME: &str = "-";

const HEADER_ROWS: usize = 1;
const MIN_CELLS_PER_ROW: usize = 3;

fn count_field<D: Document>(doc: &D, selector: &str) -> u64 {
    doc.select_first(selector)
        .map(|cell| clean_number(&cell.text(false)))
        .unwrap_or(0)
}

/// Reads the voter statistics and every party's vote count from a municipality page.
///
/// Missing fields come back as zero and missing tables as an empty party map.
pub fn extract_detail<D: Document>(doc: &D, selectors: &SelectorConfig) -> ElectionDetail {
    let mut detail = ElectionDetail {
        registered: count_field(doc, &selectors.registered),
        envelopes: count_field(doc, &selectors.envelopes),
        valid: count_field(doc, &selectors.valid),
        ..ElectionDetail::default()
    };

    for container in doc.select_all(&selectors.party_container) {
        let Some(table) = container.select_first(&selectors.party_table) else {
            continue;
        };

        for row in table.select_all(&selectors.party_row).into_iter().skip(HEADER_ROWS) {
            let cells = row.select_all(&selectors.party_cell);
            if cells.len() < MIN_CELLS_PER_ROW {
                continue;
            }

            let party_id = cells[0].text(true);
            let name = cells[1].text(true);
            let votes = clean_number(&cells[2].text(true));

            if name.is_empty() || name == INVALID_PARTY_NAME {
                continue;
            }

            if let Some(previous) = detail
                .parties
                .insert(party_id.clone(), PartyResult { name, votes })
            {
                tracing::debug!(
                    "Party {} listed twice, replacing '{}' ({} votes)",
                    party_id,
                    previous.name,
                    previous.votes
                );
            }
        }
    }

    detail
}
