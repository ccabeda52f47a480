use crate::domain::model::{ExportTable, MunicipalityRecord, OutputRow, PartyColumn};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Ballot numbers compare as integers; anything non-numeric goes last, by text.
fn compare_party_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Union of every record's parties, one column per party id.
///
/// The first name seen for an id is kept.
pub fn party_columns(records: &[MunicipalityRecord]) -> Vec<PartyColumn> {
    let mut names: HashMap<&str, &str> = HashMap::new();

    for record in records {
        for (party_id, party) in record.parties() {
            match names.get(party_id.as_str()) {
                None => {
                    names.insert(party_id, &party.name);
                }
                Some(known) if *known != party.name => {
                    tracing::warn!(
                        "⚠️ Party {} is named '{}' in {} but '{}' elsewhere, keeping the first",
                        party_id,
                        party.name,
                        record.stub.code,
                        known
                    );
                }
                Some(_) => {}
            }
        }
    }

    let mut columns: Vec<PartyColumn> = names
        .into_iter()
        .map(|(id, name)| PartyColumn {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    columns.sort_by(|a, b| compare_party_ids(&a.id, &b.id));
    columns
}

/// Projects every record onto the shared party column set, zero-filling absent parties.
pub fn flatten(records: &[MunicipalityRecord]) -> ExportTable {
    let parties = party_columns(records);

    let rows = records
        .iter()
        .map(|record| OutputRow {
            code: record.stub.code.clone(),
            location: record.stub.location.clone(),
            registered: record.registered(),
            envelopes: record.envelopes(),
            valid: record.valid(),
            votes: parties.iter().map(|p| record.votes_for(&p.id)).collect(),
        })
        .collect();

    tracing::debug!(
        "Flattened {} municipalities into {} party columns",
        records.len(),
        parties.len()
    );

    ExportTable { parties, rows }
}
