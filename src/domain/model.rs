use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

pub const BASE_COLUMNS: [&str; 5] = ["code", "location", "registered", "envelopes", "valid"];

/// One row of the territorial unit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityStub {
    pub code: String,
    pub location: String,
    pub detail_link: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyResult {
    pub name: String,
    pub votes: u64,
}

/// Voter statistics and party results scraped from one municipality page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectionDetail {
    pub registered: u64,
    pub envelopes: u64,
    pub valid: u64,
    /// Keyed by the party's ballot number as printed on the page.
    pub parties: BTreeMap<String, PartyResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRecord {
    pub stub: MunicipalityStub,
    pub detail: Option<ElectionDetail>,
}

impl From<MunicipalityStub> for MunicipalityRecord {
    fn from(stub: MunicipalityStub) -> Self {
        Self { stub, detail: None }
    }
}

impl MunicipalityRecord {
    pub fn merge_detail(&mut self, detail: ElectionDetail) {
        self.detail = Some(detail);
    }

    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }

    pub fn registered(&self) -> u64 {
        self.detail.as_ref().map_or(0, |d| d.registered)
    }

    pub fn envelopes(&self) -> u64 {
        self.detail.as_ref().map_or(0, |d| d.envelopes)
    }

    pub fn valid(&self) -> u64 {
        self.detail.as_ref().map_or(0, |d| d.valid)
    }

    pub fn parties(&self) -> impl Iterator<Item = (&String, &PartyResult)> {
        self.detail.iter().flat_map(|d| d.parties.iter())
    }

    pub fn votes_for(&self, party_id: &str) -> u64 {
        self.detail
            .as_ref()
            .and_then(|d| d.parties.get(party_id))
            .map_or(0, |p| p.votes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyColumn {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub code: String,
    pub location: String,
    pub registered: u64,
    pub envelopes: u64,
    pub valid: u64,
    /// Aligned with `ExportTable::parties`.
    pub votes: Vec<u64>,
}

impl OutputRow {
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.code.clone(),
            self.location.clone(),
            self.registered.to_string(),
            self.envelopes.to_string(),
            self.valid.to_string(),
        ];
        fields.extend(self.votes.iter().map(u64::to_string));
        fields
    }
}

/// Dense table produced by flattening every municipality's party results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTable {
    pub parties: Vec<PartyColumn>,
    pub rows: Vec<OutputRow>,
}

impl ExportTable {
    pub fn headers(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.parties.iter().map(|p| p.name.clone()))
            .collect()
    }
}
