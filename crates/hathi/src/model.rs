//! Typed view of a volumes API response.
//!
//! The query functions return the response as a [`serde_json::Value`] untouched. Use
//! [`Volumes::from_value`] when a typed structure is more convenient.

use std::collections::BTreeMap;

use serde::{de::IgnoredAny, Deserialize, Deserializer};
use serde_json::Value;

use crate::{Error, ErrorKind};

/// Catalog records and digitized items matching a query.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Volumes {
    /// Records keyed by their 9-digit record number.
    #[serde(default)]
    pub records: BTreeMap<String, Record>,
    /// Items in the order the API returned them.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Volumes {
    /// Decodes a parsed response.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Deserialize`] error is returned when `value` does not have the expected
    /// shape.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }

    /// The record an item belongs to.
    #[must_use]
    pub fn record_of(&self, item: &Item) -> Option<&Record> {
        self.records.get(&item.from_record)
    }
}

/// A catalog record, one logical work.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Catalog page of the record.
    #[serde(rename = "recordURL")]
    pub record_url: String,
    /// Title statements.
    #[serde(default)]
    pub titles: Vec<String>,
    /// ISBNs on the record.
    #[serde(default)]
    pub isbns: Vec<String>,
    /// ISSNs on the record.
    #[serde(default)]
    pub issns: Vec<String>,
    /// LCCNs on the record.
    #[serde(default)]
    pub lccns: Vec<String>,
    /// OCLC numbers on the record.
    #[serde(default)]
    pub oclcs: Vec<String>,
    /// Only present in responses from the full API.
    #[serde(rename = "marc-xml", default)]
    pub marc_xml: Option<String>,
}

/// One digitized copy of a work.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Institution the item came from.
    pub orig: String,
    /// Record number of the owning record.
    #[serde(rename = "fromRecord")]
    pub from_record: String,
    /// Volume id.
    pub htid: String,
    /// Handle link to the digitized copy.
    #[serde(rename = "itemURL")]
    pub item_url: String,
    /// Copyright/access status code, e.g. `pd` or `ic`.
    #[serde(rename = "rightsCode")]
    pub rights_code: String,
    /// `YYYYMMDD`.
    #[serde(rename = "lastUpdate")]
    pub last_update: String,
    /// The API sends `false` rather than omitting the field when there is no enumcron.
    #[serde(default, deserialize_with = "string_or_false")]
    pub enumcron: Option<String>,
    /// Human readable rights in the US.
    #[serde(rename = "usRightsString")]
    pub us_rights_string: String,
}

impl Item {
    /// `lastUpdate` split into year, month and day.
    #[must_use]
    pub fn last_update_date(&self) -> Option<(u16, u8, u8)> {
        let s = self.last_update.as_str();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = s[..4].parse::<u16>().ok()?;
        let month = s[4..6].parse::<u8>().ok().filter(|m| (1..=12).contains(m))?;
        let day = s[6..].parse::<u8>().ok().filter(|d| (1..=31).contains(d))?;
        Some((year, month, day))
    }
}

fn string_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Enumcron {
        Text(String),
        Flag(IgnoredAny),
    }

    Ok(match Option::<Enumcron>::deserialize(deserializer)? {
        Some(Enumcron::Text(text)) => Some(text),
        Some(Enumcron::Flag(_)) | None => None,
    })
}
