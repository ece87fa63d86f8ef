//! Building the request URL for the volumes API.
//!
//! A [`Query`] collects identifiers and turns them into one of the two URL shapes understood by
//! the API:
//!
//! - direct: `{base}/api/volumes/{variant}/{kind}/{value}.json`
//! - composite: `{base}/api/volumes/{variant}/json/{arg}|{arg}|...` where each `arg` is
//! `{kind}:{value};{kind}:{value};...`
//!
//! Identifier values are embedded verbatim.

use std::{borrow::Cow, fmt, str::FromStr};

use log::{trace, warn};

use crate::{normalize, Error, ErrorKind};

/// Default location of the catalog.
pub const DEFAULT_BASE_URL: &str = "http://catalog.hathitrust.org";

/// The kind of an identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// OCLC number.
    Oclc,
    /// Library of Congress Control Number.
    Lccn,
    /// International Standard Serial Number.
    Issn,
    /// International Standard Book Number.
    Isbn,
    /// HathiTrust volume id, one digitized copy of a work.
    Htid,
    /// 9-digit catalog record number.
    RecordNumber,
}

impl IdKind {
    /// All identifier kinds.
    pub const ALL: [IdKind; 6] = [
        IdKind::Oclc,
        IdKind::Lccn,
        IdKind::Issn,
        IdKind::Isbn,
        IdKind::Htid,
        IdKind::RecordNumber,
    ];

    /// Label used in the direct URL form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            IdKind::Oclc => "oclc",
            IdKind::Lccn => "lccn",
            IdKind::Issn => "issn",
            IdKind::Isbn => "isbn",
            IdKind::Htid => "htid",
            IdKind::RecordNumber => "recordnumber",
        }
    }

    /// Label used inside a composite argument, where the API calls a volume id `id`.
    #[must_use]
    pub const fn composite_label(self) -> &'static str {
        match self {
            IdKind::Htid => "id",
            kind => kind.label(),
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IdKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("id") {
            return Ok(IdKind::Htid);
        }

        IdKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidArgument,
                    format!("Unknown identifier kind '{s}'"),
                )
            })
    }
}

/// Identifiers that all describe the same item.
///
/// Keeps insertion order, which is the order the `kind:value` pairs are written in. Inserting a
/// kind that is already present replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    entries: Vec<(IdKind, String)>,
}

impl IdentifierSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces the value for `kind`.
    pub fn insert<S: Into<String>>(&mut self, kind: IdKind, value: S) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = value;
        } else {
            self.entries.push((kind, value));
        }
    }

    /// Builder style [`IdentifierSet::insert`].
    #[must_use]
    pub fn with<S: Into<String>>(mut self, kind: IdKind, value: S) -> Self {
        self.insert(kind, value);
        self
    }

    /// Value for `kind`, if present.
    #[must_use]
    pub fn get(&self, kind: IdKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_str())
    }

    /// Number of identifiers in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the set holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(kind, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (IdKind, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// A copy of this set with every value canonicalized, see [`normalize::normalize`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        self.iter()
            .map(|(kind, value)| (kind, normalize::normalize(kind, value)))
            .collect()
    }

    /// Serializes the set as a single composite argument, `kind:value` pairs joined by `;`.
    #[must_use]
    pub fn to_argument(&self) -> String {
        join_pairs(self, ";")
    }
}

impl<S: Into<String>> FromIterator<(IdKind, S)> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = (IdKind, S)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (kind, value) in iter {
            set.insert(kind, value);
        }
        set
    }
}

impl FromStr for IdentifierSet {
    type Err = Error;

    /// Parses `kind:value;kind:value`, the same syntax the API uses for a single argument.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::new();
        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (kind, value) = pair.split_once(':').ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidArgument,
                    format!("Expected 'kind:value' but found '{pair}'"),
                )
            })?;
            set.insert(kind.parse()?, value.trim());
        }

        if set.is_empty() {
            Err(Error::new(
                ErrorKind::InvalidArgument,
                "An identifier set needs at least one identifier",
            ))
        } else {
            Ok(set)
        }
    }
}

fn join_pairs(set: &IdentifierSet, separator: &str) -> String {
    set.iter()
        .map(|(kind, value)| format!("{}:{value}", kind.composite_label()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Which form of the API to ask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Records without MARC-XML.
    #[default]
    Brief,
    /// Records including the `marc-xml` field.
    Full,
}

impl Variant {
    /// The URL path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Brief => "brief",
            Variant::Full => "full",
        }
    }
}

/// How several scalar identifiers are combined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// All identifiers describe one item, pairs are joined by `;`.
    #[default]
    Single,
    /// Each identifier is searched on its own, pairs are joined by `|`.
    Many,
}

impl Mode {
    const fn separator(self) -> &'static str {
        match self {
            Mode::Single => ";",
            Mode::Many => "|",
        }
    }
}

/// A volumes API query.
///
/// Scalar identifiers are kept in the order they were given. When at least one
/// [`IdentifierSet`] is added through [`Query::ids`] or [`Query::id_set`] the scalar
/// identifiers are ignored.
///
/// ```
/// use hathi::Query;
///
/// let url = Query::new().oclc("424023").url().unwrap();
/// assert_eq!(
///     "http://catalog.hathitrust.org/api/volumes/brief/oclc/424023.json",
///     url
/// );
///
/// let url = Query::new().htid("BJD1").oclc("424023").url().unwrap();
/// assert_eq!(
///     "http://catalog.hathitrust.org/api/volumes/brief/json/id:BJD1;oclc:424023",
///     url
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Query {
    scalars: IdentifierSet,
    ids: Vec<IdentifierSet>,
    variant: Variant,
    mode: Mode,
    base_url: String,
    normalize: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            scalars: IdentifierSet::new(),
            ids: Vec::new(),
            variant: Variant::default(),
            mode: Mode::default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            normalize: false,
        }
    }
}

macro_rules! scalar_setters {
    ($($(#[$doc:meta])* $name:ident => $kind:expr,)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name<S: Into<String>>(self, value: S) -> Self {
                self.identifier($kind, value)
            }
        )*
    };
}

impl Query {
    /// Creates an empty query against [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    scalar_setters! {
        /// Sets the OCLC number.
        oclc => IdKind::Oclc,
        /// Sets the LCCN.
        lccn => IdKind::Lccn,
        /// Sets the ISSN.
        issn => IdKind::Issn,
        /// Sets the ISBN.
        isbn => IdKind::Isbn,
        /// Sets the HathiTrust volume id.
        htid => IdKind::Htid,
        /// Sets the catalog record number.
        record_number => IdKind::RecordNumber,
    }

    /// Sets a scalar identifier of any kind.
    #[must_use]
    pub fn identifier<S: Into<String>>(mut self, kind: IdKind, value: S) -> Self {
        self.scalars.insert(kind, value);
        self
    }

    /// Adds one item's identifiers.
    #[must_use]
    pub fn id_set(mut self, set: IdentifierSet) -> Self {
        self.ids.push(set);
        self
    }

    /// Adds the identifiers of several items.
    #[must_use]
    pub fn ids<I: IntoIterator<Item = IdentifierSet>>(mut self, sets: I) -> Self {
        self.ids.extend(sets);
        self
    }

    /// Selects the brief or full API.
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Selects how several scalar identifiers are joined.
    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the catalog location.
    #[must_use]
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Canonicalize identifier values before they are written into the URL.
    ///
    /// Off by default, in which case values are sent exactly as given.
    #[must_use]
    pub const fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Builds the request URL.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::InvalidArgument`] error is returned when no identifiers were given, or
    /// when one of the identifier sets added through [`Query::ids`] is empty.
    pub fn url(&self) -> Result<String, Error> {
        let base = self.base_url.trim_end_matches('/');
        let variant = self.variant.as_str();

        if !self.ids.is_empty() {
            if !self.scalars.is_empty() {
                warn!("Identifier sets supplied - ignoring scalar identifiers");
            }
            if self.ids.iter().any(IdentifierSet::is_empty) {
                return Err(Error::new(
                    ErrorKind::InvalidArgument,
                    "every identifier set needs at least one identifier",
                ));
            }

            let composite = self
                .ids
                .iter()
                .map(|set| self.prepare(set).to_argument())
                .collect::<Vec<_>>()
                .join("|");
            trace!("Composite argument from {} sets: '{composite}'", self.ids.len());
            return Ok(format!("{base}/api/volumes/{variant}/json/{composite}"));
        }

        let scalars = self.prepare(&self.scalars);
        let mut iter = scalars.iter();
        match (iter.next(), iter.next()) {
            (None, _) => Err(Error::new(
                ErrorKind::InvalidArgument,
                "at least one identifier required",
            )),
            (Some((kind, value)), None) => {
                trace!("Single identifier - using the direct URL form");
                Ok(format!("{base}/api/volumes/{variant}/{kind}/{value}.json"))
            }
            _ => {
                let composite = join_pairs(&scalars, self.mode.separator());
                trace!("Composite argument ({:?} mode): '{composite}'", self.mode);
                Ok(format!("{base}/api/volumes/{variant}/json/{composite}"))
            }
        }
    }

    fn prepare<'a>(&self, set: &'a IdentifierSet) -> Cow<'a, IdentifierSet> {
        if self.normalize {
            Cow::Owned(set.normalized())
        } else {
            Cow::Borrowed(set)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IdKind, IdentifierSet, Mode, Query, Variant};
    use crate::ErrorKind;

    const BRIEF: &str = "http://catalog.hathitrust.org/api/volumes/brief";

    #[test]
    fn single_identifier_uses_direct_form() {
        let url = Query::new().oclc("424023").url().unwrap();
        assert_eq!(format!("{BRIEF}/oclc/424023.json"), url);
    }

    #[test]
    fn single_identifier_direct_form_for_every_kind() {
        for kind in IdKind::ALL {
            let url = Query::new().identifier(kind, "value").url().unwrap();
            assert_eq!(format!("{BRIEF}/{}/value.json", kind.label()), url);
        }
    }

    #[test]
    fn single_htid_is_not_renamed() {
        let url = Query::new().htid("mdp.39015").url().unwrap();
        assert_eq!(format!("{BRIEF}/htid/mdp.39015.json"), url);
    }

    #[test]
    fn full_variant_changes_path_segment() {
        let url = Query::new()
            .record_number("000578050")
            .variant(Variant::Full)
            .url()
            .unwrap();
        assert_eq!(
            "http://catalog.hathitrust.org/api/volumes/full/recordnumber/000578050.json",
            url
        );
    }

    #[test]
    fn several_identifiers_single_mode_join_with_semicolon() {
        let url = Query::new().htid("BJD1").oclc("424023").url().unwrap();
        assert_eq!(format!("{BRIEF}/json/id:BJD1;oclc:424023"), url);
    }

    #[test]
    fn several_identifiers_many_mode_join_with_pipe() {
        let url = Query::new()
            .oclc("424023")
            .isbn("0030110408")
            .htid("BJD1")
            .mode(Mode::Many)
            .url()
            .unwrap();
        assert_eq!(format!("{BRIEF}/json/oclc:424023|isbn:0030110408|id:BJD1"), url);
    }

    #[test]
    fn identifier_sets_join_groups_with_pipe() {
        let first = IdentifierSet::new()
            .with(IdKind::Htid, "BJD1")
            .with(IdKind::Oclc, "424023")
            .with(IdKind::Isbn, "0030110408");
        let second = IdentifierSet::new()
            .with(IdKind::Lccn, "70628581")
            .with(IdKind::Isbn, "0030110408");

        let url = Query::new().ids([first, second]).url().unwrap();
        assert_eq!(
            format!("{BRIEF}/json/id:BJD1;oclc:424023;isbn:0030110408|lccn:70628581;isbn:0030110408"),
            url
        );
    }

    #[test]
    fn single_identifier_set_still_uses_composite_form() {
        let set = IdentifierSet::new().with(IdKind::Oclc, "424023");
        let url = Query::new().id_set(set).url().unwrap();
        assert_eq!(format!("{BRIEF}/json/oclc:424023"), url);
    }

    #[test]
    fn identifier_sets_take_precedence_over_scalars() {
        let set = IdentifierSet::new().with(IdKind::Lccn, "70628581");
        let url = Query::new().oclc("424023").id_set(set).url().unwrap();
        assert_eq!(format!("{BRIEF}/json/lccn:70628581"), url);
    }

    #[test]
    fn mode_does_not_affect_identifier_sets() {
        let set = IdentifierSet::new()
            .with(IdKind::Oclc, "1")
            .with(IdKind::Isbn, "2");
        let url = Query::new().id_set(set).mode(Mode::Many).url().unwrap();
        assert_eq!(format!("{BRIEF}/json/oclc:1;isbn:2"), url);
    }

    #[test]
    fn htid_rename_leaves_values_untouched() {
        let url = Query::new()
            .htid("htid.123")
            .oclc("htid")
            .url()
            .unwrap();
        assert_eq!(format!("{BRIEF}/json/id:htid.123;oclc:htid"), url);
    }

    #[test]
    fn no_identifiers_is_invalid_argument() {
        let err = Query::new().url().expect_err("empty query cannot build a url");
        assert_eq!(ErrorKind::InvalidArgument, err.kind());
    }

    #[test]
    fn empty_identifier_set_is_invalid_argument() {
        let err = Query::new()
            .id_set(IdentifierSet::new())
            .url()
            .expect_err("empty set cannot build a url");
        assert_eq!(ErrorKind::InvalidArgument, err.kind());
    }

    #[test]
    fn repeated_kind_replaces_value_in_place() {
        let url = Query::new()
            .oclc("1")
            .isbn("2")
            .oclc("3")
            .url()
            .unwrap();
        assert_eq!(format!("{BRIEF}/json/oclc:3;isbn:2"), url);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let url = Query::new()
            .oclc("424023")
            .base_url("http://localhost:8080/")
            .url()
            .unwrap();
        assert_eq!("http://localhost:8080/api/volumes/brief/oclc/424023.json", url);
    }

    #[test]
    fn values_are_verbatim_unless_normalized() {
        let query = Query::new().isbn("0-03-011040-8");
        assert_eq!(format!("{BRIEF}/isbn/0-03-011040-8.json"), query.url().unwrap());

        let query = query.normalize(true);
        assert_eq!(format!("{BRIEF}/isbn/0030110408.json"), query.url().unwrap());
    }

    #[test]
    fn identifier_kind_parses_labels_and_id_alias() {
        assert_eq!(IdKind::Htid, "id".parse().unwrap());
        assert_eq!(IdKind::Htid, "HTID".parse().unwrap());
        assert_eq!(IdKind::RecordNumber, "recordnumber".parse().unwrap());

        let err = "doi".parse::<IdKind>().unwrap_err();
        assert_eq!(ErrorKind::InvalidArgument, err.kind());
    }

    #[test]
    fn identifier_set_parses_argument_syntax() {
        let set: IdentifierSet = "htid:BJD1; oclc:424023;isbn:0030110408".parse().unwrap();

        assert_eq!(3, set.len());
        assert_eq!(Some("BJD1"), set.get(IdKind::Htid));
        assert_eq!("id:BJD1;oclc:424023;isbn:0030110408", set.to_argument());
    }

    #[test]
    fn identifier_set_parse_rejects_bad_input() {
        assert!("".parse::<IdentifierSet>().is_err());
        assert!("oclc".parse::<IdentifierSet>().is_err());
        assert!("doi:10.1000/1".parse::<IdentifierSet>().is_err());
    }
}
