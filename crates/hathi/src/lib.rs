#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # hathi
//!
//! hathi is a client for the HathiTrust Bib API. A [`Query`] collects bibliographic identifiers
//! (OCLC number, LCCN, ISSN, ISBN, HathiTrust volume id or record number), builds the request
//! URL for the brief or full API and the `volumes*` functions perform the request and return the
//! parsed JSON.
//!
//! ```no_run
//! use hathi::{IdKind, IdentifierSet, Query, Variant};
//!
//! // one identifier
//! let volumes = hathi::volumes(&Query::new().oclc("424023"))?;
//!
//! // several identifiers for several items
//! let query = Query::new()
//!     .id_set("htid:BJD1;oclc:424023".parse()?)
//!     .id_set(IdentifierSet::new().with(IdKind::Lccn, "70628581"))
//!     .variant(Variant::Full);
//! let volumes = hathi::volumes(&query)?;
//! # Ok::<(), hathi::Error>(())
//! ```

mod api;
mod error;
pub mod model;
pub mod normalize;
mod query;

pub use api::{Client, ClientOptions};
pub use error::{Error, ErrorKind};
pub use model::Volumes;
pub use query::{IdKind, IdentifierSet, Mode, Query, Variant, DEFAULT_BASE_URL};

use log::trace;
use serde_json::Value;

/// Search the volumes API using a default client.
///
/// # Errors
///
/// An [`ErrorKind::InvalidArgument`] error is returned when the query has no identifiers, no
/// request is made in this case.
/// An [`ErrorKind::Http`] error is returned when the API responds with a non success status.
/// An [`ErrorKind::IO`] error is returned when the request cannot be sent.
/// An [`ErrorKind::Deserialize`] error is returned when the response is not valid JSON.
#[inline]
pub fn volumes(query: &Query) -> Result<Value, Error> {
    volumes_with(query, &ClientOptions::default())
}

/// Search the volumes API with the given transport options.
///
/// # Errors
///
/// As [`volumes`], and an [`ErrorKind::IO`] error when `options` cannot build a client.
#[inline]
pub fn volumes_with(query: &Query, options: &ClientOptions) -> Result<Value, Error> {
    trace!("Search volumes with {query:?}");
    // Build the URL first so an empty query never constructs a client.
    query.url()?;
    let client = options.build()?;
    api::volumes::get_volumes(&client, query)
}

/// Search the volumes API with a caller provided [`Client`].
///
/// # Errors
///
/// As [`volumes`].
#[inline]
pub fn volumes_from<C: Client>(client: &C, query: &Query) -> Result<Value, Error> {
    trace!("Search volumes with {query:?} using a custom client");
    api::volumes::get_volumes(client, query)
}

/// Search the volumes API and decode the response into [`Volumes`].
///
/// # Errors
///
/// As [`volumes_with`], and an [`ErrorKind::Deserialize`] error when the response does not
/// have the expected shape.
#[inline]
pub fn volumes_typed(query: &Query, options: &ClientOptions) -> Result<Volumes, Error> {
    volumes_with(query, options).and_then(Volumes::from_value)
}
