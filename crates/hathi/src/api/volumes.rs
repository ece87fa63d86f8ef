use log::{info, trace};
use serde_json::Value;

use crate::{Error, Query};

use super::Client;

pub(crate) fn get_volumes<C: Client>(client: &C, query: &Query) -> Result<Value, Error> {
    let url = query.url()?;
    info!("Requesting '{url}'");

    let volumes = client.get_json(&url)?;
    trace!("Request was successful");

    Ok(volumes)
}
