use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;

pub(crate) mod volumes;

use crate::{Error, ErrorKind};

/// Blocking HTTP access used by the query functions.
pub trait Client {
    /// Performs a GET and returns the body as text.
    ///
    /// # Errors
    ///
    /// Implementations return [`ErrorKind::Http`] for responses outside the success range and
    /// [`ErrorKind::IO`] for transport failures.
    fn get_text(&self, url: &str) -> Result<String, Error>;

    /// Performs a GET and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Any error from [`Client::get_text`], or [`ErrorKind::Deserialize`] when the body is not
    /// valid JSON for `T`.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let text = self.get_text(url)?;
        serde_json::from_str(&text).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        let status = resp.status();
        debug!("Response status {status}");

        let text = resp
            .text()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

        check_status(status.as_u16(), text)
    }
}

/// Passes the body through for success statuses, otherwise turns it into an
/// [`ErrorKind::Http`] error.
pub(crate) fn check_status(status: u16, body: String) -> Result<String, Error> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(Error::http(status, body))
    }
}

/// Transport settings handed to the underlying HTTP client.
///
/// Every field is optional and passed straight through; nothing here adds retries or caching.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Total time allowed for a request.
    pub timeout: Option<Duration>,
    /// Time allowed to establish the connection.
    pub connect_timeout: Option<Duration>,
    /// Proxy used for all requests, e.g. `http://localhost:3128`.
    pub proxy: Option<String>,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Log the bytes read and written on the connection at trace level.
    pub verbose: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            proxy: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
            verbose: false,
        }
    }
}

impl ClientOptions {
    /// Builds a blocking client from these options.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the proxy URL is invalid or the client
    /// cannot be initialised.
    pub fn build(&self) -> Result<reqwest::blocking::Client, Error> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .connection_verbose(self.verbose);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(|e| Error::wrap(ErrorKind::IO, e))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK,
};
