pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when calling the hathi functions.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The query could not be built from the arguments given, no request was made.
    InvalidArgument,
    /// The API responded with a status outside of the success range.
    Http(u16),
    /// The error is associated with an underlying IO or transport error.
    IO,
    /// An error caused when parsing/deserialization fails.
    Deserialize,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Creates an [`ErrorKind::Http`] error carrying the status code and the raw response body.
    pub fn http<S: Into<String>>(status: u16, body: S) -> Self {
        Self::new(ErrorKind::Http(status), body)
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status code when this is an [`ErrorKind::Http`] error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Http(status) => Some(status),
            _ => None,
        }
    }

    /// The raw response body when this is an [`ErrorKind::Http`] error.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self.kind {
            ErrorKind::Http(_) => self.message.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::InvalidArgument => f.write_str("Invalid argument")?,
            ErrorKind::Http(status) => write!(f, "HTTP error (status {status})")?,
            ErrorKind::IO => f.write_str("IO error")?,
            ErrorKind::Deserialize => f.write_str("Deserialize error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
