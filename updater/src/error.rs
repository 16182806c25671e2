use common::camera::TimezoneError;
use thiserror::Error;

use crate::http::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    RemoteUnavailable,
    MalformedResponse,
    DeviceRejected,
    UnknownTimezoneId,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration. {0}")]
    InvalidConfiguration(String),

    #[error("remote unavailable. {0}")]
    RemoteUnavailable(#[from] FetchError),

    #[error("malformed response. {0}")]
    MalformedResponse(String),

    #[error("device rejected the request (status {0:?}).")]
    DeviceRejected(Option<String>),

    #[error("camera reports timezone id {0} which is not listed on its time settings page.")]
    UnknownTimezoneId(u32),

    #[error("{op} failed. {source}")]
    Op { op: &'static str, source: Box<Error> },
}

impl Error {
    /// The failure at the bottom of any `Op` wrapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Error::RemoteUnavailable(_) => ErrorKind::RemoteUnavailable,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::DeviceRejected(_) => ErrorKind::DeviceRejected,
            Error::UnknownTimezoneId(_) => ErrorKind::UnknownTimezoneId,
            Error::Op { source, .. } => source.kind(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedResponse(e.to_string())
    }
}

impl From<TimezoneError> for Error {
    fn from(e: TimezoneError) -> Self {
        Error::MalformedResponse(e.to_string())
    }
}

/// Attaches the name of the failing operation.
pub trait Op<T> {
    fn op(self, op: &'static str) -> Result<T, Error>;
}

impl<T, E: Into<Error>> Op<T> for Result<T, E> {
    fn op(self, op: &'static str) -> Result<T, Error> {
        self.map_err(|e| Error::Op { op, source: Box::new(e.into()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_looks_through_operations() {
        let e: Result<(), Error> = Err(Error::UnknownTimezoneId(9));
        let e = e.op("current_timezone").op("update_day_timings").unwrap_err();
        assert_eq!(e.kind(), ErrorKind::UnknownTimezoneId);
        assert_eq!(
            e.to_string(),
            "update_day_timings failed. current_timezone failed. camera reports timezone id 9 which is not listed on its time settings page."
        );
    }

    #[test]
    fn json_errors_are_malformed_responses() {
        let e: Error = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert_eq!(e.kind(), ErrorKind::MalformedResponse);
    }
}
