//! The error type returned by every fallible operation in this crate.
//!
//! Each variant records where the failure came from. Callers that only care
//! about the broad class of failure can use `Error::kind`.

use crate::status::Status;
use thiserror::Error;

/// The broad class of a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter was out of range. No codec work was done.
    Argument,
    /// Memory could not be allocated, or the job could not be run.
    Resource,
    /// The codec rejected its configuration, the data, or its teardown.
    Codec,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument '{name}': {value} is not in {min}..={max}")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("codec initialization failed: {0}")]
    Init(Status),

    #[error("codec step failed: {0}")]
    Codec(Status),

    #[error("out of memory while allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("codec teardown failed: {0}")]
    Teardown(Status),

    #[error("codec reported {reported} bytes, the buffer holds {capacity}")]
    Overrun { reported: u64, capacity: usize },

    #[error("the worker lane dropped the job")]
    LaneClosed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::Argument,
            Error::OutOfMemory { .. }
            | Error::LaneClosed
            | Error::Codec(Status::MemError) => ErrorKind::Resource,
            Error::Init(_)
            | Error::Codec(_)
            | Error::Teardown(_)
            | Error::Overrun { .. } => ErrorKind::Codec,
        }
    }

    /// Returns the codec status behind this error, if there is one.
    pub fn status(&self) -> Option<Status> {
        match self {
            Error::Init(s) | Error::Codec(s) | Error::Teardown(s) => Some(*s),
            Error::OutOfMemory { .. } => Some(Status::MemError),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
