//! Return codes of a codec step, numbered the way libbz2 numbers them.

use std::fmt;

/// The result of one codec operation (init, step or end).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The step made progress and may be called again.
    Ok,
    RunOk,
    FlushOk,
    /// A finishing compress step made progress but has more to flush.
    FinishOk,
    /// All input was consumed and all output was flushed.
    StreamEnd,
    SequenceError,
    ParamError,
    MemError,
    DataError,
    DataErrorMagic,
    /// The input ended before the end of the compressed stream.
    UnexpectedEof,
}

impl Status {
    /// Returns the bzlib.h constant for this status.
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::RunOk => 1,
            Status::FlushOk => 2,
            Status::FinishOk => 3,
            Status::StreamEnd => 4,
            Status::SequenceError => -1,
            Status::ParamError => -2,
            Status::MemError => -3,
            Status::DataError => -4,
            Status::DataErrorMagic => -5,
            Status::UnexpectedEof => -7,
        }
    }

    /// Returns true for the statuses that do not indicate a failure.
    pub fn is_ok(self) -> bool {
        self.code() >= 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "BZ_OK",
            Status::RunOk => "BZ_RUN_OK",
            Status::FlushOk => "BZ_FLUSH_OK",
            Status::FinishOk => "BZ_FINISH_OK",
            Status::StreamEnd => "BZ_STREAM_END",
            Status::SequenceError => "BZ_SEQUENCE_ERROR",
            Status::ParamError => "BZ_PARAM_ERROR",
            Status::MemError => "BZ_MEM_ERROR",
            Status::DataError => "BZ_DATA_ERROR",
            Status::DataErrorMagic => "BZ_DATA_ERROR_MAGIC",
            Status::UnexpectedEof => "BZ_UNEXPECTED_EOF",
        };
        write!(f, "{} ({})", name, self.code())
    }
}
