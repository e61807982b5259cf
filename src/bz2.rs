//! The bzip2 backend. Wraps the raw libbz2 streams of the 'bzip2' crate.

use crate::status::Status;
use crate::{Backend, Context, Stream};
use bzip2::{Action, Compression};

/// Decompression always uses the fast algorithm, not the low-memory one.
pub const SMALL_DECOMPRESS: bool = false;

/// The libbz2 codec.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bzip2;

/// Maps the status of a raw bzip2 call to a 'Status'.
fn map_status(res: Result<bzip2::Status, bzip2::Error>) -> Status {
    match res {
        Ok(bzip2::Status::Ok) => Status::Ok,
        Ok(bzip2::Status::RunOk) => Status::RunOk,
        Ok(bzip2::Status::FlushOk) => Status::FlushOk,
        Ok(bzip2::Status::FinishOk) => Status::FinishOk,
        Ok(bzip2::Status::StreamEnd) => Status::StreamEnd,
        Ok(bzip2::Status::MemNeeded) => Status::MemError,
        Err(bzip2::Error::Sequence) => Status::SequenceError,
        Err(bzip2::Error::Data) => Status::DataError,
        Err(bzip2::Error::DataMagic) => Status::DataErrorMagic,
        Err(bzip2::Error::Param) => Status::ParamError,
    }
}

/// A compression stream. Every step asks libbz2 to finish the stream, so
/// the whole input must be passed to the first step.
pub struct Bz2Compressor {
    inner: bzip2::Compress,
}

impl Stream for Bz2Compressor {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Status {
        map_status(self.inner.compress(input, output, Action::Finish))
    }

    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }

    fn end(self) -> Status {
        // BZ2_bzCompressEnd runs when the stream is dropped.
        drop(self.inner);
        Status::Ok
    }
}

pub struct Bz2Decompressor {
    inner: bzip2::Decompress,
}

impl Stream for Bz2Decompressor {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Status {
        map_status(self.inner.decompress(input, output))
    }

    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }

    fn end(self) -> Status {
        drop(self.inner);
        Status::Ok
    }
}

impl Backend for Bzip2 {
    type Compressor = Bz2Compressor;
    type Decompressor = Bz2Decompressor;

    fn compress_init(&self, ctx: &Context) -> Result<Bz2Compressor, Status> {
        // libbz2 accepts block sizes 1..=9 and work factors 0..=250. The
        // bzip2 crate panics instead of returning BZ_PARAM_ERROR, so reject
        // the parameters here.
        let block_size = ctx.block_size();
        let work_factor = ctx.work_factor();
        if !(1..=9).contains(&block_size) || work_factor > 250 {
            log::debug!(
                "Rejected bzip2 parameters: block size {}, work factor {}",
                block_size,
                work_factor
            );
            return Err(Status::ParamError);
        }
        log::debug!(
            "Opening bzip2 compressor: block size {}00k, work factor {}",
            block_size,
            work_factor
        );
        let level = Compression::new(block_size);
        let inner = bzip2::Compress::new(level, work_factor);
        Ok(Bz2Compressor { inner })
    }

    fn decompress_init(&self) -> Result<Bz2Decompressor, Status> {
        log::debug!("Opening bzip2 decompressor");
        let inner = bzip2::Decompress::new(SMALL_DECOMPRESS);
        Ok(Bz2Decompressor { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_block_size_zero() {
        let ctx = Context::new(0, 30, 16).unwrap();
        assert!(matches!(
            Bzip2.compress_init(&ctx),
            Err(Status::ParamError)
        ));
    }

    #[test]
    fn test_end_after_failure() {
        // The bzip2 crate discards the end status, so teardown reports Ok
        // even for a stream that failed.
        let mut stream = Bzip2.decompress_init().unwrap();
        let mut out = [0u8; 16];
        let status = stream.step(b"not a bzip2 stream", &mut out);
        assert_eq!(status, Status::DataErrorMagic);
        assert_eq!(stream.end(), Status::Ok);
    }
}
