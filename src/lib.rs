pub mod buffer;
pub mod bz2;
pub mod compress;
pub mod decompress;
pub mod driver;
pub mod engine;
pub mod error;
pub mod lane;
pub mod status;

use std::ops::RangeInclusive;

pub use error::{Error, ErrorKind, Result};
pub use status::Status;

/// The range of valid block sizes, in units of 100k.
pub const BLOCK_SIZES: RangeInclusive<i64> = 0..=9;
/// The range of valid work factors.
pub const WORK_FACTORS: RangeInclusive<i64> = 0..=250;
/// The initial output buffer size used by 'Context::default'.
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 16;

/// Stores the validated parameters of one compression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// Block size in units of 100k.
    block_size: u32,
    /// Controls the effort spent on repetitive inputs.
    work_factor: u32,
    /// The size of the initial output buffer.
    buffer_size: usize,
}

impl Context {
    /// Validates the raw parameters and builds a context. Every parameter is
    /// checked before any codec work is done.
    pub fn new(
        block_size: i64,
        work_factor: i64,
        buffer_size: i64,
    ) -> Result<Self> {
        let block_size = check_range("block_size", block_size, BLOCK_SIZES)?;
        let work_factor =
            check_range("work_factor", work_factor, WORK_FACTORS)?;
        let buffer_size = check_buffer_size(buffer_size)?;
        Ok(Self {
            block_size: block_size as u32,
            work_factor: work_factor as u32,
            buffer_size,
        })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            block_size: 9,
            work_factor: 30,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

fn check_range(
    name: &'static str,
    value: i64,
    range: RangeInclusive<i64>,
) -> Result<i64> {
    if !range.contains(&value) {
        return Err(Error::InvalidArgument {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(value)
}

/// Checks that the initial buffer size is positive and addressable.
pub fn check_buffer_size(buffer_size: i64) -> Result<usize> {
    let value = check_range("buffer_size", buffer_size, 1..=i64::MAX)?;
    usize::try_from(value).map_err(|_| Error::InvalidArgument {
        name: "buffer_size",
        value,
        min: 1,
        max: i64::try_from(usize::MAX).unwrap_or(i64::MAX),
    })
}

/// A live codec stream. The stream is owned by a single compress or
/// decompress invocation, from its creation by a 'Backend' until 'end'.
pub trait Stream {
    /// Runs one codec step: consume from 'input', write into 'output', and
    /// return the codec status. The input passed to consecutive steps is the
    /// unconsumed tail of the same buffer.
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Status;

    /// The number of input bytes consumed since the stream was created.
    fn total_in(&self) -> u64;

    /// The number of output bytes produced since the stream was created.
    fn total_out(&self) -> u64;

    /// Releases the codec state.
    #[must_use]
    fn end(self) -> Status;
}

/// A codec that can open compression and decompression streams.
pub trait Backend {
    type Compressor: Stream;
    type Decompressor: Stream;

    /// Opens a compression stream with the block size and work factor in
    /// 'ctx'. Returns the codec status if the codec rejects the parameters.
    fn compress_init(
        &self,
        ctx: &Context,
    ) -> std::result::Result<Self::Compressor, Status>;

    /// Opens a decompression stream with the default tuning flags.
    fn decompress_init(
        &self,
    ) -> std::result::Result<Self::Decompressor, Status>;
}

/// Compress 'data' with the bzip2 codec. The parameters are validated before
/// the codec is touched.
pub fn compress(
    data: &[u8],
    block_size: i64,
    work_factor: i64,
    buffer_size: i64,
) -> Result<Vec<u8>> {
    let ctx = Context::new(block_size, work_factor, buffer_size)?;
    compress::compress_with(&bz2::Bzip2, data, &ctx)
}

/// Decompress the bzip2 stream in 'data'.
pub fn decompress(data: &[u8], buffer_size: i64) -> Result<Vec<u8>> {
    let buffer_size = check_buffer_size(buffer_size)?;
    decompress::decompress_with(&bz2::Bzip2, data, buffer_size)
}
