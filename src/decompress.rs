//! Decompresses a whole bzip2 stream in one drive of a codec stream.

use crate::buffer::OutputBuffer;
use crate::driver::{collect, drive};
use crate::error::{Error, Result};
use crate::{Backend, Stream};

/// Decompress 'input' with a stream opened by 'backend', starting with an
/// output buffer of 'buffer_size' bytes. Decompression has no finishing
/// mode: each step consumes input and produces output until the codec finds
/// the end of the stream or a decoding error.
pub fn decompress_with<B: Backend>(
    backend: &B,
    input: &[u8],
    buffer_size: usize,
) -> Result<Vec<u8>> {
    if buffer_size == 0 {
        return Err(Error::InvalidArgument {
            name: "buffer_size",
            value: 0,
            min: 1,
            max: i64::MAX,
        });
    }

    let mut stream = backend.decompress_init().map_err(Error::Init)?;

    let mut buffer = match OutputBuffer::new(buffer_size) {
        Ok(buffer) => buffer,
        Err(err) => {
            let _ = stream.end();
            return Err(err);
        }
    };

    let step = <B::Decompressor as Stream>::step;
    let outcome = drive(&mut stream, input, step, &mut buffer);
    let out = collect(stream, buffer, outcome)?;
    log::debug!("Decompressed {} bytes into {} bytes", input.len(), out.len());
    Ok(out)
}
