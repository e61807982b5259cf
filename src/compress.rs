//! Compresses a whole buffer in one drive of a codec stream.

use crate::buffer::OutputBuffer;
use crate::driver::{collect, drive};
use crate::error::{Error, Result};
use crate::status::Status;
use crate::{Backend, Context, Stream};

/// The compress step. Every call requests that the stream be finished, and
/// 'Status::FinishOk' (more output pending) continues the drive. Only
/// 'Status::StreamEnd' completes it.
pub fn finish_step<S: Stream>(
    stream: &mut S,
    input: &[u8],
    output: &mut [u8],
) -> Status {
    match stream.step(input, output) {
        Status::FinishOk => Status::Ok,
        status => status,
    }
}

/// Compress 'input' with a stream opened by 'backend' using the parameters
/// in 'ctx', and return the compressed bytes. No partial output is returned
/// on failure.
pub fn compress_with<B: Backend>(
    backend: &B,
    input: &[u8],
    ctx: &Context,
) -> Result<Vec<u8>> {
    let mut stream = backend.compress_init(ctx).map_err(Error::Init)?;

    let mut buffer = match OutputBuffer::new(ctx.buffer_size()) {
        Ok(buffer) => buffer,
        Err(err) => {
            let _ = stream.end();
            return Err(err);
        }
    };

    let outcome = drive(&mut stream, input, finish_step, &mut buffer);
    let out = collect(stream, buffer, outcome)?;
    log::debug!("Compressed {} bytes into {} bytes", input.len(), out.len());
    Ok(out)
}
