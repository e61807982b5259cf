//! The stream driver. A codec step can only write into a fixed-size output
//! region. The driver calls the step repeatedly over the whole input and
//! grows the output buffer whenever the codec fills it, until the codec
//! reports the end of the stream.

use crate::buffer::OutputBuffer;
use crate::error::{Error, Result};
use crate::status::Status;
use crate::Stream;

/// Drive 'stream' over 'input' with the step function 'step', writing the
/// output into 'buffer'. The stream must be fresh and the input is the whole
/// input of the operation; consecutive steps receive its unconsumed tail.
///
/// Returns the codec's total output length when the codec reports
/// 'Status::StreamEnd'. Any status other than 'Status::Ok' aborts the drive
/// and is returned as the error. A growth that cannot be allocated aborts
/// with 'Status::MemError'. In every case the buffer stays with the caller,
/// possibly grown, and only the first 'total' bytes are meaningful.
pub fn drive<S, F>(
    stream: &mut S,
    input: &[u8],
    mut step: F,
    buffer: &mut OutputBuffer,
) -> std::result::Result<u64, Status>
where
    S: Stream,
    F: FnMut(&mut S, &[u8], &mut [u8]) -> Status,
{
    debug_assert!(buffer.capacity() > 0, "Empty output buffer");
    let start_in = stream.total_in();
    let start_out = stream.total_out();

    // The number of bytes written since the drive began. The free space
    // handed to the codec is always 'capacity - written'.
    let mut written: usize = 0;
    let mut consumed: usize = 0;

    loop {
        let rest = input.get(consumed..).unwrap_or_default();
        let status = step(stream, rest, buffer.tail_mut(written));

        if status == Status::StreamEnd {
            break;
        }
        if status != Status::Ok {
            log::debug!("Drive aborted with {} at {} bytes", status, written);
            return Err(status);
        }

        let capacity = buffer.capacity();
        let produced = stream.total_out() - start_out;
        let taken = stream.total_in() - start_in;
        if produced > capacity as u64 || taken > input.len() as u64 {
            log::debug!("Codec counters ran past the buffers");
            return Err(Status::SequenceError);
        }
        let progress =
            produced as usize != written || taken as usize != consumed;
        written = produced as usize;
        consumed = taken as usize;

        if written == capacity {
            let new_capacity = buffer.grow()?;
            log::trace!("Grew the buffer {} -> {}", capacity, new_capacity);
        } else if !progress {
            // The codec has free space and input but did nothing. This is
            // how a truncated stream looks to the decompressor.
            log::debug!("Codec stalled after {} bytes", written);
            return Err(Status::UnexpectedEof);
        }
    }

    log::debug!(
        "Drive done: {} bytes in, {} bytes out, {} growth cycles",
        stream.total_in() - start_in,
        stream.total_out() - start_out,
        buffer.growth_cycles()
    );
    Ok(stream.total_out())
}

/// Packages the outcome of a drive. On success, copies the produced bytes
/// into an exactly sized vector. A 'Status::MemError' is an allocation
/// failure only if the buffer failed to grow; otherwise the codec itself
/// reported it. The buffer is released and the stream is
/// ended on every path; a failed teardown is only reported when the drive
/// itself succeeded.
pub fn collect<S: Stream>(
    stream: S,
    buffer: OutputBuffer,
    outcome: std::result::Result<u64, Status>,
) -> Result<Vec<u8>> {
    let res = match outcome {
        Ok(total) => buffer.to_exact(total),
        Err(Status::MemError) => match buffer.failed_growth() {
            Some(requested) => Err(Error::OutOfMemory { requested }),
            None => Err(Error::Codec(Status::MemError)),
        },
        Err(status) => Err(Error::Codec(status)),
    };
    drop(buffer);

    let teardown = stream.end();
    let out = res?;
    if teardown != Status::Ok {
        log::debug!("Codec teardown failed with {}", teardown);
        return Err(Error::Teardown(teardown));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Copies its input through, at most 'chunk' bytes per step.
    struct Passthrough {
        chunk: usize,
        total_in: u64,
        total_out: u64,
    }

    impl Stream for Passthrough {
        fn step(&mut self, input: &[u8], output: &mut [u8]) -> Status {
            if input.is_empty() {
                return Status::StreamEnd;
            }
            let len = input.len().min(output.len()).min(self.chunk);
            output[..len].copy_from_slice(&input[..len]);
            self.total_in += len as u64;
            self.total_out += len as u64;
            Status::Ok
        }

        fn total_in(&self) -> u64 {
            self.total_in
        }

        fn total_out(&self) -> u64 {
            self.total_out
        }

        fn end(self) -> Status {
            Status::Ok
        }
    }

    #[test]
    fn test_drive_copy() {
        let input: Vec<u8> = (0..100).collect();
        let mut stream = Passthrough {
            chunk: 7,
            total_in: 0,
            total_out: 0,
        };
        let mut buffer = OutputBuffer::new(1).unwrap();
        let total = drive(&mut stream, &input, Passthrough::step, &mut buffer);
        assert_eq!(total, Ok(100));
        assert!(buffer.capacity() >= 100);
        assert_eq!(&buffer.as_slice()[..100], &input[..]);
    }

    #[test]
    fn test_drive_stalled() {
        let input = [1, 2, 3];
        let mut stream = Passthrough {
            chunk: 0,
            total_in: 0,
            total_out: 0,
        };
        let mut buffer = OutputBuffer::new(4).unwrap();
        let res = drive(&mut stream, &input, Passthrough::step, &mut buffer);
        assert_eq!(res, Err(Status::UnexpectedEof));
    }
}
