//! The entry point for applications that run many jobs concurrently.
//! Arguments are checked on the calling thread, and the codec work runs on
//! a lane. Jobs share nothing: each one opens its own stream and buffer.

use crate::bz2::Bzip2;
use crate::compress::compress_with;
use crate::decompress::decompress_with;
use crate::error::Result;
use crate::lane::{run, select_lane, Lane};
use crate::{check_buffer_size, Backend, Context};
use std::sync::Arc;

pub struct Engine<B> {
    backend: Arc<B>,
    lane: Arc<dyn Lane>,
}

impl<B> Clone for Engine<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            lane: self.lane.clone(),
        }
    }
}

impl Engine<Bzip2> {
    /// A bzip2 engine on the lane picked by 'select_lane'.
    pub fn bzip2() -> Self {
        Self::new(Bzip2, select_lane())
    }
}

impl<B: Backend + Send + Sync + 'static> Engine<B> {
    pub fn new(backend: B, lane: Arc<dyn Lane>) -> Self {
        Self {
            backend: Arc::new(backend),
            lane,
        }
    }

    pub fn lane(&self) -> &dyn Lane {
        &*self.lane
    }

    /// Compress 'data'. Fails with an argument error, without submitting a
    /// job, if a parameter is out of range.
    pub fn compress(
        &self,
        data: Vec<u8>,
        block_size: i64,
        work_factor: i64,
        buffer_size: i64,
    ) -> Result<Vec<u8>> {
        let ctx = Context::new(block_size, work_factor, buffer_size)?;
        let backend = self.backend.clone();
        log::debug!(
            "Compressing {} bytes on the {} lane",
            data.len(),
            self.lane.name()
        );
        run(&*self.lane, move || compress_with(&*backend, &data, &ctx))?
    }

    /// Decompress 'data'.
    pub fn decompress(
        &self,
        data: Vec<u8>,
        buffer_size: i64,
    ) -> Result<Vec<u8>> {
        let buffer_size = check_buffer_size(buffer_size)?;
        let backend = self.backend.clone();
        log::debug!(
            "Decompressing {} bytes on the {} lane",
            data.len(),
            self.lane.name()
        );
        run(&*self.lane, move || {
            decompress_with(&*backend, &data, buffer_size)
        })?
    }
}
