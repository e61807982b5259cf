//! A deterministic fake codec for exercising the driver without bzip2.
//!
//! Each stream consumes its whole input on the first step and then produces
//! 'output_len' bytes of a fixed pattern, at most 'chunk' bytes per step.

#![allow(dead_code)]

use bzdrive::{Backend, Context, Status, Stream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Routes the crate's log output through the test harness. Set RUST_LOG to
/// see it.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The byte the fake codec writes at output position 'i'.
pub fn pattern(i: usize) -> u8 {
    (i % 251) as u8
}

#[derive(Default, Debug)]
pub struct Counters {
    pub inits: AtomicUsize,
    pub steps: AtomicUsize,
    pub ends: AtomicUsize,
}

impl Counters {
    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::SeqCst)
    }

    pub fn ends(&self) -> usize {
        self.ends.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct Fake {
    /// Number of bytes each stream produces.
    pub output_len: usize,
    /// Maximum number of bytes produced per step.
    pub chunk: usize,
    /// Fail the n-th step (zero based) with this status.
    pub fail_at: Option<(usize, Status)>,
    /// Reject init with this status.
    pub reject_init: Option<Status>,
    /// The status returned by 'end'.
    pub teardown: Status,
    pub counters: Arc<Counters>,
    /// The size of the output window seen by every step.
    pub windows: Arc<Mutex<Vec<usize>>>,
}

impl Fake {
    pub fn new(output_len: usize, chunk: usize) -> Self {
        Self {
            output_len,
            chunk,
            fail_at: None,
            reject_init: None,
            teardown: Status::Ok,
            counters: Arc::new(Counters::default()),
            windows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn windows(&self) -> Vec<usize> {
        self.windows.lock().unwrap().clone()
    }

    fn open(&self, finishing: bool) -> Result<FakeStream, Status> {
        self.counters.inits.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.reject_init {
            return Err(status);
        }
        Ok(FakeStream {
            cfg: self.clone(),
            finishing,
            steps: 0,
            total_in: 0,
            total_out: 0,
        })
    }
}

pub struct FakeStream {
    cfg: Fake,
    /// Report 'FinishOk' instead of 'Ok', like a finishing compressor.
    finishing: bool,
    steps: usize,
    total_in: u64,
    total_out: u64,
}

impl Stream for FakeStream {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Status {
        self.cfg.counters.steps.fetch_add(1, Ordering::SeqCst);
        self.cfg.windows.lock().unwrap().push(output.len());
        if let Some((n, status)) = self.cfg.fail_at {
            if n == self.steps {
                return status;
            }
        }
        self.steps += 1;
        self.total_in += input.len() as u64;

        let written = self.total_out as usize;
        let len = (self.cfg.output_len - written)
            .min(output.len())
            .min(self.cfg.chunk);
        for (i, byte) in output[..len].iter_mut().enumerate() {
            *byte = pattern(written + i);
        }
        self.total_out += len as u64;

        if self.total_out as usize == self.cfg.output_len {
            Status::StreamEnd
        } else if self.finishing {
            Status::FinishOk
        } else {
            Status::Ok
        }
    }

    fn total_in(&self) -> u64 {
        self.total_in
    }

    fn total_out(&self) -> u64 {
        self.total_out
    }

    fn end(self) -> Status {
        self.cfg.counters.ends.fetch_add(1, Ordering::SeqCst);
        self.cfg.teardown
    }
}

impl Backend for Fake {
    type Compressor = FakeStream;
    type Decompressor = FakeStream;

    fn compress_init(&self, _ctx: &Context) -> Result<FakeStream, Status> {
        self.open(true)
    }

    fn decompress_init(&self) -> Result<FakeStream, Status> {
        self.open(false)
    }
}

/// Generates 'len' bytes of mildly compressible text-like data.
pub fn get_text(len: usize) -> Vec<u8> {
    let words: [&[u8]; 6] = [b"stream ", b"buffer ", b"grow ", b"step ", b"end\n", b"codec "];
    let mut out = Vec::with_capacity(len);
    let mut i = 0;
    while out.len() < len {
        let word = words[(i * 7 + i / 3) % words.len()];
        out.extend_from_slice(word);
        i += 1;
    }
    out.truncate(len);
    out
}
