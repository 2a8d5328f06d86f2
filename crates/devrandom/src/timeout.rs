// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Bounded-latency reads.
//!
//! Device reads expose no cancellation, so the read runs on a worker thread
//! and the caller stops waiting when the deadline passes. A timed-out worker
//! is abandoned: it finishes its read in the background and its bytes are
//! discarded.
//!
//! The abandoned worker keeps the generator lock until its read returns.
//! Until then every other call on the same generator blocks, including
//! [`close`](DevRandom::close), [`state`](DevRandom::state), `Debug`
//! formatting and further reads. A timeout bounds how long the caller waits,
//! not how long the device stays busy.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::DeviceError;
use crate::generator::DevRandom;
use crate::traits::RandomDevice;

/// Reads `count` bytes, giving up after `timeout`.
///
/// On timeout the generator stays locked by the abandoned read; see the
/// module docs.
///
/// # Errors
///
/// - [`DeviceError::TimedOut`] if the read did not finish in time.
/// - [`DeviceError::IoFailure`] if the worker could not be spawned or died
///   before reporting.
/// - Any error the read itself produced.
pub fn next_bytes_timeout<D>(
    rng: &Arc<DevRandom<D>>,
    count: usize,
    timeout: Duration,
) -> Result<Vec<u8>, DeviceError>
where
    D: RandomDevice + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker_rng = Arc::clone(rng);

    thread::Builder::new()
        .name("devrandom-read".into())
        .spawn(move || {
            // The receiver is gone if the caller already timed out.
            let _ = tx.send(worker_rng.next_bytes(count));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!("device read of {} bytes timed out after {:?}", count, timeout);
            Err(DeviceError::TimedOut)
        }
        Err(RecvTimeoutError::Disconnected) => Err(DeviceError::IoFailure(io::Error::other(
            "read worker exited without a result",
        ))),
    }
}
