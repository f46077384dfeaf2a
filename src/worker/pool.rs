//! Fixed-size pool of geometry workers
//!
//! Backed by a dedicated rayon thread pool: task groups beyond the pool size
//! queue instead of spawning more threads, and one pool serves every map
//! load. Results come back over an mpsc channel tagged with their group
//! index, in completion order.

use super::protocol::{ExtrudeSettings, GeometryRequest, GeometryResponse, WorkerMessage};
use crate::draw::generation::run_geometry_task;
use crate::error::GroupError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;

pub struct WorkerPool {
    pool: rayon::ThreadPool,
    size: usize,
}

impl WorkerPool {
    /// Start `size` worker threads (at least one)
    pub fn new(size: usize) -> anyhow::Result<Self> {
        let size = size.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("map-geometry-{}", i))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to start geometry workers: {}", e))?;

        tracing::debug!(workers = size, "geometry worker pool started");
        Ok(Self { pool, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a task group; its result is sent on `tx` when done
    pub fn submit(
        &self,
        group: usize,
        request: GeometryRequest,
        settings: ExtrudeSettings,
        tx: Sender<WorkerMessage>,
    ) {
        self.submit_job(group, tx, move || run_geometry_task(request, &settings));
    }

    /// Run `job` on the pool, turning a panic into a group failure
    pub(crate) fn submit_job<F>(&self, group: usize, tx: Sender<WorkerMessage>, job: F)
    where
        F: FnOnce() -> GeometryResponse + Send + 'static,
    {
        self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job)).map_err(|payload| {
                GroupError::WorkerPanicked {
                    message: panic_message(payload.as_ref()),
                }
            });

            // The receiver is gone when the caller dropped the pending load
            if tx.send(WorkerMessage { group, outcome }).is_err() {
                tracing::debug!(group, "discarding task group result, receiver dropped");
            }
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
