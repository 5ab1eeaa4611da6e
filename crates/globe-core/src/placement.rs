//! Staggered placement of pins so texture decoding is spread over time.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    pub placed: usize,
    pub rejected: usize,
}

/// Places items one at a time with a fixed pause between consecutive
/// placements. A scheduler is consumed by `place_all` and cannot be
/// restarted.
#[derive(Debug)]
pub struct SequentialPlacement {
    interval: Duration,
}

impl SequentialPlacement {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Call `place(index, item)` for each item in order, awaiting
    /// `sleep(interval)` between placements. `sleep` must yield to the host
    /// event loop so frames keep rendering. A failed placement is logged and
    /// counted; the sequence continues.
    pub async fn place_all<T, I, P, S, F>(self, items: I, mut place: P, mut sleep: S) -> PlacementSummary
    where
        I: IntoIterator<Item = T>,
        P: FnMut(usize, T) -> Result<()>,
        S: FnMut(Duration) -> F,
        F: Future<Output = ()>,
    {
        let mut summary = PlacementSummary::default();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                sleep(self.interval).await;
            }
            match place(index, item) {
                Ok(()) => summary.placed += 1,
                Err(e) => {
                    log::warn!("[place] pin {} rejected: {}", index, e);
                    summary.rejected += 1;
                }
            }
        }
        log::info!(
            "[place] done: placed={} rejected={}",
            summary.placed,
            summary.rejected
        );
        summary
    }
}
