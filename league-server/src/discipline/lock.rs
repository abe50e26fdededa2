//! Season-scoped locks
//!
//! - 每个赛季一个 `tokio::sync::Mutex`，串行化写路径 (重算 / 完赛通知)
//! - 重算另有 in-flight 标记：同一赛季的第二次重算立即拒绝，而不是排队

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SeasonLocks {
    mutexes: Arc<DashMap<i64, Arc<Mutex<()>>>>,
    in_flight: Arc<DashMap<i64, ()>>,
}

impl SeasonLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn mutex(&self, season_id: i64) -> Arc<Mutex<()>> {
        self.mutexes
            .entry(season_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Wait for exclusive write access to a season
    pub async fn lock(&self, season_id: i64) -> OwnedMutexGuard<()> {
        self.mutex(season_id).lock_owned().await
    }

    /// Mark a recalculation as running. `None` if one is already in flight.
    pub fn try_begin_recalc(&self, season_id: i64) -> Option<RecalcGuard> {
        match self.in_flight.entry(season_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(RecalcGuard {
                    in_flight: self.in_flight.clone(),
                    season_id,
                })
            }
        }
    }
}

/// Clears the in-flight marker when dropped (also on error or panic)
#[derive(Debug)]
pub struct RecalcGuard {
    in_flight: Arc<DashMap<i64, ()>>,
    season_id: i64,
}

impl Drop for RecalcGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.season_id);
    }
}
