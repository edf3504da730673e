//! Provisioning reconciliation: keep the number of open lanes on target.
//!
//! # Counting
//!
//! A lane counts as open from the tick it is activated until it is told to
//! close (`open_for_entry`), whether or not it is taking customers yet.
//! Draining lanes do not count, so closing is never undone by the next
//! reconciliation.
//!
//! # When it runs
//!
//! Once per staffing bucket: on the first tick inside a bucket, plus any
//! tick on which the active pool is empty while the target is positive.
//! A bucket boundary therefore produces a single open or close action.
//!
//! # Order
//!
//! | Direction   | Lanes affected                                               |
//! |-------------|--------------------------------------------------------------|
//! | target down | open lanes from the tail of the active pool stop accepting   |
//! | target up   | draining lanes from the tail reopen, then idle lanes activate from the front of the inactive pool |

use ck_core::{CashierId, Tick, format_hms};
use ck_floor::Cashier;
use log::{info, warn};

use crate::{Sim, SimError, SimResult};

impl Sim {
    pub(crate) fn reconcile_staffing(&mut self, tick: Tick, now: f64) -> SimResult<()> {
        let Some((bucket, target)) = self.config.provisioning.target_at(now) else {
            return Ok(());
        };
        let new_bucket = self.last_bucket != Some(bucket);
        let cold_start = self.active.is_empty() && target > 0;
        if !new_bucket && !cold_start {
            return Ok(());
        }
        self.last_bucket = Some(bucket);

        let open = self.committed_lane_count();
        if target < open {
            self.close_lanes(open - target);
            info!("{}: staffing {open} -> {target} lanes (closing)", format_hms(now));
        } else if target > open {
            self.open_lanes(target - open, tick)?;
            info!("{}: staffing {open} -> {target} lanes (opening)", format_hms(now));
        }
        Ok(())
    }

    /// Active lanes committed to taking customers.
    pub(crate) fn committed_lane_count(&self) -> usize {
        self.active
            .iter()
            .filter(|&&id| self.cashiers[id.index()].open_for_entry)
            .count()
    }

    fn close_lanes(&mut self, mut count: usize) {
        for &id in self.active.iter().rev() {
            if count == 0 {
                break;
            }
            let cashier = &mut self.cashiers[id.index()];
            if cashier.open_for_entry {
                cashier.open_for_entry = false;
                count -= 1;
            }
        }
    }

    fn open_lanes(&mut self, mut count: usize, tick: Tick) -> SimResult<()> {
        for &id in self.active.iter().rev() {
            if count == 0 {
                return Ok(());
            }
            let cashier = &mut self.cashiers[id.index()];
            if !cashier.open_for_entry {
                cashier.open_for_entry = true;
                count -= 1;
            }
        }

        while count > 0 {
            let id = match self.inactive.pop_front() {
                Some(id) => id,
                None => self.grow_capacity(tick)?,
            };
            self.cashiers[id.index()].activate(tick)?;
            self.active.push(id);
            count -= 1;
        }
        Ok(())
    }

    /// Build one more lane when the staffing table outgrows the pool.
    fn grow_capacity(&mut self, tick: Tick) -> SimResult<CashierId> {
        let index = self.cashiers.len();
        let column = self.config.layout.column_for(index).ok_or_else(|| SimError::Invariant {
            tick,
            detail: format!(
                "staffing needs lane {} but the floor holds {}",
                index + 1,
                self.config.layout.max_lanes(),
            ),
        })?;
        let id = CashierId::from_index(index);
        self.cashiers.push(Cashier::new(id, column));
        self.stats.capacity_growth += 1;
        warn!("{tick}: staffing outgrew the lane pool; built {id} at column {column}");
        Ok(id)
    }
}
