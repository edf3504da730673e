//! Entity statuses and their legal transitions.
//!
//! Each status enum carries a `can_transition_to` table.  Entities only
//! change status through `set_status`, which consults the table, so an
//! illegal edge surfaces as a `FloorError` at the point it happens.

use std::fmt;

// ── CashierStatus ─────────────────────────────────────────────────────────────

/// ```text
/// Inactive ─► Activating ─► Available ◄─► Busy
///                 ▲             │
///                 └─ Inactive ◄─┘   (retirement once drained)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CashierStatus {
    Inactive,
    Activating,
    Available,
    Busy,
}

impl CashierStatus {
    pub fn can_transition_to(self, next: CashierStatus) -> bool {
        use CashierStatus::*;
        matches!(
            (self, next),
            (Inactive, Activating)
                | (Activating, Available)
                | (Available, Busy)
                | (Available, Inactive)
                | (Busy, Available)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CashierStatus::Inactive   => "inactive",
            CashierStatus::Activating => "activating",
            CashierStatus::Available  => "available",
            CashierStatus::Busy       => "busy",
        }
    }
}

impl fmt::Display for CashierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CustomerStatus ────────────────────────────────────────────────────────────

/// ```text
/// Spawned ─► MovingToQueue ─► InQueue ─► Ready ─► Paying ─► Exiting ─► Finished
///                               ▲   │
///                               └───┴─► ChangingQueue   (jockeying)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CustomerStatus {
    Spawned,
    MovingToQueue,
    InQueue,
    ChangingQueue,
    Ready,
    Paying,
    Exiting,
    Finished,
}

impl CustomerStatus {
    pub fn can_transition_to(self, next: CustomerStatus) -> bool {
        use CustomerStatus::*;
        matches!(
            (self, next),
            (Spawned, MovingToQueue)
                | (MovingToQueue, InQueue)
                | (InQueue, Ready)
                | (InQueue, ChangingQueue)
                | (ChangingQueue, InQueue)
                | (Ready, Paying)
                | (Paying, Exiting)
                | (Exiting, Finished)
        )
    }

    /// Statuses in which the customer is listed in some lane's queue.
    pub fn is_waiting(self) -> bool {
        matches!(
            self,
            CustomerStatus::MovingToQueue
                | CustomerStatus::InQueue
                | CustomerStatus::ChangingQueue
                | CustomerStatus::Ready
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CustomerStatus::Spawned       => "spawned",
            CustomerStatus::MovingToQueue => "moving_to_queue",
            CustomerStatus::InQueue       => "in_queue",
            CustomerStatus::ChangingQueue => "changing_queue",
            CustomerStatus::Ready         => "ready",
            CustomerStatus::Paying        => "paying",
            CustomerStatus::Exiting       => "exiting",
            CustomerStatus::Finished      => "finished",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
