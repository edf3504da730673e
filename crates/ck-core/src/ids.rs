//! Strongly typed, zero-cost identifier wrappers.
//!
//! Entities never hold references to each other; a customer names its
//! cashier by `CashierId` and a cashier's queue is a list of `CustomerId`s.
//! Both resolve through arenas owned by the simulation.
//!
//! Ids are 1-based for display parity with the floor plan (`Cashier 1` is
//! the lane nearest the centre).  The `.index()` helper maps `CashierId` into
//! its 0-based arena slot.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Arena slot for a 1-based id.
            #[inline(always)]
            pub fn index(self) -> usize {
                debug_assert!(self.0 > 0, "ids are 1-based");
                (self.0 - 1) as usize
            }

            /// Id for a 0-based arena slot.
            #[inline(always)]
            pub fn from_index(index: usize) -> $name {
                $name(index as $inner + 1)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of a checkout lane.  Stable for the whole run.
    pub struct CashierId(u32);
}

typed_id! {
    /// Identity of a shopper, assigned monotonically at arrival.
    pub struct CustomerId(u64);
}
