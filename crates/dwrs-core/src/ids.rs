//! Strongly typed identifier wrappers.
//!
//! Cranes and robots are addressed by their index in the fleet arena; ships
//! are numbered in arrival order.  The inner integer is `pub` so callers can
//! index a `Vec` via `id.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a crane in the fleet.
    pub struct CraneId(u16);
}

typed_id! {
    /// Index of a transport robot in the fleet.
    pub struct RobotId(u16);
}

typed_id! {
    /// Sequence number of a ship, assigned on arrival (balked ships included).
    pub struct ShipId(u32);
}
