//! Strongly typed, zero-cost identifier wrappers.
//!
//! Persons and locations live in arenas owned by the model and are referred
//! to by index.  All IDs are `Copy + Ord + Hash`; the inner integer is `pub`
//! so tests can build them directly, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as an arena index.
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

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
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
    /// Stable person identifier.  Assigned monotonically from 0 and equal to
    /// the person's position in the model's person arena.
    pub struct PersonId(u32);
}

typed_id! {
    /// Index of a location in the model's location arena.
    pub struct LocationId(u32);
}

typed_id! {
    /// Position of an itinerary entry inside its owner's append-only
    /// itinerary.  Only meaningful together with the owning `PersonId`.
    pub struct EntryIdx(u32);
}
