//! Strongly-typed row ids and coordinate types.
//!
//! These follow the same pattern as `tskit-rust`'s newtypes: thin,
//! `#[repr(transparent)]` wrappers around a primitive so that node ids,
//! edge ids, site ids and mutation ids can't be confused with each other
//! or with plain integers, while still behaving like integers at the
//! call site (`Ord`, arithmetic with literals, `Display`).

use std::fmt;

macro_rules! impl_id_newtype {
    ($name: ident) => {
        #[repr(transparent)]
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(i64);

        impl Default for $name {
            fn default() -> Self {
                Self::NULL
            }
        }

        impl $name {
            /// The null sentinel value for this id type.
            pub const NULL: $name = $name(-1);

            /// Build from a raw integer.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// `true` if this id is the null sentinel.
            pub fn is_null(&self) -> bool {
                self.0 == Self::NULL.0
            }

            /// Convert to `usize`, wrapping (mirrors C-style index arithmetic).
            ///
            /// A null id wraps to `usize::MAX`, which is intentional: it is
            /// never a valid array index and so trips bounds checks instead
            /// of silently aliasing row 0.
            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }

            /// Convert to `usize`, returning `None` for negative values.
            pub fn to_usize(&self) -> Option<usize> {
                usize::try_from(self.0).ok()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_null() {
                    write!(f, "NULL")
                } else {
                    write!(f, "{}", self.0)
                }
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self(value as i64)
            }
        }

        impl PartialEq<i64> for $name {
            fn eq(&self, other: &i64) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i64 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }

        impl PartialOrd<i64> for $name {
            fn partial_cmp(&self, other: &i64) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(other)
            }
        }
    };
}

impl_id_newtype!(NodeId);
impl_id_newtype!(EdgeId);
impl_id_newtype!(SiteId);
impl_id_newtype!(MutationId);
// Always `PopulationId::NULL` / `IndividualId::NULL` in output rows:
// this crate tracks neither table (`spec.md` §6 output layout).
impl_id_newtype!(PopulationId);
impl_id_newtype!(IndividualId);

/// A genomic coordinate: an integer site index, `0 <= position`.
///
/// Unlike `tskit-rust`'s continuous `Position`, the core spec this crate
/// implements works entirely over integer site indices, so this wraps a
/// `u64` rather than an `f64`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position(u64);

impl Position {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Position {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<usize> for Position {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

impl From<Position> for u64 {
    fn from(value: Position) -> Self {
        value.0
    }
}

impl From<Position> for usize {
    fn from(value: Position) -> Self {
        value.0 as usize
    }
}

impl PartialEq<u64> for Position {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

/// A node time. Larger values are further in the past; for every edge,
/// `time(parent) > time(child)` strictly.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(f64);

impl Time {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> f64 {
        self.0
    }
}

impl Eq for Time {}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Times are never NaN in practice (construction goes through
        // `add_node`, which is never handed one); treat any that slip
        // through as greater than everything so ordering stays total.
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(std::cmp::Ordering::Greater)
    }
}

impl std::hash::Hash for Time {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Time {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Time> for f64 {
    fn from(value: Time) -> Self {
        value.0
    }
}

impl std::ops::Sub<f64> for Time {
    type Output = Time;

    fn sub(self, rhs: f64) -> Time {
        Time(self.0 - rhs)
    }
}

impl PartialEq<f64> for Time {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Time {
    fn partial_cmp(&self, other: &f64) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}
