use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used as feature coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Coordinates are compared
/// with `PartialOrd`, so floating point values are expected not to be NaN.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Copy
    + Debug
    + Send
    + Sync
    + Bounded
{
    /// A short name of the coordinate type, used in log messages.
    const TYPE_NAME: &'static str;

    /// Widen to `f64`. Spreads and distances are computed in `f64` so that integer coordinates
    /// cannot overflow; `i64` values beyond 2^53 are rounded.
    fn as_f64(self) -> f64;
}

impl IndexableNum for i32 {
    const TYPE_NAME: &'static str = "i32";

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for i64 {
    const TYPE_NAME: &'static str = "i64";

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for f32 {
    const TYPE_NAME: &'static str = "f32";

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for f64 {
    const TYPE_NAME: &'static str = "f64";

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
