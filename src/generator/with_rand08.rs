//! Integration with `rand` (v0.8) crate.

use super::{RandSource, StdSystemTime, V1Generator};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

impl<T: RngCore> V1Generator<Adapter<T>, StdSystemTime> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::V1Generator;
    ///
    /// let mut g = V1Generator::with_rand08(rand::thread_rng());
    /// println!("{}", g.generate());
    /// ```
    pub fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
