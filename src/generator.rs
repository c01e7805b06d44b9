//! UUIDv1 generator and related types.

use crate::{codec::random_bits, Uuid};

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`V1Generator`] and
/// [`generate_v4()`](crate::generate_v4).
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;
}

/// A trait that defines the minimum system clock interface for [`V1Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// Milliseconds from 1582-10-15T00:00:00Z (start of the Gregorian calendar) to the Unix epoch.
const GREGORIAN_OFFSET_MS: u64 = 12_219_292_800_000;

/// Largest sub-millisecond tick value; a millisecond holds 10,000 100-nanosecond intervals.
const MAX_TICK: u64 = 9_999;

const MAX_SEQUENCE: u16 = (1 << 14) - 1;

/// The multicast bit of a 48-bit node (least significant bit of the first octet).
const MULTICAST_BIT: u64 = 1 << 40;

/// Represents a UUIDv1 generator that encapsulates the timestamp, clock sequence, and node of the
/// most recently generated UUID.
///
/// The system clock provides only millisecond resolution, whereas UUIDv1 counts 100-nanosecond
/// intervals. Within the same millisecond, the generator synthesizes finer timestamps by
/// occasionally advancing a sub-millisecond `tick` and otherwise advances the clock sequence. The
/// clock sequence is also advanced whenever the clock moves backwards, so that the generator never
/// reuses a timestamp-sequence pair it may have issued before.
///
/// The generator holds no real hardware address: its node is a random 48-bit value with the
/// multicast bit set, as RFC 4122 recommends for such nodes.
///
/// A generator instance is not shared implicitly. The following example shares one instance among
/// threads using Rust's standard synchronization mechanism. [`uuid1()`](crate::uuid1) does the same
/// with a process-wide instance.
///
/// # Examples
///
/// ```rust
/// use std::{sync, thread};
/// use uuid4122::V1Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V1Generator::with_rand08(rand::rngs::OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<R, T = StdSystemTime> {
    timestamp: u64,
    sequence: u16,
    node: u64,
    tick: u64,

    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R: RandSource> V1Generator<R> {
    /// Creates a generator instance that reads the system clock through [`StdSystemTime`].
    pub fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> V1Generator<R, T> {
    /// Creates a generator instance with the specified random number generator and system clock.
    ///
    /// The clock sequence and node are seeded from `rng` immediately.
    pub fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        let mut g = Self {
            timestamp: 0,
            sequence: 0,
            node: 0,
            tick: 0,
            rng,
            time_source,
        };
        g.reset_state();
        g
    }

    /// Discards the current state and seeds a new clock sequence and node.
    pub fn reset_state(&mut self) {
        self.timestamp = 0;
        self.tick = 0;
        self.sequence = random_bits(&mut self.rng, 14) as u16;
        self.node = random_bits(&mut self.rng, 48) | MULTICAST_BIT;
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }

    /// Generates a new UUIDv1 object from the `unix_ts_ms` passed.
    ///
    /// The generator treats `unix_ts_ms` as the current time: a value smaller than the one of the
    /// preceding call is considered a clock rollback and advances the clock sequence.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Uuid {
        if unix_ts_ms != self.timestamp {
            if unix_ts_ms < self.timestamp {
                self.sequence = (self.sequence + 1) & MAX_SEQUENCE;
                tracing::debug!(
                    previous = self.timestamp,
                    current = unix_ts_ms,
                    sequence = self.sequence,
                    "clock moved backwards; advanced clock sequence"
                );
            }
            self.timestamp = unix_ts_ms;
            self.tick = 0;
        } else if random_bits(&mut self.rng, 3) == 0 && self.tick < MAX_TICK {
            self.tick += 1;
        } else {
            self.sequence = (self.sequence + 1) & MAX_SEQUENCE;
            tracing::trace!(
                timestamp = self.timestamp,
                tick = self.tick,
                sequence = self.sequence,
                "advanced clock sequence within millisecond"
            );
        }

        // 60-bit count of 100-nanosecond intervals since the Gregorian epoch
        let ticks = self
            .timestamp
            .wrapping_add(GREGORIAN_OFFSET_MS)
            .wrapping_mul(10_000)
            & ((1 << 60) - 1);

        // tick is added to time_low only; an overflow wraps without carrying into time_mid
        Uuid::from_fields(
            (ticks & 0xffff_ffff) + self.tick,
            (ticks >> 32) & 0xffff,
            0x1000 | (ticks >> 48),
            0x80 | u64::from(self.sequence >> 8),
            u64::from(self.sequence & 0xff),
            self.node,
        )
    }

    /// Returns the Unix timestamp in milliseconds of the most recently generated UUID, or zero if
    /// none has been generated since the last reset.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the current 14-bit clock sequence.
    pub const fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Returns the 48-bit node embedded in generated UUIDs.
    pub const fn node(&self) -> u64 {
        self.node
    }

    /// Returns the sub-millisecond tick added to the timestamp of the most recently generated UUID.
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}

impl<R: RandSource + Default, T: TimeSource + Default> Default for V1Generator<R, T> {
    fn default() -> Self {
        Self::with_rand_and_time_sources(R::default(), T::default())
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv1 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid4122::V1Generator;
///
/// V1Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V1Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V1Generator<R, T> {}
