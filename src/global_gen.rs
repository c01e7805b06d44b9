//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::Uuid;
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("uuid4122: could not lock global generator")
}

/// Generates a UUIDv1 object.
///
/// This function employs a process-wide global generator behind a mutex, so concurrent callers
/// never observe the same timestamp, clock sequence, and node. On Unix, this function resets the
/// generator when the process ID changes (i.e., upon process forks) so that a child process does
/// not continue the parent's clock sequence.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid4122::uuid1();
/// println!("{}", uuid); // e.g., "b4f2a7e0-6f1c-11ef-8a3b-4b1d7a2c9e05"
/// assert_eq!(uuid.version(), 1);
///
/// let uuid_string: String = uuid4122::uuid1().to_string();
/// ```
pub fn uuid1() -> Uuid {
    lock_global_gen().get_mut().generate()
}

mod inner {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use crate::generator::{RandSource, V1Generator};

    /// The random number generator of the global generator, seeded from the operating system.
    #[derive(Debug)]
    pub struct GlobalGenRng(ChaCha12Rng);

    impl RandSource for GlobalGenRng {
        fn next_u32(&mut self) -> u32 {
            rand::RngCore::next_u32(&mut self.0)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V1Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V1Generator::new(GlobalGenRng(ChaCha12Rng::from_entropy())),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V1Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V1Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    previous = self.pid,
                    current = std::process::id(),
                    "process ID changed; reset global generator"
                );
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::uuid1;
    use crate::{Uuid, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid1().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Shares one node across identifiers
    #[test]
    fn shares_one_node_across_identifiers() {
        SAMPLES.with(|samples| {
            let node = &samples[0][24..];
            for e in samples {
                assert_eq!(&e[24..], node);
            }
        });
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid1();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), 1);
            assert_eq!(Uuid::parse(&e.to_string()), Some(e));
        }
    }

    /// Generates no duplicate IDs under multithreading
    #[test]
    fn generates_no_duplicate_ids_under_multithreading() -> Result<(), Box<dyn std::error::Error>>
    {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(uuid1()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
