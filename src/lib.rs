//! An implementation of RFC 4122 UUID versions 1 and 4
//!
//! ```rust
//! use uuid4122::{uuid1, uuid4, Uuid};
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid1();
//! println!("{}", uuid); // e.g. "b4f2a7e0-6f1c-11ef-8a3b-4b1d7a2c9e05"
//!
//! let parsed = Uuid::parse(&uuid.to_string());
//! assert_eq!(parsed, Some(uuid));
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! A UUID consists of six fields, laid out as follows:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |         time_hi_and_version   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |clk_seq_hi_res |  clk_seq_low  |         node (0-1)            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The top four bits of `time_hi_and_version` hold the version and the top two bits of
//! `clk_seq_hi_res` hold the variant `10`. [`Uuid`] stores the field values as integers and
//! renders them as zero-padded binary or hexadecimal strings on demand.
//!
//! # Version 1
//!
//! The 60-bit timestamp counts 100-nanosecond intervals since 1582-10-15 (the Gregorian calendar
//! reform) and is spread over `time_low`, `time_mid`, and the low 12 bits of
//! `time_hi_and_version`. The system clock offers millisecond resolution only, so
//! [`V1Generator`] fills the sub-millisecond part with a tick counter and advances the 14-bit clock
//! sequence when the tick cannot be advanced or when the clock moves backwards. The node is a
//! random 48-bit value with the multicast bit set, because no hardware address is read.
//!
//! # Version 4
//!
//! All bits other than the version and variant bits are filled with random numbers taken from a
//! general-purpose pseudo-random number generator.
//!
//! # Crate features
//!
//! - `global_gen` (default): enables [`uuid1()`] backed by a process-wide generator.
//! - `serde`: enables serialization and deserialization of [`Uuid`].
//! - `uuid`: enables conversions from and to `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;

mod field;
pub use field::{Field, ParseFieldError};

mod id;
pub use id::{ParseError, Uuid, Variant};

pub mod generator;
#[doc(inline)]
pub use generator::V1Generator;

mod v4;
pub use v4::{generate_v4, uuid4};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::uuid1;
