use std::{fmt, str};

use crate::codec::align_number;
use crate::Field;
use fstr::FStr;

/// Represents a Universally Unique IDentifier composed of the six RFC 4122 fields.
///
/// The fields are held as integers only; their binary and hexadecimal renderings are derived on
/// demand by [`Uuid::field_bin()`], [`Uuid::field_hex()`], [`Uuid::bit_string()`], and the
/// [`fmt::Display`] implementation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid {
    time_low: u32,
    time_mid: u16,
    time_hi_and_version: u16,
    clock_seq_hi_and_reserved: u8,
    clock_seq_low: u8,
    node: u64,
}

/// The reserved variants of UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (00000000-0000-0000-0000-000000000000).
    VarNil,

    /// The variant field value is `0xx`, reserved for NCS backward compatibility.
    Var0,

    /// The variant field value is `10`, the variant specified by RFC 4122.
    Var10,

    /// The variant field value is `110`, reserved for Microsoft backward compatibility.
    Var110,

    /// The variant field value is `111`, reserved for future definition.
    VarReserved,

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff).
    VarMax,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self::from_fields(0, 0, 0, 0, 0, 0);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self::from_fields(
        u64::MAX,
        u64::MAX,
        u64::MAX,
        u64::MAX,
        u64::MAX,
        u64::MAX,
    );

    /// Creates a UUID from the six field values in field order.
    ///
    /// Each value is truncated to the width of its field, so this function accepts any input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// let x = Uuid::from_fields(0x12345678, 0x1234, 0x5678, 0x9a, 0xbc, 0x123456789012);
    /// assert_eq!(x.to_string(), "12345678-1234-5678-9abc-123456789012");
    /// assert_eq!(x.version(), 5);
    ///
    /// // out-of-range values are masked
    /// assert_eq!(Uuid::from_fields(0, 0x1_0001, 0, 0, 0, 0).time_mid(), 1);
    /// ```
    pub const fn from_fields(
        time_low: u64,
        time_mid: u64,
        time_hi_and_version: u64,
        clock_seq_hi_and_reserved: u64,
        clock_seq_low: u64,
        node: u64,
    ) -> Self {
        Self {
            time_low: time_low as u32,
            time_mid: time_mid as u16,
            time_hi_and_version: time_hi_and_version as u16,
            clock_seq_hi_and_reserved: clock_seq_hi_and_reserved as u8,
            clock_seq_low: clock_seq_low as u8,
            node: node & 0xffff_ffff_ffff,
        }
    }

    /// Returns a copy of this UUID with `field` replaced by `value` (truncated to the field width).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::{Field, Uuid};
    ///
    /// let x = Uuid::NIL.with_field(Field::Node, 0xffff_ffff_ffff);
    /// assert_eq!(x.to_string(), "00000000-0000-0000-0000-ffffffffffff");
    /// ```
    pub fn with_field(self, field: Field, value: u64) -> Self {
        let mut fs = self.fields();
        fs[field.index()] = value;
        Self::from_fields(fs[0], fs[1], fs[2], fs[3], fs[4], fs[5])
    }

    /// Returns the six field values in field order.
    pub const fn fields(&self) -> [u64; 6] {
        [
            self.time_low as u64,
            self.time_mid as u64,
            self.time_hi_and_version as u64,
            self.clock_seq_hi_and_reserved as u64,
            self.clock_seq_low as u64,
            self.node,
        ]
    }

    /// Returns the integer value of `field`.
    pub const fn field(&self, field: Field) -> u64 {
        self.fields()[field.index()]
    }

    /// Returns the integer value of the field at the zero-based position `index`, if any.
    pub const fn field_at(&self, index: usize) -> Option<u64> {
        match Field::from_index(index) {
            Some(field) => Some(self.field(field)),
            None => None,
        }
    }

    /// Returns the value of `field` as a binary string zero-padded to the field width.
    pub fn field_bin(&self, field: Field) -> String {
        align_number(self.field(field), field.width() as usize, 2)
    }

    /// Returns the value of `field` as a lowercase hexadecimal string zero-padded to the field
    /// width.
    pub fn field_hex(&self, field: Field) -> String {
        align_number(self.field(field), field.width() as usize / 4, 16)
    }

    /// Returns the 32-bit `time_low` field.
    pub const fn time_low(&self) -> u32 {
        self.time_low
    }

    /// Returns the 16-bit `time_mid` field.
    pub const fn time_mid(&self) -> u16 {
        self.time_mid
    }

    /// Returns the 16-bit `time_hi_and_version` field, version bits included.
    pub const fn time_hi_and_version(&self) -> u16 {
        self.time_hi_and_version
    }

    /// Returns the 8-bit `clock_seq_hi_and_reserved` field, variant bits included.
    pub const fn clock_seq_hi_and_reserved(&self) -> u8 {
        self.clock_seq_hi_and_reserved
    }

    /// Returns the 8-bit `clock_seq_low` field.
    pub const fn clock_seq_low(&self) -> u8 {
        self.clock_seq_low
    }

    /// Returns the 48-bit node field.
    pub const fn node(&self) -> u64 {
        self.node
    }

    /// Returns the version number, i.e. the top four bits of the `time_hi_and_version` field.
    pub const fn version(&self) -> u8 {
        (self.time_hi_and_version >> 12) as u8
    }

    /// Reports the variant field value of the UUID or, if appropriate, [`Variant::VarNil`] or
    /// [`Variant::VarMax`].
    pub fn variant(&self) -> Variant {
        if *self == Self::NIL {
            Variant::VarNil
        } else if *self == Self::MAX {
            Variant::VarMax
        } else {
            match self.clock_seq_hi_and_reserved >> 5 {
                0b000..=0b011 => Variant::Var0,
                0b100..=0b101 => Variant::Var10,
                0b110 => Variant::Var110,
                _ => Variant::VarReserved,
            }
        }
    }

    /// Returns the 16-byte big-endian binary representation.
    pub const fn to_bytes(&self) -> [u8; 16] {
        let tl = self.time_low.to_be_bytes();
        let tm = self.time_mid.to_be_bytes();
        let th = self.time_hi_and_version.to_be_bytes();
        let nd = self.node.to_be_bytes();
        [
            tl[0],
            tl[1],
            tl[2],
            tl[3],
            tm[0],
            tm[1],
            th[0],
            th[1],
            self.clock_seq_hi_and_reserved,
            self.clock_seq_low,
            nd[2],
            nd[3],
            nd[4],
            nd[5],
            nd[6],
            nd[7],
        ]
    }

    /// Returns the 128-bit binary string: the binary renderings of the six fields concatenated in
    /// field order.
    pub fn bit_string(&self) -> String {
        Field::ALL.iter().map(|&f| self.field_bin(f)).collect()
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation. Same as `to_string()`.
    pub fn hex_string(&self) -> String {
        self.encode().to_string()
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens.
    pub fn hex_no_delim(&self) -> FStr<32> {
        let mut buffer = [0u8; 32];
        for (i, e) in self.to_bytes().into_iter().enumerate() {
            buffer[i * 2] = DIGITS[usize::from(e >> 4)];
            buffer[i * 2 + 1] = DIGITS[usize::from(e & 15)];
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the URN representation (`urn:uuid:` followed by the 8-4-4-4-12 form).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// assert_eq!(Uuid::NIL.urn(), "urn:uuid:00000000-0000-0000-0000-000000000000");
    /// ```
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.encode())
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// [`FStr`] that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// let x = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), uuid4122::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.to_bytes().into_iter().enumerate() {
            let e = usize::from(e);
            if let Some(c) = buf_iter.next() {
                *c = DIGITS[e >> 4];
            }
            if let Some(c) = buf_iter.next() {
                *c = DIGITS[e & 15];
            }
            if i == 3 || i == 5 || i == 7 || i == 9 {
                if let Some(c) = buf_iter.next() {
                    *c = b'-';
                }
            }
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Parses the 8-4-4-4-12 hexadecimal string representation, returning `None` if `src` does
    /// not conform to it.
    ///
    /// Hexadecimal digits are accepted in either case. Use [`str::parse`] instead to obtain a
    /// [`ParseError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// let x = Uuid::parse("12345678-1234-5678-9ABC-123456789012").unwrap();
    /// assert_eq!(x.clock_seq_hi_and_reserved(), 0x9a);
    /// assert_eq!(x.clock_seq_low(), 0xbc);
    ///
    /// assert!(Uuid::parse("not-a-uuid").is_none());
    /// ```
    pub fn parse(src: &str) -> Option<Self> {
        src.parse().ok()
    }
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut fs = [0u64; 6];
        let mut iter = src.chars();
        for (field, dst) in Field::ALL.into_iter().zip(fs.iter_mut()) {
            for _ in 0..field.width() / 4 {
                let digit = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)?;
                *dst = (*dst << 4) | u64::from(digit);
            }
            // clock_seq_hi_and_reserved and clock_seq_low share one hyphen group
            if field != Field::ClockSeqHiAndReserved
                && field != Field::Node
                && iter.next().ok_or(ERR)? != '-'
            {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self::from_fields(fs[0], fs[1], fs[2], fs[3], fs[4], fs[5]))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from_fields(
            u64::from(u32::from_be_bytes([src[0], src[1], src[2], src[3]])),
            u64::from(u16::from_be_bytes([src[4], src[5]])),
            u64::from(u16::from_be_bytes([src[6], src[7]])),
            u64::from(src[8]),
            u64::from(src[9]),
            u64::from_be_bytes([0, 0, src[10], src[11], src[12], src[13], src[14], src[15]]),
        )
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.to_bytes())
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.to_bytes())
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self::from(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases: [(&str, &[u8; 16]); 3] = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        107, 167, 184, 16, 157, 173, 17, 209, 128, 180, 0, 192, 79, 212, 48, 200,
                    ],
                ),
                (
                    "12345678-1234-5678-9abc-123456789012",
                    &[
                        18, 52, 86, 120, 18, 52, 86, 120, 154, 188, 18, 52, 86, 120, 144, 18,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
