//! Random field values and fixed-width numeric rendering

use crate::generator::RandSource;

/// Returns a random integer uniformly distributed in `[0, 2^width)`.
///
/// Widths up to 30 bits are served by a single draw from `rng`; wider values are composed of two
/// independent draws, the low 30 bits and the remaining `width - 30` bits.
///
/// # Panics
///
/// Panics if `width` is greater than 53.
pub fn random_bits<R: RandSource + ?Sized>(rng: &mut R, width: u32) -> u64 {
    assert!(width <= 53, "`width` must be an integer in 0..=53");
    if width <= 30 {
        // keep the most significant bits of a 32-bit draw
        u64::from(rng.next_u32()) >> (32 - width)
    } else {
        let low = random_bits(rng, 30);
        let high = random_bits(rng, width - 30);
        low + (high << 30)
    }
}

/// Renders `value` in `radix` with lowercase digits, left-padded with `'0'` to `length` characters.
///
/// A rendering already longer than `length` is returned as is.
///
/// # Examples
///
/// ```rust
/// use uuid4122::codec::align_number;
///
/// assert_eq!(align_number(0xabc, 8, 16), "00000abc");
/// assert_eq!(align_number(5, 8, 2), "00000101");
/// ```
///
/// # Panics
///
/// Panics if `radix` is not in `2..=36`.
pub fn align_number(value: u64, length: usize, radix: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    assert!(
        (2..=36).contains(&radix),
        "`radix` must be an integer in 2..=36"
    );

    let radix = u64::from(radix);
    let mut buffer = Vec::with_capacity(length.max(64));
    let mut rest = value;
    loop {
        buffer.push(DIGITS[(rest % radix) as usize]);
        rest /= radix;
        if rest == 0 {
            break;
        }
    }
    if buffer.len() < length {
        buffer.resize(length, b'0');
    }
    buffer.iter().rev().map(|&e| char::from(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::{align_number, random_bits};
    use crate::generator::with_rand08::Adapter;

    /// Pads prepared cases to fixed width
    #[test]
    fn pads_prepared_cases_to_fixed_width() {
        let cases: &[((u64, usize, u32), &str)] = &[
            ((0, 8, 16), "00000000"),
            ((0, 0, 16), "0"),
            ((0x12345678, 8, 16), "12345678"),
            ((0xabc, 4, 16), "0abc"),
            ((0x9a, 2, 16), "9a"),
            ((5, 8, 2), "00000101"),
            ((0xff, 8, 2), "11111111"),
            ((35, 2, 36), "0z"),
            ((255, 4, 10), "0255"),
            ((0x1_0000, 2, 16), "10000"),
            (
                (0xffff_ffff_ffff, 48, 2),
                "111111111111111111111111111111111111111111111111",
            ),
        ];

        for ((value, length, radix), text) in cases {
            assert_eq!(&align_number(*value, *length, *radix), text);
        }
    }

    /// Pads up to 128 characters
    #[test]
    fn pads_up_to_128_characters() {
        let e = align_number(1, 128, 2);
        assert_eq!(e.len(), 128);
        assert!(e.starts_with(&"0".repeat(127)));
        assert!(e.ends_with('1'));
    }

    /// Rejects unsupported radix
    #[test]
    #[should_panic]
    fn rejects_unsupported_radix() {
        align_number(1, 1, 37);
    }

    /// Returns zero for zero width
    #[test]
    fn returns_zero_for_zero_width() {
        let mut rng = Adapter(rand::thread_rng());
        for _ in 0..1_000 {
            assert_eq!(random_bits(&mut rng, 0), 0);
        }
    }

    /// Stays within range for every supported width
    #[test]
    fn stays_within_range_for_every_supported_width() {
        let mut rng = Adapter(rand::thread_rng());
        for width in 0..=53 {
            for _ in 0..1_000 {
                assert!(random_bits(&mut rng, width) < 1 << width);
            }
        }
    }

    /// Spans full range of composed 40-bit values
    #[test]
    fn spans_full_range_of_composed_40_bit_values() {
        const N_SAMPLES: usize = 100_000;
        const LIMIT: u64 = 1 << 40;
        let mut rng = Adapter(rand::thread_rng());

        let mut min = u64::MAX;
        let mut max = 0;
        let mut bins = [0u32; 40];
        for _ in 0..N_SAMPLES {
            let e = random_bits(&mut rng, 40);
            assert!(e < LIMIT);
            min = min.min(e);
            max = max.max(e);
            for (i, bin) in bins.iter_mut().enumerate() {
                *bin += ((e >> i) & 1) as u32;
            }
        }

        assert!(min < LIMIT / 1_000, "min: {min}");
        assert!(max > LIMIT - LIMIT / 1_000, "max: {max}");

        // test if every bit is set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for (i, bin) in bins.iter().enumerate() {
            let p = *bin as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Rejects widths over 53 bits
    #[test]
    #[should_panic]
    fn rejects_widths_over_53_bits() {
        random_bits(&mut Adapter(rand::thread_rng()), 54);
    }
}
