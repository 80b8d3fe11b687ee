/// Slot identity: the position a value was generated at.
pub type SlotIndex = u8;

/// Count type for sequence lengths.
pub type SlotCount = u8;

/// Number of decimal digits in a generated value.
pub type DigitWidth = u8;

/// A generated number. `MAX_DIGIT_WIDTH` keeps every value inside `u32`.
pub type Value = u32;

/// Milliseconds on the caller-provided clock. The crate never reads a real
/// clock; every operation that depends on time takes one of these.
pub type Millis = u64;

pub const MAX_SLOTS: SlotCount = 24;
pub const MAX_DIGIT_WIDTH: DigitWidth = 9;

const fn pow10(exp: DigitWidth) -> Value {
    let mut result: Value = 1;
    let mut i = 0;
    while i < exp {
        result *= 10;
        i += 1;
    }
    result
}

/// Inclusive value range for a digit width, `[10^(d-1), 10^d - 1]`.
/// `width` must be at least 1; a zero-digit number has no numeric range.
///
/// A width of 1 spans `[1, 9]`: single-digit values have no leading-zero
/// ambiguity either.
pub const fn digit_span(width: DigitWidth) -> (Value, Value) {
    debug_assert!(width >= 1);
    let lo = pow10(width - 1);
    (lo, lo * 10 - 1)
}

/// Decimal digit count of a value (0 has one digit).
pub const fn digit_len(value: Value) -> DigitWidth {
    let mut len: DigitWidth = 1;
    let mut rest = value / 10;
    while rest > 0 {
        len += 1;
        rest /= 10;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_span_covers_expected_ranges() {
        assert_eq!(digit_span(1), (1, 9));
        assert_eq!(digit_span(2), (10, 99));
        assert_eq!(digit_span(4), (1000, 9999));
        assert_eq!(digit_span(MAX_DIGIT_WIDTH), (100_000_000, 999_999_999));
    }

    #[test]
    fn digit_len_counts_decimal_digits() {
        assert_eq!(digit_len(0), 1);
        assert_eq!(digit_len(9), 1);
        assert_eq!(digit_len(10), 2);
        assert_eq!(digit_len(999_999_999), 9);
    }
}
