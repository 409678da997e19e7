//! Lenient fixed-radix integer parsers
//!
//! `/proc` output is trusted to be well formed, so these skip the checked
//! arithmetic and error plumbing of `u64::from_str_radix`. Any byte outside
//! the digit set makes the whole field read as `0`. Overflow wraps.

/// Parse lowercase or uppercase hexadecimal without a `0x` prefix.
#[must_use]
pub fn parse_hex(digits: &[u8]) -> u64 {
    let mut n: u64 = 0;
    for &d in digits {
        let value = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 10,
            b'A'..=b'F' => d - b'A' + 10,
            _ => return 0,
        };
        n = n.wrapping_mul(16).wrapping_add(u64::from(value));
    }
    n
}

/// Parse base-10 digits, as used for device numbers and inodes.
#[must_use]
pub fn parse_dec(digits: &[u8]) -> u64 {
    let mut n: u64 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return 0;
        }
        n = n.wrapping_mul(10).wrapping_add(u64::from(d - b'0'));
    }
    n
}
