//! Reference Code Generation
//!
//! Short human-usable codes read out over the phone and at the door.
//! The alphabet drops 0/O/1/I to avoid transcription mistakes.

use rand::Rng;

pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const BOOKING_CODE_PREFIX: &str = "JB-";
pub const BOOKING_CODE_LEN: usize = 8;

pub const GIFT_CODE_PREFIX: &str = "GIFT-";
pub const GIFT_CODE_LEN: usize = 6;

pub fn generate_code(prefix: &str, len: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(prefix.len() + len);
    code.push_str(prefix);
    for _ in 0..len {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

/// Booking reference, e.g. "JB-K7M2P9QX"
pub fn booking_code() -> String {
    generate_code(BOOKING_CODE_PREFIX, BOOKING_CODE_LEN)
}

/// Gift ticket code, e.g. "GIFT-A3BC7D"
pub fn gift_code() -> String {
    generate_code(GIFT_CODE_PREFIX, GIFT_CODE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_the_documented_shape() {
        let booking = booking_code();
        assert_eq!(booking.len(), 11);
        assert!(booking.starts_with("JB-"));

        let gift = gift_code();
        assert_eq!(gift.len(), 11);
        assert!(gift.starts_with("GIFT-"));
    }

    #[test]
    fn codes_avoid_ambiguous_characters() {
        for _ in 0..50 {
            let code = booking_code();
            let body = &code["JB-".len()..];
            assert!(
                body.bytes().all(|b| CODE_ALPHABET.contains(&b)),
                "unexpected character in {}",
                code
            );
            for forbidden in ['0', 'O', '1', 'I'] {
                assert!(!body.contains(forbidden));
            }
        }
    }
}
