//! Pseudo-random section generation for test fixtures.
//!
//! Generated buffers look like records in the wild: every header field
//! carries a value whether or not its validity bit is set, so decoding a
//! partially-valid fixture is genuinely lossy. The generator is seeded
//! explicitly and fully deterministic, keeping fixture-driven tests
//! reproducible.

use crate::codec::primitives::Writer;
use crate::guid::Guid;
use crate::sections::platform_action::{
    ADDITIONAL_CONTEXT_VALID, ACTION_ID_VALID, ACTION_RETURN_CODE_VALID, HEADER_SIZE,
    RECORD_ID_VALID, SECTION_INDEX_VALID, VALID_BITS_MASK,
};

/// Small deterministic xorshift64* generator.
#[derive(Debug, Clone)]
pub struct Rng(u64);

impl Rng {
    /// Creates a generator from a seed. A zero seed is remapped, the
    /// xorshift state must be nonzero.
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    /// Returns the next 64 random bits.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Returns a random byte.
    pub fn next_u8(&mut self) -> u8 {
        self.next_u64() as u8
    }

    /// Returns a GUID filled with random bytes.
    pub fn next_guid(&mut self) -> Guid {
        let mut bytes = [0u8; 16];
        for byte in &mut bytes {
            *byte = self.next_u8();
        }
        Guid::from_bytes(bytes)
    }
}

/// Which validity bits a generated section sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidBits {
    /// Every defined bit.
    All,
    /// The four scalar bits; the event is still useful with no
    /// additional context.
    Some,
    /// A random subset of the defined bits.
    Random,
}

/// Generates a complete pseudo-random Platform Action Event section.
///
/// When the additional-context bit lands set, between 0 and 1023 random
/// context bytes follow the header.
pub fn platform_action_event(rng: &mut Rng, bits: ValidBits) -> Vec<u8> {
    let validation_bits = match bits {
        ValidBits::All => VALID_BITS_MASK,
        ValidBits::Some => {
            RECORD_ID_VALID | SECTION_INDEX_VALID | ACTION_ID_VALID | ACTION_RETURN_CODE_VALID
        }
        ValidBits::Random => rng.next_u8() & VALID_BITS_MASK,
    };

    let context_len = if validation_bits & ADDITIONAL_CONTEXT_VALID != 0 {
        (rng.next_u64() % 1024) as usize
    } else {
        0
    };

    let mut writer = Writer::with_capacity(HEADER_SIZE + context_len);
    writer.write_u8(validation_bits);
    writer.write_u8(rng.next_u8());
    writer.write_guid(&rng.next_guid());
    writer.write_guid(&rng.next_guid());
    writer.write_guid(&rng.next_guid());
    writer.write_u64_le(rng.next_u64());
    writer.write_u16_le(rng.next_u64() as u16);
    writer.write_u32_le(rng.next_u64() as u32);
    for _ in 0..context_len {
        writer.write_u8(rng.next_u8());
    }
    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::platform_action::PlatformActionEvent;

    #[test]
    fn test_deterministic_for_same_seed() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        assert_eq!(
            platform_action_event(&mut a, ValidBits::All),
            platform_action_event(&mut b, ValidBits::All)
        );
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }

    #[test]
    fn test_generated_sections_decode() {
        let mut rng = Rng::new(7);
        for mode in [ValidBits::All, ValidBits::Some, ValidBits::Random] {
            let section = platform_action_event(&mut rng, mode);
            assert!(section.len() >= HEADER_SIZE);
            let event = PlatformActionEvent::parse(&section).unwrap();
            assert_eq!(event.validation_bits(), section[0]);
        }
    }

    #[test]
    fn test_scalar_only_mode_has_no_context() {
        let mut rng = Rng::new(3);
        let section = platform_action_event(&mut rng, ValidBits::Some);
        assert_eq!(section.len(), HEADER_SIZE);
        assert_eq!(section[0] & ADDITIONAL_CONTEXT_VALID, 0);
    }
}
