//! CRC-32 as specified by the OEM firmware reference manual (APN-030)
use crate::constants::Constants;

/// Returns the CRC value of a single byte, obtained by running
/// eight rounds of the reflected polynomial.
const fn crc32_value(byte: u32) -> u32 {
    let mut crc = byte;
    let mut j = 8;
    while j > 0 {
        if crc & 1 == 1 {
            crc = (crc >> 1) ^ Constants::CRC32_POLYNOMIAL;
        } else {
            crc >>= 1;
        }
        j -= 1;
    }
    crc
}

/// Computes the CRC-32 of given block of data, all at once.
/// Initial value is zero, there is no final inversion.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0_u32;
    for byte in bytes {
        let lhs = (crc >> 8) & 0x00ff_ffff;
        let rhs = crc32_value((crc ^ *byte as u32) & 0xff);
        crc = lhs ^ rhs;
    }
    crc
}

/// 32 bit byte reversal. The CRC trailer is streamed in reversed order
/// compared to [crc32]: it must go through this before any comparison.
pub const fn byte_swap(n: u32) -> u32 {
    ((n & 0x0000_00ff) << 24)
        | ((n & 0x0000_ff00) << 8)
        | ((n & 0x00ff_0000) >> 8)
        | ((n & 0xff00_0000) >> 24)
}

#[cfg(test)]
mod test {
    use super::{byte_swap, crc32, crc32_value};

    #[test]
    fn single_byte_values() {
        assert_eq!(crc32_value(0), 0);
        assert_eq!(crc32_value(1), 0x7707_3096);
        assert_eq!(crc32_value(0x80), 0xEDB8_8320);
        assert_eq!(crc32_value(0xff), 0x2D02_EF8D);
    }

    #[test]
    fn empty_block() {
        assert_eq!(crc32(&[]), 0);
    }

    #[test]
    fn matches_reflected_crc32_without_inversion() {
        // Zero seed & no final xor: a single byte block equals the byte value
        assert_eq!(crc32(&[0x01]), 0x7707_3096);
        // Appending the little endian CRC to a block zeroes the remainder
        let block = [0xAA, 0x44, 0x12, 0x1C, 0x2A, 0x00];
        let crc = crc32(&block);
        let mut extended = block.to_vec();
        extended.extend_from_slice(&crc.to_le_bytes());
        assert_eq!(crc32(&extended), 0);
    }

    #[test]
    fn swap() {
        assert_eq!(byte_swap(0x1234_5678), 0x7856_3412);
        assert_eq!(byte_swap(byte_swap(0xdead_beef)), 0xdead_beef);
        assert_eq!(byte_swap(0), 0);
    }

    #[test]
    fn single_bit_corruption() {
        let block: Vec<u8> = (0..64).map(|i| (i * 7 + 3) as u8).collect();
        let reference = crc32(&block);
        for byte in 0..block.len() {
            for bit in 0..8 {
                let mut corrupt = block.clone();
                corrupt[byte] ^= 1 << bit;
                assert_ne!(crc32(&corrupt), reference, "byte {} bit {}", byte, bit);
            }
        }
    }
}
