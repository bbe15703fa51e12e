use crate::DecodeError;

pub struct Utils;

impl Utils {
    /// u8 decoding attempt
    pub fn decode_u8(buf: &[u8]) -> Result<u8, DecodeError> {
        buf.first().copied().ok_or(DecodeError::NotEnoughBytes)
    }
    /// u16 decoding attempt (little endian)
    pub fn decode_u16(buf: &[u8]) -> Result<u16, DecodeError> {
        if buf.len() < 2 {
            Err(DecodeError::NotEnoughBytes)
        } else {
            Ok(u16::from_le_bytes([buf[0], buf[1]]))
        }
    }
    /// i16 decoding attempt (little endian)
    pub fn decode_i16(buf: &[u8]) -> Result<i16, DecodeError> {
        if buf.len() < 2 {
            Err(DecodeError::NotEnoughBytes)
        } else {
            Ok(i16::from_le_bytes([buf[0], buf[1]]))
        }
    }
    /// u32 decoding attempt (little endian)
    pub fn decode_u32(buf: &[u8]) -> Result<u32, DecodeError> {
        if buf.len() < 4 {
            Err(DecodeError::NotEnoughBytes)
        } else {
            Ok(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
    }
    /// i32 decoding attempt (little endian)
    pub fn decode_i32(buf: &[u8]) -> Result<i32, DecodeError> {
        if buf.len() < 4 {
            Err(DecodeError::NotEnoughBytes)
        } else {
            Ok(i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
    }
    /// f32 decoding attempt (little endian)
    pub fn decode_f32(buf: &[u8]) -> Result<f32, DecodeError> {
        if buf.len() < 4 {
            Err(DecodeError::NotEnoughBytes)
        } else {
            Ok(f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
    }
    /// f64 decoding attempt (little endian)
    pub fn decode_f64(buf: &[u8]) -> Result<f64, DecodeError> {
        if buf.len() < 8 {
            Err(DecodeError::NotEnoughBytes)
        } else {
            Ok(f64::from_le_bytes([
                buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
            ]))
        }
    }
    /// Copies little endian bytes into the buffer at given offset.
    /// Buffer must be large enough: caller verifies the encoding size beforehand.
    pub fn encode(bytes: &[u8], buf: &mut [u8], offset: usize) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

#[cfg(test)]
mod test {
    use super::Utils;
    use crate::DecodeError;

    #[test]
    fn little_endian_decoding() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(Utils::decode_u8(&buf), Ok(0x01));
        assert_eq!(Utils::decode_u16(&buf), Ok(0x0201));
        assert_eq!(Utils::decode_u32(&buf), Ok(0x04030201));
        assert_eq!(Utils::decode_i16(&[0xff, 0xff]), Ok(-1));
        assert_eq!(Utils::decode_i32(&[0xfe, 0xff, 0xff, 0xff]), Ok(-2));
        assert_eq!(Utils::decode_f32(&1.5_f32.to_le_bytes()), Ok(1.5));
        assert_eq!(Utils::decode_f64(&(-47.872109_f64).to_le_bytes()), Ok(-47.872109));
    }

    #[test]
    fn short_buffers() {
        assert_eq!(Utils::decode_u8(&[]), Err(DecodeError::NotEnoughBytes));
        assert_eq!(Utils::decode_u16(&[0]), Err(DecodeError::NotEnoughBytes));
        assert_eq!(Utils::decode_u32(&[0, 0, 0]), Err(DecodeError::NotEnoughBytes));
        assert_eq!(Utils::decode_f64(&[0; 7]), Err(DecodeError::NotEnoughBytes));
    }
}
