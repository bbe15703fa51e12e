//! Mask and shift status word unpacking

/// [BitField] describes one named field of a 32 bit status word.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BitField {
    /// Field name, for debugging purposes
    pub name: &'static str,
    /// Offset of the least significant bit
    pub offset: u32,
    /// Width, in bits. Must be within [1, 32 - offset].
    pub width: u32,
}

impl BitField {
    pub const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// Returns the in-place mask of this field
    pub const fn mask(&self) -> u32 {
        (u32::MAX >> (32 - self.width)) << self.offset
    }

    /// Extracts this field from given word, right aligned.
    pub const fn extract(&self, word: u32) -> u32 {
        (word & self.mask()) >> self.offset
    }

    /// Replaces this field within given word.
    /// Upper bits of value that do not fit are dropped.
    pub const fn insert(&self, word: u32, value: u32) -> u32 {
        (word & !self.mask()) | ((value << self.offset) & self.mask())
    }
}

/// Unpacks every field of the table, in table order.
pub(crate) fn unpack<const N: usize>(word: u32, table: &[BitField; N]) -> [u32; N] {
    let mut values = [0; N];
    for (value, field) in values.iter_mut().zip(table.iter()) {
        *value = field.extract(word);
    }
    values
}

/// Packs values into a word, following table order.
pub(crate) fn pack<const N: usize>(values: &[u32; N], table: &[BitField; N]) -> u32 {
    table
        .iter()
        .zip(values.iter())
        .fold(0, |word, (field, value)| field.insert(word, *value))
}

#[cfg(test)]
mod test {
    use super::{pack, unpack, BitField};

    const TABLE: [BitField; 3] = [
        BitField::new("low", 0, 4),
        BitField::new("mid", 4, 12),
        BitField::new("high", 16, 16),
    ];

    #[test]
    fn masks() {
        assert_eq!(BitField::new("a", 0, 1).mask(), 0x0000_0001);
        assert_eq!(BitField::new("b", 5, 5).mask(), 0x0000_03e0);
        assert_eq!(BitField::new("c", 31, 1).mask(), 0x8000_0000);
        assert_eq!(BitField::new("d", 0, 32).mask(), u32::MAX);
    }

    #[test]
    fn extract_insert() {
        let field = BitField::new("channel", 5, 5);
        assert_eq!(field.extract(0x0000_03e0), 31);
        assert_eq!(field.extract(0x0000_0020), 1);
        assert_eq!(field.insert(0, 31), 0x0000_03e0);
        assert_eq!(field.insert(u32::MAX, 0), !0x0000_03e0);
        // overflowing value is truncated
        assert_eq!(field.insert(0, 0x3f), 0x0000_03e0);
    }

    #[test]
    fn table_round_trip() {
        for word in [0, 1, 0x1234_5678, 0xdead_beef, u32::MAX] {
            let values = unpack(word, &TABLE);
            assert_eq!(pack(&values, &TABLE), word);
        }
        assert_eq!(unpack(0x1234_5678, &TABLE), [0x8, 0x567, 0x1234]);
    }
}
