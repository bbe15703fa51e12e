pub struct Constants {}

impl Constants {
    /// First SYNC byte
    pub const SYNC0: u8 = 0xAA;

    /// Second SYNC byte
    pub const SYNC1: u8 = 0x44;

    /// Third SYNC byte
    pub const SYNC2: u8 = 0x12;

    /// SYNC sequence, in order of appearance
    pub const SYNC: [u8; 3] = [Self::SYNC0, Self::SYNC1, Self::SYNC2];

    /// Header length, for this protocol revision.
    /// Header length byte must always match this value.
    pub const HEADER_LENGTH: u8 = 28;

    /// Size of the CRC trailer
    pub const CRC_SIZE: usize = 4;

    /// CRC-32 reflected polynomial, as per the OEM firmware reference manual
    pub const CRC32_POLYNOMIAL: u32 = 0xEDB88320;

    /// Header length byte offset
    pub const HEADER_LENGTH_OFFSET: usize = 3;

    /// Message length field offset, within header
    pub const MESSAGE_LENGTH_OFFSET: usize = 8;

    /// Default maximal number of bytes consumed per decoding attempt
    pub const DEFAULT_MAX_BYTES: usize = 500;

    /// Default timeout (in milliseconds) applied to each byte read
    pub const DEFAULT_BYTE_TIMEOUT_MS: u64 = 100;

    /// Largest payload the message length field can describe
    pub const MAX_PAYLOAD: usize = u16::MAX as usize;

    /// Default maximal payload size we accept to buffer
    pub const DEFAULT_MAX_PAYLOAD: usize = 16384;

    /// Default pacing (in milliseconds) between two command bytes
    pub const DEFAULT_COMMAND_PACING_MS: u64 = 5;
}
