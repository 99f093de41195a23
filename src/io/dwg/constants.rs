//! Prefix codes and size limits of the DWG bitstream encodings.

/// 2-bit prefix codes of the BitShort (BS) type.
pub mod bit_short {
    /// 00: a raw short (2 bytes, LSB first) follows
    pub const NORMAL: u8 = 0;
    /// 01: an unsigned char follows
    pub const UNSIGNED_CHAR: u8 = 1;
    /// 10: the value is 0, no data follows
    pub const ZERO_VALUE: u8 = 2;
    /// 11: the value is 256, no data follows
    pub const VALUE_256: u8 = 3;
}

/// 2-bit prefix codes of the BitLong (BL) type.
pub mod bit_long {
    /// 00: a raw long (4 bytes, LSB first) follows
    pub const NORMAL: u8 = 0;
    /// 01: an unsigned char follows
    pub const UNSIGNED_CHAR: u8 = 1;
    /// 10: the value is 0, no data follows
    pub const ZERO_VALUE: u8 = 2;
    /// 11: not used
    pub const NOT_USED: u8 = 3;
}

/// 2-bit prefix codes of the BitDouble (BD) type.
pub mod bit_double {
    /// 00: a raw double (8 bytes, LSB first) follows
    pub const NORMAL: u8 = 0;
    /// 01: the value is 1.0
    pub const ONE_VALUE: u8 = 1;
    /// 10: the value is 0.0
    pub const ZERO_VALUE: u8 = 2;
    /// 11: not used, decodes as 0.0
    pub const NOT_USED: u8 = 3;
}

/// 2-bit prefix codes of the BitDouble-with-default (DD) type.
pub mod bit_double_with_default {
    /// 00: the default is used unchanged
    pub const DEFAULT_VALUE: u8 = 0;
    /// 01: 4 bytes patch the low 4 bytes of the default
    pub const PATCH_4_BYTES: u8 = 1;
    /// 10: 6 bytes patch bytes 4–5 and then bytes 0–3 of the default
    pub const PATCH_6_BYTES: u8 = 2;
    /// 11: a full raw double follows
    pub const FULL_RAW_DOUBLE: u8 = 3;
}

/// Largest handle payload the format defines.
pub const MAX_HANDLE_BYTES: usize = 8;

/// Largest number of bytes in a modular char (MC).
pub const MAX_MODULAR_CHAR_BYTES: usize = 8;

/// Largest number of bytes in a modular short (MS).
pub const MAX_MODULAR_SHORT_BYTES: usize = 4;

/// Size of a section sentinel.
pub const SENTINEL_SIZE: usize = 16;

/// Continuation flag of a modular char byte / modular short high byte.
pub const CONTINUATION_FLAG: u8 = 0b1000_0000;

/// Sign flag in the most significant byte of a signed modular char.
pub const MODULAR_CHAR_SIGN_FLAG: u8 = 0b0100_0000;
