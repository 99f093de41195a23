//! DWG handle references.
//!
//! A handle is stored as `|CODE (4 bits)|COUNTER (4 bits)|HANDLE bytes|`.
//! The code says how the payload relates to the owning object's handle; the
//! counter is the payload length in bytes, most significant byte first.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::MAX_HANDLE_BYTES;

use std::fmt;

/// DWG handle reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DwgReferenceType {
    /// Undefined reference (code 0)
    Undefined = 0,
    /// Soft ownership reference (code 2) - absolute handle
    SoftOwnership = 2,
    /// Hard ownership reference (code 3) - absolute handle
    HardOwnership = 3,
    /// Soft pointer reference (code 4) - absolute handle
    SoftPointer = 4,
    /// Hard pointer reference (code 5) - absolute handle
    HardPointer = 5,
    /// Reference handle + 1 (code 6)
    HardOwnershipPlus1 = 6,
    /// Reference handle - 1 (code 8)
    HardOwnershipMinus1 = 8,
    /// Reference handle + payload (code 0xA)
    SoftPointerPlusOffset = 0xA,
    /// Reference handle - payload (code 0xC)
    SoftPointerMinusOffset = 0xC,
}

impl DwgReferenceType {
    /// Map a raw 4-bit code to a reference type.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Undefined),
            2 => Some(Self::SoftOwnership),
            3 => Some(Self::HardOwnership),
            4 => Some(Self::SoftPointer),
            5 => Some(Self::HardPointer),
            6 => Some(Self::HardOwnershipPlus1),
            8 => Some(Self::HardOwnershipMinus1),
            0xA => Some(Self::SoftPointerPlusOffset),
            0xC => Some(Self::SoftPointerMinusOffset),
            _ => None,
        }
    }

    /// Whether the payload is the absolute handle value.
    pub fn is_absolute(&self) -> bool {
        matches!(
            self,
            Self::Undefined
                | Self::SoftOwnership
                | Self::HardOwnership
                | Self::SoftPointer
                | Self::HardPointer
        )
    }

    /// Whether the handle is relative to the reference handle.
    pub fn is_offset(&self) -> bool {
        !self.is_absolute()
    }
}

/// A handle exactly as read from the stream: code plus raw payload.
///
/// The payload lives in a fixed inline buffer, so a handle never allocates
/// and its length can never exceed [`MAX_HANDLE_BYTES`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HandleReference {
    code: u8,
    counter: u8,
    bytes: [u8; MAX_HANDLE_BYTES],
}

impl HandleReference {
    /// Build a handle from a code and its payload bytes.
    pub fn new(code: u8, payload: &[u8]) -> Result<Self> {
        if payload.len() > MAX_HANDLE_BYTES {
            return Err(DwgError::HandleTooLong {
                counter: payload.len(),
                max: MAX_HANDLE_BYTES,
            });
        }
        let mut bytes = [0u8; MAX_HANDLE_BYTES];
        bytes[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            code,
            counter: payload.len() as u8,
            bytes,
        })
    }

    /// Build a handle from an inline payload buffer already bounded by the caller.
    pub(crate) fn from_inline(code: u8, counter: u8, bytes: [u8; MAX_HANDLE_BYTES]) -> Self {
        debug_assert!(counter as usize <= MAX_HANDLE_BYTES);
        Self {
            code,
            counter,
            bytes,
        }
    }

    /// Build a handle carrying `value` in the fewest big-endian bytes.
    pub fn from_value(code: u8, value: u64) -> Self {
        let counter = MAX_HANDLE_BYTES - (value.leading_zeros() as usize / 8);
        let be = value.to_be_bytes();
        let mut bytes = [0u8; MAX_HANDLE_BYTES];
        bytes[..counter].copy_from_slice(&be[MAX_HANDLE_BYTES - counter..]);
        Self {
            code,
            counter: counter as u8,
            bytes,
        }
    }

    /// The reference code (upper nibble of the handle prefix).
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Number of payload bytes.
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// The raw payload, most significant byte first.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.counter as usize]
    }

    /// The payload as an integer.
    pub fn value(&self) -> u64 {
        self.payload()
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }

    /// The reference type, if the code is a known one.
    pub fn reference_type(&self) -> Option<DwgReferenceType> {
        DwgReferenceType::from_code(self.code)
    }

    /// Resolve the absolute handle against the owning object's handle.
    ///
    /// - Code 6: reference_handle + 1
    /// - Code 8: reference_handle - 1
    /// - Code 0xA: reference_handle + payload
    /// - Code 0xC: reference_handle - payload
    /// - Anything else: the payload itself
    pub fn resolve(&self, reference_handle: u64) -> u64 {
        match self.code {
            0x6 => reference_handle.wrapping_add(1),
            0x8 => reference_handle.wrapping_sub(1),
            0xA => reference_handle.wrapping_add(self.value()),
            0xC => reference_handle.wrapping_sub(self.value()),
            _ => self.value(),
        }
    }
}

impl fmt::Debug for HandleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleReference")
            .field("code", &self.code)
            .field("counter", &self.counter)
            .field("payload", &self.payload())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_type_from_code() {
        assert_eq!(
            DwgReferenceType::from_code(2),
            Some(DwgReferenceType::SoftOwnership)
        );
        assert_eq!(
            DwgReferenceType::from_code(0xC),
            Some(DwgReferenceType::SoftPointerMinusOffset)
        );
        assert_eq!(DwgReferenceType::from_code(1), None);
        assert_eq!(DwgReferenceType::from_code(7), None);
    }

    #[test]
    fn test_is_absolute() {
        assert!(DwgReferenceType::HardPointer.is_absolute());
        assert!(DwgReferenceType::HardOwnershipPlus1.is_offset());
    }

    #[test]
    fn test_payload_and_value() {
        let href = HandleReference::new(5, &[0x01, 0x2C]).unwrap();
        assert_eq!(href.code(), 5);
        assert_eq!(href.counter(), 2);
        assert_eq!(href.payload(), &[0x01, 0x2C]);
        assert_eq!(href.value(), 0x012C);
        assert_eq!(href.reference_type(), Some(DwgReferenceType::HardPointer));
    }

    #[test]
    fn test_empty_payload() {
        let href = HandleReference::new(0, &[]).unwrap();
        assert!(href.payload().is_empty());
        assert_eq!(href.value(), 0);
    }

    #[test]
    fn test_payload_too_long() {
        assert_eq!(
            HandleReference::new(4, &[0u8; 9]),
            Err(DwgError::HandleTooLong { counter: 9, max: 8 })
        );
    }

    #[test]
    fn test_from_inline_matches_new() {
        let mut bytes = [0u8; MAX_HANDLE_BYTES];
        bytes[..3].copy_from_slice(&[0x0A, 0x0B, 0x0C]);
        let href = HandleReference::from_inline(3, 3, bytes);
        assert_eq!(href, HandleReference::new(3, &[0x0A, 0x0B, 0x0C]).unwrap());
        assert_eq!(href.value(), 0x0A0B0C);
    }

    #[test]
    fn test_from_value() {
        let href = HandleReference::from_value(4, 0x1A2B);
        assert_eq!(href.payload(), &[0x1A, 0x2B]);
        assert_eq!(HandleReference::from_value(4, 0).counter(), 0);
        assert_eq!(HandleReference::from_value(4, u64::MAX).counter(), 8);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(HandleReference::from_value(4, 0x1A).resolve(0x50), 0x1A);
        assert_eq!(HandleReference::new(6, &[]).unwrap().resolve(0x10), 0x11);
        assert_eq!(HandleReference::new(8, &[]).unwrap().resolve(0x10), 0x0F);
        assert_eq!(HandleReference::from_value(0xA, 5).resolve(0x10), 0x15);
        assert_eq!(HandleReference::from_value(0xC, 3).resolve(0x10), 0x0D);
    }
}
