/// Data reading utilities for consistent parsing across all decoders
///
/// Every reader bounds-checks against the slice and advances the offset, so a
/// decoder that checked the layout size up front can walk its fields in
/// order. The writers mirror the readers for the encode direction.
use crate::errors::DecodeError;
use solana_sdk::pubkey::Pubkey;

fn take<const N: usize>(data: &[u8], offset: &mut usize) -> Result<[u8; N], DecodeError> {
    let end = *offset + N;
    let bytes: [u8; N] = data
        .get(*offset..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(DecodeError::TruncatedAccount {
            expected: end,
            actual: data.len(),
        })?;
    *offset = end;
    Ok(bytes)
}

/// Read a pubkey from data at given offset, advancing the offset
pub fn read_pubkey_at_offset(data: &[u8], offset: &mut usize) -> Result<Pubkey, DecodeError> {
    Ok(Pubkey::new_from_array(take::<32>(data, offset)?))
}

/// Read a u8 value from data at given offset, advancing the offset
pub fn read_u8_at_offset(data: &[u8], offset: &mut usize) -> Result<u8, DecodeError> {
    Ok(take::<1>(data, offset)?[0])
}

/// Read a u16 value from data at given offset, advancing the offset
pub fn read_u16_at_offset(data: &[u8], offset: &mut usize) -> Result<u16, DecodeError> {
    Ok(u16::from_le_bytes(take::<2>(data, offset)?))
}

/// Read an i32 value from data at given offset, advancing the offset
pub fn read_i32_at_offset(data: &[u8], offset: &mut usize) -> Result<i32, DecodeError> {
    Ok(i32::from_le_bytes(take::<4>(data, offset)?))
}

/// Read a u64 value from data at given offset, advancing the offset
pub fn read_u64_at_offset(data: &[u8], offset: &mut usize) -> Result<u64, DecodeError> {
    Ok(u64::from_le_bytes(take::<8>(data, offset)?))
}

/// Read a u128 value from data at given offset, advancing the offset
pub fn read_u128_at_offset(data: &[u8], offset: &mut usize) -> Result<u128, DecodeError> {
    Ok(u128::from_le_bytes(take::<16>(data, offset)?))
}

/// Read a fixed-size byte array (reserved or opaque regions), advancing the offset
pub fn read_bytes_at_offset<const N: usize>(
    data: &[u8],
    offset: &mut usize,
) -> Result<[u8; N], DecodeError> {
    take::<N>(data, offset)
}

/// Bytes past the end of the fixed layout, kept so encoding reproduces the account
pub fn trailing_bytes(data: &[u8], layout_size: usize) -> Vec<u8> {
    data.get(layout_size..).map(<[u8]>::to_vec).unwrap_or_default()
}

/// Fail with `UninitializedPool` when an identifier holds the all-zero sentinel
pub fn ensure_initialized(field: &'static str, key: &Pubkey) -> Result<(), DecodeError> {
    if *key == Pubkey::default() {
        return Err(DecodeError::UninitializedPool { field });
    }
    Ok(())
}

/// Append-only little-endian writer used by the record encoders
#[derive(Debug, Default)]
pub struct LayoutWriter {
    buf: Vec<u8>,
}

impl LayoutWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn pubkey(&mut self, key: &Pubkey) -> &mut Self {
        self.bytes(key.as_ref())
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn u64(&mut self, value: u64) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn u128(&mut self, value: u128) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readers_advance_offset() {
        let mut writer = LayoutWriter::default();
        writer.u8(7).u16(513).i32(-120).u64(42).u128(1 << 64);
        let key = Pubkey::new_unique();
        writer.pubkey(&key);
        let data = writer.finish();

        let mut offset = 0;
        assert_eq!(read_u8_at_offset(&data, &mut offset).unwrap(), 7);
        assert_eq!(read_u16_at_offset(&data, &mut offset).unwrap(), 513);
        assert_eq!(read_i32_at_offset(&data, &mut offset).unwrap(), -120);
        assert_eq!(read_u64_at_offset(&data, &mut offset).unwrap(), 42);
        assert_eq!(read_u128_at_offset(&data, &mut offset).unwrap(), 1 << 64);
        assert_eq!(read_pubkey_at_offset(&data, &mut offset).unwrap(), key);
        assert_eq!(offset, data.len());
    }

    #[test]
    fn test_short_read_is_truncated() {
        let data = [0u8; 20];
        let mut offset = 0;
        assert_eq!(
            read_pubkey_at_offset(&data, &mut offset),
            Err(DecodeError::TruncatedAccount {
                expected: 32,
                actual: 20,
            })
        );
        // offset untouched on failure
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_trailing_bytes() {
        let data = [1u8, 2, 3, 4, 5];
        assert_eq!(trailing_bytes(&data, 3), vec![4, 5]);
        assert!(trailing_bytes(&data, 5).is_empty());
        assert!(trailing_bytes(&data, 9).is_empty());
    }

    #[test]
    fn test_zero_sentinel() {
        assert_eq!(
            ensure_initialized("base_mint", &Pubkey::default()),
            Err(DecodeError::UninitializedPool { field: "base_mint" })
        );
        assert!(ensure_initialized("base_mint", &Pubkey::new_unique()).is_ok());
    }
}
