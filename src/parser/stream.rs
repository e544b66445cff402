use crate::error::{DecodeError, Result};

/// Cursor over a raw uplink payload, reading big-endian fields
pub struct PayloadStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(DecodeError::UnexpectedEof),
        }
    }

    /// Read a 16-bit unsigned big-endian value
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let hi = self.read_byte()? as u16;
        let lo = self.read_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    /// Read a 24-bit unsigned big-endian value
    pub fn read_u24_be(&mut self) -> Result<u32> {
        self.ensure(3)?;
        let b0 = self.read_byte()? as u32;
        let b1 = self.read_byte()? as u32;
        let b2 = self.read_byte()? as u32;
        Ok((b0 << 16) | (b1 << 8) | b2)
    }

    // Multi-byte reads are all-or-nothing so the cursor never lands mid-field
    fn ensure(&self, count: usize) -> Result<()> {
        if self.remaining() < count {
            Err(DecodeError::UnexpectedEof)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_big_endian_fields() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut stream = PayloadStream::new(&data);

        assert_eq!(stream.read_byte().unwrap(), 0x01);
        assert_eq!(stream.read_u16_be().unwrap(), 0x0203);
        assert_eq!(stream.read_u24_be().unwrap(), 0x040506);
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.position(), 6);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0xAA, 0xBB];
        let mut stream = PayloadStream::new(&data);

        assert!(matches!(
            stream.read_u24_be(),
            Err(DecodeError::UnexpectedEof)
        ));
        // Failed read leaves the cursor untouched
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.read_u16_be().unwrap(), 0xAABB);
        assert!(matches!(stream.read_byte(), Err(DecodeError::UnexpectedEof)));
    }
}
