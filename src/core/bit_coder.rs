use std::io::{self, Read, Write};

/// Reads little-endian values from a byte source.
/// Every `std::io::Read` is a `ByteReader`.
pub trait ByteReader {
    /// Fills `buf` entirely. Fails with [ReaderErr::NotEnoughData] if the source
    /// ends before `buf.len()` bytes are available.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ReaderErr>;

    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        let mut out = [0; 1];
        self.read_bytes(&mut out)?;
        Ok(out[0])
    }
    fn read_u16(&mut self) -> Result<u16, ReaderErr> {
        let mut out = [0; 2];
        self.read_bytes(&mut out)?;
        Ok(u16::from_le_bytes(out))
    }
    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        let mut out = [0; 4];
        self.read_bytes(&mut out)?;
        Ok(u32::from_le_bytes(out))
    }
    fn read_f32(&mut self) -> Result<f32, ReaderErr> {
        Ok(f32::from_bits(self.read_u32()?))
    }
}

impl<R: Read + ?Sized> ByteReader for R {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), ReaderErr> {
        self.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => ReaderErr::NotEnoughData,
            _ => ReaderErr::Io(e),
        })
    }
}

/// Writes little-endian values to a byte sink.
/// Every `std::io::Write` is a `ByteWriter`.
pub trait ByteWriter {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.write_bytes(&[value])
    }
    fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }
    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }
    fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.write_u32(value.to_bits())
    }
}

impl<W: Write + ?Sized> ByteWriter for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum ReaderErr {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Not enough data to read")]
    NotEnoughData,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_layout() {
        let mut buffer = Vec::new();
        buffer.write_u16(0x0201).unwrap();
        buffer.write_u32(0x06050403).unwrap();
        buffer.write_f32(1.0).unwrap();
        assert_eq!(buffer, vec![1, 2, 3, 4, 5, 6, 0x00, 0x00, 0x80, 0x3f]);

        let mut reader = buffer.as_slice();
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
        assert_eq!(reader.read_u32().unwrap(), 0x06050403);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert!(reader.is_empty());
    }

    #[test]
    fn short_read_is_not_enough_data() {
        let data = [1_u8, 2, 3];
        let mut reader = &data[..];
        assert!(matches!(reader.read_u32(), Err(ReaderErr::NotEnoughData)));
    }

    #[test]
    fn io_failure_is_propagated() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
        match Broken.read_u8() {
            Err(ReaderErr::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
