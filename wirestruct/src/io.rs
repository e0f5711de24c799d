//! Positional [`Reader`] and [`Writer`] over fixed-size byte buffers.
//!
//! Record fields live at absolute offsets, so unlike a streaming cursor both
//! types address the buffer by `(offset, len)` and never advance. Every
//! access is bounds checked; an out-of-range field yields
//! [`ReadError::ReadSizeLimit`] or [`WriteError::WriteSizeLimit`].
use {
    crate::kind::Endian,
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Attempting to read {len} bytes at offset {offset} of a {available} byte buffer")]
    ReadSizeLimit {
        offset: usize,
        len: usize,
        available: usize,
    },
}

pub type ReadResult<T> = core::result::Result<T, ReadError>;

#[cold]
pub const fn read_size_limit(offset: usize, len: usize, available: usize) -> ReadError {
    ReadError::ReadSizeLimit {
        offset,
        len,
        available,
    }
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Attempting to write {len} bytes at offset {offset} of a {available} byte buffer")]
    WriteSizeLimit {
        offset: usize,
        len: usize,
        available: usize,
    },
}

pub type WriteResult<T> = core::result::Result<T, WriteError>;

#[cold]
pub const fn write_size_limit(offset: usize, len: usize, available: usize) -> WriteError {
    WriteError::WriteSizeLimit {
        offset,
        len,
        available,
    }
}

/// Read-only view of a record buffer.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    #[inline]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    #[inline]
    pub fn chunk_at(&self, offset: usize, len: usize) -> ReadResult<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.buf.get(offset..end))
            .ok_or_else(|| read_size_limit(offset, len, self.buf.len()))
    }

    /// A reader over the sub-range `[offset, offset + len)`.
    #[inline]
    pub fn sub(&self, offset: usize, len: usize) -> ReadResult<Reader<'a>> {
        self.chunk_at(offset, len).map(Reader::new)
    }

    #[inline]
    pub fn read_u8(&self, offset: usize) -> ReadResult<u8> {
        Ok(self.chunk_at(offset, 1)?[0])
    }

    #[inline]
    pub fn read_i8(&self, offset: usize) -> ReadResult<i8> {
        Ok(self.read_u8(offset)? as i8)
    }
}

/// Mutable view of a record buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
}

impl<'a> Writer<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Mutably borrow `len` bytes starting at `offset`.
    #[inline]
    pub fn chunk_at(&mut self, offset: usize, len: usize) -> WriteResult<&mut [u8]> {
        let available = self.buf.len();
        offset
            .checked_add(len)
            .and_then(|end| self.buf.get_mut(offset..end))
            .ok_or_else(|| write_size_limit(offset, len, available))
    }

    /// A writer over the sub-range `[offset, offset + len)`.
    #[inline]
    pub fn sub(&mut self, offset: usize, len: usize) -> WriteResult<Writer<'_>> {
        self.chunk_at(offset, len).map(Writer::new)
    }

    #[inline]
    pub fn write_at(&mut self, offset: usize, src: &[u8]) -> WriteResult<()> {
        self.chunk_at(offset, src.len())?.copy_from_slice(src);
        Ok(())
    }

    #[inline]
    pub fn write_u8(&mut self, offset: usize, val: u8) -> WriteResult<()> {
        self.write_at(offset, &[val])
    }

    #[inline]
    pub fn write_i8(&mut self, offset: usize, val: i8) -> WriteResult<()> {
        self.write_u8(offset, val as u8)
    }
}

macro_rules! impl_int {
    ($type:ty, $read:ident, $write:ident) => {
        impl Reader<'_> {
            #[inline]
            pub fn $read(&self, offset: usize, endian: Endian) -> ReadResult<$type> {
                let src = self.chunk_at(offset, size_of::<$type>())?;
                Ok(match endian {
                    Endian::Big => BigEndian::$read(src),
                    Endian::Little => LittleEndian::$read(src),
                })
            }
        }

        impl Writer<'_> {
            #[inline]
            pub fn $write(&mut self, offset: usize, val: $type, endian: Endian) -> WriteResult<()> {
                let dst = self.chunk_at(offset, size_of::<$type>())?;
                match endian {
                    Endian::Big => BigEndian::$write(dst, val),
                    Endian::Little => LittleEndian::$write(dst, val),
                }
                Ok(())
            }
        }
    };
}

impl_int!(u16, read_u16, write_u16);
impl_int!(i16, read_i16, write_i16);
impl_int!(u32, read_u32, write_u32);
impl_int!(i32, read_i32, write_i32);
impl_int!(u64, read_u64, write_u64);
impl_int!(i64, read_i64, write_i64);

#[cfg(test)]
mod tests {
    use {super::*, crate::proptest_config::proptest_cfg, proptest::prelude::*};

    #[test]
    fn writer_rejects_out_of_bounds() {
        let mut buf = [0u8; 4];
        let mut writer = Writer::new(&mut buf);
        assert!(matches!(
            writer.write_u32(1, 7, Endian::Big),
            Err(WriteError::WriteSizeLimit {
                offset: 1,
                len: 4,
                available: 4
            })
        ));
        assert!(writer.write_u8(usize::MAX, 1).is_err());
        // Nothing was written.
        assert_eq!(buf, [0; 4]);
    }

    #[test]
    fn reader_rejects_out_of_bounds() {
        let reader = Reader::new(&[1, 2, 3]);
        assert!(matches!(
            reader.read_u16(2, Endian::Little),
            Err(ReadError::ReadSizeLimit {
                offset: 2,
                len: 2,
                available: 3
            })
        ));
        assert!(reader.chunk_at(usize::MAX, 2).is_err());
        assert_eq!(reader.read_u16(1, Endian::Little).unwrap(), 0x0302);
    }

    #[test]
    fn sub_writer_is_bounded() {
        let mut buf = [0u8; 6];
        let mut writer = Writer::new(&mut buf);
        {
            let mut sub = writer.sub(2, 2).unwrap();
            sub.write_u16(0, 0xABCD, Endian::Big).unwrap();
            assert!(sub.write_u8(2, 1).is_err());
        }
        assert_eq!(buf, [0, 0, 0xAB, 0xCD, 0, 0]);
    }

    proptest! {
        #![proptest_config(proptest_cfg())]

        #[test]
        fn int_endianness(val in any::<u64>(), signed in any::<i32>()) {
            let mut buf = [0u8; 12];
            let mut writer = Writer::new(&mut buf);
            writer.write_u64(0, val, Endian::Big).unwrap();
            writer.write_i32(8, signed, Endian::Little).unwrap();
            prop_assert_eq!(&buf[..8], &val.to_be_bytes());
            prop_assert_eq!(&buf[8..], &signed.to_le_bytes());

            let reader = Reader::new(&buf);
            prop_assert_eq!(reader.read_u64(0, Endian::Big).unwrap(), val);
            prop_assert_eq!(reader.read_i32(8, Endian::Little).unwrap(), signed);
        }
    }
}
