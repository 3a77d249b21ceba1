//! Primitive reader for XAC payloads
//!
//! Every multi-byte value in an XAC file after the 8-byte header uses the
//! byte order selected by the header flag, so the cursor carries an
//! [`Endian`] chosen at runtime instead of a `byteorder` type parameter.

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::Serialize;

use crate::error::{Error, Result};

/// Byte order of a file, fixed once by the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

macro_rules! read_primitive {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $method:ident, $size:expr) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> Result<$ty> {
            self.require($size)?;
            let value = match self.endian {
                Endian::Little => self.inner.$method::<LittleEndian>()?,
                Endian::Big => self.inner.$method::<BigEndian>()?,
            };
            Ok(value)
        }
    };
}

/// Bounded cursor over one byte window (a whole file or a chunk payload).
#[derive(Debug, Clone)]
pub struct XacCursor<'a> {
    inner: Cursor<&'a [u8]>,
    endian: Endian,
}

impl<'a> XacCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            inner: Cursor::new(data),
            endian,
        }
    }

    #[must_use]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Current offset inside the window.
    #[must_use]
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Total size of the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the current position and the end of the window.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Move to an absolute offset inside the window (clamped to its end).
    pub fn seek_to(&mut self, offset: usize) {
        self.inner.set_position(offset.min(self.len()) as u64);
    }

    fn require(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(Error::TruncatedRead { needed, available });
        }
        Ok(())
    }

    /// Advance past `count` bytes without interpreting them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.require(count)?;
        self.inner.set_position((self.position() + count) as u64);
        Ok(())
    }

    /// Borrow the next `count` bytes of the window.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.require(count)?;
        let data: &'a [u8] = *self.inner.get_ref();
        let start = self.position();
        self.inner.set_position((start + count) as u64);
        Ok(&data[start..start + count])
    }

    /// Read a single raw byte (byte order does not apply).
    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        Ok(self.inner.read_u8()?)
    }

    read_primitive!(read_i16, i16, read_i16, 2);
    read_primitive!(read_u16, u16, read_u16, 2);
    read_primitive!(read_i32, i32, read_i32, 4);
    read_primitive!(read_u32, u32, read_u32, 4);
    read_primitive!(read_f32, f32, read_f32, 4);

    /// Read a `u32` length followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    pub fn read_vec2(&mut self) -> Result<Vec2> {
        Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec4(&mut self) -> Result<Vec4> {
        Ok(Vec4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Quaternions are stored as `x, y, z, w`.
    pub fn read_quat(&mut self) -> Result<Quat> {
        Ok(Quat::from_vec4(self.read_vec4()?))
    }

    /// 4x4 matrix stored row-major as four 4-float rows.
    pub fn read_mat4(&mut self) -> Result<Mat4> {
        let rows = [
            self.read_vec4()?,
            self.read_vec4()?,
            self.read_vec4()?,
            self.read_vec4()?,
        ];
        Ok(Mat4::from_cols(rows[0], rows[1], rows[2], rows[3]).transpose())
    }
}

/// Clamp a signed count read from a payload; negative counts mean "none".
#[must_use]
pub fn count_from_i32(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}
