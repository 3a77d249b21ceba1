//! Payload builder shared by the unit tests

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use glam::{Quat, Vec3};

use super::cursor::Endian;

pub struct PayloadWriter {
    data: Vec<u8>,
    endian: Endian,
}

macro_rules! write_primitive {
    ($name:ident, $ty:ty, $method:ident) => {
        pub fn $name(&mut self, value: $ty) -> &mut Self {
            match self.endian {
                Endian::Little => self.data.$method::<LittleEndian>(value).unwrap(),
                Endian::Big => self.data.$method::<BigEndian>(value).unwrap(),
            }
            self
        }
    };
}

impl PayloadWriter {
    pub fn new(endian: Endian) -> Self {
        Self { data: Vec::new(), endian }
    }

    write_primitive!(i16, i16, write_i16);
    write_primitive!(u16, u16, write_u16);
    write_primitive!(i32, i32, write_i32);
    write_primitive!(u32, u32, write_u32);
    write_primitive!(f32, f32, write_f32);

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.u32(value.len() as u32);
        self.bytes(value.as_bytes())
    }

    pub fn vec3(&mut self, v: Vec3) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z)
    }

    pub fn quat(&mut self, q: Quat) -> &mut Self {
        self.f32(q.x).f32(q.y).f32(q.z).f32(q.w)
    }

    /// One full node record with identity rotation and unit scale.
    pub fn node(&mut self, name: &str, parent: i32, position: Vec3) -> &mut Self {
        self.quat(Quat::IDENTITY).quat(Quat::IDENTITY);
        self.vec3(position).vec3(Vec3::ONE);
        self.bytes(&[0; 20]);
        self.i32(parent).i32(0).i32(1);
        for i in 0..16 {
            self.f32(if i % 5 == 0 { 1.0 } else { 0.0 });
        }
        self.f32(1.0);
        self.string(name)
    }

    /// Layer header plus its per-vertex data.
    pub fn layer(&mut self, semantic: i32, width: i32, data: &[u8]) -> &mut Self {
        self.i32(semantic).i32(width).u8(0).u8(1).u16(0);
        self.bytes(data)
    }

    /// Position layer from explicit vertices.
    pub fn position_layer(&mut self, positions: &[Vec3]) -> &mut Self {
        let mut data = PayloadWriter::new(self.endian);
        for p in positions {
            data.vec3(*p);
        }
        self.layer(0, 12, &data.finish())
    }

    /// Submesh header, local indices and `bone_count` zeroed bone entries.
    pub fn submesh(&mut self, indices: &[i32], vertex_count: i32, material: i32, bone_count: i32) -> &mut Self {
        self.i32(indices.len() as i32).i32(vertex_count).i32(material).i32(bone_count);
        for &i in indices {
            self.i32(i);
        }
        for _ in 0..bone_count {
            self.u32(0);
        }
        self
    }

    pub fn finish(&self) -> Vec<u8> {
        self.data.clone()
    }
}
