//! Byte-level XAC file builder for integration tests

#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use glam::{Vec2, Vec3};

pub const NODES: i32 = 0x0B;
pub const MESH: i32 = 1;
pub const SKIN: i32 = 2;
pub const MATERIAL: i32 = 3;
pub const MATERIAL_INFO: i32 = 0x0D;

/// Chunk payload writer in a fixed byte order.
pub struct Payload {
    data: Vec<u8>,
    big_endian: bool,
}

impl Payload {
    pub fn new(big_endian: bool) -> Self {
        Self { data: Vec::new(), big_endian }
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        if self.big_endian {
            self.data.write_i32::<BigEndian>(v).unwrap();
        } else {
            self.data.write_i32::<LittleEndian>(v).unwrap();
        }
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        if self.big_endian {
            self.data.write_i16::<BigEndian>(v).unwrap();
        } else {
            self.data.write_i16::<LittleEndian>(v).unwrap();
        }
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        if self.big_endian {
            self.data.write_f32::<BigEndian>(v).unwrap();
        } else {
            self.data.write_f32::<LittleEndian>(v).unwrap();
        }
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.data.push(v);
        self
    }

    pub fn zeros(&mut self, count: usize) -> &mut Self {
        self.data.resize(self.data.len() + count, 0);
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.i32(s.len() as i32);
        self.data.extend_from_slice(s.as_bytes());
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// A node as written by [`nodes_payload`].
pub struct NodeSpec<'a> {
    pub name: &'a str,
    pub parent: i32,
    pub position: Vec3,
}

pub fn nodes_payload(big_endian: bool, nodes: &[NodeSpec<'_>]) -> Vec<u8> {
    let mut p = Payload::new(big_endian);
    let roots = nodes.iter().filter(|n| n.parent < 0).count();
    p.i32(nodes.len() as i32).i32(roots as i32);
    for node in nodes {
        // rotation, scale rotation
        p.f32(0.0).f32(0.0).f32(0.0).f32(1.0);
        p.f32(0.0).f32(0.0).f32(0.0).f32(1.0);
        p.f32(node.position.x).f32(node.position.y).f32(node.position.z);
        p.f32(1.0).f32(1.0).f32(1.0);
        p.zeros(20);
        p.i32(node.parent).i32(0).i32(1);
        for i in 0..16 {
            p.f32(if i % 5 == 0 { 1.0 } else { 0.0 });
        }
        p.f32(1.0);
        p.string(node.name);
    }
    p.into_bytes()
}

/// A submesh as written by [`mesh_payload`]: local indices plus its vertex window.
pub struct SubmeshSpec<'a> {
    pub indices: &'a [i32],
    pub vertex_count: i32,
    pub material: i32,
    pub bones: i32,
}

pub fn mesh_payload(
    big_endian: bool,
    node_id: i32,
    positions: &[Vec3],
    uvs: Option<&[Vec2]>,
    submeshes: &[SubmeshSpec<'_>],
) -> Vec<u8> {
    let mut p = Payload::new(big_endian);
    let layers = 1 + i32::from(uvs.is_some());
    let index_total: usize = submeshes.iter().map(|s| s.indices.len()).sum();
    p.i32(node_id)
        .i32(0)
        .i32(positions.len() as i32)
        .i32(index_total as i32)
        .i32(submeshes.len() as i32)
        .i32(layers)
        .i32(0);

    p.i32(0).i32(12).u8(0).u8(1).zeros(2);
    for v in positions {
        p.f32(v.x).f32(v.y).f32(v.z);
    }
    if let Some(uvs) = uvs {
        p.i32(3).i32(8).u8(0).u8(1).zeros(2);
        for uv in uvs {
            p.f32(uv.x).f32(uv.y);
        }
    }

    for s in submeshes {
        p.i32(s.indices.len() as i32).i32(s.vertex_count).i32(s.material).i32(s.bones);
        for &i in s.indices {
            p.i32(i);
        }
        p.zeros(4 * s.bones as usize);
    }
    p.into_bytes()
}

/// Skin payload; `influences` are `(weight, bone)`, `ranges` are `(first, count)`.
pub fn skin_payload(big_endian: bool, node_id: i32, influences: &[(f32, i16)], ranges: &[(i32, i32)]) -> Vec<u8> {
    let mut p = Payload::new(big_endian);
    p.i32(node_id).i32(ranges.len() as i32).i32(influences.len() as i32).u8(0).zeros(3);
    for &(weight, bone) in influences {
        p.f32(weight).i16(bone).zeros(2);
    }
    for &(first, count) in ranges {
        p.i32(first).i32(count);
    }
    p.into_bytes()
}

pub fn material_payload(big_endian: bool, name: &str, textures: &[&str]) -> Vec<u8> {
    let mut p = Payload::new(big_endian);
    for _ in 0..4 {
        p.f32(0.5).f32(0.5).f32(0.5).f32(1.0);
    }
    p.f32(20.0).f32(1.0).f32(1.0).f32(1.0);
    p.u8(0).u8(0).u8(0).u8(textures.len() as u8);
    p.string(name);
    for tex in textures {
        p.f32(1.0).f32(0.0).f32(0.0).f32(1.0).f32(1.0).f32(0.0);
        p.i16(0).u8(2).u8(0);
        p.string(tex);
    }
    p.into_bytes()
}

pub fn material_info_payload(big_endian: bool, total: i32, standard: i32, fx: i32) -> Vec<u8> {
    let mut p = Payload::new(big_endian);
    p.i32(total).i32(standard).i32(fx);
    p.into_bytes()
}

/// Whole-file builder: header followed by chunks.
pub struct XacFileBuilder {
    out: Payload,
}

impl XacFileBuilder {
    pub fn new(big_endian: bool) -> Self {
        let mut out = Payload::new(big_endian);
        out.data.extend_from_slice(b"XAC ");
        out.u8(1).u8(0).u8(u8::from(big_endian)).u8(0);
        Self { out }
    }

    pub fn chunk(mut self, type_id: i32, payload: &[u8]) -> Self {
        self.out.i32(type_id).i32(payload.len() as i32).i32(1);
        self.out.data.extend_from_slice(payload);
        self
    }

    /// Chunk header declaring `declared` bytes, followed by `payload` only.
    pub fn chunk_declared(mut self, type_id: i32, declared: i32, payload: &[u8]) -> Self {
        self.out.i32(type_id).i32(declared).i32(1);
        self.out.data.extend_from_slice(payload);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.out.data.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.out.into_bytes()
    }
}
