//! Decoded scene and cross-chunk linking
//!
//! Chunks may reference each other in any file order (a mesh can name a node
//! that only appears later), so references are resolved after the whole pass
//! rather than while decoding.

use indexmap::IndexMap;
use serde::Serialize;

use super::diagnostics::{Diagnostic, LinkIssue};
use super::document::{FileHeader, Material, MaterialInfo, Mesh, Node, Skin, SkinInfluence, Submesh};

/// Everything decoded from one XAC file. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub header: FileHeader,
    /// Nodes in file order; a node's index is its id.
    pub nodes: Vec<Node>,
    /// Meshes keyed by owning node id, in first-insertion order.
    pub meshes: IndexMap<i32, Mesh>,
    /// Skins keyed by owning node id, in first-insertion order.
    pub skins: IndexMap<i32, Skin>,
    pub materials: Vec<Material>,
    pub material_info: Option<MaterialInfo>,
}

impl Scene {
    #[must_use]
    pub fn new(header: FileHeader) -> Self {
        Self {
            header,
            nodes: Vec::new(),
            meshes: IndexMap::new(),
            skins: IndexMap::new(),
            materials: Vec::new(),
            material_info: None,
        }
    }

    fn node_index(&self, id: i32) -> Option<usize> {
        usize::try_from(id).ok().filter(|&i| i < self.nodes.len())
    }

    #[must_use]
    pub fn node_by_id(&self, id: i32) -> Option<&Node> {
        self.node_index(id).map(|i| &self.nodes[i])
    }

    /// First node with this name, with its index.
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<(usize, &Node)> {
        self.nodes.iter().enumerate().find(|(_, n)| n.name == name)
    }

    /// Index of the parent of `node`, or `None` for a root or unknown node.
    #[must_use]
    pub fn parent_of(&self, node: usize) -> Option<usize> {
        self.nodes
            .get(node)
            .and_then(|n| self.node_index(n.parent_index))
    }

    /// A node is a root when its parent index is negative or past the end of
    /// the node list.
    #[must_use]
    pub fn is_root(&self, node: usize) -> bool {
        node < self.nodes.len() && self.parent_of(node).is_none()
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&i| self.is_root(i))
    }

    pub fn children_of(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&i| self.parent_of(i) == Some(node))
    }

    #[must_use]
    pub fn mesh_node(&self, mesh: &Mesh) -> Option<&Node> {
        self.node_by_id(mesh.node_id)
    }

    #[must_use]
    pub fn submesh_material(&self, submesh: &Submesh) -> Option<&Material> {
        usize::try_from(submesh.material_index)
            .ok()
            .and_then(|i| self.materials.get(i))
    }

    /// Node a skin influence is bound to. Bone ids are node indices.
    #[must_use]
    pub fn influence_node(&self, influence: &SkinInfluence) -> Option<&Node> {
        self.node_by_id(i32::from(influence.bone_id))
    }

    #[must_use]
    pub fn bone_influences<'a>(&self, skin: &'a Skin, bone: usize) -> Option<&'a [SkinInfluence]> {
        skin.bone_influences(bone)
    }

    /// Check every cross-chunk reference.
    ///
    /// Unresolved references are reported, never repaired; the scene is
    /// returned as decoded.
    #[must_use]
    pub fn link(&self) -> Vec<Diagnostic> {
        let mut issues = Vec::new();

        for mesh in self.meshes.values() {
            if self.mesh_node(mesh).is_none() {
                issues.push(Diagnostic::link(
                    LinkIssue::MeshNodeMissing,
                    format!("mesh references node {} but the scene has {} nodes", mesh.node_id, self.nodes.len()),
                ));
            }
            let bad: Vec<i32> = mesh
                .submeshes
                .iter()
                .filter(|s| self.submesh_material(s).is_none())
                .map(|s| s.material_index)
                .collect();
            if !bad.is_empty() {
                issues.push(Diagnostic::link(
                    LinkIssue::MaterialIndexOutOfRange,
                    format!(
                        "mesh on node {} uses material indices {:?} but the scene has {} materials",
                        mesh.node_id,
                        bad,
                        self.materials.len()
                    ),
                ));
            }
        }

        for skin in self.skins.values() {
            if self.node_by_id(skin.node_id).is_none() {
                issues.push(Diagnostic::link(
                    LinkIssue::SkinNodeMissing,
                    format!("skin references node {} but the scene has {} nodes", skin.node_id, self.nodes.len()),
                ));
            }
            let bad_bones = skin
                .influences
                .iter()
                .filter(|i| self.influence_node(i).is_none())
                .count();
            if bad_bones > 0 {
                issues.push(Diagnostic::link(
                    LinkIssue::BoneOutOfRange,
                    format!(
                        "skin on node {}: {} of {} influences name a missing bone",
                        skin.node_id,
                        bad_bones,
                        skin.influences.len()
                    ),
                ));
            }
            let bad_ranges = (0..skin.ranges.len())
                .filter(|&b| skin.bone_influences(b).is_none())
                .count();
            if bad_ranges > 0 {
                issues.push(Diagnostic::link(
                    LinkIssue::SkinRangeOutOfBounds,
                    format!(
                        "skin on node {}: {} of {} ranges exceed {} influences",
                        skin.node_id,
                        bad_ranges,
                        skin.ranges.len(),
                        skin.influences.len()
                    ),
                ));
            }
        }

        if let Some(info) = self
            .material_info
            .filter(|info| usize::try_from(info.standard_materials).ok() != Some(self.materials.len()))
        {
            issues.push(Diagnostic::link(
                LinkIssue::MaterialCountMismatch,
                format!(
                    "material info declares {} standard materials, {} decoded",
                    info.standard_materials,
                    self.materials.len()
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xac::diagnostics::DiagnosticKind;
    use crate::formats::xac::document::SkinRange;
    use glam::{Quat, Vec3, Vec4};

    fn node(name: &str, parent_index: i32) -> Node {
        Node {
            name: name.to_string(),
            parent_index,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale_rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    fn material(name: &str) -> Material {
        Material {
            name: name.to_string(),
            ambient: Vec4::ZERO,
            diffuse: Vec4::ONE,
            specular: Vec4::ZERO,
            emissive: Vec4::ZERO,
            shininess: 0.0,
            specular_strength: 0.0,
            opacity: 1.0,
            ior: 1.0,
            double_sided: false,
            wireframe: false,
            transparency_type: 0,
            layers: Vec::new(),
        }
    }

    fn header() -> FileHeader {
        FileHeader {
            major_version: 1,
            minor_version: 0,
            big_endian: false,
            multiply_order: 0,
        }
    }

    fn skeleton() -> Scene {
        let mut scene = Scene::new(header());
        scene.nodes = vec![
            node("root", -1),
            node("spine", 0),
            node("head", 1),
            node("arm", 1),
            node("prop", 99),
        ];
        scene
    }

    #[test]
    fn test_hierarchy_helpers() {
        let scene = skeleton();
        assert_eq!(scene.roots().collect::<Vec<_>>(), vec![0, 4]);
        assert!(scene.is_root(4));
        assert!(!scene.is_root(10));
        assert_eq!(scene.parent_of(2), Some(1));
        assert_eq!(scene.children_of(1).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(scene.node_by_name("arm").map(|(i, _)| i), Some(3));
        assert!(scene.node_by_id(-1).is_none());
    }

    #[test]
    fn test_link_reports_missing_references() {
        let mut scene = skeleton();
        scene.materials.push(material("body"));

        let mut mesh = Mesh::placeholder(12);
        mesh.submeshes.push(Submesh {
            indices: vec![0, 1, 2],
            vertex_count: 3,
            material_index: 3,
            bone_count: 0,
        });
        scene.meshes.insert(12, mesh);

        scene.skins.insert(
            2,
            Skin {
                node_id: 2,
                is_collision: false,
                influences: vec![
                    SkinInfluence { weight: 1.0, bone_id: 1 },
                    SkinInfluence { weight: 1.0, bone_id: 40 },
                ],
                ranges: vec![SkinRange {
                    first_influence: 1,
                    count: 5,
                }],
            },
        );
        scene.material_info = Some(MaterialInfo {
            total_materials: 2,
            standard_materials: 2,
            fx_materials: 0,
        });

        let kinds: Vec<_> = scene.link().into_iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::Link(LinkIssue::MeshNodeMissing),
                DiagnosticKind::Link(LinkIssue::MaterialIndexOutOfRange),
                DiagnosticKind::Link(LinkIssue::BoneOutOfRange),
                DiagnosticKind::Link(LinkIssue::SkinRangeOutOfBounds),
                DiagnosticKind::Link(LinkIssue::MaterialCountMismatch),
            ]
        );
    }

    #[test]
    fn test_link_clean_scene() {
        let mut scene = skeleton();
        scene.materials.push(material("body"));
        let mut mesh = Mesh::placeholder(0);
        mesh.submeshes.push(Submesh {
            indices: vec![0, 1, 2],
            vertex_count: 3,
            material_index: 0,
            bone_count: 0,
        });
        scene.meshes.insert(0, mesh);
        assert!(scene.link().is_empty());
        assert_eq!(scene.submesh_material(&scene.meshes[&0].submeshes[0]).map(|m| m.name.as_str()), Some("body"));
    }
}
