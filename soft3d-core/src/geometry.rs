/// Raw mesh data: vertex positions and index faces
use crate::error::MeshError;
use crate::transform::{point, Vec4};

/// Indices into a vertex list. Two indices draw an edge, three or more a polygon.
pub type Face = Vec<usize>;

/// Vertices and faces as handed over by a loader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec4>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec4>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Check that every face has at least two indices, all in range
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if indices.len() < 2 {
                return Err(MeshError::FaceTooShort {
                    face,
                    len: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= count) {
                return Err(MeshError::FaceIndexOutOfRange { face, index, count });
            }
        }
        Ok(())
    }

    /// Unit cube spanning [0, 1] on every axis, six quad faces
    pub fn cube() -> Self {
        let vertices = vec![
            point(0.0, 0.0, 0.0),
            point(0.0, 1.0, 0.0),
            point(1.0, 1.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(0.0, 0.0, 1.0),
            point(0.0, 1.0, 1.0),
            point(1.0, 1.0, 1.0),
            point(1.0, 0.0, 1.0),
        ];
        let faces = vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![0, 4, 5, 1],
            vec![2, 3, 7, 6],
            vec![1, 2, 6, 5],
            vec![0, 3, 7, 4],
        ];
        Self { vertices, faces }
    }
}
