/// Face colors in mesh order: front, back, left, right, top, bottom.
pub const FACE_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Indexed cube with separate position and color streams.
#[derive(Debug, Clone)]
pub struct CubeMesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl CubeMesh {
    /// Cube of edge `size` centred on the origin, four vertices per face so
    /// each face gets a flat color and its own texture corners.
    pub fn new(size: f32) -> Self {
        let s = size / 2.0;
        #[rustfmt::skip]
        let positions = vec![
            // Front
            [-s, -s,  s], [ s, -s,  s], [ s,  s,  s], [-s,  s,  s],
            // Back
            [-s, -s, -s], [ s, -s, -s], [ s,  s, -s], [-s,  s, -s],
            // Left
            [-s, -s, -s], [-s, -s,  s], [-s,  s,  s], [-s,  s, -s],
            // Right
            [ s, -s, -s], [ s, -s,  s], [ s,  s,  s], [ s,  s, -s],
            // Top
            [-s,  s, -s], [ s,  s, -s], [ s,  s,  s], [-s,  s,  s],
            // Bottom
            [-s, -s, -s], [ s, -s, -s], [ s, -s,  s], [-s, -s,  s],
        ];

        let colors = FACE_COLORS
            .iter()
            .flat_map(|c| std::iter::repeat_n(*c, 4))
            .collect();

        let indices = (0..6u16)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base + 2, base + 3, base]
            })
            .collect();

        Self {
            positions,
            colors,
            indices,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_counts() {
        let mesh = CubeMesh::new(0.5);
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.colors.len(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    }

    #[test]
    fn vertices_lie_on_cube_surface() {
        let mesh = CubeMesh::new(0.5);
        for p in &mesh.positions {
            assert!(p.iter().all(|c| c.abs() == 0.25));
        }
    }

    #[test]
    fn each_face_has_one_color() {
        let mesh = CubeMesh::new(1.0);
        for (face, chunk) in mesh.colors.chunks(4).enumerate() {
            assert!(chunk.iter().all(|c| *c == FACE_COLORS[face]));
        }
    }

    #[test]
    fn face_vertices_are_coplanar() {
        let mesh = CubeMesh::new(1.0);
        for face in mesh.positions.chunks(4) {
            let shared_axis = (0..3).any(|axis| face.iter().all(|p| p[axis] == face[0][axis]));
            assert!(shared_axis);
        }
    }

    #[test]
    fn index_pattern_per_face() {
        let mesh = CubeMesh::new(1.0);
        assert_eq!(&mesh.indices[6..12], &[4, 5, 6, 6, 7, 4]);
    }
}
