//! Subdivided icosahedron (geodesic sphere)

use glam::Vec3;

use super::MeshGeometry;

/// Golden ratio
const PHI: f32 = 1.618_034;

const VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

/// Faces wound counter-clockwise when seen from outside
const FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Build an icosahedron subdivided `detail` times and projected onto a sphere
///
/// Each face is split into `(detail + 1)^2` triangles. Normals point
/// radially outwards, which gives smooth shading.
pub fn icosahedron_geometry(radius: f32, detail: u32) -> MeshGeometry {
    let cols = detail as usize + 1;
    let mut positions = Vec::with_capacity(FACES.len() * cols * cols * 3);

    for face in FACES {
        let [a, b, c] = face.map(|i| Vec3::from_array(VERTICES[i]));
        subdivide_face(a, b, c, cols, &mut positions);
    }

    let normals: Vec<Vec3> = positions.iter().map(|p| p.normalize()).collect();
    let positions = normals.iter().map(|n| *n * radius).collect();

    MeshGeometry { positions, normals }
}

/// Split triangle (a, b, c) into a `cols` x `cols` triangular grid
fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<Vec3>) {
    // grid[i] holds the row of points between edge a-c and edge b-c at height i
    let grid: Vec<Vec<Vec3>> = (0..=cols)
        .map(|i| {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let rows = cols - i;

            if rows == 0 {
                vec![aj]
            } else {
                (0..=rows)
                    .map(|j| aj.lerp(bj, j as f32 / rows as f32))
                    .collect()
            }
        })
        .collect();

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}
