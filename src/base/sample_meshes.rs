use super::{Cell, GeoKind, Mesh, Point};

/// Holds sample meshes for tests and examples
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a mesh with one Qua4 (unit square)
    #[rustfmt::skip]
    pub fn one_qua4() -> Mesh {
        //      y
        //      ^
        // 1.0  3-----------2
        //      |           |    [#] indicates id
        //      |    [0]    |    (#) indicates attribute
        //      |    (1)    |
        //      |           |
        // 0.0  0-----------1 -> x
        //     0.0         1.0
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, coords: vec![1.0, 0.0] },
                Point { id: 2, coords: vec![1.0, 1.0] },
                Point { id: 3, coords: vec![0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 2, 3] },
            ],
        }
    }

    /// Returns a mesh with two Qua4 side by side
    #[rustfmt::skip]
    pub fn two_qua4() -> Mesh {
        //      y
        //      ^
        // 1.0  3-----------4-----------5
        //      |           |           |
        //      |    [0]    |    [1]    |
        //      |    (1)    |    (1)    |
        //      |           |           |
        // 0.0  0-----------1-----------2 -> x
        //     0.0         1.0         2.0
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, coords: vec![1.0, 0.0] },
                Point { id: 2, coords: vec![2.0, 0.0] },
                Point { id: 3, coords: vec![0.0, 1.0] },
                Point { id: 4, coords: vec![1.0, 1.0] },
                Point { id: 5, coords: vec![2.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 4, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Qua4, points: vec![1, 2, 5, 4] },
            ],
        }
    }

    /// Returns a mesh with two Tri3 forming a unit square
    #[rustfmt::skip]
    pub fn two_tri3() -> Mesh {
        //      y
        //      ^
        // 1.0  3------------2
        //      |`.      [1] |
        //      |  `.    (1) |
        //      |    `.      |
        //      |      `.    |
        //      | [0]    `.  |
        //      | (1)      `.|
        // 0.0  0------------1 -> x
        //     0.0          1.0
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, coords: vec![1.0, 0.0] },
                Point { id: 2, coords: vec![1.0, 1.0] },
                Point { id: 3, coords: vec![0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Tri3, points: vec![0, 1, 3] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Tri3, points: vec![2, 3, 1] },
            ],
        }
    }

    /// Returns a mesh with one Hex8 (unit cube)
    #[rustfmt::skip]
    pub fn one_hex8() -> Mesh {
        //          7--------------6  1.0
        //         /.             /|
        //        / .            / |        z
        //       /  .           /  |        ↑
        //      /   .          /   |        o → y
        //     4--------------5    |       ↙
        //     |    .         |    |      x
        //     |    3---------|----2  0.0
        //     |   /   [0]    |   /
        //     |  /    (1)    |  /
        //     | /            | /
        //     |/             |/
        //     0--------------1
        //
        // (0: origin; 1: x = 1; 3: y = 1; 4: z = 1)
        Mesh {
            ndim: 3,
            points: vec![
                Point { id: 0, coords: vec![0.0, 0.0, 0.0] },
                Point { id: 1, coords: vec![1.0, 0.0, 0.0] },
                Point { id: 2, coords: vec![1.0, 1.0, 0.0] },
                Point { id: 3, coords: vec![0.0, 1.0, 0.0] },
                Point { id: 4, coords: vec![0.0, 0.0, 1.0] },
                Point { id: 5, coords: vec![1.0, 0.0, 1.0] },
                Point { id: 6, coords: vec![1.0, 1.0, 1.0] },
                Point { id: 7, coords: vec![0.0, 1.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Hex8, points: vec![0, 1, 2, 3, 4, 5, 6, 7] },
            ],
        }
    }

    /// Returns a mesh with one Tet4 (corner of the unit cube)
    #[rustfmt::skip]
    pub fn one_tet4() -> Mesh {
        Mesh {
            ndim: 3,
            points: vec![
                Point { id: 0, coords: vec![0.0, 0.0, 0.0] },
                Point { id: 1, coords: vec![1.0, 0.0, 0.0] },
                Point { id: 2, coords: vec![0.0, 1.0, 0.0] },
                Point { id: 3, coords: vec![0.0, 0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Tet4, points: vec![0, 1, 2, 3] },
            ],
        }
    }

    /// Returns a structured mesh of Qua4 covering the rectangle [0,lx] × [0,ly]
    ///
    /// Points are numbered row by row from the bottom-left corner; all cells have attribute 1.
    pub fn block_2d(nx: usize, ny: usize, lx: f64, ly: f64) -> Mesh {
        let mut points = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..(ny + 1) {
            for i in 0..(nx + 1) {
                points.push(Point {
                    id: points.len(),
                    coords: vec![lx * (i as f64) / (nx as f64), ly * (j as f64) / (ny as f64)],
                });
            }
        }
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let a = j * (nx + 1) + i;
                cells.push(Cell {
                    id: cells.len(),
                    attribute: 1,
                    kind: GeoKind::Qua4,
                    points: vec![a, a + 1, a + nx + 2, a + nx + 1],
                });
            }
        }
        Mesh { ndim: 2, points, cells }
    }

    /// Returns a structured mesh of Hex8 covering the box [0,lx] × [0,ly] × [0,lz]
    ///
    /// Points are numbered layer by layer from the bottom; all cells have attribute 1.
    pub fn block_3d(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Mesh {
        let layer = (nx + 1) * (ny + 1);
        let mut points = Vec::with_capacity(layer * (nz + 1));
        for k in 0..(nz + 1) {
            for j in 0..(ny + 1) {
                for i in 0..(nx + 1) {
                    points.push(Point {
                        id: points.len(),
                        coords: vec![
                            lx * (i as f64) / (nx as f64),
                            ly * (j as f64) / (ny as f64),
                            lz * (k as f64) / (nz as f64),
                        ],
                    });
                }
            }
        }
        let mut cells = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let a = k * layer + j * (nx + 1) + i;
                    let bottom = [a, a + 1, a + nx + 2, a + nx + 1];
                    let mut cell_points = bottom.to_vec();
                    cell_points.extend(bottom.iter().map(|p| p + layer));
                    cells.push(Cell {
                        id: cells.len(),
                        attribute: 1,
                        kind: GeoKind::Hex8,
                        points: cell_points,
                    });
                }
            }
        }
        Mesh { ndim: 3, points, cells }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
