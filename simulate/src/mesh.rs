//! The track's collision geometry: a bag of flagged triangles and a swept
//! segment query. The query returns a value — nearest hit, clamped contact
//! point, outward normal — so there is no shared "last result" slot to
//! invalidate between calls.

use nalgebra::{Point3, Unit, Vector3};
use ordered_float::NotNan;
use std::ops::BitOr;

/// Per-triangle surface behavior bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceFlags {
    bits: u8,
}

impl SurfaceFlags {
    pub const NONE: SurfaceFlags = SurfaceFlags { bits: 0 };
    pub const WALL: SurfaceFlags = SurfaceFlags { bits: 1 };
    pub const SLIPPERY: SurfaceFlags = SurfaceFlags { bits: 1 << 1 };
    pub const BRAKE: SurfaceFlags = SurfaceFlags { bits: 1 << 2 };
    pub const MINI_BOOST: SurfaceFlags = SurfaceFlags { bits: 1 << 3 };
    pub const HEAL: SurfaceFlags = SurfaceFlags { bits: 1 << 4 };

    pub fn contains(self, other: SurfaceFlags) -> bool {
        self.bits & other.bits == other.bits
    }

    pub fn is_wall(self) -> bool {
        self.contains(SurfaceFlags::WALL)
    }

    pub fn is_slippery(self) -> bool {
        self.contains(SurfaceFlags::SLIPPERY)
    }

    pub fn is_brake(self) -> bool {
        self.contains(SurfaceFlags::BRAKE)
    }

    pub fn is_mini_boost(self) -> bool {
        self.contains(SurfaceFlags::MINI_BOOST)
    }

    pub fn is_heal(self) -> bool {
        self.contains(SurfaceFlags::HEAL)
    }
}

impl BitOr for SurfaceFlags {
    type Output = SurfaceFlags;

    fn bitor(self, rhs: SurfaceFlags) -> SurfaceFlags {
        SurfaceFlags {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Index of a triangle within its owning [`CollisionMesh`]. Stored instead of
/// a reference so a stale id fails a lookup instead of dangling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TriangleId(pub usize);

#[derive(Debug)]
pub enum MeshError {
    DegenerateTriangle,
}

#[derive(Clone, Debug)]
pub struct Triangle {
    a: Point3<f32>,
    b: Point3<f32>,
    c: Point3<f32>,
    normal: Unit<Vector3<f32>>,
    flags: SurfaceFlags,
}

impl Triangle {
    /// Build a triangle from counter-clockwise vertices; the outward normal
    /// is precomputed here once.
    pub fn new(
        a: Point3<f32>,
        b: Point3<f32>,
        c: Point3<f32>,
        flags: SurfaceFlags,
    ) -> Result<Triangle, MeshError> {
        let normal = (b - a).cross(&(c - a));
        let normal = Unit::try_new(normal, 1e-9).ok_or(MeshError::DegenerateTriangle)?;
        Ok(Triangle {
            a,
            b,
            c,
            normal,
            flags,
        })
    }

    pub fn normal(&self) -> Unit<Vector3<f32>> {
        self.normal
    }

    pub fn flags(&self) -> SurfaceFlags {
        self.flags
    }

    pub fn vertices(&self) -> [Point3<f32>; 3] {
        [self.a, self.b, self.c]
    }
}

/// Result of a swept segment query.
#[derive(Copy, Clone, Debug)]
pub struct SweepHit {
    pub triangle: TriangleId,
    /// Contact point clamped onto the segment.
    pub position: Point3<f32>,
    pub normal: Unit<Vector3<f32>>,
    pub flags: SurfaceFlags,
}

pub struct CollisionMesh {
    triangles: Vec<Triangle>,
}

impl CollisionMesh {
    pub fn new(triangles: Vec<Triangle>) -> CollisionMesh {
        CollisionMesh { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.0)
    }

    /// Sweep the segment `from..to` against every triangle and return the
    /// nearest intersection. Ties are broken by distance along the segment;
    /// co-located hits have no further ordering guarantee.
    pub fn sweep(&self, from: Point3<f32>, to: Point3<f32>) -> Option<SweepHit> {
        self.sweep_excluding(from, to, &[])
    }

    /// Same as [`sweep`](CollisionMesh::sweep), skipping the given triangles.
    /// This is how a caller keeps a probe from re-finding geometry it is
    /// already standing on.
    pub fn sweep_excluding(
        &self,
        from: Point3<f32>,
        to: Point3<f32>,
        skip: &[TriangleId],
    ) -> Option<SweepHit> {
        let dir = to - from;
        if dir.norm_squared() < 1e-18 {
            return None;
        }
        self.triangles
            .iter()
            .enumerate()
            .filter(|(index, _)| !skip.contains(&TriangleId(*index)))
            .filter_map(|(index, triangle)| {
                let toi = segment_toi(from, dir, triangle)?;
                let toi = NotNan::new(toi).ok()?;
                Some((index, toi))
            })
            .min_by_key(|&(_, toi)| toi)
            .map(|(index, toi)| SweepHit {
                triangle: TriangleId(index),
                position: from + dir * toi.into_inner(),
                normal: self.triangles[index].normal,
                flags: self.triangles[index].flags,
            })
    }
}

/// Barycentric tolerance. Slightly permissive so a segment crossing the
/// shared edge of two adjacent triangles cannot slip between them.
const EDGE_EPSILON: f32 = 1e-5;

/// Möller–Trumbore, segment flavor: time of impact in `[0, 1]` along `dir`,
/// hitting either face of the triangle.
fn segment_toi(origin: Point3<f32>, dir: Vector3<f32>, triangle: &Triangle) -> Option<f32> {
    let e1 = triangle.b - triangle.a;
    let e2 = triangle.c - triangle.a;
    let p = dir.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() < 1e-12 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - triangle.a;
    let u = s.dot(&p) * inv_det;
    if u < -EDGE_EPSILON || u > 1.0 + EDGE_EPSILON {
        return None;
    }
    let q = s.cross(&e1);
    let v = dir.dot(&q) * inv_det;
    if v < -EDGE_EPSILON || u + v > 1.0 + EDGE_EPSILON {
        return None;
    }
    let t = e2.dot(&q) * inv_det;
    if t < 0.0 || t > 1.0 {
        return None;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use crate::mesh::{CollisionMesh, SurfaceFlags, Triangle, TriangleId};
    use nalgebra::{Point3, Vector3};

    fn floor_triangle(y: f32, flags: SurfaceFlags) -> Triangle {
        Triangle::new(
            Point3::new(-100.0, y, -100.0),
            Point3::new(0.0, y, 100.0),
            Point3::new(100.0, y, -100.0),
            flags,
        )
        .unwrap()
    }

    #[test]
    fn sweep_misses_empty_space() {
        let mesh = CollisionMesh::new(vec![floor_triangle(0.0, SurfaceFlags::NONE)]);
        assert!(mesh
            .sweep(Point3::new(0.0, 5.0, 0.0), Point3::new(0.0, 1.0, 0.0))
            .is_none());
    }

    #[test]
    fn sweep_finds_contact_and_normal() {
        let mesh = CollisionMesh::new(vec![floor_triangle(0.0, SurfaceFlags::BRAKE)]);
        let hit = mesh
            .sweep(Point3::new(0.0, 5.0, 0.0), Point3::new(0.0, -5.0, 0.0))
            .unwrap();
        assert_eq!(hit.triangle, TriangleId(0));
        assert!((hit.position - Point3::new(0.0, 0.0, 0.0)).norm() < 1e-4);
        assert!((hit.normal.into_inner() - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
        assert!(hit.flags.is_brake());
        assert!(!hit.flags.is_wall());
    }

    #[test]
    fn sweep_picks_nearest_of_stacked_triangles() {
        let mesh = CollisionMesh::new(vec![
            floor_triangle(0.0, SurfaceFlags::NONE),
            floor_triangle(2.0, SurfaceFlags::HEAL),
        ]);
        let hit = mesh
            .sweep(Point3::new(0.0, 5.0, 0.0), Point3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert_eq!(hit.triangle, TriangleId(1));
        assert!(hit.flags.is_heal());
    }

    #[test]
    fn sweep_excluding_skips_triangles() {
        let mesh = CollisionMesh::new(vec![
            floor_triangle(0.0, SurfaceFlags::NONE),
            floor_triangle(2.0, SurfaceFlags::NONE),
        ]);
        let hit = mesh
            .sweep_excluding(
                Point3::new(0.0, 5.0, 0.0),
                Point3::new(0.0, -1.0, 0.0),
                &[TriangleId(1)],
            )
            .unwrap();
        assert_eq!(hit.triangle, TriangleId(0));
    }

    #[test]
    fn sweep_hits_backfaces() {
        // Travelling upward through the floor from below still collides.
        let mesh = CollisionMesh::new(vec![floor_triangle(0.0, SurfaceFlags::NONE)]);
        let hit = mesh
            .sweep(Point3::new(0.0, -5.0, 0.0), Point3::new(0.0, 5.0, 0.0))
            .unwrap();
        assert_eq!(hit.triangle, TriangleId(0));
    }

    #[test]
    fn sweep_does_not_hit_past_segment_end() {
        let mesh = CollisionMesh::new(vec![floor_triangle(0.0, SurfaceFlags::NONE)]);
        assert!(mesh
            .sweep(Point3::new(0.0, 5.0, 0.0), Point3::new(0.0, 0.5, 0.0))
            .is_none());
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        assert!(Triangle::new(a, b, b, SurfaceFlags::NONE).is_err());
    }

    #[test]
    fn crossing_a_shared_edge_hits_one_of_the_pair() {
        // Two triangles forming a quad; a sweep straight down onto the shared
        // diagonal must not slip through the seam.
        let quad = vec![
            Triangle::new(
                Point3::new(-1.0, 0.0, -1.0),
                Point3::new(-1.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                SurfaceFlags::NONE,
            )
            .unwrap(),
            Triangle::new(
                Point3::new(-1.0, 0.0, -1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, -1.0),
                SurfaceFlags::NONE,
            )
            .unwrap(),
        ];
        let mesh = CollisionMesh::new(quad);
        let hit = mesh.sweep(Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, -1.0, 0.0));
        assert!(hit.is_some());
    }
}
