//! Board geometry: axis-aligned bounding boxes and board-bounded random points

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left corner
    pub min: DVec2,
    /// Top-right corner
    pub max: DVec2,
}

impl Rect {
    /// Box of the given size centered on `center`
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Overlap test; touching edges count as a collision
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

/// Playing field extents, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f64,
    pub height: f64,
}

impl Board {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into `[0, width] x [0, height]`
    pub fn clamp(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.height),
        )
    }

    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Uniform integer point anywhere on the board (inclusive bounds)
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> DVec2 {
        let x = rng.random_range(0..=self.width.trunc() as i64) as f64;
        let y = rng.random_range(0..=self.height.trunc() as i64) as f64;
        self.clamp(DVec2::new(x, y))
    }

    /// Uniform integer point in the part of the square of half-width
    /// `radius` around `center` that lies on the board
    ///
    /// A square entirely off the board collapses onto the nearest board edge.
    pub fn random_point_near<R: Rng>(&self, rng: &mut R, center: DVec2, radius: f64) -> DVec2 {
        let x = random_coord_near(rng, center.x, radius, self.width);
        let y = random_coord_near(rng, center.y, radius, self.height);
        DVec2::new(x, y)
    }
}

/// Integer coordinate in `[center - radius, center + radius] ∩ [0, max]`
fn random_coord_near<R: Rng>(rng: &mut R, center: f64, radius: f64, max: f64) -> f64 {
    // Bound in f64 first so the integer range cannot overflow
    let lo = (center - radius).max(0.0).ceil();
    let hi = (center + radius).min(max).floor();
    if lo > hi {
        return center.clamp(0.0, max).trunc();
    }
    rng.random_range(lo as i64..=hi as i64) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::from_center(DVec2::new(0.0, 0.0), DVec2::splat(10.0));
        let b = Rect::from_center(DVec2::new(8.0, 8.0), DVec2::splat(10.0));
        let c = Rect::from_center(DVec2::new(30.0, 0.0), DVec2::splat(10.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_rect_touching_edges_overlap() {
        let a = Rect::from_center(DVec2::new(0.0, 0.0), DVec2::splat(10.0));
        let b = Rect::from_center(DVec2::new(10.0, 0.0), DVec2::splat(10.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_rect_center_and_size() {
        let r = Rect::from_center(DVec2::new(5.0, -3.0), DVec2::new(4.0, 6.0));
        assert_eq!(r.center(), DVec2::new(5.0, -3.0));
        assert_eq!(r.size(), DVec2::new(4.0, 6.0));
    }

    #[test]
    fn test_board_clamp() {
        let board = Board::new(100.0, 50.0);
        assert_eq!(board.clamp(DVec2::new(-5.0, 60.0)), DVec2::new(0.0, 50.0));
        assert_eq!(board.clamp(DVec2::new(20.0, 20.0)), DVec2::new(20.0, 20.0));
    }

    #[test]
    fn test_random_point_near_is_clamped() {
        let board = Board::new(100.0, 100.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = board.random_point_near(&mut rng, DVec2::new(0.0, 100.0), 150.0);
            assert!(board.contains(p), "{p:?} escaped the board");
        }
    }

    #[test]
    fn test_random_point_near_huge_radius() {
        let board = Board::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(11);
        for radius in [1e19, f64::MAX] {
            let p = board.random_point_near(&mut rng, DVec2::new(400.0, 300.0), radius);
            assert!(board.contains(p), "{p:?} escaped the board");
        }
    }

    #[test]
    fn test_random_point_near_off_board_center() {
        let board = Board::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let p = board.random_point_near(&mut rng, DVec2::new(-500.0, 900.0), 150.0);
        assert_eq!(p, DVec2::new(0.0, 600.0));
    }

    #[test]
    fn test_random_point_near_stays_in_square() {
        let board = Board::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..200 {
            let p = board.random_point_near(&mut rng, DVec2::new(400.5, 300.5), 10.0);
            assert!((390.0..=410.0).contains(&p.x));
            assert!((290.0..=310.0).contains(&p.y));
        }
    }
}
