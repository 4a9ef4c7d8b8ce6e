//! Opaque-pixel silhouettes
//!
//! A `Mask` is a bitmap where `true` marks an opaque pixel. Collision between
//! two sprites is the overlap of their masks at a relative pixel offset, so
//! transparent corners never register a hit.

use glam::{IVec2, Vec2};

/// Pixel holding a float position (floor toward negative infinity)
#[inline]
pub fn pixel_origin(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}

/// A width × height bitmap of opaque pixels (row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Fully opaque rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build from a per-pixel predicate `f(x, y)`
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self { width, height, bits }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    /// Opaque test; out-of-bounds pixels are transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rotate by `degrees` around the center (positive = clockwise on screen)
    ///
    /// The result is sized to the rotated bounding box. Each destination
    /// pixel samples its nearest source pixel by inverse rotation.
    pub fn rotated(&self, degrees: f32) -> Mask {
        if degrees == 0.0 {
            return self.clone();
        }

        let (s, c) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Shave float noise so axis-aligned turns don't grow by a pixel
        let new_w = (w * c.abs() + h * s.abs() - 1e-3).ceil().max(1.0) as u32;
        let new_h = (w * s.abs() + h * c.abs() - 1e-3).ceil().max(1.0) as u32;
        let (half_nw, half_nh) = (new_w as f32 / 2.0, new_h as f32 / 2.0);

        Mask::from_fn(new_w, new_h, |x, y| {
            let dx = x as f32 + 0.5 - half_nw;
            let dy = y as f32 + 0.5 - half_nh;
            let sx = c * dx + s * dy + w / 2.0;
            let sy = -s * dx + c * dy + h / 2.0;
            self.get(sx.floor() as i32, sy.floor() as i32)
        })
    }

    /// First opaque pixel shared with `other` placed at `offset` relative to self
    ///
    /// Returns the pixel in `self`'s coordinates, scanning row by row.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        // Bounding boxes disjoint
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}

/// A mask placed in playfield pixel coordinates (top-left origin)
#[derive(Debug, Clone)]
pub struct Silhouette {
    pub mask: Mask,
    pub origin: IVec2,
}

impl Silhouette {
    pub fn new(mask: Mask, origin: IVec2) -> Self {
        Self { mask, origin }
    }

    /// First opaque pixel shared with `other` placed at `other_origin`,
    /// in playfield coordinates
    pub fn overlap(&self, other: &Mask, other_origin: IVec2) -> Option<IVec2> {
        self.mask
            .overlap(other, other_origin - self.origin)
            .map(|p| p + self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(size: u32) -> Mask {
        // Hollow square: only the border is opaque
        Mask::from_fn(size, size, |x, y| {
            x == 0 || y == 0 || x == size - 1 || y == size - 1
        })
    }

    #[test]
    fn test_filled_and_count() {
        let mask = Mask::filled(4, 3);
        assert_eq!(mask.count(), 12);
        assert!(mask.get(3, 2));
        assert!(!mask.get(4, 2));
        assert!(!mask.get(-1, 0));
    }

    #[test]
    fn test_disjoint_bounding_boxes_never_overlap() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        assert!(a.overlap(&b, IVec2::new(10, 0)).is_none());
        assert!(a.overlap(&b, IVec2::new(0, 10)).is_none());
        assert!(a.overlap(&b, IVec2::new(-10, -10)).is_none());
        assert!(a.overlap(&b, IVec2::new(50, -3)).is_none());
    }

    #[test]
    fn test_one_pixel_overlap_hits() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        // b's top-left pixel lands on a's bottom-right pixel
        assert_eq!(a.overlap(&b, IVec2::new(9, 9)), Some(IVec2::new(9, 9)));
        assert_eq!(b.overlap(&a, IVec2::new(-9, -9)), Some(IVec2::new(0, 0)));
    }

    #[test]
    fn test_transparent_pixels_do_not_collide() {
        let hollow = ring(10);
        let dot = Mask::filled(2, 2);
        // Dot sits in the hollow interior: boxes overlap, pixels don't
        assert!(hollow.overlap(&dot, IVec2::new(4, 4)).is_none());
        // Dot touching the border
        assert!(hollow.overlap(&dot, IVec2::new(8, 4)).is_some());
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let mask = ring(7);
        assert_eq!(mask.rotated(0.0), mask);
    }

    #[test]
    fn test_rotate_quarter_turn_swaps_dimensions() {
        let mask = Mask::filled(20, 6);
        let turned = mask.rotated(90.0);
        assert_eq!((turned.width(), turned.height()), (6, 20));
        assert_eq!(turned.count(), mask.count());
    }

    #[test]
    fn test_rotate_clockwise_direction() {
        // Single opaque column on the right edge
        let mask = Mask::from_fn(9, 9, |x, _| x == 8);
        let turned = mask.rotated(90.0);
        // Clockwise on screen (y down): right edge moves to the bottom
        assert!(turned.get(4, 8));
        assert!(!turned.get(4, 0));
        assert!(!turned.get(8, 4));
    }

    #[test]
    fn test_rotate_grows_bounding_box() {
        let mask = Mask::filled(34, 24);
        let turned = mask.rotated(45.0);
        assert!(turned.width() > 34);
        assert!(turned.height() > 24);
        // Corners of the enlarged box are empty
        assert!(!turned.get(0, 0));
        assert!(!turned.get(turned.width() as i32 - 1, turned.height() as i32 - 1));
    }

    #[test]
    fn test_silhouette_overlap_in_world_space() {
        let sil = Silhouette::new(Mask::filled(5, 5), IVec2::new(100, 200));
        let other = Mask::filled(5, 5);
        assert_eq!(sil.overlap(&other, IVec2::new(104, 204)), Some(IVec2::new(104, 204)));
        assert_eq!(sil.overlap(&other, IVec2::new(102, 197)), Some(IVec2::new(102, 200)));
        assert!(sil.overlap(&other, IVec2::new(105, 200)).is_none());
    }
}
