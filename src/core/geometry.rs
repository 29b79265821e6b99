//=========================================================================
// Geometry
//=========================================================================
//
// Axis-aligned rectangles and the overlap tests used by the collision
// pass. Bounds are inclusive on both axes: rectangles that only share an
// edge count as overlapping.
//
//=========================================================================

//=== Rect ================================================================

/// Axis-aligned box in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size centered on `(cx, cy)`.
    pub const fn centered_at(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// One-pixel probe used for point hit tests.
    pub const fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }
}

//=== Overlap Tests =======================================================

/// Returns `true` if the closed rectangles intersect.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let overlap_x = a.x <= b.right() && b.x <= a.right();
    let overlap_y = a.y <= b.bottom() && b.y <= a.bottom();
    overlap_x && overlap_y
}

/// Returns `true` if any two distinct entries of `rects` overlap.
///
/// Entries are distinguished by position in the slice, so two equal
/// rectangles at different indices are still compared.
pub fn overlaps_any_pair(rects: &[Rect]) -> bool {
    rects.iter().enumerate().any(|(i, a)| {
        rects[i + 1..].iter().any(|b| overlaps(a, b))
    })
}

/// Concatenates both sides, then checks every pair.
///
/// Rectangles on the same side are compared against each other too, so
/// each object's own collision areas must be mutually disjoint.
pub fn overlaps_between(a: &[Rect], b: &[Rect]) -> bool {
    let mut all = Vec::with_capacity(a.len() + b.len());
    all.extend_from_slice(a);
    all.extend_from_slice(b);
    overlaps_any_pair(&all)
}

//=========================================================================
// Unit Tests
//=========================================================================
