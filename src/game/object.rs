/// Axis-aligned rectangle in simulation coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Bounds { left: x, top: y, right: x + width, bottom: y + height }
    }

    pub fn around(cx: f32, cy: f32, radius_x: f32, radius_y: f32) -> Self {
        Bounds { left: cx - radius_x, top: cy - radius_y, right: cx + radius_x, bottom: cy + radius_y }
    }
}

pub trait Object {
    fn bounds(&self) -> Bounds;

    /// Strict overlap on the horizontal axis only; touching edges do not count.
    fn aligned_with<T: Object>(&self, other: &T) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        interval_sec(a.left, a.right, b.left, b.right)
    }

    fn collides_with<T: Object>(&self, other: &T) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        interval_sec(a.left, a.right, b.left, b.right) && interval_sec(a.top, a.bottom, b.top, b.bottom)
    }
}

impl Object for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

fn interval_sec(l1: f32, r1: f32, l2: f32, r2: f32) -> bool {
    r1 > l2 && l1 < r2
}
