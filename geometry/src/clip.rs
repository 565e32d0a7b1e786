use crate::{Point, Rect, Vector};

/// Result of clipping a ray against a rectangle: the entry and exit ray
/// parameters and the length of the clipped segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clip {
    pub t_entry: f32,
    pub t_exit: f32,
    pub length: f32,
}

/// Liang-Barsky ray / rectangle intersection.
///
/// The ray is `P(t) = origin + t * dir`, restricted to `t >= 0`. `dir` need
/// not be unit length; the returned `length` is scaled by its magnitude.
///
/// <https://en.wikipedia.org/wiki/Liang%E2%80%93Barsky_algorithm>
pub fn ray_rect_clip(rect: &Rect, origin: Point, dir: Vector) -> Option<Clip> {
    // Sentinels: the 0 entry clamps the reported segment to the ray's start
    let mut t_entry = 0.0_f32;
    let mut t_exit  = f32::INFINITY;

    let slabs = [
        (dir.x, origin.x, rect.xmin, rect.xmax),
        (dir.y, origin.y, rect.ymin, rect.ymax),
    ];
    for (d, o, min, max) in slabs {
        if d == 0.0 {
            // Axis-parallel: the ray stays at this coordinate forever
            if o < min || o > max { return None; }
            continue;
        }
        let t_min = (min - o) / d;
        let t_max = (max - o) / d;
        let (enter, exit) = if d < 0.0 { (t_max, t_min) } else { (t_min, t_max) };
        t_entry = t_entry.max(enter);
        t_exit  = t_exit .min(exit);
    }

    if t_entry > t_exit || t_exit < 0.0 { return None; }

    let length = (t_exit - t_entry) * dir.norm();
    Some(Clip { t_entry, t_exit, length })
}
