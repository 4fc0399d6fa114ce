//! 圆与线段的相交检测

use glam::Vec2;

/// 线段 ab 上距 p 最近的点
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// 圆（center, radius）是否与线段 ab 相交（相切计入）
pub fn circle_intersects_segment(center: Vec2, radius: f32, a: Vec2, b: Vec2) -> bool {
    closest_point_on_segment(center, a, b).distance_squared(center) <= radius * radius
}
