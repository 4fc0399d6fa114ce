//! 运动链系统
//!
//! 核心设计思想：
//! - Joint / Segment: 链中的枢轴点与刚性肢段，按索引存放于 Chain 中
//! - Chain: 固定拓扑的交替序列 J₀ - S₀ - J₁ - … - Jₙ
//! - kinematics: 正向传播与朝向恢复（互为逆运算）
//! - IkSolver: FABRIK 迭代求解器
//!
//! 约定：屏幕坐标（+y 向下），角度以度存储，
//! 肢段局部原点位于近端关节，局部 +x 指向远端关节。

mod segment_link;
mod chain;
mod ik_solver;
pub mod kinematics;

pub use segment_link::{Joint, Segment, SegmentSpec};
pub use chain::Chain;
pub use ik_solver::{IkConfig, IkReport, IkSolver};

use glam::Vec2;

/// 方向向量长度平方阈值，低于此值视为退化（重合点）
pub(crate) const DEGENERATE_EPSILON_SQ: f32 = 1e-8;

/// 以度为单位的平面旋转 R(θ)·v
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// 角度（度）对应的单位方向
#[inline]
pub fn direction_degrees(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// 向量的朝向角（度），atan2(y, x)
#[inline]
pub fn heading_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// 角度归一化到 [0, 360)
pub fn normalize_degrees(degrees: f32) -> f32 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid 在极小负数时可能返回 360.0
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// 角度差（考虑周期性），结果在 (-180, 180]
pub fn angle_diff_degrees(a: f32, b: f32) -> f32 {
    let mut diff = normalize_degrees(a) - normalize_degrees(b);
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
}
