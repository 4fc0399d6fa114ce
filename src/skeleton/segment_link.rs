//! 关节与肢段
//!
//! Joint 是枢轴点，Segment 是两关节之间的刚性矩形肢段。
//! 两者之间不持有指针，邻接关系用索引表示（见 Chain）。

use glam::Vec2;

use super::rotate_degrees;

// ============================================================================
// 肢段规格
// ============================================================================

/// 构建链时使用的肢段尺寸
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSpec {
    /// 长度（沿局部 +x）
    pub length: f32,
    /// 厚度（沿局部 +y）
    pub thickness: f32,
}

impl SegmentSpec {
    pub const fn new(length: f32, thickness: f32) -> Self {
        Self { length, thickness }
    }

    /// 尺寸是否合法（有限且为正）
    pub fn is_valid(&self) -> bool {
        self.length.is_finite()
            && self.thickness.is_finite()
            && self.length > 0.0
            && self.thickness > 0.0
    }
}

// ============================================================================
// 关节
// ============================================================================

/// 枢轴点
#[derive(Clone, Debug)]
pub struct Joint {
    /// 中心位置（FK/IK 结算后为权威值）
    pub position: Vec2,
    /// 选择命中半径
    pub radius: f32,
    /// 远端连接到此关节的肢段（根关节为 None）
    pub(crate) incoming: Option<usize>,
    /// 近端从此关节出发的肢段（末端执行器为 None）
    pub(crate) outgoing: Option<usize>,
}

impl Joint {
    pub(crate) fn new(position: Vec2, radius: f32, incoming: Option<usize>, outgoing: Option<usize>) -> Self {
        Self {
            position,
            radius,
            incoming,
            outgoing,
        }
    }

    /// 远端连接到此关节的肢段索引
    #[inline]
    pub fn incoming_segment(&self) -> Option<usize> {
        self.incoming
    }

    /// 从此关节出发的肢段索引
    #[inline]
    pub fn outgoing_segment(&self) -> Option<usize> {
        self.outgoing
    }

    /// 是否为根关节
    #[inline]
    pub fn is_root(&self) -> bool {
        self.incoming.is_none()
    }

    /// 是否为末端执行器
    #[inline]
    pub fn is_effector(&self) -> bool {
        self.outgoing.is_none()
    }

    /// 圆形命中测试（边界包含在内）
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }
}

// ============================================================================
// 肢段
// ============================================================================

/// 刚性矩形肢段
///
/// 局部坐标系：原点（枢轴角）位于近端关节，+x 沿肢段指向远端关节，
/// +y 为厚度方向。`anchor_point` 即局部原点的世界坐标。
#[derive(Clone, Debug)]
pub struct Segment {
    length: f32,
    thickness: f32,

    /// 枢轴角的世界坐标
    pub anchor_point: Vec2,
    /// 世界旋转角（度），atan2(Δy, Δx)，Δ 为近端指向远端
    pub rotation: f32,
    /// 是否处于手动控制
    pub selected: bool,

    /// 四个角点：枢轴角、远端相邻角、远端对角、近端对角
    corner_points: [Vec2; 4],
}

impl Segment {
    pub(crate) fn new(spec: SegmentSpec, anchor_point: Vec2, rotation: f32) -> Self {
        let mut segment = Self {
            length: spec.length,
            thickness: spec.thickness,
            anchor_point,
            rotation,
            selected: false,
            corner_points: [anchor_point; 4],
        };
        segment.refresh_corners();
        segment
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// 局部 (length, 0) 在世界中的偏移，即近端 → 远端关节向量
    #[inline]
    pub fn rotated_end(&self) -> Vec2 {
        rotate_degrees(Vec2::new(self.length, 0.0), self.rotation)
    }

    /// 远端关节位置（由 anchor_point 与 rotation 推出）
    #[inline]
    pub fn distal_point(&self) -> Vec2 {
        self.anchor_point + self.rotated_end()
    }

    /// 沿肢段的单位方向
    #[inline]
    pub fn direction(&self) -> Vec2 {
        super::direction_degrees(self.rotation)
    }

    /// 几何中心
    pub fn center(&self) -> Vec2 {
        self.anchor_point + rotate_degrees(Vec2::new(self.length, self.thickness) * 0.5, self.rotation)
    }

    /// 角点（仅用于碰撞）
    #[inline]
    pub fn corner_points(&self) -> &[Vec2; 4] {
        &self.corner_points
    }

    /// 四条边：上、右、下、左
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let [c0, c1, c2, c3] = self.corner_points;
        [(c0, c1), (c1, c2), (c2, c3), (c3, c0)]
    }

    /// 根据 anchor_point / rotation 重新计算角点
    pub fn refresh_corners(&mut self) {
        let local = [
            Vec2::ZERO,
            Vec2::new(self.length, 0.0),
            Vec2::new(self.length, self.thickness),
            Vec2::new(0.0, self.thickness),
        ];
        for (corner, p) in self.corner_points.iter_mut().zip(local) {
            *corner = self.anchor_point + rotate_degrees(p, self.rotation);
        }
    }
}
