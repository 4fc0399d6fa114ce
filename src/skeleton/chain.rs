//! 运动链 - 关节与肢段的索引竞技场
//!
//! 拓扑在构建时固定：N 个肢段，N+1 个关节。
//! 关节 i 的 incoming 为肢段 i-1，outgoing 为肢段 i。

use glam::Vec2;

use super::kinematics;
use super::segment_link::{Joint, Segment, SegmentSpec};
use crate::{LimbError, Result};

/// 固定拓扑的二维运动链
#[derive(Clone, Debug)]
pub struct Chain {
    joints: Vec<Joint>,
    segments: Vec<Segment>,
    /// 当前手动选中的肢段（与 Segment::selected 保持一致）
    selected: Option<usize>,
}

impl Chain {
    /// 构建运动链
    ///
    /// `rotations` 为每个肢段的初始世界角（度），长度必须与 `specs` 一致。
    /// 构建后立即执行一次正向传播，初始姿态即满足所有不变量。
    pub fn new(root: Vec2, specs: &[SegmentSpec], rotations: &[f32], joint_radius: f32) -> Result<Self> {
        if specs.is_empty() {
            return Err(LimbError::TooFewSegments { count: 0 });
        }
        if rotations.len() != specs.len() {
            return Err(LimbError::InvalidRotations {
                expected: specs.len(),
                actual: rotations.len(),
            });
        }
        if !root.is_finite() {
            return Err(LimbError::InvalidConfig(format!("root position {} is not finite", root)));
        }
        if !(joint_radius.is_finite() && joint_radius > 0.0) {
            return Err(LimbError::InvalidConfig(format!("joint radius {} must be positive", joint_radius)));
        }
        for (index, spec) in specs.iter().enumerate() {
            if !spec.is_valid() {
                return Err(LimbError::InvalidSegment {
                    index,
                    length: spec.length,
                    thickness: spec.thickness,
                });
            }
        }
        if let Some(bad) = rotations.iter().position(|r| !r.is_finite()) {
            return Err(LimbError::InvalidConfig(format!("rotation of segment {} is not finite", bad)));
        }

        let n = specs.len();
        let joints = (0..=n)
            .map(|i| {
                let incoming = if i > 0 { Some(i - 1) } else { None };
                let outgoing = if i < n { Some(i) } else { None };
                Joint::new(root, joint_radius, incoming, outgoing)
            })
            .collect();
        let segments = specs
            .iter()
            .zip(rotations)
            .map(|(spec, &rotation)| Segment::new(*spec, root, rotation))
            .collect();

        let mut chain = Self {
            joints,
            segments,
            selected: None,
        };
        kinematics::propagate(&mut chain);

        log::info!(
            "运动链构建完成: {} 肢段, {} 关节, 总长 {:.1}, 根 {}",
            chain.segment_count(),
            chain.joints.len(),
            chain.total_length(),
            root
        );
        Ok(chain)
    }

    // ========================================
    // 访问器
    // ========================================

    #[inline]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// 末端（足部）肢段索引
    #[inline]
    pub fn terminal_segment(&self) -> usize {
        self.segments.len() - 1
    }

    /// 根关节位置
    #[inline]
    pub fn root(&self) -> Vec2 {
        self.joints[0].position
    }

    /// 末端执行器位置
    #[inline]
    pub fn effector(&self) -> Vec2 {
        self.joints[self.joints.len() - 1].position
    }

    /// 所有关节位置（快照）
    pub fn positions(&self) -> Vec<Vec2> {
        self.joints.iter().map(|j| j.position).collect()
    }

    /// 各肢段长度
    pub fn lengths(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.length()).collect()
    }

    /// 总伸展长度
    pub fn total_length(&self) -> f32 {
        self.segments.iter().map(|s| s.length()).sum()
    }

    pub fn incoming_segment(&self, joint: usize) -> Option<usize> {
        self.joints.get(joint).and_then(|j| j.incoming_segment())
    }

    pub fn outgoing_segment(&self, joint: usize) -> Option<usize> {
        self.joints.get(joint).and_then(|j| j.outgoing_segment())
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    // ========================================
    // 修改
    // ========================================

    /// 设置选中肢段，保证至多一个 selected 为 true
    ///
    /// 越界索引视为清除选择。
    pub fn select(&mut self, segment: Option<usize>) {
        let segment = segment.filter(|&i| i < self.segments.len());
        if let Some(prev) = self.selected {
            self.segments[prev].selected = false;
        }
        if let Some(next) = segment {
            self.segments[next].selected = true;
        }
        self.selected = segment;
    }

    /// 宿主移动根关节，随后整链正向传播
    pub fn set_root(&mut self, root: Vec2) {
        if !root.is_finite() {
            log::warn!("忽略非有限根位置: {}", root);
            return;
        }
        self.joints[0].position = root;
        kinematics::propagate(self);
    }

    pub(crate) fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// 同时借用关节与肢段
    pub(crate) fn parts_mut(&mut self) -> (&mut [Joint], &mut [Segment]) {
        (&mut self.joints, &mut self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg() -> Chain {
        let specs = [
            SegmentSpec::new(120.0, 50.0),
            SegmentSpec::new(50.0, 150.0),
            SegmentSpec::new(75.0, 50.0),
        ];
        Chain::new(Vec2::new(600.0, 500.0), &specs, &[90.0, 90.0, 90.0], 10.0).unwrap()
    }

    #[test]
    fn test_topology() {
        let chain = leg();
        assert_eq!(chain.segment_count(), 3);
        assert_eq!(chain.joints().len(), 4);
        assert_eq!(chain.incoming_segment(0), None);
        assert_eq!(chain.outgoing_segment(0), Some(0));
        assert_eq!(chain.incoming_segment(3), Some(2));
        assert_eq!(chain.outgoing_segment(3), None);
        assert_eq!(chain.terminal_segment(), 2);
        assert!((chain.total_length() - 245.0).abs() < 1e-4);
    }

    #[test]
    fn test_initial_pose_is_propagated() {
        let chain = leg();
        assert!((chain.effector() - Vec2::new(600.0, 745.0)).length() < 1e-3);
        for (i, seg) in chain.segments().iter().enumerate() {
            assert!((seg.anchor_point - chain.joints()[i].position).length() < 1e-4);
        }
    }

    #[test]
    fn test_invalid_construction() {
        let root = Vec2::ZERO;
        assert_eq!(
            Chain::new(root, &[], &[], 10.0).unwrap_err(),
            LimbError::TooFewSegments { count: 0 }
        );
        assert!(matches!(
            Chain::new(root, &[SegmentSpec::new(10.0, 1.0)], &[0.0, 0.0], 10.0),
            Err(LimbError::InvalidRotations { expected: 1, actual: 2 })
        ));
        assert!(matches!(
            Chain::new(root, &[SegmentSpec::new(-1.0, 1.0)], &[0.0], 10.0),
            Err(LimbError::InvalidSegment { index: 0, .. })
        ));
        assert!(matches!(
            Chain::new(root, &[SegmentSpec::new(10.0, 1.0)], &[0.0], 0.0),
            Err(LimbError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut chain = leg();
        chain.select(Some(0));
        chain.select(Some(2));
        let count = chain.segments().iter().filter(|s| s.selected).count();
        assert_eq!(count, 1);
        assert!(chain.segments()[2].selected);
        chain.select(Some(99));
        assert_eq!(chain.selected(), None);
        assert!(chain.segments().iter().all(|s| !s.selected));
    }

    #[test]
    fn test_set_root_moves_whole_chain() {
        let mut chain = leg();
        let before = chain.effector();
        chain.set_root(Vec2::new(500.0, 400.0));
        assert!((chain.effector() - (before - Vec2::new(100.0, 100.0))).length() < 1e-3);
    }
}
