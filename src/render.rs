//! 渲染视图
//!
//! 宿主渲染器只读取这些值：肢段画成以 anchor 为局部原点、
//! 旋转 rotation 度的矩形；关节与小球画成圆。

use glam::{Vec2, Vec4};

use crate::limb::Limb;

/// 肢段高亮状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Selected,
}

/// 肢段视图
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentView {
    /// 矩形局部原点所在的世界坐标
    pub anchor: Vec2,
    /// 旋转枢轴在矩形局部坐标中的位置（枢轴角，恒为原点）
    pub origin: Vec2,
    /// (length, thickness)
    pub size: Vec2,
    /// 度
    pub rotation: f32,
    pub highlight: Highlight,
    pub color: Vec4,
    /// 几何中心
    pub center: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointView {
    pub center: Vec2,
    pub radius: f32,
    pub color: Vec4,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
    pub color: Vec4,
}

/// 一帧完整的渲染数据
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    pub background: Vec4,
    pub segments: Vec<SegmentView>,
    pub joints: Vec<JointView>,
    pub ball: BallView,
}

impl Limb {
    /// 导出当前状态供渲染
    pub fn view(&self) -> FrameView {
        let config = self.config();
        let segments = self
            .chain()
            .segments()
            .iter()
            .map(|s| {
                let highlight = if s.selected { Highlight::Selected } else { Highlight::Normal };
                SegmentView {
                    anchor: s.anchor_point,
                    origin: Vec2::ZERO,
                    size: Vec2::new(s.length(), s.thickness()),
                    rotation: s.rotation,
                    highlight,
                    color: match highlight {
                        Highlight::Selected => config.selected_color,
                        Highlight::Normal => config.segment_color,
                    },
                    center: s.center(),
                }
            })
            .collect();
        let joints = self
            .chain()
            .joints()
            .iter()
            .map(|j| JointView {
                center: j.position,
                radius: j.radius,
                color: config.joint_color,
            })
            .collect();
        let ball = BallView {
            center: self.ball().position,
            radius: self.ball().radius(),
            color: config.ball_color,
        };

        FrameView {
            background: config.background_color,
            segments,
            joints,
            ball,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::FrameInput;
    use crate::physics::LimbConfig;

    #[test]
    fn test_view_reflects_selection() {
        let mut limb = Limb::new(LimbConfig::default()).unwrap();
        let ankle = limb.chain().joints()[2].position;
        limb.tick(&FrameInput::press(ankle, 1.0 / 60.0));

        let view = limb.view();
        assert_eq!(view.segments.len(), 3);
        assert_eq!(view.joints.len(), 4);
        assert_eq!(view.segments[1].highlight, Highlight::Selected);
        assert_eq!(view.segments[1].color, limb.config().selected_color);
        assert_eq!(view.segments[0].highlight, Highlight::Normal);
        assert_eq!(view.segments[0].size, Vec2::new(120.0, 50.0));
        assert_eq!(view.joints[0].center, limb.chain().root());
        assert_eq!(view.ball.radius, limb.config().ball_radius);
    }
}
