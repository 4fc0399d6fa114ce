//! 选择与手动覆盖
//!
//! 按下时对非根关节做圆形命中测试，命中关节 j 即选中其 incoming 肢段 j-1。
//! 首个命中者胜出；未命中则清除选择。

use glam::Vec2;

use super::ControlMode;
use crate::skeleton::Chain;

/// 选择状态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// 最近一次命中的关节索引
    hit_joint: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次命中的关节
    #[inline]
    pub fn hit_joint(&self) -> Option<usize> {
        self.hit_joint
    }

    /// 处理按下事件，返回命中的关节索引
    pub fn press(&mut self, chain: &mut Chain, pointer: Vec2) -> Option<usize> {
        let hit = chain
            .joints()
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, joint)| joint.contains(pointer))
            .map(|(index, _)| index);

        match hit {
            Some(joint) => {
                let segment = chain.incoming_segment(joint);
                chain.select(segment);
                log::debug!("选中关节 {} → 肢段 {:?}", joint, segment);
            }
            None => {
                if chain.selected().is_some() {
                    log::debug!("未命中任何关节，清除选择");
                }
                chain.select(None);
            }
        }

        self.hit_joint = hit;
        hit
    }

    /// 清除选择
    pub fn clear(&mut self, chain: &mut Chain) {
        chain.select(None);
        self.hit_joint = None;
    }

    /// 根据当前选择与按键保持状态决定控制模式
    pub fn mode(&self, chain: &Chain, held: bool) -> ControlMode {
        match chain.selected() {
            Some(segment) if held => {
                if segment == chain.terminal_segment() {
                    ControlMode::Ik
                } else {
                    ControlMode::Manual(segment)
                }
            }
            _ => ControlMode::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SegmentSpec;

    fn leg() -> Chain {
        let specs = [
            SegmentSpec::new(120.0, 50.0),
            SegmentSpec::new(50.0, 150.0),
            SegmentSpec::new(75.0, 50.0),
        ];
        // 关节：(600,500) (600,620) (600,670) (600,745)
        Chain::new(Vec2::new(600.0, 500.0), &specs, &[90.0, 90.0, 90.0], 10.0).unwrap()
    }

    #[test]
    fn test_press_knee_selects_thigh() {
        let mut chain = leg();
        let mut selection = Selection::new();
        let hit = selection.press(&mut chain, Vec2::new(605.0, 618.0));
        assert_eq!(hit, Some(1));
        assert_eq!(chain.selected(), Some(0));
        assert_eq!(selection.mode(&chain, true), ControlMode::Manual(0));
        assert_eq!(selection.mode(&chain, false), ControlMode::Idle);
    }

    #[test]
    fn test_press_effector_enters_ik() {
        let mut chain = leg();
        let mut selection = Selection::new();
        assert_eq!(selection.press(&mut chain, Vec2::new(600.0, 745.0)), Some(3));
        assert_eq!(chain.selected(), Some(2));
        assert_eq!(selection.mode(&chain, true), ControlMode::Ik);
    }

    #[test]
    fn test_root_is_not_hit_tested() {
        let mut chain = leg();
        let mut selection = Selection::new();
        assert_eq!(selection.press(&mut chain, Vec2::new(600.0, 500.0)), None);
        assert_eq!(chain.selected(), None);
    }

    #[test]
    fn test_miss_clears_selection() {
        let mut chain = leg();
        let mut selection = Selection::new();
        selection.press(&mut chain, Vec2::new(600.0, 670.0));
        assert_eq!(chain.selected(), Some(1));
        assert_eq!(selection.press(&mut chain, Vec2::new(10.0, 10.0)), None);
        assert_eq!(chain.selected(), None);
        assert_eq!(selection.mode(&chain, true), ControlMode::Idle);
    }

    #[test]
    fn test_selection_exclusive_over_sequence() {
        let mut chain = leg();
        let mut selection = Selection::new();
        let presses = [
            Vec2::new(600.0, 620.0),
            Vec2::new(600.0, 745.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(600.0, 670.0),
            Vec2::new(600.0, 620.0),
        ];
        for p in presses {
            selection.press(&mut chain, p);
            assert!(chain.segments().iter().filter(|s| s.selected).count() <= 1);
        }
        assert_eq!(chain.selected(), Some(0));
    }
}
