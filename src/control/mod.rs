//! 输入与控制模式
//!
//! 每帧由宿主采样指针状态，交给 Selection 决定本帧的控制模式：
//! 空闲、手动旋转某一肢段、或以指针位置为目标的 IK。

mod selection;
mod manual;

pub use selection::Selection;
pub use manual::adjust;

use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// 每帧输入标志位
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InputFlags: u32 {
        /// 指针按下（边沿，仅按下当帧）
        const POINTER_PRESSED = 1 << 0;
        /// 指针保持按下
        const POINTER_HELD = 1 << 1;
        /// 小球复位（边沿）
        const RESET_BALL = 1 << 2;
    }
}

/// 宿主每帧提供的输入
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// 指针位置
    pub pointer: Vec2,
    /// 指针相对上一帧的位移
    pub pointer_delta: Vec2,
    pub flags: InputFlags,
    /// 帧间隔（秒），仅用于重力积分
    pub delta_time: f32,
}

impl FrameInput {
    /// 无按键、仅推进时间的输入
    pub fn idle(pointer: Vec2, delta_time: f32) -> Self {
        Self {
            pointer,
            pointer_delta: Vec2::ZERO,
            flags: InputFlags::empty(),
            delta_time,
        }
    }

    /// 按下当帧（同时视为保持）
    pub fn press(pointer: Vec2, delta_time: f32) -> Self {
        Self {
            pointer,
            pointer_delta: Vec2::ZERO,
            flags: InputFlags::POINTER_PRESSED | InputFlags::POINTER_HELD,
            delta_time,
        }
    }

    /// 保持按下并拖动
    pub fn drag(pointer: Vec2, pointer_delta: Vec2, delta_time: f32) -> Self {
        Self {
            pointer,
            pointer_delta,
            flags: InputFlags::POINTER_HELD,
            delta_time,
        }
    }

    #[inline]
    pub fn pressed(&self) -> bool {
        self.flags.contains(InputFlags::POINTER_PRESSED)
    }

    #[inline]
    pub fn held(&self) -> bool {
        self.flags.contains(InputFlags::POINTER_HELD)
    }

    #[inline]
    pub fn reset_requested(&self) -> bool {
        self.flags.contains(InputFlags::RESET_BALL)
    }
}

/// 本帧控制模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// 不修改链
    Idle,
    /// 手动旋转指定的非末端肢段
    Manual(usize),
    /// 末端肢段被拖动，链由 IK 求解
    Ik,
}
