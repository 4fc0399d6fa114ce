//! 二维关节肢体引擎
//!
//! 模块划分：
//! - skeleton: 关节/肢段数据模型、正向运动学、朝向恢复、FABRIK IK 求解
//! - control: 指针输入 → 选择 → 手动旋转 / IK 控制模式
//! - physics: 配置、碰撞检测、下落小球
//! - limb: 每帧调度（宿主持有）
//! - render: 提供给宿主渲染器的只读视图

pub mod skeleton;
pub mod control;
pub mod physics;
pub mod limb;
pub mod render;

pub use skeleton::{Chain, Joint, Segment, SegmentSpec, IkSolver, IkConfig, IkReport};
pub use control::{ControlMode, FrameInput, InputFlags, Selection};
pub use physics::{Ball, LimbConfig, get_config, set_config, reset_config};
pub use limb::{FrameReport, Limb};
pub use render::{BallView, FrameView, Highlight, JointView, SegmentView};

use thiserror::Error;

/// 引擎错误（仅在构建/配置校验阶段出现，逐帧操作不会失败）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimbError {
    #[error("chain needs at least one segment, got {count}")]
    TooFewSegments { count: usize },

    #[error("segment {index} has invalid size (length={length}, thickness={thickness})")]
    InvalidSegment {
        index: usize,
        length: f32,
        thickness: f32,
    },

    #[error("expected {expected} initial rotations, got {actual}")]
    InvalidRotations { expected: usize, actual: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LimbError>;
