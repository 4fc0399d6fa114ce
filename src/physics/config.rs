//! 引擎配置
//!
//! 所有参数扁平化，直接在代码中修改默认值即可。
//! 引擎对象在构建时读取一份快照，运行中不再访问全局配置。

use glam::{Vec2, Vec4};
use once_cell::sync::Lazy;
use std::sync::RwLock;

use crate::skeleton::{IkConfig, SegmentSpec};
use crate::{LimbError, Result};

/// 引擎配置（扁平化，不嵌套）
#[derive(Debug, Clone)]
pub struct LimbConfig {
    // ========== 运动链 ==========
    /// 根关节（髋部）位置
    pub root_position: Vec2,
    /// 各肢段尺寸（髋 → 足）
    pub segments: Vec<SegmentSpec>,
    /// 各肢段初始世界角（度）
    pub initial_rotations: Vec<f32>,
    /// 关节命中 / 绘制半径
    pub joint_radius: f32,

    // ========== 控制 ==========
    /// 手动旋转增益（度 / 像素竖直位移）
    pub rotation_gain: f32,

    // ========== IK ==========
    /// IK 最大迭代次数
    pub ik_iterations: u32,
    /// IK 收敛距离
    pub ik_tolerance: f32,
    /// IK 停滞阈值
    pub ik_epsilon: f32,

    // ========== 小球 ==========
    /// 重力（+y 向下）
    pub gravity: f32,
    /// 小球默认（复位）位置
    pub ball_position: Vec2,
    /// 小球半径
    pub ball_radius: f32,

    // ========== 颜色 ==========
    pub background_color: Vec4,
    pub segment_color: Vec4,
    pub selected_color: Vec4,
    pub joint_color: Vec4,
    pub ball_color: Vec4,

    // ========== 调试 ==========
    /// 是否输出逐帧调试日志，默认 false
    pub debug_log: bool,
}

impl Default for LimbConfig {
    fn default() -> Self {
        Self {
            // ====== 运动链 ======
            // 髋、膝、踝、足尖四关节；窗口 600x800，髋部贴右边缘
            root_position: Vec2::new(600.0, 500.0),
            segments: vec![
                SegmentSpec::new(120.0, 50.0),
                SegmentSpec::new(50.0, 150.0),
                SegmentSpec::new(75.0, 50.0),
            ],
            // 大腿、小腿竖直向下，足部朝左（画面内侧）
            initial_rotations: vec![90.0, 90.0, 180.0],
            joint_radius: 10.0,

            // ====== 控制 ======
            rotation_gain: 0.25,

            // ====== IK ======
            // 越大 → 末端越贴近目标，但更耗 CPU
            // 建议范围: 1~128
            ik_iterations: 64,
            ik_tolerance: 0.01,
            ik_epsilon: 1e-4,

            // ====== 小球 ======
            gravity: 10.0,
            ball_position: Vec2::new(300.0, 400.0),
            ball_radius: 15.0,

            // ====== 颜色 ======
            background_color: rgba(0xa3, 0xb2, 0xd2, 0xff),
            segment_color: rgba(0xe6, 0x29, 0x37, 0xff),
            selected_color: rgba(0xff, 0xa1, 0x00, 0xff),
            joint_color: rgba(0x00, 0xe4, 0x30, 0xff),
            ball_color: rgba(0xff, 0xff, 0xff, 0xff),

            // ====== 调试 ======
            debug_log: false,
        }
    }
}

impl LimbConfig {
    /// 由配置导出 IK 参数
    pub fn ik_config(&self) -> IkConfig {
        IkConfig {
            iterations: self.ik_iterations,
            tolerance: self.ik_tolerance,
            epsilon: self.ik_epsilon,
        }
    }

    /// 校验链以外的标量参数（链本身在 Chain::new 中校验）
    pub fn validate(&self) -> Result<()> {
        if !self.rotation_gain.is_finite() {
            return Err(LimbError::InvalidConfig(format!("rotation_gain {} is not finite", self.rotation_gain)));
        }
        if !(self.ik_tolerance.is_finite() && self.ik_tolerance >= 0.0) {
            return Err(LimbError::InvalidConfig(format!("ik_tolerance {} must be >= 0", self.ik_tolerance)));
        }
        if !(self.ik_epsilon.is_finite() && self.ik_epsilon >= 0.0) {
            return Err(LimbError::InvalidConfig(format!("ik_epsilon {} must be >= 0", self.ik_epsilon)));
        }
        if !self.gravity.is_finite() {
            return Err(LimbError::InvalidConfig(format!("gravity {} is not finite", self.gravity)));
        }
        if !self.ball_position.is_finite() {
            return Err(LimbError::InvalidConfig(format!("ball_position {} is not finite", self.ball_position)));
        }
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return Err(LimbError::InvalidConfig(format!("ball_radius {} must be positive", self.ball_radius)));
        }
        Ok(())
    }
}

/// 8 位 RGBA → 归一化颜色
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Vec4 {
    Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
}

/// 全局配置实例
static LIMB_CONFIG: Lazy<RwLock<LimbConfig>> = Lazy::new(|| RwLock::new(LimbConfig::default()));

/// 获取当前配置（只读）
pub fn get_config() -> LimbConfig {
    LIMB_CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// 手动设置配置（用于运行时调试）
pub fn set_config(config: LimbConfig) {
    *LIMB_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
}

/// 重置为默认配置
pub fn reset_config() {
    *LIMB_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = LimbConfig::default();
}
