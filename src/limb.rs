//! 肢体管理器
//!
//! 宿主持有的聚合对象，每帧执行：
//! 输入采样 → 选择更新 → 模式分派（手动旋转 / IK）→ 结算 → 小球物理。
//! 单线程、无阻塞；IK 迭代次数有上限。

use glam::Vec2;

use crate::control::{adjust, ControlMode, FrameInput, Selection};
use crate::physics::{get_config, Ball, LimbConfig};
use crate::skeleton::{kinematics, Chain, IkReport, IkSolver};
use crate::Result;

/// 单帧结果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// 本帧控制模式
    pub mode: ControlMode,
    /// 本帧按下时命中的关节
    pub hit_joint: Option<usize>,
    /// IK 模式下的求解结果
    pub ik: Option<IkReport>,
    /// 小球是否在本帧刚发生碰撞
    pub ball_hit: bool,
}

/// 肢体（运动链 + 选择 + IK + 小球）
#[derive(Clone, Debug)]
pub struct Limb {
    chain: Chain,
    selection: Selection,
    solver: IkSolver,
    ball: Ball,
    config: LimbConfig,
    frame: u64,
}

impl Limb {
    /// 按给定配置构建
    pub fn new(config: LimbConfig) -> Result<Self> {
        config.validate()?;
        let chain = Chain::new(
            config.root_position,
            &config.segments,
            &config.initial_rotations,
            config.joint_radius,
        )?;
        let ball = Ball::from_config(&config);
        let solver = IkSolver::new(config.ik_config());

        log::info!(
            "肢体创建: IK 迭代 {}, 旋转增益 {}, 重力 {}",
            config.ik_iterations,
            config.rotation_gain,
            config.gravity
        );

        Ok(Self {
            chain,
            selection: Selection::new(),
            solver,
            ball,
            config,
            frame: 0,
        })
    }

    /// 使用全局配置快照构建
    pub fn from_global_config() -> Result<Self> {
        Self::new(get_config())
    }

    #[inline]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    #[inline]
    pub fn config(&self) -> &LimbConfig {
        &self.config
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// 已执行的帧数
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// 宿主移动髋部
    pub fn set_root(&mut self, root: Vec2) {
        self.chain.set_root(root);
    }

    /// 推进一帧
    pub fn tick(&mut self, input: &FrameInput) -> FrameReport {
        self.frame += 1;

        // 选择（仅按下边沿）
        let hit_joint = if input.pressed() {
            self.selection.press(&mut self.chain, input.pointer)
        } else {
            None
        };

        // 模式分派
        let mode = self.selection.mode(&self.chain, input.held());
        let ik = match mode {
            ControlMode::Ik => Some(self.solver.solve(&mut self.chain, input.pointer)),
            ControlMode::Manual(segment) => {
                adjust(&mut self.chain, segment, input.pointer_delta.y, self.config.rotation_gain);
                // 手动角度保持自由累加，仅做正向结算
                kinematics::propagate(&mut self.chain);
                None
            }
            ControlMode::Idle => None,
        };

        // 小球
        let ball_hit = if input.reset_requested() {
            self.ball.reset(self.config.ball_position);
            false
        } else {
            self.ball.step(input.delta_time, self.config.gravity, self.chain.segments())
        };

        if self.config.debug_log {
            log::debug!(
                "帧 {}: 模式 {:?}, 末端 {}, 小球 {} (hit={})",
                self.frame,
                mode,
                self.chain.effector(),
                self.ball.position,
                self.ball.is_hit()
            );
        }

        FrameReport {
            mode,
            hit_joint,
            ik,
            ball_hit,
        }
    }

    /// 小球复位
    pub fn reset_ball(&mut self) {
        self.ball.reset(self.config.ball_position);
    }
}
