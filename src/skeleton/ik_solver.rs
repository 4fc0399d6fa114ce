//! IK 求解器 - FABRIK 迭代约束求解
//!
//! 设计原则：
//! - 肢段长度固定，根关节固定
//! - 后向 / 前向两趟交替迭代，收敛后提前退出
//! - 不可达目标按倒数第二关节延伸钳制
//! - 退化方向回退到肢段原角度，绝不产生 NaN

use glam::Vec2;

use super::chain::Chain;
use super::{direction_degrees, kinematics, DEGENERATE_EPSILON_SQ};

// ============================================================================
// 配置与结果
// ============================================================================

/// IK 配置
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IkConfig {
    /// 最大迭代次数（后向 + 前向为一次）
    pub iterations: u32,
    /// 末端距目标小于此值即视为收敛
    pub tolerance: f32,
    /// 单次迭代最大关节位移小于此值即视为停滞
    pub epsilon: f32,
}

impl Default for IkConfig {
    fn default() -> Self {
        Self {
            iterations: 64,
            tolerance: 0.01,
            epsilon: 1e-4,
        }
    }
}

/// 单次求解结果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IkReport {
    /// 实际执行的迭代次数
    pub iterations: u32,
    /// 最终末端到（钳制后）目标的距离
    pub distance: f32,
    /// 原始目标是否在总长度范围内
    pub reachable: bool,
    /// 实际追踪的目标（不可达时为钳制点）
    pub clamped_target: Vec2,
}

// ============================================================================
// IK 求解器
// ============================================================================

/// FABRIK 求解器
#[derive(Clone, Debug, Default)]
pub struct IkSolver {
    pub config: IkConfig,
}

impl IkSolver {
    pub fn new(config: IkConfig) -> Self {
        Self { config }
    }

    /// 求解 IK 并写回关节，随后结算朝向与 anchor
    ///
    /// 返回后链满足长度不变量，根关节位置不变。
    pub fn solve(&self, chain: &mut Chain, target: Vec2) -> IkReport {
        let root = chain.root();
        let lengths = chain.lengths();
        // 退化回退方向：各肢段当前朝向
        let fallback: Vec<Vec2> = chain
            .segments()
            .iter()
            .map(|s| direction_degrees(s.rotation))
            .collect();
        let mut positions = chain.positions();
        let n = positions.len() - 1;

        if !target.is_finite() {
            log::warn!("IK 目标非有限值 {}，跳过求解", target);
            return IkReport {
                iterations: 0,
                distance: positions[n].distance(root),
                reachable: false,
                clamped_target: positions[n],
            };
        }

        // 可达性检查
        let total: f32 = lengths.iter().sum();
        let reachable = root.distance(target) <= total;
        let goal = if reachable {
            target
        } else {
            Self::clamp_target(&positions, root, target, lengths[n - 1], fallback[n - 1])
        };

        let mut best_positions = positions.clone();
        let mut best_distance = positions[n].distance(goal);
        let mut iterations = 0;

        for _ in 0..self.config.iterations {
            if best_distance <= self.config.tolerance {
                break;
            }
            iterations += 1;

            let before = positions.clone();
            Self::backward_pass(&mut positions, &lengths, &fallback, goal);
            Self::forward_pass(&mut positions, &lengths, &fallback, root);

            let distance = positions[n].distance(goal);
            if distance < best_distance {
                best_distance = distance;
                best_positions.copy_from_slice(&positions);
            }

            let max_delta = before
                .iter()
                .zip(&positions)
                .map(|(a, b)| a.distance(*b))
                .fold(0.0_f32, f32::max);
            if max_delta < self.config.epsilon {
                break;
            }
        }

        for (joint, p) in chain.joints_mut().iter_mut().zip(&best_positions) {
            joint.position = *p;
        }
        kinematics::settle(chain);

        let distance = chain.effector().distance(goal);
        log::debug!(
            "IK 求解: 目标 {} (可达={}), 迭代 {}, 末端误差 {:.4}",
            target,
            reachable,
            iterations,
            distance
        );

        IkReport {
            iterations,
            distance,
            reachable,
            clamped_target: goal,
        }
    }

    /// 不可达目标钳制：从倒数第二关节沿根 → 目标方向延伸末段长度
    fn clamp_target(positions: &[Vec2], root: Vec2, target: Vec2, last_length: f32, fallback: Vec2) -> Vec2 {
        let dir = (target - root).try_normalize().unwrap_or(fallback);
        positions[positions.len() - 2] + dir * last_length
    }

    /// 后向趟：末端置于目标，向根部逐个按固定长度回拉
    fn backward_pass(positions: &mut [Vec2], lengths: &[f32], fallback: &[Vec2], goal: Vec2) {
        let n = positions.len() - 1;
        positions[n] = goal;
        for i in (0..n).rev() {
            let dir = Self::safe_direction(positions[i] - positions[i + 1], -fallback[i]);
            positions[i] = positions[i + 1] + dir * lengths[i];
        }
    }

    /// 前向趟：根关节复位，向末端逐个按固定长度前推
    fn forward_pass(positions: &mut [Vec2], lengths: &[f32], fallback: &[Vec2], root: Vec2) {
        positions[0] = root;
        for i in 0..positions.len() - 1 {
            let dir = Self::safe_direction(positions[i + 1] - positions[i], fallback[i]);
            positions[i + 1] = positions[i] + dir * lengths[i];
        }
    }

    /// 归一化；零向量或非有限值时返回回退方向
    #[inline]
    fn safe_direction(v: Vec2, fallback: Vec2) -> Vec2 {
        if v.length_squared() < DEGENERATE_EPSILON_SQ {
            return fallback;
        }
        v.try_normalize().unwrap_or(fallback)
    }
}
