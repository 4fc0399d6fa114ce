//! 下落小球
//!
//! 点质量，受恒定重力下落；首次接触肢段边缘后锁存 hit，
//! 竖直速度与加速度清零，之后不再受重力。无反弹、无摩擦。
//! 流程：每帧 [重力 → 碰撞检测 → 半隐式欧拉积分]

use glam::Vec2;

use super::collision::circle_intersects_segment;
use super::config::LimbConfig;
use crate::skeleton::Segment;

/// 下落小球
#[derive(Clone, Debug)]
pub struct Ball {
    pub position: Vec2,
    /// 速度（像素 / 帧）
    pub velocity: Vec2,
    /// 加速度（像素 / 帧²）
    pub acceleration: Vec2,
    radius: f32,
    /// 碰撞锁存，仅 reset 可清除
    hit: bool,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            radius,
            hit: false,
        }
    }

    /// 按配置的默认位置与半径创建
    pub fn from_config(config: &LimbConfig) -> Self {
        Self::new(config.ball_position, config.ball_radius)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// 推进一帧，返回本帧是否刚发生碰撞
    pub fn step(&mut self, delta_time: f32, gravity: f32, segments: &[Segment]) -> bool {
        if !self.hit {
            self.acceleration.y = gravity * delta_time;
        }

        let mut hit_now = false;
        if !self.hit {
            if let Some((segment, edge)) = self.find_contact(segments) {
                self.hit = true;
                self.velocity.y = 0.0;
                self.acceleration.y = 0.0;
                hit_now = true;
                log::debug!("小球碰到肢段 {} 的边 {}，位置 {}", segment, edge, self.position);
            }
        }

        // 半隐式欧拉，命中后仍保留水平速度
        self.velocity += self.acceleration;
        self.position += self.velocity;
        hit_now
    }

    /// 按 上、左、下、右 的顺序检测每个肢段的边，返回首个接触
    fn find_contact(&self, segments: &[Segment]) -> Option<(usize, usize)> {
        const EDGE_ORDER: [usize; 4] = [0, 3, 2, 1];

        segments.iter().enumerate().find_map(|(index, segment)| {
            let edges = segment.edges();
            EDGE_ORDER
                .iter()
                .copied()
                .find(|&e| circle_intersects_segment(self.position, self.radius, edges[e].0, edges[e].1))
                .map(|e| (index, e))
        })
    }

    /// 复位：回到默认位置，清零运动状态并解除锁存
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        self.hit = false;
        log::info!("小球复位到 {}", position);
    }
}
