//! 物理模块
//!
//! - config: 全局引擎配置（扁平化）
//! - collision: 圆 / 线段相交检测
//! - ball: 受重力下落、与肢段边缘一次性碰撞锁存的小球

pub mod config;
pub mod collision;
mod ball;

pub use ball::Ball;
pub use collision::circle_intersects_segment;
pub use config::{get_config, reset_config, set_config, LimbConfig};
