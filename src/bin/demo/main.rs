//! 无窗口演示：按脚本回放一段输入，逐帧打印姿态
//!
//! 运行：RUST_LOG=debug cargo run --features demo --bin demo

use glam::Vec2;
use limb_engine::{FrameInput, InputFlags, Limb, LimbConfig};

const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LimbConfig {
        debug_log: true,
        ..LimbConfig::default()
    };
    let mut limb = match Limb::new(config) {
        Ok(limb) => limb,
        Err(e) => {
            log::error!("肢体创建失败: {}", e);
            std::process::exit(1);
        }
    };

    let mut script: Vec<FrameInput> = Vec::new();

    // 抓住膝关节，向上拖动 40 像素
    let knee = limb.chain().joints()[1].position;
    script.push(FrameInput::press(knee, DT));
    for _ in 0..20 {
        script.push(FrameInput::drag(knee, Vec2::new(0.0, -2.0), DT));
    }
    script.push(FrameInput::idle(knee, DT));

    // 抓住足尖，拖向小球下落路径
    let toe = limb.chain().effector();
    let target = Vec2::new(420.0, 640.0);
    script.push(FrameInput::press(toe, DT));
    for i in 1..=30 {
        let p = toe.lerp(target, i as f32 / 30.0);
        script.push(FrameInput::drag(p, (target - toe) / 30.0, DT));
    }

    // 保持不动让小球下落，最后复位
    for _ in 0..60 {
        script.push(FrameInput::drag(target, Vec2::ZERO, DT));
    }
    script.push(FrameInput {
        flags: InputFlags::RESET_BALL,
        ..FrameInput::idle(target, DT)
    });

    for input in &script {
        let report = limb.tick(input);
        if report.ball_hit {
            log::info!("帧 {}: 小球命中肢体，位置 {}", limb.frame(), limb.ball().position);
        }
        if let Some(ik) = report.ik {
            if !ik.reachable {
                log::info!("帧 {}: 目标不可达，钳制到 {}", limb.frame(), ik.clamped_target);
            }
        }
    }

    let view = limb.view();
    for (i, s) in view.segments.iter().enumerate() {
        log::info!(
            "肢段 {}: anchor {} rotation {:.2}° size {} {:?}",
            i,
            s.anchor,
            s.rotation,
            s.size,
            s.highlight
        );
    }
    log::info!("小球: {} r={}", view.ball.center, view.ball.radius);
}
