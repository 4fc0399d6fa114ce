//! 逐帧场景测试

use glam::Vec2;
use limb_engine::skeleton::kinematics;
use limb_engine::{Ball, Chain, ControlMode, FrameInput, IkConfig, IkSolver, Limb, LimbConfig, SegmentSpec};

const DT: f32 = 1.0 / 60.0;

fn leg(rotations: &[f32]) -> Chain {
    let specs = [
        SegmentSpec::new(120.0, 50.0),
        SegmentSpec::new(50.0, 150.0),
        SegmentSpec::new(75.0, 50.0),
    ];
    Chain::new(Vec2::new(600.0, 500.0), &specs, rotations, 10.0).unwrap()
}

fn max_length_error(chain: &Chain) -> f32 {
    chain
        .segments()
        .iter()
        .enumerate()
        .map(|(i, s)| (chain.joints()[i].position.distance(chain.joints()[i + 1].position) - s.length()).abs())
        .fold(0.0, f32::max)
}

/// 确定性伪随机角度序列
fn angles(seed: u32, count: usize) -> Vec<f32> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32 * 720.0 - 360.0
        })
        .collect()
}

#[test]
fn test_random_poses_round_trip() {
    for seed in 1..40 {
        let mut chain = leg(&angles(seed, 3));
        let before = chain.positions();
        kinematics::resolve(&mut chain);
        kinematics::propagate(&mut chain);
        for (a, b) in before.iter().zip(chain.positions()) {
            assert!(a.distance(b) < 1e-2, "seed {}: {} vs {}", seed, a, b);
        }
        assert!(max_length_error(&chain) < 1e-3);
    }
}

#[test]
fn test_ik_keeps_lengths_and_root_over_many_targets() {
    let mut chain = leg(&[90.0, 90.0, 180.0]);
    let root = chain.root();
    let solver = IkSolver::new(IkConfig::default());
    let coords = angles(7, 80);
    for pair in coords.chunks(2) {
        let target = root + Vec2::new(pair[0], pair[1]);
        solver.solve(&mut chain, target);
        assert_eq!(chain.root(), root);
        assert!(max_length_error(&chain) < 1e-2);
        assert!(root.distance(chain.effector()) <= chain.total_length() + 1e-2);
    }
}

#[test]
fn test_example_unreachable_target() {
    // 总长 245，目标 (600, 1200) 不可达
    let mut chain = leg(&[90.0, 90.0, 90.0]);
    let report = IkSolver::default().solve(&mut chain, Vec2::new(600.0, 1200.0));
    assert!(!report.reachable);
    let j2 = chain.joints()[2].position;
    assert!((chain.effector().distance(j2) - 75.0).abs() < 1e-2);
    assert!((chain.effector() - Vec2::new(600.0, 745.0)).length() < 1e-2);
}

#[test]
fn test_example_ball_free_fall() {
    let mut ball = Ball::new(Vec2::new(300.0, 400.0), 15.0);
    for _ in 0..60 {
        ball.step(DT, 10.0, &[]);
    }
    assert!((ball.velocity.y - 10.0).abs() < 1e-3);
    assert!((ball.position.y - 705.0).abs() < 1e-2);
}

#[test]
fn test_ball_lands_on_dragged_foot() {
    let config = LimbConfig {
        ball_position: Vec2::new(420.0, 400.0),
        ..LimbConfig::default()
    };
    let mut limb = Limb::new(config).unwrap();
    let toe = limb.chain().effector();
    assert_eq!(limb.tick(&FrameInput::press(toe, DT)).mode, ControlMode::Ik);

    // 把足尖拉到小球正下方
    let target = Vec2::new(420.0, 620.0);
    limb.tick(&FrameInput::drag(target, target - toe, DT));
    assert!(limb.chain().effector().distance(target) < 0.5);

    let mut latched = false;
    for _ in 0..240 {
        let report = limb.tick(&FrameInput::drag(target, Vec2::ZERO, DT));
        latched |= report.ball_hit;
        if limb.ball().is_hit() {
            assert_eq!(limb.ball().acceleration.y, 0.0);
        }
    }
    assert!(latched, "ball at {}", limb.ball().position);
    assert!(limb.ball().position.y < 620.0);
}

#[test]
fn test_manual_then_ik_keeps_invariants() {
    let mut limb = Limb::new(LimbConfig::default()).unwrap();
    let root = limb.chain().root();

    let ankle = limb.chain().joints()[2].position;
    limb.tick(&FrameInput::press(ankle, DT));
    for _ in 0..30 {
        limb.tick(&FrameInput::drag(ankle, Vec2::new(0.0, 3.0), DT));
    }
    assert!(max_length_error(limb.chain()) < 1e-3);

    let toe = limb.chain().effector();
    limb.tick(&FrameInput::press(toe, DT));
    limb.tick(&FrameInput::drag(Vec2::new(450.0, 700.0), Vec2::ZERO, DT));
    assert_eq!(limb.chain().root(), root);
    assert!(max_length_error(limb.chain()) < 1e-2);
    assert!(limb.chain().segments().iter().filter(|s| s.selected).count() <= 1);
}
