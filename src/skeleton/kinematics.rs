//! 正向运动学与朝向恢复
//!
//! 正向：Jᵢ₊₁ = anchorᵢ + R(rotationᵢ)·(lengthᵢ, 0)，下游肢段 anchor = 新关节位置。
//! 逆向：rotationᵢ = atan2(Jᵢ₊₁ - Jᵢ)，anchorᵢ = Jᵢ₊₁ - R(rotationᵢ)·(lengthᵢ, 0)。
//! 两者互为逆运算：resolve 后 propagate 能复现关节位置。

use super::chain::Chain;
use super::{heading_degrees, DEGENERATE_EPSILON_SQ};

/// 从根关节开始整链正向传播
pub fn propagate(chain: &mut Chain) {
    propagate_from(chain, 0);
}

/// 从指定肢段开始正向传播
///
/// 该肢段的 anchor 取其近端关节位置；上游关节不受影响。
/// 按拓扑顺序单趟完成，O(N)。
pub fn propagate_from(chain: &mut Chain, start: usize) {
    let (joints, segments) = chain.parts_mut();
    if start >= segments.len() {
        return;
    }

    for i in start..segments.len() {
        let segment = &mut segments[i];
        segment.anchor_point = joints[i].position;
        segment.refresh_corners();
        joints[i + 1].position = segment.distal_point();
    }
}

/// 由相邻两关节位置恢复单个肢段的 rotation 与 anchor
///
/// 两关节重合时保留原 rotation。
pub fn resolve_segment(chain: &mut Chain, index: usize) {
    let (joints, segments) = chain.parts_mut();
    let Some(segment) = segments.get_mut(index) else {
        return;
    };

    let proximal = joints[index].position;
    let distal = joints[index + 1].position;
    let delta = distal - proximal;

    if delta.length_squared() >= DEGENERATE_EPSILON_SQ && delta.is_finite() {
        segment.rotation = heading_degrees(delta);
    } else {
        log::warn!("肢段 {} 两端关节重合，保留原角度 {:.2}°", index, segment.rotation);
    }

    segment.anchor_point = distal - segment.rotated_end();
    segment.refresh_corners();
}

/// 对所有相邻关节对执行朝向恢复
pub fn resolve(chain: &mut Chain) {
    for i in 0..chain.segment_count() {
        resolve_segment(chain, i);
    }
}

/// 结算：朝向恢复后从根部正向传播
///
/// IK 求解或直接修改关节位置后调用，精确恢复长度与 anchor 不变量。
pub fn settle(chain: &mut Chain) {
    resolve(chain);
    propagate(chain);
}
