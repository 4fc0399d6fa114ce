//! 手动旋转

use crate::skeleton::{kinematics, Chain};

/// 按指针竖直位移旋转肢段，并向下游传播
///
/// 向上拖动（delta_y < 0）使角度增大；角度不做钳制。
pub fn adjust(chain: &mut Chain, segment: usize, pointer_delta_y: f32, gain: f32) {
    let Some(seg) = chain.segments_mut().get_mut(segment) else {
        return;
    };
    let delta = -pointer_delta_y * gain;
    if !delta.is_finite() {
        return;
    }
    seg.rotation += delta;
    kinematics::propagate_from(chain, segment);
}
