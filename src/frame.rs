//! Frame-rectangle math for packed battler sheets, plus the motion-history
//! substitution that keeps overlays on the damage pose while the base
//! animation has already snapped back to idle (the base resets one tick
//! early; without this the overlay flickers to idle mid-hit).

use bevy::prelude::*;

use crate::components::{Motion, OverlayState};
use crate::config::FrameLayout;

/// Motion/pattern pair the overlay should display this tick.
///
/// Records non-idle motions into the rig's memory unconditionally; when the
/// current motion is idle right after a recorded damage motion, the recorded
/// pair is substituted instead.
pub fn resolve_display_motion(
    state: &mut OverlayState,
    current: Option<&Motion>,
    pattern: u32,
) -> (Option<Motion>, u32) {
    if let Some(motion) = current {
        if motion.name == "idle" {
            if let Some((last, last_pattern)) = state.last_motion.as_ref() {
                if last.name == "damage" {
                    return (Some(last.clone()), *last_pattern);
                }
            }
        } else {
            state.last_motion = Some((motion.clone(), pattern));
        }
    }
    (current.cloned(), pattern)
}

/// Source rectangle of one animation cell inside a sheet of `bitmap_size`
/// pixels. Pose columns advance horizontally in groups of `frames`
/// sub-frames; poses wrap vertically every `poses_per_column` rows.
pub fn overlay_frame_rect(
    layout: FrameLayout,
    bitmap_size: Vec2,
    pose_index: u32,
    pattern: u32,
) -> Rect {
    let per_column = layout.poses_per_column();
    let cell_w = bitmap_size.x / (layout.columns * layout.frames) as f32;
    let cell_h = bitmap_size.y / per_column as f32;
    let column = (pose_index / per_column) * layout.frames + pattern;
    let row = pose_index % per_column;
    let min = Vec2::new(column as f32 * cell_w, row as f32 * cell_h);
    Rect::from_corners(min, min + Vec2::new(cell_w, cell_h))
}
