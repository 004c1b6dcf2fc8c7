//! Draws detected hand landmarks into a frame buffer before display.

use crate::sensor::CameraFrame;
use attend_core::LandmarkFrame;

const DOT_SIZE: usize = 3;
const DOT_COLOR: (u8, u8, u8) = (0, 255, 0);

/// Stamps a small dot at every keypoint of every hand. Points outside the
/// normalized `[0, 1]` range are skipped; dots at the frame edge are
/// clipped rather than wrapped.
pub fn draw_hands(frame: &mut CameraFrame, hands: &[LandmarkFrame]) {
    let width = frame.width as usize;
    let height = frame.height as usize;

    for hand in hands {
        for point in hand.points() {
            if !(0.0..=1.0).contains(&point.x) || !(0.0..=1.0).contains(&point.y) {
                continue;
            }
            let cx = (point.x * width as f32) as usize;
            let cy = (point.y * height as f32) as usize;

            for dy in 0..DOT_SIZE {
                for dx in 0..DOT_SIZE {
                    let x = cx + dx;
                    let y = cy + dy;
                    if x < width && y < height {
                        let idx = (y * width + x) * 3;
                        frame.pixels[idx] = DOT_COLOR.0;
                        frame.pixels[idx + 1] = DOT_COLOR.1;
                        frame.pixels[idx + 2] = DOT_COLOR.2;
                    }
                }
            }
        }
    }
}
