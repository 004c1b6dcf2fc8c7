//! Priority-ordered classification of hand geometry into discrete gestures.

use crate::landmarks::{HandLandmark, LandmarkFrame};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum thumb-tip/index-tip distance (normalized units, strict `<`) for
/// the OK pinch.
pub const OK_TOUCH_DISTANCE: f32 = 0.03;

/// The closed gesture vocabulary. `classify` returns `None` when a hand
/// matches no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Hello,
    Help,
    Yes,
    No,
    Ok,
    A,
    B,
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gesture::Hello => "Hello",
            Gesture::Help => "Help",
            Gesture::Yes => "Yes",
            Gesture::No => "No",
            Gesture::Ok => "OK",
            Gesture::A => "A",
            Gesture::B => "B",
        };
        write!(f, "{name}")
    }
}

/// Classifies one hand. Pure and total: a frame missing any required
/// keypoint yields `None` rather than an error.
///
/// The geometry assumes a mirrored, viewer-facing frame: the thumb counts as
/// extended when its tip is strictly left of the wrist, the other four
/// fingers when their tip is strictly above the index-base joint.
///
/// The rules overlap by construction (an all-curled hand satisfies Help, Yes
/// with the thumb curled, and A; an all-extended hand satisfies both Hello
/// and B). Evaluation order resolves every overlap and is part of the
/// contract: the first matching rule wins and later rules are shadowed
/// wherever they coincide with an earlier one.
pub fn classify(hand: &LandmarkFrame) -> Option<Gesture> {
    let wrist = hand.get(HandLandmark::Wrist)?;
    let thumb_tip = hand.get(HandLandmark::ThumbTip)?;
    let index_mcp = hand.get(HandLandmark::IndexFingerMcp)?;
    let index_tip = hand.get(HandLandmark::IndexFingerTip)?;
    let middle_tip = hand.get(HandLandmark::MiddleFingerTip)?;
    let ring_tip = hand.get(HandLandmark::RingFingerTip)?;
    let pinky_tip = hand.get(HandLandmark::PinkyTip)?;

    let thumb = thumb_tip.x < wrist.x;
    let index = index_tip.y < index_mcp.y;
    let middle = middle_tip.y < index_mcp.y;
    let ring = ring_tip.y < index_mcp.y;
    let pinky = pinky_tip.y < index_mcp.y;

    let all_fingers = index && middle && ring && pinky;
    let no_fingers = !(index || middle || ring || pinky);

    // Hello: open palm.
    if all_fingers && thumb {
        Some(Gesture::Hello)
    }
    // Help: the four fingers curled, thumb unconstrained.
    else if no_fingers {
        Some(Gesture::Help)
    }
    // Yes: thumbs-up. Shadowed by Help.
    else if thumb && no_fingers {
        Some(Gesture::Yes)
    }
    // No: index only.
    else if index && !(thumb || middle || ring || pinky) {
        Some(Gesture::No)
    }
    // OK: thumb and index pinched, remaining fingers curled.
    else if thumb_tip.planar_distance(index_tip) < OK_TOUCH_DISTANCE
        && !(middle || ring || pinky)
    {
        Some(Gesture::Ok)
    }
    // A: closed fist. Shadowed by Help.
    else if !thumb && no_fingers {
        Some(Gesture::A)
    }
    // B: all five extended. Shadowed by Hello.
    else if thumb && all_fingers {
        Some(Gesture::B)
    } else {
        None
    }
}
