//! Left/right hand assignment.
//!
//! The tracker reports hands without reliable side labels, so sides are
//! assigned from horizontal position. The camera image is mirrored for the
//! user, which puts the user's right hand at larger x.
//!
//! A single hand near the frame midpoint can flip sides between frames;
//! the heuristic is deliberately not debounced (known limitation of the
//! reference behavior, kept as-is).

use manus_types::{Hand, HandInput, HandSide};

/// Horizontal midpoint used to side a lone hand.
const SIDE_SPLIT: f64 = 0.5;

/// Per-side hand inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidePair {
    pub left: HandInput,
    pub right: HandInput,
}

impl SidePair {
    pub fn get(&self, side: HandSide) -> &HandInput {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }
}

/// Assign up to two hands to sides by wrist position.
///
/// Two hands: the one with larger wrist x is the right hand; on an exact
/// tie the first reported hand goes left. One hand: midpoint split. Extra
/// hands beyond two are ignored.
pub fn assign_sides(hands: &[Hand]) -> SidePair {
    match hands {
        [] => SidePair {
            left: HandInput::Absent,
            right: HandInput::Absent,
        },
        [only] => {
            if only.wrist().x >= SIDE_SPLIT {
                SidePair {
                    left: HandInput::Absent,
                    right: HandInput::Present(*only),
                }
            } else {
                SidePair {
                    left: HandInput::Present(*only),
                    right: HandInput::Absent,
                }
            }
        }
        [first, second, ..] => {
            if second.wrist().x > first.wrist().x {
                SidePair {
                    left: HandInput::Present(*first),
                    right: HandInput::Present(*second),
                }
            } else {
                SidePair {
                    left: HandInput::Present(*second),
                    right: HandInput::Present(*first),
                }
            }
        }
    }
}
