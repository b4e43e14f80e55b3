use handcore::landmark_interface::{
    LandmarkPoint, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_TIP, PINKY_TIP,
    RING_TIP, THUMB_TIP, WRIST,
};
use handcore::Gesture;

/// Fingertip reach from the wrist, in hand-scale units.
const EXTENDED_REACH: f32 = 2.0;
const CURLED_REACH: f32 = 0.8;
const RELAXED_REACH: f32 = 1.35;

/// Knuckle x offsets from the middle knuckle, in hand-scale units.
const INDEX_OFFSET: f32 = -0.3;
const RING_OFFSET: f32 = 0.3;
const PINKY_OFFSET: f32 = 0.55;

/// Where the hand is and how it is shaped.
#[derive(Debug, Clone, Copy)]
pub struct HandPlacement {
    /// Middle knuckle, in raw image coordinates.
    pub palm: (f32, f32),
    /// Wrist to middle knuckle.
    pub scale: f32,
    /// Thumb tip distance from the index knuckle, in hand-scale units, when
    /// the thumb is extended.
    pub thumb_spread: f32,
}

fn lerp(a: LandmarkPoint, b: LandmarkPoint, t: f32) -> LandmarkPoint {
    LandmarkPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t, 0.0)
}

/// 21 landmarks posed as `gesture`; `Gesture::None` gives a half-open hand.
pub fn pose_points(
    gesture: Gesture,
    placement: &HandPlacement,
) -> [LandmarkPoint; LANDMARK_COUNT] {
    let (px, py) = placement.palm;
    let s = placement.scale;
    let at = |x: f32, y: f32| LandmarkPoint::new(px + x * s, py + y * s, 0.0);

    let (finger_reach, index_reach, thumb_out) = match gesture {
        Gesture::Fist => (CURLED_REACH, CURLED_REACH, false),
        Gesture::Gun => (CURLED_REACH, EXTENDED_REACH, true),
        Gesture::Palm => (EXTENDED_REACH, EXTENDED_REACH, true),
        Gesture::None => (RELAXED_REACH, RELAXED_REACH, false),
    };

    let mut points = [at(0.0, 0.0); LANDMARK_COUNT];
    points[WRIST] = at(0.0, 1.0);

    // fingers: knuckle on the palm line, tip straight up from the wrist
    let fingers = [
        (INDEX_MCP, INDEX_TIP, INDEX_OFFSET, index_reach),
        (MIDDLE_MCP, MIDDLE_TIP, 0.0, finger_reach),
        (MIDDLE_TIP + 1, RING_TIP, RING_OFFSET, finger_reach),
        (RING_TIP + 1, PINKY_TIP, PINKY_OFFSET, finger_reach),
    ];
    for (mcp, tip, offset, reach) in fingers {
        let knuckle = at(offset, 0.0);
        let fingertip = at(offset, 1.0 - reach);
        points[mcp] = knuckle;
        points[mcp + 1] = lerp(knuckle, fingertip, 1.0 / 3.0);
        points[mcp + 2] = lerp(knuckle, fingertip, 2.0 / 3.0);
        points[tip] = fingertip;
    }

    let thumb_tip = if thumb_out {
        at(INDEX_OFFSET - placement.thumb_spread, 0.0)
    } else {
        at(-0.5, 0.3)
    };
    let wrist = points[WRIST];
    for joint in 1..THUMB_TIP {
        points[joint] = lerp(wrist, thumb_tip, joint as f32 / THUMB_TIP as f32);
    }
    points[THUMB_TIP] = thumb_tip;

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use handcore::processing::{classify, GestureThresholds};
    use handcore::{Handedness, LandmarkFrame};

    fn placement() -> HandPlacement {
        HandPlacement {
            palm: (0.5, 0.5),
            scale: 0.1,
            thumb_spread: 1.3,
        }
    }

    #[test]
    fn templates_classify_as_their_gesture() {
        for gesture in Gesture::ALL {
            let points = pose_points(gesture, &placement());
            let frame = LandmarkFrame::new(points, Handedness::Right, 0.9).unwrap();
            assert_eq!(
                classify(&frame, &GestureThresholds::default()),
                gesture,
                "template {}",
                gesture
            );
        }
    }

    #[test]
    fn palm_lands_on_the_middle_knuckle() {
        let points = pose_points(Gesture::Fist, &placement());
        assert_eq!(points[MIDDLE_MCP], LandmarkPoint::new(0.5, 0.5, 0.0));
    }
}
