//! Synthetic hands for unit tests. Canonical hand: wrist at (0.5, 0.8), middle
//! knuckle at (0.5, 0.7), so the hand scale is 0.1.

use super::frame::{
    Handedness, LandmarkFrame, LandmarkPoint, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP,
    MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP, WRIST,
};

const WRIST_AT: (f32, f32) = (0.5, 0.8);
const INDEX_MCP_AT: (f32, f32) = (0.47, 0.71);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Finger {
    /// Reach 0.2, well past 1.5x scale.
    Extended,
    /// Reach under 1.2x scale.
    Curled,
    /// Between the curled and extended bands.
    Between,
}

impl Finger {
    fn reach(self) -> f32 {
        match self {
            Finger::Extended => 0.2,
            Finger::Curled => 0.08,
            Finger::Between => 0.13,
        }
    }
}

pub(crate) struct HandBuilder {
    points: [LandmarkPoint; LANDMARK_COUNT],
    handedness: Handedness,
    confidence: f32,
    palm_at: Option<(f32, f32)>,
}

impl HandBuilder {
    pub(crate) fn new(handedness: Handedness) -> Self {
        let mut points = [LandmarkPoint::new(0.5, 0.75, 0.0); LANDMARK_COUNT];
        points[WRIST] = LandmarkPoint::new(WRIST_AT.0, WRIST_AT.1, 0.0);
        points[MIDDLE_MCP] = LandmarkPoint::new(0.5, 0.7, 0.0);
        points[INDEX_MCP] = LandmarkPoint::new(INDEX_MCP_AT.0, INDEX_MCP_AT.1, 0.0);
        Self {
            points,
            handedness,
            confidence: 0.95,
            palm_at: None,
        }
        .finger(THUMB_TIP, Finger::Curled)
        .finger(INDEX_TIP, Finger::Curled)
        .finger(MIDDLE_TIP, Finger::Curled)
        .finger(RING_TIP, Finger::Curled)
        .finger(PINKY_TIP, Finger::Curled)
    }

    pub(crate) fn fist(handedness: Handedness) -> Self {
        Self::new(handedness)
    }

    pub(crate) fn gun(handedness: Handedness) -> Self {
        Self::new(handedness)
            .finger(INDEX_TIP, Finger::Extended)
            .finger(THUMB_TIP, Finger::Extended)
    }

    pub(crate) fn palm(handedness: Handedness) -> Self {
        Self::new(handedness)
            .finger(THUMB_TIP, Finger::Extended)
            .finger(INDEX_TIP, Finger::Extended)
            .finger(MIDDLE_TIP, Finger::Extended)
            .finger(RING_TIP, Finger::Extended)
            .finger(PINKY_TIP, Finger::Extended)
    }

    pub(crate) fn finger(mut self, tip: usize, state: Finger) -> Self {
        let reach = state.reach();
        self.points[tip] = match tip {
            // thumb sticks out sideways, the rest point up from the wrist
            THUMB_TIP => LandmarkPoint::new(WRIST_AT.0 - reach, WRIST_AT.1, 0.0),
            INDEX_TIP => LandmarkPoint::new(0.47, WRIST_AT.1 - reach, 0.0),
            MIDDLE_TIP => LandmarkPoint::new(0.5, WRIST_AT.1 - reach, 0.0),
            RING_TIP => LandmarkPoint::new(0.53, WRIST_AT.1 - reach, 0.0),
            PINKY_TIP => LandmarkPoint::new(0.56, WRIST_AT.1 - reach, 0.0),
            _ => self.points[tip],
        };
        self
    }

    pub(crate) fn point(mut self, index: usize, point: LandmarkPoint) -> Self {
        self.points[index] = point;
        self
    }

    /// Places the thumb tip level with the index knuckle, `distance` away.
    /// Any distance above 0.1 keeps the thumb extended.
    pub(crate) fn thumb_to_index_knuckle(self, distance: f32) -> Self {
        self.point(
            THUMB_TIP,
            LandmarkPoint::new(INDEX_MCP_AT.0 - distance, INDEX_MCP_AT.1, 0.0),
        )
    }

    /// Translates the whole hand so the middle knuckle lands on `(x, y)`.
    pub(crate) fn palm_at(mut self, x: f32, y: f32) -> Self {
        self.palm_at = Some((x, y));
        self
    }

    pub(crate) fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub(crate) fn points(&self) -> [LandmarkPoint; LANDMARK_COUNT] {
        let mut points = self.points;
        if let Some((x, y)) = self.palm_at {
            let dx = x - points[MIDDLE_MCP].x;
            let dy = y - points[MIDDLE_MCP].y;
            for point in points.iter_mut() {
                point.x += dx;
                point.y += dy;
            }
        }
        points
    }

    pub(crate) fn build(self) -> LandmarkFrame {
        LandmarkFrame::new(self.points(), self.handedness, self.confidence).unwrap()
    }
}
