//! Edge-triggered hover tracking.
//!
//! [`HoverDetector`] keeps a single "currently hovered" slot and compares it
//! against the nearest hit of each frame. Only changes produce events.

use crate::raycaster::{nearest, Intersection};

/// Hover state machine. Starts [`HoverPhase::Idle`]; there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverPhase<T> {
    /// Nothing under the pointer.
    Idle,
    /// The pointer ray's nearest hit.
    Hovering(T),
}

/// A single enter or leave edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent<T> {
    /// Pointer started hovering the target.
    Enter(T),
    /// Pointer stopped hovering the target.
    Leave(T),
}

/// Outcome of one [`HoverDetector::update_hover`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTransition<T> {
    /// Same target (or still nothing) as the previous frame.
    Unchanged,
    /// Idle -> hovering.
    Entered(T),
    /// Hovering -> idle.
    Left(T),
    /// The nearest hit moved from one target to another within a frame.
    ///
    /// Reported as one combined transition: leave `left`, then enter
    /// `entered`. Callers that only distinguish "something" from "nothing"
    /// see no edge here.
    Switched {
        /// Previously hovered target.
        left: T,
        /// Newly hovered target.
        entered: T,
    },
}

impl<T> HoverTransition<T> {
    /// True when no edge occurred.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Target that was entered, if any.
    pub fn entered(&self) -> Option<&T> {
        match self {
            Self::Entered(target) | Self::Switched { entered: target, .. } => Some(target),
            _ => None,
        }
    }

    /// Target that was left, if any.
    pub fn left(&self) -> Option<&T> {
        match self {
            Self::Left(target) | Self::Switched { left: target, .. } => Some(target),
            _ => None,
        }
    }

    /// Flatten into ordered edges; a switch yields leave then enter.
    pub fn into_events(self) -> Vec<HoverEvent<T>> {
        match self {
            Self::Unchanged => Vec::new(),
            Self::Entered(target) => vec![HoverEvent::Enter(target)],
            Self::Left(target) => vec![HoverEvent::Leave(target)],
            Self::Switched { left, entered } => {
                vec![HoverEvent::Leave(left), HoverEvent::Enter(entered)]
            }
        }
    }
}

/// Tracks which target the pointer hovers and reports enter/leave edges.
///
/// Called once per frame with that frame's intersections. The hovered slot
/// is replaced as a whole on every call, so it always reflects the latest
/// frame.
#[derive(Debug, Clone)]
pub struct HoverDetector<T> {
    phase: HoverPhase<T>,
}

impl<T> Default for HoverDetector<T> {
    fn default() -> Self {
        Self {
            phase: HoverPhase::Idle,
        }
    }
}

impl<T: Clone + PartialEq> HoverDetector<T> {
    /// Create an idle detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of intersections.
    ///
    /// Input order is not trusted: the minimum-distance hit is the nearest.
    pub fn update_hover(&mut self, intersections: &[Intersection<T>]) -> HoverTransition<T> {
        let nearest = nearest(intersections).map(|hit| hit.target.clone());
        self.update_nearest(nearest)
    }

    /// Feed the nearest target directly, for callers that already ranked hits.
    pub fn update_nearest(&mut self, nearest: Option<T>) -> HoverTransition<T> {
        let next = match nearest {
            Some(target) => HoverPhase::Hovering(target),
            None => HoverPhase::Idle,
        };
        let previous = std::mem::replace(&mut self.phase, next);

        match (previous, &self.phase) {
            (HoverPhase::Idle, HoverPhase::Idle) => HoverTransition::Unchanged,
            (HoverPhase::Idle, HoverPhase::Hovering(entered)) => {
                HoverTransition::Entered(entered.clone())
            }
            (HoverPhase::Hovering(left), HoverPhase::Idle) => HoverTransition::Left(left),
            (HoverPhase::Hovering(left), HoverPhase::Hovering(entered)) => {
                if left == *entered {
                    HoverTransition::Unchanged
                } else {
                    HoverTransition::Switched {
                        left,
                        entered: entered.clone(),
                    }
                }
            }
        }
    }

    /// Currently hovered target.
    pub fn hovered(&self) -> Option<&T> {
        match &self.phase {
            HoverPhase::Hovering(target) => Some(target),
            HoverPhase::Idle => None,
        }
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> &HoverPhase<T> {
        &self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn hit(target: char, distance: f32) -> Intersection<char> {
        Intersection::new(target, distance, Vec3::ZERO)
    }

    #[test]
    fn starts_idle() {
        let detector = HoverDetector::<char>::new();
        assert_eq!(detector.phase(), &HoverPhase::Idle);
        assert!(detector.hovered().is_none());
    }

    #[test]
    fn empty_frames_never_emit() {
        let mut detector = HoverDetector::<char>::new();
        for _ in 0..10 {
            assert!(detector.update_hover(&[]).is_unchanged());
            assert!(detector.hovered().is_none());
        }
    }

    #[test]
    fn enter_then_leave() {
        let mut detector = HoverDetector::new();
        assert_eq!(
            detector.update_hover(&[hit('a', 1.0)]),
            HoverTransition::Entered('a')
        );
        assert_eq!(detector.hovered(), Some(&'a'));
        assert_eq!(detector.update_hover(&[]), HoverTransition::Left('a'));
        assert!(detector.hovered().is_none());
    }

    #[test]
    fn switching_targets_reports_leave_and_enter() {
        let mut detector = HoverDetector::new();
        detector.update_hover(&[hit('a', 1.0)]);
        let transition = detector.update_hover(&[hit('b', 1.0)]);
        assert_eq!(
            transition,
            HoverTransition::Switched {
                left: 'a',
                entered: 'b'
            }
        );
        assert_eq!(transition.left(), Some(&'a'));
        assert_eq!(transition.entered(), Some(&'b'));
        assert_eq!(
            transition.into_events(),
            vec![HoverEvent::Leave('a'), HoverEvent::Enter('b')]
        );
        assert_eq!(detector.hovered(), Some(&'b'));
    }

    #[test]
    fn repeated_frame_is_idempotent() {
        let mut detector = HoverDetector::new();
        let frame = [hit('x', 2.0), hit('y', 3.0)];
        assert_eq!(detector.update_hover(&frame), HoverTransition::Entered('x'));
        assert!(detector.update_hover(&frame).is_unchanged());
        assert_eq!(detector.phase(), &HoverPhase::Hovering('x'));
    }

    #[test]
    fn unsorted_input_selects_minimum_distance() {
        let mut detector = HoverDetector::new();
        let transition = detector.update_hover(&[hit('f', 9.0), hit('n', 0.5)]);
        assert_eq!(transition, HoverTransition::Entered('n'));
    }

    #[test]
    fn farther_hit_changes_do_not_matter() {
        let mut detector = HoverDetector::new();
        detector.update_hover(&[hit('a', 1.0), hit('b', 2.0)]);
        assert!(detector.update_hover(&[hit('a', 1.2)]).is_unchanged());
    }
}
