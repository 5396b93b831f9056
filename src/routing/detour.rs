//! Local correction of kernel moves that would cut through an obstacle

use crate::debug::{DebugColor, RouteObserver};
use crate::geometry::{segments_intersect_at, Bounds, Heading, Point, Segment};

use super::config::RouterConfig;

/// Closest crossing of a move with an obstacle edge.
///
/// `left` and `right` are the distances from the crossing back to the first
/// and on to the second end of the clockwise-wound edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOffset {
    pub ahead: f64,
    pub left: f64,
    pub right: f64,
}

impl HitOffset {
    pub const MISS: HitOffset = HitOffset {
        ahead: f64::INFINITY,
        left: 0.0,
        right: 0.0,
    };

    pub fn is_hit(&self) -> bool {
        self.ahead.is_finite()
    }
}

/// Find the closest edge crossed by the move `start -> next`
pub fn hit_offset(
    start: Point,
    next: Point,
    obstacles: &[Bounds],
    observer: &mut dyn RouteObserver,
) -> HitOffset {
    let path = Segment::new(start, next);
    obstacles
        .iter()
        .flat_map(Bounds::clockwise_edges)
        .filter_map(|edge| {
            let p = segments_intersect_at(&path, &edge)?;
            observer.segment(edge, DebugColor::Red);
            Some(HitOffset {
                ahead: start.distance(p),
                left: edge.start.distance(p),
                right: edge.end.distance(p),
            })
        })
        .fold(HitOffset::MISS, |closest, hit| {
            if hit.ahead < closest.ahead {
                hit
            } else {
                closest
            }
        })
}

/// Correct the kernel's proposed move so it avoids the obstacles.
///
/// `points` is the committed route so far; its last point is where the move
/// starts. A long straight run is cut short one unit before the first edge it
/// meets; otherwise a crossing is sidestepped by turning left or right,
/// preferring whichever lands closer to `goal`.
pub fn resolve_intersections(
    points: &[Point],
    next: Point,
    obstacles: &[Bounds],
    goal: Point,
    facing_end: bool,
    config: &RouterConfig,
    observer: &mut dyn RouteObserver,
) -> Point {
    let (previous, start) = match points {
        [.., previous, start] => (Some(*previous), *start),
        [start] => (None, *start),
        [] => return next,
    };
    let Some(heading) = (next - start).cardinal() else {
        return next;
    };

    let hit = hit_offset(start, next, obstacles, observer);

    let separate_obstacles = match obstacles {
        [first, second, ..] => !first.intersects(second),
        _ => false,
    };
    if !facing_end && hit.is_hit() && hit.ahead > config.shorten_threshold() && separate_obstacles {
        return start + heading.to_vector() * (hit.ahead - 1.0);
    }

    if hit.left > 0.0 || hit.right > 0.0 {
        let clearance = hit.left.min(hit.right) + 1.0;
        let left =
            detour_candidate(start, previous, heading.rotate_ccw(), clearance, obstacles, observer);
        let right =
            detour_candidate(start, previous, heading.rotate_cw(), clearance, obstacles, observer);

        if let Some(p) = left {
            observer.point(p, DebugColor::Red);
        }
        if let Some(p) = right {
            observer.point(p, DebugColor::Green);
        }

        let left_score = left.map_or(f64::INFINITY, |p| p.distance(goal) + hit.right);
        let right_score = right.map_or(f64::INFINITY, |p| p.distance(goal) + hit.left);

        return if left_score < right_score {
            left.or(right).unwrap_or(next)
        } else {
            right.or(left).unwrap_or(next)
        };
    }

    next
}

/// A sidestep of `clearance` from `start` toward `turn`, unless it crosses an
/// obstacle edge itself or runs straight back over the previous segment
pub fn detour_candidate(
    start: Point,
    previous: Option<Point>,
    turn: Heading,
    clearance: f64,
    obstacles: &[Bounds],
    observer: &mut dyn RouteObserver,
) -> Option<Point> {
    let candidate = start + turn.to_vector() * clearance;
    if hit_offset(start, candidate, obstacles, observer).left > 0.0 {
        return None;
    }
    if previous.is_some_and(|p| (p - start).cardinal() == Some(turn)) {
        return None;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{NoopObserver, SvgRecorder};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_hit_offset_keeps_closest_edge() {
        let obstacle = [Bounds::new(80.0, -40.0, 120.0, 60.0)];
        let hit = hit_offset(pt(10.0, 0.0), pt(190.0, 0.0), &obstacle, &mut NoopObserver);
        // Left edge runs bottom to top, so the first end is the bottom corner
        assert_eq!(
            hit,
            HitOffset {
                ahead: 70.0,
                left: 60.0,
                right: 40.0
            }
        );
    }

    #[test]
    fn test_hit_offset_miss() {
        let obstacle = [Bounds::new(80.0, -40.0, 120.0, 60.0)];
        let hit = hit_offset(pt(10.0, -41.0), pt(190.0, -41.0), &obstacle, &mut NoopObserver);
        assert_eq!(hit, HitOffset::MISS);
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_detour_prefers_the_narrower_side() {
        let obstacle = [Bounds::new(80.0, -40.0, 120.0, 60.0)];
        let points = [pt(0.0, 0.0), pt(10.0, 0.0)];
        let next = resolve_intersections(
            &points,
            pt(190.0, 0.0),
            &obstacle,
            pt(190.0, 0.0),
            false,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(10.0, -41.0));
    }

    #[test]
    fn test_tied_detour_turns_right() {
        let obstacle = [Bounds::new(100.0, -50.0, 150.0, 50.0)];
        let points = [pt(10.0, 0.0), pt(99.0, 0.0)];
        let next = resolve_intersections(
            &points,
            pt(300.0, 0.0),
            &obstacle,
            pt(300.0, 0.0),
            false,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(99.0, 51.0));
    }

    #[test]
    fn test_long_run_is_shortened_before_the_edge() {
        let obstacles = [
            Bounds::new(100.0, -50.0, 150.0, 50.0),
            Bounds::new(400.0, -50.0, 450.0, 50.0),
        ];
        let points = [pt(0.0, 0.0), pt(10.0, 0.0)];
        let next = resolve_intersections(
            &points,
            pt(300.0, 0.0),
            &obstacles,
            pt(300.0, 0.0),
            false,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(99.0, 0.0));
    }

    #[test]
    fn test_no_shortening_when_facing_the_end() {
        let obstacles = [
            Bounds::new(100.0, -50.0, 150.0, 50.0),
            Bounds::new(400.0, -50.0, 450.0, 50.0),
        ];
        let points = [pt(0.0, 0.0), pt(10.0, 0.0)];
        let next = resolve_intersections(
            &points,
            pt(300.0, 0.0),
            &obstacles,
            pt(300.0, 0.0),
            true,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(10.0, 51.0));
    }

    #[test]
    fn test_detour_never_retraces_previous_segment() {
        // Arrived moving down; the candidate back up is rejected
        let previous = Some(pt(0.0, -20.0));
        let obstacles = [Bounds::new(-50.0, 10.0, 50.0, 60.0)];
        let start = pt(0.0, 0.0);
        let mut observer = NoopObserver;
        let up = detour_candidate(start, previous, Heading::Up, 10.0, &obstacles, &mut observer);
        let down = detour_candidate(start, previous, Heading::Down, 5.0, &obstacles, &mut observer);
        assert_eq!(up, None);
        assert_eq!(down, Some(pt(0.0, 5.0)));
    }

    #[test]
    fn test_detour_rejects_candidate_crossing_an_edge() {
        let obstacles = [Bounds::new(-50.0, 10.0, 50.0, 60.0)];
        let mut observer = NoopObserver;
        let down =
            detour_candidate(pt(0.0, 0.0), None, Heading::Down, 30.0, &obstacles, &mut observer);
        assert_eq!(down, None);
    }

    #[test]
    fn test_clear_move_is_unchanged() {
        let obstacles = [Bounds::new(100.0, 100.0, 150.0, 150.0)];
        let points = [pt(0.0, 0.0), pt(10.0, 0.0)];
        let next = resolve_intersections(
            &points,
            pt(90.0, 0.0),
            &obstacles,
            pt(90.0, 0.0),
            false,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(90.0, 0.0));
    }

    #[test]
    fn test_observer_sees_hit_edges_and_candidates() {
        let obstacle = [Bounds::new(80.0, -40.0, 120.0, 60.0)];
        let points = [pt(0.0, 0.0), pt(10.0, 0.0)];
        let mut recorder = SvgRecorder::new();
        resolve_intersections(
            &points,
            pt(190.0, 0.0),
            &obstacle,
            pt(190.0, 0.0),
            false,
            &RouterConfig::default(),
            &mut recorder,
        );
        let svg = recorder.to_svg(&Default::default());
        assert!(svg.contains(r##"cx="10" cy="-41" r="2" fill="#f44336""##));
        assert!(svg.contains(r##"cx="10" cy="41" r="2" fill="#4caf50""##));
        assert!(svg.contains(r##"x1="80" y1="60" x2="80" y2="-40" stroke="#f44336""##));
    }
}
