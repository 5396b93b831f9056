//! Step kernel: grows the route one orthogonal segment at a time

use tracing::warn;

use crate::debug::RouteObserver;
use crate::geometry::{Bounds, Heading, Point};

use super::config::RouterConfig;
use super::detour::resolve_intersections;

/// Connect a start run to an end run with axis-aligned segments.
///
/// `start` is the source endpoint followed by its stub and `end` is the
/// target stub followed by the target endpoint. The kernel walks from the
/// last point of `start` to the first point of `end`, steering around
/// `obstacles`, and returns the whole polyline including both runs.
pub fn grow_route(
    start: &[Point],
    end: &[Point],
    obstacles: &[Bounds],
    config: &RouterConfig,
    observer: &mut dyn RouteObserver,
) -> Vec<Point> {
    let mut points = start.to_vec();
    let Some(&goal) = end.first() else {
        return points;
    };
    let end_heading = end.get(1).and_then(|&target| (target - goal).cardinal());

    let mut reached = false;
    for step in 0..config.step_limit {
        let Some(&last) = points.last() else {
            break;
        };
        // Boxes the route is already inside no longer constrain it
        let relevant: Vec<Bounds> = obstacles
            .iter()
            .filter(|bounds| !bounds.contains(last))
            .copied()
            .collect();

        let next = next_point(&points, goal, end_heading, &relevant, step, config, observer);
        if next == goal {
            reached = true;
            break;
        }
        points.push(next);
    }

    if !reached {
        warn!(
            step_limit = config.step_limit,
            points = points.len(),
            "elbow route step limit reached, closing the route with an elbow"
        );
        if let Some(&last) = points.last() {
            if last.x != goal.x && last.y != goal.y {
                points.push(Point::new(goal.x, last.y));
            }
        }
    }

    points.extend_from_slice(end);
    points
}

/// Propose the next committed point.
///
/// `end_heading` is the direction the route finally travels from `goal`
/// into the target; `None` leaves the approach unconstrained.
pub fn next_point(
    points: &[Point],
    goal: Point,
    end_heading: Option<Heading>,
    obstacles: &[Bounds],
    step: usize,
    config: &RouterConfig,
    observer: &mut dyn RouteObserver,
) -> Point {
    observer.new_frame();

    let (start, incoming) = match points {
        [.., previous, last] => (*last, (*last - *previous).heading()),
        [last] => (*last, None),
        [] => return goal,
    };

    let horizontal = incoming.map_or(true, Heading::is_horizontal);
    let end_ahead = incoming.is_some_and(|h| h.to_vector().dot(goal - start) > 0.0);

    let along = Point::new(goal.x, start.y);
    let across = Point::new(start.x, goal.y);
    let (mut next, other) = if horizontal == end_ahead {
        (along, across)
    } else {
        (across, along)
    };

    if next == start {
        next = other;
    } else if step != 0
        && other != start
        && incoming.is_some_and(|h| (next - start).cardinal() == Some(h))
    {
        // The first step may run on along the stub, later ones must turn
        next = other;
    }

    // Aligned with the goal but on its far side: only go half way
    if end_heading.is_some_and(|h| (goal - next).cardinal() == Some(h.opposite())) {
        next = start + (next - start) * 0.5;
    }

    if !obstacles.is_empty() {
        if let Some(heading) = (next - start).cardinal() {
            let facing_end = end_heading == Some(heading.opposite());
            next =
                resolve_intersections(points, next, obstacles, goal, facing_end, config, observer);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{NoopObserver, SvgRecorder};
    use pretty_assertions::assert_eq;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn grow(start: &[Point], end: &[Point], obstacles: &[Bounds]) -> Vec<Point> {
        grow_route(start, end, obstacles, &RouterConfig::default(), &mut NoopObserver)
    }

    #[test]
    fn test_straight_run_needs_no_steps() {
        let route = grow(&[pt(0.0, 0.0), pt(30.0, 0.0)], &[pt(70.0, 0.0), pt(100.0, 0.0)], &[]);
        assert_eq!(route, vec![pt(0.0, 0.0), pt(30.0, 0.0), pt(70.0, 0.0), pt(100.0, 0.0)]);
    }

    #[test]
    fn test_single_turn() {
        let route = grow(
            &[pt(0.0, 0.0), pt(21.0, 0.0)],
            &[pt(100.0, 79.0), pt(100.0, 100.0)],
            &[],
        );
        assert_eq!(
            route,
            vec![pt(0.0, 0.0), pt(21.0, 0.0), pt(100.0, 0.0), pt(100.0, 79.0), pt(100.0, 100.0)]
        );
    }

    #[test]
    fn test_detour_around_blocking_box() {
        let route = grow(
            &[pt(0.0, 0.0), pt(10.0, 0.0)],
            &[pt(190.0, 0.0), pt(200.0, 0.0)],
            &[Bounds::new(80.0, -40.0, 120.0, 60.0)],
        );
        assert_eq!(
            route,
            vec![
                pt(0.0, 0.0),
                pt(10.0, 0.0),
                pt(10.0, -41.0),
                pt(190.0, -41.0),
                pt(190.0, 0.0),
                pt(200.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_shortened_run_then_detour() {
        let route = grow(
            &[pt(0.0, 0.0), pt(10.0, 0.0)],
            &[pt(300.0, 0.0), pt(310.0, 0.0)],
            &[
                Bounds::new(100.0, -50.0, 150.0, 50.0),
                Bounds::new(400.0, -50.0, 450.0, 50.0),
            ],
        );
        assert_eq!(
            route,
            vec![
                pt(0.0, 0.0),
                pt(10.0, 0.0),
                pt(99.0, 0.0),
                pt(99.0, 51.0),
                pt(300.0, 51.0),
                pt(300.0, 0.0),
                pt(310.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_stubs_pointing_back_at_each_other() {
        // Stubs overshoot one another between two adjacent shapes
        let route = grow(
            &[pt(100.0, 50.0), pt(106.0, 50.0)],
            &[pt(99.0, 50.0), pt(105.0, 50.0)],
            &[],
        );
        assert_eq!(
            route,
            vec![pt(100.0, 50.0), pt(106.0, 50.0), pt(99.0, 50.0), pt(105.0, 50.0)]
        );
    }

    #[test]
    fn test_doubles_back_instead_of_standing_still() {
        let next = next_point(
            &[pt(0.0, 0.0), pt(10.0, 0.0)],
            pt(-20.0, 0.0),
            None,
            &[],
            0,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(-20.0, 0.0));
    }

    #[test]
    fn test_later_steps_turn_instead_of_running_on() {
        let next = next_point(
            &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 20.0)],
            pt(40.0, 60.0),
            None,
            &[],
            1,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(40.0, 20.0));
    }

    #[test]
    fn test_halves_move_that_would_overshoot_the_approach() {
        // The target is entered moving left, so lining up on the goal's
        // left side only goes half way
        let next = next_point(
            &[pt(0.0, 0.0), pt(0.0, 10.0)],
            pt(100.0, 40.0),
            Some(Heading::Left),
            &[],
            0,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(0.0, 25.0));

        let next = next_point(
            &[pt(0.0, 0.0), pt(10.0, 0.0)],
            pt(100.0, 0.0),
            Some(Heading::Left),
            &[],
            0,
            &RouterConfig::default(),
            &mut NoopObserver,
        );
        assert_eq!(next, pt(100.0, 0.0));
    }

    #[test]
    fn test_step_limit_closes_with_an_elbow() {
        let config = RouterConfig::default().with_step_limit(0);
        let route = grow_route(
            &[pt(0.0, 0.0), pt(10.0, 0.0)],
            &[pt(90.0, 50.0), pt(100.0, 50.0)],
            &[],
            &config,
            &mut NoopObserver,
        );
        assert_eq!(
            route,
            vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(90.0, 0.0), pt(90.0, 50.0), pt(100.0, 50.0)]
        );
    }

    #[test]
    fn test_one_frame_per_step() {
        let mut recorder = SvgRecorder::new();
        grow_route(
            &[pt(0.0, 0.0), pt(10.0, 0.0)],
            &[pt(190.0, 0.0), pt(200.0, 0.0)],
            &[Bounds::new(80.0, -40.0, 120.0, 60.0)],
            &RouterConfig::default(),
            &mut recorder,
        );
        assert_eq!(recorder.frames().len(), 3);
        assert!(recorder.setup().is_empty());
    }
}
