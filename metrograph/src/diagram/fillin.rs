//! Fill-in trains: the partial journeys of trains outside the regular
//! dispatch range that are still visible inside the diagram's time window.

use super::{Direction, Edge, Fragment, Trajectory};
use crate::input::schedule::{Chainage, Minutes};
use log::{debug, trace};
use std::ops::Range;

enum Slice {
    Fragment(Range<usize>),
    Exhausted,
}

/// Index range of the base trajectory visible at one edge for a train
/// `shift` minutes away from the nearest regular train.
fn edge_slice(len: usize, shift: usize, edge: Edge) -> Slice {
    match len.checked_sub(shift) {
        Some(keep) if keep > 0 => Slice::Fragment(match edge {
            Edge::Leading => shift..len,
            Edge::Trailing => 0..keep,
        }),
        _ => Slice::Exhausted,
    }
}

fn push_pair(fragments: &mut Vec<Fragment>, base: &[Chainage], reversed: &[Chainage],
             range: Range<usize>, start: Minutes, edge: Edge, shift: Minutes) {
    for &(direction, positions) in &[(Direction::Up, base), (Direction::Down, reversed)] {
        fragments.push(Fragment {
            edge,
            direction,
            shift,
            trajectory: Trajectory {
                start,
                positions: positions[range.clone()].to_vec(),
            },
        });
    }
}

/// Total number of samples `fill_in` produces for a base trajectory of
/// `len` samples, or `None` when it does not fit in `usize`.
pub fn sample_count(len: usize, headway: Minutes) -> Option<usize> {
    let step = headway.max(1) as usize;
    // Shifts m * step for m in 1..=k are visible.
    let k = match len.checked_sub(1) {
        Some(last) => last / step,
        None => return Some(0),
    };
    let triangle = k.checked_mul(k + 1)? / 2;
    let per_series = k.checked_mul(len)?.checked_sub(step.checked_mul(triangle)?)?;
    per_series.checked_mul(4)
}

/// Fragments for both edges of the window `[0, horizon]`. At the leading
/// edge, trains dispatched `m * headway` before the first regular train; at
/// the trailing edge, trains dispatched `m * headway` after the last one,
/// for `m = 1, 2, ...` as long as any part of the journey is visible.
pub fn fill_in(base: &[Chainage], headway: Minutes, horizon: Minutes) -> Vec<Fragment> {
    let reversed = base.iter().rev().cloned().collect::<Vec<_>>();
    let len = base.len();
    let step = headway.max(1) as usize;
    let mut fragments = Vec::new();

    for &edge in &[Edge::Leading, Edge::Trailing] {
        let mut shift = step;
        loop {
            let range = match edge_slice(len, shift, edge) {
                Slice::Fragment(r) => r,
                Slice::Exhausted => {
                    trace!("{:?} fill-in exhausted at shift {}", edge, shift);
                    break;
                }
            };
            let start = match edge {
                Edge::Leading => 0,
                Edge::Trailing => horizon - (range.len() as Minutes - 1),
            };
            push_pair(&mut fragments, base, &reversed, range, start, edge, shift as Minutes);
            shift = shift.saturating_add(step);
        }
    }

    debug!("{} fill-in fragments", fragments.len());
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(fragments: &[Fragment], edge: Edge, direction: Direction) -> Vec<Fragment> {
        fragments.iter().filter(|f| f.edge == edge && f.direction == direction).cloned().collect()
    }

    #[test]
    fn leading_fragments_start_at_zero() {
        let base = (0..=10).collect::<Vec<_>>();
        let f = fill_in(&base, 4, 14);
        let up = only(&f, Edge::Leading, Direction::Up);
        assert_eq!(up.len(), 2);
        assert_eq!(up[0].trajectory, Trajectory { start: 0, positions: (4..=10).collect() });
        assert_eq!(up[1].trajectory, Trajectory { start: 0, positions: (8..=10).collect() });
        let down = only(&f, Edge::Leading, Direction::Down);
        assert_eq!(down[0].trajectory.positions, (0..=6).rev().collect::<Vec<_>>());
    }

    #[test]
    fn trailing_fragments_end_at_horizon() {
        let base = (0..=10).collect::<Vec<_>>();
        let horizon = 14;
        let f = fill_in(&base, 4, horizon);
        let up = only(&f, Edge::Trailing, Direction::Up);
        assert_eq!(up.len(), 2);
        assert_eq!(up[0].trajectory, Trajectory { start: 8, positions: (0..=6).collect() });
        assert_eq!(up[1].trajectory, Trajectory { start: 12, positions: (0..=2).collect() });
        for frag in &f {
            if frag.edge == Edge::Trailing {
                assert_eq!(frag.trajectory.end(), horizon);
            }
        }
    }

    #[test]
    fn exact_multiple_stops_before_empty_slice() {
        // 10 samples, headway 5: only shift 5 leaves anything visible.
        let base = (0..10).collect::<Vec<_>>();
        let f = fill_in(&base, 5, 9);
        assert_eq!(f.len(), 4);
        assert!(f.iter().all(|frag| frag.shift == 5 && frag.trajectory.len() == 5));
    }

    #[test]
    fn sample_count_matches_fragments() {
        for &(len, headway) in &[(11, 4), (10, 5), (7, 1), (3, 3), (1, 1), (0, 2)] {
            let base = (0..len as Chainage).collect::<Vec<_>>();
            let horizon = len as Minutes;
            let total = fill_in(&base, headway, horizon).iter().map(|f| f.trajectory.len()).sum::<usize>();
            assert_eq!(sample_count(len, headway), Some(total));
        }
    }

    #[test]
    fn huge_headway_stops_immediately() {
        let base = vec![0, 1, 2];
        assert!(fill_in(&base, Minutes::max_value(), 2).is_empty());
        assert_eq!(sample_count(3, Minutes::max_value()), Some(0));
        assert_eq!(sample_count(usize::max_value(), 1), None);
    }

    #[test]
    fn headway_longer_than_journey_gives_nothing() {
        let base = vec![0, 1, 2];
        assert!(fill_in(&base, 3, 2).is_empty());
        assert!(fill_in(&base, 30, 2).is_empty());
    }
}
