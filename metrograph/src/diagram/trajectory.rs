use super::{Direction, TrainId, Trajectory};
use crate::input::schedule::{Chainage, Minutes};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::iter;

/// Positions of the first up train, one per minute: unit speed between
/// stations, `dwell_time - 1` extra samples at every intermediate station.
/// The terminus does not dwell.
///
/// Expects validated input (at least two increasing chainages).
pub fn base_positions(chainages: &[Chainage], dwell_time: Minutes) -> Vec<Chainage> {
    let first = match chainages.first() {
        Some(c) => *c,
        None => return Vec::new(),
    };
    let terminus = chainages.len() - 1;
    let extra = (dwell_time - 1).max(0) as usize;

    let mut positions = vec![first];
    for (i, pair) in chainages.windows(2).enumerate() {
        // The segment's first position is already there, either as the
        // previous arrival or as its last dwell sample.
        positions.extend(pair[0] + 1..=pair[1]);
        if i + 1 < terminus {
            positions.extend(iter::repeat(pair[1]).take(extra));
        }
    }
    positions
}

/// Length of `base_positions` for the same input, or `None` when it does
/// not fit in the integer types.
pub fn sample_count(chainages: &[Chainage], dwell_time: Minutes) -> Option<usize> {
    let (first, last) = match (chainages.first(), chainages.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Some(0),
    };
    let stops = (chainages.len() as Minutes - 2).max(0);
    let extra = (dwell_time - 1).max(0);
    let n = last.checked_sub(first)?
        .checked_add(1)?
        .checked_add(stops.checked_mul(extra)?)?;
    usize::try_from(n).ok()
}

/// Time of the last sample of the last train.
pub fn horizon(samples: usize, headway: Minutes, n_trains: usize) -> Option<Minutes> {
    let last_index = Minutes::try_from(n_trains.checked_sub(1)?).ok()?;
    let last_sample = Minutes::try_from(samples.checked_sub(1)?).ok()?;
    last_index.checked_mul(headway)?.checked_add(last_sample)
}

/// Up and down trajectories for `n_trains` dispatches `headway` apart.
pub fn dispatch(base: &[Chainage], headway: Minutes, n_trains: usize) -> BTreeMap<TrainId, Trajectory> {
    let mut trains = BTreeMap::new();
    for index in 0..n_trains {
        let up = Trajectory {
            start: index as Minutes * headway,
            positions: base.to_vec(),
        };
        let down = up.reversed();
        trains.insert(TrainId { direction: Direction::Up, index }, up);
        trains.insert(TrainId { direction: Direction::Down, index }, down);
    }
    trains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_has_no_dwell() {
        assert_eq!(base_positions(&[0, 10], 2), (0..=10).collect::<Vec<_>>());
    }

    #[test]
    fn dwells_at_intermediate() {
        assert_eq!(base_positions(&[0, 5, 9], 3), vec![0, 1, 2, 3, 4, 5, 5, 5, 6, 7, 8, 9]);
        assert_eq!(base_positions(&[0, 2, 4, 5], 2), vec![0, 1, 2, 2, 3, 4, 4, 5]);
    }

    #[test]
    fn dwell_of_one_minute_adds_nothing() {
        assert_eq!(base_positions(&[0, 2, 3], 1), vec![0, 1, 2, 3]);
    }

    #[test]
    fn nonzero_origin() {
        assert_eq!(base_positions(&[3, 5], 1), vec![3, 4, 5]);
    }

    #[test]
    fn sample_count_matches_positions() {
        for &(ref chainages, dwell) in &[(vec![0, 10], 2), (vec![0, 5, 9], 3), (vec![3, 4, 8, 12], 5)] {
            assert_eq!(sample_count(chainages, dwell), Some(base_positions(chainages, dwell).len()));
        }
    }

    #[test]
    fn sizes_that_do_not_fit() {
        assert_eq!(sample_count(&[0, Chainage::max_value()], 1), None);
        assert_eq!(sample_count(&[0, 1, 2], Minutes::max_value()), None);
        assert_eq!(sample_count(&[0, 1, 2], Minutes::max_value() - 2), Some(Minutes::max_value() as usize));
        assert_eq!(horizon(4, Minutes::max_value() / 2, 4), None);
        assert_eq!(horizon(4, Minutes::max_value() / 2, 1), Some(3));
        assert_eq!(horizon(4, 5, 3), Some(13));
    }

    #[test]
    fn dispatch_offsets_and_mirrors() {
        let trains = dispatch(&[0, 1, 2], 4, 3);
        assert_eq!(trains.len(), 6);
        let up2 = &trains[&TrainId { direction: Direction::Up, index: 2 }];
        let down2 = &trains[&TrainId { direction: Direction::Down, index: 2 }];
        assert_eq!(up2.start, 8);
        assert_eq!(down2.start, 8);
        assert_eq!(down2.positions, vec![2, 1, 0]);
    }
}
