//! Time-distance diagram generation.

pub mod validate;
pub mod trajectory;
pub mod fillin;
pub mod axes;

pub use self::validate::InvalidInput;
pub use self::axes::Axes;

use crate::input::schedule::{Chainage, Minutes, Schedule};
use log::{debug, info};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match *self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainId {
    pub direction: Direction,
    pub index: usize,
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.direction, self.index)
    }
}

/// One sample per minute, starting at `start`. Times are implicit:
/// sample `k` is at `start + k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trajectory {
    pub start: Minutes,
    pub positions: Vec<Chainage>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Time of the last sample. Equal to `start` for an empty trajectory.
    pub fn end(&self) -> Minutes {
        self.start + (self.positions.len() as Minutes - 1).max(0)
    }

    pub fn times(&self) -> impl Iterator<Item = Minutes> {
        let start = self.start;
        (0..self.positions.len() as Minutes).map(move |k| start + k)
    }

    pub fn points<'a>(&'a self) -> impl Iterator<Item = (Minutes, Chainage)> + 'a {
        self.times().zip(self.positions.iter().cloned())
    }

    /// Same times, positions in reverse order.
    pub fn reversed(&self) -> Trajectory {
        Trajectory {
            start: self.start,
            positions: self.positions.iter().rev().cloned().collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Already running when the diagram starts.
    Leading,
    /// Dispatched after the last regular train, still running at the horizon.
    Trailing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub edge: Edge,
    pub direction: Direction,
    /// Minutes between the fragment's train and the nearest regular one.
    pub shift: Minutes,
    pub trajectory: Trajectory,
}

/// How many trains are dispatched in each direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrainCount {
    /// One train per station.
    PerStation,
    /// Two trains per station.
    DoublePerStation,
    Fixed(usize),
}

impl TrainCount {
    pub fn trains(&self, stations: usize) -> usize {
        match *self {
            TrainCount::PerStation => stations,
            TrainCount::DoublePerStation => 2 * stations,
            TrainCount::Fixed(n) => n,
        }
    }
}

impl Default for TrainCount {
    fn default() -> TrainCount {
        TrainCount::DoublePerStation
    }
}

#[derive(Debug, Fail)]
#[fail(display = "expected \"per-station\", \"double\" or a positive number, got \"{}\"", _0)]
pub struct TrainCountError(String);

impl FromStr for TrainCount {
    type Err = TrainCountError;
    fn from_str(s: &str) -> Result<TrainCount, TrainCountError> {
        match s {
            "per-station" => Ok(TrainCount::PerStation),
            "double" => Ok(TrainCount::DoublePerStation),
            _ => match s.parse::<usize>() {
                Ok(n) if n > 0 => Ok(TrainCount::Fixed(n)),
                _ => Err(TrainCountError(s.to_string())),
            },
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagramConfig {
    pub train_count: TrainCount,
    pub fill_in: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagram {
    pub headway: Minutes,
    pub trains: BTreeMap<TrainId, Trajectory>,
    pub fill_in: Vec<Fragment>,
    pub axes: Axes,
}

impl Diagram {
    /// Number of dispatches in each direction.
    pub fn dispatched(&self) -> usize {
        self.trains.len() / 2
    }

    pub fn train(&self, direction: Direction, index: usize) -> Option<&Trajectory> {
        self.trains.get(&TrainId { direction, index })
    }

    pub fn direction<'a>(&'a self, direction: Direction) -> impl Iterator<Item = (&'a TrainId, &'a Trajectory)> + 'a {
        self.trains.iter().filter(move |(id, _)| id.direction == direction)
    }
}

/// Upper bound on the samples of all trajectories and chainage ticks in
/// one diagram.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Computes all train trajectories of a schedule.
pub fn generate(schedule: &Schedule, config: &DiagramConfig) -> Result<Diagram, InvalidInput> {
    validate::validate(schedule)?;
    let n_trains = config.train_count.trains(schedule.stations.len());
    if n_trains == 0 {
        return Err(InvalidInput::NoTrains);
    }

    let chainages = schedule.chainages();
    let samples = trajectory::sample_count(&chainages, schedule.dwell_time)
        .ok_or(InvalidInput::Overflow)?;
    let horizon = trajectory::horizon(samples, schedule.headway, n_trains)
        .ok_or(InvalidInput::Overflow)?;
    let fill_in_samples = if config.fill_in {
        fillin::sample_count(samples, schedule.headway).ok_or(InvalidInput::Overflow)?
    } else {
        0
    };
    let chainage_ticks = chainages.last()
        .and_then(|c| c.checked_add(1))
        .and_then(|c| usize::try_from(c).ok())
        .ok_or(InvalidInput::Overflow)?;
    let total = samples.checked_mul(n_trains)
        .and_then(|s| s.checked_mul(2))
        .and_then(|s| s.checked_add(fill_in_samples))
        .and_then(|s| s.checked_add(chainage_ticks))
        .ok_or(InvalidInput::Overflow)?;
    if total > MAX_SAMPLES {
        return Err(InvalidInput::TooManySamples { samples: total, limit: MAX_SAMPLES });
    }

    let base = trajectory::base_positions(&chainages, schedule.dwell_time);
    debug!("base trajectory has {} samples", base.len());

    let trains = trajectory::dispatch(&base, schedule.headway, n_trains);

    let fill_in = if config.fill_in {
        fillin::fill_in(&base, schedule.headway, horizon)
    } else {
        Vec::new()
    };

    let axes = axes::axes(schedule, horizon);
    info!("generated {} trains in each direction, {} fill-in fragments, horizon {} min",
          n_trains, fill_in.len(), horizon);

    Ok(Diagram {
        headway: schedule.headway,
        trains,
        fill_in,
        axes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_count_from_str() {
        assert_eq!("per-station".parse::<TrainCount>().unwrap(), TrainCount::PerStation);
        assert_eq!("double".parse::<TrainCount>().unwrap(), TrainCount::DoublePerStation);
        assert_eq!("3".parse::<TrainCount>().unwrap(), TrainCount::Fixed(3));
        assert!("0".parse::<TrainCount>().is_err());
        assert!("many".parse::<TrainCount>().is_err());
    }

    #[test]
    fn train_count_conventions() {
        assert_eq!(TrainCount::PerStation.trains(4), 4);
        assert_eq!(TrainCount::default().trains(4), 8);
        assert_eq!(TrainCount::Fixed(1).trains(4), 1);
    }

    #[test]
    fn trajectory_times_and_end() {
        let t = Trajectory { start: 3, positions: vec![0, 1, 1, 2] };
        assert_eq!(t.times().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(t.end(), 6);
        assert_eq!(t.reversed().positions, vec![2, 1, 1, 0]);
        assert_eq!(t.reversed().start, 3);
    }

    #[test]
    fn ids_order_up_before_down() {
        let a = TrainId { direction: Direction::Up, index: 7 };
        let b = TrainId { direction: Direction::Down, index: 0 };
        assert!(a < b);
        assert_eq!(format!("{}", b), "down0");
        assert_eq!(format!("{}", Direction::Up), Direction::Up.name());
    }
}
