use crate::input::schedule::{Chainage, Minutes, Schedule};
use log::warn;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum InvalidInput {
    #[fail(display = "at least two stations are required, got {}", _0)]
    TooFewStations(usize),
    #[fail(display = "{} station names but {} chainages", names, chainages)]
    LengthMismatch { names: usize, chainages: usize },
    #[fail(display = "station {} has no name", index)]
    EmptyName { index: usize },
    #[fail(display = "station {} has negative chainage {}", station, chainage)]
    NegativeChainage { station: String, chainage: Chainage },
    #[fail(display = "station {} at chainage {} is not beyond the previous station at {}",
           station, chainage, previous)]
    NotIncreasing { station: String, chainage: Chainage, previous: Chainage },
    #[fail(display = "headway must be positive, got {}", _0)]
    Headway(Minutes),
    #[fail(display = "dwell time must be at least one minute, got {}", _0)]
    DwellTime(Minutes),
    #[fail(display = "no trains to dispatch")]
    NoTrains,
    #[fail(display = "diagram size does not fit in the integer range")]
    Overflow,
    #[fail(display = "diagram needs {} samples, at most {} are allowed", samples, limit)]
    TooManySamples { samples: usize, limit: usize },
}

/// Checks the structural invariants the trajectory construction relies on.
pub fn validate(schedule: &Schedule) -> Result<(), InvalidInput> {
    let stations = &schedule.stations;
    if stations.len() < 2 {
        return Err(InvalidInput::TooFewStations(stations.len()));
    }
    if schedule.headway <= 0 {
        return Err(InvalidInput::Headway(schedule.headway));
    }
    if schedule.dwell_time < 1 {
        return Err(InvalidInput::DwellTime(schedule.dwell_time));
    }

    for (index, station) in stations.iter().enumerate() {
        if station.name.trim().is_empty() {
            return Err(InvalidInput::EmptyName { index });
        }
        if station.chainage < 0 {
            return Err(InvalidInput::NegativeChainage {
                station: station.name.clone(),
                chainage: station.chainage,
            });
        }
    }

    for pair in stations.windows(2) {
        if pair[1].chainage <= pair[0].chainage {
            return Err(InvalidInput::NotIncreasing {
                station: pair[1].name.clone(),
                chainage: pair[1].chainage,
                previous: pair[0].chainage,
            });
        }
    }

    if stations[0].chainage != 0 {
        warn!("first station {} is at chainage {}, not at the origin",
              stations[0].name, stations[0].chainage);
    }
    Ok(())
}
