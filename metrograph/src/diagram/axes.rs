use crate::input::schedule::{Chainage, Minutes, Schedule, Station};
use serde::Serialize;

/// Tick metadata for a time (x) / chainage (y) chart with a secondary
/// y axis labelled by station.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Axes {
    pub max_time: Minutes,
    pub max_chainage: Chainage,
    pub time_ticks: Vec<Minutes>,
    pub chainage_ticks: Vec<Chainage>,
    pub station_ticks: Vec<Station>,
}

pub fn axes(schedule: &Schedule, max_time: Minutes) -> Axes {
    let max_chainage = schedule.stations.last().map(|s| s.chainage).unwrap_or(0);
    let step = schedule.headway.max(1) as usize;
    Axes {
        max_time,
        max_chainage,
        time_ticks: (0..=max_time).step_by(step).collect(),
        chainage_ticks: (0..=max_chainage).collect(),
        station_ticks: schedule.stations.clone(),
    }
}
