use failure::Error;

use crate::diagram::{Diagram, TrainId};
use crate::input::schedule::Minutes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visit {
    pub train: TrainId,
    pub station: String,
    pub arrival: Minutes,
    pub departure: Minutes,
}

/// Station visits of every regular train, in train order and, per train,
/// in the order the stations are passed.
pub fn visits(diagram: &Diagram) -> Vec<Visit> {
    let mut out = Vec::new();
    for (id, trajectory) in &diagram.trains {
        let mut train_visits = diagram.axes.station_ticks.iter().filter_map(|station| {
            let first = trajectory.positions.iter().position(|&p| p == station.chainage)?;
            let last = trajectory.positions.iter().rposition(|&p| p == station.chainage)?;
            Some(Visit {
                train: *id,
                station: station.name.clone(),
                arrival: trajectory.start + first as Minutes,
                departure: trajectory.start + last as Minutes,
            })
        }).collect::<Vec<_>>();
        train_visits.sort_by_key(|v| v.arrival);
        out.extend(train_visits);
    }
    out
}

/// Print one train station visit per line on the following format:
/// `train station arrival departure`.
pub fn timetable(diagram: &Diagram) -> Result<String, Error> {
    use std::fmt::Write;
    let mut s = String::new();
    for v in visits(diagram) {
        writeln!(s, "{} {} {} {}", v.train, v.station, v.arrival, v.departure)?;
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{generate, DiagramConfig, TrainCount};
    use crate::input::schedule::Schedule;

    fn diagram() -> Diagram {
        let s = Schedule::from_parts(10, 3, &["A", "B", "C"], &[0, 5, 9]).unwrap();
        generate(&s, &DiagramConfig { train_count: TrainCount::Fixed(2), fill_in: false }).unwrap()
    }

    #[test]
    fn intermediate_station_dwells() {
        let v = visits(&diagram());
        assert_eq!(v.len(), 12);
        let b = &v[1];
        assert_eq!(b.station, "B");
        assert_eq!((b.arrival, b.departure), (5, 7));
        let c = &v[2];
        assert_eq!((c.arrival, c.departure), (11, 11));
    }

    #[test]
    fn down_trains_visit_in_reverse() {
        let text = timetable(&diagram()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "up0 A 0 0");
        assert_eq!(lines[3], "up1 A 10 10");
        assert_eq!(lines[6], "down0 C 0 0");
        assert_eq!(lines[7], "down0 B 4 6");
        assert_eq!(lines[11], "down1 A 21 21");
    }
}
