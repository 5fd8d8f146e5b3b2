use failure::Error;
use serde::Serialize;
use std::io;

use crate::diagram::{Axes, Diagram, Edge, Trajectory};
use crate::input::schedule::{Chainage, Minutes};

fn points(t: &Trajectory) -> Vec<(Minutes, Chainage)> {
    t.points().collect()
}

#[derive(Serialize)]
struct TrainOut {
    direction: &'static str,
    index: usize,
    points: Vec<(Minutes, Chainage)>,
}

#[derive(Serialize)]
struct FragmentOut {
    edge: &'static str,
    direction: &'static str,
    shift: Minutes,
    points: Vec<(Minutes, Chainage)>,
}

#[derive(Serialize)]
struct DiagramOut<'a> {
    headway: Minutes,
    axes: &'a Axes,
    trains: Vec<TrainOut>,
    fill_in: Vec<FragmentOut>,
}

fn diagram_out(diagram: &Diagram) -> DiagramOut {
    DiagramOut {
        headway: diagram.headway,
        axes: &diagram.axes,
        trains: diagram.trains.iter().map(|(id, t)| TrainOut {
            direction: id.direction.name(),
            index: id.index,
            points: points(t),
        }).collect(),
        fill_in: diagram.fill_in.iter().map(|f| FragmentOut {
            edge: match f.edge { Edge::Leading => "leading", Edge::Trailing => "trailing" },
            direction: f.direction.name(),
            shift: f.shift,
            points: points(&f.trajectory),
        }).collect(),
    }
}

pub fn javascript_diagram<W: io::Write>(diagram: &Diagram, f: &mut W) -> Result<(), Error> {
    write!(f, "var data = ")?;
    json_diagram(diagram, f)?;
    write!(f, ";")?;
    Ok(())
}

pub fn json_diagram<W: io::Write>(diagram: &Diagram, f: &mut W) -> Result<(), Error> {
    serde_json::to_writer(&mut *f, &diagram_out(diagram))?;
    Ok(())
}
