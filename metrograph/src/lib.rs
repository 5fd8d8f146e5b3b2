#[macro_use] extern crate failure_derive;

pub mod input;
pub mod diagram;
pub mod output;


use std::path::Path;
use input::schedule::Schedule;
use diagram::{Diagram, DiagramConfig};

pub type AppResult<T> = Result<T, failure::Error>;

pub fn read_file(f :&Path) -> AppResult<String> {
  use std::fs::File;
  use std::io::prelude::*;
  use std::io::BufReader;

  let file = File::open(f)?;
  let mut file = BufReader::new(&file);
  let mut contents = String::new();
  file.read_to_string(&mut contents)?;
  Ok(contents)
}

pub fn get_schedule(s :&Path) -> AppResult<Schedule> {
    let contents = read_file(s)?;
    let schedule = input::schedule::parse_schedule(&contents)?;
    Ok(schedule)
}

/// Builds the diagram for a schedule given on the parallel-list form
/// (`station_names[i]` at `station_chainages[i]`).
pub fn generate_diagram<S: AsRef<str>>(headway: input::schedule::Minutes,
                                       dwell_time: input::schedule::Minutes,
                                       station_names: &[S],
                                       station_chainages: &[input::schedule::Chainage],
                                       config: &DiagramConfig)
                                       -> Result<Diagram, diagram::InvalidInput> {
    let schedule = Schedule::from_parts(headway, dwell_time, station_names, station_chainages)?;
    diagram::generate(&schedule, config)
}
