use crate::diagram::InvalidInput;
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

pub type Minutes = i64;
pub type Chainage = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub name: String,
    pub chainage: Chainage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub headway: Minutes,
    pub dwell_time: Minutes,
    pub stations: Vec<Station>,
}

impl Schedule {
    /// Pairs up parallel name and chainage lists, as handed over by a form
    /// layer. Structural checks beyond equal length are left to
    /// `diagram::validate`.
    pub fn from_parts<S: AsRef<str>>(headway: Minutes,
                                     dwell_time: Minutes,
                                     names: &[S],
                                     chainages: &[Chainage])
                                     -> Result<Schedule, InvalidInput> {
        if names.len() != chainages.len() {
            return Err(InvalidInput::LengthMismatch {
                names: names.len(),
                chainages: chainages.len(),
            });
        }
        let stations = names.iter().zip(chainages.iter())
            .map(|(n, c)| Station { name: n.as_ref().to_string(), chainage: *c })
            .collect();
        Ok(Schedule { headway, dwell_time, stations })
    }

    pub fn station_names(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn chainages(&self) -> Vec<Chainage> {
        self.stations.iter().map(|s| s.chainage).collect()
    }
}

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum ParseError {
    #[fail(display = "error in regular expression: {}", _0)]
    RegexError(String),
    #[fail(display = "error converting number \"{}\"", _0)]
    NumberError(String),
    #[fail(display = "unrecognized schedule line: {}", _0)]
    Unrecognized(String),
    #[fail(display = "missing {} line", _0)]
    Missing(&'static str),
    #[fail(display = "{} given more than once", _0)]
    Duplicate(&'static str),
}

fn parse_minutes(s: &str) -> Result<Minutes, ParseError> {
    s.parse::<Minutes>().map_err(|_e| ParseError::NumberError(s.to_string()))
}

fn parse_chainage(s: &str) -> Result<Chainage, ParseError> {
    let x = s.parse::<f64>().map_err(|_e| ParseError::NumberError(s.to_string()))?;
    if !x.is_finite() {
        return Err(ParseError::NumberError(s.to_string()));
    }
    let rounded = x.round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if rounded < Chainage::min_value() as f64 || rounded >= Chainage::max_value() as f64 {
        return Err(ParseError::NumberError(s.to_string()));
    }
    if rounded != x {
        warn!("chainage {} rounded to {}", x, rounded);
    }
    Ok(rounded as Chainage)
}

fn set_once(field: &mut Option<Minutes>, name: &'static str, value: Minutes) -> Result<(), ParseError> {
    if field.is_some() {
        return Err(ParseError::Duplicate(name));
    }
    *field = Some(value);
    Ok(())
}

/// Parses the schedule format
///
/// * # comment
/// * headway 5
/// * dwell 2
/// * station Alpha 0
/// * station Bravo 10.0
///
pub fn parse_schedule(input: &str) -> Result<Schedule, ParseError> {
    let skip_re = Regex::new(r"^\s*(#.*)?$")
        .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;
    let headway_re = Regex::new(r"^\s*headway\s+(\S+)\s*$")
        .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;
    let dwell_re = Regex::new(r"^\s*dwell\s+(\S+)\s*$")
        .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;
    let station_re = Regex::new(r"(?x) ^ \s* station \s+ (?P<name>\S+) \s+
            (?P<chainage>\S+) \s* $")
        .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;

    let mut headway = None;
    let mut dwell_time = None;
    let mut stations = Vec::new();
    for line in input.lines() {
        if skip_re.is_match(line) {
            continue;
        }
        if let Some(groups) = headway_re.captures(line) {
            set_once(&mut headway, "headway", parse_minutes(&groups[1])?)?;
            continue;
        }
        if let Some(groups) = dwell_re.captures(line) {
            set_once(&mut dwell_time, "dwell", parse_minutes(&groups[1])?)?;
            continue;
        }
        if let Some(groups) = station_re.captures(line) {
            stations.push(Station {
                name: groups["name"].to_string(),
                chainage: parse_chainage(&groups["chainage"])?,
            });
            continue;
        }
        return Err(ParseError::Unrecognized(line.to_string()));
    }

    let headway = headway.ok_or(ParseError::Missing("headway"))?;
    let dwell_time = dwell_time.ok_or(ParseError::Missing("dwell"))?;
    debug!("parsed schedule: headway={} dwell={} stations={}", headway, dwell_time, stations.len());
    Ok(Schedule { headway, dwell_time, stations })
}
