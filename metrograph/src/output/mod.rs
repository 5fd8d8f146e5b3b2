//! Diagram output formats.

pub mod json;
pub mod svg;
pub mod timetable;
