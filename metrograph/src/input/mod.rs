//! Schedule input.

pub mod schedule;
