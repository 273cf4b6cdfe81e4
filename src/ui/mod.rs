//! Operator-facing output

pub mod output;
