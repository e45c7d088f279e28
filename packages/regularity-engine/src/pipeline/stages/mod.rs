//! The nine stage contracts (S1-S9) the dispatcher chooses between.

pub mod graphicness;
pub mod one_sum;
pub mod r10;
pub mod sequence;
pub mod series_parallel;
pub mod three_separation;
pub mod wheel_minor;
