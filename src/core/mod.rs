pub mod attendance;
pub mod calendar;
pub mod queue;
pub mod rounding;
pub mod sequence;
