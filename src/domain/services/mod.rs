pub mod calendar;
pub mod conflict;
pub mod generation;
pub mod planner;
