//! Amortization simulator: month-by-month payoff trajectory of a fixed-rate
//! loan with optional annual Sondertilgung.

pub mod simulator;

pub use simulator::{compute_schedule, simulate_schedule, Schedule, ScheduleEntry, ScheduleInput};
