pub mod calculator;
pub mod car_loan;
pub mod mortgage;
pub mod schedule;
