#[cfg(feature = "car_loan")]
pub mod car_loan;

#[cfg(feature = "mortgage")]
pub mod mortgage;
