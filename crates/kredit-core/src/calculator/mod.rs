//! Finance calculator: pure, stateless derivation of scalar loan and
//! mortgage quantities. Every function takes explicit numeric parameters
//! and returns full-precision `Decimal` values; rounding is left to the
//! caller.

pub mod annuity;
pub mod mortgage;
pub mod rental;
pub mod transfer_tax;

pub use annuity::annuity_payment;
pub use mortgage::{loan_needed, monthly_mortgage_rate, mortgage_ancillary_costs, AncillaryCosts};
pub use rental::{effective_rent, net_monthly_burden};
pub use transfer_tax::FederalState;
