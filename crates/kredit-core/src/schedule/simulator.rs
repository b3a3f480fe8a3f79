//! Month-by-month amortization of a fixed-payment loan.
//!
//! Each month accrues interest on the outstanding balance, applies the
//! regular instalment, and every twelfth month applies the annual
//! Sondertilgung. The loop stops on payoff or at the horizon cap, so a
//! payment that never covers the interest still terminates.

use log::{debug, trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator::annuity::{monthly_rate, overflow};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::{KreditError, KreditResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_MAX_HORIZON_YEARS: u32 = 40;

/// Residual below which the loan counts as repaid. Absorbs the last digits
/// of decimal rounding so an exact annuity does not spill into an extra month.
const BALANCE_EPSILON: Decimal = dec!(0.00001);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    pub interest: Money,
    /// Regular instalment actually paid; smaller than scheduled in the payoff month.
    pub payment: Money,
    /// Principal repaid by the regular instalment. Negative under negative amortization.
    pub principal_repaid: Money,
    /// Sondertilgung applied this month, capped at the outstanding balance.
    pub extra_payment: Money,
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub principal: Money,
    pub horizon_months: u32,
    /// True when the balance reached zero within the horizon, or there was no loan.
    pub paid_off: bool,
    /// The regular payment does not (measurably) exceed the first month's interest.
    pub negative_amortization: bool,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub annual_rate: Percent,
    pub monthly_payment: Money,
    #[serde(default)]
    pub annual_extra_payment: Money,
    #[serde(default = "default_horizon_years")]
    pub max_horizon_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub months_to_payoff: Option<u32>,
    pub paid_off: bool,
    pub negative_amortization: bool,
    pub final_balance: Money,
    pub total_interest: Money,
    pub total_extra_payments: Money,
    pub total_paid: Money,
    pub entries: Vec<ScheduleEntry>,
}

fn default_horizon_years() -> u32 {
    DEFAULT_MAX_HORIZON_YEARS
}

impl Schedule {
    /// Months until payoff; `Some(0)` when there was nothing to repay.
    pub fn months_to_payoff(&self) -> Option<u32> {
        self.paid_off.then_some(self.entries.len() as u32)
    }

    pub fn final_balance(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.remaining_balance)
            .unwrap_or_else(|| self.principal.max(Decimal::ZERO))
    }

    pub fn total_interest(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.cumulative_interest)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_extra_payments(&self) -> Money {
        self.entries.iter().map(|e| e.extra_payment).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.entries.iter().map(|e| e.payment + e.extra_payment).sum()
    }

    /// Outstanding balance at the end of `month`, e.g. after the Zinsbindung.
    ///
    /// Month 0 is the starting principal. Past payoff the balance is zero;
    /// past an unpaid horizon it is unknown and `None` is returned.
    pub fn balance_after(&self, month: u32) -> Option<Money> {
        if month == 0 {
            return Some(self.principal.max(Decimal::ZERO));
        }
        match self.entries.get(month as usize - 1) {
            Some(entry) => Some(entry.remaining_balance),
            None if self.paid_off => Some(Decimal::ZERO),
            None => None,
        }
    }

    /// Nominal term minus actual payoff time. Negative when payoff is later.
    pub fn months_saved(&self, nominal_term_months: u32) -> Option<i64> {
        self.months_to_payoff()
            .map(|actual| i64::from(nominal_term_months) - i64::from(actual))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the payoff trajectory with the horizon given in years.
pub fn compute_schedule(
    principal: Money,
    annual_rate: Percent,
    monthly_payment: Money,
    annual_extra_payment: Money,
    max_horizon_years: u32,
) -> KreditResult<Schedule> {
    if max_horizon_years == 0 {
        return Err(KreditError::InvalidInput {
            field: "max_horizon_years".into(),
            reason: "Horizon must be at least one year".into(),
        });
    }
    compute_schedule_months(
        principal,
        annual_rate,
        monthly_payment,
        annual_extra_payment,
        max_horizon_years.saturating_mul(12),
    )
}

/// Simulate the payoff trajectory with the horizon given in months.
pub fn compute_schedule_months(
    principal: Money,
    annual_rate: Percent,
    monthly_payment: Money,
    annual_extra_payment: Money,
    horizon_months: u32,
) -> KreditResult<Schedule> {
    validate(annual_rate, monthly_payment, annual_extra_payment, horizon_months)?;

    let i = monthly_rate(annual_rate);
    let first_interest = principal
        .checked_mul(i)
        .ok_or_else(|| overflow("first month's interest"))?;
    let negative_amortization =
        principal > Decimal::ZERO && monthly_payment - first_interest < BALANCE_EPSILON;
    if negative_amortization {
        warn!(
            "payment {} does not cover first month's interest {} on {}",
            monthly_payment, first_interest, principal
        );
    }

    let mut entries = Vec::new();
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut month: u32 = 0;

    while balance > Decimal::ZERO && month < horizon_months {
        month += 1;

        // A growing balance can leave the Decimal range before the horizon.
        let interest = balance
            .checked_mul(i)
            .ok_or_else(|| overflow("monthly interest"))?;
        let mut principal_repaid = monthly_payment - interest;
        let mut payment = monthly_payment;
        if principal_repaid >= balance {
            principal_repaid = balance;
            payment = balance + interest;
        }
        balance = balance
            .checked_sub(principal_repaid)
            .ok_or_else(|| overflow("outstanding balance"))?;
        cumulative_interest = cumulative_interest
            .checked_add(interest)
            .ok_or_else(|| overflow("cumulative interest"))?;

        let mut extra_payment = Decimal::ZERO;
        if month % 12 == 0 && balance > Decimal::ZERO {
            extra_payment = annual_extra_payment.min(balance);
            balance -= extra_payment;
        }

        if balance > Decimal::ZERO && balance < BALANCE_EPSILON {
            principal_repaid += balance;
            payment += balance;
            balance = Decimal::ZERO;
        }

        trace!(
            "month {}, interest {}, principal {}, extra {}, balance {}",
            month,
            interest,
            principal_repaid,
            extra_payment,
            balance
        );

        entries.push(ScheduleEntry {
            month,
            interest,
            payment,
            principal_repaid,
            extra_payment,
            remaining_balance: balance,
            cumulative_interest,
        });
    }

    let paid_off = balance <= Decimal::ZERO;
    if !paid_off {
        warn!(
            "horizon of {} months reached with {} outstanding",
            horizon_months, balance
        );
    }
    debug!(
        "simulated {} months, paid off: {}, interest {}",
        entries.len(),
        paid_off,
        cumulative_interest
    );

    Ok(Schedule {
        principal,
        horizon_months,
        paid_off,
        negative_amortization,
        entries,
    })
}

/// Simulate a schedule and wrap it in the standard output envelope.
pub fn simulate_schedule(input: &ScheduleInput) -> KreditResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();

    let schedule = compute_schedule(
        input.principal,
        input.annual_rate,
        input.monthly_payment,
        input.annual_extra_payment,
        input.max_horizon_years,
    )?;
    let warnings = schedule_warnings(&schedule);

    let output = ScheduleOutput {
        months_to_payoff: schedule.months_to_payoff(),
        paid_off: schedule.paid_off,
        negative_amortization: schedule.negative_amortization,
        final_balance: schedule.final_balance(),
        total_interest: schedule.total_interest(),
        total_extra_payments: schedule.total_extra_payments(),
        total_paid: schedule.total_paid(),
        entries: schedule.entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization with annual Sondertilgung",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Caller-visible warnings for a finished schedule.
pub fn schedule_warnings(schedule: &Schedule) -> Vec<String> {
    let mut warnings = Vec::new();
    if schedule.principal <= Decimal::ZERO {
        warnings.push("Principal is not positive; nothing to amortize".to_string());
    }
    if schedule.negative_amortization {
        warnings.push(
            "Monthly payment does not exceed the monthly interest; the balance does not amortize"
                .to_string(),
        );
    }
    if !schedule.paid_off {
        warnings.push(format!(
            "Loan not repaid within {} months; {} outstanding",
            schedule.horizon_months,
            schedule.final_balance().round_dp(2)
        ));
    }
    warnings
}

fn validate(
    annual_rate: Percent,
    monthly_payment: Money,
    annual_extra_payment: Money,
    horizon_months: u32,
) -> KreditResult<()> {
    if annual_rate < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if monthly_payment < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment cannot be negative".into(),
        });
    }
    if annual_extra_payment < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "annual_extra_payment".into(),
            reason: "Sondertilgung cannot be negative".into(),
        });
    }
    if horizon_months == 0 {
        return Err(KreditError::InvalidInput {
            field: "horizon_months".into(),
            reason: "Horizon must be at least one month".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
