use kredit_core::calculator::annuity_payment;
use kredit_core::schedule::simulator::{compute_schedule_months, DEFAULT_MAX_HORIZON_YEARS};
use kredit_core::schedule::{compute_schedule, simulate_schedule, ScheduleInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Termination and payoff
// ===========================================================================

#[test]
fn test_empty_schedule_for_no_loan() {
    let s = compute_schedule(dec!(0), dec!(3.8), dec!(1000), dec!(0), DEFAULT_MAX_HORIZON_YEARS).unwrap();
    assert!(s.entries.is_empty());
    assert!(s.paid_off);
}

#[test]
fn test_payoff_ends_on_zero_balance() {
    let s = compute_schedule(dec!(150000), dec!(4.2), dec!(900), dec!(0), 40).unwrap();
    assert!(s.paid_off);
    let last = s.entries.last().unwrap();
    assert_eq!(last.remaining_balance, Decimal::ZERO);
    assert!(last.payment <= dec!(900));
    assert!(s.entries[..s.entries.len() - 1]
        .iter()
        .all(|e| e.remaining_balance > Decimal::ZERO));
}

#[test]
fn test_horizon_cap_reference() {
    let s = compute_schedule(dec!(100000), dec!(4), dec!(600), dec!(0), 1).unwrap();
    assert_eq!(s.entries.len(), 12);
    assert!(!s.paid_off);
    assert!(s.entries.iter().all(|e| e.remaining_balance >= Decimal::ZERO));
    assert!(s.final_balance() > dec!(96000));
}

#[test]
fn test_horizon_in_months() {
    let s = compute_schedule_months(dec!(100000), dec!(4), dec!(600), dec!(0), 7).unwrap();
    assert_eq!(s.entries.len(), 7);
    assert_eq!(s.horizon_months, 7);
}

#[test]
fn test_months_are_consecutive_from_one() {
    let pmt = annuity_payment(dec!(18000), dec!(5.5), 36).unwrap();
    let s = compute_schedule(dec!(18000), dec!(5.5), pmt, dec!(0), 4).unwrap();
    for (idx, entry) in s.entries.iter().enumerate() {
        assert_eq!(entry.month, idx as u32 + 1);
    }
    assert_eq!(s.entries.len(), 36);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_balance_and_interest_monotonic() {
    let s = compute_schedule(dec!(320000), dec!(3.6), dec!(1500), dec!(3000), 40).unwrap();
    for pair in s.entries.windows(2) {
        assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
    }
}

#[test]
fn test_interest_plus_principal_equals_paid() {
    let principal = dec!(50000);
    let s = compute_schedule(principal, dec!(4.5), dec!(800), dec!(1500), 40).unwrap();
    assert!(s.paid_off);
    let diff = (s.total_paid() - s.total_interest() - principal).abs();
    assert!(diff < dec!(0.0001), "diff {diff}");
}

#[test]
fn test_identical_inputs_identical_schedules() {
    let run = || compute_schedule(dec!(275000), dec!(3.95), dec!(1300), dec!(2500), 40).unwrap();
    assert_eq!(run(), run());
}

#[test]
fn test_more_sondertilgung_never_slower() {
    let months: Vec<usize> = [dec!(0), dec!(1000), dec!(2500), dec!(10000)]
        .into_iter()
        .map(|extra| {
            compute_schedule(dec!(240000), dec!(4), dec!(1200), extra, 40)
                .unwrap()
                .entries
                .len()
        })
        .collect();
    assert!(months.windows(2).all(|w| w[1] <= w[0]), "{months:?}");
    assert!(months[3] < months[0]);
}

#[test]
fn test_sondertilgung_effect_visible_from_month_12() {
    let base = compute_schedule(dec!(200000), dec!(3.8), dec!(1000), dec!(0), 40).unwrap();
    let extra = compute_schedule(dec!(200000), dec!(3.8), dec!(1000), dec!(1000), 40).unwrap();
    assert_eq!(base.entries[10], extra.entries[10]);
    assert!(extra.entries[11].remaining_balance < base.entries[11].remaining_balance);
    assert!(extra.entries[12].remaining_balance < base.entries[12].remaining_balance);
}

#[test]
fn test_envelope_reports_negative_amortization() {
    let input = ScheduleInput {
        principal: dec!(100000),
        annual_rate: dec!(6),
        monthly_payment: dec!(400),
        annual_extra_payment: dec!(0),
        max_horizon_years: 3,
    };
    let out = simulate_schedule(&input).unwrap();
    assert!(out.result.negative_amortization);
    assert!(!out.result.paid_off);
    assert!(out.result.final_balance > dec!(100000));
    assert!(out.warnings.iter().any(|w| w.contains("does not amortize")));
}
