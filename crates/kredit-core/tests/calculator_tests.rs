use kredit_core::calculator::{
    annuity_payment, effective_rent, loan_needed, monthly_mortgage_rate, mortgage_ancillary_costs,
    net_monthly_burden, AncillaryCosts, FederalState,
};
use kredit_core::KreditError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Annuity
// ===========================================================================

#[test]
fn test_annuity_car_loan_reference() {
    let pmt = annuity_payment(dec!(25000), dec!(4.99), 60).unwrap();
    assert_eq!(pmt.round_dp(2), dec!(471.67));
}

#[test]
fn test_annuity_zero_interest_exact() {
    assert_eq!(annuity_payment(dec!(12000), dec!(0), 24).unwrap(), dec!(500.00));
}

#[test]
fn test_annuity_no_loan() {
    assert_eq!(annuity_payment(dec!(0), dec!(4.99), 60).unwrap(), Decimal::ZERO);
    assert_eq!(annuity_payment(dec!(-1), dec!(0), 60).unwrap(), Decimal::ZERO);
}

#[test]
fn test_annuity_higher_rate_costs_more() {
    let low = annuity_payment(dec!(20000), dec!(2.9), 48).unwrap();
    let high = annuity_payment(dec!(20000), dec!(7.9), 48).unwrap();
    assert!(high > low);
    // Any positive rate costs more than straight-line repayment.
    assert!(low > dec!(20000) / dec!(48));
}

#[test]
fn test_annuity_zero_term_is_error() {
    match annuity_payment(dec!(10000), dec!(3), 0) {
        Err(KreditError::InvalidInput { field, .. }) => assert_eq!(field, "term_months"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// Mortgage arithmetic
// ===========================================================================

#[test]
fn test_ancillary_costs_reference() {
    let costs = mortgage_ancillary_costs(dec!(450000), dec!(2.0), dec!(3.57), dec!(6.5)).unwrap();
    assert_eq!(
        costs,
        AncillaryCosts {
            notary_cost: dec!(9000),
            broker_cost: dec!(16065),
            tax_cost: dec!(29250),
            total: dec!(54315),
        }
    );
}

#[test]
fn test_ancillary_costs_every_state_rate_accepted() {
    for state in FederalState::ALL {
        let costs =
            mortgage_ancillary_costs(dec!(100000), dec!(2), dec!(0), state.transfer_tax_rate()).unwrap();
        assert_eq!(costs.tax_cost, state.transfer_tax_rate() * dec!(1000));
    }
}

#[test]
fn test_loan_chain_feeds_monthly_rate() {
    let price = dec!(400000);
    let costs = mortgage_ancillary_costs(price, dec!(2.0), dec!(3.57), dec!(6.0)).unwrap();
    let needed = loan_needed(price + costs.total, dec!(80000));
    assert_eq!(needed, dec!(366280));
    let rate = monthly_mortgage_rate(needed, dec!(3.8), dec!(2.0));
    assert_eq!(rate.round_dp(2), dec!(1770.35));
}

#[test]
fn test_negative_loan_gives_zero_rate() {
    let needed = loan_needed(dec!(300000), dec!(350000));
    assert_eq!(needed, dec!(-50000));
    assert_eq!(monthly_mortgage_rate(needed, dec!(3.8), dec!(2)), Decimal::ZERO);
}

// ===========================================================================
// Rental offset
// ===========================================================================

#[test]
fn test_rental_offset_burden_and_surplus() {
    assert_eq!(effective_rent(&[dec!(1000)], dec!(70)).unwrap(), dec!(700));
    assert_eq!(net_monthly_burden(dec!(1500), &[dec!(1000)], dec!(70)).unwrap(), dec!(800));
    assert_eq!(net_monthly_burden(dec!(500), &[dec!(1000)], dec!(70)).unwrap(), dec!(-200));
}

#[test]
fn test_rental_offset_full_and_zero_recognition() {
    let rents = [dec!(450), dec!(550)];
    assert_eq!(effective_rent(&rents, dec!(100)).unwrap(), dec!(1000));
    assert_eq!(effective_rent(&rents, dec!(0)).unwrap(), dec!(0));
}
