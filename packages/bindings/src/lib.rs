use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Finance calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn annuity_payment(input_json: String) -> NapiResult<String> {
    let input: kredit_core::calculator::annuity::AnnuityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        kredit_core::calculator::annuity::calculate_annuity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn ancillary_costs(input_json: String) -> NapiResult<String> {
    let input: kredit_core::calculator::mortgage::AncillaryCostsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = kredit_core::calculator::mortgage::calculate_ancillary_costs(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rental_offset(input_json: String) -> NapiResult<String> {
    let input: kredit_core::calculator::rental::RentalOffsetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = kredit_core::calculator::rental::calculate_rental_offset(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: kredit_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = kredit_core::schedule::simulate_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[napi]
pub fn car_loan(input_json: String) -> NapiResult<String> {
    let input: kredit_core::products::car_loan::CarLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        kredit_core::products::car_loan::analyze_car_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn mortgage(input_json: String) -> NapiResult<String> {
    let input: kredit_core::products::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        kredit_core::products::mortgage::analyze_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn federal_states() -> NapiResult<String> {
    let states: Vec<serde_json::Value> = kredit_core::calculator::FederalState::ALL
        .iter()
        .map(|state| {
            serde_json::json!({
                "key": state.key(),
                "state": state.name(),
                "transfer_tax_rate": state.transfer_tax_rate(),
            })
        })
        .collect();
    serde_json::to_string(&states).map_err(to_napi_error)
}
