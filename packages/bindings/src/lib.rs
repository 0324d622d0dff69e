use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use homeplan_core::affordability::{self, AffordabilityLimits};
use homeplan_core::loan::{self, LoanInput, LoanResult};
use homeplan_core::region::{RegionEvent, RegionSelection, RegionTable};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_loan(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EvaluateRequest {
    loan: LoanResult,
    limits: AffordabilityLimits,
}

#[derive(Deserialize)]
struct AssessRequest {
    loan: LoanInput,
    limits: AffordabilityLimits,
}

/// Evaluate an already computed loan (`{"loan": LoanResult, "limits": ...}`).
#[napi]
pub fn evaluate_affordability(input_json: String) -> NapiResult<String> {
    let req: EvaluateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = affordability::evaluate(&req.loan, &req.limits).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Compute and evaluate a loan in one call (`{"loan": LoanInput, "limits": ...}`).
#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let req: AssessRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        affordability::assess_affordability(&req.loan, &req.limits).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// Districts of a province as a JSON array; `[]` when the province is unknown.
#[napi]
pub fn districts_of(province: String) -> NapiResult<String> {
    let table = RegionTable::builtin().map_err(to_napi_error)?;
    serde_json::to_string(&table.districts_of(&province)).map_err(to_napi_error)
}

/// Neighborhoods of a district as a JSON array; `[]` when either name is unknown.
#[napi]
pub fn neighborhoods_of(province: String, district: String) -> NapiResult<String> {
    let table = RegionTable::builtin().map_err(to_napi_error)?;
    serde_json::to_string(&table.neighborhoods_of(&province, &district)).map_err(to_napi_error)
}

/// Apply a selector event to a selection state; returns the new state as JSON.
/// An empty `state_json` starts from no selection.
#[napi]
pub fn apply_region_event(state_json: String, event_json: String) -> NapiResult<String> {
    let table = RegionTable::builtin().map_err(to_napi_error)?;
    let mut selection: RegionSelection = if state_json.trim().is_empty() {
        RegionSelection::new()
    } else {
        serde_json::from_str(&state_json).map_err(to_napi_error)?
    };
    let event: RegionEvent = serde_json::from_str(&event_json).map_err(to_napi_error)?;
    selection.apply(table, event).map_err(to_napi_error)?;
    serde_json::to_string(&selection).map_err(to_napi_error)
}
