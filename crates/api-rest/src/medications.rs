use axum::{
    extract::{Query, State},
    response::Json,
};
use ordo_core::filters::QueryParams;
use ordo_core::{Medication, MedicationStatus};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{ApiError, AppState};

#[derive(Serialize, ToSchema)]
pub(crate) struct MedicationRes {
    pub id: i64,
    pub code: String,
    pub label: String,
    /// `actif` or `suppr`.
    #[schema(value_type = String, example = "actif")]
    pub status: MedicationStatus,
}

impl From<Medication> for MedicationRes {
    fn from(m: Medication) -> Self {
        Self {
            id: m.id,
            code: m.code.into_string(),
            label: m.label.into_string(),
            status: m.status,
        }
    }
}

#[utoipa::path(
    get,
    path = "/Medication",
    params(
        ("code" = Option<String>, Query, description = "Code contains (case-insensitive)"),
        ("label" = Option<String>, Query, description = "Label contains (case-insensitive)"),
        ("status" = Option<String>, Query, description = "Exact status, case-insensitive"),
    ),
    responses(
        (status = 200, description = "Medications ordered by code", body = [MedicationRes])
    )
)]
/// List medications
#[axum::debug_handler]
pub(crate) async fn list_medications(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<MedicationRes>>, ApiError> {
    let medications = state.medications.list(&params)?;
    Ok(Json(medications.into_iter().map(MedicationRes::from).collect()))
}
