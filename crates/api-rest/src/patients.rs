use axum::{
    extract::{Query, State},
    response::Json,
};
use ordo_core::filters::QueryParams;
use ordo_core::Patient;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{ApiError, AppState};

#[derive(Serialize, ToSchema)]
pub(crate) struct PatientRes {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<chrono::NaiveDate>,
}

impl From<Patient> for PatientRes {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            last_name: p.last_name.into_string(),
            first_name: p.first_name.into_string(),
            birth_date: p.birth_date,
        }
    }
}

#[utoipa::path(
    get,
    path = "/Patient",
    params(
        ("nom" = Option<String>, Query, description = "Last name contains (alias `last_name`)"),
        ("prenom" = Option<String>, Query, description = "First name contains (alias `first_name`)"),
        ("date_naissance" = Option<String>, Query, description = "Exact birth date, YYYY-MM-DD (alias `birth_date`)"),
    ),
    responses(
        (status = 200, description = "Patients ordered by last name, first name", body = [PatientRes]),
        (status = 400, description = "Malformed filter value")
    )
)]
/// List patients
#[axum::debug_handler]
pub(crate) async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<PatientRes>>, ApiError> {
    let patients = state.patients.list(&params)?;
    Ok(Json(patients.into_iter().map(PatientRes::from).collect()))
}
