//! Prescription endpoints.
//!
//! Wire field names differ from the domain names: `date_debut`/`date_fin` for the dates and
//! `patient`/`medication` for the referenced identities.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use ordo_core::filters::QueryParams;
use ordo_core::{FieldErrors, Prescription, PrescriptionInput, PrescriptionStatus, Supplied};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{ApiError, AppState};

#[derive(Serialize, ToSchema)]
pub(crate) struct PrescriptionRes {
    pub id: i64,
    pub patient: i64,
    pub medication: i64,
    #[schema(value_type = String, format = Date, example = "2025-01-01")]
    pub date_debut: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    pub date_fin: NaiveDate,
    /// `valide`, `en_attente` or `suppr`.
    #[schema(value_type = String, example = "en_attente")]
    pub status: PrescriptionStatus,
    pub comment: Option<String>,
}

impl From<Prescription> for PrescriptionRes {
    fn from(p: Prescription) -> Self {
        Self {
            id: p.id,
            patient: p.patient_id,
            medication: p.medication_id,
            date_debut: p.start_date,
            date_fin: p.end_date,
            status: p.status,
            comment: p.comment,
        }
    }
}

/// Body of create, full update and partial update requests.
///
/// Every field may be omitted; which ones are mandatory depends on the operation.
#[derive(Deserialize, ToSchema)]
pub(crate) struct PrescriptionReq {
    #[serde(default)]
    #[schema(value_type = i64)]
    pub patient: Supplied<i64>,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub medication: Supplied<i64>,
    #[serde(default)]
    #[schema(value_type = String, format = Date, example = "2025-01-01")]
    pub date_debut: Supplied<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    pub date_fin: Supplied<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "valide")]
    pub status: Supplied<PrescriptionStatus>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub comment: Supplied<String>,
}

impl From<PrescriptionReq> for PrescriptionInput {
    fn from(req: PrescriptionReq) -> Self {
        Self {
            patient: req.patient,
            medication: req.medication,
            start_date: req.date_debut,
            end_date: req.date_fin,
            status: req.status,
            comment: req.comment,
        }
    }
}

/// Identities that are not integers cannot name a record.
fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    tracing::warn!(%rejection, "rejected prescription body");
    ApiError::Validation(FieldErrors::non_field(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/Prescription",
    params(
        ("patient" = Option<i64>, Query, description = "Patient identity (alias `patient_id`)"),
        ("medication" = Option<i64>, Query, description = "Medication identity (alias `medication_id`)"),
        ("status" = Option<String>, Query, description = "Exact status, case-insensitive"),
        ("date_debut_from" = Option<String>, Query, description = "Start date on or after"),
        ("date_debut_to" = Option<String>, Query, description = "Start date on or before"),
        ("date_fin_from" = Option<String>, Query, description = "End date on or after"),
        ("date_fin_to" = Option<String>, Query, description = "End date on or before"),
    ),
    responses(
        (status = 200, description = "Prescriptions, newest start date first", body = [PrescriptionRes]),
        (status = 400, description = "Malformed filter value")
    )
)]
/// List prescriptions
///
/// All supplied filters must hold. Empty filter values are ignored.
#[axum::debug_handler]
pub(crate) async fn list_prescriptions(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<PrescriptionRes>>, ApiError> {
    let prescriptions = state.prescriptions.list(&params)?;
    Ok(Json(
        prescriptions.into_iter().map(PrescriptionRes::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/Prescription",
    request_body = PrescriptionReq,
    responses(
        (status = 201, description = "Prescription created", body = PrescriptionRes),
        (status = 400, description = "Missing field, unknown reference or date_fin before date_debut")
    )
)]
/// Create a prescription
///
/// `patient`, `medication`, `date_debut` and `date_fin` are required. `status` defaults to
/// `en_attente` and `comment` to null.
#[axum::debug_handler]
pub(crate) async fn create_prescription(
    State(state): State<AppState>,
    body: Result<Json<PrescriptionReq>, JsonRejection>,
) -> Result<(StatusCode, Json<PrescriptionRes>), ApiError> {
    let Json(req) = body.map_err(bad_body)?;
    let created = state.prescriptions.create(req.into())?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/Prescription/{id}",
    params(("id" = i64, Path, description = "Prescription identity")),
    responses(
        (status = 200, description = "Prescription", body = PrescriptionRes),
        (status = 404, description = "No such prescription")
    )
)]
/// Retrieve a prescription
#[axum::debug_handler]
pub(crate) async fn get_prescription(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PrescriptionRes>, ApiError> {
    let prescription = state.prescriptions.get(path_id(id)?)?;
    Ok(Json(prescription.into()))
}

#[utoipa::path(
    put,
    path = "/Prescription/{id}",
    params(("id" = i64, Path, description = "Prescription identity")),
    request_body = PrescriptionReq,
    responses(
        (status = 200, description = "Prescription replaced", body = PrescriptionRes),
        (status = 400, description = "Invalid body"),
        (status = 404, description = "No such prescription")
    )
)]
/// Replace a prescription
///
/// Same required fields as create. Omitted `status` and `comment` are reset to their defaults.
#[axum::debug_handler]
pub(crate) async fn update_prescription(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PrescriptionReq>, JsonRejection>,
) -> Result<Json<PrescriptionRes>, ApiError> {
    let id = path_id(id)?;
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            state.prescriptions.get(id)?;
            return Err(bad_body(rejection));
        }
    };

    let updated = state.prescriptions.update(id, req.into())?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/Prescription/{id}",
    params(("id" = i64, Path, description = "Prescription identity")),
    request_body = PrescriptionReq,
    responses(
        (status = 200, description = "Prescription updated", body = PrescriptionRes),
        (status = 400, description = "Invalid body or merged dates out of order"),
        (status = 404, description = "No such prescription")
    )
)]
/// Partially update a prescription
///
/// Only supplied fields change. The date rule is checked on the merged record.
#[axum::debug_handler]
pub(crate) async fn partial_update_prescription(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PrescriptionReq>, JsonRejection>,
) -> Result<Json<PrescriptionRes>, ApiError> {
    let id = path_id(id)?;
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            state.prescriptions.get(id)?;
            return Err(bad_body(rejection));
        }
    };

    let updated = state.prescriptions.partial_update(id, req.into())?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/Prescription/{id}",
    params(("id" = i64, Path, description = "Prescription identity")),
    responses(
        (status = 204, description = "Prescription deleted"),
        (status = 404, description = "No such prescription")
    )
)]
/// Delete a prescription
#[axum::debug_handler]
pub(crate) async fn delete_prescription(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    state.prescriptions.delete(path_id(id)?)?;
    Ok(StatusCode::NO_CONTENT)
}
