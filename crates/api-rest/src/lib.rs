//! # API REST
//!
//! REST API for the Ordo prescription service.
//!
//! Handles:
//! - HTTP endpoints with axum (`/Patient`, `/Medication`, `/Prescription`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON wire shapes, status codes, CORS)
//!
//! All data operations are delegated to the services in `ordo-core`.

#![warn(rust_2018_idioms)]

mod error;
mod health;
mod medications;
mod patients;
mod prescriptions;

use axum::{routing::get, Router};
use ordo_core::{MedicationService, PatientService, PrescriptionService, Store};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    patients: PatientService,
    medications: MedicationService,
    prescriptions: PrescriptionService,
}

impl AppState {
    /// Builds the services over one shared store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            patients: PatientService::new(store.clone()),
            medications: MedicationService::new(store.clone()),
            prescriptions: PrescriptionService::new(store),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        patients::list_patients,
        medications::list_medications,
        prescriptions::list_prescriptions,
        prescriptions::create_prescription,
        prescriptions::get_prescription,
        prescriptions::update_prescription,
        prescriptions::partial_update_prescription,
        prescriptions::delete_prescription,
    ),
    components(schemas(
        health::HealthRes,
        patients::PatientRes,
        medications::MedicationRes,
        prescriptions::PrescriptionRes,
        prescriptions::PrescriptionReq,
    ))
)]
struct ApiDoc;

/// Builds the complete HTTP application: resource routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/Patient", get(patients::list_patients))
        .route("/Medication", get(medications::list_medications))
        .route(
            "/Prescription",
            get(prescriptions::list_prescriptions).post(prescriptions::create_prescription),
        )
        .route(
            "/Prescription/:id",
            get(prescriptions::get_prescription)
                .put(prescriptions::update_prescription)
                .patch(prescriptions::partial_update_prescription)
                .delete(prescriptions::delete_prescription),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use ordo_core::{
        Medication, MedicationStatus, NewMedication, NewPatient, Patient, SqliteStore,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    pub struct TestApp {
        pub store: Arc<SqliteStore>,
        pub martin: Patient,
        pub durand: Patient,
        pub para: Medication,
        pub ibu: Medication,
    }

    impl TestApp {
        pub fn new() -> Self {
            let store = Arc::new(SqliteStore::open_in_memory().unwrap());
            let martin = store
                .insert_patient(
                    &NewPatient::new("Martin", "Jeanne", Some("1992-03-10".parse().unwrap()))
                        .unwrap(),
                )
                .unwrap();
            let durand = store
                .insert_patient(
                    &NewPatient::new("Durand", "Jean", Some("1980-05-20".parse().unwrap()))
                        .unwrap(),
                )
                .unwrap();
            let para = store
                .insert_medication(
                    &NewMedication::new("PARA500", "Paracétamol 500mg", MedicationStatus::Active)
                        .unwrap(),
                )
                .unwrap();
            let ibu = store
                .insert_medication(
                    &NewMedication::new("IBU200", "Ibuprofène 200mg", MedicationStatus::Removed)
                        .unwrap(),
                )
                .unwrap();

            Self {
                store,
                martin,
                durand,
                para,
                ibu,
            }
        }

        /// Sends one request to a fresh router over the shared store.
        pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let app = router(AppState::new(self.store.clone()));

            let builder = Request::builder().method(method).uri(uri);
            let req = match body {
                Some(json) => builder
                    .header("Content-Type", "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = app.oneshot(req).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }

        /// Like [`TestApp::send`] for responses that are not JSON.
        pub async fn send_text(&self, method: &str, uri: &str) -> (StatusCode, String) {
            let app = router(AppState::new(self.store.clone()));
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();

            let response = app.oneshot(req).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            (status, String::from_utf8_lossy(&bytes).into_owned())
        }

        pub async fn send_raw(&self, method: &str, uri: &str, body: &'static str) -> StatusCode {
            let app = router(AppState::new(self.store.clone()));
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap();
            app.oneshot(req).await.unwrap().status()
        }
    }
}
