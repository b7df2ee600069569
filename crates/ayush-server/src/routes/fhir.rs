use axum::Json;
use ayush_fhir::{Bundle, ClinicalForm, build_collection_bundle, process_transaction};

use crate::error::ServerResult;

/// Reshape a flat clinical form into a collection bundle.
pub async fn fhir_resource(Json(form): Json<ClinicalForm>) -> ServerResult<Json<Bundle>> {
    Ok(Json(build_collection_bundle(&form)?))
}

/// Validate a transaction bundle and acknowledge each entry.
pub async fn fhir_bundle(Json(bundle): Json<Bundle>) -> ServerResult<Json<Bundle>> {
    Ok(Json(process_transaction(&bundle)?))
}
