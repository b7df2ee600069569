//! Bundle envelope and transaction processing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{FhirError, Result};
use crate::resources::{Condition, Observation, Patient};

const BUNDLE_RESOURCE_TYPE: &str = "Bundle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Transaction,
    Batch,
    Collection,
    TransactionResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default = "bundle_resource_type")]
    pub resource_type: String,
    #[serde(rename = "type")]
    pub bundle_type: BundleType,
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

fn bundle_resource_type() -> String {
    BUNDLE_RESOURCE_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    pub resource: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<EntryRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<EntryResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRequest {
    pub method: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryResponse {
    pub status: String,
    pub location: String,
}

impl Bundle {
    pub fn new(bundle_type: BundleType, entry: Vec<BundleEntry>) -> Self {
        Self {
            resource_type: bundle_resource_type(),
            bundle_type,
            entry,
        }
    }

    /// A `collection` bundle holding `resources` in order.
    pub fn collection(resources: Vec<Value>) -> Self {
        let entry = resources
            .into_iter()
            .map(|resource| BundleEntry {
                full_url: None,
                resource,
                request: None,
                response: None,
            })
            .collect();
        Self::new(BundleType::Collection, entry)
    }
}

/// Validate a `transaction` bundle and answer with a `transaction-response`.
///
/// Every entry must hold a valid Patient, Observation or Condition; each is
/// acknowledged with status `201` and a `Type/id` location (`Type/new` when
/// the resource has no id). The first failing entry aborts the bundle.
///
/// # Errors
///
/// [`FhirError::UnsupportedBundle`] for non-transaction bundles,
/// [`FhirError::UnsupportedResource`] and [`FhirError::InvalidResource`] for
/// bad entries.
pub fn process_transaction(bundle: &Bundle) -> Result<Bundle> {
    if bundle.resource_type != BUNDLE_RESOURCE_TYPE {
        return Err(FhirError::UnsupportedBundle(format!(
            "resourceType must be Bundle, got {}",
            bundle.resource_type
        )));
    }
    if bundle.bundle_type != BundleType::Transaction {
        return Err(FhirError::UnsupportedBundle(
            "Only transaction bundles are supported".to_string(),
        ));
    }

    if bundle.entry.is_empty() {
        return Err(FhirError::UnsupportedBundle(
            "Bundle must contain at least one entry".to_string(),
        ));
    }

    let mut entries = Vec::with_capacity(bundle.entry.len());
    for entry in &bundle.entry {
        let resource_type = validate_resource(&entry.resource)?;
        let id = entry
            .resource
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("new");
        debug!(resource_type, id, "transaction entry accepted");
        entries.push(BundleEntry {
            full_url: entry.full_url.clone(),
            resource: entry.resource.clone(),
            request: None,
            response: Some(EntryResponse {
                status: "201".to_string(),
                location: format!("{resource_type}/{id}"),
            }),
        });
    }

    Ok(Bundle::new(BundleType::TransactionResponse, entries))
}

/// Check one resource and return its type name.
fn validate_resource(resource: &Value) -> Result<&'static str> {
    let resource_type = resource
        .get("resourceType")
        .and_then(Value::as_str)
        .unwrap_or_default();
    match resource_type {
        Patient::RESOURCE_TYPE => {
            parse::<Patient>(resource, Patient::RESOURCE_TYPE)?.validate()?;
            Ok(Patient::RESOURCE_TYPE)
        }
        Observation::RESOURCE_TYPE => {
            parse::<Observation>(resource, Observation::RESOURCE_TYPE)?.validate()?;
            Ok(Observation::RESOURCE_TYPE)
        }
        Condition::RESOURCE_TYPE => {
            parse::<Condition>(resource, Condition::RESOURCE_TYPE)?.validate()?;
            Ok(Condition::RESOURCE_TYPE)
        }
        other => Err(FhirError::UnsupportedResource {
            resource_type: other.to_string(),
        }),
    }
}

fn parse<T: serde::de::DeserializeOwned>(resource: &Value, resource_type: &str) -> Result<T> {
    T::deserialize(resource).map_err(|err| FhirError::invalid(resource_type, err.to_string()))
}
