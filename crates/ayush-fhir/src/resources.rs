//! The subset of FHIR R4 resources the service reads and writes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FhirError, Result};

pub const LOINC_SYSTEM: &str = "http://loinc.org";
pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";

/// FHIR AdministrativeGender codes.
const GENDERS: [&str; 4] = ["male", "female", "other", "unknown"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub system: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanName {
    pub family: String,
    pub given: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Phone number or email of a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub system: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

impl CodeableConcept {
    pub fn single(system: &str, code: &str, display: &str) -> Self {
        Self {
            coding: vec![Coding {
                system: system.to_string(),
                code: code.to_string(),
                display: display.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    pub fn patient(id: &str) -> Self {
        Self {
            reference: format!("Patient/{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,
    pub name: Vec<HumanName>,
    pub gender: String,
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<Address>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telecom: Option<Vec<ContactPoint>>,
}

impl Patient {
    pub const RESOURCE_TYPE: &'static str = "Patient";

    pub fn validate(&self) -> Result<()> {
        let named = self.name.first().is_some_and(|name| {
            !name.family.trim().is_empty() && name.given.iter().any(|g| !g.trim().is_empty())
        });
        if !named {
            return Err(FhirError::invalid(
                Self::RESOURCE_TYPE,
                "name with family and given is required",
            ));
        }
        if !GENDERS.contains(&self.gender.as_str()) {
            return Err(FhirError::invalid(
                Self::RESOURCE_TYPE,
                format!("gender '{}' is not one of {}", self.gender, GENDERS.join(", ")),
            ));
        }
        if !is_fhir_date(&self.birth_date) {
            return Err(FhirError::invalid(
                Self::RESOURCE_TYPE,
                format!("birthDate '{}' is not a FHIR date", self.birth_date),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: String,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,
}

impl Observation {
    pub const RESOURCE_TYPE: &'static str = "Observation";

    pub fn validate(&self) -> Result<()> {
        if self.status.trim().is_empty() {
            return Err(FhirError::invalid(Self::RESOURCE_TYPE, "status is required"));
        }
        validate_subject_and_code(Self::RESOURCE_TYPE, &self.subject, &self.code)?;
        if self.effective_date_time.as_deref().is_none_or(str::is_empty) {
            return Err(FhirError::invalid(
                Self::RESOURCE_TYPE,
                "effectiveDateTime is required",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,
}

impl Condition {
    pub const RESOURCE_TYPE: &'static str = "Condition";

    pub fn validate(&self) -> Result<()> {
        validate_subject_and_code(Self::RESOURCE_TYPE, &self.subject, &self.code)
    }
}

fn validate_subject_and_code(
    resource_type: &str,
    subject: &Reference,
    code: &CodeableConcept,
) -> Result<()> {
    if subject.reference.trim().is_empty() {
        return Err(FhirError::invalid(resource_type, "subject.reference is required"));
    }
    if code.coding.is_empty() {
        return Err(FhirError::invalid(resource_type, "code.coding must not be empty"));
    }
    Ok(())
}

/// FHIR `date`: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn is_fhir_date(value: &str) -> bool {
    match value.len() {
        4 => value.bytes().all(|b| b.is_ascii_digit()),
        7 => NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok(),
        10 => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        _ => false,
    }
}
