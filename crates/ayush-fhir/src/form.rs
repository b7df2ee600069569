//! Flat clinical form to collection bundle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bundle::Bundle;
use crate::error::{FhirError, Result};
use crate::resources::{
    Address, CodeableConcept, Condition, ContactPoint, HumanName, LOINC_SYSTEM, Observation,
    Patient, Quantity, Reference, SNOMED_SYSTEM,
};

/// Patient demographics with an optional observation and condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalForm {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub observation_name: Option<String>,
    #[serde(default)]
    pub loinc_code: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_code: Option<String>,
    #[serde(default)]
    pub observation_date: Option<String>,
    #[serde(default)]
    pub condition_name: Option<String>,
    #[serde(default)]
    pub snomed_code: Option<String>,
    #[serde(default)]
    pub onset_date: Option<String>,
}

impl ClinicalForm {
    /// Patient id, falling back to `"1"` when blank.
    fn subject_id(&self) -> &str {
        let id = self.patient_id.trim();
        if id.is_empty() { "1" } else { id }
    }

    pub fn to_patient(&self) -> Patient {
        let has_address = [
            &self.address,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .any(|field| field.is_some());
        let address = has_address.then(|| {
            vec![Address {
                line: self.address.iter().cloned().collect(),
                city: self.city.clone(),
                state: self.state.clone(),
                postal_code: self.postal_code.clone(),
                country: self.country.clone(),
            }]
        });

        let telecom: Vec<ContactPoint> = [("phone", &self.phone), ("email", &self.email)]
            .into_iter()
            .filter_map(|(system, value)| {
                value.as_ref().map(|value| ContactPoint {
                    system: system.to_string(),
                    value: value.clone(),
                })
            })
            .collect();

        Patient {
            resource_type: Patient::RESOURCE_TYPE.to_string(),
            id: Some(self.subject_id().to_string()),
            identifier: None,
            name: vec![HumanName {
                family: self.last_name.clone(),
                given: vec![self.first_name.clone()],
            }],
            gender: self.gender.trim().to_lowercase(),
            birth_date: self.birth_date.trim().to_string(),
            address,
            telecom: (!telecom.is_empty()).then_some(telecom),
        }
    }

    /// LOINC-coded observation, when an observation name was given.
    pub fn to_observation(&self) -> Option<Observation> {
        let name = self.observation_name.as_deref()?;
        let value_quantity = self.value.map(|value| Quantity {
            value,
            unit: self.unit.clone().unwrap_or_default(),
            system: None,
            code: self.unit_code.clone().unwrap_or_default(),
        });
        Some(Observation {
            resource_type: Observation::RESOURCE_TYPE.to_string(),
            id: None,
            status: "final".to_string(),
            code: CodeableConcept::single(
                LOINC_SYSTEM,
                self.loinc_code.as_deref().unwrap_or_default(),
                name,
            ),
            subject: Reference::patient(self.subject_id()),
            effective_date_time: self.observation_date.clone(),
            value_quantity,
        })
    }

    /// SNOMED CT-coded condition, when a condition name was given.
    pub fn to_condition(&self) -> Option<Condition> {
        let name = self.condition_name.as_deref()?;
        Some(Condition {
            resource_type: Condition::RESOURCE_TYPE.to_string(),
            id: None,
            code: CodeableConcept::single(
                SNOMED_SYSTEM,
                self.snomed_code.as_deref().unwrap_or_default(),
                name,
            ),
            subject: Reference::patient(self.subject_id()),
            onset_date_time: self.onset_date.clone(),
        })
    }
}

/// Reshape a clinical form into a `collection` bundle.
///
/// The Patient always comes first, followed by the Observation and the
/// Condition when the form names them.
///
/// # Errors
///
/// [`FhirError::InvalidResource`] when the patient demographics are invalid.
pub fn build_collection_bundle(form: &ClinicalForm) -> Result<Bundle> {
    let patient = form.to_patient();
    patient.validate()?;

    let mut resources = vec![serde_json::to_value(&patient)?];
    if let Some(observation) = form.to_observation() {
        resources.push(serde_json::to_value(&observation)?);
    }
    if let Some(condition) = form.to_condition() {
        resources.push(serde_json::to_value(&condition)?);
    }
    debug!(resources = resources.len(), "collection bundle built");
    Ok(Bundle::collection(resources))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_patient_id_defaults_to_one() {
        let form = ClinicalForm {
            condition_name: Some("Fever".to_string()),
            ..ClinicalForm::default()
        };
        let condition = form.to_condition().expect("condition");
        assert_eq!(condition.subject.reference, "Patient/1");
    }

    #[test]
    fn invalid_patient_is_rejected() {
        let form = ClinicalForm {
            patient_id: "p1".to_string(),
            first_name: "Arun".to_string(),
            last_name: "Kumar".to_string(),
            gender: "male".to_string(),
            birth_date: "12/04/1990".to_string(),
            ..ClinicalForm::default()
        };
        assert!(matches!(
            build_collection_bundle(&form),
            Err(FhirError::InvalidResource { .. })
        ));
    }
}
