//! FHIR R4 bundles for the AYUSH lookup service.
//!
//! A flat [`ClinicalForm`] is reshaped into a `collection` bundle, and
//! incoming `transaction` bundles are validated by [`process_transaction`].

#![deny(unsafe_code)]

pub mod bundle;
pub mod error;
pub mod form;
pub mod resources;

pub use bundle::{Bundle, BundleEntry, BundleType, EntryRequest, EntryResponse, process_transaction};
pub use error::{FhirError, Result};
pub use form::{ClinicalForm, build_collection_bundle};
pub use resources::{
    Address, CodeableConcept, Coding, Condition, ContactPoint, HumanName, Identifier,
    LOINC_SYSTEM, Observation, Patient, Quantity, Reference, SNOMED_SYSTEM, is_fhir_date,
};
