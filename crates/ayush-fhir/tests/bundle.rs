use ayush_fhir::{
    Bundle, BundleType, ClinicalForm, FhirError, build_collection_bundle, process_transaction,
};
use serde_json::{Value, json};

fn form() -> ClinicalForm {
    ClinicalForm {
        patient_id: "p-17".to_string(),
        first_name: "Meena".to_string(),
        last_name: "Rao".to_string(),
        gender: "Female".to_string(),
        birth_date: "1979-11-03".to_string(),
        city: Some("Chennai".to_string()),
        phone: Some("+91-44-0000".to_string()),
        ..ClinicalForm::default()
    }
}

fn transaction(entries: Vec<Value>) -> Bundle {
    serde_json::from_value(json!({
        "resourceType": "Bundle",
        "type": "transaction",
        "entry": entries.into_iter().map(|resource| json!({ "resource": resource })).collect::<Vec<_>>(),
    }))
    .expect("bundle")
}

fn patient(id: Option<&str>) -> Value {
    let mut patient = json!({
        "resourceType": "Patient",
        "name": [{ "family": "Rao", "given": ["Meena"] }],
        "gender": "female",
        "birthDate": "1979-11",
    });
    if let Some(id) = id {
        patient["id"] = json!(id);
    }
    patient
}

#[test]
fn demographics_only_form_yields_single_patient() {
    let bundle = build_collection_bundle(&form()).expect("bundle");
    assert_eq!(bundle.bundle_type, BundleType::Collection);
    assert_eq!(bundle.entry.len(), 1);

    let patient = &bundle.entry[0].resource;
    assert_eq!(patient["resourceType"], "Patient");
    assert_eq!(patient["id"], "p-17");
    assert_eq!(patient["gender"], "female");
    assert_eq!(patient["address"][0]["city"], "Chennai");
    assert_eq!(patient["telecom"][0]["system"], "phone");
}

#[test]
fn observation_and_condition_reference_the_patient() {
    let form = ClinicalForm {
        observation_name: Some("Body temperature".to_string()),
        loinc_code: Some("8310-5".to_string()),
        value: Some(38.6),
        unit: Some("Cel".to_string()),
        unit_code: Some("Cel".to_string()),
        observation_date: Some("2026-10-01".to_string()),
        condition_name: Some("Fever".to_string()),
        snomed_code: Some("386661006".to_string()),
        ..form()
    };
    let bundle = build_collection_bundle(&form).expect("bundle");
    let types: Vec<&str> = bundle
        .entry
        .iter()
        .filter_map(|entry| entry.resource["resourceType"].as_str())
        .collect();
    assert_eq!(types, ["Patient", "Observation", "Condition"]);

    let observation = &bundle.entry[1].resource;
    insta::assert_json_snapshot!(observation, @r#"
    {
      "code": {
        "coding": [
          {
            "code": "8310-5",
            "display": "Body temperature",
            "system": "http://loinc.org"
          }
        ]
      },
      "effectiveDateTime": "2026-10-01",
      "resourceType": "Observation",
      "status": "final",
      "subject": {
        "reference": "Patient/p-17"
      },
      "valueQuantity": {
        "code": "Cel",
        "unit": "Cel",
        "value": 38.6
      }
    }
    "#);

    let condition = &bundle.entry[2].resource;
    assert_eq!(condition["code"]["coding"][0]["system"], "http://snomed.info/sct");
    assert_eq!(condition["subject"]["reference"], "Patient/p-17");
}

#[test]
fn transaction_entries_get_created_locations() {
    let observation = json!({
        "resourceType": "Observation",
        "status": "final",
        "code": { "coding": [{ "system": "http://loinc.org", "code": "8310-5", "display": "Body temperature" }] },
        "subject": { "reference": "Patient/p-17" },
        "effectiveDateTime": "2026-10-01T09:30:00Z",
    });
    let bundle = transaction(vec![patient(Some("p-17")), patient(None), observation]);

    let response = process_transaction(&bundle).expect("response");
    assert_eq!(response.bundle_type, BundleType::TransactionResponse);

    let locations: Vec<&str> = response
        .entry
        .iter()
        .filter_map(|entry| entry.response.as_ref())
        .map(|response| {
            assert_eq!(response.status, "201");
            response.location.as_str()
        })
        .collect();
    assert_eq!(locations, ["Patient/p-17", "Patient/new", "Observation/new"]);

    let json = serde_json::to_value(&response).expect("json");
    assert_eq!(json["type"], "transaction-response");
}

#[test]
fn only_transaction_bundles_are_processed() {
    let bundle = Bundle::collection(vec![patient(None)]);
    assert!(matches!(
        process_transaction(&bundle),
        Err(FhirError::UnsupportedBundle(_))
    ));
}

#[test]
fn unsupported_resource_type_is_rejected() {
    let bundle = transaction(vec![patient(None), json!({ "resourceType": "Encounter" })]);
    let err = process_transaction(&bundle).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported resource type: Encounter");
}

#[test]
fn observation_without_effective_date_is_invalid() {
    let observation = json!({
        "resourceType": "Observation",
        "status": "final",
        "code": { "coding": [{ "system": "http://loinc.org", "code": "8310-5", "display": "Body temperature" }] },
        "subject": { "reference": "Patient/p-17" },
    });
    let err = process_transaction(&transaction(vec![observation])).unwrap_err();
    assert!(matches!(err, FhirError::InvalidResource { ref resource_type, .. } if resource_type == "Observation"));
}

#[test]
fn patient_missing_fields_is_invalid() {
    let bundle = transaction(vec![json!({ "resourceType": "Patient", "gender": "male" })]);
    assert!(matches!(
        process_transaction(&bundle),
        Err(FhirError::InvalidResource { .. })
    ));
}

#[test]
fn condition_needs_coding() {
    let condition = json!({
        "resourceType": "Condition",
        "code": { "coding": [] },
        "subject": { "reference": "Patient/p-17" },
    });
    let err = process_transaction(&transaction(vec![condition])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid Condition resource: code.coding must not be empty"
    );
}

#[test]
fn empty_transaction_is_rejected() {
    let err = process_transaction(&transaction(Vec::new())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported bundle: Bundle must contain at least one entry"
    );
}
