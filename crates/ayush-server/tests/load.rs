use std::fs;

use ayush_map::SchemaPolicy;
use ayush_server::{ServerConfig, ServerError, ServerState};
use tempfile::TempDir;

fn config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        data_dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    }
}

#[test]
fn state_loads_present_tables() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("siddha.csv"),
        "NAMC_CODE,NAMC_TERM\nSA1,Suram\nSA2,\n",
    )
    .unwrap();

    let state = ServerState::load(config(&dir)).unwrap();
    assert_eq!(state.lookup.search_space().len(), 1);
    assert!(state.lookup.merged().is_empty());
}

#[test]
fn strict_policy_rejects_bad_schema() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("unani.csv"), "term\nHumma\n").unwrap();

    let err = ServerState::load(config(&dir)).err().expect("schema error");
    assert!(matches!(err, ServerError::Lookup(_)));

    let degraded = ServerState::load(ServerConfig {
        schema_policy: SchemaPolicy::Degrade,
        ..config(&dir)
    })
    .unwrap();
    assert!(degraded.lookup.summaries()[1].error.is_some());
}

#[test]
fn missing_data_dir_is_config_error() {
    let dir = TempDir::new().unwrap();
    let cfg = ServerConfig {
        data_dir: dir.path().join("absent"),
        ..ServerConfig::default()
    };
    assert!(matches!(
        ServerState::load(cfg),
        Err(ServerError::Config(_))
    ));
}
