use std::sync::Arc;

use ayush_history::HistoryStore;
use ayush_ingest::load_tables;
use ayush_map::{LookupContext, MergedTable};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Prepared lookup tables, read-only for the life of the process
    pub lookup: Arc<LookupContext>,

    /// Users and saved lookups
    pub history: Arc<HistoryStore>,
}

impl ServerState {
    pub fn new(config: ServerConfig, lookup: LookupContext, history: HistoryStore) -> Self {
        Self {
            config: Arc::new(config),
            lookup: Arc::new(lookup),
            history: Arc::new(history),
        }
    }

    /// Load the source tables and open the history store named by `config`.
    pub fn load(config: ServerConfig) -> ServerResult<Self> {
        let sources = load_tables(&config.data_dir, &config.tables)
            .map_err(|err| ServerError::Config(err.to_string()))?;
        let lookup = LookupContext::new(
            &sources.siddha,
            &sources.unani,
            MergedTable::from_raw(sources.merged),
            config.schema_policy,
        )?;
        let history = match &config.history_file {
            Some(path) => HistoryStore::open(path)?,
            None => HistoryStore::in_memory(),
        };
        info!(
            data_dir = %config.data_dir.display(),
            persistent_history = history.path().is_some(),
            "server state ready"
        );
        Ok(Self::new(config, lookup, history))
    }
}
