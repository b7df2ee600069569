use anyhow::{Context, Result};
use ayush_ingest::load_tables;
use ayush_map::{LookupContext, MergedTable, SchemaPolicy};
use ayush_model::Resolution;
use ayush_server::ServerConfig;
use tracing::info_span;

use ayush_cli::report::{resolution_table, summary_table};

use crate::cli::{DataArgs, LookupArgs, SchemaPolicyArg, ServeArgs};

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let mut config = server_config(&args.data)?;
    if let Some(bind) = &args.bind {
        config.bind_addr.clone_from(bind);
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = &args.history_file {
        config.history_file = Some(path.clone());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(ayush_server::start_server(config))
}

/// Resolve one query; returns whether it produced a confirmed match.
pub fn run_lookup(args: &LookupArgs) -> Result<bool> {
    let config = server_config(&args.data)?;
    let context = load_context(&config)?;
    let options = config.resolve_options(args.top_k, args.threshold);

    let span = info_span!("lookup", query = %args.text);
    let _guard = span.enter();
    let resolution = context
        .resolve(&args.text, &options)
        .context("resolve query")?;

    if args.json {
        let json = serde_json::to_string_pretty(&resolution).context("serialize result")?;
        println!("{json}");
    } else {
        print_resolution(&resolution);
    }
    Ok(resolution.is_match())
}

pub fn run_tables(args: &DataArgs) -> Result<()> {
    let config = server_config(args)?;
    let context = load_context(&config)?;
    println!("Data: {}", config.data_dir.display());
    println!("{}", summary_table(context.summaries()));
    println!(
        "Searchable rows: {}, merged rows: {}",
        context.search_space().len(),
        context.merged().len()
    );
    Ok(())
}

fn print_resolution(resolution: &Resolution) {
    if let Some(error) = resolution.error() {
        println!("{error}");
    }
    if let Some(table) = resolution_table(resolution) {
        println!("{table}");
    }
}

/// Config file and environment, then command-line overrides.
fn server_config(args: &DataArgs) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(args.config.as_deref()).context("load configuration")?;
    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(policy) = args.schema_policy {
        config.schema_policy = match policy {
            SchemaPolicyArg::Strict => SchemaPolicy::Strict,
            SchemaPolicyArg::Degrade => SchemaPolicy::Degrade,
        };
    }
    Ok(config)
}

fn load_context(config: &ServerConfig) -> Result<LookupContext> {
    let sources = load_tables(&config.data_dir, &config.tables).with_context(|| {
        format!("load tables from {}", config.data_dir.display())
    })?;
    LookupContext::new(
        &sources.siddha,
        &sources.unani,
        MergedTable::from_raw(sources.merged),
        config.schema_policy,
    )
    .context("prepare lookup tables")
}
