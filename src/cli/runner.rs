//! CLI runner - executes commands

use crate::catalog::CatalogLoader;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ResolvedConfig, SourceConfig};
use crate::engine::PaginationEngine;
use crate::error::{Error, Result, ResultExt};
use crate::graphql::GraphQlClient;
use crate::http;
use crate::pagination::{ConnectionAccessor, ConnectionPath};
use crate::queries::{self, TOP_LEVEL_PATH};
use crate::types::{variables, JsonValue, Variables};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Sync { output } => self.sync(output.as_deref()).await,
            Commands::Query { name, vars } => self.query(name, vars).await,
            Commands::Types => self.types(),
            Commands::Check => self.check().await,
        }
    }

    /// Load configuration: inline JSON, then file, then defaults
    fn load_config(&self) -> Result<ResolvedConfig> {
        let config = if let Some(json_str) = &self.cli.config_json {
            SourceConfig::from_json(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
        } else if let Some(path) = &self.cli.config {
            SourceConfig::from_file(path)?
        } else {
            SourceConfig::default()
        };

        config.with_env().validate()
    }

    fn build_engine(config: &ResolvedConfig) -> Result<PaginationEngine> {
        PaginationEngine::connect(&config.endpoint(), config.engine_config())
    }

    /// Load the whole catalog
    async fn sync(&self, output: Option<&Path>) -> Result<()> {
        let config = self.load_config()?;
        let mut engine = Self::build_engine(&config)?;
        let loader = CatalogLoader::from_config(&config);

        info!("Loading data from {}", config.store_url);
        let store = loader.load(&mut engine).await?;

        let rendered = self.render(&serde_json::to_value(&store)?)?;
        match output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {} node(s) to {}", store.node_count(), path.display());
            }
            None => println!("{rendered}"),
        }

        let stats = engine.stats();
        info!(
            "Sync complete: {} request(s), {} page(s), {} item(s), {} container(s) expanded in {}ms",
            stats.requests,
            stats.pages_fetched,
            stats.items_fetched,
            stats.containers_expanded,
            stats.duration_ms
        );
        Ok(())
    }

    /// Run one built-in query
    async fn query(&self, name: &str, vars: &[String]) -> Result<()> {
        let spec = queries::builtin(name)?;
        let config = self.load_config()?;
        let mut engine = Self::build_engine(&config)?;

        let vars = merge_vars(variables([("first", config.per_page)]), vars)?;

        info!("Loading data from {}", config.store_url);
        let items = engine.fetch_all(&spec, vars).await?;

        for item in &items {
            self.output_message(&json!({
                "type": "RECORD",
                "record": {
                    "query": name,
                    "data": item
                }
            }));
        }

        let stats = engine.stats();
        self.output_message(&json!({
            "type": "STATS",
            "stats": {
                "query": name,
                "items": items.len(),
                "requests": stats.requests,
                "pages": stats.pages_fetched,
                "containersExpanded": stats.containers_expanded,
                "durationMs": stats.duration_ms
            }
        }));
        Ok(())
    }

    /// List type names
    fn types(&self) -> Result<()> {
        let config = self.load_config()?;
        let loader = CatalogLoader::from_config(&config);

        for type_name in loader.type_names().all() {
            self.output_message(&json!({
                "type": "TYPE",
                "typeName": type_name,
                "included": loader.is_included(type_name)
            }));
        }
        Ok(())
    }

    /// Check configuration and connectivity
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let start = Instant::now();

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!("Checking connection to {}", config.store_url)
            }
        }));

        let status = match Self::ping(&config).await {
            Ok(()) => json!({
                "status": "SUCCEEDED",
                "message": format!("Connection successful ({}ms)", start.elapsed().as_millis())
            }),
            Err(e) => json!({
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            }),
        };

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status
        }));
        Ok(())
    }

    /// Issue a single one-item page and check its shape
    async fn ping(config: &ResolvedConfig) -> Result<()> {
        let client = GraphQlClient::new(http::connect(&config.endpoint())?);
        let data = client
            .execute(queries::PRODUCT_TYPES_QUERY, &variables([("first", 1)]))
            .await?;
        ConnectionPath::new(TOP_LEVEL_PATH).connection(&data)?;
        Ok(())
    }

    fn render(&self, value: &JsonValue) -> Result<String> {
        Ok(match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        })
    }

    /// Output a message to stdout
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Parse a `key=value` variable; the value is read as JSON when it parses
pub fn parse_var(raw: &str) -> Result<(String, JsonValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::invalid_value("var", format!("expected KEY=VALUE, got '{raw}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_value("var", format!("empty key in '{raw}'")));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::from(value));
    Ok((key.to_string(), value))
}

/// Merge `key=value` pairs over a base variable set
pub fn merge_vars(base: Variables, raw: &[String]) -> Result<Variables> {
    let mut merged = base;
    for var in raw {
        let (key, value) = parse_var(var)?;
        merged.insert(key, value);
    }
    Ok(merged)
}
