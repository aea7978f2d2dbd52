use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::persist::gateway::DEFAULT_SNAPSHOT_KEY;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "schema-form",
    version,
    about = "Schema-driven multi-step form engine"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: schema-form.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// JSON file used as the durable store (default: in-memory)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Append a JSON-lines transition trace to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and normalize a schema, reporting any definition errors
    Check {
        /// Path to the schema JSON document
        #[arg(long)]
        schema: String,
    },

    /// Render the form (restoring saved values from the store)
    Render {
        /// Path to the schema JSON document
        #[arg(long)]
        schema: String,

        /// Group to show instead of the first one
        #[arg(long)]
        group: Option<String>,

        /// Output format: text or json
        #[arg(long)]
        format: Option<String>,
    },

    /// Replay session scripts from YAML files
    Run {
        /// Path to the schema JSON document
        #[arg(long)]
        schema: String,

        /// Script YAML file or directory of YAML files
        #[arg(long)]
        script: String,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Append a new group definition (YAML or JSON) to a schema
    AddGroup {
        /// Path to the schema JSON document
        #[arg(long)]
        schema: String,

        /// Path to the group definition `{ title, fields }`
        #[arg(long)]
        group: String,

        /// Write the updated schema here (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `schema-form.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON store file; absent means in-memory
    pub path: Option<String>,

    #[serde(default = "default_snapshot_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_text")]
    pub format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

// Serde default helpers
fn default_snapshot_key() -> String { DEFAULT_SNAPSHOT_KEY.to_string() }
fn default_text() -> String { "text".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("schema-form.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolved settings (CLI > config file > defaults)
// ============================================================================

/// Store and trace settings shared by the form-driving subcommands.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub store_path: Option<String>,
    pub snapshot_key: String,
    pub trace_path: Option<String>,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> SessionSettings {
    SessionSettings {
        store_path: cli.store.clone().or_else(|| config.store.path.clone()),
        snapshot_key: config.store.key.clone(),
        trace_path: cli.trace.clone().or_else(|| config.trace.path.clone()),
    }
}

pub fn resolve_format(cli_format: Option<&str>, config: &AppConfig) -> String {
    cli_format.unwrap_or(&config.render.format).to_string()
}
