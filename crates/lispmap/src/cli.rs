//! Clap derive structures for the `lispmap` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on `clap` / `clap_complete`: `build.rs` includes this
//! file directly to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lispmap -- inspect and edit a LISP mapping-service database
#[derive(Debug, Parser)]
#[command(
    name = "lispmap",
    version,
    about = "Manage LISP mappings and authentication keys from the command line",
    long_about = "A CLI for the LISP mapping-service database exposed over RESTCONF.\n\n\
        Lists, inspects, creates, updates and removes EID-to-locator mappings\n\
        and EID authentication keys across every virtual network instance.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "LISPMAP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "LISPMAP_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// RESTCONF username (overrides profile)
    #[arg(long, short = 'u', env = "LISPMAP_USERNAME", global = true)]
    pub username: Option<String>,

    /// RESTCONF password
    #[arg(long, env = "LISPMAP_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LISPMAP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "LISPMAP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LISPMAP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage EID-to-locator mappings
    #[command(alias = "map", alias = "m")]
    Mappings(MappingsArgs),

    /// Manage EID authentication keys
    #[command(alias = "k")]
    Keys(KeysArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show rows in this virtual network instance
    #[arg(long)]
    pub vni: Option<u32>,

    /// Only show rows whose EID contains this text
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

/// An EID as accepted by the store's RPCs.
#[derive(Debug, Args)]
pub struct EidArgs {
    /// EID address (e.g. ipv4:10.0.0.0/24, 10.0.0.1, "[5] ipv4:10.0.0.1/32")
    pub eid: String,
}

// ── Mappings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MappingsArgs {
    #[command(subcommand)]
    pub command: MappingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MappingsCommand {
    /// List mappings across all virtual networks
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a stored mapping by its eid-uri
    Get {
        /// Store key of the mapping (e.g. ipv4:10.0.0.0/24)
        eid_uri: String,
    },

    /// Ask the mapping service for the mapping covering an EID
    Lookup(EidArgs),

    /// Register a new mapping
    Add(MappingWriteArgs),

    /// Replace an existing mapping
    Update(MappingWriteArgs),

    /// Remove a mapping by its eid-uri
    #[command(alias = "rm")]
    Delete {
        /// Store key of the mapping (e.g. ipv4:10.0.0.0/24)
        eid_uri: String,
    },
}

#[derive(Debug, Args)]
pub struct MappingWriteArgs {
    /// EID prefix (e.g. ipv4:10.0.0.0/24)
    #[arg(long, required_unless_present = "from_file")]
    pub eid: Option<String>,

    /// Virtual network instance; non-zero wraps the EID in an instance-id
    #[arg(long, default_value = "0")]
    pub vni: u32,

    /// Locator address (repeatable)
    #[arg(long = "rloc", short = 'r')]
    pub rlocs: Vec<String>,

    /// Unicast priority for every --rloc
    #[arg(long, default_value = "1")]
    pub priority: u8,

    /// Unicast weight for every --rloc
    #[arg(long, default_value = "100")]
    pub weight: u8,

    /// Record TTL in minutes
    #[arg(long)]
    pub ttl: Option<u32>,

    /// Action for a mapping with no locators
    #[arg(long, value_enum, default_value = "no-action")]
    pub action: ActionArg,

    /// Mark the record authoritative
    #[arg(long)]
    pub authoritative: bool,

    /// Read the whole request from a JSON file instead
    #[arg(long, short = 'F', conflicts_with_all = ["eid", "rlocs"])]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActionArg {
    NoAction,
    NativelyForward,
    SendMapRequest,
    Drop,
}

// ── Keys ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    /// List authentication keys across all virtual networks
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a stored key by its eid-uri
    Get {
        /// Store key of the entry (e.g. ipv4:10.0.0.0/24)
        eid_uri: String,
    },

    /// Ask the mapping service for the key registered for an EID
    Lookup(EidArgs),

    /// Register a new key
    Add(KeyWriteArgs),

    /// Replace an existing key
    Update(KeyWriteArgs),

    /// Remove a key by its eid-uri
    #[command(alias = "rm")]
    Delete {
        /// Store key of the entry (e.g. ipv4:10.0.0.0/24)
        eid_uri: String,
    },
}

#[derive(Debug, Args)]
pub struct KeyWriteArgs {
    /// EID prefix (e.g. ipv4:10.0.0.0/24)
    #[arg(long)]
    pub eid: String,

    /// Virtual network instance; non-zero wraps the EID in an instance-id
    #[arg(long, default_value = "0")]
    pub vni: u32,

    /// Key algorithm id (1 = HMAC-SHA-1-96, 2 = HMAC-SHA-256-128)
    #[arg(long, default_value = "1")]
    pub key_type: u16,

    /// Shared secret (prompted for when omitted)
    #[arg(long, env = "LISPMAP_KEY_STRING", hide_env_values = true)]
    pub key: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a profile value (controller, username, password_env, ca_cert, insecure, timeout)
    Set {
        key: String,
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
