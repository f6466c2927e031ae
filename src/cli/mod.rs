//! CLI for the Jenkins client
//!
//! One subcommand group per resource family:
//! - `job`, `build`, `node`, `queue`: facade operations
//! - `info`: server information
//! - `completions`: shell completions

mod commands;
pub mod completions;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use rustline_jenkins::{Config, Jenkins, init_logging};

/// CLI arguments for jenkins
#[derive(Parser, Debug)]
#[command(name = "jenkins")]
#[command(author, version, about = "Command-line client for the Jenkins REST API", long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Jenkins base URL (overrides config and JENKINS_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// User for basic auth (overrides config and JENKINS_USER)
    #[arg(long, global = true)]
    user: Option<String>,

    /// API token for basic auth (overrides config and JENKINS_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show server information
    Info {
        /// Tree depth
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },

    /// Job operations
    #[command(subcommand)]
    Job(JobCommand),

    /// Build operations
    #[command(subcommand)]
    Build(BuildCommand),

    /// Node operations
    #[command(subcommand)]
    Node(NodeCommand),

    /// Queue operations
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum JobCommand {
    /// Queue a build and print the queue item id
    Build {
        /// Job name, folders separated by '/'
        name: String,
        /// Build parameter, repeatable
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
        /// Remote trigger token
        #[arg(long)]
        build_token: Option<String>,
    },
    /// Print config.xml
    Config { name: String },
    /// Replace config.xml from a file
    SetConfig { name: String, file: PathBuf },
    /// Copy an existing job
    Copy { from: String, name: String },
    /// Create a job from a config.xml file
    Create { name: String, file: PathBuf },
    /// Delete a job
    Destroy { name: String },
    /// Disable a job
    Disable { name: String },
    /// Enable a job
    Enable { name: String },
    /// Print whether a job exists
    Exists { name: String },
    /// Print a job as JSON
    Get {
        name: String,
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
    /// List jobs as JSON
    List {
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
}

#[derive(Subcommand, Debug)]
enum BuildCommand {
    /// Print a build as JSON
    Get {
        name: String,
        number: u64,
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
    /// Abort a running build
    Stop { name: String, number: u64 },
    /// Print the console output of a build
    Log { name: String, number: u64 },
}

#[derive(Subcommand, Debug)]
enum NodeCommand {
    /// Print a node's config.xml
    Config { name: String },
    /// Replace a node's config.xml from a file
    SetConfig { name: String, file: PathBuf },
    /// Create a permanent agent
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 2)]
        executors: u32,
        #[arg(long, default_value = "/var/lib/jenkins")]
        remote_fs: String,
        /// Label, repeatable
        #[arg(short, long = "label")]
        labels: Vec<String>,
        /// Only run jobs tied to this node
        #[arg(long)]
        exclusive: bool,
    },
    /// Delete a node
    Destroy { name: String },
    /// Take a node offline
    Disable {
        name: String,
        #[arg(short, long, default_value = "")]
        message: String,
    },
    /// Bring a node back online
    Enable { name: String },
    /// Print whether a node exists
    Exists { name: String },
    /// Print a node as JSON
    Get {
        name: String,
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
    /// List nodes as JSON
    List {
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
}

#[derive(Subcommand, Debug)]
enum QueueCommand {
    /// List queue items as JSON
    List {
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
    /// Print a queue item as JSON
    Get {
        id: u64,
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
    /// Cancel a queue item
    Cancel { id: u64 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parses a `KEY=VALUE` build parameter
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Resolves configuration: file or defaults, then environment, then flags
fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    Ok(apply_flags(config.with_env_overrides(), args))
}

fn apply_flags(mut config: Config, args: &Args) -> Config {
    if let Some(url) = &args.url {
        config.base_url.clone_from(url);
    }
    if let Some(user) = &args.user {
        config.username = Some(user.clone());
    }
    if let Some(token) = &args.token {
        config.api_token = Some(token.clone());
    }
    if let Some(level) = &args.log_level {
        config.log_level.clone_from(level);
    }
    config
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.log_level);

    if let Command::Completions { shell, output } = &args.command {
        use clap_complete::Shell;

        let shell_enum = match shell {
            ShellArg::Bash => Shell::Bash,
            ShellArg::Zsh => Shell::Zsh,
            ShellArg::Fish => Shell::Fish,
            ShellArg::PowerShell => Shell::PowerShell,
        };

        let completions = completions::generate_completions(shell_enum)?;

        if let Some(output_path) = output {
            completions::save_completions(&completions, output_path)?;
        } else {
            println!("{completions}");
        }
        return Ok(());
    }

    let jenkins = Jenkins::from_config(&config)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let output = runtime.block_on(commands::execute(&jenkins, args.command))?;

    output.print()
}
