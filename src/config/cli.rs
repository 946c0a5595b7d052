use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the blogfront binary.
#[derive(Debug, Parser)]
#[command(name = "blogfront", version, about = "Blog posts API client")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "BLOGFRONT_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the posts API base URL, e.g. <https://api.example.com/api>.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the outbound request timeout.
    #[arg(long = "http-timeout-seconds", value_name = "SECONDS", global = true)]
    pub http_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Read and write blog posts.
    Posts(PostsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Debug, Subcommand, Clone)]
pub enum PostsCmd {
    /// List posts with optional filters
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        limit: Option<String>,
        /// Only featured (true) or only regular (false) posts
        #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
        featured: Option<bool>,
    },
    /// Get a post by id
    Get { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Comma separated tags, e.g. "rust, web"
        #[arg(long, default_value = "")]
        tags: String,
        /// Path to a file holding the raw Cookie header (takes precedence over env)
        #[arg(long, env = "BLOGFRONT_COOKIE_FILE", value_name = "PATH")]
        cookie_file: Option<PathBuf>,
        /// Raw Cookie header from env (no flag, keeps sessions out of shell history)
        #[arg(hide = true, env = "BLOGFRONT_COOKIE")]
        cookie_env: Option<String>,
    },
}
