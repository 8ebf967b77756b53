//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser)]
#[command(version, about)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "HOUSING_API_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Sentry performance tracing sample rate
    #[arg(long, default_value_t = 0.0, env = "HOUSING_API_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Serve(ServeOpts),
}

/// Runs the inference service
#[derive(Args)]
pub struct ServeOpts {
    /// Bind host
    #[arg(long, default_value = "::", env = "HOUSING_API_HOST")]
    pub host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 8000, env = "HOUSING_API_PORT")]
    pub port: u16,

    /// Path to the serialized model artifact
    #[arg(
        short,
        long = "model",
        default_value = "housing_model.pickle",
        env = "HOUSING_API_MODEL"
    )]
    pub model_path: PathBuf,
}
