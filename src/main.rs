use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod features;
mod model;
mod opts;
mod prelude;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn.clone(), opts.traces_sample_rate)?;
    match opts.subcommand {
        Subcommand::Serve(opts) => web::run(opts).await,
    }
}
