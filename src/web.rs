//! The inference service.

use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::model::LinearModel;
use crate::opts::ServeOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SentryMiddleware};

mod middleware;
mod views;

/// Loads the model and serves it until a termination signal.
///
/// The load happens before the listener binds: a missing or malformed
/// artifact fails the whole process instead of surfacing per-request.
pub async fn run(opts: ServeOpts) -> Result {
    let model = Arc::new(LinearModel::load(&opts.model_path)?);
    info!(path = %opts.model_path.display(), "loaded the model artifact");

    let app = create_app(model);
    info!(host = opts.host.as_str(), port = opts.port, "listening");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(StdDuration::from_secs(10)))
        .await?;
    Ok(())
}

fn create_app(model: Arc<LinearModel>) -> impl Endpoint {
    Route::new()
        .at("/", get(views::get_index))
        .at("/predict", post(views::post_predict))
        .data(model)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SentryMiddleware)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("failed to wait for the termination signal: {:#}", error);
    }
}
