use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::features::{FeatureVector, ValidationError};
use crate::model::{round_to_cents, LinearModel};
use crate::prelude::*;

const INDEX_MESSAGE: &str = "California house price inference service is running.";

/// Health check. Only reachable once the model has loaded.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_index() -> Json<Value> {
    Json(json!({ "status": "ok", "message": INDEX_MESSAGE }))
}

#[derive(Serialize)]
struct PredictResponse {
    predicted_value_100k: f64,
}

/// Validates the payload and applies the linear model.
///
/// The prediction is in units of $100,000, rounded to 2 decimal places.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post_predict(
    Json(payload): Json<Map<String, Value>>,
    Data(model): Data<&Arc<LinearModel>>,
) -> Result<Response> {
    let start_instant = Instant::now();

    let features = match FeatureVector::from_json(&payload) {
        Ok(features) => features,
        Err(error) => {
            info!("rejected the payload: {}", error);
            return Ok(validation_response(error));
        }
    };

    let prediction = model.predict(&features);
    if !prediction.is_finite() {
        return Err(anyhow!("the prediction is not finite"));
    }
    let predicted_value_100k = round_to_cents(prediction);

    debug!(predicted_value_100k, elapsed = ?start_instant.elapsed());
    Ok(Json(PredictResponse { predicted_value_100k }).into_response())
}

fn validation_response(error: ValidationError) -> Response {
    let message = error.to_string();
    let body = json!({
        "error": message,
        "missing": error.missing,
        "malformed": error.malformed,
    });
    Json(body).with_status(StatusCode::BAD_REQUEST).into_response()
}
