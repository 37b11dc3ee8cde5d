use crate::config::SampleConfig;
use crate::generator::regions::{globe_animation_data, japan_coordinates};
use crate::generator::samples::build_sar_response;
use chrono::Utc;
use log::{debug, warn};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{http::StatusCode, Filter, Rejection, Reply};

#[derive(Debug)]
struct GenerationFailed(String);

impl warp::reject::Reject for GenerationFailed {}

fn with_samples(
    config: Arc<SampleConfig>,
) -> impl Filter<Extract = (Arc<SampleConfig>,), Error = Infallible> + Clone {
    warp::any().map(move || config.clone())
}

/// All read-only endpoints, logged under the `sarserver` target.
pub fn api(
    config: Arc<SampleConfig>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    sar_data(config)
        .or(region_coordinates())
        .or(globe_animation())
        .recover(handle_rejection)
        .with(warp::log("sarserver"))
}

fn sar_data(
    config: Arc<SampleConfig>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "sar-data")
        .and(warp::get())
        .and(with_samples(config))
        .and_then(|config: Arc<SampleConfig>| async move {
            match build_sar_response(&config, Utc::now()) {
                Ok(response) => {
                    debug!("generated {} SAR points", response.data.len());
                    Ok(warp::reply::json(&response))
                }
                Err(err) => {
                    warn!("sar-data generation failed: {:#}", err);
                    Err(warp::reject::custom(GenerationFailed(err.to_string())))
                }
            }
        })
}

fn region_coordinates() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "japan-coordinates")
        .and(warp::get())
        .map(|| warp::reply::json(&japan_coordinates()))
}

fn globe_animation() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "globe-animation-data")
        .and(warp::get())
        .map(|| warp::reply::json(&globe_animation_data()))
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<GenerationFailed>() {
        Some(GenerationFailed(message)) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "error": message })),
            StatusCode::INTERNAL_SERVER_ERROR,
        )),
        None => Err(err),
    }
}
