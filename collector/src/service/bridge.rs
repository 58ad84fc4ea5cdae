use log::{info, warn};
use scopecore::store::ReadingStore;
use scopecore::telemetry::MetricsRecorder;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder;
use warp::http::StatusCode;
use warp::reply::{self, Json, WithStatus};
use warp::{Filter, Rejection, Reply};

/// HTTP front door for sensor readings. Accepts uploads, appends them to the
/// shared store and keeps accept/reject counters for the status endpoint.
pub struct UploadBridge {
    store: Arc<ReadingStore>,
    metrics: Arc<MetricsRecorder>,
}

impl UploadBridge {
    pub fn new(store: Arc<ReadingStore>, metrics: Arc<MetricsRecorder>) -> Self {
        Self { store, metrics }
    }

    /// POST /upload ingests one reading, GET /status reports counters.
    /// Rejections are recovered into structured JSON errors.
    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
        let store = self.store.clone();
        let metrics = self.metrics.clone();
        let store_filter = warp::any().map(move || store.clone());
        let metrics_filter = warp::any().map(move || metrics.clone());

        let upload = warp::path("upload")
            .and(warp::post())
            .and(warp::body::json())
            .and(store_filter)
            .and(metrics_filter.clone())
            .and_then(handle_upload);

        let status = warp::path("status")
            .and(warp::get())
            .and(metrics_filter)
            .and_then(handle_status);

        upload.or(status).recover(handle_rejection)
    }

    /// Serves the routes from a dedicated thread so the caller keeps its own
    /// runtime free for signal handling.
    pub fn spawn(&self, addr: SocketAddr) {
        let routes = self.routes();
        thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build upload bridge runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(addr).await;
            });
        });
    }
}

async fn handle_upload(
    body: Value,
    store: Arc<ReadingStore>,
    metrics: Arc<MetricsRecorder>,
) -> Result<WithStatus<Json>, Rejection> {
    let angle = body.get("angle").and_then(Value::as_f64);
    let distance = body.get("distance").and_then(Value::as_f64);

    let (angle, distance) = match (angle, distance) {
        (Some(angle), Some(distance)) => (angle as f32, distance as f32),
        (angle, _) => {
            let field = if angle.is_none() { "angle" } else { "distance" };
            metrics.record_rejected();
            warn!("rejected upload: missing or non-numeric '{}'", field);
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                &format!("missing or non-numeric '{}'", field),
            ));
        }
    };

    match store.append(angle, distance) {
        Ok(reading) => {
            metrics.record_accepted();
            info!(
                "received angle={:.1} distance={:.1}cm at {}",
                reading.angle, reading.distance, reading.timestamp
            );
            Ok(reply::with_status(
                reply::json(&json!({ "status": "ok" })),
                StatusCode::OK,
            ))
        }
        Err(err) => {
            metrics.record_rejected();
            warn!("upload not persisted: {}", err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "could not persist reading",
            ))
        }
    }
}

async fn handle_status(metrics: Arc<MetricsRecorder>) -> Result<WithStatus<Json>, Rejection> {
    let (accepted, rejected) = metrics.snapshot();
    Ok(reply::with_status(
        reply::json(&json!({ "accepted": accepted, "rejected": rejected })),
        StatusCode::OK,
    ))
}

async fn handle_rejection(err: Rejection) -> Result<WithStatus<Json>, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "unknown endpoint")
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        (StatusCode::BAD_REQUEST, "request body is not valid JSON")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    } else {
        (StatusCode::BAD_REQUEST, "invalid request")
    };
    Ok(error_reply(status, message))
}

fn error_reply(status: StatusCode, message: &str) -> WithStatus<Json> {
    reply::with_status(
        reply::json(&json!({ "status": "error", "message": message })),
        status,
    )
}
