//! Liveness and readiness probes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Process health as reported to orchestrators.
///
/// The server starts live but not ready; `main` marks it ready once the
/// listener is bound and unhealthy when shutdown begins.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so the instance drains before shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe body.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ProbeView {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
}

fn probe_response(ok: bool, failing: &'static str) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeView {
            status: if ok { "ok" } else { failing },
        })
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Ready for traffic", body = ProbeView),
        (status = 503, description = "Still starting", body = ProbeView)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready(), "starting")
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process alive", body = ProbeView),
        (status = 503, description = "Draining", body = ProbeView)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive(), "draining")
}
