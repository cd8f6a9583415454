//! Single binary web server: generate schedules over a JSON API and download them as CSV.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post,
    web::{self, Bytes, Data, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use round_robin_schedule::{
    generate_schedule_with_retries, render_csv, CompetitionConfig, ReportOptions, Schedule,
    ScheduleError, ScheduleId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Stored schedule + last activity time (for auto-cleanup).
struct ScheduleEntry {
    schedule: Schedule,
    last_activity: Instant,
}

/// In-memory state: generated schedules by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<ScheduleId, ScheduleEntry>>>;

/// Inactivity threshold: schedules not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Upper bound on shuffles a single request may ask for.
const MAX_ATTEMPTS: u32 = 1000;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateScheduleBody {
    /// Falls back to the embedded configuration.
    #[serde(default)]
    config: Option<CompetitionConfig>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_attempts")]
    attempts: u32,
}

fn default_attempts() -> u32 {
    20
}

/// Path segment: schedule id (e.g. /api/schedules/{id})
#[derive(Deserialize)]
struct SchedulePath {
    id: ScheduleId,
}

fn error_response(status: actix_web::http::StatusCode, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.to_string() }))
}

fn not_found() -> HttpResponse {
    error_response(actix_web::http::StatusCode::NOT_FOUND, "No schedule")
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-schedule",
    })
}

fn build_schedule(body: Option<CreateScheduleBody>) -> Result<Schedule, ScheduleError> {
    let (config, seed, attempts) = match body {
        Some(b) => (b.config, b.seed, b.attempts),
        None => (None, None, default_attempts()),
    };
    let config = match config {
        Some(c) => c,
        None => CompetitionConfig::embedded()?,
    };
    let competition = config.build()?;
    let seed = seed.unwrap_or_else(rand::random);
    Ok(generate_schedule_with_retries(
        &competition,
        seed,
        attempts.clamp(1, MAX_ATTEMPTS),
    )?)
}

/// An empty body asks for the embedded configuration; anything else must parse.
fn parse_body(body: &[u8]) -> Result<Option<CreateScheduleBody>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some)
}

/// Generate and store a schedule (returns it with id; client uses the id for the CSV download).
#[post("/api/schedules")]
async fn api_create_schedule(state: AppState, body: Bytes) -> HttpResponse {
    let body = match parse_body(&body) {
        Ok(b) => b,
        Err(e) => return error_response(actix_web::http::StatusCode::BAD_REQUEST, e),
    };
    // Scheduling is CPU-bound; keep it off the async workers.
    let schedule = match web::block(move || build_schedule(body)).await {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => {
            log::warn!("Schedule request failed: {}", e);
            return error_response(actix_web::http::StatusCode::BAD_REQUEST, e);
        }
        Err(e) => return error_response(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, e),
    };
    let id = schedule.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let response = HttpResponse::Ok().json(&schedule);
    g.insert(
        id,
        ScheduleEntry {
            schedule,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a schedule by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/schedules/{id}")]
async fn api_get_schedule(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.schedule)
        }
        None => not_found(),
    }
}

/// Schedule as CSV, same layout as the command line output.
#[get("/api/schedules/{id}/csv")]
async fn api_get_schedule_csv(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let schedule = &entry.schedule;
    let mut rng = StdRng::seed_from_u64(schedule.seed);
    match render_csv(&schedule.matches, &ReportOptions::default(), &mut rng) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

#[delete("/api/schedules/{id}")]
async fn api_delete_schedule(state: AppState, path: Path<SchedulePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<ScheduleId, ScheduleEntry>::new()));

    // Every 30 minutes, drop schedules inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive schedule(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_schedule)
            .service(api_get_schedule)
            .service(api_get_schedule_csv)
            .service(api_delete_schedule)
    })
    .bind(bind)?
    .run()
    .await
}
