//! REST API over the engine. `configure` registers every route so the binary and
//! tests share one wiring.

use crate::logic::StartupPatch;
use crate::models::{BattleEventInput, EngineError, ErrorKind};
use crate::Engine;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shared engine handle.
pub type AppState = Data<Engine>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateStartupBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    slogan: String,
    founding_year: Option<i32>,
}

#[derive(Deserialize)]
struct TournamentNameBody {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct AdmitStartupBody {
    startup_id: Uuid,
}

#[derive(Deserialize)]
struct ResolveBattleBody {
    events: Vec<BattleEventInput>,
}

/// Path segment: entity id (e.g. /api/battles/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Map an engine error to a status code by its kind.
pub fn error_response(e: &EngineError) -> HttpResponse {
    let mut builder = match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest(),
        ErrorKind::NotFound => HttpResponse::NotFound(),
        ErrorKind::Conflict => HttpResponse::Conflict(),
        ErrorKind::Invariant => HttpResponse::UnprocessableEntity(),
        ErrorKind::Storage => HttpResponse::InternalServerError(),
    };
    builder.json(serde_json::json!({ "error": e.to_string() }))
}

fn respond<T: Serialize>(result: Result<T, EngineError>) -> HttpResponse {
    match result {
        Ok(v) => HttpResponse::Ok().json(v),
        Err(e) => {
            log::debug!("Request failed: {}", e);
            error_response(&e)
        }
    }
}

fn respond_created<T: Serialize>(result: Result<T, EngineError>) -> HttpResponse {
    match result {
        Ok(v) => HttpResponse::Created().json(v),
        Err(e) => {
            log::debug!("Request failed: {}", e);
            error_response(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "startup-rush",
    })
}

// Startups

#[post("/api/startups")]
async fn api_create_startup(state: AppState, body: Json<CreateStartupBody>) -> HttpResponse {
    let Some(year) = body.founding_year else {
        return error_response(&EngineError::MissingField("founding_year"));
    };
    respond_created(state.create_startup(&body.name, &body.slogan, year))
}

#[get("/api/startups")]
async fn api_list_startups(state: AppState) -> HttpResponse {
    respond(state.startups())
}

#[get("/api/startups/{id}")]
async fn api_get_startup(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.startup(path.id))
}

#[put("/api/startups/{id}")]
async fn api_update_startup(state: AppState, path: Path<IdPath>, body: Json<StartupPatch>) -> HttpResponse {
    respond(state.update_startup(path.id, body.into_inner()))
}

#[delete("/api/startups/{id}")]
async fn api_delete_startup(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.delete_startup(path.id))
}

#[get("/api/ranking")]
async fn api_ranking(state: AppState) -> HttpResponse {
    respond(state.ranking())
}

// Tournaments

#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<TournamentNameBody>) -> HttpResponse {
    respond_created(state.create_tournament(&body.name))
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    respond(state.tournaments())
}

#[get("/api/tournaments/latest")]
async fn api_latest_tournament(state: AppState) -> HttpResponse {
    respond(state.latest_tournament())
}

#[get("/api/tournaments/waiting")]
async fn api_waiting_tournament(state: AppState) -> HttpResponse {
    respond(state.waiting_tournament())
}

#[get("/api/tournaments/in-progress")]
async fn api_tournament_in_progress(state: AppState) -> HttpResponse {
    respond(state.tournament_in_progress())
}

#[get("/api/tournaments/open")]
async fn api_open_tournament(state: AppState) -> HttpResponse {
    respond(state.open_tournament())
}

/// Startups that can still be entered in the waiting tournament.
#[get("/api/tournaments/waiting/available-startups")]
async fn api_available_startups(state: AppState) -> HttpResponse {
    respond(state.available_startups())
}

#[post("/api/tournaments/advance")]
async fn api_advance_round(state: AppState) -> HttpResponse {
    respond(state.advance_round())
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.tournament(path.id))
}

#[put("/api/tournaments/{id}")]
async fn api_rename_tournament(
    state: AppState,
    path: Path<IdPath>,
    body: Json<TournamentNameBody>,
) -> HttpResponse {
    respond(state.rename_tournament(path.id, &body.name))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.delete_tournament(path.id))
}

#[post("/api/tournaments/{id}/startups")]
async fn api_admit_startup(state: AppState, path: Path<IdPath>, body: Json<AdmitStartupBody>) -> HttpResponse {
    respond_created(state.admit_startup(path.id, body.startup_id))
}

#[post("/api/tournaments/{id}/launch")]
async fn api_launch_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.launch_tournament(path.id))
}

#[get("/api/tournaments/{id}/battles/current")]
async fn api_current_battles(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.current_battles(path.id))
}

#[get("/api/tournaments/{id}/participants")]
async fn api_participants(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.participants(path.id))
}

#[get("/api/participations/{id}")]
async fn api_get_participation(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.participation(path.id))
}

// Battles

#[get("/api/battles")]
async fn api_list_battles(state: AppState) -> HttpResponse {
    respond(state.battles())
}

#[get("/api/battles/{id}")]
async fn api_get_battle(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.battle(path.id))
}

#[delete("/api/battles/{id}")]
async fn api_delete_battle(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.delete_battle(path.id))
}

#[post("/api/battles/{id}/start")]
async fn api_start_battle(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.start_battle(path.id))
}

#[post("/api/battles/{id}/resolve")]
async fn api_resolve_battle(state: AppState, path: Path<IdPath>, body: Json<ResolveBattleBody>) -> HttpResponse {
    respond(state.resolve_battle(path.id, &body.events))
}

/// Register all routes. Fixed tournament paths come before `/api/tournaments/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_startup)
        .service(api_list_startups)
        .service(api_get_startup)
        .service(api_update_startup)
        .service(api_delete_startup)
        .service(api_ranking)
        .service(api_create_tournament)
        .service(api_list_tournaments)
        .service(api_latest_tournament)
        .service(api_waiting_tournament)
        .service(api_tournament_in_progress)
        .service(api_open_tournament)
        .service(api_available_startups)
        .service(api_advance_round)
        .service(api_get_tournament)
        .service(api_rename_tournament)
        .service(api_delete_tournament)
        .service(api_admit_startup)
        .service(api_launch_tournament)
        .service(api_current_battles)
        .service(api_participants)
        .service(api_get_participation)
        .service(api_list_battles)
        .service(api_get_battle)
        .service(api_delete_battle)
        .service(api_start_battle)
        .service(api_resolve_battle);
}
