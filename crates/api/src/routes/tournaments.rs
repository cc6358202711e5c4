use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_director;
use crate::error::AppError;
use crate::outcome::Outcome;
use crate::services::{chips, lifecycle, seating};
use crate::state::AppState;
use infra::models::derive_effective_status;
use infra::repos::registrations::TournamentPlayerRow;
use infra::repos::table_assignments::SeatedPlayerRow;
use infra::repos::tournaments::{
    self, CreateTournamentData, TournamentSummaryRow, UpdateTournamentData,
};
use infra::repos::{registrations, table_assignments, tournament_tables};
use infra::repos::{EffectiveStatus, TournamentStatus};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DirectorAction {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TournamentPayload {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub buy_in_cost: Option<i32>,
    pub buy_in_chips: Option<i32>,
    #[serde(default)]
    pub rebuy_cost: i32,
    #[serde(default)]
    pub rebuy_chips: i32,
    #[serde(default)]
    pub addon_cost: i32,
    #[serde(default)]
    pub addon_chips: i32,
    pub level_minutes: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub late_reg_end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChipsRequest {
    pub user_id: Uuid,
    pub player_user_id: Uuid,
    pub chips: Option<i32>,
    #[serde(default)]
    pub rebuys: i32,
    #[serde(default)]
    pub addons: i32,
}

/// Listing view: the derived status rides alongside the persisted one.
#[derive(Debug, Serialize)]
pub struct TournamentListItem {
    pub id: Uuid,
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub rebuy_cost: i32,
    pub rebuy_chips: i32,
    pub addon_cost: i32,
    pub addon_chips: i32,
    pub level_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub late_reg_end_time: DateTime<Utc>,
    pub registered_players: i64,
    pub status: EffectiveStatus,
    pub db_status: TournamentStatus,
}

impl TournamentListItem {
    fn from_summary(row: TournamentSummaryRow, now: DateTime<Utc>) -> Self {
        let status =
            derive_effective_status(row.status, row.start_time, row.late_reg_end_time, now);
        Self {
            id: row.id,
            name: row.name,
            buy_in_cost: row.buy_in_cost,
            buy_in_chips: row.buy_in_chips,
            rebuy_cost: row.rebuy_cost,
            rebuy_chips: row.rebuy_chips,
            addon_cost: row.addon_cost,
            addon_chips: row.addon_chips,
            level_minutes: row.level_minutes,
            start_time: row.start_time,
            late_reg_end_time: row.late_reg_end_time,
            registered_players: row.registered_players,
            status,
            db_status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TournamentDetail {
    pub id: Uuid,
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub rebuy_cost: i32,
    pub rebuy_chips: i32,
    pub addon_cost: i32,
    pub addon_chips: i32,
    pub level_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub late_reg_end_time: DateTime<Utc>,
    pub registered_players: usize,
    pub status: EffectiveStatus,
    pub db_status: TournamentStatus,
    pub total_chips: i64,
    pub players: Vec<TournamentPlayerRow>,
}

#[derive(Debug, Serialize)]
pub struct SeatingResponse {
    pub success: bool,
    pub message: String,
    pub tables_count: i32,
    pub players_count: usize,
    pub new_players_assigned: usize,
}

#[derive(Debug, Serialize)]
pub struct TableView {
    pub id: Uuid,
    pub table_number: i32,
    pub max_seats: i32,
    pub current_players: i64,
    pub players: Vec<SeatedPlayerRow>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TournamentListItem>>, AppError> {
    let rows = match params.status.as_deref() {
        Some("completed") => tournaments::list_completed(&state.db).await?,
        _ => tournaments::list_open(&state.db).await?,
    };

    let now = Utc::now();
    let items = rows
        .into_iter()
        .map(|row| TournamentListItem::from_summary(row, now))
        .collect();

    Ok(Json(items))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<TournamentPayload>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    let data = CreateTournamentData {
        created_by: req.user_id,
        name: require(req.name, "name")?,
        buy_in_cost: require(req.buy_in_cost, "buy_in_cost")?,
        buy_in_chips: require(req.buy_in_chips, "buy_in_chips")?,
        rebuy_cost: req.rebuy_cost,
        rebuy_chips: req.rebuy_chips,
        addon_cost: req.addon_cost,
        addon_chips: req.addon_chips,
        level_minutes: req.level_minutes.unwrap_or(15),
        start_time: require(req.start_time, "start_time")?,
        late_reg_end_time: require(req.late_reg_end_time, "late_reg_end_time")?,
    };

    tournaments::create(&state.db, data).await?;
    Ok(Json(Outcome::success("Tournament created")))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<TournamentDetail>, AppError> {
    let tournament = tournaments::get(&state.db, tournament_id)
        .await?
        .ok_or(AppError::NotFound("Tournament"))?;

    let mut players = registrations::list_players(&state.db, tournament_id).await?;

    // Pre-game the list reads alphabetically; once chips are in play the
    // big stacks go on top.
    let running = matches!(
        tournament.status,
        TournamentStatus::Active | TournamentStatus::ActiveNoLateReg
    );
    if running {
        players.sort_by(|a, b| b.chips.cmp(&a.chips));
    }

    let total_chips: i64 = players.iter().map(|p| i64::from(p.chips)).sum();
    let now = Utc::now();

    Ok(Json(TournamentDetail {
        id: tournament.id,
        name: tournament.name,
        buy_in_cost: tournament.buy_in_cost,
        buy_in_chips: tournament.buy_in_chips,
        rebuy_cost: tournament.rebuy_cost,
        rebuy_chips: tournament.rebuy_chips,
        addon_cost: tournament.addon_cost,
        addon_chips: tournament.addon_chips,
        level_minutes: tournament.level_minutes,
        start_time: tournament.start_time,
        late_reg_end_time: tournament.late_reg_end_time,
        registered_players: players.len(),
        status: derive_effective_status(
            tournament.status,
            tournament.start_time,
            tournament.late_reg_end_time,
            now,
        ),
        db_status: tournament.status,
        total_chips,
        players,
    }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<TournamentPayload>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    let data = UpdateTournamentData {
        name: require(req.name, "name")?,
        buy_in_cost: require(req.buy_in_cost, "buy_in_cost")?,
        buy_in_chips: require(req.buy_in_chips, "buy_in_chips")?,
        rebuy_cost: req.rebuy_cost,
        rebuy_chips: req.rebuy_chips,
        addon_cost: req.addon_cost,
        addon_chips: req.addon_chips,
        level_minutes: req.level_minutes.unwrap_or(15),
        start_time: require(req.start_time, "start_time")?,
        late_reg_end_time: require(req.late_reg_end_time, "late_reg_end_time")?,
    };

    tournaments::update(&state.db, tournament_id, data)
        .await?
        .ok_or(AppError::NotFound("Tournament"))?;

    Ok(Json(Outcome::success("Tournament updated")))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    lifecycle::delete(&state.db, tournament_id).await?;
    Ok(Json(Outcome::success("Tournament deleted")))
}

pub async fn start(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    lifecycle::start(&state.db, tournament_id).await?;
    Ok(Json(Outcome::success(
        "Tournament started. Late registration is open.",
    )))
}

pub async fn close_late_reg(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    lifecycle::close_late_registration(&state.db, tournament_id).await?;
    Ok(Json(Outcome::success("Late registration closed")))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    lifecycle::complete(&state.db, tournament_id).await?;
    Ok(Json(Outcome::success("Tournament completed")))
}

pub async fn update_chips(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<UpdateChipsRequest>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    let chip_count = req
        .chips
        .ok_or_else(|| AppError::Validation("Chip count is required".into()))?;

    chips::update_chips(
        &state.db,
        tournament_id,
        req.player_user_id,
        chip_count,
        req.rebuys,
        req.addons,
    )
    .await?;

    Ok(Json(Outcome::success("Chips updated")))
}

pub async fn assign_tables(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<SeatingResponse>, AppError> {
    require_director(&state.db, req.user_id).await?;
    let result = seating::assign_tables(&state.db, tournament_id).await?;

    Ok(Json(SeatingResponse {
        success: true,
        message: format!(
            "Assigned {} players across {} tables",
            result.new_players_assigned, result.tables_count
        ),
        tables_count: result.tables_count,
        players_count: result.players_count,
        new_players_assigned: result.new_players_assigned,
    }))
}

pub async fn tables(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<Vec<TableView>>, AppError> {
    let tables = tournament_tables::list_with_counts(&state.db, tournament_id).await?;

    let mut views = Vec::with_capacity(tables.len());
    for table in tables {
        let players = table_assignments::list_seated_for_table(&state.db, table.id).await?;
        views.push(TableView {
            id: table.id,
            table_number: table.table_number,
            max_seats: table.max_seats,
            current_players: table.seated_players,
            players,
        });
    }

    Ok(Json(views))
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Field '{field}' is required")))
}
