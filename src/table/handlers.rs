use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    service::TableService,
    types::{ScoresUpdateRequest, TableCreateRequest, TableListQuery},
    ScoreTable, TableDraft, TableError,
};
use crate::shared::{AppError, AppState};

fn table_service(state: &AppState) -> TableService {
    TableService::new(state.table_repository.clone())
}

fn draft_from_request(request: &TableCreateRequest) -> Result<TableDraft, TableError> {
    let mut draft = match &request.players {
        None => TableDraft::new(request.game),
        Some(players) => {
            let mut draft = TableDraft::with_players(request.game, Vec::new());
            for player in players {
                draft.add_player(player)?;
            }
            if draft.players().is_empty() {
                return Err(TableError::LastPlayer);
            }
            draft
        }
    };
    draft.set_name(request.name.clone())?;
    Ok(draft)
}

/// GET /tables?game=SevenCards
#[instrument(name = "list_tables", skip(state))]
pub async fn list_tables(
    State(state): State<AppState>,
    Query(query): Query<TableListQuery>,
) -> Result<Json<Vec<ScoreTable>>, AppError> {
    let tables = table_service(&state).list_tables(query.game).await?;
    info!(table_count = tables.len(), "Tables listed successfully");
    Ok(Json(tables))
}

/// POST /tables
#[instrument(name = "create_table", skip(state, request), fields(game = %request.game))]
pub async fn create_table(
    State(state): State<AppState>,
    Json(request): Json<TableCreateRequest>,
) -> Result<(StatusCode, Json<ScoreTable>), AppError> {
    let service = table_service(&state);
    let draft = draft_from_request(&request)?;
    let id = service.save_draft(&draft, None).await?;

    let table = match request.scores {
        Some(scores) => service.update_scores(id, scores).await?,
        None => service.get_table(id).await?,
    };

    info!(table_id = %table.id, name = %table.name, "Table created successfully");
    Ok((StatusCode::CREATED, Json(table)))
}

/// GET /tables/:id
#[instrument(name = "get_table", skip(state))]
pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScoreTable>, AppError> {
    Ok(Json(table_service(&state).get_table(id).await?))
}

/// PUT /tables/:id/scores
#[instrument(name = "update_scores", skip(state, request))]
pub async fn update_scores(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ScoresUpdateRequest>,
) -> Result<Json<ScoreTable>, AppError> {
    let table = table_service(&state)
        .update_scores(id, request.scores)
        .await?;
    Ok(Json(table))
}

/// DELETE /tables/:id
#[instrument(name = "delete_table", skip(state))]
pub async fn delete_table(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    table_service(&state).delete_table(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
