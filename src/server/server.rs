//! Router and handlers
//!
//! Query flow per submission: fetch fresh collections, ask the
//! planner, sanitize its plan against sampled fields, interpret, and
//! record the query text in history. Planner failures terminate the
//! submission before the interpreter is ever invoked.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;

use crate::analytics::{
    analysis_options, classify_fields, distribution_summary, group_summary, scatter_summary,
    AnalysisKind,
};
use crate::history::{HistoryEntry, QueryHistory, SavedAnalyses, SavedAnalysis};
use crate::interpreter::Interpreter;
use crate::observability::{Logger, QueryTimer, Severity};
use crate::plan::sanitize_plan;
use crate::planner::{PlannerRequest, QueryPlanner, Relationship};
use crate::record::{infer_schema, FieldProbe, Row, SourceSet, StoredRecord};
use crate::sql::{execute, SqlOutcome, SqlStatement};
use crate::store::RecordStore;

use super::config::ServerConfig;
use super::errors::{ApiError, ApiResult};
use super::response::{
    QueryRequest, QueryResponse, SqlRequest, SqlResponse, TableSummary, TablesResponse,
};

/// Shared state behind every handler
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub planner: Arc<dyn QueryPlanner>,
    pub history: Arc<QueryHistory>,
    pub saved: Arc<SavedAnalyses>,
    /// Declared relationships forwarded to the planner
    pub relationships: Vec<Relationship>,
}

type ServerState = Arc<AppState>;

/// Builds the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tables", get(list_tables))
        .route("/api/records/:record_type", get(list_records).post(insert_record))
        .route("/api/record/:id", delete(delete_record))
        .route("/api/query", post(nl_query))
        .route("/api/sql", post(sql_query))
        .route("/api/analytics/:record_type", get(list_analytics).post(run_analytics))
        .route("/api/history", get(list_history).delete(clear_history))
        .route("/api/history/:id", delete(delete_history))
        .route("/api/history/:id/favorite", post(toggle_favorite))
        .route("/api/saved", get(list_saved).post(save_analysis))
        .route("/api/saved/:id", delete(delete_saved))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Binds and serves until shutdown
pub async fn serve(config: ServerConfig, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    Logger::log(Severity::Info, "server_started", &[("addr", &config.addr())]);
    axum::serve(listener, app).await
}

/// The natural-language query flow, callable without HTTP
pub async fn run_nl_query(state: &AppState, request: &QueryRequest) -> ApiResult<QueryResponse> {
    let timer = QueryTimer::start();

    // Resolve the table list: explicit selection or everything known
    let table_names = if request.tables.is_empty() {
        state.store.record_types()?
    } else {
        request.tables.clone()
    };
    if table_names.is_empty() {
        return Err(ApiError::BadRequest("no tables available to query".into()));
    }

    // Fetch fresh data per submission
    let mut collections: Vec<(String, Vec<StoredRecord>)> = Vec::new();
    for name in &table_names {
        collections.push((name.clone(), state.store.fetch(name)?));
    }

    let planner_request =
        PlannerRequest::build(&request.query, &collections, state.relationships.clone());
    let raw = state.planner.plan(&planner_request).await?;

    let mut source = SourceSet::new();
    for (name, records) in &collections {
        source.push_records(name.clone(), records);
    }
    let probe = FieldProbe::from_source(&source);
    let plan = sanitize_plan(&raw, &probe);
    let result = Interpreter::run(&source, &plan);

    if let Err(e) = state.history.record(&request.query, &table_names) {
        Logger::log(
            Severity::Warn,
            "history_record_failed",
            &[("reason", &e.to_string())],
        );
    }

    let sql_query = raw
        .sql_query
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("SELECT * FROM {};", table_names.join(", ")));
    let record_count = result.len();

    Logger::log(
        Severity::Info,
        "query_completed",
        &[
            ("rows", &record_count.to_string()),
            ("tables", &table_names.join(",")),
        ],
    );

    Ok(QueryResponse {
        natural_query: request.query.clone(),
        interpretation: if raw.interpretation.is_empty() {
            "Query processed successfully".to_string()
        } else {
            raw.interpretation
        },
        query_type: raw.query_type.unwrap_or_else(|| "select".to_string()),
        sql_query,
        data: result.rows,
        record_count,
        execution_time_ms: timer.elapsed_ms(),
        skipped_steps: result.skipped.iter().map(|s| s.describe()).collect(),
    })
}

async fn list_tables(State(state): State<ServerState>) -> ApiResult<Json<TablesResponse>> {
    let mut tables = Vec::new();
    for name in state.store.record_types()? {
        let (_, rows) = collection_rows(state.store.as_ref(), &name)?;
        let fields = infer_schema(&rows)
            .into_iter()
            .map(|(field, ty)| (field, ty.as_str().to_string()))
            .collect();
        tables.push(TableSummary {
            name,
            count: rows.len(),
            fields,
        });
    }
    Ok(Json(TablesResponse { tables }))
}

async fn list_records(
    State(state): State<ServerState>,
    Path(record_type): Path<String>,
) -> ApiResult<Json<Vec<StoredRecord>>> {
    Ok(Json(state.store.fetch(&record_type)?))
}

async fn insert_record(
    State(state): State<ServerState>,
    Path(record_type): Path<String>,
    Json(data): Json<Value>,
) -> ApiResult<Json<StoredRecord>> {
    Ok(Json(state.store.insert(&record_type, data)?))
}

async fn delete_record(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.store.delete(&id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

async fn nl_query(
    State(state): State<ServerState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<Json<QueryResponse>> {
    Ok(Json(run_nl_query(&state, &request).await?))
}

async fn sql_query(
    State(state): State<ServerState>,
    Json(request): Json<SqlRequest>,
) -> ApiResult<Json<SqlResponse>> {
    let timer = QueryTimer::start();
    let statement = SqlStatement::parse(&request.query)?;
    let outcome = execute(state.store.as_ref(), &statement)?;

    let response = match outcome {
        SqlOutcome::Rows(rows) => SqlResponse {
            success: true,
            operation: "SELECT".into(),
            data: Some(rows),
            rows_affected: None,
            message: None,
            execution_time_ms: timer.elapsed_ms(),
        },
        SqlOutcome::Affected {
            operation,
            rows,
            message,
        } => SqlResponse {
            success: true,
            operation: operation.into(),
            data: None,
            rows_affected: Some(rows),
            message: Some(message),
            execution_time_ms: timer.elapsed_ms(),
        },
    };
    Ok(Json(response))
}

async fn list_analytics(
    State(state): State<ServerState>,
    Path(record_type): Path<String>,
) -> ApiResult<Json<Value>> {
    let (schema, rows) = collection_rows(state.store.as_ref(), &record_type)?;
    let classes = classify_fields(&schema, &rows);
    let options = analysis_options(&classes);
    Ok(Json(serde_json::json!({
        "numericFields": classes.numeric,
        "categoricalFields": classes.categorical,
        "options": options,
    })))
}

async fn run_analytics(
    State(state): State<ServerState>,
    Path(record_type): Path<String>,
    Json(kind): Json<AnalysisKind>,
) -> ApiResult<Json<Value>> {
    let (_, rows) = collection_rows(state.store.as_ref(), &record_type)?;

    let summary = match &kind {
        AnalysisKind::Scatter { x, y } => {
            scatter_summary(&rows, x, y).map(|s| serde_json::to_value(s).unwrap_or(Value::Null))
        }
        AnalysisKind::Distribution { field } => distribution_summary(&rows, field)
            .map(|s| serde_json::to_value(s).unwrap_or(Value::Null)),
        AnalysisKind::GroupComparison { category, value } => group_summary(&rows, category, value)
            .map(|s| serde_json::to_value(s).unwrap_or(Value::Null)),
    };

    summary.map(Json).ok_or_else(|| {
        ApiError::BadRequest("not enough data for the requested analysis".into())
    })
}

async fn list_history(State(state): State<ServerState>) -> ApiResult<Json<Vec<HistoryEntry>>> {
    Ok(Json(state.history.list()?))
}

async fn clear_history(State(state): State<ServerState>) -> ApiResult<Json<Value>> {
    state.history.clear(true)?;
    Ok(Json(serde_json::json!({ "cleared": true })))
}

async fn delete_history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.history.remove(&id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

async fn toggle_favorite(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let is_favorite = state.history.toggle_favorite(&id)?;
    Ok(Json(serde_json::json!({ "isFavorite": is_favorite })))
}

/// Body for saving an analytics view
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveAnalysisRequest {
    name: String,
    description: Option<String>,
    analysis_type: String,
    field1: String,
    field2: Option<String>,
}

async fn list_saved(State(state): State<ServerState>) -> ApiResult<Json<Vec<SavedAnalysis>>> {
    Ok(Json(state.saved.list()?))
}

async fn save_analysis(
    State(state): State<ServerState>,
    Json(request): Json<SaveAnalysisRequest>,
) -> ApiResult<Json<Value>> {
    let id = state.saved.save(
        request.name,
        request.description,
        request.analysis_type,
        request.field1,
        request.field2,
    )?;
    Ok(Json(serde_json::json!({ "id": id })))
}

async fn delete_saved(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.saved.remove(&id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

fn collection_rows(
    store: &dyn RecordStore,
    record_type: &str,
) -> ApiResult<(Vec<String>, Vec<Row>)> {
    let records = store.fetch(record_type)?;
    let schema = records
        .first()
        .map(|r| r.field_names())
        .unwrap_or_default();
    let rows = records
        .iter()
        .filter_map(|r| r.data.as_object().cloned())
        .collect();
    Ok((schema, rows))
}
