//! API routes for tcgend
//!
//! One pipeline run per /v1/generate request: PDF text extraction,
//! prompt assembly, the model call, table extraction, normalization
//! and, on request, the spreadsheet artifact. An unparseable response
//! is a valid empty result, not a failure.

use crate::pdf;
use crate::server::AppState;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tcgen_common::{
    artifact_filename, build_prompt, extract_table, flatten_prior_table, normalize_rows,
    render_workbook, DiffTag, GenerationMode, TestCase, XLSX_MIME,
};
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

// ============================================================================
// UI and health routes
// ============================================================================

pub fn ui_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="ko">
<head><meta charset="utf-8"><title>QA TC Generator</title></head>
<body>
<h1>테스트 케이스 생성기</h1>
<form action="/v1/generate" method="post" enctype="multipart/form-data">
  <p>기획서 PDF: <input type="file" name="plan" accept=".pdf" multiple required></p>
  <p>기존 TC 엑셀 (선택): <input type="file" name="prior" accept=".xlsx"></p>
  <p><label><input type="checkbox" name="format" value="xlsx" checked> 엑셀 파일로 다운로드</label></p>
  <p><button type="submit">테스트 케이스 생성 시작</button></p>
</form>
</body>
</html>
"#;

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Generate route
// ============================================================================

pub fn generate_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/generate", post(generate))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Xlsx,
}

#[derive(Serialize)]
struct PreviewRow {
    diff: DiffTag,
    #[serde(flatten)]
    case: TestCase,
}

#[derive(Serialize)]
struct GeneratePreview {
    mode: GenerationMode,
    count: usize,
    rows: Vec<PreviewRow>,
}

async fn generate(
    State(state): State<AppStateArc>,
    mut multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let mut plan_files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut prior_bytes: Option<Vec<u8>> = None;
    let mut format = OutputFormat::Json;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "plan" => {
                let name = field.file_name().unwrap_or("plan.pdf").to_string();
                let bytes = field.bytes().await.map_err(bad_request)?;
                if !bytes.is_empty() {
                    plan_files.push((name, bytes.to_vec()));
                }
            }
            "prior" => {
                let bytes = field.bytes().await.map_err(bad_request)?;
                if !bytes.is_empty() {
                    prior_bytes = Some(bytes.to_vec());
                }
            }
            "format" => {
                let value = field.text().await.map_err(bad_request)?;
                if value.trim() == "xlsx" {
                    format = OutputFormat::Xlsx;
                }
            }
            _ => {}
        }
    }

    if plan_files.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "no planning documents uploaded".to_string(),
        ));
    }

    info!("  Generating from {} planning document(s)", plan_files.len());
    let plan_text = pdf::extract_plan_text(&plan_files);
    if plan_text.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "no text could be extracted from the uploaded documents".to_string(),
        ));
    }

    // A prior table that cannot be read degrades to new-generation mode;
    // the failure is per-file, never fatal to the run.
    let prior_text = prior_bytes.as_deref().and_then(|bytes| {
        match flatten_prior_table(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to read prior spreadsheet: {}", e);
                None
            }
        }
    });
    let mode = if prior_text.is_some() {
        GenerationMode::Update
    } else {
        GenerationMode::New
    };

    let prompt = build_prompt(&plan_text, prior_text.as_deref());
    let raw = state.gemini.generate(&prompt).await.map_err(|e| {
        error!("  Model call failed: {}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    let mut rows = extract_table(&raw);
    if rows.is_empty() {
        info!("  Response contained no parseable table");
        return Ok(Json(GeneratePreview {
            mode,
            count: 0,
            rows: Vec::new(),
        })
        .into_response());
    }

    normalize_rows(&mut rows, mode);
    let count = rows.len();
    info!("  Generated {} test cases", count);

    match format {
        OutputFormat::Json => {
            let rows = rows
                .into_iter()
                .map(|case| PreviewRow {
                    diff: DiffTag::from_note(&case.note),
                    case,
                })
                .collect();
            Ok(Json(GeneratePreview { mode, count, rows }).into_response())
        }
        OutputFormat::Xlsx => {
            let bytes = render_workbook(&rows)
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            let filename = artifact_filename(Local::now());
            let headers = [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ];
            Ok((headers, bytes).into_response())
        }
    }
}

fn bad_request<E: Display>(e: E) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}
