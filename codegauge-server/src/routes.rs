//! HTTP handlers for the Codegauge server.

use std::path::Path;

use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use codegauge_core::{
    Analysis, Analyzer, Error, Issue, ProjectInspector, ProjectSummary, StdFileSystem,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::openapi::ApiDoc;
use crate::policy::ScanPolicy;

/// Shared application state for handlers.
pub struct AppState {
    /// Quality scoring engine shared across requests.
    pub analyzer: Analyzer,
    /// Allow-list for project scan paths.
    pub policy: ScanPolicy,
}

impl AppState {
    /// Build the state from environment configuration.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Self {
        Self {
            analyzer: Analyzer::new(),
            policy: ScanPolicy::from_env(),
        }
    }
}

/// Request payload for single-file analysis.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// File name the content was submitted under.
    pub filename: String,
    /// Raw text content to analyze.
    pub content: String,
}

/// Response payload for single-file analysis.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Request status, `success` on completion.
    pub status: String,
    /// File name the analysis was produced for.
    pub filename: String,
    /// Full quality assessment.
    pub analysis: Analysis,
    /// ISO-8601 response timestamp.
    pub timestamp: String,
}

/// Request payload for project-wide analysis.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectAnalyzeRequest {
    /// Project root to scan.
    pub path: String,
}

/// Response payload for project-wide analysis.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectAnalyzeResponse {
    /// Request status, `success` on completion.
    pub status: String,
    /// Project root the scan was run against.
    pub project: String,
    /// Aggregate statistics.
    pub summary: ProjectSummary,
    /// Issue list capped for display, each tagged with its file path.
    pub issues: Vec<Issue>,
    /// Project-level recommendations.
    pub recommendations: Vec<String>,
    /// ISO-8601 response timestamp.
    pub timestamp: String,
}

/// Health check response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Server status, `ok` when serving.
    pub status: String,
    /// Server version.
    pub version: String,
    /// ISO-8601 response timestamp.
    pub timestamp: String,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        message: message.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result", body = AnalyzeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/analyze")]
/// Analyze a single file submitted as raw text.
pub async fn analyze(
    state: web::Data<AppState>,
    payload: web::Json<AnalyzeRequest>,
) -> impl Responder {
    if payload.filename.trim().is_empty() {
        return bad_request("filename is required");
    }
    let analysis = state.analyzer.analyze(&payload.filename, &payload.content);
    HttpResponse::Ok().json(AnalyzeResponse {
        status: "success".to_string(),
        filename: payload.filename.clone(),
        analysis,
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    post,
    path = "/analyze-project",
    request_body = ProjectAnalyzeRequest,
    responses(
        (status = 200, description = "Project analysis result", body = ProjectAnalyzeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Path outside scan roots", body = ErrorResponse),
        (status = 404, description = "Path not found", body = ErrorResponse),
        (status = 500, description = "Scan failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/analyze-project")]
/// Analyze every recognized file under a project directory.
pub async fn analyze_project(
    state: web::Data<AppState>,
    payload: web::Json<ProjectAnalyzeRequest>,
) -> impl Responder {
    let path = payload.path.trim().to_string();
    if path.is_empty() {
        return bad_request("project path is required");
    }
    if !state.policy.allows(Path::new(&path)) {
        return HttpResponse::Forbidden().json(ErrorResponse {
            message: format!("{path} is outside the configured scan roots"),
        });
    }

    let scan_path = path.clone();
    let result = web::block(move || {
        let inspector = ProjectInspector::new(StdFileSystem::new());
        inspector.analyze_project(Path::new(&scan_path))
    })
    .await;

    match result {
        Ok(Ok(report)) => HttpResponse::Ok().json(ProjectAnalyzeResponse {
            status: "success".to_string(),
            project: report.project,
            summary: report.summary,
            issues: report.issues,
            recommendations: report.recommendations,
            timestamp: Utc::now().to_rfc3339(),
        }),
        Ok(Err(Error::NotFound(missing))) => HttpResponse::NotFound().json(ErrorResponse {
            message: format!("path not found: {}", missing.display()),
        }),
        Ok(Err(err)) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: err.to_string(),
        }),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("scan task failed: {err}"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server health", body = HealthResponse)
    ),
    tag = "system"
)]
#[get("/api/health")]
/// Report server health and version.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
