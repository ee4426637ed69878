//! OpenAPI specification for the Codegauge server.

use utoipa::OpenApi;

use codegauge_core::{Analysis, Issue, Metrics, ProjectSummary, Severity};

use crate::routes::{
    AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse, ProjectAnalyzeRequest,
    ProjectAnalyzeResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::analyze,
        crate::routes::analyze_project,
        crate::routes::health,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            AnalyzeRequest,
            AnalyzeResponse,
            ProjectAnalyzeRequest,
            ProjectAnalyzeResponse,
            HealthResponse,
            ErrorResponse,
            Analysis,
            Metrics,
            Issue,
            Severity,
            ProjectSummary
        )
    ),
    tags(
        (name = "analysis", description = "Code quality analysis"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Codegauge server.
pub struct ApiDoc;
