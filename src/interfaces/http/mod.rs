use crate::application::use_cases::location_import::{
    ImportUpload, LocationImportUseCase, ReportRows, ReportWriter, TemplateWriter,
    TEMPLATE_CSV_FILE, TEMPLATE_XLSX_FILE,
};
use crate::domain::error::AppError;
use crate::domain::location::{
    BulkInsertOptions, FailedRow, LocationStatus, RejectedRow, SchemaCatalog,
};
use crate::infrastructure::config::AppConfig;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct HttpState {
    pub import_use_case: Arc<LocationImportUseCase>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// File extension; falls back to the extension of `file_name`
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: LocationStatus,
    #[serde(default = "default_skip_duplicates")]
    pub skip_duplicates: bool,
    #[serde(default)]
    pub user_id: String,
}

fn default_skip_duplicates() -> bool {
    true
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn build_upload(
    format: Option<String>,
    file_name: Option<String>,
    bytes: Vec<u8>,
) -> ImportUpload {
    let mut upload = match file_name {
        Some(name) => ImportUpload::from_file_name(&name, bytes),
        None => ImportUpload::new("", bytes),
    };
    if let Some(format) = format {
        upload.extension = format;
    }
    upload
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[get("/locations/schema")]
async fn schema() -> impl Responder {
    HttpResponse::Ok().json(SchemaCatalog::field_rules())
}

#[get("/locations/template.csv")]
async fn template_csv() -> impl Responder {
    match TemplateWriter::starter_csv() {
        Ok(bytes) => attachment(CSV_CONTENT_TYPE, TEMPLATE_CSV_FILE, bytes),
        Err(e) => error_response(&e),
    }
}

#[get("/locations/template.xlsx")]
async fn template_xlsx() -> impl Responder {
    match TemplateWriter::starter_xlsx() {
        Ok(bytes) => attachment(XLSX_CONTENT_TYPE, TEMPLATE_XLSX_FILE, bytes),
        Err(e) => error_response(&e),
    }
}

#[post("/locations/import")]
async fn import_locations(
    data: web::Data<HttpState>,
    query: web::Query<ImportQuery>,
    body: web::Bytes,
) -> impl Responder {
    let query = query.into_inner();
    tracing::info!(
        format = ?query.format,
        file_name = ?query.file_name,
        bytes = body.len(),
        status = query.status.as_str(),
        skip_duplicates = query.skip_duplicates,
        "Import requested"
    );

    let options = BulkInsertOptions {
        target_status: query.status,
        skip_duplicates: query.skip_duplicates,
        acting_user_id: query.user_id,
    };
    let upload = build_upload(query.format, query.file_name, body.to_vec());

    match data.import_use_case.execute(upload, options).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

#[post("/locations/import/preview")]
async fn preview_import(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    let query = query.into_inner();
    let upload = build_upload(query.format, query.file_name, body.to_vec());

    match data.import_use_case.preview(upload) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

#[post("/locations/reports/validation")]
async fn validation_report(rows: web::Json<Vec<RejectedRow>>) -> impl Responder {
    let rows = ReportRows::Validation(&rows);
    match ReportWriter::write_report(rows) {
        Ok(bytes) => attachment(CSV_CONTENT_TYPE, rows.file_name(), bytes),
        Err(e) => error_response(&e),
    }
}

#[post("/locations/reports/failures")]
async fn failure_report(rows: web::Json<Vec<FailedRow>>) -> impl Responder {
    let rows = ReportRows::Failures(&rows);
    match ReportWriter::write_report(rows) {
        Ok(bytes) => attachment(CSV_CONTENT_TYPE, rows.file_name(), bytes),
        Err(e) => error_response(&e),
    }
}

fn attachment(content_type: &str, file_name: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type.to_string())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(bytes)
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        AppError::UnsupportedFormat(_) | AppError::ValidationError(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().json(body)
        }
        _ => {
            tracing::error!(error = %err, "Request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health)
            .service(schema)
            .service(template_csv)
            .service(template_xlsx)
            .service(import_locations)
            .service(preview_import)
            .service(validation_report)
            .service(failure_report),
    );
}

pub fn start_server(state: HttpState, config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let max_upload_bytes = config.max_upload_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .app_data(web::JsonConfig::default().limit(max_upload_bytes))
            .configure(configure)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run();

    Ok(server)
}
