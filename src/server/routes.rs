//! HTTP routes
//!
//! Thin handlers that extract the request fields, hand them to [`Storage`]
//! and shape the response.

use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::storage::Storage;
use crate::transfer::file_body_stream;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Optional `?path=` query parameter, empty means the storage root
#[derive(Debug, Default, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

/// Registers every route; shared by the real server and the tests.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected malformed JSON body: {err}");
        ApiError::BadRequest("Invalid request".into()).into()
    }))
    .service(index)
    .service(health)
    .service(upload_file)
    .service(download_file)
    .service(list_files)
    .service(create_folder);
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[post("/upload/{filename}")]
async fn upload_file(
    filename: web::Path<String>,
    query: web::Query<PathQuery>,
    payload: web::Payload,
    storage: web::Data<Storage>,
) -> Result<HttpResponse, ApiError> {
    let filename = filename.into_inner();
    let uploaded = storage.upload(&query.path, &filename, payload).await?;

    Ok(HttpResponse::Created()
        .content_type(ContentType::plaintext())
        .body(format!("File {} uploaded successfully", uploaded.file_name)))
}

#[get("/download/{filename:.*}")]
async fn download_file(
    filename: web::Path<String>,
    storage: web::Data<Storage>,
) -> Result<HttpResponse, ApiError> {
    let download = storage.open_download(&filename).await?;

    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(download.file_name)],
    };

    Ok(HttpResponse::Ok()
        .content_type(ContentType::octet_stream())
        .insert_header(disposition)
        .no_chunking(download.size)
        .streaming(file_body_stream(download.file, storage.buffer_size())))
}

#[get("/files")]
async fn list_files(
    query: web::Query<PathQuery>,
    storage: web::Data<Storage>,
) -> Result<HttpResponse, ApiError> {
    let entries = storage.list(&query.path).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[post("/create-folder")]
async fn create_folder(
    request: web::Json<CreateFolderRequest>,
    storage: web::Data<Storage>,
) -> Result<HttpResponse, ApiError> {
    let CreateFolderRequest { name, path } = request.into_inner();
    let created = storage.create_folder(&path, &name).await?;

    Ok(HttpResponse::Created()
        .content_type(ContentType::plaintext())
        .body(format!("Folder {} created successfully", created.name)))
}
