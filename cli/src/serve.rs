//! HTTP upload server.
//!
//! Two routes, mirroring the browser front end:
//! - `POST /subir` — multipart upload of one or more `.xml` files under the
//!   `archivo` field; responds with the XLSX artifact as an attachment. One
//!   file takes the single-document path (a bad document fails the request),
//!   two or more take the batch path (bad documents are skipped).
//! - `POST /exportar-editor` — JSON array of selected fields, exported to a
//!   single-sheet workbook.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use cfdix::workbook::XLSX_MIME;
use cfdix::{Error, Export, ExtractorService, SelectedField, ServiceConfig};

/// Build the router and serve it until shutdown.
pub async fn run(port: u16, config: ServiceConfig) -> Result<(), String> {
    let max_payload = config.max_payload_bytes;
    let service = Arc::new(ExtractorService::new(config));

    let app = Router::new()
        .route("/subir", post(subir))
        .route("/exportar-editor", post(exportar_editor))
        .layer(DefaultBodyLimit::max(max_payload))
        .with_state(service);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("bind {addr}: {e}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.map_err(|e| e.to_string())
}

async fn subir(
    State(service): State<Arc<ExtractorService>>,
    mut multipart: Multipart,
) -> Response {
    let mut documents: Vec<Vec<u8>> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        };

        if field.name() != Some("archivo") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.ends_with(".xml") {
            return (
                StatusCode::BAD_REQUEST,
                "Formato de archivo no válido. Solo se aceptan XML.".to_string(),
            )
                .into_response();
        }

        match field.bytes().await {
            Ok(bytes) => documents.push(bytes.to_vec()),
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        }
    }

    // Exactly one file goes down the single-document path so the caller gets
    // an explicit error for an unusable document; several files aggregate.
    let result = match documents.as_slice() {
        [] => Err(Error::InvalidInput("no se recibió ningún archivo".to_string())),
        [single] => service.process_document(single),
        _ => service.process_batch(&documents),
    };

    match result {
        Ok(export) => attachment_response(export),
        Err(err) => error_response(err),
    }
}

async fn exportar_editor(
    State(service): State<Arc<ExtractorService>>,
    Json(fields): Json<Vec<SelectedField>>,
) -> Response {
    match service.export_fields(&fields) {
        Ok(export) => attachment_response(export),
        Err(err) => error_response(err),
    }
}

fn attachment_response(export: Export) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.data,
    )
        .into_response()
}

fn error_response(err: Error) -> Response {
    let status = match err {
        Error::MalformedDocument(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        Error::Serialization(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, format!("Error al procesar el XML: {err}")).into_response()
}
