use crate::report::{render_workbook, ReportSnapshot, REPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::schemas::{api_error, ApiError, AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::{error, info, instrument, trace};

/// Download the ledger as an xlsx workbook
#[utoipa::path(
    get,
    path = "/export/excel",
    tag = "export",
    responses(
        (status = 200, description = "xlsx workbook with Resumen, Gastos and Ingresos sheets"),
        (status = 500, description = "Workbook could not be generated", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn export_excel(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    trace!("Entering export_excel function");

    let workbook = match ReportSnapshot::capture(&state.db).await {
        Ok(snapshot) => render_workbook(&snapshot),
        Err(e) => Err(e),
    };

    match workbook {
        Ok(bytes) => {
            info!("Exporting workbook of {} bytes", bytes.len());
            let disposition = format!("attachment; filename={}", REPORT_FILE_NAME);
            Ok((
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            ))
        }
        Err(e) => {
            error!("Failed to export workbook: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error al generar el archivo Excel",
            ))
        }
    }
}
