// src/handlers/sales.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        report::ReportPeriod,
        sale::{NewSalePayload, Sale, SaleKind},
    },
};

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Vendas",
    request_body = NewSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = Sale),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Produto informado não existe")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<NewSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state.sales_service.register_sale(payload).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListSalesQuery {
    #[validate(range(min = 1, max = 12, message = "Mês deve estar entre 1 e 12."))]
    pub mes: u32,

    #[validate(range(min = 2000, message = "Ano deve ser a partir de 2000."))]
    pub ano: i32,

    pub kind: Option<SaleKind>,
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Vendas",
    params(
        ("mes" = u32, Query, description = "Mês (1-12)"),
        ("ano" = i32, Query, description = "Ano (a partir de 2000)"),
        ("kind" = Option<SaleKind>, Query, description = "Filtra por tipo de venda")
    ),
    responses(
        (status = 200, description = "Vendas do mês, na ordem de registro", body = Vec<Sale>),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    Query(params): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate().map_err(AppError::ValidationError)?;
    let period = ReportPeriod::month(params.ano, params.mes)
        .ok_or_else(|| AppError::InvalidPeriod(format!("Mês inválido: {}", params.mes)))?;

    let sales = app_state.sales_repo.fetch_between(&period, params.kind).await?;

    Ok((StatusCode::OK, Json(sales)))
}
