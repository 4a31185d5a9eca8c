// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::report::{DayRevenue, GeneralReport, ProductProfit, ReportPeriod},
    services::reporting,
};

#[derive(Debug, Deserialize, Validate)]
pub struct MonthQuery {
    #[validate(range(min = 1, max = 12, message = "Mês deve estar entre 1 e 12."))]
    pub mes: u32,

    #[validate(range(min = 2000, message = "Ano deve ser a partir de 2000."))]
    pub ano: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct YearQuery {
    #[validate(range(min = 2000, message = "Ano deve ser a partir de 2000."))]
    pub ano: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReportResponse {
    #[schema(example = "2025-07")]
    pub period: String,
    pub report: GeneralReport,
}

fn month_period(params: &MonthQuery) -> Result<ReportPeriod, AppError> {
    ReportPeriod::month(params.ano, params.mes)
        .ok_or_else(|| AppError::InvalidPeriod(format!("Mês inválido: {}", params.mes)))
}

// GET /api/reports/monthly
#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    tag = "Relatórios",
    params(
        ("mes" = u32, Query, description = "Mês (1-12)"),
        ("ano" = i32, Query, description = "Ano (a partir de 2000)")
    ),
    responses(
        (status = 200, description = "Resumo financeiro do mês", body = PeriodReportResponse),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Nenhum registro no período")
    )
)]
pub async fn monthly_report(
    State(app_state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate().map_err(AppError::ValidationError)?;
    let period = month_period(&params)?;

    let sales = app_state.report_source.fetch_sales(&period, None).await?;
    let report = reporting::general_report(&sales)
        .ok_or_else(|| AppError::NoRecordsForPeriod(period.month_label()))?;

    Ok((
        StatusCode::OK,
        Json(PeriodReportResponse {
            period: period.month_label(),
            report,
        }),
    ))
}

// GET /api/reports/annual
#[utoipa::path(
    get,
    path = "/api/reports/annual",
    tag = "Relatórios",
    params(
        ("ano" = i32, Query, description = "Ano (a partir de 2000)")
    ),
    responses(
        (status = 200, description = "Resumo financeiro do ano", body = PeriodReportResponse),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Nenhum registro no período")
    )
)]
pub async fn annual_report(
    State(app_state): State<AppState>,
    Query(params): Query<YearQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate().map_err(AppError::ValidationError)?;
    let period = ReportPeriod::calendar_year(params.ano)
        .ok_or_else(|| AppError::InvalidPeriod(format!("Ano inválido: {}", params.ano)))?;

    let sales = app_state.report_source.fetch_sales(&period, None).await?;
    let report = reporting::general_report(&sales)
        .ok_or_else(|| AppError::NoRecordsForPeriod(period.year_label()))?;

    Ok((
        StatusCode::OK,
        Json(PeriodReportResponse {
            period: period.year_label(),
            report,
        }),
    ))
}

// GET /api/reports/best-days
#[utoipa::path(
    get,
    path = "/api/reports/best-days",
    tag = "Relatórios",
    params(
        ("mes" = u32, Query, description = "Mês (1-12)"),
        ("ano" = i32, Query, description = "Ano (a partir de 2000)")
    ),
    responses(
        (status = 200, description = "Faturamento por dia da semana, do maior para o menor", body = Vec<DayRevenue>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Nenhum registro no período")
    )
)]
pub async fn best_days(
    State(app_state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate().map_err(AppError::ValidationError)?;
    let period = month_period(&params)?;

    let sales = app_state.report_source.fetch_sales(&period, None).await?;
    let ranking = reporting::day_ranking(&sales)
        .ok_or_else(|| AppError::NoRecordsForPeriod(period.month_label()))?;

    Ok((StatusCode::OK, Json(ranking)))
}

// GET /api/reports/product-profit
#[utoipa::path(
    get,
    path = "/api/reports/product-profit",
    tag = "Relatórios",
    params(
        ("mes" = u32, Query, description = "Mês (1-12)"),
        ("ano" = i32, Query, description = "Ano (a partir de 2000)")
    ),
    responses(
        (status = 200, description = "Lucro por produto, do maior para o menor", body = Vec<ProductProfit>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Nenhum registro no período")
    )
)]
pub async fn product_profit(
    State(app_state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate().map_err(AppError::ValidationError)?;
    let period = month_period(&params)?;

    let sales = app_state.report_source.fetch_sales(&period, None).await?;
    let products = app_state.report_source.fetch_products().await?;
    let ranking = reporting::product_profit_ranking(&sales, &products)
        .ok_or_else(|| AppError::NoRecordsForPeriod(period.month_label()))?;

    Ok((StatusCode::OK, Json(ranking)))
}
