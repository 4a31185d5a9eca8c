// src/db/mod.rs

mod product_repo;
mod sales_repo;

pub use product_repo::ProductRepository;
pub use sales_repo::SalesRepository;

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        product::Product,
        report::ReportPeriod,
        sale::{Sale, SaleKind},
    },
};

/// Fonte de dados dos relatórios.
///
/// Handlers HTTP e interpretador do chat recebem uma implementação injetada
/// na construção do `AppState`; nos testes entra uma versão em memória.
#[async_trait]
pub trait ReportDataProvider: Send + Sync {
    /// Vendas do intervalo semiaberto `[period.start, period.end)`, com
    /// filtro opcional por tipo.
    async fn fetch_sales(
        &self,
        period: &ReportPeriod,
        kind: Option<SaleKind>,
    ) -> Result<Vec<Sale>, AppError>;

    async fn fetch_products(&self) -> Result<Vec<Product>, AppError>;
}

/// Implementação Postgres da fonte de relatórios.
#[derive(Clone)]
pub struct PgReportSource {
    sales: SalesRepository,
    products: ProductRepository,
}

impl PgReportSource {
    pub fn new(sales: SalesRepository, products: ProductRepository) -> Self {
        Self { sales, products }
    }
}

#[async_trait]
impl ReportDataProvider for PgReportSource {
    async fn fetch_sales(
        &self,
        period: &ReportPeriod,
        kind: Option<SaleKind>,
    ) -> Result<Vec<Sale>, AppError> {
        self.sales.fetch_between(period, kind).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.products.list().await
    }
}
