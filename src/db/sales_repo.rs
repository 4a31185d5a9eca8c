// src/db/sales_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{
        report::ReportPeriod,
        sale::{NewSalePayload, Sale, SaleKind},
    },
};

// O repositório de vendas, responsável por todas as interações com a tabela 'sales'
#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere uma venda já com o dia da semana e o lucro calculados pelo serviço.
    pub async fn create(
        &self,
        payload: &NewSalePayload,
        weekday: &str,
        profit: Decimal,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales
                (sale_date, weekday, kind, total, card, cash, pix,
                 labor_cost, cups_cost, invoice_cost, profit, product_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(payload.sale_date)
        .bind(weekday)
        .bind(payload.kind)
        .bind(payload.total)
        .bind(payload.card)
        .bind(payload.cash)
        .bind(payload.pix)
        .bind(payload.labor_cost)
        .bind(payload.cups_cost)
        .bind(payload.invoice_cost)
        .bind(profit)
        .bind(payload.product_id)
        .bind(payload.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    // Vendas do intervalo semiaberto, na ordem de registro. A ordem estável
    // aqui é o que mantém os empates dos rankings determinísticos.
    pub async fn fetch_between(
        &self,
        period: &ReportPeriod,
        kind: Option<SaleKind>,
    ) -> Result<Vec<Sale>, AppError> {
        let sales = match kind {
            Some(kind) => {
                sqlx::query_as::<_, Sale>(
                    "SELECT * FROM sales
                     WHERE sale_date >= $1 AND sale_date < $2 AND kind = $3
                     ORDER BY sale_date, created_at",
                )
                .bind(period.start)
                .bind(period.end)
                .bind(kind)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Sale>(
                    "SELECT * FROM sales
                     WHERE sale_date >= $1 AND sale_date < $2
                     ORDER BY sale_date, created_at",
                )
                .bind(period.start)
                .bind(period.end)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(sales)
    }
}
