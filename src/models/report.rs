// src/models/report.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// --- Resultados de agregação ---

/// Resumo financeiro de um período.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneralReport {
    #[schema(example = "450.00")]
    pub gross_revenue: Decimal,

    #[schema(example = "378.00")]
    pub net_revenue: Decimal,

    // Receita bruta dividida pelo número de vendas (boletos fora).
    #[schema(example = "150.00")]
    pub average_sale: Decimal,

    pub labor_cost: Decimal,
    pub cups_cost: Decimal,
    pub invoice_cost: Decimal,
    pub total_cost: Decimal,

    // Dias de calendário distintos com venda registrada.
    #[schema(example = 2)]
    pub days_recorded: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayRevenue {
    #[schema(example = "Wednesday")]
    pub weekday: String,

    #[schema(example = "250.00")]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfit {
    #[schema(example = "Chopp Pilsen")]
    pub product_name: String,

    #[schema(example = "345.00")]
    pub profit: Decimal,
}

// --- Períodos ---

/// Intervalo semiaberto `[start, end)` usado em toda consulta de relatório.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Mês-calendário completo. `None` para mês fora de 1..=12.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        // Dezembro vira janeiro do ano seguinte.
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self { start, end })
    }

    /// Ano-calendário completo.
    pub fn calendar_year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        })
    }

    /// Mês-calendário imediatamente anterior ao início deste período.
    pub fn previous_month(&self) -> Option<Self> {
        let (year, month) = if self.start.month() == 1 {
            (self.start.year() - 1, 12)
        } else {
            (self.start.year(), self.start.month() - 1)
        };
        Self::month(year, month)
    }

    /// Rótulo "AAAA-MM" do mês em que o período começa.
    pub fn month_label(&self) -> String {
        format!("{:04}-{:02}", self.start.year(), self.start.month())
    }

    /// Rótulo "AAAA" do ano em que o período começa.
    pub fn year_label(&self) -> String {
        format!("{:04}", self.start.year())
    }
}
