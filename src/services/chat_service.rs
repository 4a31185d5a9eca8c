// src/services/chat_service.rs

//! Interpretador dos comandos recebidos pelo WhatsApp.
//!
//! Cada mensagem é independente: o serviço não guarda conversa nem sessão.
//! O fluxo é sempre parse -> busca via `ReportDataProvider` -> agregação em
//! `reporting` -> texto de resposta em pt-BR.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    common::error::AppError,
    db::ReportDataProvider,
    models::report::{GeneralReport, ReportPeriod},
    services::{nl_date, reporting},
};

/// Intenção estruturada extraída de uma mensagem livre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Report(ReportPeriod),
    AnnualReport(ReportPeriod),
    Compare(ReportPeriod, ReportPeriod),
    BestDays(ReportPeriod),
    Help,
}

/// Comando não interpretável; cada variante carrega a dica de uso do próprio
/// comando.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    ReportDate,
    AnnualYear,
    CompareArgs,
    BestDaysArgs,
    Unknown,
}

impl ParseError {
    pub fn reply(self) -> &'static str {
        match self {
            ParseError::ReportDate => {
                "Não entendi a data. Use: relatorio <mês> <ano>. Ex: relatorio 5 2025"
            }
            ParseError::AnnualYear => {
                "Formato inválido. Use: relatorio anual <ano>. Ex: relatorio anual 2025"
            }
            ParseError::CompareArgs => {
                "Formato inválido. Use: comparar <mês1> <ano1> <mês2> <ano2>. Ex: comparar 6 2025 7 2025"
            }
            ParseError::BestDaysArgs => {
                "Formato inválido. Use: melhores dias <mês> <ano>. Ex: melhores dias 7 2025"
            }
            ParseError::Unknown => "Comando não reconhecido. Digite 'ajuda' para ver os comandos.",
        }
    }
}

const HELP_REPLY: &str = "Comandos disponíveis:\n\
relatorio <mês> <ano> — relatório do mês (ex: relatorio julho 2025)\n\
relatorio anual <ano> — consolidado do ano\n\
comparar <mês1> <ano1> <mês2> <ano2> — compara dois meses\n\
melhores dias <mês> <ano> — ranking dos dias da semana\n\
ajuda — mostra esta lista";

const FETCH_FAILURE_REPLY: &str =
    "Não consegui consultar os dados agora. Tente de novo em instantes.";

/// Converte a mensagem crua em uma intenção. `today` resolve "relatorio
/// <mês>" sem ano.
pub fn parse_message(raw: &str, today: NaiveDate) -> Result<Intent, ParseError> {
    let normalized = nl_date::fold_accents(&raw.trim().to_lowercase());
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let Some(&first) = tokens.first() else {
        return Err(ParseError::Unknown);
    };

    // Comandos de duas palavras consomem os dois primeiros tokens.
    let (command, args) = match (first, tokens.get(1).copied()) {
        ("relatorio", Some("anual")) => ("relatorio anual", &tokens[2..]),
        ("melhores", Some("dias")) => ("melhores dias", &tokens[2..]),
        _ => (first, &tokens[1..]),
    };

    match command {
        "relatorio" => {
            let date = nl_date::parse_month_reference(&args.join(" "), today)
                .ok_or(ParseError::ReportDate)?;
            ReportPeriod::month(date.year(), date.month())
                .map(Intent::Report)
                .ok_or(ParseError::ReportDate)
        }
        "relatorio anual" => {
            let year = args
                .first()
                .and_then(|token| token.parse::<i32>().ok())
                .filter(|year| (2000..=2100).contains(year))
                .ok_or(ParseError::AnnualYear)?;
            ReportPeriod::calendar_year(year)
                .map(Intent::AnnualReport)
                .ok_or(ParseError::AnnualYear)
        }
        "comparar" => {
            if args.len() != 4 {
                return Err(ParseError::CompareArgs);
            }
            let numbers: Vec<i32> = args
                .iter()
                .map(|token| token.parse::<i32>())
                .collect::<Result<_, _>>()
                .map_err(|_| ParseError::CompareArgs)?;
            let first = month_period(numbers[0], numbers[1]).ok_or(ParseError::CompareArgs)?;
            let second = month_period(numbers[2], numbers[3]).ok_or(ParseError::CompareArgs)?;
            Ok(Intent::Compare(first, second))
        }
        "melhores dias" => {
            if args.len() != 2 {
                return Err(ParseError::BestDaysArgs);
            }
            let month = args[0].parse::<i32>().map_err(|_| ParseError::BestDaysArgs)?;
            let year = args[1].parse::<i32>().map_err(|_| ParseError::BestDaysArgs)?;
            month_period(month, year)
                .map(Intent::BestDays)
                .ok_or(ParseError::BestDaysArgs)
        }
        "ajuda" => Ok(Intent::Help),
        _ => Err(ParseError::Unknown),
    }
}

fn month_period(month: i32, year: i32) -> Option<ReportPeriod> {
    let month = u32::try_from(month).ok()?;
    ReportPeriod::month(year, month)
}

/// Executa comandos de relatório vindos do chat.
#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ReportDataProvider>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ReportDataProvider>) -> Self {
        Self { provider }
    }

    /// Interpreta uma mensagem e devolve o texto de resposta.
    ///
    /// Nunca propaga erro: falha de consulta é logada e vira uma resposta
    /// genérica pedindo para tentar de novo.
    pub async fn interpret(&self, raw: &str) -> String {
        self.interpret_at(raw, Utc::now().date_naive()).await
    }

    async fn interpret_at(&self, raw: &str, today: NaiveDate) -> String {
        let intent = match parse_message(raw, today) {
            Ok(intent) => intent,
            Err(err) => return err.reply().to_string(),
        };

        match self.execute(intent).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("Falha ao executar comando do chat: {err}");
                FETCH_FAILURE_REPLY.to_string()
            }
        }
    }

    async fn execute(&self, intent: Intent) -> Result<String, AppError> {
        match intent {
            Intent::Report(period) => self.monthly_report(period).await,
            Intent::AnnualReport(period) => self.annual_report(period).await,
            Intent::Compare(first, second) => self.compare(first, second).await,
            Intent::BestDays(period) => self.best_days(period).await,
            Intent::Help => Ok(HELP_REPLY.to_string()),
        }
    }

    async fn monthly_report(&self, period: ReportPeriod) -> Result<String, AppError> {
        let sales = self.provider.fetch_sales(&period, None).await?;
        let Some(report) = reporting::general_report(&sales) else {
            return Ok(format!("Nenhum registro para {}.", period.month_label()));
        };

        let trend_line = match period.previous_month() {
            Some(previous) => {
                let previous_sales = self.provider.fetch_sales(&previous, None).await?;
                match reporting::general_report(&previous_sales) {
                    None => format!("Tendência: sem dados de {}.", previous.month_label()),
                    Some(prev) if prev.net_revenue <= Decimal::ZERO => format!(
                        "Tendência: {} sem receita líquida positiva.",
                        previous.month_label()
                    ),
                    Some(prev) => format!(
                        "Tendência vs {}: {}",
                        previous.month_label(),
                        format_percent(variation(report.net_revenue, prev.net_revenue))
                    ),
                }
            }
            None => "Tendência: sem dados do mês anterior.".to_string(),
        };

        Ok(format!(
            "Relatório {}\n{}\n{}",
            period.month_label(),
            format_report_body(&report),
            trend_line
        ))
    }

    async fn annual_report(&self, period: ReportPeriod) -> Result<String, AppError> {
        let sales = self.provider.fetch_sales(&period, None).await?;
        let Some(report) = reporting::general_report(&sales) else {
            return Ok(format!("Nenhum registro para {}.", period.year_label()));
        };

        Ok(format!(
            "Relatório anual {}\n{}",
            period.year_label(),
            format_report_body(&report)
        ))
    }

    async fn compare(&self, first: ReportPeriod, second: ReportPeriod) -> Result<String, AppError> {
        let first_sales = self.provider.fetch_sales(&first, None).await?;
        let second_sales = self.provider.fetch_sales(&second, None).await?;

        let (first_report, second_report) = match (
            reporting::general_report(&first_sales),
            reporting::general_report(&second_sales),
        ) {
            (Some(a), Some(b)) => (a, b),
            (None, None) => {
                return Ok(format!(
                    "Nenhum registro para {} nem para {}.",
                    first.month_label(),
                    second.month_label()
                ));
            }
            (None, _) => return Ok(format!("Nenhum registro para {}.", first.month_label())),
            (_, None) => return Ok(format!("Nenhum registro para {}.", second.month_label())),
        };

        // A variação é sempre relativa ao primeiro período informado.
        let variation_line = if first_report.net_revenue > Decimal::ZERO {
            format!(
                "Variação: {}",
                format_percent(variation(second_report.net_revenue, first_report.net_revenue))
            )
        } else {
            format!(
                "Variação: N/A ({} sem receita líquida positiva)",
                first.month_label()
            )
        };

        Ok(format!(
            "Comparativo {} vs {}\nReceita líquida {}: R$ {:.2}\nReceita líquida {}: R$ {:.2}\n{}",
            first.month_label(),
            second.month_label(),
            first.month_label(),
            first_report.net_revenue,
            second.month_label(),
            second_report.net_revenue,
            variation_line
        ))
    }

    async fn best_days(&self, period: ReportPeriod) -> Result<String, AppError> {
        let sales = self.provider.fetch_sales(&period, None).await?;
        let ranking = match reporting::day_ranking(&sales) {
            Some(ranking) if !ranking.is_empty() => ranking,
            _ => return Ok(format!("Sem dados para {}.", period.month_label())),
        };

        let mut reply = format!("Melhores dias de {}:", period.month_label());
        for (position, entry) in ranking.iter().enumerate() {
            reply.push_str(&format!(
                "\n{}. {}: R$ {:.2}",
                position + 1,
                weekday_pt(&entry.weekday),
                entry.revenue
            ));
        }
        Ok(reply)
    }
}

fn format_report_body(report: &GeneralReport) -> String {
    format!(
        "Receita bruta: R$ {:.2}\n\
         Receita líquida: R$ {:.2}\n\
         Média por venda: R$ {:.2}\n\
         Gastos - Funcionários: R$ {:.2}\n\
         Copos: R$ {:.2}\n\
         Boleto: R$ {:.2}\n\
         Gasto total: R$ {:.2}\n\
         Dias registrados: {}",
        report.gross_revenue,
        report.net_revenue,
        report.average_sale,
        report.labor_cost,
        report.cups_cost,
        report.invoice_cost,
        report.total_cost,
        report.days_recorded
    )
}

// (atual / anterior - 1) * 100.
fn variation(current: Decimal, previous: Decimal) -> Decimal {
    ((current / previous) - Decimal::ONE) * Decimal::from(100)
}

fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded >= Decimal::ZERO {
        format!("+{rounded:.2}%")
    } else {
        format!("{rounded:.2}%")
    }
}

// Os rótulos de dia ficam gravados em inglês; a resposta sai em português.
fn weekday_pt(label: &str) -> &str {
    match label {
        "Monday" => "Segunda-feira",
        "Tuesday" => "Terça-feira",
        "Wednesday" => "Quarta-feira",
        "Thursday" => "Quinta-feira",
        "Friday" => "Sexta-feira",
        "Saturday" => "Sábado",
        "Sunday" => "Domingo",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::models::{
        product::Product,
        sale::{Sale, SaleKind},
    };

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    fn hoje() -> NaiveDate {
        dia(2025, 8, 8)
    }

    fn venda(date: NaiveDate, weekday: &str, total: &str) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            sale_date: date,
            weekday: weekday.to_string(),
            kind: SaleKind::Market,
            total: Some(dec(total)),
            card: None,
            cash: None,
            pix: None,
            labor_cost: None,
            cups_cost: None,
            invoice_cost: None,
            profit: Some(dec(total)),
            product_id: None,
            notes: None,
            created_at: None,
        }
    }

    fn boleto(date: NaiveDate, weekday: &str, custo: &str) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            sale_date: date,
            weekday: weekday.to_string(),
            kind: SaleKind::Invoice,
            total: Some(Decimal::ZERO),
            card: None,
            cash: None,
            pix: None,
            labor_cost: None,
            cups_cost: None,
            invoice_cost: Some(dec(custo)),
            profit: Some(-dec(custo)),
            product_id: None,
            notes: None,
            created_at: None,
        }
    }

    struct FakeProvider {
        sales: Vec<Sale>,
        fail: bool,
    }

    impl FakeProvider {
        fn with_sales(sales: Vec<Sale>) -> Self {
            Self { sales, fail: false }
        }

        fn empty() -> Self {
            Self::with_sales(Vec::new())
        }

        fn broken() -> Self {
            Self { sales: Vec::new(), fail: true }
        }
    }

    #[async_trait]
    impl ReportDataProvider for FakeProvider {
        async fn fetch_sales(
            &self,
            period: &ReportPeriod,
            kind: Option<SaleKind>,
        ) -> Result<Vec<Sale>, AppError> {
            if self.fail {
                return Err(AppError::InternalServerError(anyhow::anyhow!(
                    "banco fora do ar"
                )));
            }
            Ok(self
                .sales
                .iter()
                .filter(|sale| sale.sale_date >= period.start && sale.sale_date < period.end)
                .filter(|sale| kind.is_none_or(|k| sale.kind == k))
                .cloned()
                .collect())
        }

        async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
            Ok(Vec::new())
        }
    }

    fn service(provider: FakeProvider) -> ChatService {
        ChatService::new(Arc::new(provider))
    }

    // --- parse_message ---

    #[test]
    fn parse_relatorio_com_nome_de_mes() {
        let intent = parse_message("relatorio julho 2025", hoje()).unwrap();
        assert_eq!(intent, Intent::Report(ReportPeriod::month(2025, 7).unwrap()));
    }

    #[test]
    fn parse_aceita_acento_e_maiusculas() {
        let intent = parse_message("  RELATÓRIO Julho 2025 ", hoje()).unwrap();
        assert_eq!(intent, Intent::Report(ReportPeriod::month(2025, 7).unwrap()));
    }

    #[test]
    fn parse_relatorio_anual() {
        let intent = parse_message("relatorio anual 2025", hoje()).unwrap();
        assert_eq!(
            intent,
            Intent::AnnualReport(ReportPeriod::calendar_year(2025).unwrap())
        );
    }

    #[test]
    fn parse_comparar_posicional() {
        let intent = parse_message("comparar 6 2025 7 2025", hoje()).unwrap();
        assert_eq!(
            intent,
            Intent::Compare(
                ReportPeriod::month(2025, 6).unwrap(),
                ReportPeriod::month(2025, 7).unwrap()
            )
        );
    }

    #[test]
    fn parse_melhores_dias() {
        let intent = parse_message("melhores dias 7 2025", hoje()).unwrap();
        assert_eq!(intent, Intent::BestDays(ReportPeriod::month(2025, 7).unwrap()));
    }

    #[test]
    fn parse_ajuda() {
        assert_eq!(parse_message("ajuda", hoje()).unwrap(), Intent::Help);
    }

    #[test]
    fn parse_erros_por_comando() {
        assert_eq!(
            parse_message("relatorio sei la", hoje()),
            Err(ParseError::ReportDate)
        );
        assert_eq!(
            parse_message("relatorio anual vinte", hoje()),
            Err(ParseError::AnnualYear)
        );
        assert_eq!(
            parse_message("comparar 6 2025", hoje()),
            Err(ParseError::CompareArgs)
        );
        assert_eq!(
            parse_message("comparar 13 2025 7 2025", hoje()),
            Err(ParseError::CompareArgs)
        );
        assert_eq!(
            parse_message("melhores dias sete 2025", hoje()),
            Err(ParseError::BestDaysArgs)
        );
        assert_eq!(parse_message("bom dia", hoje()), Err(ParseError::Unknown));
        assert_eq!(parse_message("   ", hoje()), Err(ParseError::Unknown));
    }

    // --- interpret ---

    fn junho_e_julho() -> Vec<Sale> {
        vec![
            venda(dia(2025, 6, 10), "Tuesday", "100"),
            venda(dia(2025, 7, 5), "Saturday", "150"),
        ]
    }

    #[tokio::test]
    async fn relatorio_mensal_com_tendencia() {
        let service = service(FakeProvider::with_sales(junho_e_julho()));
        let reply = service.interpret_at("relatorio julho 2025", hoje()).await;

        assert!(reply.contains("Relatório 2025-07"), "{reply}");
        assert!(reply.contains("Receita bruta: R$ 150.00"), "{reply}");
        assert!(reply.contains("Receita líquida: R$ 150.00"), "{reply}");
        assert!(reply.contains("Dias registrados: 1"), "{reply}");
        assert!(reply.contains("Tendência vs 2025-06: +50.00%"), "{reply}");
    }

    #[tokio::test]
    async fn relatorio_sem_registros_no_periodo() {
        let service = service(FakeProvider::empty());
        let reply = service.interpret_at("relatorio agosto 2025", hoje()).await;
        assert_eq!(reply, "Nenhum registro para 2025-08.");
    }

    #[tokio::test]
    async fn relatorio_sem_mes_anterior() {
        let service = service(FakeProvider::with_sales(vec![venda(
            dia(2025, 7, 5),
            "Saturday",
            "150",
        )]));
        let reply = service.interpret_at("relatorio julho 2025", hoje()).await;
        assert!(reply.contains("Tendência: sem dados de 2025-06."), "{reply}");
    }

    #[tokio::test]
    async fn relatorio_com_mes_anterior_negativo() {
        let mut sales = vec![venda(dia(2025, 7, 5), "Saturday", "150")];
        sales.push(boleto(dia(2025, 6, 3), "Tuesday", "5"));
        let service = service(FakeProvider::with_sales(sales));
        let reply = service.interpret_at("relatorio julho 2025", hoje()).await;
        assert!(
            reply.contains("Tendência: 2025-06 sem receita líquida positiva."),
            "{reply}"
        );
    }

    #[tokio::test]
    async fn relatorio_anual_sem_linha_de_tendencia() {
        let service = service(FakeProvider::with_sales(junho_e_julho()));
        let reply = service.interpret_at("relatorio anual 2025", hoje()).await;

        assert!(reply.contains("Relatório anual 2025"), "{reply}");
        assert!(reply.contains("Receita bruta: R$ 250.00"), "{reply}");
        assert!(!reply.contains("Tendência"), "{reply}");
    }

    #[tokio::test]
    async fn comparar_dois_meses() {
        let service = service(FakeProvider::with_sales(junho_e_julho()));
        let reply = service.interpret_at("comparar 6 2025 7 2025", hoje()).await;

        assert!(reply.contains("Comparativo 2025-06 vs 2025-07"), "{reply}");
        assert!(reply.contains("Receita líquida 2025-06: R$ 100.00"), "{reply}");
        assert!(reply.contains("Receita líquida 2025-07: R$ 150.00"), "{reply}");
        assert!(reply.contains("50.00%"), "{reply}");
    }

    #[tokio::test]
    async fn comparar_indica_qual_periodo_esta_vazio() {
        let service = service(FakeProvider::with_sales(vec![venda(
            dia(2025, 7, 5),
            "Saturday",
            "150",
        )]));
        let reply = service.interpret_at("comparar 6 2025 7 2025", hoje()).await;
        assert_eq!(reply, "Nenhum registro para 2025-06.");
    }

    #[tokio::test]
    async fn comparar_com_primeiro_periodo_nao_positivo_da_na() {
        let sales = vec![
            boleto(dia(2025, 6, 3), "Tuesday", "5"),
            venda(dia(2025, 7, 5), "Saturday", "150"),
        ];
        let service = service(FakeProvider::with_sales(sales));
        let reply = service.interpret_at("comparar 6 2025 7 2025", hoje()).await;
        assert!(
            reply.contains("Variação: N/A (2025-06 sem receita líquida positiva)"),
            "{reply}"
        );
    }

    #[tokio::test]
    async fn melhores_dias_traduz_e_ordena() {
        let sales = vec![
            venda(dia(2025, 7, 1), "Tuesday", "150"),
            venda(dia(2025, 7, 1), "Tuesday", "50"),
            venda(dia(2025, 7, 2), "Wednesday", "250"),
            boleto(dia(2025, 7, 3), "Thursday", "5"),
        ];
        let service = service(FakeProvider::with_sales(sales));
        let reply = service.interpret_at("melhores dias 7 2025", hoje()).await;

        let expected = "Melhores dias de 2025-07:\n\
                        1. Quarta-feira: R$ 250.00\n\
                        2. Terça-feira: R$ 200.00\n\
                        3. Quinta-feira: R$ 0.00";
        assert_eq!(reply, expected);
    }

    #[tokio::test]
    async fn melhores_dias_sem_dados() {
        let service = service(FakeProvider::empty());
        let reply = service.interpret_at("melhores dias 7 2025", hoje()).await;
        assert_eq!(reply, "Sem dados para 2025-07.");
    }

    #[tokio::test]
    async fn ajuda_ignora_estado_dos_dados() {
        let service = service(FakeProvider::empty());
        let reply = service.interpret_at("ajuda", hoje()).await;

        assert!(reply.starts_with("Comandos disponíveis:"), "{reply}");
        for comando in ["relatorio <mês> <ano>", "relatorio anual", "comparar", "melhores dias", "ajuda"] {
            assert!(reply.contains(comando), "faltou {comando}: {reply}");
        }
    }

    #[tokio::test]
    async fn comando_desconhecido_sugere_ajuda() {
        let service = service(FakeProvider::empty());
        let reply = service.interpret_at("bom dia", hoje()).await;
        assert_eq!(reply, ParseError::Unknown.reply());
    }

    #[tokio::test]
    async fn falha_de_consulta_vira_resposta_generica() {
        let service = service(FakeProvider::broken());
        let reply = service.interpret_at("relatorio julho 2025", hoje()).await;
        assert_eq!(reply, FETCH_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn valores_da_resposta_reparseiam_para_os_numeros_do_relatorio() {
        let service = service(FakeProvider::with_sales(junho_e_julho()));
        let reply = service.interpret_at("relatorio julho 2025", hoje()).await;

        let valor = |prefixo: &str| -> Decimal {
            let linha = reply
                .lines()
                .find(|l| l.starts_with(prefixo))
                .unwrap_or_else(|| panic!("faltou linha {prefixo}: {reply}"));
            linha
                .trim_start_matches(prefixo)
                .trim_start_matches("R$ ")
                .parse()
                .unwrap()
        };

        assert_eq!(valor("Receita bruta: "), dec("150.00"));
        assert_eq!(valor("Receita líquida: "), dec("150.00"));
        assert_eq!(valor("Média por venda: "), dec("150.00"));
    }
}
