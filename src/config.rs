// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{PgReportSource, ProductRepository, ReportDataProvider, SalesRepository},
    services::{chat_service::ChatService, sales_service::SalesService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sales_repo: SalesRepository,
    pub product_repo: ProductRepository,
    // A mesma fonte alimenta os relatórios HTTP e o chat.
    pub report_source: Arc<dyn ReportDataProvider>,
    pub sales_service: SalesService,
    pub chat_service: ChatService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, o main decide parar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let sales_repo = SalesRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let report_source: Arc<dyn ReportDataProvider> =
            Arc::new(PgReportSource::new(sales_repo.clone(), product_repo.clone()));
        let sales_service = SalesService::new(sales_repo.clone(), product_repo.clone());
        let chat_service = ChatService::new(report_source.clone());

        Ok(Self {
            db_pool,
            sales_repo,
            product_repo,
            report_source,
            sales_service,
            chat_service,
        })
    }
}
