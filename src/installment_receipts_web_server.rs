use crate::core::config::ApplicationConfig;
use crate::core::{AppConfig, AppError};
use crate::db::{LedgerStore, MySqlLedgerStore};
use crate::receipts::{EnglishReceiptCopy, ReceiptCopy};
use crate::routes::installment_receipts_routes;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use sqlx::mysql::MySqlPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct InstallmentReceiptsServer {
    port: u16,
    server: Server,
}

impl InstallmentReceiptsServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        let mysql_pool = MySqlPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_lazy_with(configuration.mysql.connect());

        let store: Arc<dyn LedgerStore> = Arc::new(MySqlLedgerStore::new(mysql_pool));

        Self::build_with_store(configuration.application, store).await
    }

    /// Binds the configured address and serves from `store`. A port of 0
    /// picks a free one; see [`Self::port`].
    pub async fn build_with_store(
        application: ApplicationConfig,
        store: Arc<dyn LedgerStore>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", application.host, application.port);

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, store, application).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn LedgerStore>,
    application: ApplicationConfig,
) -> Result<Server, anyhow::Error> {
    let store: Data<dyn LedgerStore> = Data::from(store);
    let copy: Arc<dyn ReceiptCopy> = Arc::new(EnglishReceiptCopy);
    let copy: Data<dyn ReceiptCopy> = Data::from(copy);
    let application = Data::new(application);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .supports_credentials();
        App::new()
            .wrap(TracingLogger::default())
            .configure(installment_receipts_routes)
            .app_data(store.clone())
            .app_data(copy.clone())
            .app_data(application.clone())
            .app_data(json_config())
            .wrap(cors)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

// Body extraction failures answer in the same envelope as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::bad_request(err.to_string()).into())
}
