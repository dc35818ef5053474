use std::fmt::{Debug, Display};

use installment_receipts::core::{get_subscriber, init_subscriber, AppConfig};
use installment_receipts::installment_receipts_web_server::InstallmentReceiptsServer;
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new()?;

    let file_appender =
        tracing_appender::rolling::daily(&config.application.log_directory, "app");

    let subscriber = get_subscriber("installment_receipts".into(), "info".into(), file_appender);
    init_subscriber(subscriber)?;

    let server = InstallmentReceiptsServer::build(config.clone()).await?;
    let port = server.port();

    let server_task = tokio::spawn(server.run_until_stopped());

    println!("{}", "-----------------------------------------".green());
    println!(
        "🚀 Server started on Addr: {}:{}",
        config.application.host, port
    );
    println!("{}", "-----------------------------------------".green());

    tokio::select! {
        outcome = server_task => {report_exit("Installment receipts API", outcome);}
    }
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{}' task failed to complete",
                task_name
            )
        }
    }
}
