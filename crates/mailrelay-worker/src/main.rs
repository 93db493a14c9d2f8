use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use mailrelay_core::utils::logging::init_tracing;
use mailrelay_worker::NotificationHandler;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    info!("Starting Mailrelay Lambda function");

    // Configuration and clients are built once per execution environment
    let handler = Arc::new(NotificationHandler::from_env().await);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(event).await }
    }))
    .await
}
