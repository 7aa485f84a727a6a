use std::sync::Arc;

use aws_config::BehaviorVersion;
use dotenvy::dotenv;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use models::agent::{AgentEvent, AgentResponse};
use service::{store::DynamoRecordStore, Dispatcher, RetryPolicy};
use tracing::{info, info_span, Instrument};

async fn handle(
    dispatcher: &Dispatcher<DynamoRecordStore>,
    event: LambdaEvent<AgentEvent>,
) -> Result<AgentResponse, Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);
    let response = dispatcher.handle(&payload).instrument(span).await?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    common::utils::logging::init_logging_json();

    let cfg = configs::AppConfig::load_and_validate()?;

    // one client per execution environment, reused across invocations
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = Arc::new(DynamoRecordStore::new(&sdk_config, &cfg.store));
    let dispatcher = Dispatcher::new(store, RetryPolicy::from_config(&cfg.retry));

    info!(
        service = "lambda",
        event = "start",
        table = %cfg.store.table_name,
        max_attempts = cfg.retry.max_attempts,
        version = env!("CARGO_PKG_VERSION"),
        "record bridge handler ready"
    );

    let dispatcher = &dispatcher;
    run(service_fn(move |event: LambdaEvent<AgentEvent>| async move {
        handle(dispatcher, event).await
    }))
    .await
}
