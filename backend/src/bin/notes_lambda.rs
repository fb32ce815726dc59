//! Lambda entry point: serves the one handler named by `NOTES_HANDLER`.

use color_eyre::eyre::Result;
use lambda_runtime::{LambdaEvent, service_fn};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notes_backend::TraceId;
use notes_backend::config::{NotesSettings, identity_pool_from_env};
use notes_backend::inbound::gateway::{GatewayEvent, GatewayHandlers, GatewayResponse};
use notes_backend::wiring::build_handler_ports;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .without_time()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = NotesSettings::load_for("notes-lambda")?;
    let kind = settings.handler_kind()?;
    let identity_pool = identity_pool_from_env(&DefaultEnv::new());
    let handlers = GatewayHandlers::from(build_handler_ports(&settings, identity_pool).await?);
    info!(handler = %kind, "lambda handler ready");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<GatewayEvent>| {
        let handlers = handlers.clone();
        async move {
            let trace_id = TraceId::from_request_id(&event.context.request_id);
            let response = TraceId::scope(trace_id, async {
                handlers.dispatch(kind, &event.payload).await
            })
            .await;
            Ok::<GatewayResponse, lambda_runtime::Error>(response)
        }
    }))
    .await
    .map_err(|err| color_eyre::eyre::eyre!("lambda runtime failed: {err}"))
}
