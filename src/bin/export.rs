pub use synapse::export::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    synapse::setup_logging();
    // Probe renderers during cold start rather than on the first request
    let _ = synapse::export::renderers();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
