pub use synapse::synonyms::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    synapse::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
