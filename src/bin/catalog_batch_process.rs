use aws_lambda_events::event::sqs::SqsEvent;
use catalog_services::app;
use catalog_services::handlers::{self, BatchSummary};
use catalog_services::utils::logger;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let service = app::product_service_from_env().await?;
    let service = &service;

    run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        Ok::<BatchSummary, Error>(handlers::catalog_batch_process(service, event.payload).await)
    }))
    .await
}
