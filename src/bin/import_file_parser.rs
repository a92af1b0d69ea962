use aws_lambda_events::event::s3::S3Event;
use catalog_services::app;
use catalog_services::handlers;
use catalog_services::utils::logger;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let parser = app::import_file_parser_from_env().await?;
    let parser = &parser;

    run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        handlers::import_file_parser(parser, event.payload).await;
        Ok::<(), Error>(())
    }))
    .await
}
