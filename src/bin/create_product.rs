use catalog_services::app;
use catalog_services::config::lambda::CorsConfig;
use catalog_services::handlers;
use catalog_services::utils::logger;
use lambda_http::{run, service_fn, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let service = app::product_service_from_env().await?;
    let cors = CorsConfig::from_env();

    run(service_fn(|event: Request| handlers::create_product(&service, &cors, event))).await
}
