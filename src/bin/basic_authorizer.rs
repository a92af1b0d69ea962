use catalog_services::config::lambda::AuthConfig;
use catalog_services::core::authorizer::{AuthorizerResponse, TokenAuthorizerEvent};
use catalog_services::handlers;
use catalog_services::utils::{logger, validation::Validate};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let credentials = AuthConfig::from_env()?;
    credentials.validate()?;
    let credentials = &credentials;

    run(service_fn(move |event: LambdaEvent<TokenAuthorizerEvent>| async move {
        Ok::<AuthorizerResponse, Error>(handlers::basic_authorizer(credentials, event.payload).await)
    }))
    .await
}
