use crate::config::lambda::AuthConfig;
use crate::core::authorizer::{authorize, AuthorizerResponse, TokenAuthorizerEvent};

pub async fn basic_authorizer(credentials: &AuthConfig, event: TokenAuthorizerEvent) -> AuthorizerResponse {
    tracing::debug!(method_arn = %event.method_arn, "Authorizing request");
    authorize(&event.authorization_token, &event.method_arn, credentials)
}
