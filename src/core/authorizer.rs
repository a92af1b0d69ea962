use crate::config::lambda::AuthConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const UNAUTHORIZED_PRINCIPAL: &str = "unauthorized";
const POLICY_VERSION: &str = "2012-10-17";
const INVOKE_ACTION: &str = "execute-api:Invoke";

/// API Gateway TOKEN authorizer input.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAuthorizerEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub authorization_token: String,
    #[serde(default)]
    pub method_arn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: Vec<String>,
    pub effect: Effect,
    pub resource: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}

impl AuthorizerResponse {
    pub fn new(principal_id: impl Into<String>, effect: Effect, method_arn: &str) -> Self {
        Self {
            principal_id: principal_id.into(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![PolicyStatement {
                    action: vec![INVOKE_ACTION.to_string()],
                    effect,
                    resource: vec![method_arn.to_string()],
                }],
            },
        }
    }

    pub fn deny(method_arn: &str) -> Self {
        Self::new(UNAUTHORIZED_PRINCIPAL, Effect::Deny, method_arn)
    }

    pub fn effect(&self) -> Option<Effect> {
        self.policy_document.statement.first().map(|s| s.effect)
    }
}

/// Decodes `Basic <base64(user:password)>`. The password may itself contain `:`.
pub fn parse_basic_token(token: &str) -> Option<(String, String)> {
    let encoded = token.trim().strip_prefix("Basic ")?.trim();
    if encoded.is_empty() {
        return None;
    }
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    if username.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for (i, byte) in a.iter().enumerate() {
        diff |= usize::from(byte ^ b.get(i).copied().unwrap_or(0));
    }
    diff == 0
}

pub fn authorize(token: &str, method_arn: &str, credentials: &AuthConfig) -> AuthorizerResponse {
    let Some((username, password)) = parse_basic_token(token) else {
        tracing::info!("Rejected malformed authorization token");
        return AuthorizerResponse::deny(method_arn);
    };

    let user_ok = constant_time_eq(username.as_bytes(), credentials.username.as_bytes());
    let password_ok = constant_time_eq(password.as_bytes(), credentials.password.as_bytes());
    if !(user_ok && password_ok) {
        tracing::info!(username = %username, "Rejected invalid credentials");
        return AuthorizerResponse::deny(method_arn);
    }

    AuthorizerResponse::new(username, Effect::Allow, method_arn)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:execute-api:eu-west-1:123456789012:abc123/dev/GET/import";

    fn credentials() -> AuthConfig {
        AuthConfig {
            username: "shopadmin".to_string(),
            password: "TEST:PASSWORD".to_string(),
        }
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_valid_credentials_allow() {
        let response = authorize(&basic("shopadmin:TEST:PASSWORD"), ARN, &credentials());

        assert_eq!(response.principal_id, "shopadmin");
        assert_eq!(response.effect(), Some(Effect::Allow));
        assert_eq!(response.policy_document.statement[0].resource, vec![ARN]);
    }

    #[test]
    fn test_every_failure_denies() {
        let tokens = [
            "".to_string(),
            "Basic".to_string(),
            "Basic ".to_string(),
            "Bearer abc".to_string(),
            "Basic !!!not-base64!!!".to_string(),
            format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x'])),
            basic("shopadmin"),
            basic("shopadmin:wrong"),
            basic("other:TEST:PASSWORD"),
            basic(":TEST:PASSWORD"),
        ];

        for token in tokens {
            let response = authorize(&token, ARN, &credentials());
            assert_eq!(response.effect(), Some(Effect::Deny), "token {:?}", token);
            assert_eq!(response.principal_id, UNAUTHORIZED_PRINCIPAL);
        }
    }

    #[test]
    fn test_wire_format() {
        let response = AuthorizerResponse::deny(ARN);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "principalId": "unauthorized",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": ["execute-api:Invoke"],
                        "Effect": "Deny",
                        "Resource": [ARN]
                    }]
                }
            })
        );
    }

    #[test]
    fn test_event_deserializes_from_gateway_payload() {
        let event: TokenAuthorizerEvent = serde_json::from_str(
            r#"{"type":"TOKEN","authorizationToken":"Basic abc","methodArn":"arn:x"}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "TOKEN");
        assert_eq!(event.authorization_token, "Basic abc");
        assert_eq!(event.method_arn, "arn:x");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"", b"a"));
    }
}
