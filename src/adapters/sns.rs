use crate::domain::model::{AttributeValue, NotificationAttribute};
use crate::domain::ports::Notifier;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::types::MessageAttributeValue;
use aws_sdk_sns::Client as SnsClient;

#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: SnsClient,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(client: SnsClient, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

fn message_attribute(value: AttributeValue) -> Result<MessageAttributeValue> {
    let builder = match value {
        AttributeValue::Number(n) => MessageAttributeValue::builder()
            .data_type("Number")
            .string_value(n.to_string()),
        AttributeValue::Text(s) => MessageAttributeValue::builder()
            .data_type("String")
            .string_value(s),
    };
    builder
        .build()
        .map_err(|e| CatalogError::upstream("SNS", e))
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(
        &self,
        message: String,
        attributes: Vec<NotificationAttribute>,
    ) -> Result<()> {
        let mut request = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message);

        for attribute in attributes {
            request = request.message_attributes(attribute.name, message_attribute(attribute.value)?);
        }

        let output = request
            .send()
            .await
            .map_err(|err| CatalogError::upstream("SNS", DisplayErrorContext(err)))?;

        tracing::debug!(message_id = ?output.message_id(), "Published notification");
        Ok(())
    }
}
