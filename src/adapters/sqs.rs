use crate::domain::ports::RecordQueue;
use crate::utils::error::{CatalogError, Result};
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client as SqsClient;

#[derive(Debug, Clone)]
pub struct SqsRecordQueue {
    client: SqsClient,
    queue_url: String,
}

impl SqsRecordQueue {
    pub fn new(client: SqsClient, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

impl RecordQueue for SqsRecordQueue {
    async fn send(&self, body: String) -> Result<()> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|err| CatalogError::upstream("SQS", DisplayErrorContext(err)))?;

        tracing::debug!(message_id = ?output.message_id(), "Queued import record");
        Ok(())
    }
}
