use crate::config::lambda::ImportConfig;
use crate::core::csv_records::ImportRecordStream;
use crate::domain::model::ObjectLocation;
use crate::domain::ports::{ObjectStore, RecordQueue};
use crate::utils::error::{CatalogError, Result};
use aws_lambda_events::event::s3::S3Event;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Completed { rows_sent: usize, rows_failed: usize },
    Malformed,
    FetchFailed,
    ParseFailed { rows_sent: usize },
    ArchiveFailed { rows_sent: usize },
    DeleteFailed { rows_sent: usize },
}

impl RecordOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl ImportReport {
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    pub fn rows_sent(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                RecordOutcome::Completed { rows_sent, .. }
                | RecordOutcome::ParseFailed { rows_sent }
                | RecordOutcome::ArchiveFailed { rows_sent }
                | RecordOutcome::DeleteFailed { rows_sent } => *rows_sent,
                RecordOutcome::Malformed | RecordOutcome::FetchFailed => 0,
            })
            .sum()
    }
}

/// S3 notification keys arrive form-encoded: `+` for spaces and `%XX` escapes.
///
/// Encoded keys never contain a raw `&` or `=`, so the whole key parses as one form name.
pub fn decode_object_key(raw: &str) -> String {
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}

pub fn locations_from_event(event: &S3Event) -> Vec<Result<ObjectLocation>> {
    event
        .records
        .iter()
        .map(|record| {
            let bucket = record
                .s3
                .bucket
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| CatalogError::malformed_event("S3 record has no bucket name"))?;
            let key = record
                .s3
                .object
                .key
                .as_deref()
                .map(decode_object_key)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| CatalogError::malformed_event("S3 record has no object key"))?;
            Ok(ObjectLocation { bucket, key })
        })
        .collect()
}

/// Moves freshly uploaded CSV files through parse, archive and delete.
///
/// Every stage is a hard gate for its own record only: a failure is logged once and the
/// record is abandoned, and the rest of the batch carries on. Redelivery is left to the
/// event source.
pub struct ImportFileParser<S: ObjectStore, Q: RecordQueue> {
    store: S,
    queue: Q,
    upload_folder: String,
    copy_folder: String,
}

impl<S: ObjectStore, Q: RecordQueue> ImportFileParser<S, Q> {
    pub fn new(store: S, queue: Q, config: &ImportConfig) -> Self {
        Self {
            store,
            queue,
            upload_folder: config.upload_folder.clone(),
            copy_folder: config.copy_folder.clone(),
        }
    }

    pub fn archive_key(&self, key: &str) -> String {
        match key
            .strip_prefix(self.upload_folder.as_str())
            .filter(|rest| rest.starts_with('/'))
        {
            Some(rest) => format!("{}{}", self.copy_folder, rest),
            None => format!("{}/{}", self.copy_folder, key),
        }
    }

    pub async fn process_event(&self, event: &S3Event) -> ImportReport {
        let mut report = ImportReport::default();

        for location in locations_from_event(event) {
            let outcome = match location {
                Ok(location) => self.process_record(&location).await,
                Err(e) => {
                    tracing::error!(error = %e, "Skipping malformed S3 record");
                    RecordOutcome::Malformed
                }
            };
            report.outcomes.push(outcome);
        }

        tracing::info!(
            records = report.outcomes.len(),
            completed = report.completed(),
            failed = report.failed(),
            rows_sent = report.rows_sent(),
            "Import event processed"
        );
        report
    }

    #[tracing::instrument(skip(self, location), fields(bucket = %location.bucket, key = %location.key))]
    pub async fn process_record(&self, location: &ObjectLocation) -> RecordOutcome {
        let body = match self.store.get_object(&location.bucket, &location.key).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch uploaded object");
                return RecordOutcome::FetchFailed;
            }
        };

        let mut records = ImportRecordStream::new(body);
        let mut rows_sent = 0;
        let mut rows_failed = 0;

        while let Some(record) = records.next_record().await {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        row = records.rows_read(),
                        rows_sent,
                        "Failed to parse uploaded object"
                    );
                    return RecordOutcome::ParseFailed { rows_sent };
                }
            };

            let send_result = match serde_json::to_string(&record) {
                Ok(body) => self.queue.send(body).await,
                Err(e) => Err(e.into()),
            };

            match send_result {
                Ok(()) => rows_sent += 1,
                Err(e) => {
                    rows_failed += 1;
                    tracing::error!(error = %e, row = records.rows_read(), "Failed to queue import record");
                }
            }
        }

        tracing::info!(rows_sent, rows_failed, "Parsed uploaded object");

        let archive_key = self.archive_key(&location.key);
        if let Err(e) = self
            .store
            .copy_object(&location.bucket, &location.key, &archive_key)
            .await
        {
            tracing::error!(error = %e, archive_key = %archive_key, "Failed to archive parsed object");
            return RecordOutcome::ArchiveFailed { rows_sent };
        }

        if let Err(e) = self
            .store
            .delete_object(&location.bucket, &location.key)
            .await
        {
            tracing::error!(
                error = %e,
                archive_key = %archive_key,
                "Failed to delete archived object; it now exists in both folders"
            );
            return RecordOutcome::DeleteFailed { rows_sent };
        }

        tracing::info!(archive_key = %archive_key, "Moved parsed object to archive");
        RecordOutcome::Completed {
            rows_sent,
            rows_failed,
        }
    }
}
