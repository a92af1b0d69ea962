use crate::domain::model::ImportRecord;
use crate::domain::ports::ObjectBody;
use crate::utils::error::Result;
use csv_async::{AsyncReaderBuilder, Trim};
use futures_util::stream::{BoxStream, StreamExt};

/// Pull-based CSV row stream over an object body.
///
/// Nothing is read past the current row until the caller asks for the next one, so a caller
/// that awaits some I/O per row keeps the source paused and in order while it does.
pub struct ImportRecordStream {
    records: BoxStream<'static, std::result::Result<ImportRecord, csv_async::Error>>,
    rows_read: usize,
}

impl ImportRecordStream {
    pub fn new(body: ObjectBody) -> Self {
        let deserializer = AsyncReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .create_deserializer(body);

        Self {
            records: deserializer.into_deserialize::<ImportRecord>().boxed(),
            rows_read: 0,
        }
    }

    /// `None` once the body is exhausted. A parse error is returned once; callers should stop there.
    pub async fn next_record(&mut self) -> Option<Result<ImportRecord>> {
        let next = self.records.next().await?;
        self.rows_read += 1;
        Some(next.map_err(Into::into))
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    #[cfg(test)]
    async fn collect_all(mut self) -> Result<Vec<ImportRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record().await {
            records.push(record?);
        }
        Ok(records)
    }
}
