use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use catalog_services::adapters::{InMemoryProductRepository, LocalObjectStore};
use catalog_services::core::import_file_parser::RecordOutcome;
use catalog_services::domain::model::ObjectLocation;
use catalog_services::domain::ports::{ProductRepository, RecordQueue};
use catalog_services::handlers::catalog_batch_process;
use catalog_services::{ImportConfig, ImportFileParser, ProductService, Result};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct CapturingQueue {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordQueue for CapturingQueue {
    async fn send(&self, body: String) -> Result<()> {
        self.messages.lock().await.push(body);
        Ok(())
    }
}

fn import_config() -> ImportConfig {
    ImportConfig {
        bucket_name: "import-bucket".to_string(),
        upload_folder: "uploaded".to_string(),
        copy_folder: "parsed".to_string(),
        signed_url_expires_in: 60,
        region: None,
        queue_url: None,
    }
}

fn upload(root: &Path, key: &str, content: &str) {
    let path = root.join("import-bucket").join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn sqs_event(bodies: &[String]) -> SqsEvent {
    let mut event = SqsEvent::default();
    event.records = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let mut message = SqsMessage::default();
            message.message_id = Some(format!("msg-{}", i));
            message.body = Some(body.clone());
            message
        })
        .collect();
    event
}

#[tokio::test]
async fn test_uploaded_csv_becomes_products() {
    let temp_dir = TempDir::new().unwrap();
    upload(
        temp_dir.path(),
        "uploaded/batch-1.csv",
        "title,description,price,count\n\
         Rug,Wool rug,250,4\n\
         Mat,\"Cotton, washable\",12.5,10\n\
         Broken,missing price,,3\n",
    );

    let queue = CapturingQueue::default();
    let parser = ImportFileParser::new(
        LocalObjectStore::new(temp_dir.path()),
        queue.clone(),
        &import_config(),
    );

    let outcome = parser
        .process_record(&ObjectLocation {
            bucket: "import-bucket".to_string(),
            key: "uploaded/batch-1.csv".to_string(),
        })
        .await;

    assert_eq!(
        outcome,
        RecordOutcome::Completed {
            rows_sent: 3,
            rows_failed: 0
        }
    );
    assert!(temp_dir.path().join("import-bucket/parsed/batch-1.csv").exists());
    assert!(!temp_dir.path().join("import-bucket/uploaded/batch-1.csv").exists());

    let repository = Arc::new(InMemoryProductRepository::new());
    let service = ProductService::new(repository.clone(), None);
    let messages = queue.messages.lock().await.clone();

    let summary = catalog_batch_process(&service, sqs_event(&messages)).await;

    assert_eq!(summary.created, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);

    let products = repository.list().await.unwrap();
    assert_eq!(products[0].title, "Rug");
    assert_eq!(products[0].count, 4);
    assert_eq!(products[1].description, "Cotton, washable");
    assert_eq!(products[1].price, 12.5);
}

#[tokio::test]
async fn test_missing_upload_leaves_nothing_behind() {
    let temp_dir = TempDir::new().unwrap();
    let queue = CapturingQueue::default();
    let parser = ImportFileParser::new(
        LocalObjectStore::new(temp_dir.path()),
        queue.clone(),
        &import_config(),
    );

    let outcome = parser
        .process_record(&ObjectLocation {
            bucket: "import-bucket".to_string(),
            key: "uploaded/never-uploaded.csv".to_string(),
        })
        .await;

    assert_eq!(outcome, RecordOutcome::FetchFailed);
    assert!(queue.messages.lock().await.is_empty());
    assert!(!temp_dir.path().join("import-bucket/parsed").exists());
}
