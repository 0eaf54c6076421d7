use bytes::Bytes;

use question_bank::application::ports::{ArtifactStore, ArtifactStoreError};
use question_bank::domain::{JobId, StoragePath};
use question_bank::infrastructure::storage::ObjectArtifactStore;

fn create_local_store() -> (tempfile::TempDir, ObjectArtifactStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ObjectArtifactStore::local(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_bytes_when_putting_locally_then_file_exists_under_base_path() {
    let (dir, store) = create_local_store();
    let path = StoragePath::workbook(JobId::new());

    let size = store.put(&path, Bytes::from("hello world")).await.unwrap();

    assert_eq!(size, 11);
    assert!(dir.path().join(path.as_str()).exists());
}

#[tokio::test]
async fn given_stored_file_when_fetching_then_bytes_match_original() {
    let (_dir, store) = create_local_store();
    let path = StoragePath::workbook(JobId::new());
    store.put(&path, Bytes::from_static(b"xlsx")).await.unwrap();

    let fetched = store.fetch(&path).await.unwrap();

    assert_eq!(&fetched[..], b"xlsx");
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_fetch_returns_not_found() {
    let (_dir, store) = create_local_store();
    let path = StoragePath::workbook(JobId::new());
    store.put(&path, Bytes::from("data")).await.unwrap();

    store.delete(&path).await.unwrap();

    assert!(matches!(
        store.fetch(&path).await,
        Err(ArtifactStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_missing_path_when_fetching_then_not_found() {
    let (_dir, store) = create_local_store();

    let result = store.fetch(&StoragePath::from_raw("generated/missing.xlsx")).await;

    assert!(matches!(result, Err(ArtifactStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_in_memory_store_when_round_tripping_then_bytes_match() {
    let store = ObjectArtifactStore::in_memory();
    let path = StoragePath::from_raw("uploads/a.pdf");

    store.put(&path, Bytes::from("pdf")).await.unwrap();

    assert_eq!(&store.fetch(&path).await.unwrap()[..], b"pdf");
}
