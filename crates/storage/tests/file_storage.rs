//! Integration tests for the storage facade backed by the file store.

use serde_json::json;
use storage::{FileStore, KeyValueStore, Storage, keys};

#[test]
fn documents_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = Storage::new(FileStore::open(dir.path()).unwrap());
        storage
            .save_categories(&[json!({"id": "cat-books", "name": "Books"})])
            .unwrap();
        storage.save_cart(&json!({"items": []})).unwrap();
    }

    let storage = Storage::new(FileStore::open(dir.path()).unwrap());
    let categories = storage.load_categories(json!([])).unwrap();
    assert_eq!(categories, json!([{"id": "cat-books", "name": "Books"}]));
    assert_eq!(storage.load_cart().unwrap(), json!({"items": []}));
}

#[test]
fn corrupted_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("shop:products", "[{\"id\": ").unwrap();

    let storage = Storage::new(store);
    assert_eq!(storage.load_products(json!([])).unwrap(), json!([]));
}

#[test]
fn reset_all_clears_every_collection() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(FileStore::open(dir.path()).unwrap());

    for name in [keys::CATEGORIES, keys::PRODUCTS, keys::ORDERS] {
        storage.save(name, &json!([])).unwrap();
    }
    storage.save_cart(&json!({"items": []})).unwrap();
    assert_eq!(storage.store().keys().unwrap().len(), 4);

    storage.reset_all().unwrap();
    assert!(storage.store().keys().unwrap().is_empty());
}
