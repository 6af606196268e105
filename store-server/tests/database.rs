//! Persistent database smoke tests
//!
//! The other suites run in memory; this one exercises the RocksDB engine
//! and the unique indexes defined at startup.

use tempfile::tempdir;

use store_server::db::DbService;
use store_server::db::models::ProductCreate;
use store_server::db::repository::ProductRepository;

#[tokio::test]
async fn opens_rocksdb_and_persists_products() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("store.db");

    let service = DbService::open(&db_path.to_string_lossy()).await.unwrap();
    let repo = ProductRepository::new(service.db.clone());

    let product = repo
        .create(ProductCreate {
            name: "Canvas bag".to_string(),
            category: "bags".to_string(),
            price: 12.5,
            discounted_price: None,
            short_description: None,
            description: None,
            image_url: None,
            images: Vec::new(),
            stock: 4,
            colors: Vec::new(),
        })
        .await
        .unwrap();

    assert_eq!(product.number, "1000");

    let fetched = repo.find_by_number("1000").await.unwrap().unwrap();
    assert_eq!(fetched.name, "Canvas bag");
    assert_eq!(fetched.stock, 4);
}

#[tokio::test]
async fn order_number_index_rejects_duplicates() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("store.db");

    let service = DbService::open(&db_path.to_string_lossy()).await.unwrap();

    service
        .db
        .query("CREATE order SET number = '4242', created_at = 0, final_total = 0.0")
        .await
        .unwrap()
        .check()
        .unwrap();

    // The unique index turns a lost allocation race into a hard error
    let second = service
        .db
        .query("CREATE order SET number = '4242', created_at = 1, final_total = 0.0")
        .await
        .unwrap()
        .check();

    assert!(second.is_err());
}

#[tokio::test]
async fn user_email_index_rejects_duplicates() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("store.db");

    let service = DbService::open(&db_path.to_string_lossy()).await.unwrap();

    service
        .db
        .query("CREATE user SET name = 'a', email = 'dup@example.com', hash_pass = 'x', role = 'user', created_at = 0")
        .await
        .unwrap()
        .check()
        .unwrap();

    let second = service
        .db
        .query("CREATE user SET name = 'b', email = 'dup@example.com', hash_pass = 'y', role = 'user', created_at = 0")
        .await
        .unwrap()
        .check();

    assert!(second.is_err());
}
