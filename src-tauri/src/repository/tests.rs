//! Repository Integration Tests
//!
//! Tests for ToolboxRepository with in-memory SQLite database.

use std::path::PathBuf;

use ops_hub_core::{classify, Classification, DomainError, ItemPatch, ItemStatus, ItemType, NewToolboxItem, Section};

use crate::repository::{init_db, DbState, FilterableRepository, Repository, ToolboxRepository};

fn setup_test_db(page_size: u32) -> (DbState, ToolboxRepository) {
    // Use in-memory database for tests
    let db_state = init_db(&PathBuf::from(":memory:")).expect("Failed to init test DB");
    let repo = ToolboxRepository::new(db_state.connection(), page_size);
    (db_state, repo)
}

#[tokio::test]
async fn test_create_item() {
    let (_db, repo) = setup_test_db(100);

    let created = repo.create(&NewToolboxItem::new("CRM", ItemType::System)).await.expect("Failed to create");

    assert!(created.id > 0);
    assert_eq!(created.name, "CRM");
    assert_eq!(created.status, ItemStatus::Active);
    assert_eq!(classify(&created), Classification::default());
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let (_db, repo) = setup_test_db(100);
    let result = repo.create(&NewToolboxItem::new("  ", ItemType::Idea)).await;
    assert!(matches!(result, Err(DomainError::CreateRejected(_))));
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_by_id() {
    let (_db, repo) = setup_test_db(100);

    let created = repo.create(&NewToolboxItem::new("Forklift", ItemType::Equipment)).await.unwrap();

    let found = repo.find_by_id(created.id).await.expect("Find failed");
    assert_eq!(found, Some(created));
    assert_eq!(repo.find_by_id(999).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_is_ordered_and_paged() {
    let (_db, repo) = setup_test_db(2);

    for name in ["A", "B", "C"] {
        repo.create(&NewToolboxItem::new(name, ItemType::System)).await.unwrap();
    }

    let items = repo.list().await.expect("List failed");
    assert_eq!(items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_list_by_type() {
    let (_db, repo) = setup_test_db(100);

    repo.create(&NewToolboxItem::new("CRM", ItemType::System)).await.unwrap();
    repo.create(&NewToolboxItem::new("Onboarding", ItemType::Process)).await.unwrap();

    let processes = repo.list_by(ItemType::Process).await.unwrap();
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].name, "Onboarding");
    assert!(repo.list_by(ItemType::Event).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_partial_update() {
    let (_db, repo) = setup_test_db(100);

    let created = repo
        .create(&NewToolboxItem::new("CRM", ItemType::System).with_description("customer data"))
        .await
        .unwrap();

    let metadata = r#"{"section":"sell","subsection":null}"#;
    let updated = repo.update(created.id, &ItemPatch::metadata(metadata)).await.expect("Update failed");
    assert_eq!(updated.metadata.as_deref(), Some(metadata));
    assert_eq!(updated.name, "CRM");
    assert_eq!(updated.description, "customer data");
    assert_eq!(updated.status, ItemStatus::Active);
    assert!(updated.last_updated >= created.last_updated);
    assert_eq!(classify(&updated).section(), Section::Sell);

    let toggled = repo.update(created.id, &ItemPatch::status(ItemStatus::Inactive)).await.unwrap();
    assert_eq!(toggled.status, ItemStatus::Inactive);
    assert_eq!(toggled.metadata.as_deref(), Some(metadata));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (_db, repo) = setup_test_db(100);
    let result = repo.update(42, &ItemPatch::status(ItemStatus::Inactive)).await;
    assert_eq!(result, Err(DomainError::NotFound(42)));
}

#[tokio::test]
async fn test_rejected_update_leaves_row_untouched() {
    let (_db, repo) = setup_test_db(100);

    let created = repo.create(&NewToolboxItem::new("CRM", ItemType::System)).await.unwrap();
    let patch = ItemPatch {
        name: Some(String::new()),
        metadata: Some(r#"{"section":"team"}"#.to_string()),
        ..Default::default()
    };

    let result = repo.update(created.id, &patch).await;
    assert!(matches!(result, Err(DomainError::UpdateRejected(_))));
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_storage_rejection_is_update_rejected() {
    let (db, repo) = setup_test_db(100);

    let created = repo.create(&NewToolboxItem::new("CRM", ItemType::System)).await.unwrap();
    db.connection()
        .lock()
        .await
        .execute_batch(
            "CREATE TRIGGER lock_rows BEFORE UPDATE ON toolbox_items
             BEGIN SELECT RAISE(ABORT, 'row is locked'); END;",
        )
        .unwrap();

    let result = repo.update(created.id, &ItemPatch::status(ItemStatus::Inactive)).await;
    assert!(matches!(result, Err(DomainError::UpdateRejected(reason)) if reason.contains("locked")));
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_delete_item() {
    let (_db, repo) = setup_test_db(100);

    let created = repo.create(&NewToolboxItem::new("To delete", ItemType::Idea)).await.unwrap();

    repo.delete(created.id).await.expect("Delete failed");

    assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
    assert_eq!(repo.delete(created.id).await, Err(DomainError::NotFound(created.id)));
}

#[tokio::test]
async fn test_item_type_persistence() {
    let (_db, repo) = setup_test_db(100);

    let created = repo.create(&NewToolboxItem::new("Offsite", ItemType::Event)).await.unwrap();

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.item_type, ItemType::Event);
}
