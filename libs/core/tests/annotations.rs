use chrono::Utc;
use daybook_core::{Core, CoreError, SaveTodoInput};
use daybook_store::{store::in_memory::InMemoryStoreConfig, StoreConfig, Visibility};

fn test_core() -> Core {
    let config = InMemoryStoreConfig::default();
    let uploader = config.to_uploader();
    Core::new(config.to_store(), uploader)
}

async fn parent_record_id(core: &Core) -> String {
    core.save_todo_in(
        SaveTodoInput {
            content: "host record".to_owned(),
            creator_id: "alice".to_owned(),
            day_key: Some("2026-01-02".to_owned()),
            ..Default::default()
        },
        &Utc,
    )
    .await
    .unwrap()
    .record_id
}

#[tokio::test]
async fn add_then_list_roundtrip() {
    let core = test_core();
    let parent_id = parent_record_id(&core).await;

    let annotation = core
        .add_annotation(&parent_id, "note", "alice")
        .await
        .unwrap();
    assert_eq!(annotation.parent.as_deref(), Some(parent_id.as_str()));
    assert_eq!(annotation.visibility, Visibility::Private);

    let listing = core.list_annotations(&parent_id).await.unwrap();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.items[0].content, "note");
}

#[tokio::test]
async fn annotations_keep_creation_order() {
    let core = test_core();
    let parent_id = parent_record_id(&core).await;

    core.add_annotation(&parent_id, "first", "alice")
        .await
        .unwrap();
    core.add_annotation(&parent_id, "second", "bob")
        .await
        .unwrap();

    let listing = core.list_annotations(&parent_id).await.unwrap();
    let contents: Vec<&str> = listing
        .items
        .iter()
        .map(|item| item.content.as_str())
        .collect();
    assert_eq!(contents, vec!["first", "second"]);
}

#[tokio::test]
async fn annotation_text_is_not_checklist_normalized() {
    let core = test_core();
    let parent_id = parent_record_id(&core).await;

    let annotation = core
        .add_annotation(&parent_id, "just a remark", "alice")
        .await
        .unwrap();
    assert_eq!(annotation.content, "just a remark");
}

#[tokio::test]
async fn missing_parent_is_reported() {
    let core = test_core();
    let result = core.add_annotation("nope", "note", "alice").await;
    assert!(matches!(
        result,
        Err(CoreError::AnnotationParentNotFound(_))
    ));
}

#[tokio::test]
async fn update_replaces_content_only() {
    let core = test_core();
    let parent_id = parent_record_id(&core).await;
    let annotation = core
        .add_annotation(&parent_id, "draft", "alice")
        .await
        .unwrap();

    core.update_annotation(&annotation.id, "final").await.unwrap();

    let listing = core.list_annotations(&parent_id).await.unwrap();
    assert_eq!(listing.items[0].content, "final");
    assert_eq!(listing.items[0].visibility, annotation.visibility);
    assert_eq!(listing.items[0].parent, annotation.parent);
}

#[tokio::test]
async fn update_of_missing_annotation_is_reported() {
    let core = test_core();
    let result = core.update_annotation("nope", "text").await;
    assert!(matches!(result, Err(CoreError::AnnotationNotFound(_))));
}

#[tokio::test]
async fn second_delete_reports_not_found_instead_of_crashing() {
    let core = test_core();
    let parent_id = parent_record_id(&core).await;
    let annotation = core
        .add_annotation(&parent_id, "temp", "alice")
        .await
        .unwrap();

    core.delete_annotation(&annotation.id).await.unwrap();
    let second = core.delete_annotation(&annotation.id).await;
    assert!(matches!(second, Err(CoreError::AnnotationNotFound(_))));

    // The parent is untouched by its annotations' lifecycle.
    let listing = core.list_annotations(&parent_id).await.unwrap();
    assert_eq!(listing.total, 0);
}
