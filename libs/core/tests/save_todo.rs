use chrono::Utc;
use daybook_core::{day_key, Core, CoreError, SaveTodoInput};
use daybook_store::{
    store::in_memory::InMemoryStoreConfig, FileUploader, LocalFile, PinFuture, RecordDraft,
    StoreConfig, StoreError, StoreResult, UploaderBox,
};

fn test_core() -> Core {
    let config = InMemoryStoreConfig::default();
    let uploader = config.to_uploader();
    Core::new(config.to_store(), uploader)
}

fn save_input(creator: &str, day_key: &str, content: &str) -> SaveTodoInput {
    SaveTodoInput {
        content: content.to_owned(),
        creator_id: creator.to_owned(),
        day_key: Some(day_key.to_owned()),
        ..Default::default()
    }
}

async fn containers_for(core: &Core, creator: &str, day_key: &str) -> Vec<String> {
    core.list_creator_records(creator, None)
        .await
        .unwrap()
        .into_iter()
        .filter(|record| record.content.trim().starts_with(&day_key::title_line_of(day_key)))
        .map(|record| record.id)
        .collect()
}

#[tokio::test]
async fn first_save_creates_the_container() {
    let core = test_core();

    let outcome = core
        .save_todo_in(save_input("alice", "2026-01-02", "开会讨论需求"), &Utc)
        .await
        .unwrap();
    assert!(outcome.created);

    let container = core
        .find_container_in("alice", "2026-01-02", &Utc)
        .await
        .unwrap()
        .expect("container should exist");
    assert_eq!(container.content, "# 2026-01-02\n\n- [ ] 开会讨论需求");
}

#[tokio::test]
async fn second_save_appends_in_call_order() {
    let core = test_core();

    core.save_todo_in(save_input("alice", "2026-01-02", "开会讨论需求"), &Utc)
        .await
        .unwrap();
    let outcome = core
        .save_todo_in(save_input("alice", "2026-01-02", "代码审查"), &Utc)
        .await
        .unwrap();
    assert!(!outcome.created);

    let container = core
        .find_container_in("alice", "2026-01-02", &Utc)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        container.content,
        "# 2026-01-02\n\n- [ ] 开会讨论需求\n- [ ] 代码审查"
    );
}

#[tokio::test]
async fn sequential_saves_share_exactly_one_container() {
    let core = test_core();
    let items = ["one", "two", "three", "four"];

    for item in items {
        core.save_todo_in(save_input("alice", "2026-01-02", item), &Utc)
            .await
            .unwrap();
    }

    let containers = containers_for(&core, "alice", "2026-01-02").await;
    assert_eq!(containers.len(), 1);

    let container = core
        .find_container_in("alice", "2026-01-02", &Utc)
        .await
        .unwrap()
        .unwrap();
    let checklist_lines: Vec<&str> = container
        .content
        .lines()
        .filter(|line| line.starts_with("- [ ]"))
        .collect();
    assert_eq!(
        checklist_lines,
        vec!["- [ ] one", "- [ ] two", "- [ ] three", "- [ ] four"]
    );
}

#[tokio::test]
async fn saves_around_midnight_target_different_days() {
    let core = test_core();
    let tz = chrono::FixedOffset::east_opt(8 * 3600).unwrap();

    // Two instants seconds apart on either side of local midnight.
    let (_, end) = day_key::bounds_of("2026-01-02", &tz).unwrap();
    let before = day_key::key_of(end - 1, &tz);
    let after = day_key::key_of(end + 1, &tz);
    assert_ne!(before, after);

    core.save_todo_in(save_input("alice", &before, "late"), &tz)
        .await
        .unwrap();
    let outcome = core
        .save_todo_in(save_input("alice", &after, "early"), &tz)
        .await
        .unwrap();

    // The second save never lands in the previous day's container.
    assert!(outcome.created);
    assert_eq!(containers_for(&core, "alice", &before).await.len(), 1);
    assert_eq!(containers_for(&core, "alice", &after).await.len(), 1);
}

#[tokio::test]
async fn concurrent_saves_produce_a_single_container() {
    let core = test_core();

    let (first, second) = tokio::join!(
        core.save_todo_in(save_input("alice", "2026-01-02", "first"), &Utc),
        core.save_todo_in(save_input("alice", "2026-01-02", "second"), &Utc),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    // Exactly one of the two callers took the create path.
    assert!(first.created ^ second.created);
    assert_eq!(first.record_id, second.record_id);

    let containers = containers_for(&core, "alice", "2026-01-02").await;
    assert_eq!(containers.len(), 1);

    let container = core
        .find_container_in("alice", "2026-01-02", &Utc)
        .await
        .unwrap()
        .unwrap();
    assert!(container.content.contains("- [ ] first"));
    assert!(container.content.contains("- [ ] second"));
}

#[tokio::test]
async fn blank_content_is_rejected_before_any_store_call() {
    let core = test_core();

    let result = core
        .save_todo_in(save_input("alice", "2026-01-02", "   "), &Utc)
        .await;
    assert!(matches!(result, Err(CoreError::EmptyContent)));

    let records = core.list_creator_records("alice", None).await.unwrap();
    assert!(records.is_empty());
}

struct FailingUploader;

impl FileUploader for FailingUploader {
    fn upload_all(&self, _files: Vec<LocalFile>) -> PinFuture<StoreResult<Vec<String>>> {
        Box::pin(async { Err(StoreError::upload_failed("disk on fire")) })
    }
}

#[tokio::test]
async fn upload_failure_aborts_without_mutating_records() {
    let config = InMemoryStoreConfig::default();
    let core = Core::new(config.to_store(), UploaderBox::new(FailingUploader));

    let mut input = save_input("alice", "2026-01-02", "with file");
    input.local_files = vec![LocalFile::new("photo.png")];

    let result = core.save_todo_in(input, &Utc).await;
    assert!(matches!(result, Err(CoreError::Upload(_))));

    let records = core.list_creator_records("alice", None).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn attachment_references_accumulate_in_order() {
    let core = test_core();

    let mut input = save_input("alice", "2026-01-02", "with file");
    input.attachments = vec!["keep.png".to_owned()];
    input.local_files = vec![LocalFile::new("new.txt")];
    core.save_todo_in(input, &Utc).await.unwrap();

    let mut second = save_input("alice", "2026-01-02", "more");
    second.local_files = vec![LocalFile::new("later.txt")];
    core.save_todo_in(second, &Utc).await.unwrap();

    let container = core
        .find_container_in("alice", "2026-01-02", &Utc)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        container.attachments,
        vec![
            "keep.png".to_owned(),
            "mem://new.txt".to_owned(),
            "mem://later.txt".to_owned()
        ]
    );
}

#[tokio::test]
async fn creators_do_not_share_containers() {
    let core = test_core();

    core.save_todo_in(save_input("alice", "2026-01-02", "hers"), &Utc)
        .await
        .unwrap();
    let outcome = core
        .save_todo_in(save_input("bob", "2026-01-02", "his"), &Utc)
        .await
        .unwrap();

    assert!(outcome.created);
    assert_eq!(containers_for(&core, "alice", "2026-01-02").await.len(), 1);
    assert_eq!(containers_for(&core, "bob", "2026-01-02").await.len(), 1);
}

#[tokio::test]
async fn save_appends_to_a_container_created_elsewhere() {
    let core = test_core();

    // Another session already created today's container directly.
    let (start, _) = day_key::bounds_of("2026-01-02", &Utc).unwrap();
    core.get_inner_store()
        .create_record(RecordDraft {
            creator_id: "alice".to_owned(),
            content: "# 2026-01-02\n\n- [ ] existing".to_owned(),
            created_at: Some(start + 60),
            ..Default::default()
        })
        .await
        .unwrap();

    let outcome = core
        .save_todo_in(save_input("alice", "2026-01-02", "appended"), &Utc)
        .await
        .unwrap();
    assert!(!outcome.created);

    let container = core
        .find_container_in("alice", "2026-01-02", &Utc)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        container.content,
        "# 2026-01-02\n\n- [ ] existing\n- [ ] appended"
    );
}
