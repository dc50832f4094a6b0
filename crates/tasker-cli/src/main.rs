//! End-to-end demo of the todo core against the in-memory backends.
//!
//! Creates a small task tree, lists and updates it, uploads and deletes an
//! attachment, and prints the resulting stats. Domain events show up as
//! structured log lines (RUST_LOG=info).

use std::sync::Arc;

use tasker_core::app::{StorageConfig, TodoService};
use tasker_core::domain::{
    Category, CreateTodoPayload, OwnerId, Patch, Priority, Status, TodoQuery, UpdateTodoPayload,
};
use tasker_core::impls::{
    InMemoryCategoryDirectory, InMemoryObjectStore, InMemoryTodoRepo, TracingEventSink,
};
use tasker_core::ports::{IdGenerator, SystemClock, UlidGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let bucket = std::env::var("TASKER_BUCKET").unwrap_or_else(|_| "tasker-dev".to_string());

    let directory = Arc::new(InMemoryCategoryDirectory::new());
    let repo = Arc::new(InMemoryTodoRepo::with_categories(&directory));
    let store = Arc::new(InMemoryObjectStore::new());

    let service = TodoService::builder()
        .todos(repo)
        .categories(directory.clone())
        .object_store(store)
        .storage(StorageConfig { bucket })
        .events(Arc::new(TracingEventSink))
        .build()?;

    let owner = OwnerId::new("demo-user");
    let ids = UlidGenerator::new(SystemClock);

    // A category to file things under.
    let category = Category {
        id: ids.new_category_id(),
        owner: owner.clone(),
        name: "chores".to_string(),
        description: None,
        color: Some("#3366ff".to_string()),
    };
    directory.insert(category.clone());

    // Parent task with one subtask.
    let parent = service
        .create(
            &owner,
            CreateTodoPayload {
                title: "spring cleaning".to_string(),
                priority: Some(Priority::High),
                category_id: Some(category.id),
                ..Default::default()
            },
        )
        .await?;
    println!("created {}: {}", parent.id, parent.title);

    let subtask = service
        .create(
            &owner,
            CreateTodoPayload {
                title: "clean the windows".to_string(),
                parent_todo_id: Some(parent.id),
                ..Default::default()
            },
        )
        .await?;
    println!("created subtask {}: {}", subtask.id, subtask.title);

    // The hierarchy cap in action: a subtask cannot become a parent.
    let too_deep = service
        .create(
            &owner,
            CreateTodoPayload {
                title: "clean the window sills".to_string(),
                parent_todo_id: Some(subtask.id),
                ..Default::default()
            },
        )
        .await;
    println!("sub-subtask rejected: {}", too_deep.unwrap_err());

    // Partial update: complete the subtask, everything else untouched.
    let mut update = UpdateTodoPayload::new(subtask.id);
    update.status = Patch::Set(Status::Completed);
    let done = service.update(&owner, update).await?;
    println!("updated {}: status={}", done.id, done.status.as_str());

    // Attachment round trip.
    let attachment = service
        .upload_attachment(&owner, parent.id, "checklist.txt", b"windows\nfloors\n".to_vec())
        .await?;
    println!(
        "uploaded {} ({} bytes) as {}",
        attachment.name,
        attachment.file_size.unwrap_or(0),
        attachment.download_key
    );

    let url = service
        .attachment_download_url(&owner, parent.id, attachment.id)
        .await?;
    println!("download url: {url}");

    service
        .delete_attachment(&owner, parent.id, attachment.id)
        .await?;
    println!("attachment deleted (storage cleanup runs in the background)");

    let page = service.list(&owner, &TodoQuery::default()).await?;
    println!("listing {} of {} todos:", page.items.len(), page.total);
    for item in &page.items {
        println!(
            "  {} [{}] {}",
            item.todo.id,
            item.todo.status.as_str(),
            item.todo.title
        );
    }

    let stats = service.stats(&owner).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
