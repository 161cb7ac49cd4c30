//! Demonstration of the dashboard stores against the live demo API.
//!
//! Set `DASHKIT_OFFLINE=1` to use canned data instead of the network, and
//! `RUST_LOG=dashkit=debug` to see store events.

use dashkit::{Dashboard, MemorySource, NewPost, NewTodo};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn offline_source() -> MemorySource {
    MemorySource::new()
        .with(
            "/posts",
            json!([{ "id": 1, "userId": 1, "title": "sunt aut facere", "body": "quia et suscipit" }]),
        )
        .with(
            "/users",
            json!([{ "id": 1, "name": "Leanne Graham", "username": "Bret",
                     "email": "Sincere@april.biz", "phone": "1-770-736-8031",
                     "website": "hildegard.org", "company": { "name": "Romaguera-Crona" },
                     "address": { "street": "Kulas Light", "city": "Gwenborough" } }]),
        )
        .with(
            "/comments",
            json!([{ "id": 1, "postId": 1, "name": "id labore", "email": "Eliseo@gardner.biz", "body": "laudantium" }]),
        )
        .with(
            "/todos",
            json!([
                { "id": 1, "userId": 1, "title": "delectus aut autem", "completed": false },
                { "id": 2, "userId": 1, "title": "quis ut nam", "completed": true }
            ]),
        )
}

#[tokio::main]
async fn main() -> dashkit::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== Dashboard Example ===\n");

    let dashboard = if std::env::var_os("DASHKIT_OFFLINE").is_some() {
        Dashboard::new(Arc::new(offline_source()))
    } else {
        Dashboard::from_config(None)?
    };

    println!("1. Subscribing to todos");
    let _todos_sub = dashboard.todos.subscribe(|state| {
        let done = state.items.iter().filter(|t| t.completed).count();
        println!(
            "   [Todos] {} items, {} completed, loading: {}",
            state.items.len(),
            done,
            state.loading
        );
    });

    println!("\n2. Loading every resource");
    let report = dashboard.load().await;
    println!("   {:?}", report);
    for (name, error) in [
        ("users", dashboard.users.error()),
        ("posts", dashboard.posts.error()),
        ("comments", dashboard.comments.error()),
        ("todos", dashboard.todos.error()),
    ] {
        if let Some(error) = error {
            println!("   Error loading {}: {}", name, error);
        }
    }

    println!("\n3. Stats");
    for card in dashboard.stats() {
        println!("   {:<9} {}", card.resource, card.count);
    }

    println!("\n4. Loading again (cached, no request)");
    let report = dashboard.load().await;
    println!("   {:?}", report);

    println!("\n5. Adding a todo and completing it");
    let todo = dashboard.todos.add(NewTodo {
        title: "Review dashboard".to_string(),
    });
    dashboard.todos.toggle(todo.id);

    println!("\n6. Adding then deleting a post");
    let post = dashboard.posts.add(NewPost {
        title: "Release notes".to_string(),
        body: "Draft".to_string(),
    });
    println!("   Posts: {}", dashboard.posts.len());
    dashboard.posts.delete(post.id);
    println!("   Posts: {}", dashboard.posts.len());

    println!("\n7. Overview");
    let overview = dashboard.todos_overview();
    println!("   Completed: {}", overview.completed);
    println!("   Pending: {}", overview.pending);
    for point in dashboard.activity() {
        println!("   {}: {}", point.name, point.value);
    }
    println!("   Recent users:");
    for user in dashboard.recent_users(dashkit::dashboard::RECENT_USERS) {
        println!("     - {}", user.name);
    }

    println!("\n✓ Example complete!");
    Ok(())
}
