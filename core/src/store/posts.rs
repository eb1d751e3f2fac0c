// Demo record store backing the background-sync demo
//
// Stands in for the reactive local database: writes go through the
// key-value backend, and a broadcast channel lets screens observe
// changes for live updates.

use crate::store::backend::StorageBackend;
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

const POSTS_KEY: &str = "@posts";
const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Clone)]
pub enum PostEvent {
    Created(Post),
    Deleted(String),
}

#[derive(Clone)]
pub struct PostStore {
    backend: Arc<dyn StorageBackend>,
    events: broadcast::Sender<PostEvent>,
}

impl PostStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { backend, events }
    }

    pub fn create(&self, title: &str, body: &str) -> Result<Post, CoreError> {
        let now = crate::current_timestamp();
        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut posts = self.all()?;
        posts.push(post.clone());
        self.write(&posts)?;

        // Nobody listening is fine
        let _ = self.events.send(PostEvent::Created(post.clone()));
        Ok(post)
    }

    pub fn all(&self) -> Result<Vec<Post>, CoreError> {
        let raw = self.backend.get(POSTS_KEY).map_err(CoreError::Storage)?;
        match raw {
            Some(data) => {
                serde_json::from_slice(&data).map_err(|e| CoreError::Internal(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        let posts: Vec<Post> = self.all()?.into_iter().filter(|p| p.id != id).collect();
        self.write(&posts)?;
        let _ = self.events.send(PostEvent::Deleted(id.to_string()));
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.all().map(|p| p.len()).unwrap_or(0)
    }

    /// Observe creations and deletions for live UI updates.
    pub fn subscribe(&self) -> broadcast::Receiver<PostEvent> {
        self.events.subscribe()
    }

    fn write(&self, posts: &[Post]) -> Result<(), CoreError> {
        let encoded = serde_json::to_vec(posts).map_err(|e| CoreError::Internal(e.to_string()))?;
        self.backend.put(POSTS_KEY, &encoded).map_err(CoreError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::MemoryStorage;

    fn store() -> PostStore {
        PostStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn create_and_list() {
        let store = store();
        let post = store.create("New Post", "").unwrap();
        assert_eq!(post.created_at, post.updated_at);

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "New Post");
    }

    #[test]
    fn delete_removes_by_id() {
        let store = store();
        let post = store.create("a", "").unwrap();
        store.create("b", "").unwrap();

        store.delete(&post.id).unwrap();
        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "b");
    }

    #[tokio::test]
    async fn subscribers_observe_creations() {
        let store = store();
        let mut events = store.subscribe();

        let post = store.create("observed", "").unwrap();
        match events.recv().await.unwrap() {
            PostEvent::Created(created) => assert_eq!(created.id, post.id),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn subscribers_observe_deletions() {
        let store = store();
        let post = store.create("observed", "").unwrap();

        let mut events = store.subscribe();
        store.delete(&post.id).unwrap();
        match events.recv().await.unwrap() {
            PostEvent::Deleted(id) => assert_eq!(id, post.id),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
