//! Shared posts state and the reconcile step.

use tokio::sync::watch;

use crate::types::PostsCollection;

/// State mutations the pipeline may request.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsAction {
    /// Replace the whole collection.
    SetPosts(PostsCollection),
}

/// Explicit interface to the application's posts state.
pub trait PostsStore: Send + Sync {
    fn dispatch(&self, action: PostsAction);

    /// Snapshot of the current collection.
    fn posts(&self) -> PostsCollection;
}

/// Replace local post state with the server's authoritative collection.
///
/// Full replace, never a merge: posts missing from `posts` are gone.
pub fn reconcile<S: PostsStore + ?Sized>(store: &S, posts: PostsCollection) {
    tracing::info!(count = posts.len(), "Reconciling posts collection");
    store.dispatch(PostsAction::SetPosts(posts));
}

/// In-memory posts store backed by a `watch` channel.
///
/// Clones share the same state. Consumers that render the collection can
/// [`subscribe`](SharedPosts::subscribe) and are woken on every replace.
#[derive(Clone)]
pub struct SharedPosts {
    tx: watch::Sender<PostsCollection>,
}

impl SharedPosts {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: PostsCollection) -> Self {
        let (tx, _rx) = watch::channel(posts);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<PostsCollection> {
        self.tx.subscribe()
    }
}

impl Default for SharedPosts {
    fn default() -> Self {
        Self::new()
    }
}

impl PostsStore for SharedPosts {
    fn dispatch(&self, action: PostsAction) {
        match action {
            PostsAction::SetPosts(posts) => {
                self.tx.send_replace(posts);
            }
        }
    }

    fn posts(&self) -> PostsCollection {
        self.tx.borrow().clone()
    }
}
