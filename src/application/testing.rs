//! In-memory collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::{DeliveryError, DirectoryError, FetchError, ResolveError};
use crate::domain::traits::{ChatProvider, Destinations, FeedSource, RecipientDirectory};
use crate::domain::types::{Item, RecipientBinding, RecipientGroup};

pub fn item(id: &str, published: i64) -> Item {
    Item {
        id: id.to_string(),
        title: format!("Haber {id}"),
        body: format!("Detaylar {id}"),
        published,
        media: None,
    }
}

pub fn group(id: &str, bindings: &[(&str, &str)]) -> RecipientGroup {
    RecipientGroup {
        id: id.to_string(),
        bindings: bindings
            .iter()
            .map(|(feed, room)| RecipientBinding {
                group: id.to_string(),
                feed: feed.to_string(),
                destination: room.to_string(),
                mention: format!("@editor-{id}:example.org"),
            })
            .collect(),
    }
}

/// Plays back scripted fetch results, then reports an empty feed forever.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<Item>, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<Item>, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    async fn fetch(&self, _feed_id: &str) -> Result<Vec<Item>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
    }
}

/// Always returns the same items for a given feed.
#[derive(Default)]
pub struct StaticSource {
    feeds: HashMap<String, Vec<Item>>,
}

impl StaticSource {
    pub fn new(feeds: &[(&str, Vec<Item>)]) -> Self {
        Self {
            feeds: feeds
                .iter()
                .map(|(feed, items)| (feed.to_string(), items.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl FeedSource for StaticSource {
    async fn fetch(&self, feed_id: &str) -> Result<Vec<Item>, FetchError> {
        Ok(self.feeds.get(feed_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MemoryDirectory {
    groups: Mutex<Vec<RecipientGroup>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryDirectory {
    pub fn new(groups: Vec<RecipientGroup>) -> Self {
        Self {
            groups: Mutex::new(groups),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipientDirectory for MemoryDirectory {
    async fn list_groups(&self) -> Result<Vec<RecipientGroup>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::Backend("store offline".to_string()));
        }
        Ok(self.groups.lock().unwrap().clone())
    }
}

/// Never answers a lookup; counts how often it was asked.
#[derive(Default)]
pub struct StalledDirectory {
    calls: AtomicUsize,
}

impl StalledDirectory {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipientDirectory for StalledDirectory {
    async fn list_groups(&self) -> Result<Vec<RecipientGroup>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// How a fake room behaves when resolved / posted to.
#[derive(Clone)]
pub enum RoomBehavior {
    Accepts,
    Unresolvable(ResolveError),
    RejectsPosts,
}

type PostLog = Arc<Mutex<Vec<(String, String)>>>;

/// Records every successful post as `(room, text)`.
#[derive(Default)]
pub struct RecordingDestinations {
    rooms: Mutex<HashMap<String, RoomBehavior>>,
    posts: PostLog,
}

impl RecordingDestinations {
    pub fn with_rooms(rooms: &[(&str, RoomBehavior)]) -> Self {
        let destinations = Self::default();
        {
            let mut map = destinations.rooms.lock().unwrap();
            for (room, behavior) in rooms {
                map.insert(room.to_string(), behavior.clone());
            }
        }
        destinations
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn rooms_posted(&self) -> Vec<String> {
        let mut rooms: Vec<String> = self.posts().into_iter().map(|(room, _)| room).collect();
        rooms.sort();
        rooms
    }
}

struct RecordingRoom {
    id: String,
    rejects: bool,
    posts: PostLog,
}

#[async_trait]
impl ChatProvider for RecordingRoom {
    async fn send_notification(&self, content: &str) -> Result<(), DeliveryError> {
        if self.rejects {
            return Err(DeliveryError("M_FORBIDDEN".to_string()));
        }
        self.posts
            .lock()
            .unwrap()
            .push((self.id.clone(), content.to_string()));
        Ok(())
    }

    fn room_id(&self) -> String {
        self.id.clone()
    }
}

#[async_trait]
impl Destinations for RecordingDestinations {
    async fn resolve(&self, destination_id: &str) -> Result<Arc<dyn ChatProvider>, ResolveError> {
        let behavior = self
            .rooms
            .lock()
            .unwrap()
            .get(destination_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(destination_id.to_string()))?;

        match behavior {
            RoomBehavior::Unresolvable(err) => Err(err),
            RoomBehavior::Accepts | RoomBehavior::RejectsPosts => Ok(Arc::new(RecordingRoom {
                id: destination_id.to_string(),
                rejects: matches!(behavior, RoomBehavior::RejectsPosts),
                posts: self.posts.clone(),
            })),
        }
    }
}
