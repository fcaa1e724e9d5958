//! 服务测试用的内存仓储和遥测记录器

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    AuthorRepositoryPort, Outcome, Page, StoryRepositoryPort, TelemetryEvent, TelemetryPort,
};
use crate::domain::{Author, AuthorId, DomainError, ErrorKind, Story, StoryId};

/// 前 N 次调用返回瞬时错误
#[derive(Default)]
struct FaultInjector {
    transient_failures: AtomicU32,
    calls: AtomicU32,
}

impl FaultInjector {
    fn check(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(DomainError::transient("database is locked"));
        }
        Ok(())
    }
}

/// 下一次 update 先用该函数改写已存储的实体（模拟并发写入方），再返回瞬时错误
type ConflictingWrite<T> = Mutex<Option<Box<dyn FnOnce(&mut T) + Send>>>;

fn paginate<T>(items: Vec<T>, page: Page) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

// ============================================================================
// Authors
// ============================================================================

#[derive(Default)]
pub struct InMemoryAuthorRepository {
    authors: Mutex<HashMap<u64, Author>>,
    next_id: AtomicU64,
    faults: FaultInjector,
    conflict: ConflictingWrite<Author>,
}

impl InMemoryAuthorRepository {
    pub fn failing(transient_failures: u32) -> Self {
        let repo = Self::default();
        repo.faults
            .transient_failures
            .store(transient_failures, Ordering::SeqCst);
        repo
    }

    pub fn fail_next(&self, transient_failures: u32) {
        self.faults
            .transient_failures
            .store(transient_failures, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.faults.calls.load(Ordering::SeqCst)
    }

    pub fn insert(&self, author: Author) -> Author {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let author = author.with_id(AuthorId::new(id));
        self.authors.lock().unwrap().insert(id, author.clone());
        author
    }

    pub fn stored(&self, id: AuthorId) -> Option<Author> {
        self.authors.lock().unwrap().get(&id.value()).cloned()
    }

    pub fn conflict_on_next_update(&self, edit: impl FnOnce(&mut Author) + Send + 'static) {
        *self.conflict.lock().unwrap() = Some(Box::new(edit));
    }
}

#[async_trait]
impl AuthorRepositoryPort for InMemoryAuthorRepository {
    async fn create(&self, author: &Author) -> Result<Author, DomainError> {
        self.faults.check()?;
        let exists = self
            .authors
            .lock()
            .unwrap()
            .values()
            .any(|a| a.slug() == author.slug());
        if exists {
            return Err(DomainError::validation("author already exists"));
        }
        Ok(self.insert(author.clone()))
    }

    async fn update(&self, author: &Author) -> Result<Author, DomainError> {
        self.faults.check()?;
        let mut authors = self.authors.lock().unwrap();
        let conflict = self.conflict.lock().unwrap().take();
        match authors.get_mut(&author.id().value()) {
            Some(slot) => {
                if let Some(edit) = conflict {
                    edit(slot);
                    return Err(DomainError::transient("database is locked"));
                }
                *slot = author.clone();
                Ok(author.clone())
            }
            None => Err(DomainError::not_found("author", author.id())),
        }
    }

    async fn delete(&self, id: AuthorId) -> Result<(), DomainError> {
        self.faults.check()?;
        match self.authors.lock().unwrap().remove(&id.value()) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("author", id)),
        }
    }

    async fn get_by_id(&self, id: AuthorId) -> Result<Author, DomainError> {
        self.faults.check()?;
        self.authors
            .lock()
            .unwrap()
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::not_found("author", id))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Author, DomainError> {
        self.faults.check()?;
        self.authors
            .lock()
            .unwrap()
            .values()
            .find(|a| a.slug() == slug)
            .cloned()
            .ok_or_else(|| DomainError::not_found("author", slug))
    }

    async fn list(&self, page: Page) -> Result<Vec<Author>, DomainError> {
        self.faults.check()?;
        let mut authors: Vec<Author> = self.authors.lock().unwrap().values().cloned().collect();
        authors.sort_by_key(|a| a.id());
        Ok(paginate(authors, page))
    }
}

// ============================================================================
// Stories
// ============================================================================

#[derive(Default)]
pub struct InMemoryStoryRepository {
    stories: Mutex<HashMap<u64, Story>>,
    next_id: AtomicU64,
    faults: FaultInjector,
    conflict: ConflictingWrite<Story>,
}

impl InMemoryStoryRepository {
    pub fn failing(transient_failures: u32) -> Self {
        let repo = Self::default();
        repo.faults
            .transient_failures
            .store(transient_failures, Ordering::SeqCst);
        repo
    }

    pub fn fail_next(&self, transient_failures: u32) {
        self.faults
            .transient_failures
            .store(transient_failures, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.faults.calls.load(Ordering::SeqCst)
    }

    pub fn insert(&self, story: Story) -> Story {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let story = story.with_id(StoryId::new(id));
        self.stories.lock().unwrap().insert(id, story.clone());
        story
    }

    pub fn stored(&self, id: StoryId) -> Option<Story> {
        self.stories.lock().unwrap().get(&id.value()).cloned()
    }

    pub fn conflict_on_next_update(&self, edit: impl FnOnce(&mut Story) + Send + 'static) {
        *self.conflict.lock().unwrap() = Some(Box::new(edit));
    }
}

#[async_trait]
impl StoryRepositoryPort for InMemoryStoryRepository {
    async fn create(&self, story: &Story) -> Result<Story, DomainError> {
        self.faults.check()?;
        Ok(self.insert(story.clone()))
    }

    async fn update(&self, story: &Story) -> Result<Story, DomainError> {
        self.faults.check()?;
        let mut stories = self.stories.lock().unwrap();
        let conflict = self.conflict.lock().unwrap().take();
        match stories.get_mut(&story.id().value()) {
            Some(slot) => {
                if let Some(edit) = conflict {
                    edit(slot);
                    return Err(DomainError::transient("database is locked"));
                }
                *slot = story.clone();
                Ok(story.clone())
            }
            None => Err(DomainError::not_found("story", story.id())),
        }
    }

    async fn delete(&self, id: StoryId) -> Result<(), DomainError> {
        self.faults.check()?;
        match self.stories.lock().unwrap().remove(&id.value()) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("story", id)),
        }
    }

    async fn get_by_id(&self, id: StoryId) -> Result<Story, DomainError> {
        self.faults.check()?;
        self.stories
            .lock()
            .unwrap()
            .get(&id.value())
            .cloned()
            .ok_or_else(|| DomainError::not_found("story", id))
    }

    async fn list(&self, page: Page) -> Result<Vec<Story>, DomainError> {
        self.faults.check()?;
        let mut stories: Vec<Story> = self.stories.lock().unwrap().values().cloned().collect();
        stories.sort_by_key(|s| s.id());
        Ok(paginate(stories, page))
    }

    async fn list_by_author(
        &self,
        author_id: AuthorId,
        page: Page,
    ) -> Result<Vec<Story>, DomainError> {
        self.faults.check()?;
        let mut stories: Vec<Story> = self
            .stories
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.author_id() == author_id)
            .cloned()
            .collect();
        stories.sort_by_key(|s| s.id());
        Ok(paginate(stories, page))
    }
}

// ============================================================================
// Telemetry
// ============================================================================

#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    /// 形如 `story.create.attempt` 的事件序列
    pub fn keys(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(TelemetryEvent::metric_key)
            .collect()
    }

    /// 最后一个 error 事件的错误种类
    pub fn last_error_kind(&self) -> Option<ErrorKind> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|e| e.outcome == Outcome::Error)
            .and_then(|e| e.error_kind)
    }
}

impl TelemetryPort for RecordingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
