//! Story Display Service - 聚合服务
//!
//! 先取故事，再取作者。作者失败不丢弃已经取到的故事（部分成功）。

use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::application::ports::{AuthorProvider, StoryProvider};
use crate::application::queries::GetStoryDisplayDetails;
use crate::domain::{Author, DomainError, Story};

/// 展示详情
///
/// | story | author | error | 含义 |
/// |-------|--------|-------|------|
/// | Some  | Some   | None  | 完整成功 |
/// | Some  | None   | Some  | 部分成功（作者失败） |
/// | None  | None   | Some  | 故事失败 |
#[derive(Debug)]
pub struct DisplayDetails {
    pub story: Option<Story>,
    pub author: Option<Author>,
    pub error: Option<DomainError>,
}

impl DisplayDetails {
    fn complete(story: Story, author: Author) -> Self {
        Self {
            story: Some(story),
            author: Some(author),
            error: None,
        }
    }

    fn partial(story: Story, error: DomainError) -> Self {
        Self {
            story: Some(story),
            author: None,
            error: Some(error),
        }
    }

    fn failed(error: DomainError) -> Self {
        Self {
            story: None,
            author: None,
            error: Some(error),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.story.is_some() && self.error.is_some()
    }

    /// 要求故事和作者都存在
    pub fn into_result(self) -> Result<(Story, Author), DomainError> {
        match (self.story, self.author, self.error) {
            (_, _, Some(err)) => Err(err),
            (Some(story), Some(author), None) => Ok((story, author)),
            _ => Err(DomainError::unexpected("display details missing story or author")),
        }
    }

    /// 只要求故事存在，作者失败时返回 None
    pub fn into_story_result(self) -> Result<(Story, Option<Author>), DomainError> {
        match (self.story, self.error) {
            (Some(story), _) => Ok((story, self.author)),
            (None, Some(err)) => Err(err),
            (None, None) => Err(DomainError::unexpected("display details missing story")),
        }
    }
}

/// 聚合服务
pub struct StoryDisplayService {
    stories: Arc<dyn StoryProvider>,
    authors: Arc<dyn AuthorProvider>,
}

impl StoryDisplayService {
    pub fn new(stories: Arc<dyn StoryProvider>, authors: Arc<dyn AuthorProvider>) -> Self {
        Self { stories, authors }
    }

    pub async fn get_display_details(
        &self,
        ctx: &RequestContext,
        query: GetStoryDisplayDetails,
    ) -> DisplayDetails {
        let story = match self.stories.get_story(ctx, query.story_id).await {
            Ok(story) => story,
            Err(err) => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    story_id = %query.story_id,
                    error_type = %err.kind(),
                    "Story lookup failed"
                );
                return DisplayDetails::failed(err);
            }
        };

        match self.authors.get_author(ctx, story.author_id()).await {
            Ok(author) => DisplayDetails::complete(story, author),
            Err(err) => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    story_id = %story.id(),
                    author_id = %story.author_id(),
                    error_type = %err.kind(),
                    "Author lookup failed, returning partial details"
                );
                DisplayDetails::partial(story, err)
            }
        }
    }
}
