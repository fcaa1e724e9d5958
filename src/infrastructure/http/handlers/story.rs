//! Story HTTP Handlers
//!
//! - GET  /v1.2/stories?id=N        固定字段投影（旧版客户端）
//! - GET  /v2.0/stories/:id         完整故事和作者
//! - POST /v2.0/stories/:id/view    按请求体中的字段选择投影

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};

use crate::application::projection::{legacy_selection, project, Selection, StoryProjection};
use crate::application::{DisplayDetails, GetStoryDisplayDetails, RequestContext};
use crate::domain::{Author, DomainError, Story, StoryId};
use crate::infrastructure::http::dto::{
    ApiResponse, AuthorResponse, LegacyStoryQuery, StoryDetailsResponse, StoryResponse,
    ViewRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /v1.2/stories?id=N
pub async fn get_story_legacy(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<LegacyStoryQuery>,
) -> Result<Json<ApiResponse<StoryProjection>>, ApiError> {
    let raw_id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("story ID is required".to_string()))?;
    let story_id: StoryId = raw_id.parse()?;

    let details = load_details(&state, &ctx, story_id).await;
    render_projection(details, &legacy_selection())
}

/// GET /v2.0/stories/:id
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<StoryDetailsResponse>>, ApiError> {
    let story_id: StoryId = raw_id.parse()?;

    let details = load_details(&state, &ctx, story_id).await;
    let (story, author, author_error) = split(details)?;

    let data = StoryDetailsResponse {
        story: StoryResponse::from(&story),
        author: author.as_ref().map(AuthorResponse::from),
    };
    Ok(Json(wrap(data, author_error)))
}

/// POST /v2.0/stories/:id/view
pub async fn view_story(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(raw_id): Path<String>,
    body: Result<Json<ViewRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<StoryProjection>>, ApiError> {
    let story_id: StoryId = raw_id.parse()?;
    let Json(req) = body.map_err(|rejection| {
        tracing::warn!(
            request_id = %ctx.request_id(),
            error = %rejection.body_text(),
            "Rejected view request body"
        );
        ApiError::BadRequest("invalid request body".to_string())
    })?;
    let selection = Selection::from_json(&req.fields);

    let details = load_details(&state, &ctx, story_id).await;
    render_projection(details, &selection)
}

// ============================================================================
// Helpers
// ============================================================================

async fn load_details(state: &AppState, ctx: &RequestContext, story_id: StoryId) -> DisplayDetails {
    state
        .display_service
        .get_display_details(ctx, GetStoryDisplayDetails { story_id })
        .await
}

/// 故事失败 → 错误响应；作者失败 → 保留故事，带上作者错误
fn split(details: DisplayDetails) -> Result<(Story, Option<Author>, Option<DomainError>), ApiError> {
    let DisplayDetails {
        story,
        author,
        error,
    } = details;

    match (story, error) {
        (Some(story), error) => Ok((story, author, error)),
        (None, Some(err)) => Err(err.into()),
        (None, None) => Err(ApiError::Internal("unexpected error occurred".to_string())),
    }
}

fn render_projection(
    details: DisplayDetails,
    selection: &Selection,
) -> Result<Json<ApiResponse<StoryProjection>>, ApiError> {
    let (story, author, author_error) = split(details)?;
    let projection = project(&story, author.as_ref(), selection);
    Ok(Json(wrap(projection, author_error)))
}

fn wrap<T: serde::Serialize>(data: T, author_error: Option<DomainError>) -> ApiResponse<T> {
    match author_error {
        Some(err) => ApiResponse::partial(data, err.public_message()),
        None => ApiResponse::success(data),
    }
}
