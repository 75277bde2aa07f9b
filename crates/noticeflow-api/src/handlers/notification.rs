//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use noticeflow_entity::notification::ReviewAction;
use noticeflow_service::notification::{NewNotification, parse_hearing_date};

use crate::dto::request::{
    CreateNotificationRequest, CreatePersonRequest, ReviewRequest, UpdateNotificationRequest,
    UpdatePersonRequest,
};
use crate::dto::response::{ApiResponse, NotificationResponse, PersonResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /notifications
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NotificationResponse>>), ApiError> {
    let input = NewNotification {
        hearing_date: parse_hearing_date(&req.hearing_date)?,
        title: req.title,
        description: req.description,
    };
    let notification = state.notification_service.create(&auth, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Notification created",
            NotificationResponse::from(notification),
        )),
    ))
}

/// GET /notifications?page=N
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<NotificationResponse>>>, ApiError> {
    let page = state
        .notification_service
        .list(&auth, params.page())
        .await?
        .map(NotificationResponse::from);
    Ok(Json(ApiResponse::paged("Notifications", page)))
}

/// GET /notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let view = state.notification_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        "Notification",
        NotificationResponse::from(view),
    )))
}

/// PUT /notifications
pub async fn update_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateNotificationRequest>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let hearing_date = req
        .hearing_date
        .as_deref()
        .map(parse_hearing_date)
        .transpose()?;
    let id = req.notification_id;
    let updated = state
        .notification_service
        .edit(&auth, id, req.into_changes(hearing_date))
        .await?;
    Ok(Json(ApiResponse::ok(
        "Notification updated",
        NotificationResponse::from(updated),
    )))
}

/// POST /notifications/person
///
/// Attaching the person submits the notification for validation.
pub async fn create_person(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePersonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PersonResponse>>), ApiError> {
    let person = state
        .notification_service
        .attach_person(&auth, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Notified person created; notification sent to validation",
            PersonResponse::from(person),
        )),
    ))
}

/// PUT /notifications/person
pub async fn update_person(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdatePersonRequest>,
) -> Result<Json<ApiResponse<PersonResponse>>, ApiError> {
    let (id, changes) = req.into_parts();
    let person = state
        .notification_service
        .edit_person(&auth, id, changes)
        .await?;
    Ok(Json(ApiResponse::ok(
        "Notified person updated",
        PersonResponse::from(person),
    )))
}

/// POST /notifications/review
pub async fn review_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ReviewRequest>,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let action: ReviewAction = req.action.parse()?;
    let view = state
        .notification_service
        .review(&auth, req.notification_id, action)
        .await?;
    Ok(Json(ApiResponse::ok(
        format!("Notification {}", view.details.notification.status),
        NotificationResponse::from(view),
    )))
}
