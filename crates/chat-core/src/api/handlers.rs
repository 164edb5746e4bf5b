//! Chat endpoint handlers

use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use super::AppState;
use super::error::{body_rejection, path_rejection, query_rejection};
use super::input;
use crate::Result;
use crate::chat::{Chat, ChatWithMessages, Message};

type ChatId = std::result::Result<Path<i64>, PathRejection>;
type JsonBody = std::result::Result<Json<Value>, JsonRejection>;
type QueryParams = std::result::Result<Query<HashMap<String, String>>, QueryRejection>;

/// `POST /chats` - create a chat
pub async fn create_chat(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<(StatusCode, Json<Chat>)> {
    let Json(body) = body.map_err(body_rejection)?;
    let request = input::chat_request(&body)?;
    let chat = state.service.create_chat(request).await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

/// `POST /chats/{chat_id}/messages` - post a message into a chat
pub async fn create_message(
    State(state): State<AppState>,
    chat_id: ChatId,
    body: JsonBody,
) -> Result<(StatusCode, Json<Message>)> {
    let Path(chat_id) = chat_id.map_err(path_rejection)?;
    let Json(body) = body.map_err(body_rejection)?;
    let request = input::message_request(&body)?;
    let message = state.service.create_message(chat_id, request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /chats/{chat_id}?limit=&offset=` - chat with a page of messages
pub async fn get_chat(
    State(state): State<AppState>,
    chat_id: ChatId,
    params: QueryParams,
) -> Result<Json<ChatWithMessages>> {
    let Path(chat_id) = chat_id.map_err(path_rejection)?;
    let Query(params) = params.map_err(query_rejection)?;
    let pagination = input::pagination(&params)?;
    let chat = state
        .service
        .get_chat_with_messages(chat_id, pagination)
        .await?;
    Ok(Json(chat))
}

/// `DELETE /chats/{chat_id}` - delete a chat and its messages
pub async fn delete_chat(State(state): State<AppState>, chat_id: ChatId) -> Result<StatusCode> {
    let Path(chat_id) = chat_id.map_err(path_rejection)?;
    state.service.delete_chat(chat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
