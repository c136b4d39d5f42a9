//! Voice input: encoded uploads or raw PCM frames from the browser's audio processor.

use axum::{
    Router,
    extract::{Multipart, Path, Query, State},
    response::Json as ResponseJson,
    routing::post,
};
use helpdesk::{AudioCapture, AudioClip, Transcript, TurnResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utils::response::ApiResponse;
use uuid::Uuid;

use super::ApiJson;
use crate::{AppState, error::ApiError};

/// Multipart fields accepted as the audio payload.
const AUDIO_FIELDS: &[&str] = &["file", "audio"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions/{id}/voice", post(upload_voice))
        .route("/sessions/{id}/voice/pcm", post(upload_pcm))
}

#[derive(Debug, Default, Deserialize)]
pub struct VoiceQuery {
    /// Run the transcript as a query right away
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub transcript: Transcript,
    pub turn: Option<TurnResponse>,
}

/// POST /api/sessions/{id}/voice - Transcribe an uploaded recording
async fn upload_voice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<VoiceQuery>,
    mut multipart: Multipart,
) -> Result<ResponseJson<ApiResponse<VoiceResponse>>, ApiError> {
    let session = state.session(id)?;

    let mut clip = None;
    while let Some(field) = multipart.next_field().await? {
        if !field.name().is_some_and(|name| AUDIO_FIELDS.contains(&name)) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("speech.wav").to_string();
        let mime_type = field.content_type().unwrap_or("audio/wav").to_string();
        let bytes = field.bytes().await?;
        debug!("Received {} byte voice upload {:?} ({})", bytes.len(), file_name, mime_type);
        clip = Some(AudioClip::new(bytes.to_vec(), file_name, mime_type));
        break;
    }
    let clip = clip.ok_or_else(|| ApiError::BadRequest("Missing audio file field".into()))?;

    let mut session = session.lock().await;
    let transcript = state.orchestrator().transcribe(&session, clip).await;
    let turn = match (&transcript.text, params.submit) {
        (Some(text), true) => Some(state.orchestrator().submit_query(&mut session, text).await?),
        _ => None,
    };

    Ok(ResponseJson(ApiResponse::success(VoiceResponse { transcript, turn })))
}

/// POST /api/sessions/{id}/voice/pcm - Encode captured PCM frames to WAV and transcribe
async fn upload_pcm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<VoiceQuery>,
    ApiJson(capture): ApiJson<AudioCapture>,
) -> Result<ResponseJson<ApiResponse<VoiceResponse>>, ApiError> {
    let session = state.session(id)?;
    let mut session = session.lock().await;

    let transcript = state.orchestrator().transcribe_capture(&session, capture).await;
    let turn = match (&transcript.text, params.submit) {
        (Some(text), true) => Some(state.orchestrator().submit_query(&mut session, text).await?),
        _ => None,
    };

    Ok(ResponseJson(ApiResponse::success(VoiceResponse { transcript, turn })))
}
