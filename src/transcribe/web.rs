use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;

use super::{TranscribeError, Transcriber};

/// Multipart field carrying the uploaded audio.
pub const AUDIO_FIELD: &str = "audio_file";
/// File name offered to the browser for the result.
pub const DOWNLOAD_NAME: &str = "transcription.mid";

const UPLOAD_FORM: &str = r#"<!doctype html>
<title>Audio to MIDI</title>
<h1>Upload audio file</h1>
<form method=post enctype=multipart/form-data>
  <input type=file name=audio_file accept="audio/*">
  <input type=submit value=Transcribe>
</form>
"#;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct WebState {
    transcriber: Arc<dyn Transcriber>,
}

impl WebState {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self { transcriber }
    }
}

/// Listener settings for [`run_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
}

/// HTTP error variants mapped to plain-text responses.
#[derive(Debug)]
pub enum WebError {
    Upload(MultipartError),
    Transcription(TranscribeError),
    Internal(String),
}

impl From<MultipartError> for WebError {
    fn from(e: MultipartError) -> Self {
        Self::Upload(e)
    }
}

impl From<TranscribeError> for WebError {
    fn from(e: TranscribeError) -> Self {
        Self::Transcription(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Upload(e) => (StatusCode::BAD_REQUEST, format!("malformed upload: {e}")),
            Self::Transcription(e) if e.is_bad_input() => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            Self::Transcription(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        log::error!("request failed with {status}: {message}");
        (status, message).into_response()
    }
}

/// Build the router: `GET /` shows the form, `POST /` transcribes.
pub fn build_router(state: WebState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(upload_form).post(transcribe_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Run the HTTP server until Ctrl-C.
pub async fn run_server(state: WebState, config: ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    log::info!("listening on http://{}", config.addr);
    let router = build_router(state, config.max_upload_bytes);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("serving transcription router")?;
    Ok(())
}

async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

async fn transcribe_upload(
    State(state): State<WebState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, WebError> {
    let Ok(mut multipart) = multipart else {
        return Ok(back_to_form());
    };
    let Some((file_name, bytes)) = read_audio_field(&mut multipart).await? else {
        return Ok(back_to_form());
    };

    let suffix = Path::new(&file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let mut upload = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| WebError::Internal(format!("creating temp file: {e}")))?;
    upload
        .write_all(&bytes)
        .map_err(|e| WebError::Internal(format!("saving upload: {e}")))?;

    log::info!("transcribing '{file_name}' ({} bytes)", bytes.len());
    let transcriber = Arc::clone(&state.transcriber);
    // `upload` moves into the task so the file outlives the transcription.
    let midi = tokio::task::spawn_blocking(move || transcriber.transcribe(upload.path()))
        .await
        .map_err(|e| WebError::Internal(format!("transcription task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/midi".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
            ),
        ],
        midi,
    )
        .into_response())
}

/// Find the audio field; `None` when it is missing or has no file.
async fn read_audio_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Vec<u8>)>, WebError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Ok(None);
        }
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some((file_name, bytes.to_vec())));
    }
    Ok(None)
}

fn back_to_form() -> Response {
    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "labelerboundary";
    const FAKE_MIDI: &[u8] = b"MThd-fake";

    /// Records the extension of the file it was handed.
    #[derive(Default)]
    struct StubTranscriber {
        seen_ext: Mutex<Option<String>>,
        fail: bool,
    }

    impl Transcriber for StubTranscriber {
        fn transcribe(&self, audio: &Path) -> Result<Vec<u8>, TranscribeError> {
            *self.seen_ext.lock().unwrap() = audio
                .extension()
                .map(|e| e.to_string_lossy().into_owned());
            assert!(audio.exists());
            if self.fail {
                Err(TranscribeError::EmptyAudio)
            } else {
                Ok(FAKE_MIDI.to_vec())
            }
        }
    }

    fn router(stub: Arc<StubTranscriber>) -> Router {
        build_router(WebState::new(stub), 1024 * 1024)
    }

    fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("post request")
    }

    #[tokio::test]
    async fn get_serves_the_upload_form() {
        let response = router(Arc::default())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(html.to_vec()).unwrap();
        assert!(html.contains("name=audio_file"));
        assert!(html.contains("multipart/form-data"));
    }

    #[tokio::test]
    async fn upload_returns_midi_attachment() {
        let stub = Arc::new(StubTranscriber::default());
        let response = router(stub.clone())
            .oneshot(post(multipart_body(AUDIO_FIELD, "song.wav", b"RIFF....")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/midi");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"transcription.mid\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], FAKE_MIDI);
        assert_eq!(stub.seen_ext.lock().unwrap().as_deref(), Some("wav"));
    }

    #[tokio::test]
    async fn missing_field_redirects_to_form() {
        let response = router(Arc::default())
            .oneshot(post(multipart_body("other", "song.wav", b"data")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn empty_filename_redirects_to_form() {
        let response = router(Arc::default())
            .oneshot(post(multipart_body(AUDIO_FIELD, "", b"data")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn non_multipart_post_redirects_to_form() {
        let response = router(Arc::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn bad_audio_is_unprocessable() {
        let stub = Arc::new(StubTranscriber {
            fail: true,
            ..Default::default()
        });
        let response = router(stub)
            .oneshot(post(multipart_body(AUDIO_FIELD, "song.mp3", b"junk")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
