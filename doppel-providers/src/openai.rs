use crate::request::HttpRequest;
use doppel_core::WireMessage;
use serde_json::json;

#[derive(Clone, PartialEq, Eq)]
pub struct ChatEndpointConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for ChatEndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SpeechEndpointConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub voice: String,
}

impl std::fmt::Debug for SpeechEndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechEndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("voice", &self.voice)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TranscriptionEndpointConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for TranscriptionEndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionEndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Recorded audio handed to the transcription endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// `POST {base}/chat/completions` with the flattened history. The payload is
/// exactly `{model, messages}`; sampling is left to provider defaults.
pub fn build_chat_request(cfg: &ChatEndpointConfig, messages: &[WireMessage]) -> HttpRequest {
    let payload = json!({
        "model": cfg.model,
        "messages": messages
            .iter()
            .map(|m| json!({"role": m.role, "content": m.content}))
            .collect::<Vec<_>>(),
    });

    HttpRequest::post_json(join_url(&cfg.base_url, "/chat/completions"), &payload)
        .with_bearer(&cfg.api_key)
}

/// Chat variant constrained to a JSON object response, used by the
/// summarizer.
pub fn build_json_chat_request(cfg: &ChatEndpointConfig, messages: &[WireMessage]) -> HttpRequest {
    let payload = json!({
        "model": cfg.model,
        "messages": messages
            .iter()
            .map(|m| json!({"role": m.role, "content": m.content}))
            .collect::<Vec<_>>(),
        "response_format": {"type": "json_object"},
    });

    HttpRequest::post_json(join_url(&cfg.base_url, "/chat/completions"), &payload)
        .with_bearer(&cfg.api_key)
}

/// `POST {base}/audio/speech`; the response body is binary audio/mpeg.
pub fn build_speech_request(cfg: &SpeechEndpointConfig, input: &str) -> HttpRequest {
    let payload = json!({
        "model": cfg.model,
        "input": input,
        "voice": cfg.voice,
        "response_format": "mp3",
    });

    HttpRequest::post_json(join_url(&cfg.base_url, "/audio/speech"), &payload)
        .with_bearer(&cfg.api_key)
        .with_header("Accept", "audio/mpeg")
}

/// `POST {base}/audio/transcriptions` as multipart form data: the audio file
/// plus the model field.
pub fn build_transcription_request(
    cfg: &TranscriptionEndpointConfig,
    audio: &AudioUpload,
) -> HttpRequest {
    let boundary = format!("Boundary-{}", uuid::Uuid::new_v4());

    let mut body: Vec<u8> = Vec::new();
    append_file(
        &mut body,
        &boundary,
        "file",
        &audio.filename,
        &audio.mime_type,
        &audio.bytes,
    );
    append_field(&mut body, &boundary, "model", &cfg.model);
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    HttpRequest::post_multipart(
        join_url(&cfg.base_url, "/audio/transcriptions"),
        boundary,
        body,
    )
    .with_bearer(&cfg.api_key)
    .with_header("Accept", "application/json")
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

fn append_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

fn append_file(
    body: &mut Vec<u8>,
    boundary: &str,
    name: &str,
    filename: &str,
    mime_type: &str,
    bytes: &[u8],
) {
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_cfg() -> ChatEndpointConfig {
        ChatEndpointConfig {
            base_url: "https://api.example.com/v1/".into(),
            api_key: "k".into(),
            model: "gpt-4o".into(),
        }
    }

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("https://api.example.com/", "/chat/completions"),
            "https://api.example.com/chat/completions"
        );
        assert_eq!(
            join_url("https://api.example.com", "chat/completions"),
            "https://api.example.com/chat/completions"
        );
    }

    #[test]
    fn chat_request_sends_model_and_messages_only() {
        let req = build_chat_request(&chat_cfg(), &[WireMessage::new("user", "hi")]);

        assert_eq!(req.method, "POST");
        assert_eq!(req.url, "https://api.example.com/v1/chat/completions");
        assert_eq!(req.header("authorization"), Some("Bearer k"));
        match &req.body {
            crate::request::Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(s).unwrap();
                assert_eq!(v["model"], "gpt-4o");
                assert_eq!(v["messages"][0]["role"], "user");
                assert_eq!(v["messages"][0]["content"], "hi");
                assert!(v.get("temperature").is_none());
                assert!(v.get("response_format").is_none());
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn json_chat_request_constrains_the_response() {
        let req = build_json_chat_request(&chat_cfg(), &[WireMessage::new("developer", "sum")]);
        match &req.body {
            crate::request::Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(s).unwrap();
                assert_eq!(v["response_format"]["type"], "json_object");
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn speech_request_carries_voice_and_accepts_audio() {
        let cfg = SpeechEndpointConfig {
            base_url: "https://api.example.com/v1".into(),
            api_key: "k".into(),
            model: "tts-1".into(),
            voice: "alloy".into(),
        };
        let req = build_speech_request(&cfg, "hello there");

        assert!(req.url.ends_with("/audio/speech"));
        assert_eq!(req.header("accept"), Some("audio/mpeg"));
        match &req.body {
            crate::request::Body::Json(s) => {
                let v: serde_json::Value = serde_json::from_str(s).unwrap();
                assert_eq!(v["model"], "tts-1");
                assert_eq!(v["voice"], "alloy");
                assert_eq!(v["input"], "hello there");
                assert_eq!(v["response_format"], "mp3");
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn transcription_request_is_multipart_with_file_and_model() {
        let cfg = TranscriptionEndpointConfig {
            base_url: "https://api.example.com/v1".into(),
            api_key: "k".into(),
            model: "whisper-1".into(),
        };
        let audio = AudioUpload {
            filename: "answer.mp3".into(),
            mime_type: "audio/mpeg".into(),
            bytes: vec![1, 2, 3],
        };
        let req = build_transcription_request(&cfg, &audio);

        assert!(req.url.ends_with("/audio/transcriptions"));
        assert_eq!(req.header("authorization"), Some("Bearer k"));
        match &req.body {
            crate::request::Body::MultipartFormData { boundary, bytes } => {
                let s = String::from_utf8_lossy(bytes);
                assert!(s.contains("name=\"file\""));
                assert!(s.contains("filename=\"answer.mp3\""));
                assert!(s.contains("Content-Type: audio/mpeg"));
                assert!(s.contains("name=\"model\""));
                assert!(s.contains("whisper-1"));
                assert!(s.ends_with(&format!("--{boundary}--\r\n")));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_configs_redact_keys_in_debug() {
        let s = format!("{:?}", chat_cfg());
        assert!(!s.contains("\"k\""));
        assert!(s.contains("[REDACTED]"));
    }
}
