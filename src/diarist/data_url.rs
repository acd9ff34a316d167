//! Base64 data URLs, the self-contained form media entries are stored in.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A parsed `data:<media-type>;base64,<payload>` URL.
///
/// Only base64 payloads are accepted: that is the only form canvases and
/// file readers produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    media_type: String,
    payload: String,
}

impl DataUrl {
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self {
            media_type: media_type.to_lowercase(),
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// `image` for `image/png`, `audio` for `audio/mpeg`.
    pub fn top_level_type(&self) -> &str {
        self.media_type
            .split('/')
            .next()
            .unwrap_or(self.media_type.as_str())
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn decode(&self) -> Result<Vec<u8>, ValidationError> {
        STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|_| ValidationError::MalformedDataUrl)
    }
}

impl FromStr for DataUrl {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("data:")
            .ok_or(ValidationError::MalformedDataUrl)?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(ValidationError::MalformedDataUrl)?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default().trim().to_lowercase();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(ValidationError::MalformedDataUrl);
        }
        if payload.is_empty() {
            return Err(ValidationError::EmptyPayload);
        }
        if !media_type.contains('/') {
            return Err(ValidationError::MalformedDataUrl);
        }

        Ok(Self {
            media_type,
            payload: payload.to_string(),
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.media_type, self.payload)
    }
}

/// Media type for an audio file, guessed from its extension.
pub fn audio_media_type(extension: &str) -> Option<&'static str> {
    let media_type = match extension.to_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => return None,
    };
    Some(media_type)
}
