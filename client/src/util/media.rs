//! Microphone access via `getUserMedia` and `MediaRecorder`.
//!
//! Hydrate builds request an audio-only stream and start a recorder over it.
//! SSR builds report [`MediaError::Unsupported`].

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use crate::state::call::{CaptureSession, MediaAccess, MediaError};

#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;

/// Map a DOM exception name from the permission prompt to a [`MediaError`].
#[must_use]
pub fn classify_media_failure(name: &str, message: &str) -> MediaError {
    match name {
        "NotAllowedError" | "SecurityError" => MediaError::Denied(message.to_owned()),
        "NotSupportedError" => MediaError::Unsupported,
        _ => MediaError::Device(format!("{name}: {message}")),
    }
}

#[cfg(feature = "hydrate")]
fn js_failure(err: &wasm_bindgen::JsValue) -> MediaError {
    let field = |key: &str| {
        js_sys::Reflect::get(err, &wasm_bindgen::JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    classify_media_failure(&field("name"), &field("message"))
}

#[cfg(feature = "hydrate")]
fn stop_tracks(stream: &web_sys::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Active `MediaRecorder` capture.
#[derive(Debug)]
pub struct BrowserCapture {
    #[cfg(feature = "hydrate")]
    recorder: web_sys::MediaRecorder,
}

impl CaptureSession for BrowserCapture {
    fn stop(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            if self.recorder.state() != web_sys::RecordingState::Inactive {
                let _ = self.recorder.stop();
            }
            stop_tracks(&self.recorder.stream());
        }
    }
}

/// The browser's media devices.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserMedia;

#[cfg(feature = "hydrate")]
impl MediaAccess for BrowserMedia {
    type Stream = web_sys::MediaStream;
    type Session = BrowserCapture;

    async fn request_audio_access(&self) -> Result<web_sys::MediaStream, MediaError> {
        let devices = web_sys::window()
            .ok_or(MediaError::Unsupported)?
            .navigator()
            .media_devices()
            .map_err(|_| MediaError::Unsupported)?;
        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_audio(&wasm_bindgen::JsValue::TRUE);
        let promise = devices.get_user_media_with_constraints(&constraints).map_err(|e| js_failure(&e))?;
        let stream = wasm_bindgen_futures::JsFuture::from(promise).await.map_err(|e| js_failure(&e))?;
        stream
            .dyn_into::<web_sys::MediaStream>()
            .map_err(|_| MediaError::Device("getUserMedia returned a non-stream value".to_owned()))
    }

    fn start_capture(&self, stream: &web_sys::MediaStream) -> Result<BrowserCapture, MediaError> {
        let recorder = web_sys::MediaRecorder::new_with_media_stream(stream).map_err(|e| js_failure(&e))?;
        recorder.start().map_err(|e| js_failure(&e))?;
        Ok(BrowserCapture { recorder })
    }

    fn release(&self, stream: web_sys::MediaStream) {
        stop_tracks(&stream);
    }
}

#[cfg(not(feature = "hydrate"))]
impl MediaAccess for BrowserMedia {
    type Stream = ();
    type Session = BrowserCapture;

    async fn request_audio_access(&self) -> Result<(), MediaError> {
        Err(MediaError::Unsupported)
    }

    fn start_capture(&self, _stream: &()) -> Result<BrowserCapture, MediaError> {
        Err(MediaError::Unsupported)
    }

    fn release(&self, _stream: ()) {}
}
