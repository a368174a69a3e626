//! Voice call handshake: microphone permission, then an audio capture session.
//!
//! DESIGN
//! ======
//! The handshake is independent of the chat message flow. It owns the
//! `calling` flag and the active capture session; nothing else writes them.
//!
//! ERROR HANDLING
//! ==============
//! Denied permission and device failures are logged and leave the handshake
//! idle. They are returned to the caller only so tests and UI can observe
//! the outcome; the UI never shows them as blocking errors.

#[cfg(test)]
#[path = "call_test.rs"]
mod call_test;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use leptos::prelude::{LocalStorage, RwSignal, Update};

/// Failure to obtain or start an audio capture.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("media capture is not supported in this environment")]
    Unsupported,
    #[error("microphone permission denied: {0}")]
    Denied(String),
    #[error("audio device error: {0}")]
    Device(String),
}

/// An active recording that can be stopped.
pub trait CaptureSession {
    fn stop(&mut self);
}

/// Platform media-permission surface.
#[allow(async_fn_in_trait)]
pub trait MediaAccess {
    type Stream;
    type Session: CaptureSession;

    /// Ask for an audio-only input stream.
    fn request_audio_access(&self) -> impl Future<Output = Result<Self::Stream, MediaError>>;

    /// Create a recorder over `stream` and start it.
    fn start_capture(&self, stream: &Self::Stream) -> Result<Self::Session, MediaError>;

    /// Hand back a granted stream no capture took over, freeing the device.
    fn release(&self, stream: Self::Stream);
}

/// Call state owned by the prompt area.
#[derive(Debug)]
pub struct CallHandshake<S> {
    calling: bool,
    requesting: bool,
    session: Option<S>,
}

impl<S> Default for CallHandshake<S> {
    fn default() -> Self {
        Self { calling: false, requesting: false, session: None }
    }
}

impl<S: CaptureSession> CallHandshake<S> {
    /// Mark a permission request as in flight.
    ///
    /// Returns `false` when a request is already pending or a call is active;
    /// the caller must not start another request in that case.
    pub fn begin_request(&mut self) -> bool {
        if self.calling || self.requesting {
            return false;
        }
        self.requesting = true;
        true
    }

    /// Resolve the in-flight request with the capture outcome.
    pub fn finish_start(&mut self, outcome: Result<S, MediaError>) -> Result<(), MediaError> {
        self.requesting = false;
        match outcome {
            Ok(session) => {
                self.session = Some(session);
                self.calling = true;
                leptos::logging::log!("call started");
                Ok(())
            }
            Err(e) => {
                leptos::logging::error!("Error accessing microphone: {e}");
                Err(e)
            }
        }
    }

    /// Stop the active capture, if any, and clear `calling`.
    pub fn end_call(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
            leptos::logging::log!("call ended");
        }
        self.calling = false;
    }

    #[must_use]
    pub fn is_calling(&self) -> bool {
        self.calling
    }

    #[must_use]
    pub fn is_requesting(&self) -> bool {
        self.requesting
    }

}

/// Shared holder of a [`CallHandshake`].
///
/// [`start_call`] borrows it briefly on each side of the permission await,
/// never across it. Implemented for the page's local signal and for a shared
/// `RefCell` used outside a reactive owner.
pub trait CallSlot<S> {
    /// Run `f` on the handshake; `None` once the holder is gone.
    fn with_handshake<R>(&self, f: impl FnOnce(&mut CallHandshake<S>) -> R) -> Option<R>;
}

impl<S> CallSlot<S> for Rc<RefCell<CallHandshake<S>>> {
    fn with_handshake<R>(&self, f: impl FnOnce(&mut CallHandshake<S>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<S: 'static> CallSlot<S> for RwSignal<CallHandshake<S>, LocalStorage> {
    fn with_handshake<R>(&self, f: impl FnOnce(&mut CallHandshake<S>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Request audio access and start a capture over the granted stream.
///
/// # Errors
///
/// Returns the [`MediaError`] from whichever step failed.
async fn acquire_capture<M: MediaAccess>(media: &M) -> Result<M::Session, MediaError> {
    let stream = media.request_audio_access().await?;
    match media.start_capture(&stream) {
        Ok(session) => Ok(session),
        Err(e) => {
            media.release(stream);
            Err(e)
        }
    }
}

/// Acquire audio access through `media` and resolve the handshake in `slot`.
///
/// Returns `Ok(false)` when the request was ignored because the handshake was
/// already busy, or when the holder went away while permission was pending.
///
/// # Errors
///
/// Returns the [`MediaError`] that kept the call from starting. It has
/// already been logged by [`CallHandshake::finish_start`].
pub async fn start_call<M, H>(slot: &H, media: &M) -> Result<bool, MediaError>
where
    M: MediaAccess,
    H: CallSlot<M::Session>,
{
    if !slot.with_handshake(CallHandshake::begin_request).unwrap_or(false) {
        return Ok(false);
    }
    let outcome = acquire_capture(media).await;
    match slot.with_handshake(|handshake| handshake.finish_start(outcome)) {
        Some(result) => result.map(|()| true),
        None => Ok(false),
    }
}
