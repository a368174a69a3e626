//! Device classification from the browser environment.
//!
//! The dashboard picks its layout from the user agent and the prompt form
//! blurs on narrow viewports after submit. SSR always reports a desktop-sized
//! environment.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

/// Viewport width below which the prompt is blurred after submit, in px.
pub const NARROW_VIEWPORT_PX: f64 = 600.0;

const MOBILE_MARKERS: [&str; 9] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
    "mobile",
];

/// Classify a user-agent string as a handheld device.
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// `true` when the current browser reports a handheld user agent.
pub fn is_mobile() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .is_some_and(|ua| is_mobile_user_agent(&ua))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// `true` when the window is narrower than [`NARROW_VIEWPORT_PX`].
pub fn is_narrow_viewport() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .is_some_and(|width| width < NARROW_VIEWPORT_PX)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}
