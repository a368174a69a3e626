//! Browser observers that drive the [`ScrollAnchor`] model.
//!
//! ARCHITECTURE
//! ============
//! Three sources feed the anchor:
//! - a `scroll` listener on the scroll container,
//! - a `ResizeObserver` on the message list (content growth),
//! - an `IntersectionObserver` on the sentinel below the last message.
//!
//! Each callback measures the container, updates the anchor signal and
//! applies any returned [`ScrollCommand`] on the next animation frame, after
//! layout has settled.

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::state::scroll_anchor::{SENTINEL_ROOT_MARGIN, ScrollAnchor, ScrollCommand, ScrollGeometry};

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Live observer registrations. Callbacks keep firing until
/// [`ScrollObservers::disconnect`] is called.
pub struct ScrollObservers {
    #[cfg(feature = "hydrate")]
    container: web_sys::HtmlElement,
    #[cfg(feature = "hydrate")]
    on_scroll: Closure<dyn FnMut(web_sys::Event)>,
    #[cfg(feature = "hydrate")]
    resize: web_sys::ResizeObserver,
    #[cfg(feature = "hydrate")]
    _on_resize: Closure<dyn FnMut(js_sys::Array)>,
    #[cfg(feature = "hydrate")]
    intersection: web_sys::IntersectionObserver,
    #[cfg(feature = "hydrate")]
    _on_intersect: Closure<dyn FnMut(js_sys::Array)>,
}

impl ScrollObservers {
    pub fn disconnect(self) {
        #[cfg(feature = "hydrate")]
        {
            let _ = self
                .container
                .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
            self.resize.disconnect();
            self.intersection.disconnect();
        }
    }
}

#[cfg(feature = "hydrate")]
fn measure(container: &web_sys::HtmlElement) -> ScrollGeometry {
    ScrollGeometry {
        scroll_top: f64::from(container.scroll_top()),
        scroll_height: f64::from(container.scroll_height()),
        client_height: f64::from(container.client_height()),
    }
}

/// Apply `command` to `container` on the next animation frame.
#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation)]
pub fn apply_command(container: &web_sys::HtmlElement, command: ScrollCommand) {
    let ScrollCommand::ScrollTo(target) = command else {
        return;
    };
    let offset = target.round() as i32;
    let Some(window) = web_sys::window() else {
        container.set_scroll_top(offset);
        return;
    };

    let container_for_cb = container.clone();
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        container_for_cb.set_scroll_top(offset);
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
        *holder.borrow_mut() = Some(cb);
    } else {
        container.set_scroll_top(offset);
    }
}

/// Register all observers for one chat feed.
///
/// Returns `None` when the browser lacks an observer API; the feed then
/// scrolls manually only.
#[cfg(feature = "hydrate")]
pub fn attach(
    container: &web_sys::HtmlElement,
    content: &web_sys::Element,
    sentinel: &web_sys::Element,
    anchor: RwSignal<ScrollAnchor>,
) -> Option<ScrollObservers> {
    let scroll_target = container.clone();
    let on_scroll = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        let geometry = measure(&scroll_target);
        anchor.update(|a| a.on_scroll(geometry));
    }) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(e) = container.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref()) {
        leptos::logging::warn!("scroll listener not attached: {e:?}");
        return None;
    }

    let resize_target = container.clone();
    let on_resize = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        let geometry = measure(&resize_target);
        let command = anchor.try_update(|a| a.on_content_resize(geometry)).unwrap_or(ScrollCommand::Stay);
        apply_command(&resize_target, command);
    }) as Box<dyn FnMut(js_sys::Array)>);
    let resize = match web_sys::ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(e) => {
            leptos::logging::warn!("ResizeObserver unavailable: {e:?}");
            let _ = container.remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
            return None;
        }
    };
    resize.observe(content);

    let intersect_target = container.clone();
    let on_intersect = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let visible = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
            .last()
            .is_some_and(|entry| entry.is_intersecting());
        let command = anchor.try_update(|a| a.on_sentinel_visibility(visible)).unwrap_or(ScrollCommand::Stay);
        apply_command(&intersect_target, command);
    }) as Box<dyn FnMut(js_sys::Array)>);
    let init = web_sys::IntersectionObserverInit::new();
    init.set_root_margin(SENTINEL_ROOT_MARGIN);
    let intersection =
        match web_sys::IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                leptos::logging::warn!("IntersectionObserver unavailable: {e:?}");
                resize.disconnect();
                let _ =
                    container.remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                return None;
            }
        };
    intersection.observe(sentinel);

    Some(ScrollObservers {
        container: container.clone(),
        on_scroll,
        resize,
        _on_resize: on_resize,
        intersection,
        _on_intersect: on_intersect,
    })
}

/// Jump the feed to its newest content and resume auto-stick.
#[cfg(feature = "hydrate")]
pub fn scroll_feed_to_bottom(container: &web_sys::HtmlElement, anchor: RwSignal<ScrollAnchor>) {
    let command = anchor.try_update(ScrollAnchor::scroll_to_bottom).unwrap_or(ScrollCommand::Stay);
    apply_command(container, command);
}
