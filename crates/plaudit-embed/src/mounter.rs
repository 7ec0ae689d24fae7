//! The host-page mounter.
//!
//! One [`Mounter`] per page. It owns the mount registry, performs the
//! scan/mount cycle, and hosts the single process-wide `message` listener
//! that dispatches resize requests to the right iframe.
//!
//! Everything runs on the page's event loop; the registry lives in a
//! `RefCell` and every check-then-act on it completes inside one
//! synchronous callback, so two rapid mutation batches can never both see
//! "not mounted" and double-insert.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Object;
use plaudit_core::height::HeightTracker;
use plaudit_core::message::ResizeMessage;
use plaudit_core::registry::MountRegistry;
use plaudit_core::{script, EmbedConfig};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlIFrameElement, MessageEvent, MutationObserver, MutationObserverInit,
    Node, Window,
};

/// Attribute marking a host-page element as a widget placeholder.
pub const PLACEHOLDER_ATTR: &str = "data-widget";

/// Attribute stamped on created iframes, for routing and debuggability.
pub const IFRAME_ATTR: &str = "data-widget-id";

pub struct Mounter {
    config: EmbedConfig,
    publishable_key: String,
    registry: RefCell<MountRegistry<HtmlIFrameElement>>,
}

impl Mounter {
    pub fn new(config: EmbedConfig, publishable_key: String) -> Rc<Self> {
        Rc::new(Self {
            config,
            publishable_key,
            registry: RefCell::new(MountRegistry::new()),
        })
    }

    /// Number of live mounts.
    pub fn mounted(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Whether a widget id currently has a registered iframe.
    pub fn is_mounted(&self, widget_id: &str) -> bool {
        self.registry.borrow().contains(widget_id)
    }

    /// Scans the document for placeholders and mounts anything new.
    ///
    /// Idempotent: a placeholder whose registered iframe is still attached
    /// under it is a no-op, so this runs safely on every mutation batch.
    /// A failure on one placeholder never interrupts the others.
    pub fn scan(&self, document: &Document) {
        // Unregister iframes the host page removed; their widget ids become
        // mountable again and their handles stop leaking.
        self.registry
            .borrow_mut()
            .retain(|_, entry| entry.handle.is_connected());

        let Ok(placeholders) = document.query_selector_all(&format!("[{PLACEHOLDER_ATTR}]"))
        else {
            return;
        };
        for index in 0..placeholders.length() {
            let Some(node) = placeholders.item(index) else {
                continue;
            };
            let Ok(placeholder) = node.dyn_into::<Element>() else {
                continue;
            };
            self.mount_into(document, &placeholder);
        }
    }

    fn mount_into(&self, document: &Document, placeholder: &Element) {
        let Some(widget_id) = placeholder.get_attribute(PLACEHOLDER_ATTR) else {
            return;
        };
        if widget_id.is_empty() {
            // Malformed placeholder: skip this element only.
            return;
        }

        if let Some(entry) = self.registry.borrow().get(&widget_id) {
            let iframe: &Node = entry.handle.as_ref();
            if placeholder.contains(Some(iframe)) {
                return; // already mounted correctly
            }
        }

        let src = match script::widget_src(&self.config, &widget_id, &self.publishable_key) {
            Ok(src) => src,
            Err(_) => return,
        };
        let Ok(iframe) = self.build_iframe(document, placeholder, &widget_id, &src) else {
            return;
        };

        // Defensive reset of stale/incorrect prior content, then registry
        // insert and DOM insertion together, with no suspension between the
        // registry check above and this block.
        placeholder.set_inner_html("");
        self.registry.borrow_mut().insert(
            widget_id,
            iframe.clone(),
            HeightTracker::new(self.config.limits, self.config.jitter_threshold),
        );
        let _ = placeholder.append_child(&iframe);
    }

    fn build_iframe(
        &self,
        document: &Document,
        placeholder: &Element,
        widget_id: &str,
        src: &str,
    ) -> Result<HtmlIFrameElement, JsValue> {
        let iframe: HtmlIFrameElement = document.create_element("iframe")?.dyn_into()?;
        iframe.set_src(src);

        let style = iframe.style();
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("min-width", "100%");
        let _ = style.set_property("height", &format!("{}px", self.config.default_height));
        let _ = style.set_property("border", "0");

        let _ = iframe.set_attribute("loading", "lazy");
        let _ = iframe.set_attribute("scrolling", "no");
        let _ = iframe.set_attribute("frameborder", "0");

        // Preserve the host page's classes so its styling applies.
        iframe.set_class_name(&placeholder.class_name());
        iframe.set_attribute(IFRAME_ATTR, widget_id)?;
        Ok(iframe)
    }

    /// The message dispatch pipeline. Every failure is a silent discard:
    /// untrusted framed content must never throw into the host page.
    ///
    /// Order: origin check (the sole authentication for the channel), shape
    /// check, registry routing, clamp, hysteresis. Messages are handled in
    /// arrival order, one at a time, fire-and-forget.
    pub fn deliver(&self, event: &MessageEvent) {
        if event.origin() != self.config.widget_origin {
            return;
        }
        let Ok(message) = serde_wasm_bindgen::from_value::<ResizeMessage>(event.data()) else {
            return;
        };
        let Some(requested) = message.requested_height() else {
            return;
        };

        let source: JsValue = event.source().map(JsValue::from).unwrap_or(JsValue::NULL);
        let mut registry = self.registry.borrow_mut();
        let entry = match &message.widget_id {
            // Routed message: the widget id is untrusted, so when the event
            // carries a source window it must be the iframe it claims to be.
            Some(widget_id) => registry
                .get_mut(widget_id)
                .filter(|entry| source_allows(&source, &entry.handle)),
            // Unrouted message: resolve the iframe by its source window.
            None => registry
                .entries_mut()
                .map(|(_, entry)| entry)
                .find(|entry| source_is(&source, &entry.handle)),
        };
        let Some(entry) = entry else {
            return;
        };

        if let Some(px) = entry.heights.apply(requested) {
            let _ = entry
                .handle
                .style()
                .set_property("height", &format!("{px}px"));
        }
    }

    /// Re-scans on every childList mutation under `document.body`, so
    /// placeholders inserted after page load still mount. Re-entrant and
    /// idempotent via the registry check in [`Mounter::scan`].
    pub fn observe(self: &Rc<Self>, document: &Document) -> Result<(), JsValue> {
        let Some(body) = document.body() else {
            return Ok(());
        };

        let mounter = Rc::clone(self);
        let target = document.clone();
        let on_mutation = Closure::<dyn FnMut()>::new(move || mounter.scan(&target));

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&body, &options)?;

        // The mounter observes for the lifetime of the page.
        on_mutation.forget();
        Ok(())
    }

    /// Installs the single process-wide `message` listener.
    pub fn listen(self: &Rc<Self>, window: &Window) -> Result<(), JsValue> {
        let mounter = Rc::clone(self);
        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            mounter.deliver(&event);
        });
        window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())?;
        on_message.forget();
        Ok(())
    }
}

/// Cross-check for routed messages: when the event has a source window it
/// must be this iframe's content window. Events without a source (notably
/// synthesized ones) pass — the origin check already gates trust.
fn source_allows(source: &JsValue, iframe: &HtmlIFrameElement) -> bool {
    if source.is_null() || source.is_undefined() {
        return true;
    }
    source_is(source, iframe)
}

/// Strict match: the event's source is exactly this iframe's content window.
fn source_is(source: &JsValue, iframe: &HtmlIFrameElement) -> bool {
    match iframe.content_window() {
        Some(window) => Object::is(source, window.as_ref()),
        None => false,
    }
}
