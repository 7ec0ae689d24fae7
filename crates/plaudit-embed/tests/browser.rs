#![cfg(target_arch = "wasm32")]
//! Browser tests for the mounter.
//!
//! These run in a real DOM via `wasm-bindgen-test`. Each test works inside
//! its own container element and removes it afterwards, so scans from one
//! test never see another test's placeholders.

use js_sys::{Object, Reflect};
use plaudit_core::EmbedConfig;
use plaudit_embed::Mounter;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlIFrameElement, MessageEvent, MessageEventInit};

wasm_bindgen_test_configure!(run_in_browser);

struct Page {
    document: Document,
    container: Element,
}

impl Page {
    fn new() -> Self {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        Self {
            document,
            container,
        }
    }

    fn placeholder(&self, widget_id: &str) -> Element {
        let element = self.document.create_element("div").unwrap();
        element.set_attribute("data-widget", widget_id).unwrap();
        self.container.append_child(&element).unwrap();
        element
    }

    fn iframes(&self) -> Vec<HtmlIFrameElement> {
        let nodes = self.container.query_selector_all("iframe").unwrap();
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .map(|node| node.dyn_into::<HtmlIFrameElement>().unwrap())
            .collect()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.container.remove();
    }
}

fn mounter() -> Rc<Mounter> {
    Mounter::new(EmbedConfig::default(), "pk_test_123".to_string())
}

fn resize_event(origin: &str, widget_id: Option<&str>, height: f64) -> MessageEvent {
    let data = Object::new();
    Reflect::set(&data, &"type".into(), &"resized".into()).unwrap();
    Reflect::set(&data, &"height".into(), &JsValue::from_f64(height)).unwrap();
    if let Some(id) = widget_id {
        Reflect::set(&data, &"widgetId".into(), &id.into()).unwrap();
    }
    let init = MessageEventInit::new();
    init.set_data(&data);
    init.set_origin(origin);
    MessageEvent::new_with_event_init_dict("message", &init).unwrap()
}

fn height_of(iframe: &HtmlIFrameElement) -> String {
    iframe.style().get_property_value("height").unwrap()
}

// ============================================================================
// Scan / mount
// ============================================================================

#[wasm_bindgen_test]
fn scan_mounts_one_iframe_per_placeholder() {
    let page = Page::new();
    page.placeholder("scan-a");
    page.placeholder("scan-b");

    let mounter = mounter();
    mounter.scan(&page.document);

    let iframes = page.iframes();
    assert_eq!(iframes.len(), 2);
    assert_eq!(mounter.mounted(), 2);
    assert!(mounter.is_mounted("scan-a"));
    assert!(mounter.is_mounted("scan-b"));
}

#[wasm_bindgen_test]
fn scan_is_idempotent() {
    let page = Page::new();
    page.placeholder("idem-a");

    let mounter = mounter();
    mounter.scan(&page.document);
    let first = page.iframes();
    mounter.scan(&page.document);
    let second = page.iframes();

    assert_eq!(second.len(), 1);
    // Same iframe instance, not a replacement.
    assert_eq!(
        first[0].get_attribute("data-widget-id"),
        second[0].get_attribute("data-widget-id")
    );
    assert!(Object::is(first[0].as_ref(), second[0].as_ref()));
}

#[wasm_bindgen_test]
fn iframe_src_and_presentation_attributes() {
    let page = Page::new();
    let placeholder = page.placeholder("attrs a");
    placeholder.set_class_name("host-style");

    mounter().scan(&page.document);

    let iframe = &page.iframes()[0];
    let src = iframe.src();
    assert!(src.starts_with("https://widget.plaudit.app/?"));
    assert!(src.contains("widget_id=attrs+a"));
    assert!(src.contains("publishable_key=pk_test_123"));
    assert_eq!(iframe.get_attribute("loading").unwrap(), "lazy");
    assert_eq!(iframe.get_attribute("scrolling").unwrap(), "no");
    assert_eq!(iframe.get_attribute("frameborder").unwrap(), "0");
    assert_eq!(iframe.class_name(), "host-style");
    assert_eq!(iframe.style().get_property_value("width").unwrap(), "100%");
    assert_eq!(height_of(iframe), "300px");
}

#[wasm_bindgen_test]
fn empty_widget_attribute_is_skipped() {
    let page = Page::new();
    page.placeholder("");

    let mounter = mounter();
    mounter.scan(&page.document);

    assert!(page.iframes().is_empty());
    assert_eq!(mounter.mounted(), 0);
}

#[wasm_bindgen_test]
fn stale_placeholder_content_is_cleared() {
    let page = Page::new();
    let placeholder = page.placeholder("stale-a");
    placeholder.set_inner_html("<p>leftover</p><iframe data-widget-id=\"wrong\"></iframe>");

    mounter().scan(&page.document);

    let iframes = page.iframes();
    assert_eq!(iframes.len(), 1);
    assert_eq!(
        iframes[0].get_attribute("data-widget-id").unwrap(),
        "stale-a"
    );
    assert!(page.container.query_selector("p").unwrap().is_none());
}

#[wasm_bindgen_test]
fn replaced_placeholder_is_remounted() {
    let page = Page::new();
    let placeholder = page.placeholder("replace-a");

    let mounter = mounter();
    mounter.scan(&page.document);
    assert_eq!(page.iframes().len(), 1);

    // Host page tears the placeholder down and authors a fresh one.
    placeholder.remove();
    page.placeholder("replace-a");
    mounter.scan(&page.document);

    assert_eq!(page.iframes().len(), 1);
    assert_eq!(mounter.mounted(), 1);
}

// ============================================================================
// Resize protocol
// ============================================================================

#[wasm_bindgen_test]
fn valid_resize_message_is_applied() {
    let page = Page::new();
    page.placeholder("msg-valid");
    let mounter = mounter();
    mounter.scan(&page.document);

    mounter.deliver(&resize_event(
        "https://widget.plaudit.app",
        Some("msg-valid"),
        412.0,
    ));

    assert_eq!(height_of(&page.iframes()[0]), "412px");
}

#[wasm_bindgen_test]
fn foreign_origin_never_changes_height() {
    let page = Page::new();
    page.placeholder("msg-origin");
    let mounter = mounter();
    mounter.scan(&page.document);

    mounter.deliver(&resize_event("https://evil.example", Some("msg-origin"), 400.0));

    assert_eq!(height_of(&page.iframes()[0]), "300px");
}

#[wasm_bindgen_test]
fn heights_are_clamped_to_limits() {
    let page = Page::new();
    page.placeholder("msg-clamp");
    let mounter = mounter();
    mounter.scan(&page.document);
    let iframe = &page.iframes()[0];

    mounter.deliver(&resize_event(
        "https://widget.plaudit.app",
        Some("msg-clamp"),
        50.0,
    ));
    assert_eq!(height_of(iframe), "100px");

    mounter.deliver(&resize_event(
        "https://widget.plaudit.app",
        Some("msg-clamp"),
        999_999.0,
    ));
    assert_eq!(height_of(iframe), "5000px");
}

#[wasm_bindgen_test]
fn jitter_is_suppressed_but_growth_applies() {
    let page = Page::new();
    page.placeholder("msg-jitter");
    let mounter = mounter();
    mounter.scan(&page.document);
    let iframe = &page.iframes()[0];

    mounter.deliver(&resize_event("https://widget.plaudit.app", Some("msg-jitter"), 300.0));
    assert_eq!(height_of(iframe), "300px");

    // 302 is within the 5px threshold: no visual update.
    mounter.deliver(&resize_event("https://widget.plaudit.app", Some("msg-jitter"), 302.0));
    assert_eq!(height_of(iframe), "300px");

    mounter.deliver(&resize_event("https://widget.plaudit.app", Some("msg-jitter"), 310.0));
    assert_eq!(height_of(iframe), "310px");
}

#[wasm_bindgen_test]
fn malformed_payloads_are_discarded_silently() {
    let page = Page::new();
    page.placeholder("msg-shape");
    let mounter = mounter();
    mounter.scan(&page.document);
    let iframe = &page.iframes()[0];

    // Right origin, wrong/missing fields: none of these may throw or resize.
    let origin = "https://widget.plaudit.app";
    for data in [
        JsValue::from_str("resized"),
        JsValue::from_f64(400.0),
        JsValue::NULL,
        Object::new().into(),
    ] {
        let init = MessageEventInit::new();
        init.set_data(&data);
        init.set_origin(origin);
        let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
        mounter.deliver(&event);
    }

    let wrong_type = resize_event(origin, Some("msg-shape"), 400.0);
    let retyped = Object::from(wrong_type.data());
    Reflect::set(&retyped, &"type".into(), &"scrolled".into()).unwrap();
    let init = MessageEventInit::new();
    init.set_data(&retyped);
    init.set_origin(origin);
    mounter.deliver(&MessageEvent::new_with_event_init_dict("message", &init).unwrap());

    assert_eq!(height_of(iframe), "300px");
}

#[wasm_bindgen_test]
fn unknown_widget_id_is_ignored() {
    let page = Page::new();
    page.placeholder("msg-known");
    let mounter = mounter();
    mounter.scan(&page.document);

    mounter.deliver(&resize_event(
        "https://widget.plaudit.app",
        Some("msg-unknown"),
        900.0,
    ));

    assert_eq!(height_of(&page.iframes()[0]), "300px");
}

#[wasm_bindgen_test]
fn messages_route_to_their_own_iframe() {
    let page = Page::new();
    page.placeholder("route-a");
    page.placeholder("route-b");
    let mounter = mounter();
    mounter.scan(&page.document);

    mounter.deliver(&resize_event("https://widget.plaudit.app", Some("route-b"), 640.0));

    let heights: Vec<(String, String)> = page
        .iframes()
        .iter()
        .map(|f| (f.get_attribute("data-widget-id").unwrap(), height_of(f)))
        .collect();
    assert!(heights.contains(&("route-a".to_string(), "300px".to_string())));
    assert!(heights.contains(&("route-b".to_string(), "640px".to_string())));
}

// ============================================================================
// Boot / observation
// ============================================================================

#[wasm_bindgen_test]
fn boot_without_a_key_mounts_nothing_and_does_not_throw() {
    let page = Page::new();
    page.placeholder("boot-nokey");

    // The test page carries no embed.js script tag, so key resolution
    // reports "not configured" and boot takes no further action.
    let config = EmbedConfig::default();
    assert!(plaudit_embed::resolve_key_from_document(&page.document, &config).is_none());
    plaudit_embed::boot().unwrap();

    assert!(page.iframes().is_empty());
}

#[wasm_bindgen_test]
async fn late_inserted_placeholder_mounts_on_mutation() {
    let page = Page::new();
    let mounter = mounter();
    mounter.scan(&page.document);
    mounter.observe(&page.document).unwrap();
    assert!(page.iframes().is_empty());

    // Simulates a client-side router inserting markup after boot. The
    // placeholder arrives nested, so subtree observation has to catch it.
    let wrapper = page.document.create_element("section").unwrap();
    let inner = page.document.create_element("div").unwrap();
    inner.set_attribute("data-widget", "late-a").unwrap();
    wrapper.append_child(&inner).unwrap();
    page.container.append_child(&wrapper).unwrap();

    yield_to_event_loop().await;

    assert_eq!(page.iframes().len(), 1);
    assert!(mounter.is_mounted("late-a"));
}

async fn yield_to_event_loop() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 10)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}
