//! DOM rendering for the framed widget.
//!
//! Plain element construction, no virtual DOM: the widget renders at most
//! a handful of cards and re-renders only on rotation ticks. All renderers
//! replace the root's content wholesale.

use plaudit_core::model::{Testimonial, Widget, WidgetBundle, WidgetKind, WidgetSettings};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Baseline styles injected once at startup, so the widget looks sane even
/// before any theme ships. Kept deliberately small; themes are a backend
/// concern.
const STYLES: &str = "
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2430; }
.testimonial-container, .testimonials-container { padding: 12px; }
.testimonial-grid { display: grid; gap: 12px; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); }
.testimonial-card { border: 1px solid #e3e6ee; border-radius: 8px; padding: 16px; }
.testimonial-content { font-size: 15px; line-height: 1.5; }
.testimonial-author { margin-top: 10px; font-weight: 600; }
.testimonial-meta { font-size: 13px; color: #6a7184; }
.testimonial-footer { margin-top: 8px; font-size: 12px; color: #6a7184; }
.rating { margin-top: 8px; letter-spacing: 2px; }
.star { color: #d4d7e0; }
.star.filled { color: #f5a623; }
.error { color: #b3261e; }
.error-details { font-size: 13px; margin-top: 6px; }
.no-testimonials { color: #6a7184; }
.skeleton-content, .skeleton-author, .skeleton-meta, .skeleton-rating, .skeleton-footer, .skeleton-header {
  background: #eef0f5; border-radius: 4px; height: 14px; margin: 6px 0; animation: pulse 1.2s infinite; }
.skeleton-content { height: 42px; }
@keyframes pulse { 50% { opacity: 0.5; } }
";

/// Appends a `<style>` block to the document head. Called once at startup.
pub fn inject_styles(document: &Document) -> Result<(), JsValue> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_text_content(Some(STYLES));
    head.append_child(&style)?;
    Ok(())
}

/// Skeleton cards shown while the combo request is in flight.
pub fn render_loading(document: &Document, root: &Element) -> Result<(), JsValue> {
    root.set_inner_html("");
    let container = element(document, "div", "testimonials-container")?;
    let grid = element(document, "div", "testimonial-grid")?;
    for _ in 0..3 {
        let card = element(document, "div", "testimonial-card")?;
        for class in ["skeleton-header", "skeleton-content", "skeleton-rating", "skeleton-footer"] {
            card.append_child(&element(document, "div", class)?)?;
        }
        grid.append_child(&card)?;
    }
    container.append_child(&grid)?;
    root.append_child(&container)?;
    Ok(())
}

/// Inline error card. Errors never leave the iframe.
pub fn render_error(document: &Document, root: &Element, message: &str) -> Result<(), JsValue> {
    root.set_inner_html("");
    let container = element(document, "div", "testimonial-container")?;

    let error = element(document, "div", "error")?;
    error.set_text_content(Some(&format!("Error: {message}")));
    container.append_child(&error)?;

    let details = element(document, "div", "error error-details")?;
    details.set_text_content(Some(
        "Note: this may be due to misconfiguration. Check the embed script tag and the data-widget element.",
    ));
    container.append_child(&details)?;

    root.append_child(&container)?;
    Ok(())
}

pub fn render_empty(document: &Document, root: &Element) -> Result<(), JsValue> {
    root.set_inner_html("");
    let container = element(document, "div", "testimonial-container")?;
    let notice = element(document, "div", "no-testimonials")?;
    notice.set_text_content(Some("No testimonials to display"));
    container.append_child(&notice)?;
    root.append_child(&container)?;
    Ok(())
}

/// Renders the fetched bundle. For single-layout widgets `index` selects
/// which testimonial is showing (rotation advances it); grids ignore it.
pub fn render_bundle(
    document: &Document,
    root: &Element,
    bundle: &WidgetBundle,
    index: usize,
) -> Result<(), JsValue> {
    if bundle.testimonials.is_empty() {
        return render_empty(document, root);
    }
    match bundle.widget.kind {
        WidgetKind::Single => {
            let testimonial = &bundle.testimonials[index % bundle.testimonials.len()];
            render_single(document, root, &bundle.widget, testimonial)
        }
        WidgetKind::Grid => render_grid(document, root, &bundle.widget, &bundle.testimonials),
    }
}

fn render_single(
    document: &Document,
    root: &Element,
    widget: &Widget,
    testimonial: &Testimonial,
) -> Result<(), JsValue> {
    root.set_inner_html("");
    let container = element(document, "div", "testimonial-container")?;
    fill_card(document, &container, testimonial, &widget.settings)?;
    root.append_child(&container)?;
    Ok(())
}

fn render_grid(
    document: &Document,
    root: &Element,
    widget: &Widget,
    testimonials: &[Testimonial],
) -> Result<(), JsValue> {
    root.set_inner_html("");
    let container = element(document, "div", "testimonials-container")?;
    let grid = element(document, "div", "testimonial-grid")?;
    for testimonial in testimonials {
        let card = element(document, "div", "testimonial-card")?;
        fill_card(document, &card, testimonial, &widget.settings)?;
        grid.append_child(&card)?;
    }
    container.append_child(&grid)?;
    root.append_child(&container)?;
    Ok(())
}

fn fill_card(
    document: &Document,
    card: &Element,
    testimonial: &Testimonial,
    settings: &WidgetSettings,
) -> Result<(), JsValue> {
    let content = element(document, "div", "testimonial-content")?;
    content.set_text_content(Some(&testimonial.content));
    card.append_child(&content)?;

    if settings.show_rating {
        card.append_child(&rating_row(document, testimonial.rating())?)?;
    }

    let author = element(document, "div", "testimonial-author")?;
    author.set_text_content(Some(&testimonial.author_name));
    card.append_child(&author)?;

    if let Some(meta) = meta_line(testimonial) {
        let line = element(document, "div", "testimonial-meta")?;
        line.set_text_content(Some(&meta));
        card.append_child(&line)?;
    }

    if settings.show_date {
        let footer = element(document, "div", "testimonial-footer")?;
        footer.set_text_content(Some(&format!("Shared on {}", date_of(testimonial))));
        card.append_child(&footer)?;
    }
    Ok(())
}

fn rating_row(document: &Document, rating: u8) -> Result<Element, JsValue> {
    let row = element(document, "div", "rating")?;
    for position in 0..5u8 {
        let star = document.create_element("span")?;
        star.set_class_name(if position < rating { "star filled" } else { "star" });
        star.set_text_content(Some("\u{2605}"));
        row.append_child(&star)?;
    }
    Ok(row)
}

fn meta_line(testimonial: &Testimonial) -> Option<String> {
    match (&testimonial.author_title, &testimonial.author_company) {
        (Some(title), Some(company)) => Some(format!("{title} \u{2022} {company}")),
        (Some(title), None) => Some(title.clone()),
        (None, Some(company)) => Some(company.clone()),
        (None, None) => None,
    }
}

/// Calendar date of an RFC 3339 timestamp. Good enough for a footer line;
/// the backend owns locale-aware formatting if it ever matters.
fn date_of(testimonial: &Testimonial) -> &str {
    testimonial
        .created_at
        .split('T')
        .next()
        .unwrap_or(&testimonial.created_at)
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}
