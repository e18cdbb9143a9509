//! Which text is prose that may be transformed, and the DOM markers that record what was.

use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Text};

/// Set to `"true"` on elements with transformed child text.
pub const PROCESSED_ATTRIBUTE: &str = "data-lexilens-bionic";

/// Holds an element's `innerHTML` from before its first transformation.
pub const ORIGINAL_ATTRIBUTE: &str = "data-lexilens-original";

/// Set to `"true"` on generated bold markers.
pub const GENERATED_ATTRIBUTE: &str = "data-lexilens-bionic-generated";

/// Class of the extension's own UI surfaces.
pub const WIDGET_CLASS: &str = "lexilens-widget";

/// Elements with any of these classes are never transformed into.
pub const SKIP_CLASSES: &[&str] = &[WIDGET_CLASS, "highlight", "code"];

/// Containers whose text isn't prose, as they appear in [***tagName***](https://developer.mozilla.org/en-US/docs/Web/API/Element/tagName) of HTML elements.
pub const NON_PROSE_TAGS: &[&str] = &["SCRIPT", "STYLE", "NOSCRIPT", "IFRAME", "OBJECT", "EMBED", "SVG", "CANVAS", "CODE", "PRE", "KBD", "SAMP"];

const NON_PROSE_SELECTOR: &str = "script, style, noscript, iframe, object, embed, svg, canvas, code, pre, kbd, samp";
const WIDGET_SELECTOR: &str = ".lexilens-widget";
const EDITABLE_SELECTOR: &str = "[contenteditable]:not([contenteditable=\"false\"])";

/// Why an element's text is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
	/// SVG, MathML or other non-HTML element.
	Foreign,
	NonProse,
	Processed,
	Generated,
	Widget,
	SkipClass,
	Editable,
}

/// Checks whether direct child text of `element` may be transformed.
///
/// Returns [`None`] if it may.
#[must_use]
pub fn rejection(element: &Element) -> Option<Rejection> {
	let html_element = match element.dyn_ref::<HtmlElement>() {
		Some(html_element) => html_element,
		None => return Some(Rejection::Foreign),
	};

	if element.has_attribute(PROCESSED_ATTRIBUTE) {
		return Some(Rejection::Processed);
	}
	if element.has_attribute(GENERATED_ATTRIBUTE) {
		return Some(Rejection::Generated);
	}

	let tag_name = element.tag_name();
	if NON_PROSE_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(&tag_name)) {
		return Some(Rejection::NonProse);
	}

	let class_list = element.class_list();
	if SKIP_CLASSES.iter().any(|class| class_list.contains(class)) {
		return Some(Rejection::SkipClass);
	}

	if has_ancestor_or_self(element, WIDGET_SELECTOR) {
		return Some(Rejection::Widget);
	}
	if has_ancestor_or_self(element, NON_PROSE_SELECTOR) {
		return Some(Rejection::NonProse);
	}
	if html_element.is_content_editable() || has_ancestor_or_self(element, EDITABLE_SELECTOR) {
		return Some(Rejection::Editable);
	}

	None
}

/// Returns the parent of `text` if `text` should be transformed.
#[must_use]
pub fn eligible_parent(text: &Text) -> Option<Element> {
	let parent = text.parent_element()?;
	if text.data().trim().is_empty() || rejection(&parent).is_some() {
		return None;
	}
	Some(parent)
}

fn has_ancestor_or_self(element: &Element, selector: &str) -> bool {
	match element.closest(selector) {
		Ok(found) => found.is_some(),
		Err(error) => {
			// Only reachable with an invalid selector.
			error!("`closest({:?})` failed: {:?}", selector, error);
			true
		}
	}
}
