//! Transforming subtrees in place and restoring them afterwards.

use crate::{
	filter::{self, ORIGINAL_ATTRIBUTE, PROCESSED_ATTRIBUTE},
	fragment::bionic_fragment,
};
use tracing::{debug, instrument, trace, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, NodeList, Text};

/// [***NodeFilter.SHOW_TEXT***](https://developer.mozilla.org/en-US/docs/Web/API/Document/createTreeWalker#whattoshow)
const SHOW_TEXT: u32 = 0x4;

const MARKED_SELECTOR: &str = "[data-lexilens-original], [data-lexilens-bionic]";

/// Replaces every eligible text node below `root` with its bionic fragment.
///
/// `root` may be an element or a whole document.
/// Returns the number of replaced text nodes.
///
/// Before anything is replaced, each affected parent element that doesn't have one yet receives a snapshot of its markup,
/// so that snapshots never contain transformed content.
/// Text nodes are then replaced last to first.
/// A text node that vanishes or can't be replaced is skipped.
#[instrument(skip(root))]
pub fn transform(root: &web_sys::Node, bold_percentage: u8) -> usize {
	let document = match root.dyn_ref::<Document>().cloned().or_else(|| root.owner_document()) {
		Some(document) => document,
		None => {
			warn!("No owner document found for transformation root.");
			return 0;
		}
	};

	let found = match collect_text_nodes(&document, root) {
		Ok(found) => found,
		Err(error) => {
			warn!("Failed to walk transformation root: {:?}", error);
			return 0;
		}
	};

	for (_, parent) in &found {
		snapshot(parent);
	}

	let mut replaced = 0;
	for (text, _) in found.iter().rev() {
		match replace_text(&document, text, bold_percentage) {
			Ok(true) => replaced += 1,
			Ok(false) => trace!("Text node vanished before it could be transformed."),
			Err(error) => warn!("Failed to transform text node: {:?}", error),
		}
	}

	debug!("Transformed {} of {} text node(s).", replaced, found.len());
	replaced
}

fn collect_text_nodes(document: &Document, root: &web_sys::Node) -> Result<Vec<(Text, Element)>, JsValue> {
	let walker = document.create_tree_walker_with_what_to_show(root, SHOW_TEXT)?;
	let mut found = Vec::new();
	while let Some(node) = walker.next_node()? {
		if let Ok(text) = node.dyn_into::<Text>() {
			if let Some(parent) = filter::eligible_parent(&text) {
				found.push((text, parent));
			}
		}
	}
	Ok(found)
}

/// Stores `element`'s current markup unless a snapshot already exists.
fn snapshot(element: &Element) {
	if element.has_attribute(ORIGINAL_ATTRIBUTE) {
		return;
	}
	if let Err(error) = element.set_attribute(ORIGINAL_ATTRIBUTE, &element.inner_html()) {
		warn!("Failed to snapshot <{}>: {:?}", element.tag_name(), error);
	}
}

fn replace_text(document: &Document, text: &Text, bold_percentage: u8) -> Result<bool, JsValue> {
	let parent = match text.parent_element() {
		Some(parent) => parent,
		None => return Ok(false),
	};

	// Only does something if the text moved since it was collected.
	snapshot(&parent);

	let data = text.data();
	trace!(text = %data, "Transforming text node.");
	let fragment = bionic_fragment(document, &data, bold_percentage)?;
	parent.replace_child(fragment.as_ref(), text.as_ref())?;

	if !parent.has_attribute(PROCESSED_ATTRIBUTE) {
		parent.set_attribute(PROCESSED_ATTRIBUTE, "true")?;
	}
	Ok(true)
}

/// Restores every transformed element in `document` to its snapshot and removes the markers.
///
/// Elements are restored in document order.
/// An element that was detached by its ancestor's restoration is skipped,
/// and marked elements recreated from an ancestor's snapshot are restored in turn.
/// Returns the number of restored elements.
#[instrument(skip(document))]
pub fn restore(document: &Document) -> usize {
	let restored = match document.query_selector_all(MARKED_SELECTOR) {
		Ok(marked) => restore_list(&marked),
		Err(error) => {
			warn!("Failed to query transformed elements: {:?}", error);
			0
		}
	};
	debug!("Restored {} element(s).", restored);
	restored
}

fn restore_list(marked: &NodeList) -> usize {
	let mut restored = 0;
	for i in 0..marked.length() {
		let element = match marked.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
			Some(element) => element,
			None => continue,
		};
		if !element.is_connected() {
			trace!("Skipping detached element.");
			continue;
		}
		restored += restore_element(&element);
	}
	restored
}

fn restore_element(element: &Element) -> usize {
	if let Some(original) = element.get_attribute(ORIGINAL_ATTRIBUTE) {
		element.set_inner_html(&original);
	}
	for name in [PROCESSED_ATTRIBUTE, ORIGINAL_ATTRIBUTE] {
		if let Err(error) = element.remove_attribute(name) {
			warn!("Failed to remove {} from <{}>: {:?}", name, element.tag_name(), error);
		}
	}

	1 + match element.query_selector_all(MARKED_SELECTOR) {
		Ok(marked) => restore_list(&marked),
		Err(error) => {
			warn!("Failed to query restored element: {:?}", error);
			0
		}
	}
}
