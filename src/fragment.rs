//! Transformed fragments, described as [`lignin`] VDOM and then materialized into the page.

use crate::{
	filter::GENERATED_ATTRIBUTE,
	tokenize::{split_word, tokenize, Token},
};
use lignin::{Attribute, Element, ElementCreationOptions, Node, ThreadBound};
use tracing::{error, trace_span};
use wasm_bindgen::{JsValue, UnwrapThrowExt};
use web_sys::{Document, DocumentFragment};

/// Tag name of generated bold markers.
pub const BOLD_TAG: &str = "STRONG";

const BOLD_ATTRIBUTES: &[Attribute<'static>] = &[
	Attribute { name: GENERATED_ATTRIBUTE, value: "true" },
	Attribute { name: "style", value: "font-weight: 700;" },
];

/// Builds the bionic VDOM of `text` at `bold_percentage` and passes it to `f`.
///
/// The VDOM is a [`Node::Multi`] where each word becomes a bold marker holding its head, followed by its tail (if any) as text,
/// and each separator run becomes a text node.
pub fn with_bionic_vdom<R>(text: &str, bold_percentage: u8, f: impl FnOnce(&Node<'_, ThreadBound>) -> R) -> R {
	let bold_markers: Vec<_> = tokenize(text)
		.filter_map(|token| match token {
			Token::Word(word) => Some(Element {
				name: BOLD_TAG,
				creation_options: ElementCreationOptions::new(),
				attributes: BOLD_ATTRIBUTES,
				content: Node::Text {
					text: split_word(word, bold_percentage).0,
					dom_binding: None,
				},
				event_bindings: &[],
			}),
			Token::Separator(_) => None,
		})
		.collect();

	let mut bold_markers_iter = bold_markers.iter();
	let mut nodes = Vec::with_capacity(bold_markers.len() * 3);
	for token in tokenize(text) {
		match token {
			Token::Word(word) => {
				let tail = split_word(word, bold_percentage).1;
				nodes.push(Node::HtmlElement {
					element: bold_markers_iter.next().expect_throw("lexilens-bionic bug: Bold marker count mismatch."),
					dom_binding: None,
				});
				if !tail.is_empty() {
					nodes.push(Node::Text { text: tail, dom_binding: None });
				}
			}
			Token::Separator(separator) => nodes.push(Node::Text { text: separator, dom_binding: None }),
		}
	}

	f(&Node::Multi(&nodes))
}

/// Creates the [***DocumentFragment***](https://developer.mozilla.org/en-US/docs/Web/API/DocumentFragment) that replaces a text node containing `text`.
///
/// # Errors
///
/// Iff the DOM rejects an operation.
pub fn bionic_fragment(document: &Document, text: &str, bold_percentage: u8) -> Result<DocumentFragment, JsValue> {
	with_bionic_vdom(text, bold_percentage, |vdom| {
		let fragment = document.create_document_fragment();
		materialize(document, fragment.as_ref(), vdom)?;
		Ok(fragment)
	})
}

/// Appends DOM nodes for `vdom` to `parent`.
///
/// Only the node kinds this crate generates are supported: text, HTML elements without event bindings and multi-nodes.
///
/// # Errors
///
/// Iff the DOM rejects an operation or `vdom` contains an unsupported node.
pub fn materialize(document: &Document, parent: &web_sys::Node, vdom: &Node<'_, ThreadBound>) -> Result<(), JsValue> {
	match *vdom {
		Node::Multi(nodes) => {
			for node in nodes {
				materialize(document, parent, node)?;
			}
		}

		Node::Text { text, .. } => {
			let dom_text = document.create_text_node(text);
			parent.append_child(dom_text.as_ref())?;
		}

		Node::HtmlElement { element, .. } => {
			let &Element {
				name,
				creation_options,
				attributes,
				ref content,
				..
			} = element;
			let span = trace_span!("Creating HTML element", name);
			let _enter = span.enter();

			let dom_element = match creation_options.is() {
				Some(is) => document.create_element_with_str(name, is),
				None => document.create_element(name),
			}?;
			for &Attribute { name, value } in attributes {
				dom_element.set_attribute(name, value)?;
			}
			materialize(document, dom_element.as_ref(), content)?;
			parent.append_child(dom_element.as_ref())?;
		}

		_ => {
			error!("Unsupported VDOM node kind in transformed fragment.");
			return Err(JsValue::from_str("lexilens-bionic: Unsupported VDOM node."));
		}
	}
	Ok(())
}
