use lexilens_bionic::{
	filter::ORIGINAL_ATTRIBUTE,
	transform::{restore, transform},
};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_page_::{body, bold, by_id, document, has_snapshot, is_processed, marker_count, page};

#[wasm_bindgen_test]
fn sentence() {
	page(r#"<p id="p">The quick fox's jump.</p>"#);

	assert_eq!(transform(body().as_ref(), 50), 1);

	let p = by_id("p");
	assert_eq!(p.inner_html(), format!("{}he {}ck {}'s {}mp.", bold("T"), bold("qui"), bold("fox"), bold("ju")));
	assert_eq!(p.text_content().unwrap(), "The quick fox's jump.");
	assert_eq!(p.get_attribute(ORIGINAL_ATTRIBUTE).unwrap(), "The quick fox's jump.");
	assert!(is_processed(&p));
	assert!(!is_processed(&body()));
}

#[wasm_bindgen_test]
fn non_prose_is_untouched() {
	let html = concat!(
		r#"<code id="a">let words = here;</code>"#,
		r#"<code id="b"><span>nested words</span> and <i>more</i></code>"#,
		"<pre>preformatted text</pre>",
		"<p>Press <kbd>Ctrl</kbd> or <samp>output</samp></p>",
		"<script>var ignored;</script>",
		"<style>p { color: red; }</style>",
	);
	page(html);

	// Only "Press " and " or " in the paragraph.
	assert_eq!(transform(body().as_ref(), 50), 2);
	assert_eq!(marker_count(&by_id("a")), 0);
	assert_eq!(marker_count(&by_id("b")), 0);
	assert!(!is_processed(&by_id("b")));
	assert_eq!(document().query_selector("kbd").unwrap().unwrap().inner_html(), "Ctrl");
	assert_eq!(document().query_selector("samp").unwrap().unwrap().inner_html(), "output");
}

#[wasm_bindgen_test]
fn reserved_surfaces_are_untouched() {
	page(concat!(
		r#"<div class="lexilens-widget"><p id="widget">Widget <b>label</b></p></div>"#,
		r#"<p id="highlight" class="highlight">Highlighted words</p>"#,
		r#"<div id="editable" contenteditable="true"><span><b>Editable words</b></span></div>"#,
		r#"<div contenteditable="false"><p id="fixed">Fixed words</p></div>"#,
	));

	assert_eq!(transform(body().as_ref(), 50), 1);
	assert_eq!(marker_count(&by_id("widget")), 0);
	assert_eq!(marker_count(&by_id("highlight")), 0);
	assert_eq!(marker_count(&by_id("editable")), 0);
	assert_eq!(marker_count(&by_id("fixed")), 2);
}

#[wasm_bindgen_test]
fn whitespace_only_text_is_untouched() {
	page("<p id=\"a\">   </p><p id=\"b\">\n\t</p><p id=\"c\">42 ...</p>");

	// Digits and punctuation still count as text, they just contain no words.
	assert_eq!(transform(body().as_ref(), 50), 1);
	assert!(!is_processed(&by_id("a")));
	assert!(!has_snapshot(&by_id("b")));
	assert_eq!(by_id("c").inner_html(), "42 ...");
	assert!(is_processed(&by_id("c")));
}

#[wasm_bindgen_test]
fn every_text_child_is_transformed() {
	page(r#"<p id="p">one <em id="em">two</em> three</p>"#);

	assert_eq!(transform(body().as_ref(), 50), 3);

	let p = by_id("p");
	assert_eq!(marker_count(&p), 3);
	assert!(is_processed(&p));
	assert!(is_processed(&by_id("em")));
	assert_eq!(p.get_attribute(ORIGINAL_ATTRIBUTE).unwrap(), r#"one <em id="em">two</em> three"#);
	assert_eq!(by_id("em").get_attribute(ORIGINAL_ATTRIBUTE).unwrap(), "two");
	assert_eq!(p.text_content().unwrap(), "one two three");
}

#[wasm_bindgen_test]
fn transforming_twice_changes_nothing() {
	page(r#"<div><p>Some words</p> trailing <a href="x">link text</a></div>"#);

	assert_eq!(transform(body().as_ref(), 60), 3);
	let once = body().inner_html();
	assert_eq!(transform(body().as_ref(), 60), 0);
	assert_eq!(body().inner_html(), once);
}

#[wasm_bindgen_test]
fn round_trip() {
	page(concat!(
		r#"<div id="outer"><p title="a &quot;quoted&quot; title">Inner words &amp; more</p>tail text</div>"#,
		"<ul><li>First item</li><li>Second <strong>bold</strong> item</li></ul>",
		"<code>untouched code</code>",
		"<p>  </p>",
		r#"<section><h1>Heading</h1><p>Body with <a href="/x">a link</a>.</p></section>"#,
	));
	let before = body().inner_html();

	assert!(transform(body().as_ref(), 50) > 0);
	assert_ne!(body().inner_html(), before);

	assert!(restore(&document()) > 0);
	assert_eq!(body().inner_html(), before);
	assert_eq!(document().query_selector_all("[data-lexilens-original], [data-lexilens-bionic]").unwrap().length(), 0);
}

#[wasm_bindgen_test]
fn restore_skips_removed_elements() {
	page(r#"<p id="gone">Removed words</p><p id="kept">Kept words</p>"#);

	assert_eq!(transform(body().as_ref(), 50), 2);
	by_id("gone").remove();

	assert_eq!(restore(&document()), 1);
	assert_eq!(body().inner_html(), r#"<p id="kept">Kept words</p>"#);
}

#[wasm_bindgen_test]
fn detached_subtree() {
	page("");
	let div = document().create_element("div").unwrap();
	div.set_inner_html("<p>Detached words</p>");

	assert_eq!(transform(div.as_ref(), 50), 1);
	assert_eq!(marker_count(&div), 2);
}
