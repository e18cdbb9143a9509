#![doc(html_root_url = "https://docs.rs/lexilens-bionic/0.1.0")]
#![warn(clippy::pedantic)]

pub use lignin;

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod fragment;
pub mod settings;
pub mod tokenize;
pub mod transform;
pub mod wasm;
pub mod watch;

pub use controller::BionicReading;
pub use settings::BionicSettings;
