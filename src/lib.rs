//! # Noteworthy
//!
//! Finds an entry in the Eclipse "New and Noteworthy" release notes and puts
//! it on the clipboard as a Markdown block quote.
//!
//! ## Flow
//!
//! - **Fetch** every release-notes page for the requested version
//! - **Extract** title/content pairs, tracking the page title and category headings
//! - **Filter** them by case-insensitive title and page substrings
//! - **Present** the single match on the clipboard, or list the candidates

pub mod clipboard;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod markdown;
pub mod page;
pub mod present;
pub mod workflow;

pub use clipboard::{Clipboard, SystemClipboard};
pub use config::{Query, Settings};
pub use extract::Feature;
pub use fetch::{HttpFetcher, PageSource};
pub use present::Outcome;
