// Adapters layer: concrete implementations for external systems (http, html).

pub mod html;
pub mod http;

pub use html::{HtmlDocument, HtmlElement};
pub use http::HttpFetcher;
