mod entry;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod views;

pub use entry::{app, router};
pub use middleware::{catch_panic_layer, html_error_middleware};
pub use response::{HtmlResult, page, render};
