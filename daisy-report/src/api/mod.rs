//! HTTP handlers for daisy-report

pub mod blogs;
pub mod buildinfo;
pub mod health;
pub mod pages;
pub mod status;

pub use blogs::{create_blog, create_report, list_blog_posts};
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use pages::{not_found_page, serve_index, view_report};
pub use status::get_status;
