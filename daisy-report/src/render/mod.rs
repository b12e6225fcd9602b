//! Server-side HTML rendering
//!
//! Markup is built with maud, which escapes every interpolated value.

pub mod cards;
pub mod pages;

use maud::{html, Markup, DOCTYPE};

pub use cards::{CardList, PostCard};

/// Shared page shell
pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Daisy" }
            }
            body {
                header.site-header {
                    a href="/" { "Daisy" }
                }
                main.container {
                    (body)
                }
            }
        }
    }
}
