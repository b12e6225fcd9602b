//! Post cards on the report page
//!
//! [`CardList`] is the display container the recency engine reorders. Cards
//! arrive in collection order; the page calls
//! [`OrderingEngine::apply`](daisy_common::OrderingEngine::apply) once before
//! rendering.

use daisy_common::db::BlogPost;
use daisy_common::{CardContainer, PostRecord};
use maud::{html, Markup};

/// Characters of post content shown on a card
pub const EXCERPT_CHARS: usize = 200;

/// One rendered post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub title: String,
    /// Date text exactly as the blog displayed it
    pub date: String,
    pub url: Option<String>,
    pub log_no: Option<u64>,
    pub is_private: bool,
    pub excerpt: String,
}

impl From<&BlogPost> for PostCard {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            date: post.date.clone().unwrap_or_default(),
            url: post.url.clone(),
            log_no: post.log_no.and_then(|n| u64::try_from(n).ok()),
            is_private: post.is_private,
            excerpt: excerpt(&post.content),
        }
    }
}

impl PostCard {
    /// Ordering inputs read back from the card
    pub fn record(&self) -> PostRecord {
        PostRecord::new(
            self.date.clone(),
            self.url.clone().unwrap_or_default(),
            self.log_no,
        )
    }

    pub fn render(&self) -> Markup {
        html! {
            article.post-card data-log-no=(self.log_no.unwrap_or(0)) {
                h3.post-title { (self.title) }
                @if !self.date.is_empty() {
                    span.post-date { (self.date) }
                }
                @if self.is_private {
                    span.private-badge { "비공개" }
                }
                @if !self.excerpt.is_empty() {
                    p.post-excerpt { (self.excerpt) }
                }
                @if let Some(url) = &self.url {
                    a.post-link href=(url) target="_blank" rel="noopener" { "원문 보기" }
                }
            }
        }
    }
}

/// Ordered container of post cards
#[derive(Debug, Clone, Default)]
pub struct CardList {
    cards: Vec<PostCard>,
}

impl CardList {
    pub fn new(cards: Vec<PostCard>) -> Self {
        Self { cards }
    }

    pub fn from_posts(posts: &[BlogPost]) -> Self {
        Self::new(posts.iter().map(PostCard::from).collect())
    }

    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn render(&self) -> Markup {
        html! {
            section.post-cards {
                @for card in &self.cards {
                    (card.render())
                }
            }
        }
    }
}

impl CardContainer for CardList {
    fn records(&self) -> Vec<PostRecord> {
        self.cards.iter().map(PostCard::record).collect()
    }

    fn reorder(&mut self, order: &[usize]) {
        let mut slots: Vec<Option<PostCard>> =
            std::mem::take(&mut self.cards).into_iter().map(Some).collect();
        self.cards = order
            .iter()
            .filter_map(|&from| slots.get_mut(from).and_then(Option::take))
            .collect();
    }
}

/// Leading slice of post content, cut on a character boundary
fn excerpt(content: &str) -> String {
    let trimmed = content.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
