//! Full pages: index, report, error

use daisy_common::db::{Blog, BlogStatus, Report};
use maud::{html, Markup};

use super::{layout, CardList};

/// Blog listing with readiness per blog
pub fn index_page(blogs: &[(Blog, BlogStatus)]) -> Markup {
    layout(
        "Blog Self-Analysis",
        html! {
            h1 { "Blog Self-Analysis" }
            @if blogs.is_empty() {
                p.empty { "No blogs have been submitted yet." }
            } @else {
                table.blogs {
                    thead {
                        tr { th { "Blog" } th { "Posts" } th { "Report" } }
                    }
                    tbody {
                        @for (blog, status) in blogs {
                            tr {
                                td { a href=(blog.url) { (blog.account_id) } }
                                td { (status.post_count) }
                                td {
                                    @if let Some(report_id) = status.report_id {
                                        a href={ "/report/" (report_id) } { "View report" }
                                    } @else {
                                        span.pending { "Analyzing…" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Analysis report followed by the blog's posts, newest first
///
/// `cards` must already be ordered by the caller.
pub fn report_page(blog: &Blog, report: &Report, cards: &CardList) -> Markup {
    layout(
        &format!("{} report", blog.account_id),
        html! {
            h1 { "Self-Analysis Report" }
            p.report-meta {
                a href=(blog.url) { (blog.account_id) }
                " · " (report.created_at)
            }
            @for (heading, text) in report.sections() {
                section.report-section {
                    h2 { (heading) }
                    @if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
                        @for paragraph in text.lines().filter(|l| !l.trim().is_empty()) {
                            p { (paragraph) }
                        }
                    } @else {
                        p.empty { "No analysis available." }
                    }
                }
            }
            h2 { "Analyzed Posts (" (cards.len()) ")" }
            (cards.render())
        },
    )
}

/// Error page for HTML routes
pub fn error_page(error: &str) -> Markup {
    layout(
        error,
        html! {
            h1.error { (error) }
            p { a href="/" { "Back to start" } }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PostCard;

    fn blog() -> Blog {
        Blog {
            id: 1,
            url: "https://blog.naver.com/myid".to_string(),
            account_id: "myid".to_string(),
            created_at: "2024-03-05 10:00:00".to_string(),
        }
    }

    fn report() -> Report {
        Report {
            id: 7,
            blog_id: 1,
            characteristics: Some("Curious\n\nMethodical".to_string()),
            strengths: None,
            weaknesses: Some("   ".to_string()),
            thinking_patterns: None,
            decision_making: None,
            unconscious_biases: None,
            advice: Some("Sleep".to_string()),
            created_at: "2024-03-05 10:05:00".to_string(),
        }
    }

    #[test]
    fn test_report_page_sections() {
        let html = report_page(&blog(), &report(), &CardList::default()).into_string();
        assert!(html.contains("<p>Curious</p>"));
        assert!(html.contains("<p>Methodical</p>"));
        assert!(html.contains("Unconscious Biases"));
        assert!(html.contains("No analysis available."));
        assert!(html.contains("Analyzed Posts (0)"));
    }

    #[test]
    fn test_report_page_cards_in_given_order() {
        let cards = CardList::new(vec![
            PostCard {
                title: "first-card".to_string(),
                date: String::new(),
                url: None,
                log_no: None,
                is_private: false,
                excerpt: String::new(),
            },
            PostCard {
                title: "second-card".to_string(),
                date: String::new(),
                url: None,
                log_no: None,
                is_private: false,
                excerpt: String::new(),
            },
        ]);
        let html = report_page(&blog(), &report(), &cards).into_string();
        let first = html.find("first-card").unwrap();
        let second = html.find("second-card").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_index_page_links() {
        let status = BlogStatus {
            post_count: 3,
            has_report: true,
            report_id: Some(7),
        };
        let html = index_page(&[(blog(), status)]).into_string();
        assert!(html.contains("href=\"/report/7\""));

        let empty = index_page(&[]).into_string();
        assert!(empty.contains("No blogs have been submitted yet."));
    }

    #[test]
    fn test_error_page() {
        let html = error_page("404 - Page Not Found").into_string();
        assert!(html.contains("404 - Page Not Found"));
    }
}
