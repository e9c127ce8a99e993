//! Demo blog posts: the dashboard post feed.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::logic::{EmptySearchPolicy, SortKey};
use crate::view::ViewConfig;

/// Usernames assigned to generated posts.
const AUTHORS: [&str; 6] = ["alice", "bob", "carol", "dave", "erin", "frank"];

/// Topics mixed into generated titles and bodies.
const TOPICS: [&str; 8] = [
    "Rust", "React", "caching", "databases", "testing", "deployment", "design", "performance",
];

/// One post in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Sequential identifier.
    pub id: u32,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author username; missing for posts whose author was removed.
    pub author: Option<String>,
    /// Number of likes.
    pub like_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Author username or an empty string.
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<40}  by {:<8} {:>4} likes",
            self.created_at.format("%Y-%m-%d"),
            self.title,
            self.author.as_deref().unwrap_or("Unknown"),
            self.like_count
        )
    }
}

/// What: Generate `count` posts, newest first by id.
///
/// Inputs:
/// - `count`: Number of posts
///
/// Output:
/// - Posts with random topic titles, authors (about 5% missing), like counts
///   (0..=499), and timestamps going back roughly one hour per post.
#[must_use]
pub fn generate_posts(count: usize) -> Vec<Post> {
    let mut rng = rand::rng();
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            let topic = TOPICS[rng.random_range(0..TOPICS.len())];
            let other = TOPICS[rng.random_range(0..TOPICS.len())];
            let author = (rng.random_range(0..100_u32) >= 5)
                .then(|| AUTHORS[rng.random_range(0..AUTHORS.len())].to_string());
            Post {
                id,
                title: format!("Notes on {topic} #{id}"),
                content: format!("A short write-up about {topic} and how it relates to {other}."),
                author,
                like_count: rng.random_range(0..500_u32),
                created_at: now
                    - Duration::minutes(i64::from(id) * 60 + rng.random_range(0..30_i64)),
            }
        })
        .collect()
}

/// What: View preset for the post feed.
///
/// Inputs: None
///
/// Output:
/// - Config searching title, content, and author; sort keys `date` (newest
///   first, default) and `likes` (most liked first); 50 posts per page.
///
/// Details:
/// - All posts are listed while the search box is empty (`ShowAll`).
#[must_use]
pub fn posts_view_config() -> ViewConfig<Post> {
    ViewConfig::new()
        .search_field("title", |post: &Post| post.title.as_str())
        .search_field("content", |post: &Post| post.content.as_str())
        .search_field("author", Post::author_name)
        .sort_key(SortKey::newest_first("date", |post: &Post| post.created_at))
        .sort_key(SortKey::descending("likes", |post: &Post| post.like_count))
        .default_sort_key("date")
        .initial_window_size(50)
        .empty_search_policy(EmptySearchPolicy::ShowAll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::view::View;
    use chrono::TimeZone;

    fn post(id: u32, title: &str, author: Option<&str>, likes: u32, hour: u32) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: format!("body of {title}"),
            author: author.map(str::to_string),
            like_count: likes,
            created_at: Utc
                .with_ymd_and_hms(2024, 5, 1, hour, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }

    #[test]
    /// What: Feed preset lists everything, newest first, and searches the author.
    ///
    /// Inputs:
    /// - Four posts at different hours, one without an author.
    ///
    /// Output:
    /// - Empty term shows all four by date desc; "carol" finds her post; likes sort descending.
    fn posts_preset_behaviour() {
        let posts = vec![
            post(0, "Rust tips", Some("alice"), 10, 8),
            post(1, "Caching", Some("carol"), 50, 12),
            post(2, "Testing", None, 30, 10),
            post(3, "Design", Some("bob"), 50, 9),
        ];
        let mut view =
            View::with_clock(posts, posts_view_config(), ManualClock::new()).expect("valid preset");
        let ids: Vec<u32> = view.current().visible.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 0]);

        view.commit_search_term("CAROL");
        let ids: Vec<u32> = view.current().visible.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        view.reset();
        view.set_sort_key("likes").expect("declared key");
        let ids: Vec<u32> = view.current().visible.iter().map(|p| p.id).collect();
        // Equal likes keep the filtered (collection) order: 1 before 3.
        assert_eq!(ids, vec![1, 3, 2, 0]);
    }

    #[test]
    /// What: Generated posts carry ids in order and timestamps in the past.
    fn generated_posts_shape() {
        let posts = generate_posts(40);
        assert_eq!(posts.len(), 40);
        assert!(posts.iter().enumerate().all(|(i, p)| p.id as usize == i));
        assert!(posts.iter().all(|p| p.created_at <= Utc::now()));
        assert!(posts.iter().all(|p| p.like_count < 500));
        assert!(posts.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }

    #[test]
    /// What: Posts without an author render as "Unknown".
    fn display_unknown_author() {
        let line = post(9, "Orphan", None, 0, 1).to_string();
        assert!(line.contains("Unknown"));
        assert!(line.starts_with("2024-05-01"));
    }
}
