//! Metric collectors: flair tallies and comment statistics per community.
//!
//! Each collector fetches its own data and owns its own accumulators.
//! The statistics themselves are pure functions over decoded comments so
//! they can be exercised without the network.

use crate::quadrant::{Quadrant, Tally, UnknownFlair};
use crate::reddit::{Comment, RedditClient, Sort};
use anyhow::{Context, Result};
use tracing::info;

/// Per-quadrant statistic plus the number of comments it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentStats {
    /// One value per quadrant, in index order.
    pub per_quadrant: [f64; Quadrant::COUNT],
    /// Total comments inspected across all quadrants.
    pub comments_seen: u64,
}

/// Approximate word count: spaces, plus paragraph-collapsed line breaks,
/// plus one. `word_count("a b\n\nc") == 3`, `word_count("") == 1`.
pub fn word_count(text: &str) -> usize {
    let spaces = text.matches(' ').count();
    let breaks = text.replace("\n\n", "\n").matches('\n').count();
    spaces + breaks + 1
}

/// Per-quadrant mean word count over a set of comments.
///
/// Quadrants with no comments get a mean of 0.
pub fn mean_comment_words(comments: &[Comment]) -> Result<CommentStats, UnknownFlair> {
    let mut seen = [0u64; Quadrant::COUNT];
    let mut words = [0u64; Quadrant::COUNT];

    for comment in comments {
        let quadrant = Quadrant::from_flair(comment.author_flair_text.as_deref())?;
        seen[quadrant.index()] += 1;
        words[quadrant.index()] += word_count(&comment.body) as u64;
    }

    let mut per_quadrant = [0.0; Quadrant::COUNT];
    for index in 0..Quadrant::COUNT {
        if seen[index] > 0 {
            per_quadrant[index] = words[index] as f64 / seen[index] as f64;
        }
    }

    Ok(CommentStats {
        per_quadrant,
        comments_seen: seen.iter().sum(),
    })
}

/// Per-quadrant fraction of comments whose word count exceeds `threshold`.
///
/// Quadrants with no comments get a fraction of 0.
pub fn wall_of_text_share(
    comments: &[Comment],
    threshold: usize,
) -> Result<CommentStats, UnknownFlair> {
    let mut seen = [0u64; Quadrant::COUNT];
    let mut walls = [0u64; Quadrant::COUNT];

    for comment in comments {
        let quadrant = Quadrant::from_flair(comment.author_flair_text.as_deref())?;
        seen[quadrant.index()] += 1;
        if word_count(&comment.body) > threshold {
            walls[quadrant.index()] += 1;
        }
    }

    let mut per_quadrant = [0.0; Quadrant::COUNT];
    for index in 0..Quadrant::COUNT {
        if seen[index] > 0 {
            per_quadrant[index] = walls[index] as f64 / seen[index] as f64;
        }
    }

    Ok(CommentStats {
        per_quadrant,
        comments_seen: seen.iter().sum(),
    })
}

/// Tally post author flairs over a subreddit listing.
pub async fn listing_flair_tally(
    client: &RedditClient,
    subreddit: &str,
    sort: Sort,
    count: u32,
) -> Result<Tally> {
    let posts = client.listing(subreddit, sort, count).await?;
    let tally = Tally::from_flairs(posts.iter().map(|post| post.author_flair_text.as_deref()))
        .with_context(|| format!("Unclassifiable flair in the r/{} {} listing", subreddit, sort))?;
    info!(
        "r/{} {}: {} posts tallied",
        subreddit,
        sort,
        tally.total()
    );
    Ok(tally)
}

/// Tally comment author flairs over the newest posts.
pub async fn comment_flair_tally(
    client: &RedditClient,
    subreddit: &str,
    count: u32,
) -> Result<Tally> {
    let comments = newest_comments(client, subreddit, count).await?;
    let tally = Tally::from_flairs(
        comments
            .iter()
            .map(|comment| comment.author_flair_text.as_deref()),
    )
    .with_context(|| format!("Unclassifiable comment flair in r/{}", subreddit))?;
    info!("r/{}: {} comments tallied", subreddit, tally.total());
    Ok(tally)
}

/// Mean comment word count per quadrant over the newest posts.
pub async fn average_comment_words(
    client: &RedditClient,
    subreddit: &str,
    count: u32,
) -> Result<CommentStats> {
    let comments = newest_comments(client, subreddit, count).await?;
    mean_comment_words(&comments)
        .with_context(|| format!("Unclassifiable comment flair in r/{}", subreddit))
}

/// Wall-of-text fraction per quadrant over the newest posts.
pub async fn wall_of_text_fraction(
    client: &RedditClient,
    subreddit: &str,
    count: u32,
    threshold: usize,
) -> Result<CommentStats> {
    let comments = newest_comments(client, subreddit, count).await?;
    wall_of_text_share(&comments, threshold)
        .with_context(|| format!("Unclassifiable comment flair in r/{}", subreddit))
}

/// All top-level comments on the newest `count` posts.
async fn newest_comments(
    client: &RedditClient,
    subreddit: &str,
    count: u32,
) -> Result<Vec<Comment>> {
    let posts = client.listing(subreddit, Sort::New, count).await?;
    let mut comments = Vec::new();
    for post in &posts {
        comments.extend(client.comments(subreddit, &post.id).await?);
    }
    Ok(comments)
}
