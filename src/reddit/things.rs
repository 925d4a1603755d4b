//! Serde models for Reddit's JSON "Thing" envelopes.
//!
//! Every item in a listing arrives wrapped as `{"kind": "...", "data": {...}}`.
//! Posts are kind `t3`, comments are kind `t1`, and truncated comment trees
//! carry `more` stubs that have no author flair attribute at all. Unknown
//! kinds are kept undecoded and ignored by the typed accessors.

use serde::Deserialize;
use serde_json::Value;

/// A `Listing` response: one page of things plus the pagination cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    /// Cursor for the next page; `None` on the last page.
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Envelope>,
}

/// Raw `kind`/`data` envelope around a single thing.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// A submitted post (`t3`).
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub author_flair_text: Option<String>,
}

/// A comment (`t1`).
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author_flair_text: Option<String>,
}

impl ListingData {
    /// Decode the `t3` children of this page.
    pub fn posts(&self) -> serde_json::Result<Vec<Post>> {
        self.children
            .iter()
            .filter(|child| child.kind == "t3")
            .map(|child| serde_json::from_value(child.data.clone()))
            .collect()
    }

    /// Decode the `t1` children of this page.
    ///
    /// `more` stubs and any other non-comment kinds are skipped; they carry
    /// no flair attribute and never enter a tally.
    pub fn comments(&self) -> serde_json::Result<Vec<Comment>> {
        self.children
            .iter()
            .filter(|child| child.kind == "t1")
            .map(|child| serde_json::from_value(child.data.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t3_next",
            "children": [
                {"kind": "t3", "data": {"id": "abc123", "author_flair_text": ":libleft: - Anarchist", "title": "a post"}},
                {"kind": "t3", "data": {"id": "def456", "author_flair_text": null}}
            ]
        }
    }"#;

    const COMMENT_LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": null,
            "children": [
                {"kind": "t1", "data": {"body": "first comment", "author_flair_text": "right"}},
                {"kind": "more", "data": {"count": 120, "children": ["aaa", "bbb"]}},
                {"kind": "t1", "data": {"body": "second", "author_flair_text": null}}
            ]
        }
    }"#;

    #[test]
    fn test_decode_post_listing() {
        let listing: Listing = serde_json::from_str(POST_LISTING).unwrap();
        assert_eq!(listing.data.after.as_deref(), Some("t3_next"));

        let posts = listing.data.posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "abc123");
        assert_eq!(
            posts[0].author_flair_text.as_deref(),
            Some(":libleft: - Anarchist")
        );
        assert_eq!(posts[1].author_flair_text, None);
    }

    #[test]
    fn test_more_stubs_are_skipped() {
        let listing: Listing = serde_json::from_str(COMMENT_LISTING).unwrap();
        assert!(listing.data.after.is_none());

        let comments = listing.data.comments().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "first comment");
        assert_eq!(comments[0].author_flair_text.as_deref(), Some("right"));
        assert_eq!(comments[1].author_flair_text, None);
    }

    #[test]
    fn test_unknown_kinds_are_ignored() {
        let raw = r#"{"kind": "Listing", "data": {"children": [
            {"kind": "t5", "data": {"display_name": "PoliticalCompass"}}
        ]}}"#;
        let listing: Listing = serde_json::from_str(raw).unwrap();
        assert!(listing.data.posts().unwrap().is_empty());
        assert!(listing.data.comments().unwrap().is_empty());
    }

    #[test]
    fn test_comments_endpoint_shape() {
        // /comments/{id} returns two listings: the post, then its comments.
        let raw = format!("[{POST_LISTING}, {COMMENT_LISTING}]");
        let listings: Vec<Listing> = serde_json::from_str(&raw).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[1].data.comments().unwrap().len(), 2);
    }
}
