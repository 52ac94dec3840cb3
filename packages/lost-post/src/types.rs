//! Wire types returned by the posts service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Authoritative, server-ordered list of posts.
pub type PostsCollection = Vec<Post>;

/// One post as the service reports it.
///
/// Fields this client does not model (likes, comments, timestamps, ...) are
/// kept in `extra` so a reconciled collection carries everything the server
/// sent. Modelled fields that are missing or `null` read as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lost_status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lost_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lost_location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub picture_path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Documented body of a successful create-post response.
#[derive(Debug, Deserialize)]
struct WrappedPosts {
    posts: PostsCollection,
}

/// Parse a successful create-post response body.
///
/// The documented shape is `{ "posts": [...] }`; the service has also been
/// seen answering with the bare array, so a body that starts with `[` is read
/// as one. Errors come from the shape that was attempted and keep serde's
/// message for the offending field.
pub fn parse_posts(body: &[u8]) -> serde_json::Result<PostsCollection> {
    let bare = body
        .iter()
        .find(|byte| !byte.is_ascii_whitespace())
        .is_some_and(|byte| *byte == b'[');

    if bare {
        serde_json::from_slice(body)
    } else {
        serde_json::from_slice::<WrappedPosts>(body).map(|wrapped| wrapped.posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_keeps_unknown_fields() {
        let post: Post = serde_json::from_value(json!({
            "_id": "p1",
            "userId": "u1",
            "title": "Lost Wallet",
            "lostStatus": "lost",
            "lostDate": "2024-01-01",
            "lostLocation": "Main St",
            "picturePath": "dog.jpg",
            "likes": {"u2": true},
            "comments": []
        }))
        .unwrap();

        assert_eq!(post.id, "p1");
        assert_eq!(post.lost_location, "Main St");
        assert_eq!(post.extra.get("likes"), Some(&json!({"u2": true})));

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["comments"], json!([]));
        assert_eq!(back["_id"], json!("p1"));
    }

    #[test]
    fn null_and_missing_fields_read_as_empty() {
        let post: Post = serde_json::from_value(json!({
            "_id": null,
            "title": "Lost Wallet",
            "picturePath": null
        }))
        .unwrap();

        assert_eq!(post.id, "");
        assert_eq!(post.title, "Lost Wallet");
        assert_eq!(post.picture_path, "");
        assert_eq!(post.lost_date, "");
        assert!(post.extra.is_empty());
    }

    #[test]
    fn parses_wrapped_and_bare_shapes() {
        let wrapped = parse_posts(br#"{"posts": [{"_id": "p1"}]}"#).unwrap();
        let bare = parse_posts(b"  \n[{\"_id\": \"p2\"}]").unwrap();

        assert_eq!(wrapped[0].id, "p1");
        assert_eq!(bare[0].id, "p2");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_posts(b"<html>oops</html>").is_err());
        assert!(parse_posts(br#"{"posts": "nope"}"#).is_err());
        assert!(parse_posts(b"").is_err());
    }

    #[test]
    fn parse_error_names_the_missing_field() {
        let err = parse_posts(br#"{"data": []}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `posts`"), "{err}");
    }

    #[test]
    fn parse_error_points_at_the_bad_value() {
        let err = parse_posts(br#"{"posts": [{"_id": "p1", "title": 5}]}"#).unwrap_err();
        assert!(err.is_data());
        assert!(err.to_string().contains("expected a string"), "{err}");
    }
}
