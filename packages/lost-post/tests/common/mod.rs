//! Shared fixtures for integration tests.

#![allow(dead_code)]

use lost_post::{Composer, DraftField, Post};
use serde_json::{json, Value};
use wiremock::Request;

/// Composer filled with the "Lost Wallet" draft.
pub fn wallet_composer() -> Composer {
    let mut composer = Composer::new();
    composer.form.change(DraftField::Title, "Lost Wallet");
    composer.form.change(DraftField::LostStatus, "lost");
    composer.form.change(DraftField::LostDate, "2024-01-01");
    composer.form.change(DraftField::LostLocation, "Main St");
    composer.form.change(DraftField::PicturePath, "x");
    composer
}

/// Posts the fake service answers with.
pub fn server_posts() -> Value {
    json!([
        {
            "_id": "p2",
            "userId": "u1",
            "title": "Lost Wallet",
            "lostStatus": "lost",
            "lostDate": "2024-01-01",
            "lostLocation": "Main St",
            "picturePath": "x",
            "likes": {}
        },
        {
            "_id": "p1",
            "userId": "u9",
            "title": "Lost Keys",
            "lostStatus": "found",
            "lostDate": "2023-12-24",
            "lostLocation": "Park",
            "picturePath": "keys.png",
            "likes": {"u1": true}
        }
    ])
}

pub fn server_posts_typed() -> Vec<Post> {
    serde_json::from_value(server_posts()).unwrap()
}

/// Values of every text part named `name` in a multipart body, in order.
pub fn text_parts(request: &Request, name: &str) -> Vec<String> {
    let body = String::from_utf8_lossy(&request.body);
    let marker = format!("name=\"{name}\"\r\n\r\n");

    body.match_indices(&marker)
        .map(|(start, _)| {
            let rest = &body[start + marker.len()..];
            let end = rest.find("\r\n").unwrap_or(rest.len());
            rest[..end].to_string()
        })
        .collect()
}

pub fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}
