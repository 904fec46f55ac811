//! Integration tests against the real upstream providers.
//!
//! These tests require real API keys and are ignored by default. To run
//! them, create a `.env` file in the lectio-lib directory with:
//!
//! ```env
//! LECTIO_ESV_API_KEY=your-esv-key
//! LECTIO_API_BIBLE_KEY=your-api-bible-key
//! LECTIO_NLT_API_KEY=your-nlt-key
//! ```
//!
//! Then run: `cargo test -p lectio-lib -- --ignored`

use std::env;

use lectio_lib::LectioClient;

fn load_env(name: &str) -> Option<String> {
    let _ = dotenvy::dotenv();
    env::var(name).ok()
}

#[tokio::test]
#[ignore = "requires real API keys in .env file"]
async fn test_esv_single_verse() {
    let key = load_env("LECTIO_ESV_API_KEY").expect("Missing LECTIO_ESV_API_KEY. See module docs.");

    let client = LectioClient::builder().esv_api_key(key).build();
    let response = client
        .resolve_passage("ESV", "John 3:16", false)
        .await
        .unwrap();

    let verses = response.into_inner();
    assert_eq!(verses.len(), 1);
    assert_eq!(verses[0].chapter, 3);
    assert_eq!(verses[0].verse, 16);
    assert!(verses[0].text.contains("God so loved the world"));
}

#[tokio::test]
#[ignore = "requires real API keys in .env file"]
async fn test_api_bible_chapter() {
    let key =
        load_env("LECTIO_API_BIBLE_KEY").expect("Missing LECTIO_API_BIBLE_KEY. See module docs.");

    let client = LectioClient::builder().api_bible_key(key).build();
    let response = client
        .resolve_passage("KJV", "Psalm 23", false)
        .await
        .unwrap();

    let verses = response.into_inner();
    assert_eq!(verses.len(), 6);
    assert!(verses.iter().all(|v| v.chapter == 23));
}

#[tokio::test]
#[ignore = "hits the keyless public provider"]
async fn test_bible_api_fallback_without_any_keys() {
    // No keys at all: the licensed sources report NotConfigured and the
    // chain falls through to the keyless generic provider.
    let client = LectioClient::builder().build();
    let response = client
        .resolve_passage("WEB", "John 3:16", false)
        .await
        .unwrap();

    let verses = response.into_inner();
    assert_eq!(verses.len(), 1);
    assert_eq!(verses[0].verse, 16);
}

#[tokio::test]
#[ignore = "hits the keyless public provider"]
async fn test_cross_chapter_decomposition_live() {
    let client = LectioClient::builder().build();
    let response = client
        .resolve_passage("KJV", "Matthew 5:3-7:29", false)
        .await
        .unwrap();

    let verses = response.into_inner();
    assert_eq!(verses.first().map(|v| (v.chapter, v.verse)), Some((5, 3)));
    assert_eq!(verses.last().map(|v| (v.chapter, v.verse)), Some((7, 29)));
}
