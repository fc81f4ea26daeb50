//! Preference store tests: bounded history, upsert, persistence across instances

mod test_utils;

use nextmove::store::MAX_RECENT_REPLIES;
use nextmove::{Catalog, PreferenceStore, ReplyResult, Style};
use test_utils::{reply, request};

fn entry(message: &str) -> ReplyResult {
    ReplyResult::new(&request(message), reply(&format!("{message} cevabı")))
}

#[tokio::test]
async fn test_history_keeps_ten_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());

    let mut ids = Vec::new();
    for i in 0..11 {
        let e = entry(&format!("Mesaj {i}"));
        ids.push(e.id.clone());
        store.record_reply(e).await.unwrap();
    }

    let history = store.load_recent_replies().await;
    assert_eq!(history.len(), MAX_RECENT_REPLIES);
    assert_eq!(history[0].message, "Mesaj 10");
    assert_eq!(history[9].message, "Mesaj 1");
    assert!(!history.iter().any(|r| r.id == ids[0]));
}

#[tokio::test]
async fn test_record_reply_replaces_same_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());

    let first = entry("İlk mesaj");
    let second = entry("İkinci mesaj");
    store.record_reply(first.clone()).await.unwrap();
    store.record_reply(second.clone()).await.unwrap();

    let redone = first.regenerated(Style::new("Komik"), reply("Yeni cevap"));
    let history = store.record_reply(redone).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, first.id);
    assert_eq!(history[0].result.best_reply, "Yeni cevap");
    assert_eq!(history[1].id, second.id);
}

#[tokio::test]
async fn test_save_keeps_only_first_ten() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());

    let entries: Vec<ReplyResult> = (0..15).map(|i| entry(&format!("Mesaj {i}"))).collect();
    store.save_recent_replies(&entries).await.unwrap();

    let history = store.load_recent_replies().await;
    assert_eq!(history.len(), MAX_RECENT_REPLIES);
    assert_eq!(history[0].id, entries[0].id);
}

#[tokio::test]
async fn test_records_survive_a_new_instance() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = PreferenceStore::new(dir.path());
        store.save_style(&Style::new("Flörtöz")).await.unwrap();
        store.save_character("Net & Direkt").await.unwrap();
        store.record_reply(entry("Selam, naber?")).await.unwrap();
    }

    let store = PreferenceStore::new(dir.path());
    let catalog = Catalog::default();
    assert_eq!(store.load_style(&catalog).await.as_str(), "Flörtöz");
    assert_eq!(store.load_character(&catalog).await.unwrap().name, "Net & Direkt");
    assert_eq!(store.load_recent_replies().await.len(), 1);

    store.clear_all().await.unwrap();
    assert_eq!(store.load_style(&catalog).await.as_str(), "Cool");
    assert!(store.load_character(&catalog).await.is_none());
    assert!(store.load_recent_replies().await.is_empty());
}

#[tokio::test]
async fn test_bad_entries_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());
    let good = entry("Selam, naber?");

    let raw = serde_json::json!([{ "id": "broken" }, good.clone()]);
    tokio::fs::write(dir.path().join("nextmove.recentReplies.json"), raw.to_string())
        .await
        .unwrap();

    let history = store.load_recent_replies().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, good.id);
}
