mod common;

use anyhow::Result;
use common::{client, comment, listing, post, Scripted, BASE};
use redownr::{entity::Entity, error::Error, history::History};

fn ids(history: &History) -> Vec<&str> {
    history.iter().map(Entity::id).collect()
}

#[tokio::test]
async fn walks_every_page_until_the_cursor_runs_out() -> Result<()> {
    let script = Scripted::default();
    script
        .reply_json(&listing(vec![post("a1"), comment("a2")], Some("t1_a2")))
        .reply_json(&listing(vec![comment("b1")], Some("t1_b1")))
        .reply_json(&listing(vec![post("c1")], None));

    let history = History::new(&client(&script), "someone", None, None).await?;

    assert_eq!(ids(&history), ["0000a1", "0000a2", "0000b1", "0000c1"]);
    assert_eq!(history.pages(), 3);
    assert_eq!(
        script.urls(),
        [
            format!("{BASE}/user/someone.json"),
            format!("{BASE}/user/someone.json?after=t1_a2"),
            format!("{BASE}/user/someone.json?after=t1_b1"),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn stops_before_the_since_id() -> Result<()> {
    let script = Scripted::default();
    script
        .reply_json(&listing(vec![comment("aaa")], Some("t1_aaa")))
        .reply_json(&listing(vec![comment("bbb")], Some("t1_bbb")))
        .reply_json(&listing(vec![comment("ccc")], None));

    let history = History::new(&client(&script), "someone", Some("bbb"), None).await?;

    assert_eq!(ids(&history), ["000aaa"]);
    // the third page is never requested
    assert_eq!(script.sent().len(), 2);
    Ok(())
}

#[tokio::test]
async fn since_id_matches_padded_ids_too() -> Result<()> {
    let script = Scripted::default();
    script.reply_json(&listing(vec![comment("x1"), comment("x2"), comment("x3")], None));

    let history = History::new(&client(&script), "someone", Some("0000x2"), None).await?;

    assert_eq!(ids(&history), ["0000x1"]);
    Ok(())
}

#[tokio::test]
async fn max_pages_limits_requests() -> Result<()> {
    let script = Scripted::default();
    script
        .reply_json(&listing(vec![comment("a")], Some("t1_a")))
        .reply_json(&listing(vec![comment("b")], Some("t1_b")))
        .reply_json(&listing(vec![comment("c")], Some("t1_c")));

    let history = History::new(&client(&script), "someone", None, Some(2)).await?;

    assert_eq!(ids(&history), ["00000a", "00000b"]);
    assert_eq!(history.pages(), 2);
    assert_eq!(script.sent().len(), 2);
    Ok(())
}

#[tokio::test]
async fn malformed_later_page_keeps_earlier_results() -> Result<()> {
    let script = Scripted::default();
    script
        .reply_json(&listing(vec![post("p1"), comment("c1")], Some("t1_c1")))
        .reply("<html>we took you down</html>");

    let history = History::new(&client(&script), "someone", None, None).await?;

    assert_eq!(ids(&history), ["0000p1", "0000c1"]);
    Ok(())
}

#[tokio::test]
async fn non_utf8_later_page_keeps_earlier_results() -> Result<()> {
    let script = Scripted::default();
    script
        .reply_json(&listing(vec![comment("a1")], Some("t1_a1")))
        .reply_bytes(&[0xff, 0xfe, b'{']);

    let history = History::new(&client(&script), "someone", None, None).await?;

    assert_eq!(ids(&history), ["0000a1"]);
    assert_eq!(history.pages(), 2);
    Ok(())
}

#[tokio::test]
async fn non_utf8_first_page_is_an_error() {
    let script = Scripted::default();
    script.reply_bytes(&[0xff, 0xfe, b'{']);

    let err = History::new(&client(&script), "someone", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Utf8(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_first_page_is_an_error() {
    let script = Scripted::default();
    script.reply("<html>oops</html>");

    let err = History::new(&client(&script), "someone", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn blank_first_page_means_deleted_user() {
    let script = Scripted::default();
    script.reply("  \n");

    let err = History::new(&client(&script), "gone", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserDeleted(ref user) if user == "gone"));
}

#[tokio::test]
async fn error_404_means_unknown_user() {
    let script = Scripted::default();
    script.reply(r#"{"message": "Not Found", "error": 404}"#);

    let err = History::new(&client(&script), "nobody", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserNotFound(ref user) if user == "nobody"));
}

#[tokio::test]
async fn transport_failure_propagates() {
    let script = Scripted::default();
    script
        .reply_json(&listing(vec![comment("a")], Some("t1_a")))
        .fail("connection reset");

    let err = History::new(&client(&script), "someone", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn other_listing_kinds_are_skipped() -> Result<()> {
    let script = Scripted::default();
    script.reply_json(&listing(
        vec![
            comment("c1"),
            serde_json::json!({"kind": "t2", "data": {"name": "x"}}),
            post("p1"),
        ],
        None,
    ));

    let history = History::new(&client(&script), "someone", None, None).await?;

    assert_eq!(ids(&history), ["0000c1", "0000p1"]);
    assert!(history[0].as_comment().is_some());
    assert!(history[1].as_post().is_some());
    Ok(())
}
