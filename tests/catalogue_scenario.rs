use std::sync::Arc;
use std::time::Duration;

use herodex::collab::{DialogResult, ScriptedDialogs};
use herodex::config::HerodexConfig;
use herodex::context::AppContext;
use herodex::model::HeroDraft;
use herodex::store::seed::{DC_COMICS, MARVEL_COMICS};
use herodex::test_utils::init_tracing;
use herodex::view::{LoadPhase, ViewOrchestrator};
use tokio::time::{sleep, Instant};

#[tokio::test(start_paused = true)]
async fn test_typed_search_then_facet() {
    init_tracing();
    let context = AppContext::mock(HerodexConfig::default());
    let view = Arc::new(ViewOrchestrator::new(&context));

    let start = Instant::now();
    assert!(view.mount().await);
    assert_eq!(start.elapsed(), Duration::from_millis(800));
    assert_eq!(view.snapshot().total_heroes, 15);

    let follower = tokio::spawn({
        let view = Arc::clone(&view);
        async move { view.follow_search().await }
    });
    let mut rx = view.subscribe();

    let typed = Instant::now();
    view.keystroke("m");
    sleep(Duration::from_millis(100)).await;
    view.keystroke("ma");
    sleep(Duration::from_millis(150)).await;
    view.keystroke("man");

    rx.changed().await.unwrap();
    assert_eq!(typed.elapsed(), Duration::from_millis(550));
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.filter.search_term, "man");
    assert_eq!(snapshot.filtered_count(), 6);

    view.filter_by_publisher(DC_COMICS);
    let snapshot = view.snapshot();
    assert_eq!(snapshot.filtered_count(), 4);
    assert_eq!(snapshot.filter.search_term, "man");
    assert_eq!(snapshot.displayed.len(), 4);
    assert_eq!(snapshot.total_pages, 1);

    view.filter_by_publisher(DC_COMICS);
    assert_eq!(view.snapshot().filtered_count(), 6);

    follower.abort();
}

#[tokio::test(start_paused = true)]
async fn test_add_engages_busy_until_refreshed() {
    let dialogs = Arc::new(ScriptedDialogs::new());
    dialogs.respond(DialogResult::Draft(
        HeroDraft::new("Storm").with_publisher(MARVEL_COMICS),
    ));
    let context = AppContext::mock(HerodexConfig::default()).with_dialogs(dialogs.clone());
    let view = Arc::new(ViewOrchestrator::new(&context));
    view.mount().await;

    let adding = tokio::spawn({
        let view = Arc::clone(&view);
        async move { view.add_hero().await }
    });

    sleep(Duration::from_millis(500)).await;
    assert!(view.is_busy());
    assert_eq!(view.snapshot().total_heroes, 15);

    // Write latency, then the refresh listing.
    sleep(Duration::from_millis(1400)).await;
    let added = adding.await.unwrap().unwrap();
    assert_eq!(added.id, 16);
    assert!(!view.is_busy());

    let snapshot = view.snapshot();
    assert_eq!(snapshot.phase, LoadPhase::Ready);
    assert_eq!(snapshot.total_heroes, 16);
    assert_eq!(snapshot.total_pages, 4);
}

#[tokio::test(start_paused = true)]
async fn test_ids_never_repeat_after_deleting_the_newest() {
    let dialogs = Arc::new(ScriptedDialogs::new());
    let config = HerodexConfig {
        read_latency_ms: 0,
        write_latency_ms: 0,
        ..HerodexConfig::default()
    };
    let context = AppContext::mock(config).with_dialogs(dialogs.clone());
    let view = ViewOrchestrator::new(&context);
    view.mount().await;

    dialogs.respond(DialogResult::Draft(HeroDraft::new("Storm")));
    let storm = view.add_hero().await.unwrap();
    assert_eq!(storm.id, 16);

    dialogs.respond(DialogResult::Confirmed(true));
    assert!(view.delete_hero(&storm).await);

    dialogs.respond(DialogResult::Draft(HeroDraft::new("Rogue")));
    let rogue = view.add_hero().await.unwrap();
    assert_eq!(rogue.id, 17);
    assert_eq!(view.snapshot().total_heroes, 16);
}
