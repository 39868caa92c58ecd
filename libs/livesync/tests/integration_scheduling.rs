//! Integration tests for the polling schedule
//!
//! All tests run on the paused tokio clock, so delays are exact up to the
//! timer wheel granularity.

#[macro_use]
mod common;

use common::{advance, config, drain, ms, ScriptedFetcher, TIMER_SLACK};
use livesync::{NoJitter, Status, Synchronizer, UniformJitter, VisibilityController};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_start_fires_immediately() {
    let fetcher = ScriptedFetcher::new();
    let log = fetcher.log();
    let started = Instant::now();

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("zurich".to_string());
    drain().await;

    assert_eq!(log.count(), 1, "exactly one fetch on start");
    assert_eq!(log.calls()[0].at, started, "no initial delay");

    let snapshot = sync.snapshot();
    assert_eq!(snapshot.status, Status::Ready);
    assert_eq!(snapshot.data, Some(1));

    // Nothing else before the base interval elapses
    advance(ms(990)).await;
    assert_eq!(log.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_plain_interval_polling() {
    let fetcher = ScriptedFetcher::new();
    let log = fetcher.log();

    let _sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("all".to_string());

    advance(ms(3_500)).await;

    assert_eq!(log.count(), 4);
    for gap in log.gaps() {
        assert!(gap >= ms(1_000) && gap <= ms(1_000) + TIMER_SLACK, "gap {:?}", gap);
    }
}

#[tokio::test(start_paused = true)]
async fn test_no_overlap_with_slow_fetch() {
    for (interval_ms, latency_ms) in [(1_000, 3_000), (500, 500), (100, 2_500)] {
        verbose_println!("interval {}ms, latency {}ms", interval_ms, latency_ms);

        let fetcher = ScriptedFetcher::new().with_latency(ms(latency_ms));
        let log = fetcher.log();

        let sync = Synchronizer::builder(fetcher)
            .config(config(interval_ms, 0))
            .jitter(NoJitter)
            .start("slow".to_string());

        advance(ms(20_000)).await;

        assert_eq!(log.max_in_flight(), 1, "fetches must never overlap");
        assert!(log.count() >= 2);
        for gap in log.gaps() {
            // The next timer is armed only after the previous fetch settled
            assert!(gap >= ms(interval_ms + latency_ms), "gap {:?}", gap);
        }

        sync.shutdown().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_jitter_bound() {
    let fetcher = ScriptedFetcher::new();
    let log = fetcher.log();

    let _sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 500))
        .jitter(UniformJitter)
        .start("jitter".to_string());

    advance(ms(60_000)).await;

    let gaps = log.gaps();
    assert!(gaps.len() >= 39, "expected at least 39 gaps, got {}", gaps.len());
    for gap in gaps {
        assert!(gap >= ms(1_000), "gap below base interval: {:?}", gap);
        assert!(gap <= ms(1_500) + TIMER_SLACK, "gap above jitter window: {:?}", gap);
    }
}

#[tokio::test(start_paused = true)]
async fn test_stale_data_kept_on_error() {
    let fetcher = ScriptedFetcher::new();
    fetcher.push_outcome(Ok(7));
    fetcher.push_outcome(Err("upstream unavailable"));
    let log = fetcher.log();

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("entity".to_string());
    drain().await;

    assert_eq!(sync.snapshot().data, Some(7));
    assert_eq!(sync.snapshot().status, Status::Ready);

    advance(ms(1_000) + TIMER_SLACK).await;
    assert_eq!(log.count(), 2);

    let snapshot = sync.snapshot();
    assert_eq!(snapshot.data, Some(7), "last good payload survives a failure");
    assert_eq!(snapshot.status, Status::Error);
    assert_eq!(snapshot.error_message.as_deref(), Some("upstream unavailable"));

    // Failures are retried at the same cadence, no backoff
    advance(ms(1_000) + TIMER_SLACK).await;
    assert_eq!(log.count(), 3);

    let snapshot = sync.snapshot();
    assert_eq!(snapshot.status, Status::Ready);
    assert_eq!(snapshot.data, Some(3));
    assert!(snapshot.error_message.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_loading_keeps_previous_data() {
    let fetcher = ScriptedFetcher::new().with_latency(ms(300));
    let log = fetcher.log();

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("entity".to_string());

    drain().await;
    assert!(sync.snapshot().is_first_load());

    advance(ms(300)).await;
    assert_eq!(sync.snapshot().data, Some(1));

    // Second fire at ~1300ms, still loading at 1400ms
    advance(ms(1_100)).await;
    assert_eq!(log.count(), 2);
    let snapshot = sync.snapshot();
    assert_eq!(snapshot.status, Status::Loading);
    assert_eq!(snapshot.data, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_visibility_pause_and_resume() {
    let visibility = VisibilityController::new(true);
    let fetcher = ScriptedFetcher::new();
    let log = fetcher.log();

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .visibility(&visibility)
        .start("holdings".to_string());
    drain().await;
    assert_eq!(log.count(), 1);

    advance(ms(100)).await;
    visibility.hide();
    drain().await;
    let hidden_snapshot = sync.snapshot();

    // Well past the base interval, nothing fires while hidden
    advance(ms(10_000)).await;
    assert_eq!(log.count(), 1);
    assert_eq!(sync.snapshot(), hidden_snapshot, "hiding leaves the snapshot alone");

    let shown_at = Instant::now();
    visibility.show();
    drain().await;
    assert_eq!(log.count(), 2, "becoming visible fires right away");
    assert_eq!(log.calls()[1].at, shown_at);

    // Regular cadence resumes from the visibility-triggered fire
    advance(ms(1_000) + TIMER_SLACK).await;
    assert_eq!(log.count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_visible_while_fetch_outstanding() {
    let visibility = VisibilityController::new(true);
    let fetcher = ScriptedFetcher::new().with_latency(ms(500));
    let log = fetcher.log();

    let _sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .visibility(&visibility)
        .start("holdings".to_string());
    drain().await;

    visibility.hide();
    drain().await;
    visibility.show();
    drain().await;

    // The outstanding fetch absorbs the visibility fire
    assert_eq!(log.count(), 1);

    // It settles at 500ms and arms the timer for 1500ms
    advance(ms(1_400)).await;
    assert_eq!(log.count(), 1);
    advance(ms(100) + TIMER_SLACK).await;
    assert_eq!(log.count(), 2);
    assert_eq!(log.max_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_reschedules_next_fire() {
    let fetcher = ScriptedFetcher::new();
    let log = fetcher.log();
    let started = Instant::now();

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("trades".to_string());
    drain().await;

    advance(ms(400)).await;
    sync.refresh();
    drain().await;
    assert_eq!(log.count(), 2);

    // The fire that was due at 1000ms moved to 1400ms
    advance(ms(900)).await;
    assert_eq!(log.count(), 2);

    advance(ms(100) + TIMER_SLACK).await;
    assert_eq!(log.count(), 3);

    let third = log.calls()[2].at - started;
    assert!(third >= ms(1_400) && third <= ms(1_400) + TIMER_SLACK, "{:?}", third);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_shares_in_flight_guard() {
    let fetcher = ScriptedFetcher::new().with_latency(ms(500));
    let log = fetcher.log();

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("trades".to_string());
    drain().await;

    advance(ms(100)).await;
    sync.refresh();
    sync.refresh();
    drain().await;

    assert_eq!(log.count(), 1, "refresh while loading is folded into the outstanding fetch");
    assert_eq!(log.max_in_flight(), 1);

    advance(ms(1_500)).await;
    assert_eq!(log.count(), 2);
    assert_eq!(log.max_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_transitions() {
    let fetcher = ScriptedFetcher::new().with_latency(ms(50));

    let sync = Synchronizer::builder(fetcher)
        .config(config(1_000, 0))
        .jitter(NoJitter)
        .start("zurich".to_string());
    let mut updates = sync.subscribe();

    let mut seen = Vec::new();
    while seen.last() != Some(&Status::Ready) {
        updates.changed().await.unwrap();
        seen.push(updates.borrow_and_update().status);
    }

    assert!(seen.contains(&Status::Ready));
    assert_eq!(updates.borrow().data, Some(1));
}
