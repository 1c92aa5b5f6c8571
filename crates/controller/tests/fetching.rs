mod common;

use assert_matches::assert_matches;

use ballie_controller::{FetchOutcome, ListBody};
use ballie_core::collaborator::Collaborator;
use ballie_core::error::CoreError;
use ballie_core::query::ResultPage;
use ballie_events::NoticeLevel;

use common::{drain_notices, mounted, shown_ids, unmounted, users, wait_for_lists, Op};

// -- initial load -------------------------------------------------------------

#[tokio::test]
async fn shows_skeleton_before_first_fetch() {
    let harness = unmounted(3);
    let view = harness.controller.snapshot().await;
    assert_eq!(view.body, ListBody::Loading { skeleton_rows: 6 });
    assert_eq!(view.page, 1);
}

#[tokio::test]
async fn mount_renders_first_page_newest_first() {
    let harness = mounted(25).await;
    let view = harness.controller.snapshot().await;

    assert_eq!(view.total, 25);
    assert_eq!(view.page_count, 3);
    assert!(!view.has_prev);
    assert!(view.has_next);
    assert_eq!(view.body.items().len(), 10);
    assert_eq!(view.body.items()[0].id, "U024");
    assert!(view.error.is_none());
}

#[tokio::test]
async fn no_matches_shows_empty_state() {
    let harness = mounted(0).await;
    let view = harness.controller.snapshot().await;
    assert_eq!(view.body, ListBody::Empty);
    assert_eq!(view.page_count, 1);
}

#[tokio::test]
async fn loading_after_first_fetch_keeps_previous_row_count() {
    let harness = mounted(4).await;
    let gate = harness.collaborator.gate_list("user");

    let controller = harness.controller.clone();
    let pending = tokio::spawn(async move { controller.set_search("user").await });
    wait_for_lists(&harness.collaborator, 2).await;

    let view = harness.controller.snapshot().await;
    assert_eq!(view.body, ListBody::Loading { skeleton_rows: 4 });

    gate.notify_one();
    assert!(pending.await.unwrap().is_applied());
    assert_eq!(harness.controller.snapshot().await.body.items().len(), 4);
}

// -- query state ----------------------------------------------------------------

#[tokio::test]
async fn search_resets_page_before_fetching() {
    let harness = mounted(25).await;
    harness.controller.set_page(3).await;
    assert_eq!(harness.controller.snapshot().await.page, 3);

    let outcome = harness.controller.set_search("user 1").await;
    assert_matches!(outcome, FetchOutcome::Applied { total: 11 });

    let view = harness.controller.snapshot().await;
    assert_eq!(view.page, 1);
    assert_eq!(view.search, "user 1");
}

#[tokio::test]
async fn filter_resets_page_and_clear_restores_everything() {
    let harness = mounted(25).await;
    harness.controller.set_page(2).await;

    let outcome = harness.controller.set_filter("status", "suspended").await;
    assert_matches!(outcome, FetchOutcome::Applied { total: 0 });
    let view = harness.controller.snapshot().await;
    assert_eq!(view.page, 1);
    assert_eq!(view.body, ListBody::Empty);
    assert_eq!(view.filters.get("status").map(String::as_str), Some("suspended"));

    harness.controller.clear_filters().await;
    let view = harness.controller.snapshot().await;
    assert_eq!(view.total, 25);
    assert!(view.filters.is_empty());
}

#[tokio::test]
async fn unchanged_query_does_not_fetch() {
    let harness = mounted(5).await;
    let before = harness.collaborator.calls(Op::List);

    assert_matches!(harness.controller.set_search("").await, FetchOutcome::Unchanged);
    assert_matches!(harness.controller.set_page(1).await, FetchOutcome::Unchanged);
    assert_matches!(harness.controller.clear_filters().await, FetchOutcome::Unchanged);

    assert_eq!(harness.collaborator.calls(Op::List), before);
}

#[tokio::test]
async fn next_and_prev_stay_within_bounds() {
    let harness = mounted(15).await;

    assert_matches!(harness.controller.prev_page().await, FetchOutcome::Unchanged);
    assert!(harness.controller.next_page().await.is_applied());
    assert_eq!(harness.controller.snapshot().await.page, 2);
    assert_matches!(harness.controller.next_page().await, FetchOutcome::Unchanged);

    let view = harness.controller.snapshot().await;
    assert_eq!(view.body.items().len(), 5);
    assert!(view.has_prev);
    assert!(!view.has_next);

    assert!(harness.controller.prev_page().await.is_applied());
    assert_eq!(harness.controller.snapshot().await.page, 1);
}

// -- ordering -------------------------------------------------------------------

#[tokio::test]
async fn older_response_arriving_last_is_discarded() {
    let harness = unmounted(0);
    let rows = users(3);

    let first = harness.controller.begin_fetch().await;
    let second = harness.controller.begin_fetch().await;

    let fresh = ResultPage {
        items: vec![rows[2].clone()],
        total: 1,
    };
    let stale = ResultPage {
        items: vec![rows[0].clone(), rows[1].clone()],
        total: 2,
    };

    assert!(harness.controller.complete_fetch(second, Ok(fresh)).await.is_applied());
    assert_matches!(
        harness.controller.complete_fetch(first, Ok(stale)).await,
        FetchOutcome::Stale
    );
    assert_eq!(shown_ids(&harness.controller).await, vec!["U002"]);
}

#[tokio::test]
async fn older_response_arriving_first_is_discarded() {
    let harness = unmounted(0);
    let rows = users(2);

    let first = harness.controller.begin_fetch().await;
    let second = harness.controller.begin_fetch().await;

    let outcome = harness
        .controller
        .complete_fetch(
            first,
            Ok(ResultPage {
                items: vec![rows[0].clone()],
                total: 1,
            }),
        )
        .await;
    assert_matches!(outcome, FetchOutcome::Stale);
    assert!(harness.controller.snapshot().await.body.is_loading());

    harness
        .controller
        .complete_fetch(
            second,
            Ok(ResultPage {
                items: vec![rows[1].clone()],
                total: 1,
            }),
        )
        .await;
    assert_eq!(shown_ids(&harness.controller).await, vec!["U001"]);
}

#[tokio::test]
async fn rapid_search_changes_render_latest_term() {
    let harness = mounted(25).await;
    let gate = harness.collaborator.gate_list("user 1");

    let controller = harness.controller.clone();
    let slow = tokio::spawn(async move { controller.set_search("user 1").await });
    wait_for_lists(&harness.collaborator, 2).await;

    let fast = harness.controller.set_search("user 2").await;
    assert_matches!(fast, FetchOutcome::Applied { total: 6 });

    gate.notify_one();
    assert_matches!(slow.await.unwrap(), FetchOutcome::Stale);

    let view = harness.controller.snapshot().await;
    assert_eq!(view.search, "user 2");
    assert_eq!(view.total, 6);
    assert!(view.body.items().iter().all(|u| u.name.starts_with("User 2")));
}

// -- unmount --------------------------------------------------------------------

#[tokio::test]
async fn response_after_unmount_is_ignored() {
    let harness = mounted(3).await;
    let ticket = harness.controller.begin_fetch().await;
    harness.controller.unmount();

    let outcome = harness
        .controller
        .complete_fetch(ticket, Ok(ResultPage::empty()))
        .await;
    assert_matches!(outcome, FetchOutcome::Unmounted);
    assert!(!harness.controller.is_mounted());
    assert_eq!(shown_ids(&harness.controller).await.len(), 3);
}

#[tokio::test]
async fn unmount_abandons_in_flight_fetch() {
    let harness = mounted(3).await;
    let _gate = harness.collaborator.gate_list("user");

    let controller = harness.controller.clone();
    let pending = tokio::spawn(async move { controller.set_search("user").await });
    wait_for_lists(&harness.collaborator, 2).await;

    harness.controller.unmount();
    assert_matches!(pending.await.unwrap(), FetchOutcome::Unmounted);

    // The abandoned request no longer counts as loading.
    let view = harness.controller.snapshot().await;
    assert_matches!(view.body, ListBody::Rows { .. });
    assert_eq!(view.body.items().len(), 3);
}

// -- failures -------------------------------------------------------------------

#[tokio::test]
async fn failed_fetch_keeps_rows_and_reports() {
    let mut harness = mounted(3).await;
    drain_notices(&mut harness.events);

    harness
        .collaborator
        .fail_next(Op::List, CoreError::Collaborator("permission denied".into()));
    let outcome = harness.controller.refresh().await;
    assert_matches!(outcome, FetchOutcome::Failed(CoreError::Collaborator(_)));

    let view = harness.controller.snapshot().await;
    assert_eq!(view.body.items().len(), 3);
    assert!(view.error.as_deref().unwrap().contains("permission denied"));
    assert_eq!(
        drain_notices(&mut harness.events),
        vec![(NoticeLevel::Error, "Failed to load users".to_string())]
    );

    harness.controller.refresh().await;
    assert!(harness.controller.snapshot().await.error.is_none());
}

#[tokio::test]
async fn failed_first_fetch_is_not_shown_as_loading() {
    let harness = unmounted(3);
    harness
        .collaborator
        .fail_next(Op::List, CoreError::Collaborator("down".into()));

    assert_matches!(harness.controller.refresh().await, FetchOutcome::Failed(_));
    let view = harness.controller.snapshot().await;
    assert_matches!(view.body, ListBody::Failed { ref message } if message.contains("down"));

    harness.controller.refresh().await;
    assert_eq!(harness.controller.snapshot().await.body.items().len(), 3);
}

#[tokio::test]
async fn failed_page_change_keeps_query_and_rows() {
    let harness = mounted(25).await;

    harness
        .collaborator
        .fail_next(Op::List, CoreError::Collaborator("down".into()));
    assert_matches!(harness.controller.set_page(2).await, FetchOutcome::Failed(_));

    let view = harness.controller.snapshot().await;
    assert_eq!(view.page, 1);
    assert_eq!(view.body.items()[0].id, "U024");
    assert!(view.has_next);
}

#[tokio::test]
async fn failed_search_keeps_previous_term_and_page() {
    let harness = mounted(25).await;
    harness.controller.set_page(2).await;

    harness
        .collaborator
        .fail_next(Op::List, CoreError::Collaborator("down".into()));
    assert_matches!(harness.controller.set_search("user 2").await, FetchOutcome::Failed(_));

    let view = harness.controller.snapshot().await;
    assert_eq!(view.search, "");
    assert_eq!(view.page, 2);
    assert_eq!(view.body.items()[0].id, "U014");

    // Retrying the same term is a real change again.
    assert!(harness.controller.set_search("user 2").await.is_applied());
}

// -- page bounds ------------------------------------------------------------------

#[tokio::test]
async fn external_deletes_snap_page_back_in_range() {
    let harness = mounted(25).await;
    harness.controller.set_page(3).await;

    for id in ["U000", "U001", "U002", "U003", "U004", "U005", "U006", "U007", "U008", "U009"] {
        harness.collaborator.store.delete(id).await.unwrap();
    }

    let before = harness.collaborator.calls(Op::List);
    let outcome = harness.controller.refresh().await;
    assert_matches!(outcome, FetchOutcome::Applied { total: 15 });
    // One fetch for the stale page, one for the corrected page.
    assert_eq!(harness.collaborator.calls(Op::List), before + 2);

    let view = harness.controller.snapshot().await;
    assert_eq!(view.page, 2);
    assert_eq!(view.body.items().len(), 5);
}
