//! End-to-end view behaviour through the public API.
//!
//! Uses a small task record type rather than the demo datasets so the
//! expected counts follow directly from the fixture.

use std::sync::Arc;
use std::time::Duration;

use viewpipe::{
    DiscreteFilter, EmptySearchPolicy, ManualClock, SortKey, View, ViewConfig, ViewError,
    ViewPhase, distinct_values,
};

#[derive(Debug, Clone, PartialEq)]
struct Task {
    title: String,
    owner: String,
    priority: u8,
    done: bool,
}

/// 60 tasks: titles "Fix bug n" (n even) or "Write docs n" (n odd), owners cycle
/// through ana/ben/cy, priority `n % 4`, every fifth task done.
fn tasks() -> Arc<[Task]> {
    (0..60_u8)
        .map(|n| Task {
            title: if n % 2 == 0 {
                format!("Fix bug {n}")
            } else {
                format!("Write docs {n}")
            },
            owner: ["ana", "ben", "cy"][usize::from(n % 3)].to_string(),
            priority: n % 4,
            done: n % 5 == 0,
        })
        .collect()
}

fn task_config() -> ViewConfig<Task> {
    ViewConfig::new()
        .search_field("title", |t: &Task| t.title.as_str())
        .search_field("owner", |t: &Task| t.owner.as_str())
        .discrete_filter(DiscreteFilter::text_equals("owner", "everyone", |t: &Task| {
            t.owner.as_str()
        }))
        .discrete_filter(DiscreteFilter::new("hide_done", |t: &Task, v| {
            !matches!(v, viewpipe::FilterValue::Flag(true)) || !t.done
        })
        .with_default(false))
        .sort_key(SortKey::by_text("title", |t: &Task| t.title.as_str()))
        .sort_key(SortKey::descending("priority", |t: &Task| t.priority))
        .initial_window_size(10)
        .debounce(Duration::from_millis(300))
}

#[test]
/// What: A debounced burst commits once, after the last keystroke's quiet period.
///
/// - Input: "f", "fi", "fix" typed 100 ms apart on a manual clock
/// - Output: Nothing matches until 300 ms after "fix"; then the 30 "Fix bug" tasks
fn debounced_burst_commits_last_value() {
    let clock = ManualClock::new();
    let mut view =
        View::with_clock(tasks(), task_config(), clock.clone()).expect("valid task config");
    assert_eq!(view.current().total_matched, 60);

    for term in ["f", "fi", "fix"] {
        view.set_search_term(term);
        clock.advance(Duration::from_millis(100));
    }
    assert_eq!(view.phase(), ViewPhase::Pending);
    assert_eq!(view.current().total_matched, 60);

    clock.advance(Duration::from_millis(199));
    assert_eq!(view.debounced_search_term(), "");
    clock.advance(Duration::from_millis(1));
    let snapshot = view.current();
    assert_eq!(snapshot.total_matched, 30);
    assert_eq!(snapshot.visible.len(), 10);
    assert_eq!(view.phase(), ViewPhase::Idle);
    assert_eq!(view.debounced_search_term(), "fix");
}

#[test]
/// What: Filters combine with the search term and reset the window.
///
/// - Input: Search "bug", grow window, then owner=ana and hide_done=true
/// - Output: Window back to 10; only ana's unfinished bug tasks remain
fn filters_combine_and_reset_window() {
    let mut view = View::new(tasks(), task_config()).expect("valid task config");
    view.commit_search_term("bug");
    assert!(view.load_more());
    assert_eq!(view.window_size(), 20);

    view.set_filter("owner", "ana").expect("owner filter exists");
    assert_eq!(view.window_size(), 10);
    view.set_filter("hide_done", true).expect("hide_done filter exists");

    let expected = tasks()
        .iter()
        .filter(|t| t.title.contains("bug") && t.owner == "ana" && !t.done)
        .count();
    let snapshot = view.current();
    assert_eq!(snapshot.total_matched, expected);
    assert!(snapshot.visible.iter().all(|t| t.owner == "ana" && !t.done));

    view.set_filter("owner", "everyone").expect("owner filter exists");
    view.set_filter("hide_done", false).expect("hide_done filter exists");
    assert_eq!(view.current().total_matched, 30);
}

#[test]
/// What: Sorting is stable and reorders without changing the match count.
///
/// - Input: Search "ana" (owner field), switch to descending priority
/// - Output: Priorities non-increasing; equal priorities keep collection order
fn priority_sort_is_stable() {
    let mut view = View::new(tasks(), task_config()).expect("valid task config");
    view.commit_search_term("ana");
    let before = view.current().total_matched;
    view.set_sort_key("priority").expect("priority key exists");
    let ordered = view.ordered_indices();
    assert_eq!(ordered.len(), before);
    let all = tasks();
    for pair in ordered.windows(2) {
        let (a, b) = (&all[pair[0]], &all[pair[1]]);
        assert!(a.priority >= b.priority);
        if a.priority == b.priority {
            assert!(pair[0] < pair[1]);
        }
    }
}

#[test]
/// What: Rejected names leave every parameter untouched.
fn unknown_names_are_rejected_without_side_effects() {
    let mut view = View::new(tasks(), task_config()).expect("valid task config");
    view.commit_search_term("docs");
    assert!(view.load_more());
    let stats = view.stats();

    assert_eq!(
        view.set_sort_key("deadline"),
        Err(ViewError::UnknownSortKey("deadline".into()))
    );
    assert_eq!(
        view.set_filter("team", "core"),
        Err(ViewError::UnknownFilterName("team".into()))
    );
    assert_eq!(view.sort_key(), "title");
    assert_eq!(view.window_size(), 20);
    view.current();
    assert_eq!(view.stats(), stats);
}

#[test]
/// What: Reusing an earlier term hits the filter history instead of re-filtering.
///
/// - Input: "bug" -> "docs" -> "bug"
/// - Output: Two filter runs, one history hit, and the first `Arc` comes back
fn returning_to_earlier_term_reuses_result() {
    let mut view = View::new(tasks(), task_config()).expect("valid task config");
    view.commit_search_term("bug");
    let first = view.filtered_indices();
    view.commit_search_term("docs");
    view.filtered_indices();
    let runs = view.stats().filter_runs;
    view.commit_search_term("bug");
    let again = view.filtered_indices();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(view.stats().filter_runs, runs);
    assert_eq!(view.stats().history_hits, 1);
}

#[test]
/// What: Show-none hides everything while the term is empty, filters included.
fn show_none_hides_until_searched() {
    let mut view = View::new(
        tasks(),
        task_config().empty_search_policy(EmptySearchPolicy::ShowNone),
    )
    .expect("valid task config");
    view.set_filter("owner", "ben").expect("owner filter exists");
    assert_eq!(view.current().total_matched, 0);
    view.commit_search_term("write");
    assert_eq!(view.current().total_matched, 10);
    view.reset();
    assert_eq!(view.current().total_matched, 0);
    assert_eq!(view.filter_value("owner"), Some(&"ben".into()));
}

#[test]
/// What: Owner selector options list "everyone" then owners in first-seen order.
fn distinct_owner_options() {
    let all = tasks();
    assert_eq!(
        distinct_values(&all, |t| t.owner.as_str(), "everyone"),
        vec!["everyone", "ana", "ben", "cy"]
    );
}

#[test]
/// What: Invalid configurations are rejected at construction.
fn invalid_configurations_fail_fast() {
    let no_keys: ViewConfig<Task> = ViewConfig::new().search_field("title", |t: &Task| t.title.as_str());
    assert!(matches!(
        View::new(tasks(), no_keys),
        Err(ViewError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        View::new(tasks(), task_config().initial_window_size(0)),
        Err(ViewError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        View::new(
            tasks(),
            task_config().sort_key(SortKey::by_text("title", |t: &Task| t.owner.as_str()))
        ),
        Err(ViewError::InvalidConfiguration { .. })
    ));
}
