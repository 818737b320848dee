use async_trait::async_trait;
use locsearch_core::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

type Reply = std::result::Result<Vec<Suggestion>, LookupError>;

/// Answers each query after a fixed delay and records every call.
#[derive(Clone, Default)]
struct ScriptedLookup {
    script: HashMap<String, (Duration, Reply)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLookup {
    fn respond(mut self, q: &str, delay_ms: u64, reply: Reply) -> Self {
        self.script
            .insert(q.to_string(), (Duration::from_millis(delay_ms), reply));
        self
    }

    fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Lookup for ScriptedLookup {
    async fn lookup(&self, q: &str, limit: usize) -> Reply {
        self.calls.lock().unwrap().push(q.to_string());
        let (delay, reply) = self
            .script
            .get(q)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        sleep(delay).await;
        reply.map(|mut items| {
            items.truncate(limit);
            items
        })
    }
}

fn sacramento() -> Suggestion {
    Suggestion::new("Sacramento", "CA")
        .with_region_name("California")
        .with_population(528_000)
}

fn portland() -> Suggestion {
    Suggestion::new("Portland", "OR").with_region_name("Oregon")
}

fn recorded(calls: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    calls.lock().unwrap().clone()
}

async fn wait_for(
    rx: &mut watch::Receiver<SessionSnapshot>,
    ready: impl FnMut(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    tokio::time::timeout(Duration::from_secs(30), rx.wait_for(ready))
        .await
        .expect("timed out waiting for session state")
        .expect("session closed")
        .clone()
}

#[tokio::test(start_paused = true)]
async fn sacramento_highlight_then_commit() {
    let lookup = ScriptedLookup::default().respond("Sacr", 20, Ok(vec![sacramento()]));
    let (handle, mut changes) =
        SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();
    let mut rx = handle.subscribe();

    handle.input("Sacr").unwrap();
    let snap = wait_for(&mut rx, |s| s.is_open).await;
    assert_eq!(snap.suggestions.len(), 1);
    assert_eq!(snap.highlighted, None);
    assert!(!snap.is_loading);

    // No highlight yet: Enter does nothing.
    handle.key(Key::Enter).unwrap();
    handle.key(Key::ArrowDown).unwrap();
    let snap = wait_for(&mut rx, |s| s.highlighted == Some(0)).await;
    assert!(snap.selected.is_none());
    assert!(snap.is_open);

    handle.key(Key::Enter).unwrap();
    let selected = changes.recv().await.unwrap().unwrap();
    assert_eq!(selected.display_label, "Sacramento, CA");
    assert_eq!(selected.region_name, "California");

    let snap = wait_for(&mut rx, |s| !s.is_open).await;
    assert_eq!(snap.text, "Sacramento, CA");
    assert_eq!(snap.selected, Some(selected));
}

#[tokio::test(start_paused = true)]
async fn keystrokes_inside_debounce_window_issue_one_lookup() {
    let lookup = ScriptedLookup::default();
    let calls = lookup.calls();
    let (handle, _changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();

    handle.input("Sa").unwrap();
    sleep(Duration::from_millis(50)).await;
    assert!(handle.snapshot().is_loading);
    handle.input("Sac").unwrap();
    sleep(Duration::from_millis(400)).await;

    assert_eq!(recorded(&calls), ["Sac"]);
}

#[tokio::test(start_paused = true)]
async fn slow_older_response_never_overwrites_newer_one() {
    // Both with and without transport cancellation.
    for abort in [false, true] {
        let lookup = ScriptedLookup::default()
            .respond("Port", 1_000, Ok(vec![Suggestion::new("Port Angeles", "WA")]))
            .respond("Portland", 10, Ok(vec![portland()]));
        let calls = lookup.calls();
        let config = SearchConfig::default().with_abort_superseded(abort);
        let (handle, _changes) = SessionDriver::spawn(lookup, config, None).unwrap();
        let mut rx = handle.subscribe();

        handle.input("Port").unwrap();
        sleep(Duration::from_millis(200)).await;
        assert_eq!(recorded(&calls), ["Port"]);

        handle.input("Portland").unwrap();
        let snap = wait_for(&mut rx, |s| s.is_open).await;
        assert_eq!(snap.suggestions.items(), [portland()]);

        // Well past the slow "Port" answer.
        sleep(Duration::from_millis(2_000)).await;
        let snap = handle.snapshot();
        assert_eq!(snap.suggestions.items(), [portland()], "abort={abort}");
        assert!(snap.is_open);
        assert_eq!(recorded(&calls), ["Port", "Portland"]);
    }
}

#[tokio::test(start_paused = true)]
async fn stale_answer_during_debounce_window_keeps_loading() {
    let lookup = ScriptedLookup::default()
        .respond("Port", 100, Ok(vec![Suggestion::new("Port Angeles", "WA")]))
        .respond("Portland", 10, Ok(vec![portland()]));
    let config = SearchConfig::default().with_abort_superseded(false);
    let (handle, _changes) = SessionDriver::spawn(lookup, config, None).unwrap();

    handle.input("Port").unwrap();
    // "Port" is issued at 150 ms and answers at 250 ms.
    sleep(Duration::from_millis(200)).await;
    handle.input("Portland").unwrap();
    sleep(Duration::from_millis(80)).await;

    let snap = handle.snapshot();
    assert!(snap.suggestions.is_empty());
    assert!(snap.is_loading);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.snapshot().suggestions.items(), [portland()]);
}

#[tokio::test(start_paused = true)]
async fn escape_while_typing_does_not_hide_later_results() {
    let lookup = ScriptedLookup::default().respond("Sacr", 20, Ok(vec![sacramento()]));
    let (handle, _changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();
    let mut rx = handle.subscribe();

    handle.input("Sacr").unwrap();
    sleep(Duration::from_millis(50)).await;
    handle.key(Key::Escape).unwrap();
    let snap = wait_for(&mut rx, |s| s.list == ListState::Closed).await;
    assert!(snap.is_loading);

    let snap = wait_for(&mut rx, |s| s.is_open).await;
    assert_eq!(snap.suggestions.items(), [sacramento()]);
    assert_eq!(snap.list, ListState::OpenWithResults { highlighted: None });
}

#[tokio::test(start_paused = true)]
async fn single_character_closes_without_lookup() {
    let lookup = ScriptedLookup::default().respond("Sa", 0, Ok(vec![sacramento()]));
    let calls = lookup.calls();
    let (handle, _changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();
    let mut rx = handle.subscribe();

    handle.input("Sa").unwrap();
    wait_for(&mut rx, |s| s.is_open).await;

    handle.input("S").unwrap();
    let snap = wait_for(&mut rx, |s| !s.is_open).await;
    assert!(!snap.is_loading);
    sleep(Duration::from_millis(500)).await;
    assert_eq!(recorded(&calls), ["Sa"]);
}

#[tokio::test(start_paused = true)]
async fn failures_and_empty_results_look_the_same() {
    let lookup = ScriptedLookup::default()
        .respond("Fres", 5, Err(LookupError::Status(503)))
        .respond("Fresn", 5, Ok(Vec::new()));
    let (handle, _changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();
    let mut rx = handle.subscribe();

    for text in ["Fres", "Fresn"] {
        handle.input(text).unwrap();
        wait_for(&mut rx, |s| s.is_loading).await;
        let snap = wait_for(&mut rx, |s| !s.is_loading).await;
        assert!(!snap.is_open);
        assert!(snap.suggestions.is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn editing_committed_label_clears_selection_first() {
    let lookup = ScriptedLookup::default()
        .respond("Sacr", 5, Ok(vec![sacramento()]))
        .respond("Sacramento, C", 5, Ok(vec![sacramento()]));
    let (handle, mut changes) =
        SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();
    let mut rx = handle.subscribe();

    handle.input("Sacr").unwrap();
    wait_for(&mut rx, |s| s.is_open).await;
    handle.pointer(Pointer::Select(0)).unwrap();
    assert!(changes.recv().await.unwrap().is_some());

    handle.input("Sacramento, C").unwrap();
    assert_eq!(changes.recv().await.unwrap(), None);
    let snap = wait_for(&mut rx, |s| s.text == "Sacramento, C").await;
    assert!(snap.selected.is_none());
    assert!(snap.suggestions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn host_reset_clears_text() {
    let initial = SelectedLocation::from(&portland());
    let (handle, mut changes) =
        SessionDriver::spawn(ScriptedLookup::default(), SearchConfig::default(), Some(initial))
            .unwrap();
    let mut rx = handle.subscribe();
    assert_eq!(handle.snapshot().text, "Portland, OR");

    handle.set_value(None).unwrap();
    let snap = wait_for(&mut rx, |s| s.text.is_empty()).await;
    assert!(snap.selected.is_none());
    assert!(!snap.is_open);
    // The host made this change; nothing is echoed back.
    sleep(Duration::from_millis(10)).await;
    assert!(changes.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn shutdown_discards_pending_and_in_flight_work() {
    let lookup = ScriptedLookup::default().respond("Sacr", 1_000, Ok(vec![sacramento()]));
    let calls = lookup.calls();
    let (handle, _changes) = SessionDriver::spawn(lookup, SearchConfig::default(), None).unwrap();

    handle.input("Sacr").unwrap();
    sleep(Duration::from_millis(200)).await;
    assert_eq!(recorded(&calls), ["Sacr"]);

    handle.input("Sacra").unwrap();
    handle.shutdown().unwrap();
    sleep(Duration::from_millis(2_000)).await;

    // The pending "Sacra" timer never fired and nothing was applied late.
    assert_eq!(recorded(&calls), ["Sacr"]);
    let snap = handle.snapshot();
    assert!(!snap.is_open);
    assert!(!snap.is_loading);
    assert!(handle.is_closed());
    assert!(matches!(handle.input("Sacram"), Err(Error::SessionClosed)));
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let result = SessionDriver::spawn(
        ScriptedLookup::default(),
        SearchConfig::default().with_limit(0),
        None,
    );
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
