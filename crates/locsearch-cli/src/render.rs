use locsearch_core::driver::SessionSnapshot;
use locsearch_core::selection::ListState;
use locsearch_core::Suggestion;
use std::fmt::Write;

/// One suggestion as a list row: `Sacramento, CA — California (0.5M)`.
pub fn row(s: &Suggestion) -> String {
    let mut out = s.label();
    if !s.region_name.is_empty() {
        let _ = write!(out, " — {}", s.region_name);
    }
    if let Some(badge) = s.population_badge() {
        let _ = write!(out, " ({badge})");
    }
    out
}

/// Text field plus dropdown, the way a terminal can show it.
pub fn render(snap: &SessionSnapshot) -> String {
    let mut out = format!("> {}", snap.text);
    match snap.list {
        ListState::Closed => {}
        ListState::OpenEmpty => out.push_str("  …"),
        ListState::OpenWithResults { highlighted } => {
            for (i, s) in snap.suggestions.items().iter().enumerate() {
                let marker = if highlighted == Some(i) { '▸' } else { ' ' };
                let _ = write!(out, "\n  {marker} [{i}] {}", row(s));
            }
        }
    }
    if snap.is_loading && snap.list != ListState::OpenEmpty {
        out.push_str("\n  (searching)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use locsearch_core::{Generation, SuggestionList};

    fn snapshot(list: ListState, items: Vec<Suggestion>) -> SessionSnapshot {
        SessionSnapshot {
            text: "Port".into(),
            suggestions: SuggestionList::new(Generation::ZERO, items),
            is_open: matches!(list, ListState::OpenWithResults { .. }),
            highlighted: None,
            is_loading: false,
            selected: None,
            list,
        }
    }

    #[test]
    fn row_includes_region_and_badge() {
        let s = Suggestion::new("Portland", "OR")
            .with_region_name("Oregon")
            .with_population(652_503);
        assert_eq!(row(&s), "Portland, OR — Oregon (0.7M)");
        assert_eq!(row(&Suggestion::new("Bend", "OR")), "Bend, OR");
    }

    #[test]
    fn highlighted_row_is_marked() {
        let items = vec![Suggestion::new("Portland", "OR"), Suggestion::new("Portland", "ME")];
        let rendered = render(&snapshot(ListState::OpenWithResults { highlighted: Some(1) }, items));
        assert_eq!(rendered, "> Port\n    [0] Portland, OR\n  ▸ [1] Portland, ME");
    }

    #[test]
    fn closed_list_shows_only_text() {
        assert_eq!(render(&snapshot(ListState::Closed, Vec::new())), "> Port");
    }
}
