//! Property tests for segmentation, pagination and reader navigation.

use lingo_core::text::{
    FitMeasurement, MAX_AUTO_FIT_SENTENCES, PageSize, Reader, ViewMode, build_pages, paginate,
    split_into_sentences, suggest_page_size, toggle_highlight,
};
use proptest::prelude::*;

// ===== Strategies =====

/// Text made of words, terminators and assorted whitespace.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Zа-я]{1,8}",
            Just(".".to_owned()),
            Just("!".to_owned()),
            Just("?".to_owned()),
            Just(" ".to_owned()),
            Just("\n".to_owned()),
            Just("\t ".to_owned()),
        ],
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_page_size() -> impl Strategy<Value = PageSize> {
    (1usize..=25).prop_map(|n| PageSize::new(n).unwrap())
}

// ===== Segmentation =====

proptest! {
    #[test]
    fn sentences_are_never_blank(text in arb_text()) {
        for sentence in split_into_sentences(&text) {
            prop_assert!(!sentence.trim().is_empty(), "blank sentence in {:?}", text);
        }
    }

    #[test]
    fn sentences_preserve_all_non_whitespace(text in arb_text()) {
        let joined: String = split_into_sentences(&text).concat();
        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(strip(&joined), strip(&text));
    }
}

// ===== Pagination =====

proptest! {
    #[test]
    fn pages_flatten_to_sentences(text in arb_text(), size in arb_page_size()) {
        let sentences = split_into_sentences(&text);
        let pages = build_pages(sentences.clone(), size);
        let flattened: Vec<String> = pages.sentences().map(str::to_owned).collect();
        prop_assert_eq!(flattened, sentences);
    }

    #[test]
    fn only_last_page_may_be_short(text in arb_text(), size in arb_page_size()) {
        let pages = paginate(&text, size);
        let count = pages.len();
        for (i, page) in pages.pages().iter().enumerate() {
            prop_assert!(page.len() <= size.get());
            prop_assert!(!page.is_empty());
            if i + 1 < count {
                prop_assert_eq!(page.len(), size.get());
            }
        }
    }

    #[test]
    fn no_sentences_no_pages(size in arb_page_size()) {
        prop_assert!(build_pages(Vec::<String>::new(), size).is_empty());
    }
}

// ===== Reader =====

proptest! {
    #[test]
    fn navigation_stays_in_bounds(
        text in arb_text(),
        size in arb_page_size(),
        start in 0usize..40,
        moves in prop::collection::vec(any::<bool>(), 0..30),
    ) {
        let mut reader = Reader::restore(text, size, start, ViewMode::Read);
        for forward in moves {
            if forward {
                reader.go_to_next_page();
            } else {
                reader.go_to_previous_page();
            }
            prop_assert!(reader.current_page_index() <= reader.pages().len().saturating_sub(1));
        }
    }

    #[test]
    fn edge_navigation_is_a_noop(text in arb_text(), size in arb_page_size()) {
        let mut reader = Reader::restore(text, size, usize::MAX, ViewMode::Read);
        let last = reader.current_page_index();
        prop_assert!(reader.go_to_next_page().is_empty());
        prop_assert_eq!(reader.current_page_index(), last);

        let mut reader = Reader::restore(reader.raw_text().to_owned(), size, 0, ViewMode::Read);
        prop_assert!(reader.go_to_previous_page().is_empty());
        prop_assert_eq!(reader.current_page_index(), 0);
    }

    #[test]
    fn index_is_clamped_after_text_change(
        before in arb_text(),
        after in arb_text(),
        size in arb_page_size(),
        start in 0usize..40,
    ) {
        let mut reader = Reader::restore(before, size, start, ViewMode::Read);
        reader.set_text(after);
        let max = reader.pages().len().saturating_sub(1);
        prop_assert!(reader.current_page_index() <= max);
        prop_assert_eq!(reader.current_page().is_some(), !reader.pages().is_empty());
    }
}

// ===== Auto-fit and markup =====

proptest! {
    #[test]
    fn suggested_size_is_bounded(container in -500.0f64..5000.0, sentence in prop::option::of(0.0f64..200.0)) {
        let size = suggest_page_size(FitMeasurement {
            container_height: container,
            sentence_height: sentence,
        });
        prop_assert!((1..=MAX_AUTO_FIT_SENTENCES).contains(&size.get()));
    }

    #[test]
    fn highlight_toggle_round_trips(word in "[a-z]{1,10}", prefix in "[a-z ]{0,10}", suffix in "[a-z ]{0,10}") {
        let value = format!("{prefix}{word}{suffix}");
        let start = prefix.chars().count();
        let end = start + word.chars().count();

        let on = toggle_highlight(&value, start, end);
        let off = toggle_highlight(&on.value, on.selection.start, on.selection.end);
        prop_assert_eq!(off.value, value);
        prop_assert_eq!(off.selection, start..end);
    }
}
