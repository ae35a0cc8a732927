use lingo_core::text::{Segment, highlight_segments};
use services::ContextSentence;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupSpan {
    pub text: String,
    pub highlighted: bool,
}

/// Split `==word==` markup into spans the view can style.
#[must_use]
pub fn map_markup(text: &str) -> Vec<MarkupSpan> {
    highlight_segments(text)
        .into_iter()
        .map(|segment| MarkupSpan {
            highlighted: matches!(segment, Segment::Highlight(_)),
            text: segment.text().to_owned(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextLineVm {
    pub original: Vec<MarkupSpan>,
    pub translation: Vec<MarkupSpan>,
}

#[must_use]
pub fn map_context_lines(sentences: &[ContextSentence]) -> Vec<ContextLineVm> {
    sentences
        .iter()
        .map(|sentence| ContextLineVm {
            original: map_markup(&sentence.text),
            translation: map_markup(&sentence.text_translate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_the_target_word() {
        let spans = map_markup("I ==run== daily");
        assert_eq!(
            spans,
            vec![
                MarkupSpan {
                    text: "I ".into(),
                    highlighted: false
                },
                MarkupSpan {
                    text: "run".into(),
                    highlighted: true
                },
                MarkupSpan {
                    text: " daily".into(),
                    highlighted: false
                },
            ]
        );
    }

    #[test]
    fn context_lines_keep_both_sides() {
        let lines = map_context_lines(&[ContextSentence {
            text: "==Hola== amigo".into(),
            text_translate: "==Hello== friend".into(),
        }]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].original[0].highlighted);
        assert_eq!(lines[0].translation[0].text, "Hello");
    }
}
