use voxrag::application::services::{Sentence, SentenceSegmenter};

fn texts(sentences: &[Sentence]) -> Vec<String> {
    sentences.iter().map(|s| s.text().to_string()).collect()
}

#[test]
fn given_fragment_without_boundary_when_fed_then_nothing_is_emitted() {
    let mut segmenter = SentenceSegmenter::new();

    let emitted = segmenter.feed("Hello ");

    assert!(emitted.is_empty());
    assert_eq!(segmenter.pending(), "Hello ");
}

#[test]
fn given_punctuation_then_whitespace_when_fed_then_sentence_is_emitted_trimmed() {
    let mut segmenter = SentenceSegmenter::new();
    segmenter.feed("Hello ");

    let emitted = segmenter.feed("there. ");

    assert_eq!(texts(&emitted), vec!["Hello there."]);
    assert_eq!(segmenter.pending(), "");
}

#[test]
fn given_punctuation_without_whitespace_when_fed_then_boundary_waits_for_whitespace() {
    let mut segmenter = SentenceSegmenter::new();

    assert!(segmenter.feed("Is it done?").is_empty());
    let emitted = segmenter.feed(" Yes");

    assert_eq!(texts(&emitted), vec!["Is it done?"]);
    assert_eq!(segmenter.pending(), "Yes");
}

#[test]
fn given_several_boundaries_in_one_fragment_when_fed_then_all_emitted_in_order() {
    let mut segmenter = SentenceSegmenter::new();

    let emitted = segmenter.feed("One. Two! Three? Four");

    assert_eq!(texts(&emitted), vec!["One.", "Two!", "Three?"]);
    assert_eq!(segmenter.pending(), "Four");
}

#[test]
fn given_newline_after_punctuation_when_fed_then_treated_as_boundary() {
    let mut segmenter = SentenceSegmenter::new();

    let emitted = segmenter.feed("First line.\n\nSecond");

    assert_eq!(texts(&emitted), vec!["First line."]);
    assert_eq!(segmenter.pending(), "Second");
}

#[test]
fn given_empty_fragment_when_fed_then_state_is_unchanged() {
    let mut segmenter = SentenceSegmenter::new();
    segmenter.feed("Partial sentence.");

    let emitted = segmenter.feed("");

    assert!(emitted.is_empty());
    assert_eq!(segmenter.pending(), "Partial sentence.");
}

#[test]
fn given_abbreviation_when_fed_then_naively_splits_after_it() {
    let mut segmenter = SentenceSegmenter::new();

    let emitted = segmenter.feed("Dr. Smith won.");
    let rest = segmenter.flush();

    assert_eq!(texts(&emitted), vec!["Dr."]);
    assert_eq!(rest.map(|s| s.text().to_string()), Some("Smith won.".to_string()));
}

#[test]
fn given_decimal_number_when_fed_then_not_split_without_whitespace() {
    let mut segmenter = SentenceSegmenter::new();

    let emitted = segmenter.feed("Pi is 3.14 roughly. ");

    assert_eq!(texts(&emitted), vec!["Pi is 3.14 roughly."]);
}

#[test]
fn given_blank_residual_when_flushed_then_returns_none() {
    let mut segmenter = SentenceSegmenter::new();
    segmenter.feed("Done. ");
    segmenter.feed("   ");

    assert!(segmenter.flush().is_none());
}

#[test]
fn given_any_fragmentation_when_fed_then_emitted_plus_pending_reconstructs_input() {
    let text = "Hello there. How are you?  I am fine!\nThanks... see you. bye";

    for chunk_size in 1..=text.len() {
        let mut segmenter = SentenceSegmenter::new();
        let mut reconstructed = String::new();

        let chars: Vec<char> = text.chars().collect();
        for piece in chars.chunks(chunk_size) {
            let fragment: String = piece.iter().collect();
            for sentence in segmenter.feed(&fragment) {
                reconstructed.push_str(sentence.raw());
            }
        }
        reconstructed.push_str(segmenter.pending());

        assert_eq!(reconstructed, text, "chunk size {chunk_size}");
    }
}

#[test]
fn given_any_fragmentation_when_fed_then_same_sentences_are_emitted() {
    let text = "Hello there. How are you?  I am fine!\nThanks... see you. bye";
    let mut whole = SentenceSegmenter::new();
    let mut expected = texts(&whole.feed(text));
    expected.extend(whole.flush().map(|s| s.text().to_string()));

    for chunk_size in 1..=8 {
        let mut segmenter = SentenceSegmenter::new();
        let mut emitted = Vec::new();
        let chars: Vec<char> = text.chars().collect();
        for piece in chars.chunks(chunk_size) {
            let fragment: String = piece.iter().collect();
            emitted.extend(texts(&segmenter.feed(&fragment)));
        }
        emitted.extend(segmenter.flush().map(|s| s.text().to_string()));

        assert_eq!(emitted, expected, "chunk size {chunk_size}");
    }
}
