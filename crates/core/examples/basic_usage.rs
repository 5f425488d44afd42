//! Basic usage example of the transback_core library

use transback_core::stream::EventStreamParser;
use transback_core::{
    highlight_differences, HighlightConfig, HighlightEngine, PresentationController, StreamEvent,
};

const LINE: &str = "----------------------------------------";

fn main() {
    println!("=== TransBack Highlight Examples ===\n");

    // Example 1: Simple highlight with default configuration
    example_simple_highlight();

    // Example 2: Custom marker classes
    example_custom_config();

    // Example 3: Driving a view from a chunked event stream
    example_event_stream();
}

fn example_simple_highlight() {
    println!("Example 1: Simple Highlight");
    println!("{}", LINE);

    let original = "The quick brown fox jumps over the lazy dog.";
    let back_translated = "The fast brown fox jumped over the lazy dog.";

    let pair = highlight_differences(original, back_translated);

    println!("Original:        {}", original);
    println!("Back-translated: {}", back_translated);
    println!("\n{}", pair.summary());
    println!("\nOriginal markup:\n  {}", pair.original.markup);
    println!("Back-translated markup:\n  {}", pair.back_translated.markup);
    println!("\n");
}

fn example_custom_config() {
    println!("Example 2: Custom Configuration");
    println!("{}", LINE);

    let engine = HighlightEngine::new(
        HighlightConfig::new()
            .with_word_class("mismatch")
            .with_char_class("typo"),
    );

    for (word, reference) in [("colour", "color"), ("cat", "dog"), ("cats", "cat ")] {
        println!(
            "  {:>8} vs {:<8} => {}",
            word,
            reference,
            engine.highlight_characters(word, reference)
        );
    }
    println!("\n");
}

fn example_event_stream() {
    println!("Example 3: Event Stream");
    println!("{}", LINE);

    let original = "A macska az asztalon alszik.";
    let stream: String = [
        StreamEvent::Translated("The cat is sleeping on the table.".to_string()),
        StreamEvent::BackTranslated("A macska az asztalon alszik.".to_string()),
        StreamEvent::Review("The meaning is fully preserved.".to_string()),
        StreamEvent::Complete,
    ]
    .iter()
    .map(StreamEvent::to_frame)
    .collect();

    let mut parser = EventStreamParser::new();
    let mut controller = PresentationController::new(original, HighlightEngine::default());

    for chunk in stream.as_bytes().chunks(7) {
        for event in parser.feed(chunk) {
            println!("  event: {}", event.name());
            controller.apply(event);
        }
    }

    let view = controller.into_view();
    println!(
        "\n  translate: {}, back-translate: {}, review: {}",
        view.translate, view.back_translate, view.review
    );
    if let Some(highlight) = &view.highlight {
        println!("  clean round trip: {}", highlight.is_clean());
    }
    println!("\n");
}
