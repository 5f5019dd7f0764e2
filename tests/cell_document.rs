//! End-to-end fitting on a `CellDocument`.

use textfit::{
    CellDocument, Dimension, ElementId, ElementStyle, FitOptions, FitOutcome, LayoutMeasurer,
    Overflow, StyleProperty, StyleValue, TextFitter, preview_lines,
};

/// A hidden-overflow card of fixed size holding one text block.
fn card(doc: &mut CellDocument, width: u16, height: u16, markup: &str) -> (ElementId, ElementId) {
    let container = doc
        .create_element(
            ElementStyle::block()
                .with_width(width)
                .with_height(height)
                .with_overflow(Overflow::Hidden),
        )
        .unwrap();
    let text = doc.create_text(ElementStyle::block(), markup).unwrap();
    doc.append_child(container, text).unwrap();
    (container, text)
}

fn dots() -> FitOptions {
    FitOptions::default().with_marker("...")
}

/// Whether `markup`, minus a trailing marker, ends in an unterminated tag.
fn ends_inside_tag(markup: &str, marker: &str) -> bool {
    let body = markup.strip_suffix(marker).unwrap_or(markup);
    body.rfind('<').is_some_and(|open| !body[open..].contains('>'))
}

#[test]
fn fits_child_text_into_card() {
    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 15, 1, "The quick brown fox jumps");

    let mut fitter = TextFitter::new();
    let outcome = fitter.fit_into(&mut doc, container, text, &dots()).unwrap();
    assert_eq!(outcome, FitOutcome::Fitted);
    assert_eq!(doc.inner_markup(text).unwrap(), "The quick br...");
    assert_eq!(preview_lines(&mut doc, container).unwrap(), vec!["The quick br..."]);
}

#[test]
fn word_mode_on_card() {
    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 15, 1, "The quick brown fox jumps");

    TextFitter::new()
        .fit_into(&mut doc, container, text, &dots().with_break_on_word(true))
        .unwrap();
    assert_eq!(doc.inner_markup(text).unwrap(), "The quick...");
}

#[test]
fn multi_row_card() {
    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 10, 2, "aaaa bbbb cccc dddd eeee ffff");

    TextFitter::new()
        .fit_into(&mut doc, container, text, &dots())
        .unwrap();
    assert_eq!(doc.inner_markup(text).unwrap(), "aaaa bbbb cccc dd...");
    assert_eq!(
        preview_lines(&mut doc, container).unwrap(),
        vec!["aaaa bbbb ", "cccc dd..."]
    );
}

#[test]
fn tags_are_measured_by_visible_text() {
    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 8, 1, "<b>Hello</b> World");

    TextFitter::new()
        .fit_into(&mut doc, container, text, &dots())
        .unwrap();
    assert_eq!(doc.inner_markup(text).unwrap(), "<b>Hello</b>...");
}

#[test]
fn cut_stays_out_of_opening_tag() {
    let markup = "<i>Tagged</i> text with <b>several</b> runs, and punctuation.";

    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 6, 3, markup);
    TextFitter::new()
        .fit_into(&mut doc, container, text, &dots())
        .unwrap();
    assert_eq!(doc.inner_markup(text).unwrap(), "<i>Tagged</i> text wit...");
    assert_eq!(doc.rendered_height(text).unwrap(), 3.0);

    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 6, 3, markup);
    TextFitter::new()
        .fit_into(&mut doc, container, text, &dots().with_break_on_word(true))
        .unwrap();
    assert_eq!(doc.inner_markup(text).unwrap(), "<i>Tagged</i> text...");
    assert!(doc.rendered_height(text).unwrap() <= 3.0);
}

#[test]
fn container_styles_survive_the_fit() {
    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 15, 1, "The quick brown fox jumps");

    TextFitter::new()
        .fit_into(&mut doc, container, text, &dots())
        .unwrap();

    assert_eq!(
        doc.computed(container, StyleProperty::Overflow).unwrap(),
        StyleValue::Overflow(Overflow::Hidden)
    );
    assert_eq!(
        doc.computed(container, StyleProperty::Height).unwrap(),
        StyleValue::Length(Dimension::Cells(1))
    );
    assert_eq!(
        doc.computed(container, StyleProperty::MaxHeight).unwrap(),
        StyleValue::Length(Dimension::None)
    );
    assert_eq!(doc.layout(container).unwrap().height, 1);
}

#[test]
fn visible_card_is_left_alone() {
    let mut doc = CellDocument::new(80);
    let container = doc
        .create_element(ElementStyle::block().with_width(15).with_height(1))
        .unwrap();
    let text = doc
        .create_text(ElementStyle::block(), "The quick brown fox jumps")
        .unwrap();
    doc.append_child(container, text).unwrap();

    let outcome = TextFitter::new()
        .fit_into(&mut doc, container, text, &dots())
        .unwrap();
    assert_eq!(outcome, FitOutcome::PreconditionFailed);
    assert_eq!(doc.inner_markup(text).unwrap(), "The quick brown fox jumps");
}

#[test]
fn resized_card_refits_from_original() {
    let mut doc = CellDocument::new(80);
    let (container, text) = card(&mut doc, 15, 1, "The quick brown fox jumps");
    let mut fitter = TextFitter::new();

    fitter.fit_into(&mut doc, container, text, &dots()).unwrap();
    assert_eq!(doc.inner_markup(text).unwrap(), "The quick br...");

    let wider = doc.declared_style(container).unwrap().with_width(30);
    doc.set_declared_style(container, wider).unwrap();
    let outcome = fitter.fit_into(&mut doc, container, text, &dots()).unwrap();
    assert_eq!(outcome, FitOutcome::NotNeeded);
    assert_eq!(doc.inner_markup(text).unwrap(), "The quick brown fox jumps");
}

#[test]
fn element_holding_its_own_text() {
    let mut doc = CellDocument::new(80);
    let label = doc
        .create_text(
            ElementStyle::block()
                .with_width(10)
                .with_height(1)
                .with_overflow(Overflow::Hidden),
            "Status: all systems nominal",
        )
        .unwrap();

    TextFitter::new()
        .fit(&mut doc, label, &FitOptions::default())
        .unwrap();
    assert_eq!(doc.inner_markup(label).unwrap(), "Status: a…");
}

#[test]
fn unknown_element_is_an_error() {
    let mut doc = CellDocument::new(80);
    let mut other = CellDocument::new(80);
    other.create_element(ElementStyle::block()).unwrap();
    let foreign = other
        .create_text(
            ElementStyle::block().with_height(1).with_overflow(Overflow::Hidden),
            "x",
        )
        .unwrap();

    let result = TextFitter::new().fit(&mut doc, foreign, &dots());
    assert!(matches!(result, Err(textfit::Error::UnknownElement(_))));
}

#[test]
fn fitted_text_stays_within_card() {
    let texts = [
        "The quick brown fox jumps over the lazy dog",
        "<i>Tagged</i> text with <b>several</b> runs, and punctuation.",
        "你好世界，这是一个测试",
    ];

    for markup in texts {
        for width in 3..24u16 {
            for height in 1..4u16 {
                for break_on_word in [false, true] {
                    let mut doc = CellDocument::new(80);
                    let (container, text) = card(&mut doc, width, height, markup);
                    let options = dots().with_break_on_word(break_on_word);
                    TextFitter::new()
                        .fit_into(&mut doc, container, text, &options)
                        .unwrap();

                    let fitted = doc.inner_markup(text).unwrap().to_string();
                    let rows = doc.rendered_height(text).unwrap();
                    assert!(
                        rows <= height as f32,
                        "{markup:?} in {width}x{height} word={break_on_word}: {fitted:?} takes {rows} rows"
                    );
                    assert!(
                        !ends_inside_tag(&fitted, "..."),
                        "{markup:?} in {width}x{height} word={break_on_word}: {fitted:?} ends in a tag"
                    );
                }
            }
        }
    }
}
