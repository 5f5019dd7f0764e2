//! Fit Preview - Fit the same paragraph into cards of different sizes
//!
//! Options come from JSON the way a host would pass them through config.
//! Each card prints as a plain preview; pass `--draw` to draw the styled
//! cards with crossterm instead.
//!
//! Run with: RUST_LOG=textfit=debug cargo run --example fit_preview

use std::io::{Write, stdout};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use textfit::{CellDocument, ElementStyle, FitOptions, Overflow, TextFitter, draw, preview_lines};

const PARAGRAPH: &str = "<b>Fitting</b> cuts markup at the longest prefix that keeps its \
     container inside the height it started with, and never in the middle of a \
     <i>tag</i>. Word mode backs up to the last whole word.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_target(false)
        .compact()
        .try_init();

    let styled = std::env::args().any(|arg| arg == "--draw");

    let presets: [(&str, &str); 3] = [
        ("characters", r#"{ "appendMarker": "..." }"#),
        ("words", r#"{ "word": true }"#),
        ("capped", r#"{ "maxlength": 40, "force": true, "append": " [more]" }"#),
    ];
    let sizes: [(u16, u16); 3] = [(24, 2), (32, 3), (48, 4)];

    let mut doc = CellDocument::new(80);
    let mut fitter = TextFitter::new();
    let mut cards = Vec::new();

    for (name, json) in presets {
        let options: FitOptions = serde_json::from_str(json)?;
        for (width, height) in sizes {
            let container = doc.create_element(
                ElementStyle::block()
                    .with_width(width)
                    .with_height(height)
                    .with_overflow(Overflow::Hidden),
            )?;
            let text = doc.create_text(ElementStyle::block(), PARAGRAPH)?;
            doc.append_child(container, text)?;

            let outcome = fitter.fit_into(&mut doc, container, text, &options)?;
            cards.push((format!("{name} {width}x{height} ({outcome:?})"), container));
        }
    }

    if !styled {
        for (title, container) in &cards {
            println!("{title}");
            for line in preview_lines(&mut doc, *container)? {
                println!("  |{line}");
            }
            println!();
        }
        return Ok(());
    }

    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    let mut y = 0u16;
    for (title, container) in &cards {
        queue!(out, MoveTo(0, y), Print(title))?;
        draw(&mut out, &mut doc, *container, (2, y + 1))?;
        y += doc.layout(*container)?.height + 2;
    }
    queue!(out, MoveTo(0, y))?;
    out.flush()?;
    Ok(())
}
