//! Ask a Llama vision model about one quarter of a game.
//!
//! ```bash
//! export LLAMA_API_KEY=...
//! cargo run --example quarter_insight -- game1_playbyplay.txt court_diagram.png Q4
//! ```

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use courtside::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let transcript_path = args.next().unwrap_or_else(|| "game1_playbyplay.txt".to_owned());
    let image_path = args.next().unwrap_or_else(|| "court_diagram.png".to_owned());
    let selector: Selector = args.next().as_deref().unwrap_or("Q4").parse()?;

    let transcript = load_transcript(&transcript_path).await?;
    let filtered = filter_by_period(&transcript, selector);
    println!("{} lines in {selector}", filtered.lines().count());

    let image = encode_image_file(&image_path).await?;
    let analyst = Analyst::new(Arc::new(OpenAI::from_env()?), AnalysisOptions::default());

    let answer = analyst.analyze_quarter(selector, &image, &filtered).await?;
    println!("{answer}");

    Ok(())
}
