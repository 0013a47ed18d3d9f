//! Plain-text rendering of search results and answers.

use std::fmt::Write;

use crate::api::SearchMatch;

/// Render results top-to-bottom in server order. Empty input renders nothing.
pub fn render_results(results: &[SearchMatch]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = String::from("Results\n");
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, result.header);
        if let Some(ref filename) = result.filename {
            let _ = writeln!(out, "   [{}]", filename);
        }
        for line in result.body.lines() {
            let _ = writeln!(out, "   {}", line);
        }

        let badges = badges(result);
        if !badges.is_empty() {
            let _ = writeln!(out, "   {}", badges);
        }
    }
    out
}

fn badges(result: &SearchMatch) -> String {
    let mut parts = Vec::new();
    if let Some(rank) = result.rank {
        parts.push(format!("rank {:.3}", rank));
    }
    if let Some(score) = result.score {
        parts.push(format!("score {:.3}", score));
    }
    parts.join("  ")
}

/// Render an answer with its citations, the chunks it used and any backend
/// error. Nothing to show renders nothing.
pub fn render_answer(
    answer: &str,
    citations: Option<&str>,
    used_chunks: &[String],
    error: Option<&str>,
) -> String {
    let mut out = String::new();
    if !answer.is_empty() {
        let _ = writeln!(out, "Answer: {}", answer);
        if let Some(c) = citations {
            let _ = writeln!(out, "Sources: {}", c);
        }
        if !used_chunks.is_empty() {
            let _ = writeln!(out, "Used chunks:");
            for (i, chunk) in used_chunks.iter().enumerate() {
                let mut lines = chunk.lines();
                let _ = writeln!(out, "  {}. {}", i + 1, lines.next().unwrap_or_default());
                for line in lines {
                    let _ = writeln!(out, "     {}", line);
                }
            }
        }
    }
    if let Some(err) = error {
        let _ = writeln!(out, "Error: {}", err);
    }
    out
}
