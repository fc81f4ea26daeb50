// src/cli/analyze.rs
// Conversation analysis and single-message suggestion

use super::{AppContext, read_input};
use anyhow::{Result, anyhow, bail};
use nextmove::analysis::{AnalysisResult, Tone};
use std::path::PathBuf;

async fn read_conversation(file: Option<&PathBuf>) -> Result<String> {
    let text = read_input(file).await?;
    let text = text.trim();
    if text.is_empty() {
        bail!("Konuşma boş olamaz.");
    }
    Ok(text.to_string())
}

pub async fn run_analyze(ctx: &AppContext, file: Option<PathBuf>, character: Option<String>) -> Result<()> {
    let character = ctx.resolve_character(character.as_deref()).await?;
    let conversation = read_conversation(file.as_ref()).await?;

    let analysis = ctx
        .client()?
        .analyze_conversation(&character, &conversation)
        .await?;

    print_analysis(&analysis);
    Ok(())
}

pub async fn run_suggest(
    ctx: &AppContext,
    file: Option<PathBuf>,
    character: Option<String>,
    tone: Option<String>,
) -> Result<()> {
    let tone = match tone.as_deref() {
        Some(label) => Tone::from_label(label).ok_or_else(|| {
            let options: Vec<&str> = Tone::ALL.iter().map(|t| t.label()).collect();
            anyhow!("Unknown tone '{}'. Options: {}", label.trim(), options.join(", "))
        })?,
        None => Tone::default(),
    };
    let character = ctx.resolve_character(character.as_deref()).await?;
    let conversation = read_conversation(file.as_ref()).await?;

    let suggestion = ctx
        .client()?
        .suggest_message(&character, tone, &conversation)
        .await?;

    println!("[{}] {}", suggestion.tone, suggestion.message);
    Ok(())
}

fn print_analysis(analysis: &AnalysisResult) {
    println!("İlgi: {:.0}/100 ({})", analysis.interest_score, analysis.trend);
    println!("{}", analysis.detection);

    if !analysis.reasons.is_empty() {
        println!();
        for reason in &analysis.reasons {
            println!("  - {}", reason);
        }
    }

    let rec = &analysis.recommendation;
    println!();
    println!("Zamanlama: {}", rec.timing);
    println!("Sonraki adım: {}", rec.next_step);
    for alt in &rec.alternatives {
        println!("  alternatif: {}", alt);
    }

    for green in &analysis.flags.green {
        println!("+ {}", green);
    }
    for red in &analysis.flags.red {
        println!("! {}", red);
    }
}
