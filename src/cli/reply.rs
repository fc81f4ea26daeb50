// src/cli/reply.rs
// Reply generation, regeneration and history commands

use super::{AppContext, read_input};
use anyhow::{Result, anyhow, bail};
use nextmove::error::{countdown_secs, rate_limit_message};
use nextmove::reply::check_message;
use nextmove::{Outcome, ReplyRequest, ReplyResult, ReplySession, Style};
use tracing::info;

/// Pick the style for this request; an explicit one becomes the new preference
async fn resolve_style(ctx: &AppContext, label: Option<&str>) -> Result<Style> {
    match label {
        Some(label) => {
            let style = ctx.catalog.style(label).ok_or_else(|| {
                anyhow!("Unknown style '{}'. Options: {}", label.trim(), ctx.style_labels())
            })?;
            ctx.store.save_style(&style).await?;
            Ok(style)
        }
        None => Ok(ctx.store.load_style(&ctx.catalog).await),
    }
}

pub async fn run_reply(
    ctx: &AppContext,
    message: Option<String>,
    goal: Option<String>,
    style: Option<String>,
    json: bool,
) -> Result<()> {
    let raw = match message {
        Some(m) => m,
        None => read_input(None).await?,
    };
    let message = check_message(&raw).map_err(|issue| anyhow!("{}", issue))?;
    let style = resolve_style(ctx, style.as_deref()).await?;
    let request = ReplyRequest::new(message, goal.as_deref(), style)?;

    let session = ReplySession::new(ctx.client()?, ctx.store.clone(), ctx.catalog.clone());
    report(session.generate(request).await, json)
}

pub async fn run_regenerate(ctx: &AppContext, style: String, id: Option<String>, json: bool) -> Result<()> {
    let style = ctx
        .catalog
        .style(&style)
        .ok_or_else(|| anyhow!("Unknown style '{}'. Options: {}", style.trim(), ctx.style_labels()))?;

    let history = ctx.store.load_recent_replies().await;
    let entry = match id.as_deref() {
        Some(id) => history
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("No recent reply with id {}", id))?,
        None => history
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Henüz bir cevap yok. Önce `nextmove reply` çalıştır."))?,
    };

    info!(id = %entry.id, from = %entry.style, to = %style, "Regenerating");
    let session = ReplySession::new(ctx.client()?, ctx.store.clone(), ctx.catalog.clone());
    session.select(entry).await;
    report(session.regenerate(style).await?, json)
}

pub async fn run_history(ctx: &AppContext, clear: bool, json: bool) -> Result<()> {
    if clear {
        ctx.store.clear_recent_replies().await?;
        println!("Recent replies cleared.");
        return Ok(());
    }

    let history = ctx.store.load_recent_replies().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }
    if history.is_empty() {
        println!("Henüz bir cevap yok.");
        return Ok(());
    }

    for (i, entry) in history.iter().enumerate() {
        let when = entry.generated_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M");
        println!("{}. [{}] {} ({})", i + 1, entry.style, preview(&entry.message, 60), when);
        println!("   → {}", entry.result.best_reply);
        println!("   id: {}", entry.id);
    }
    Ok(())
}

fn report(outcome: Outcome, json: bool) -> Result<()> {
    match outcome {
        Outcome::Applied(entry) => print_entry(&entry, json),
        Outcome::Failed(err) => bail!("{}", err.message()),
        Outcome::Throttled(remaining) => bail!("{}", rate_limit_message(countdown_secs(remaining))),
        // a one-shot command never issues a second request
        Outcome::Superseded => Ok(()),
    }
}

fn print_entry(entry: &ReplyResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    let result = &entry.result;
    println!("En iyi cevap ({}):", entry.style);
    println!("  {}", result.best_reply);
    println!();
    println!("Alternatifler:");
    for (i, alt) in result.alternatives.iter().enumerate() {
        println!("  {}. {}", i + 1, alt);
    }
    if let Some(explanation) = &result.explanation {
        println!();
        println!("Neden: {}", explanation);
    }
    if let Some(follow_up) = &result.follow_up {
        println!("Sonra: {}", follow_up);
    }
    println!();
    println!("id: {}", entry.id);
    Ok(())
}

fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let cut: String = single_line.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_flattens_and_cuts() {
        assert_eq!(preview("Selam\nnaber", 60), "Selam naber");
        assert_eq!(preview("çok uzun bir mesaj", 8), "çok uzun…");
    }
}
