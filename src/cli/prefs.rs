// src/cli/prefs.rs
// Style and character preference commands

use super::{AppContext, CharacterAction, StyleAction};
use anyhow::{Result, anyhow};

pub async fn run_style(ctx: &AppContext, action: StyleAction) -> Result<()> {
    match action {
        StyleAction::Get => {
            println!("{}", ctx.store.load_style(&ctx.catalog).await);
        }
        StyleAction::Set { label } => {
            let style = ctx.catalog.style(&label).ok_or_else(|| {
                anyhow!("Unknown style '{}'. Options: {}", label.trim(), ctx.style_labels())
            })?;
            ctx.store.save_style(&style).await?;
            println!("Style set to {}", style);
        }
        StyleAction::List => {
            let current = ctx.store.load_style(&ctx.catalog).await;
            for style in ctx.catalog.styles() {
                let marker = if *style == current { "*" } else { " " };
                println!("{} {}", marker, style);
            }
        }
    }
    Ok(())
}

pub async fn run_character(ctx: &AppContext, action: CharacterAction) -> Result<()> {
    match action {
        CharacterAction::Get => match ctx.store.load_character(&ctx.catalog).await {
            Some(profile) => {
                println!("{}", profile.name);
                println!("  {}", profile.description);
            }
            None => println!("Karakter seçilmedi."),
        },
        CharacterAction::Set { name } => {
            let profile = ctx
                .catalog
                .character(&name)
                .ok_or_else(|| anyhow!("Unknown character '{}'. See `nextmove character list`.", name.trim()))?;
            ctx.store.save_character(&profile.name).await?;
            println!("Character set to {}", profile.name);
        }
        CharacterAction::List => {
            let current = ctx.store.load_character(&ctx.catalog).await;
            for profile in ctx.catalog.characters() {
                let selected = current.as_ref().is_some_and(|c| c.name == profile.name);
                println!("{} {}", if selected { "*" } else { " " }, profile.name);
                println!("    {}", profile.description);
                if !profile.example.is_empty() {
                    println!("    \"{}\"", profile.example);
                }
            }
        }
        CharacterAction::Clear => {
            ctx.store.clear_character().await?;
            println!("Character cleared.");
        }
    }
    Ok(())
}
