use crate::cli::{truncate, CatalogArgs, MetaArgs};
use crate::config::AddonConfig;
use crate::serve::build_addon;
use anyhow::Result;
use igdb_core::{CatalogRequest, ContentType, Meta, CATALOG_ID};

pub fn manifest(config: &AddonConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config.manifest())?);
    Ok(())
}

pub async fn catalog(args: CatalogArgs, config: &AddonConfig) -> Result<()> {
    let addon = build_addon(config)?;
    let request = CatalogRequest::from_search(args.search.as_deref());
    let metas = addon.catalog(ContentType::Channel.as_str(), CATALOG_ID, request).await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&metas)?);
        return Ok(());
    }

    if metas.is_empty() {
        println!("No games found.");
        return Ok(());
    }

    println!("{:>4}  {:<14}  {}", "RANK", "ID", "NAME");
    println!("{}", "─".repeat(70));
    for (i, meta) in metas.iter().enumerate() {
        println!("{:>4}  {:<14}  {}", i + 1, meta.id, truncate(meta.name.as_deref().unwrap_or("(untitled)"), 48));
    }
    Ok(())
}

pub async fn meta(args: MetaArgs, config: &AddonConfig) -> Result<()> {
    let addon = build_addon(config)?;
    let meta = addon.meta(ContentType::Channel.as_str(), &args.id).await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&meta)?);
    } else {
        print_meta(&meta);
    }
    Ok(())
}

fn print_meta(meta: &Meta) {
    println!("{} ({})", meta.name.as_deref().unwrap_or("(untitled)"), meta.id);
    println!("{}", "─".repeat(60));
    if let Some(year) = meta.year {
        println!("Year:        {}", year);
    }
    if let Some(ref genres) = meta.genres {
        println!("Genres:      {}", genres.join(", "));
    }
    if let Some(ref poster) = meta.poster {
        println!("Poster:      {}", poster);
    }
    if let Some(ref background) = meta.background {
        println!("Background:  {}", background);
    }
    if let Some(ref description) = meta.description {
        println!("Description: {}", truncate(description, 200));
    }
    println!("Videos:      {}", meta.videos.len());
    for video in &meta.videos {
        println!("  {:<20}  {}", video.id, truncate(&video.title, 50));
    }
}
