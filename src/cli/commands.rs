use url::Url;

use crate::app::{AppContext, Result, ShopfeedError};
use crate::domain::ProductLink;
use crate::writer::FeedWriter;

/// Run the full pipeline into the configured feed file
pub async fn crawl(ctx: &AppContext) -> Result<usize> {
    let listing = ctx.listing_url()?;
    let feed = &ctx.config.feed;

    let mut writer = FeedWriter::create(&feed.output, feed.meta(), feed.layout)?;
    let written = ctx.pipeline.run(&listing, &mut writer).await?;

    println!("Wrote {} products to {}", written, feed.output.display());
    Ok(written)
}

pub async fn list_links(ctx: &AppContext) -> Result<()> {
    let listing = ctx.listing_url()?;
    let links = ctx.pipeline.discover(&listing).await;

    if links.is_empty() {
        eprintln!("No product links found");
        return Ok(());
    }

    for link in links {
        println!("{}", link);
    }
    Ok(())
}

pub async fn extract(ctx: &AppContext, url: &str) -> Result<()> {
    let link = ProductLink::from(Url::parse(url)?);

    let record = ctx
        .pipeline
        .extract(&link)
        .await
        .ok_or_else(|| ShopfeedError::Other(format!("Could not load product page {}", url)))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
