//! News command implementation.

use anyhow::Result;
use daytrader_core::traits::NewsProvider;
use daytrader_data::Disambiguation;

use crate::cli::context::AppContext;
use crate::cli::NewsArgs;

pub async fn run(args: NewsArgs, ctx: &AppContext) -> Result<()> {
    let symbols = ctx.resolve(&args.query, Disambiguation::First).symbols();
    let Some(symbol) = symbols.first() else {
        println!("Nothing to look up");
        return Ok(());
    };

    let count = args.count.unwrap_or(ctx.config.news.count);
    let news = ctx.news_provider()?;

    println!("Latest headlines for {symbol}:");
    match news.latest_headlines(symbol, count).await {
        Ok(headlines) if headlines.is_empty() => println!("  no headlines"),
        Ok(headlines) => {
            for h in headlines {
                let when = h
                    .published_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                let publisher = h.publisher.as_deref().unwrap_or("");
                println!("  - {}", h.title);
                println!("    {} {} {}", when, publisher, h.link);
            }
        }
        Err(e) => println!("  news unavailable ({e})"),
    }

    Ok(())
}
