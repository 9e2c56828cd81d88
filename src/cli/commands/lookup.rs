//! Lookup command implementation.

use anyhow::Result;
use daytrader_data::{Resolution, ResolvedVia};

use crate::cli::context::AppContext;
use crate::cli::LookupArgs;

pub async fn run(args: LookupArgs, ctx: &AppContext) -> Result<()> {
    let matches = ctx.table.find_matches(&args.query);

    if matches.is_empty() {
        println!("No ticker table entries match {:?}", args.query.trim());
    } else {
        let name_width = matches.iter().map(|e| e.name.len()).max().unwrap_or(4).max(4);
        println!("{:<w$}  {:<10}  Synonyms", "Name", "Ticker", w = name_width);
        for entry in &matches {
            println!(
                "{:<w$}  {:<10}  {}",
                entry.name,
                entry.symbol,
                entry.synonyms,
                w = name_width
            );
        }
    }

    let strategy = args
        .pick
        .map(Into::into)
        .unwrap_or(ctx.config.lookup.disambiguation);
    println!();
    match ctx.resolve(&args.query, strategy) {
        Resolution::Resolved { symbol, via } => {
            let how = match via {
                ResolvedVia::Override => "override",
                ResolvedVia::ExactSymbol => "exact symbol",
                ResolvedVia::Table => "ticker table",
            };
            println!("Resolved ticker: {symbol} (via {how})");
        }
        Resolution::Fallback(symbol) => {
            println!("Resolved ticker: {symbol} (no match, using the query as symbol)");
        }
        Resolution::Candidates(entries) => {
            let symbols: Vec<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
            println!("{} candidates: {}", entries.len(), symbols.join(", "));
        }
    }

    Ok(())
}
