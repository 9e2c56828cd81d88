//! Analyze command implementation.

use anyhow::{Context, Result};
use daytrader_analysis::{AnalysisSettings, Analyzer, TechnicalSnapshot};
use daytrader_core::traits::NewsProvider;
use daytrader_core::types::Timeframe;
use daytrader_data::{load_csv, Disambiguation, Resolution, TickerEntry};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::cli::context::AppContext;
use crate::cli::AnalyzeArgs;

pub async fn run(args: AnalyzeArgs, ctx: &AppContext) -> Result<()> {
    let strategy = args
        .pick
        .map(Into::into)
        .unwrap_or(ctx.config.lookup.disambiguation);

    let symbols = match ctx.resolve(&args.query, strategy) {
        Resolution::Candidates(entries) if strategy == Disambiguation::Prompt => {
            prompt_choice(&entries)?
        }
        resolution => resolution.symbols(),
    };
    info!(query = %args.query, ?symbols, "Resolved query");

    let analyzer = if args.no_convert {
        Analyzer::new(AnalysisSettings {
            fx_rate: 1.0,
            currency: String::new(),
            ..ctx.config.analysis.clone()
        })?
    } else {
        ctx.analyzer.clone()
    };

    let mut snapshots: Vec<TechnicalSnapshot> = Vec::new();
    for symbol in &symbols {
        let history = match &args.data {
            Some(path) => {
                let timeframe = args.interval.first().copied().unwrap_or(Timeframe::Daily);
                load_csv(path, symbol, timeframe)
            }
            None => ctx.fetch(symbol, &args.interval).await,
        };

        match history.and_then(|h| analyzer.analyze(&h)) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) if e.is_no_data() => println!("{symbol}: no price data found"),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Analysis failed");
                println!("{symbol}: could not load data ({e})");
            }
        }
    }

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&snapshots)?),
        _ => {
            for snapshot in &snapshots {
                println!("{}", snapshot.report());
                println!();
            }
        }
    }

    if args.news {
        let news = ctx.news_provider()?;
        for snapshot in &snapshots {
            println!("News for {}:", snapshot.symbol);
            match news
                .latest_headlines(&snapshot.symbol, ctx.config.news.count)
                .await
            {
                Ok(headlines) if headlines.is_empty() => println!("  no headlines"),
                Ok(headlines) => {
                    for h in headlines {
                        println!("  - {} ({})", h.title, h.link);
                    }
                }
                Err(e) => println!("  news unavailable ({e})"),
            }
        }
    }

    Ok(())
}

/// Ask which candidates to analyze.
fn prompt_choice(entries: &[TickerEntry]) -> Result<Vec<String>> {
    let mut stdout = io::stdout();
    writeln!(stdout, "Several matches found:")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(stdout, "  {}) {} ({})", i + 1, entry.name, entry.symbol)?;
    }
    write!(stdout, "Choose [1-{}], 'a' for all (default 1): ", entries.len())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read selection")?;

    let picks = parse_choice(&line, entries.len())
        .with_context(|| format!("Invalid selection {:?}", line.trim()))?;
    Ok(picks.into_iter().map(|i| entries[i].symbol.clone()).collect())
}

/// Parse a selection into zero-based indices.
fn parse_choice(input: &str, count: usize) -> Option<Vec<usize>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(vec![0]);
    }
    if input.eq_ignore_ascii_case("a") || input.eq_ignore_ascii_case("all") {
        return Some((0..count).collect());
    }
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Some(n - 1),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("\n", 3), Some(vec![0]));
        assert_eq!(parse_choice("2", 3), Some(vec![1]));
        assert_eq!(parse_choice("1, 3", 3), Some(vec![0, 2]));
        assert_eq!(parse_choice("A", 3), Some(vec![0, 1, 2]));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("x", 3), None);
    }
}
