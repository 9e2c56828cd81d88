//! Scan command implementation.

use anyhow::Result;
use daytrader_analysis::render_table;

use crate::cli::context::AppContext;
use crate::cli::ScanArgs;

pub async fn run(args: ScanArgs, ctx: &AppContext) -> Result<()> {
    // One query per line or separated by semicolons also works
    let queries: Vec<String> = args
        .queries
        .iter()
        .flat_map(|q| q.split(['\n', ';']))
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    let strategy = args
        .pick
        .map(Into::into)
        .unwrap_or(ctx.config.lookup.disambiguation);
    let rows = ctx.scan(&queries, strategy).await;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => print!("{}", render_table(&rows)),
    }

    Ok(())
}
