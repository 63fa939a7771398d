//! Binary that runs a named world through the harness runner and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `route_fixture [romania|serpentine] [astar|beam:<width>]`
//!
//! Output: key=value lines on stdout. Logs go to stderr, filtered by the
//! `TREESEARCH_LOG` environment variable (default `warn`).

use std::error::Error;

use tracing_subscriber::EnvFilter;
use treesearch::SearchPolicy;
use treesearch_harness::runner::{run_search, SearchReport, StrategyConfig};
use treesearch_harness::worlds::grid_maze::GridMaze;
use treesearch_harness::worlds::romania::romania;

fn parse_strategy(arg: &str) -> Result<StrategyConfig, Box<dyn Error>> {
    if arg == "astar" {
        return Ok(StrategyConfig::AStar);
    }
    match arg.strip_prefix("beam:") {
        Some(width) => Ok(StrategyConfig::beam(width.parse()?)),
        None => Err(format!("unknown strategy: {arg}").into()),
    }
}

fn print_report(report: &SearchReport) {
    println!("world_id={}", report.world_id);
    println!("strategy_id={}", report.strategy_id);
    println!("termination={}", report.termination);
    match report.cost {
        Some(cost) => println!("cost={cost}"),
        None => println!("cost=none"),
    }
    println!("route={}", report.route().join(" > "));
    println!("search_graph_digest={}", report.graph_digest);
    println!("config_digest={}", report.config_digest);
    println!("report_digest={}", report.report_digest);
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TREESEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let world = args.next().unwrap_or_else(|| "romania".into());
    let strategy = parse_strategy(&args.next().unwrap_or_else(|| "astar".into()))?;
    let policy = SearchPolicy::default();

    let report = match world.as_str() {
        "romania" => run_search(&romania(), strategy, &policy)?,
        "serpentine" => run_search(&GridMaze::serpentine(12, 6), strategy, &policy)?,
        other => return Err(format!("unknown world: {other}").into()),
    };
    print_report(&report);
    Ok(())
}
