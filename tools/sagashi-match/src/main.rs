use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use sagashi_core::scoring::DEFAULT_THRESHOLD;
use sagashi_core::{checked_query, MatchPolicy, SlugMatcher, TitleMatcher};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sagashi-match")]
#[command(about = "Rank candidate lines from stdin against a query")]
#[command(version)]
struct Cli {
    /// Title or slug to look for
    query: String,

    /// Minimum similarity the best title must exceed
    #[arg(short, long, env = "SAGASHI_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Print every candidate in rank order instead of only the best
    #[arg(short, long)]
    all: bool,

    /// Treat input lines as catalog URLs and rank them by slug
    #[arg(short, long)]
    slugs: bool,
}

#[derive(Debug, Serialize)]
struct MatchOutput<'a> {
    query: &'a str,
    title: &'a str,
    score: f64,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn read_candidates<R: BufRead>(input: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line.context("Failed to read candidate line")?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> Result<()> {
    let query = checked_query(&cli.query)?;
    let candidates = read_candidates(input)?;
    debug!(query, candidates = candidates.len(), "read candidates");

    if cli.slugs {
        let matcher = SlugMatcher::default();
        if cli.all {
            for slug_match in matcher.rank(query, &candidates) {
                write_json(out, &slug_match)?;
            }
        } else {
            let Some(best) = matcher.best_match(query, &candidates) else {
                bail!("no link slug relates to {query:?}");
            };
            write_json(out, &best)?;
        }
        return Ok(());
    }

    let matcher = TitleMatcher::new(MatchPolicy::try_with_threshold(cli.threshold)?);
    if cli.all {
        for candidate in matcher.rank(query, &candidates) {
            write_json(out, &candidate)?;
        }
    } else {
        let Some(best) = matcher.best_match(query, &candidates) else {
            bail!("no candidate scored above {} for {query:?}", matcher.policy().threshold);
        };
        write_json(
            out,
            &MatchOutput {
                query,
                title: &best.label,
                score: best.score,
            },
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, io::stdin().lock(), &mut out)?;
    out.flush()?;
    Ok(())
}
