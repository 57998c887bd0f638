use std::io::{BufRead, Write};

use clap::Command;
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("truncate").about("delete every entity in Kong (USE WITH CAUTION)")
}

pub async fn handlers(_model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let stdin = std::io::stdin();

    if !ask_for_confirmation(
        "THIS WILL DELETE ALL KONG ENTRIES, ARE YOU SURE?",
        &mut stdin.lock(),
    )? {
        tracing::info!("truncate aborted");

        return Ok(());
    }

    let kongo = Kongo::new(&context.endpoint)?;

    // targets before their upstreams, routes before their services
    if let Err(error) = kongo.delete_all_targets().await {
        tracing::warn!("error deleting all targets: {error}");
    }

    if let Err(error) = kongo.delete_all_upstreams().await {
        tracing::warn!("error deleting all upstreams: {error}");
    }

    if let Err(error) = kongo.delete_all_routes().await {
        tracing::warn!("error deleting all routes: {error}");
    }

    if let Err(error) = kongo.delete_all_services().await {
        tracing::warn!("error deleting all services: {error}");
    }

    Ok(())
}

/// Prompts until the reader answers `YES` (proceed) or `n`/`no`/`NO`
/// (abort). Only the exact uppercase `YES` confirms.
fn ask_for_confirmation(prompt: &str, reader: &mut impl BufRead) -> anyhow::Result<bool> {
    loop {
        print!("{prompt} [YES/no]: ");
        std::io::stdout().flush()?;

        let mut response = String::new();

        if reader.read_line(&mut response)? == 0 {
            anyhow::bail!("stdin closed before confirmation");
        }

        match response.trim() {
            "YES" => return Ok(true),
            "n" | "no" | "NO" => return Ok(false),
            _ => {}
        }
    }
}
