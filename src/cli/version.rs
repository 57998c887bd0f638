use clap::Command;
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("version").about("print the gateway version")
}

pub async fn handlers(_model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    let version = kongo.version().await?;

    println!("{version}");

    Ok(())
}
