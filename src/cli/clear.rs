use clap::{arg, Command};
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("clear")
        .about("remove the entities registered for a namespace and service name")
        .arg(arg!(<NAMESPACE> "namespace the service lives in"))
        .arg(arg!(<SERVICE> "service name within the namespace"))
        .arg_required_else_help(true)
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let namespace = model_match
        .get_one::<String>("NAMESPACE")
        .expect("namespace expected");

    let service_name = model_match
        .get_one::<String>("SERVICE")
        .expect("service name expected");

    let base_name = format!("{namespace}.{service_name}");

    let kongo = Kongo::new(&context.endpoint)?;

    kongo.deregister_workload(&base_name).await?;

    tracing::info!("entries for '{base_name}' cleared");

    Ok(())
}
