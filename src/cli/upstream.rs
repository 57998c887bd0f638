use ascii_table::{Align, AsciiTable};
use clap::{arg, Command};
use kongo_core::models::Upstream;
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("upstream")
        .about("manage upstreams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("delete")
                .about("delete upstream")
                .arg(arg!(<ID_OR_NAME> "id or name of the upstream"))
                .arg_required_else_help(true),
        )
        .subcommand(
            Command::new("list")
                .about("list upstreams")
                .arg(arg!(--json "print one json document per upstream")),
        )
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    match model_match.subcommand() {
        Some(("delete", delete_match)) => {
            let id_or_name = delete_match
                .get_one::<String>("ID_OR_NAME")
                .expect("upstream id or name expected");

            kongo.delete_upstream(id_or_name).await?;

            tracing::info!("upstream '{id_or_name}' deleted");

            Ok(())
        }
        Some(("list", list_match)) => {
            let upstreams = kongo.list_upstreams().await?;

            if list_match.get_flag("json") {
                for upstream in &upstreams {
                    println!("{}", serde_json::to_string(upstream)?);
                }

                return Ok(());
            }

            print_upstreams(&upstreams);

            Ok(())
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}

pub fn print_upstreams(upstreams: &[Upstream]) {
    let table_data: Vec<Vec<String>> = upstreams
        .iter()
        .map(|upstream| {
            vec![
                upstream.id.clone().unwrap_or_default(),
                upstream.name.clone().unwrap_or_default(),
            ]
        })
        .collect();

    if table_data.is_empty() {
        tracing::info!("no upstreams found");

        return;
    }

    let mut ascii_table = AsciiTable::default();

    ascii_table.column(0).set_header("ID").set_align(Align::Left);

    ascii_table
        .column(1)
        .set_header("NAME")
        .set_align(Align::Left);

    ascii_table.print(table_data);
}
