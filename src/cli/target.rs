use ascii_table::{Align, AsciiTable};
use clap::{arg, Command};
use kongo_core::models::Target;
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("target")
        .about("manage targets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("list targets of an upstream")
                .arg(arg!(<UPSTREAM> "id or name of the owning upstream"))
                .arg(arg!(--json "print one json document per target"))
                .arg_required_else_help(true),
        )
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    match model_match.subcommand() {
        Some(("list", list_match)) => {
            let upstream = list_match
                .get_one::<String>("UPSTREAM")
                .expect("upstream id or name expected");

            let targets = kongo.list_targets(upstream).await?;

            if list_match.get_flag("json") {
                for target in &targets {
                    println!("{}", serde_json::to_string(target)?);
                }

                return Ok(());
            }

            print_targets(&targets);

            Ok(())
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}

pub fn print_targets(targets: &[Target]) {
    let table_data: Vec<Vec<String>> = targets
        .iter()
        .map(|target| {
            vec![
                target.id.clone().unwrap_or_default(),
                target.target.clone().unwrap_or_default(),
                target
                    .weight
                    .map(|weight| weight.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    if table_data.is_empty() {
        tracing::info!("no targets found");

        return;
    }

    let mut ascii_table = AsciiTable::default();

    ascii_table.column(0).set_header("ID").set_align(Align::Left);

    ascii_table
        .column(1)
        .set_header("TARGET")
        .set_align(Align::Left);

    ascii_table
        .column(2)
        .set_header("WEIGHT")
        .set_align(Align::Left);

    ascii_table.print(table_data);
}
