use ascii_table::{Align, AsciiTable};
use clap::{arg, Command};
use kongo_core::models::Route;
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("route")
        .about("manage routes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("delete")
                .about("delete route")
                .arg(arg!(<ID_OR_NAME> "id or name of the route"))
                .arg_required_else_help(true),
        )
        .subcommand(
            Command::new("list")
                .about("list routes")
                .arg(arg!(--json "print one json document per route")),
        )
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    match model_match.subcommand() {
        Some(("delete", delete_match)) => {
            let id_or_name = delete_match
                .get_one::<String>("ID_OR_NAME")
                .expect("route id or name expected");

            kongo.delete_route(id_or_name).await?;

            tracing::info!("route '{id_or_name}' deleted");

            Ok(())
        }
        Some(("list", list_match)) => {
            let routes = kongo.list_routes().await?;

            if list_match.get_flag("json") {
                for route in &routes {
                    println!("{}", serde_json::to_string(route)?);
                }

                return Ok(());
            }

            print_routes(&routes);

            Ok(())
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}

pub fn print_routes(routes: &[Route]) {
    let table_data: Vec<Vec<String>> = routes
        .iter()
        .map(|route| {
            vec![
                route.id.clone().unwrap_or_default(),
                route.name.clone().unwrap_or_default(),
                route.paths.clone().unwrap_or_default().join(","),
                route
                    .strip_path
                    .map(|strip_path| strip_path.to_string())
                    .unwrap_or_default(),
                route
                    .service
                    .clone()
                    .and_then(|service| service.id)
                    .unwrap_or_default(),
            ]
        })
        .collect();

    if table_data.is_empty() {
        tracing::info!("no routes found");

        return;
    }

    let mut ascii_table = AsciiTable::default();

    ascii_table.column(0).set_header("ID").set_align(Align::Left);

    ascii_table
        .column(1)
        .set_header("NAME")
        .set_align(Align::Left);

    ascii_table
        .column(2)
        .set_header("PATHS")
        .set_align(Align::Left);

    ascii_table
        .column(3)
        .set_header("STRIP PATH")
        .set_align(Align::Left);

    ascii_table
        .column(4)
        .set_header("SERVICE ID")
        .set_align(Align::Left);

    ascii_table.print(table_data);
}
