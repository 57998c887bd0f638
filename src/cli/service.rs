use ascii_table::{Align, AsciiTable};
use clap::{arg, Command};
use kongo_core::models::Service;
use kongo_core::Kongo;

use crate::context::Context;

pub fn args() -> Command {
    Command::new("service")
        .about("manage services")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("delete")
                .about("delete service")
                .arg(arg!(<ID_OR_NAME> "id or name of the service"))
                .arg_required_else_help(true),
        )
        .subcommand(
            Command::new("list")
                .about("list services")
                .arg(arg!(--json "print one json document per service")),
        )
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    match model_match.subcommand() {
        Some(("delete", delete_match)) => {
            let id_or_name = delete_match
                .get_one::<String>("ID_OR_NAME")
                .expect("service id or name expected");

            kongo.delete_service(id_or_name).await?;

            tracing::info!("service '{id_or_name}' deleted");

            Ok(())
        }
        Some(("list", list_match)) => {
            let services = kongo.list_services().await?;

            if list_match.get_flag("json") {
                for service in &services {
                    println!("{}", serde_json::to_string(service)?);
                }

                return Ok(());
            }

            print_services(&services);

            Ok(())
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}

pub fn print_services(services: &[Service]) {
    let table_data: Vec<Vec<String>> = services
        .iter()
        .map(|service| {
            vec![
                service.id.clone().unwrap_or_default(),
                service.name.clone().unwrap_or_default(),
                service.host.clone().unwrap_or_default(),
                service.path.clone().unwrap_or_default(),
                service.port.map(|port| port.to_string()).unwrap_or_default(),
                service.protocol.clone().unwrap_or_default(),
            ]
        })
        .collect();

    if table_data.is_empty() {
        tracing::info!("no services found");

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
        .set_header("HOST")
        .set_align(Align::Left);

    ascii_table
        .column(3)
        .set_header("PATH")
        .set_align(Align::Left);

    ascii_table
        .column(4)
        .set_header("PORT")
        .set_align(Align::Left);

    ascii_table
        .column(5)
        .set_header("PROTOCOL")
        .set_align(Align::Left);

    ascii_table.print(table_data);
}
