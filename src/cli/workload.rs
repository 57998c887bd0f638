use clap::{arg, Arg, ArgAction, Command};
use kongo_core::{Kongo, WorkloadDef};

use crate::context::Context;

pub fn args() -> Command {
    Command::new("workload")
        .about("manage composite workloads (upstream + targets + service + route)")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("register")
                .about("register upstream, targets, service, and route for a workload")
                .arg(
                    Arg::new("address")
                        .short('a')
                        .long("address")
                        .help("backend address (host or host:port), repeatable")
                        .action(ArgAction::Append)
                        .required(true),
                )
                .arg(
                    Arg::new("path")
                        .short('p')
                        .long("path")
                        .help("path the service and route use")
                        .required(true),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .help("port the service forwards to")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("80"),
                )
                .arg(arg!(<NAME> "workload base name"))
                .arg_required_else_help(true),
        )
        .subcommand(
            Command::new("deregister")
                .about("remove a workload's route, service, targets, and upstream")
                .arg(arg!(<NAME> "workload base name"))
                .arg_required_else_help(true),
        )
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    match model_match.subcommand() {
        Some(("register", register_match)) => {
            let name = register_match
                .get_one::<String>("NAME")
                .expect("workload name expected")
                .clone();

            let addresses: Vec<String> = register_match
                .get_many::<String>("address")
                .expect("at least one address expected")
                .cloned()
                .collect();

            let path = register_match
                .get_one::<String>("path")
                .expect("path expected")
                .clone();

            let port = *register_match
                .get_one::<u16>("port")
                .expect("port has a default");

            let workload = WorkloadDef {
                name,
                addresses,
                path,
                port,
            };

            register(&kongo, &workload).await
        }
        Some(("deregister", deregister_match)) => {
            let name = deregister_match
                .get_one::<String>("NAME")
                .expect("workload name expected");

            kongo.deregister_workload(name).await?;

            tracing::info!("workload '{name}' deregistered");

            Ok(())
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}

pub fn register_test_args() -> Command {
    Command::new("register-test").about("create the fixed test workload")
}

pub fn deregister_test_args() -> Command {
    Command::new("deregister-test").about("remove the fixed test workload")
}

pub async fn register_test(
    _model_match: &clap::ArgMatches,
    context: &Context,
) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;

    register(&kongo, &test_workload()).await
}

pub async fn deregister_test(
    _model_match: &clap::ArgMatches,
    context: &Context,
) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;
    let workload = test_workload();

    kongo.deregister_workload(&workload.name).await?;

    tracing::info!("workload '{}' deregistered", workload.name);

    Ok(())
}

async fn register(kongo: &Kongo, workload: &WorkloadDef) -> anyhow::Result<()> {
    match kongo.register_workload(workload).await {
        Ok(registered) => {
            println!("{}", serde_json::to_string(&registered)?);

            tracing::info!("workload '{}' registered", workload.name);

            Ok(())
        }
        Err(error) => {
            // no rollback happens; tell the operator what is left behind
            tracing::warn!(
                "partial registration left in kong: {}",
                serde_json::to_string(&error.partial)?
            );

            Err(error.into())
        }
    }
}

fn test_workload() -> WorkloadDef {
    WorkloadDef {
        name: "kongo.test-service-one".to_string(),
        addresses: vec!["localhost".to_string()],
        path: "/testing-1-2-3".to_string(),
        port: 80,
    }
}
