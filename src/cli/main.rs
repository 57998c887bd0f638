use clap::{Arg, Command};

mod clear;
mod context;
mod list;
mod route;
mod service;
mod target;
mod truncate;
mod upstream;
mod version;
mod workload;

use context::Context;

fn cli() -> Command {
    Command::new("kongo")
        .about("command line tooling for the Kong admin API")
        .version("0.1.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("kong-uri")
                .long("kong-uri")
                .global(true)
                .default_value("http://localhost:8001")
                .help("base url of the Kong admin API"),
        )
        .subcommand(clear::args())
        .subcommand(list::args())
        .subcommand(route::args())
        .subcommand(service::args())
        .subcommand(target::args())
        .subcommand(truncate::args())
        .subcommand(upstream::args())
        .subcommand(version::args())
        .subcommand(workload::args())
        .subcommand(workload::register_test_args())
        .subcommand(workload::deregister_test_args())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = cli().get_matches();

    let context = Context::new(&matches);

    match matches.subcommand() {
        Some(("clear", submatches)) => Ok(clear::handlers(submatches, &context).await?),
        Some(("list", submatches)) => Ok(list::handlers(submatches, &context).await?),
        Some(("route", submatches)) => Ok(route::handlers(submatches, &context).await?),
        Some(("service", submatches)) => Ok(service::handlers(submatches, &context).await?),
        Some(("target", submatches)) => Ok(target::handlers(submatches, &context).await?),
        Some(("truncate", submatches)) => Ok(truncate::handlers(submatches, &context).await?),
        Some(("upstream", submatches)) => Ok(upstream::handlers(submatches, &context).await?),
        Some(("version", submatches)) => Ok(version::handlers(submatches, &context).await?),
        Some(("workload", submatches)) => Ok(workload::handlers(submatches, &context).await?),
        Some(("register-test", submatches)) => {
            Ok(workload::register_test(submatches, &context).await?)
        }
        Some(("deregister-test", submatches)) => {
            Ok(workload::deregister_test(submatches, &context).await?)
        }
        _ => unreachable!(), // If all subcommands are defined above, anything else is unreachable
    }
}
