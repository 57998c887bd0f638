use clap::{arg, Command};
use kongo_core::Kongo;

use crate::context::Context;
use crate::{route, service, target, upstream};

pub fn args() -> Command {
    Command::new("list")
        .about("list every entity: upstreams with their targets, services, routes")
        .arg(arg!(--json "print one json document per entity"))
}

pub async fn handlers(model_match: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    let kongo = Kongo::new(&context.endpoint)?;
    let json = model_match.get_flag("json");

    let upstreams = kongo.list_upstreams().await?;

    if json {
        for up in &upstreams {
            println!("{}", serde_json::to_string(up)?);
        }
    } else {
        upstream::print_upstreams(&upstreams);
    }

    for up in &upstreams {
        let id = match up.id.as_deref().or(up.name.as_deref()) {
            Some(id) => id,
            None => continue,
        };

        let targets = kongo.list_targets(id).await?;

        if json {
            for target in &targets {
                println!("{}", serde_json::to_string(target)?);
            }
        } else if !targets.is_empty() {
            println!("targets of upstream '{id}':");
            target::print_targets(&targets);
        }
    }

    let services = kongo.list_services().await?;

    if json {
        for svc in &services {
            println!("{}", serde_json::to_string(svc)?);
        }
    } else {
        service::print_services(&services);
    }

    let routes = kongo.list_routes().await?;

    if json {
        for rt in &routes {
            println!("{}", serde_json::to_string(rt)?);
        }
    } else {
        route::print_routes(&routes);
    }

    Ok(())
}
