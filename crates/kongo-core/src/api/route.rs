use anyhow::Context;

use crate::client::{expect_success, json};
use crate::models::{Page, Route, ServiceRef};
use crate::Kongo;

pub struct RouteDef {
    pub name: String,
    pub paths: Vec<String>,
    pub service_id: Option<String>,
    pub strip_path: bool,
}

impl Kongo {
    pub async fn create_route(&self, route_def: &RouteDef) -> anyhow::Result<Route> {
        let route = Route {
            name: Some(route_def.name.clone()),
            paths: Some(route_def.paths.clone()),
            strip_path: Some(route_def.strip_path),
            service: route_def
                .service_id
                .clone()
                .map(|id| ServiceRef { id: Some(id) }),
            ..Route::default()
        };

        let url = self.endpoint("/routes")?;

        let response = self
            .http
            .post(url)
            .json(&route)
            .send()
            .await
            .with_context(|| format!("creating route '{}'", route_def.name))?;

        json(response).await
    }

    pub async fn delete_route(&self, id_or_name: &str) -> anyhow::Result<()> {
        let url = self.endpoint(&format!("/routes/{}", urlencoding::encode(id_or_name)))?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .with_context(|| format!("deleting route '{id_or_name}'"))?;

        expect_success(response).await
    }

    pub async fn list_routes(&self) -> anyhow::Result<Vec<Route>> {
        let url = self.endpoint("/routes")?;

        let response = self.http.get(url).send().await.context("listing routes")?;

        let page: Page<Route> = json(response).await?;

        Ok(page.data)
    }

    pub async fn delete_all_routes(&self) -> anyhow::Result<()> {
        let routes = self.list_routes().await?;

        for route in routes {
            let id = match route.id.as_deref() {
                Some(id) => id,
                None => continue,
            };

            if let Err(error) = self.delete_route(id).await {
                tracing::warn!("error deleting route {:?}: {}", route.name, error);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_create_references_service() {
        let server = MockServer::start();

        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/routes").json_body(json!({
                "name": "kongo-test-route",
                "paths": ["/testing"],
                "strip_path": false,
                "service": { "id": "service-id-1" }
            }));
            then.status(201).json_body(json!({
                "id": "route-id-1",
                "name": "kongo-test-route",
                "paths": ["/testing"],
                "strip_path": false,
                "service": { "id": "service-id-1" }
            }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        let route_def = RouteDef {
            name: "kongo-test-route".to_string(),
            paths: vec!["/testing".to_string()],
            service_id: Some("service-id-1".to_string()),
            strip_path: false,
        };

        let route = kongo.create_route(&route_def).await.unwrap();

        create_mock.assert();
        assert_eq!(
            route.service.and_then(|service| service.id).as_deref(),
            Some("service-id-1")
        );
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_gateway() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/routes");
            then.status(200).json_body(json!({ "data": [], "next": null }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        kongo.delete_all_routes().await.unwrap();
    }
}
