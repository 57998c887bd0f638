use anyhow::Context;

use crate::client::{expect_success, json};
use crate::models::{Page, Service};
use crate::Kongo;

/// Minimal description of a service; every field not present here is
/// left unset on the wire.
pub struct ServiceDef {
    pub name: String,
    pub host: String,
    pub path: String,
    pub port: u16,
    pub protocol: String,
}

impl Kongo {
    pub async fn create_service(&self, service_def: &ServiceDef) -> anyhow::Result<Service> {
        let service = Service {
            name: Some(service_def.name.clone()),
            host: Some(service_def.host.clone()),
            path: Some(service_def.path.clone()),
            port: Some(service_def.port),
            protocol: Some(service_def.protocol.clone()),
            ..Service::default()
        };

        let url = self.endpoint("/services")?;

        let response = self
            .http
            .post(url)
            .json(&service)
            .send()
            .await
            .with_context(|| format!("creating service '{}'", service_def.name))?;

        json(response).await
    }

    pub async fn delete_service(&self, id_or_name: &str) -> anyhow::Result<()> {
        let url = self.endpoint(&format!("/services/{}", urlencoding::encode(id_or_name)))?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .with_context(|| format!("deleting service '{id_or_name}'"))?;

        expect_success(response).await
    }

    pub async fn list_services(&self) -> anyhow::Result<Vec<Service>> {
        let url = self.endpoint("/services")?;

        let response = self.http.get(url).send().await.context("listing services")?;

        let page: Page<Service> = json(response).await?;

        Ok(page.data)
    }

    /// Deletes every service. Individual delete failures are logged and
    /// skipped; only a listing failure aborts the call.
    pub async fn delete_all_services(&self) -> anyhow::Result<()> {
        let services = self.list_services().await?;

        for service in services {
            let id = match service.id.as_deref() {
                Some(id) => id,
                None => continue,
            };

            if let Err(error) = self.delete_service(id).await {
                tracing::warn!("error deleting service {:?}: {}", service.name, error);
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
    async fn test_create_list_delete() {
        let server = MockServer::start();

        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/services").json_body(json!({
                "name": "kongo-test-service",
                "host": "kongo-test-host",
                "path": "/rootPath",
                "port": 8080,
                "protocol": "http"
            }));
            then.status(201).json_body(json!({
                "id": "9748f662-7711-4a90-8186-dc02f10eb0f5",
                "name": "kongo-test-service",
                "host": "kongo-test-host",
                "path": "/rootPath",
                "port": 8080,
                "protocol": "http"
            }));
        });

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/services");
            then.status(200).json_body(json!({
                "data": [{
                    "id": "9748f662-7711-4a90-8186-dc02f10eb0f5",
                    "name": "kongo-test-service",
                    "host": "kongo-test-host"
                }],
                "next": null
            }));
        });

        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path("/services/kongo-test-service");
            then.status(204);
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        let service_def = ServiceDef {
            name: "kongo-test-service".to_string(),
            host: "kongo-test-host".to_string(),
            path: "/rootPath".to_string(),
            port: 8080,
            protocol: "http".to_string(),
        };

        let service = kongo.create_service(&service_def).await.unwrap();
        assert_eq!(service.name.as_deref(), Some("kongo-test-service"));
        assert!(service.id.is_some());

        let services = kongo.list_services().await.unwrap();
        assert_eq!(services.len(), 1);

        kongo.delete_service("kongo-test-service").await.unwrap();

        create_mock.assert();
        list_mock.assert();
        delete_mock.assert();
    }

    #[tokio::test]
    async fn test_create_conflict_is_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/services");
            then.status(409)
                .json_body(json!({ "name": "unique constraint violation" }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        let service_def = ServiceDef {
            name: "kongo-test-service".to_string(),
            host: "kongo-test-host".to_string(),
            path: "/rootPath".to_string(),
            port: 8080,
            protocol: "http".to_string(),
        };

        let error = kongo.create_service(&service_def).await.unwrap_err();
        assert!(error.to_string().contains("409"));
    }

    #[tokio::test]
    async fn test_delete_all_continues_past_failures() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/services");
            then.status(200).json_body(json!({
                "data": [
                    { "id": "one", "name": "service-one" },
                    { "id": "two", "name": "service-two" }
                ]
            }));
        });

        server.mock(|when, then| {
            when.method(DELETE).path("/services/one");
            then.status(500).json_body(json!({ "message": "boom" }));
        });

        let delete_two = server.mock(|when, then| {
            when.method(DELETE).path("/services/two");
            then.status(204);
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        kongo.delete_all_services().await.unwrap();

        delete_two.assert();
    }

    #[tokio::test]
    async fn test_delete_all_aborts_when_listing_fails() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/services");
            then.status(500).json_body(json!({ "message": "boom" }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        assert!(kongo.delete_all_services().await.is_err());
    }
}
