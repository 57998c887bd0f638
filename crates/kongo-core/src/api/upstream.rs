use anyhow::Context;

use crate::client::{expect_success, json};
use crate::models::{Page, Upstream};
use crate::Kongo;

pub struct UpstreamDef {
    pub name: String,
}

impl Kongo {
    pub async fn create_upstream(&self, upstream_def: &UpstreamDef) -> anyhow::Result<Upstream> {
        let upstream = Upstream {
            name: Some(upstream_def.name.clone()),
            ..Upstream::default()
        };

        let url = self.endpoint("/upstreams")?;

        let response = self
            .http
            .post(url)
            .json(&upstream)
            .send()
            .await
            .with_context(|| format!("creating upstream '{}'", upstream_def.name))?;

        json(response).await
    }

    pub async fn delete_upstream(&self, id_or_name: &str) -> anyhow::Result<()> {
        let url = self.endpoint(&format!("/upstreams/{}", urlencoding::encode(id_or_name)))?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .with_context(|| format!("deleting upstream '{id_or_name}'"))?;

        expect_success(response).await
    }

    pub async fn list_upstreams(&self) -> anyhow::Result<Vec<Upstream>> {
        let url = self.endpoint("/upstreams")?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("listing upstreams")?;

        let page: Page<Upstream> = json(response).await?;

        Ok(page.data)
    }

    pub async fn delete_all_upstreams(&self) -> anyhow::Result<()> {
        let upstreams = self.list_upstreams().await?;

        for upstream in upstreams {
            let id = match upstream.id.as_deref() {
                Some(id) => id,
                None => continue,
            };

            if let Err(error) = self.delete_upstream(id).await {
                tracing::warn!("error deleting upstream {:?}: {}", upstream.name, error);
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
            when.method(POST)
                .path("/upstreams")
                .json_body(json!({ "name": "kongo-test-upstream" }));
            then.status(201).json_body(json!({
                "id": "upstream-id-1",
                "name": "kongo-test-upstream"
            }));
        });

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/upstreams");
            then.status(200).json_body(json!({
                "data": [{ "id": "upstream-id-1", "name": "kongo-test-upstream" }],
                "next": null
            }));
        });

        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path("/upstreams/kongo-test-upstream");
            then.status(204);
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        let upstream_def = UpstreamDef {
            name: "kongo-test-upstream".to_string(),
        };

        let upstream = kongo.create_upstream(&upstream_def).await.unwrap();
        assert_eq!(upstream.id.as_deref(), Some("upstream-id-1"));

        let upstreams = kongo.list_upstreams().await.unwrap();
        assert_eq!(upstreams.len(), 1);

        kongo.delete_upstream("kongo-test-upstream").await.unwrap();

        create_mock.assert();
        list_mock.assert();
        delete_mock.assert();
    }
}
