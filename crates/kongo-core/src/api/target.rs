use anyhow::Context;

use crate::client::{expect_success, json};
use crate::models::{Page, Target};
use crate::Kongo;

pub struct TargetDef {
    pub target: String,
    pub weight: u32,
}

impl Kongo {
    /// Creates a target under the given upstream. The owning upstream is
    /// part of the URL, not the payload.
    pub async fn create_target(
        &self,
        upstream_id_or_name: &str,
        target_def: &TargetDef,
    ) -> anyhow::Result<Target> {
        let target = Target {
            target: Some(target_def.target.clone()),
            weight: Some(target_def.weight),
            ..Target::default()
        };

        let url = self.endpoint(&format!(
            "/upstreams/{}/targets",
            urlencoding::encode(upstream_id_or_name)
        ))?;

        let response = self
            .http
            .post(url)
            .json(&target)
            .send()
            .await
            .with_context(|| format!("creating target '{}'", target_def.target))?;

        json(response).await
    }

    pub async fn delete_target(
        &self,
        upstream_id_or_name: &str,
        target_id_or_address: &str,
    ) -> anyhow::Result<()> {
        let url = self.endpoint(&format!(
            "/upstreams/{}/targets/{}",
            urlencoding::encode(upstream_id_or_name),
            urlencoding::encode(target_id_or_address)
        ))?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .with_context(|| format!("deleting target '{target_id_or_address}'"))?;

        expect_success(response).await
    }

    pub async fn list_targets(&self, upstream_id_or_name: &str) -> anyhow::Result<Vec<Target>> {
        let url = self.endpoint(&format!(
            "/upstreams/{}/targets",
            urlencoding::encode(upstream_id_or_name)
        ))?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("listing targets for upstream '{upstream_id_or_name}'"))?;

        let page: Page<Target> = json(response).await?;

        Ok(page.data)
    }

    /// Deletes every target of every upstream. A failure listing either
    /// collection aborts; per-target delete failures are logged and skipped.
    pub async fn delete_all_targets(&self) -> anyhow::Result<()> {
        let upstreams = self.list_upstreams().await?;

        for upstream in upstreams {
            let upstream_id = match upstream.id.as_deref() {
                Some(id) => id,
                None => continue,
            };

            let targets = self.list_targets(upstream_id).await?;

            for target in targets {
                // prefer the id; the admin API also accepts the address
                let reference = match target.id.as_deref().or(target.target.as_deref()) {
                    Some(reference) => reference,
                    None => continue,
                };

                if let Err(error) = self.delete_target(upstream_id, reference).await {
                    tracing::warn!(
                        "error deleting target '{}' of upstream {:?}: {}",
                        reference,
                        upstream.name,
                        error
                    );
                }
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
    async fn test_create_and_list_scoped_to_upstream() {
        let server = MockServer::start();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upstreams/kongo-test-upstream/targets")
                .json_body(json!({ "target": "kongo-test-target-1:80", "weight": 10 }));
            then.status(201).json_body(json!({
                "id": "target-id-1",
                "target": "kongo-test-target-1:80",
                "weight": 10,
                "upstream": { "id": "upstream-id-1" }
            }));
        });

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/upstreams/kongo-test-upstream/targets");
            then.status(200).json_body(json!({
                "data": [{
                    "id": "target-id-1",
                    "target": "kongo-test-target-1:80",
                    "weight": 10
                }],
                "next": null
            }));
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        let target_def = TargetDef {
            target: "kongo-test-target-1:80".to_string(),
            weight: 10,
        };

        let target = kongo
            .create_target("kongo-test-upstream", &target_def)
            .await
            .unwrap();
        assert_eq!(target.target.as_deref(), Some("kongo-test-target-1:80"));

        let targets = kongo.list_targets("kongo-test-upstream").await.unwrap();
        assert_eq!(targets.len(), 1);

        create_mock.assert();
        list_mock.assert();
    }

    #[tokio::test]
    async fn test_delete_all_walks_upstreams() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/upstreams");
            then.status(200).json_body(json!({
                "data": [{ "id": "upstream-id-1", "name": "pool-one" }]
            }));
        });

        server.mock(|when, then| {
            when.method(GET).path("/upstreams/upstream-id-1/targets");
            then.status(200).json_body(json!({
                "data": [
                    { "id": "target-id-1", "target": "10.0.0.1:80" },
                    { "id": "target-id-2", "target": "10.0.0.2:80" }
                ]
            }));
        });

        let delete_one = server.mock(|when, then| {
            when.method(DELETE)
                .path("/upstreams/upstream-id-1/targets/target-id-1");
            then.status(204);
        });

        let delete_two = server.mock(|when, then| {
            when.method(DELETE)
                .path("/upstreams/upstream-id-1/targets/target-id-2");
            then.status(204);
        });

        let kongo = Kongo::new(&server.base_url()).unwrap();

        kongo.delete_all_targets().await.unwrap();

        delete_one.assert();
        delete_two.assert();
    }
}
