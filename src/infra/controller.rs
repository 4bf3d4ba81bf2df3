//! HTTP implementation of the `ControllerClient` port.
//!
//! Every call carries its own deadline so a hung controller cannot
//! stall the loop: registration and result reporting get a longer
//! grace period than the per-iteration heartbeat/poll calls.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::{ControllerClient, RegisterRequest};
use crate::domain::job::{Job, JobResult};

const REGISTER_TIMEOUT: Duration = Duration::from_secs(10);
const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_TIMEOUT: Duration = Duration::from_secs(5);
const REPORT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpController {
    client: reqwest::Client,
    base_url: String,
}

impl HttpController {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    id: String,
}

impl ControllerClient for HttpController {
    async fn register(&self, request: &RegisterRequest) -> Result<String> {
        let response = self
            .client
            .post(self.url("/agents/register"))
            .timeout(REGISTER_TIMEOUT)
            .json(request)
            .send()
            .await
            .context("sending registration request")?
            .error_for_status()
            .context("registration rejected by controller")?;
        let body: RegisterResponse = response
            .json()
            .await
            .context("parsing registration response")?;
        Ok(body.id)
    }

    async fn heartbeat(&self, agent_id: &str) -> Result<()> {
        self.client
            .post(self.url(&format!("/agents/{agent_id}/heartbeat")))
            .timeout(HEARTBEAT_TIMEOUT)
            .send()
            .await
            .context("sending heartbeat")?
            .error_for_status()
            .context("heartbeat rejected by controller")?;
        Ok(())
    }

    async fn fetch_jobs(&self, agent_id: &str) -> Result<Vec<Job>> {
        let jobs = self
            .client
            .get(self.url(&format!("/agents/{agent_id}/jobs")))
            .timeout(POLL_TIMEOUT)
            .send()
            .await
            .context("polling for jobs")?
            .error_for_status()
            .context("job poll rejected by controller")?
            .json()
            .await
            .context("parsing job list")?;
        Ok(jobs)
    }

    async fn report_result(&self, agent_id: &str, result: &JobResult) -> Result<()> {
        self.client
            .post(self.url(&format!("/agents/{agent_id}/jobs/{}/result", result.job_id)))
            .timeout(REPORT_TIMEOUT)
            .json(result)
            .send()
            .await
            .context("sending job result")?
            .error_for_status()
            .context("job result rejected by controller")?;
        Ok(())
    }
}
