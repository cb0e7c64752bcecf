//! EC2 Query API client for elastic IP operations

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};
use url::Url;

use super::sigv4::{Credentials, RequestSigner};
use super::{AddressProvider, ElasticAddress};
use crate::config::AwsConfig;
use crate::error::{KeeperError, Result};

const API_VERSION: &str = "2016-11-15";
const CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const LIMIT_EXCEEDED_CODE: &str = "AddressLimitExceeded";

/// Elastic IP operations over the EC2 Query API
pub struct Ec2Client {
    http: reqwest::Client,
    endpoint: Url,
    signer: RequestSigner,
}

impl Ec2Client {
    /// Build a client for the configured region or endpoint
    pub fn new(config: &AwsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let credentials = Credentials {
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            session_token: config.session_token.clone(),
        };

        Ok(Self {
            http,
            endpoint: config.endpoint_url()?,
            signer: RequestSigner::new(credentials, config.region.clone(), "ec2"),
        })
    }

    /// Issue one signed action and return the response body
    async fn call(&self, action: &str, params: &[(&str, &str)]) -> Result<String> {
        let body = {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            form.append_pair("Action", action);
            form.append_pair("Version", API_VERSION);
            for (k, v) in params {
                form.append_pair(k, v);
            }
            form.finish()
        };

        let signed = self.signer.sign(
            "POST",
            &self.endpoint,
            &[("content-type", CONTENT_TYPE)],
            body.as_bytes(),
            Utc::now(),
        );

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE);
        for (name, value) in signed {
            request = request.header(name, value);
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!(action, "EC2 call succeeded");
            return Ok(text);
        }

        Err(parse_error(status, &text))
    }
}

#[async_trait]
impl AddressProvider for Ec2Client {
    #[instrument(skip(self))]
    async fn allocate_address(&self) -> Result<ElasticAddress> {
        let body = self.call("AllocateAddress", &[("Domain", "vpc")]).await?;

        Ok(ElasticAddress {
            public_ip: required_text(&body, "publicIp")?,
            allocation_id: required_text(&body, "allocationId")?,
        })
    }

    #[instrument(skip(self))]
    async fn release_address(&self, allocation_id: &str) -> Result<()> {
        self.call("ReleaseAddress", &[("AllocationId", allocation_id)])
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn associate_address(&self, allocation_id: &str, instance_id: &str) -> Result<String> {
        let body = self
            .call(
                "AssociateAddress",
                &[("AllocationId", allocation_id), ("InstanceId", instance_id)],
            )
            .await?;
        required_text(&body, "associationId")
    }

    #[instrument(skip(self))]
    async fn disassociate_address(&self, association_id: &str) -> Result<()> {
        self.call("DisassociateAddress", &[("AssociationId", association_id)])
            .await?;
        Ok(())
    }
}

/// Map an EC2 error document to a keeper error
fn parse_error(status: reqwest::StatusCode, body: &str) -> KeeperError {
    let code = xml_text(body, "Code").unwrap_or_default();
    let message = xml_text(body, "Message").unwrap_or_default();

    if code == LIMIT_EXCEEDED_CODE {
        return KeeperError::AddressLimitExceeded;
    }

    if code.is_empty() {
        KeeperError::Provider {
            code: status.as_u16().to_string(),
            message: status.canonical_reason().unwrap_or("unknown").to_string(),
        }
    } else {
        KeeperError::Provider { code, message }
    }
}

fn required_text(body: &str, tag: &str) -> Result<String> {
    xml_text(body, tag)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| KeeperError::MalformedResponse(format!("missing <{}>", tag)))
}

/// Text of the first `<tag>` element; EC2 responses are flat enough for this
fn xml_text(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = start + body[start..].find(&close)?;
    Some(unescape(body[start..end].trim()))
}

fn unescape(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
