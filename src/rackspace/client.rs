//! Cloud Load Balancers client
//!
//! Combines the HTTP client with an endpoint and token. Every call returns a
//! result object; failures are stored in it rather than raised, so callers
//! handle transport and decode errors in one place when they extract.

use super::http::LbHttpClient;
use crate::error::{LbError, Result};
use crate::lb::{
    CreateOpts, CreateResult, DeleteResult, GetResult, LbPage, ListOpts, LoadBalancer,
    UpdateOpts, UpdateResult,
};
use crate::pagination::Pager;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Boxed future returned by the pager's fetch function
pub type PageFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// Pager over the load balancers of an account
pub type LbPager = Pager<LbPage, Box<dyn FnMut(Url) -> PageFuture + Send>>;

/// Build the regional endpoint for an account
pub fn regional_endpoint(region: &str, tenant_id: &str) -> Result<Url> {
    let raw = format!(
        "https://{}.loadbalancers.api.rackspacecloud.com/v1.0/{}/",
        region.to_lowercase(),
        tenant_id
    );
    Url::parse(&raw).map_err(|e| LbError::InvalidOptions(format!("endpoint {}: {}", raw, e)))
}

/// Main load balancer client
#[derive(Clone)]
pub struct LbClient {
    pub http: LbHttpClient,
    endpoint: Url,
    token: String,
}

impl LbClient {
    /// Create a client for an endpoint such as
    /// `https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123456/`
    pub fn new(endpoint: Url, token: &str) -> Result<Self> {
        Ok(Self {
            http: LbHttpClient::new()?,
            endpoint: with_trailing_slash(endpoint),
            token: token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a URL below the endpoint
    pub fn url(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| LbError::InvalidOptions(format!("path {}: {}", path, e)))
    }

    fn lb_url(&self, id: i64) -> Result<Url> {
        self.url(&format!("loadbalancers/{}", id))
    }

    /// Fetch one load balancer
    pub async fn get(&self, id: i64) -> GetResult {
        let response = match self.lb_url(id) {
            Ok(url) => self.http.get(url.as_str(), &self.token).await,
            Err(e) => Err(e),
        };
        GetResult::from(response)
    }

    /// Create a load balancer. The returned record is usually in `BUILD`.
    pub async fn create(&self, opts: &CreateOpts) -> CreateResult {
        let response = match (self.url("loadbalancers"), opts.to_body()) {
            (Ok(url), Ok(body)) => self.http.post(url.as_str(), &self.token, &body).await,
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        CreateResult::from(response)
    }

    /// Change the top-level attributes of a load balancer
    pub async fn update(&self, id: i64, opts: &UpdateOpts) -> UpdateResult {
        let response = match (self.lb_url(id), opts.to_body()) {
            (Ok(url), Ok(body)) => self.http.put(url.as_str(), &self.token, &body).await,
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        UpdateResult::from(response)
    }

    /// Delete a load balancer
    pub async fn delete(&self, id: i64) -> DeleteResult {
        let response = match self.lb_url(id) {
            Ok(url) => self.http.delete(url.as_str(), &self.token).await,
            Err(e) => Err(e),
        };
        DeleteResult::from(response)
    }

    /// Pager over the account's load balancers, starting from `opts`
    pub fn list(&self, opts: &ListOpts) -> Result<LbPager> {
        let mut url = self.url("loadbalancers")?;
        {
            let query = opts.to_query();
            if !query.is_empty() {
                url.query_pairs_mut().extend_pairs(query);
            }
        }

        let http = self.http.clone();
        let token = self.token.clone();
        let fetch: Box<dyn FnMut(Url) -> PageFuture + Send> = Box::new(move |url: Url| -> PageFuture {
            let http = http.clone();
            let token = token.clone();
            Box::pin(async move { http.get(url.as_str(), &token).await })
        });

        Ok(Pager::new(url, LbPage::new, fetch))
    }

    /// Every load balancer in the account, across all pages
    pub async fn list_all(&self, opts: &ListOpts) -> Result<Vec<LoadBalancer>> {
        let mut all = Vec::new();
        self.list(opts)?
            .each_page(|page| {
                all.extend(page.extract_lbs()?);
                Ok(true)
            })
            .await?;

        tracing::debug!("Listed {} load balancers", all.len());
        Ok(all)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
