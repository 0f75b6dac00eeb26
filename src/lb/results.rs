//! Result and page wrappers
//!
//! Each API call produces one of these wrappers. They hold either the decoded
//! JSON body or the transport error that prevented one, and turn the body into
//! typed records on request.

use super::types::LoadBalancer;
use crate::error::{LbError, Result};
use crate::pagination::{LinkedPage, Page};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

#[derive(Deserialize)]
struct SingleEnvelope {
    #[serde(rename = "loadBalancer")]
    load_balancer: LoadBalancer,
}

#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(rename = "loadBalancers", default)]
    load_balancers: Option<Vec<LoadBalancer>>,
}

/// Response body of a single call, or the error that replaced it
#[derive(Debug)]
pub struct ApiResult {
    pub body: Value,
    pub err: Option<LbError>,
}

impl ApiResult {
    pub fn from_body(body: Value) -> Self {
        Self { body, err: None }
    }

    pub fn from_err(err: LbError) -> Self {
        Self {
            body: Value::Null,
            err: Some(err),
        }
    }

    /// Decode the `loadBalancer` envelope. A stored transport error is
    /// returned as is, without looking at the body.
    fn extract_lb(self) -> Result<LoadBalancer> {
        if let Some(err) = self.err {
            return Err(err);
        }

        let envelope: SingleEnvelope = serde_json::from_value(self.body)
            .map_err(|e| LbError::decode("load balancer", e))?;

        Ok(envelope.load_balancer)
    }
}

impl From<Result<Value>> for ApiResult {
    fn from(response: Result<Value>) -> Self {
        match response {
            Ok(body) => Self::from_body(body),
            Err(err) => Self::from_err(err),
        }
    }
}

/// Result of a create call
#[derive(Debug)]
pub struct CreateResult(pub ApiResult);

/// Result of a get call
#[derive(Debug)]
pub struct GetResult(pub ApiResult);

impl CreateResult {
    pub fn from_body(body: Value) -> Self {
        Self(ApiResult::from_body(body))
    }

    pub fn from_err(err: LbError) -> Self {
        Self(ApiResult::from_err(err))
    }

    /// The created load balancer
    pub fn extract(self) -> Result<LoadBalancer> {
        self.0.extract_lb()
    }
}

impl GetResult {
    pub fn from_body(body: Value) -> Self {
        Self(ApiResult::from_body(body))
    }

    pub fn from_err(err: LbError) -> Self {
        Self(ApiResult::from_err(err))
    }

    /// The requested load balancer
    pub fn extract(self) -> Result<LoadBalancer> {
        self.0.extract_lb()
    }
}

impl From<Result<Value>> for CreateResult {
    fn from(response: Result<Value>) -> Self {
        Self(response.into())
    }
}

impl From<Result<Value>> for GetResult {
    fn from(response: Result<Value>) -> Self {
        Self(response.into())
    }
}

/// Result of a call whose body carries nothing of interest
#[derive(Debug, Default)]
pub struct ErrResult {
    pub err: Option<LbError>,
}

impl ErrResult {
    /// The transport error, if the call failed
    pub fn extract_err(self) -> Result<()> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<T> From<Result<T>> for ErrResult {
    fn from(response: Result<T>) -> Self {
        Self {
            err: response.err(),
        }
    }
}

/// Result of a delete call
pub type DeleteResult = ErrResult;

/// Result of an update call
pub type UpdateResult = ErrResult;

/// A page of load balancers from a list call
#[derive(Debug, Clone)]
pub struct LbPage(pub LinkedPage);

impl LbPage {
    pub fn new(url: Url, body: Value) -> Self {
        Self(LinkedPage::new(url, body))
    }

    /// Decode the `loadBalancers` array, keeping its order. An absent or
    /// empty array gives an empty vector.
    pub fn extract_lbs(&self) -> Result<Vec<LoadBalancer>> {
        let envelope = ListEnvelope::deserialize(&self.0.body)
            .map_err(|e| LbError::decode("load balancer list", e))?;

        Ok(envelope.load_balancers.unwrap_or_default())
    }
}

impl Page for LbPage {
    /// Never fails. A page that cannot be decoded counts as empty so that a
    /// single malformed page ends paging instead of aborting it; the items on
    /// such a page are dropped.
    fn is_empty(&self) -> Result<bool> {
        match self.extract_lbs() {
            Ok(lbs) => Ok(lbs.is_empty()),
            Err(err) => {
                tracing::warn!("Treating undecodable page {} as empty: {}", self.0.url, err);
                Ok(true)
            }
        }
    }

    fn next_page_url(&self) -> Result<Option<Url>> {
        self.0.next_page_url()
    }
}

/// Decode every load balancer on a page
pub fn extract_lbs(page: &LbPage) -> Result<Vec<LoadBalancer>> {
    page.extract_lbs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lb::types::{Algorithm, Protocol, Status};
    use serde_json::json;

    fn lb_page(body: Value) -> LbPage {
        LbPage::new(
            Url::parse("https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123/loadbalancers")
                .unwrap(),
            body,
        )
    }

    #[test]
    fn test_extract_documented_example() {
        let result = GetResult::from_body(json!({
            "loadBalancer": {
                "id": 12345,
                "name": "lb-test",
                "protocol": "TCP",
                "algorithm": "RANDOM",
                "status": "ACTIVE",
                "nodeCount": 2,
                "port": 80,
                "timeout": 30
            }
        }));

        let lb = result.extract().unwrap();
        assert_eq!(lb.id, 12345);
        assert_eq!(lb.name, "lb-test");
        assert_eq!(lb.protocol, Protocol::TCP);
        assert_eq!(lb.algorithm, Algorithm::RANDOM);
        assert_eq!(lb.status, Status::ACTIVE);
        assert_eq!(lb.node_count, 2);
        assert_eq!(lb.port, 80);
        assert_eq!(lb.timeout, 30);
        assert!(lb.vips.is_empty());
        assert!(lb.nodes.is_empty());
        assert_eq!(lb.connection_throttle, Default::default());
        assert_eq!(lb.source_addrs, Default::default());
    }

    #[test]
    fn test_extract_returns_stored_error_untouched() {
        let mut result = GetResult::from_err(LbError::Api {
            status: 413,
            body: "over limit".to_string(),
        });
        // A perfectly good body must not mask the error
        result.0.body = json!({"loadBalancer": {"id": 1}});

        match result.extract() {
            Err(LbError::Api { status, body }) => {
                assert_eq!(status, 413);
                assert_eq!(body, "over limit");
            }
            other => panic!("expected the stored API error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_missing_envelope_is_decode_error() {
        let err = CreateResult::from_body(json!({"id": 1, "name": "bare"}))
            .extract()
            .unwrap_err();
        assert!(err.is_decode());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_extract_malformed_envelope_is_decode_error() {
        let err = GetResult::from_body(json!({"loadBalancer": "not an object"}))
            .extract()
            .unwrap_err();
        assert!(err.is_decode());

        let err = GetResult::from_body(Value::Null).extract().unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_extract_wrong_field_type_is_decode_error() {
        let err = GetResult::from_body(json!({"loadBalancer": {"id": "twelve"}}))
            .extract()
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_extract_ignores_unknown_fields() {
        let lb = GetResult::from_body(json!({
            "loadBalancer": {"id": 3, "httpsRedirect": true, "contentCaching": {"enabled": false}}
        }))
        .extract()
        .unwrap();
        assert_eq!(lb.id, 3);
    }

    #[test]
    fn test_extract_lbs_preserves_order() {
        let page = lb_page(json!({
            "loadBalancers": [
                {"id": 3, "name": "c"},
                {"id": 1, "name": "a"},
                {"id": 2, "name": "b"}
            ]
        }));

        let lbs = extract_lbs(&page).unwrap();
        let ids: Vec<i64> = lbs.iter().map(|lb| lb.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(lbs[0].name, "c");
        assert!(!page.is_empty().unwrap());
    }

    #[test]
    fn test_empty_or_absent_array() {
        for body in [
            json!({"loadBalancers": []}),
            json!({}),
            json!({"loadBalancers": null}),
        ] {
            let page = lb_page(body);
            assert!(extract_lbs(&page).unwrap().is_empty());
            assert!(page.is_empty().unwrap());
        }
    }

    #[test]
    fn test_malformed_page_is_empty_without_error() {
        let page = lb_page(json!({"loadBalancers": [{"id": 1}, {"id": "bad"}]}));

        assert!(extract_lbs(&page).unwrap_err().is_decode());
        assert!(page.is_empty().unwrap());
    }

    #[test]
    fn test_extract_null_fields_as_absent() {
        let lb = GetResult::from_body(json!({
            "loadBalancer": {"id": 1, "nodes": null, "connectionLogging": null, "timeout": null}
        }))
        .extract()
        .unwrap();

        assert_eq!(lb.id, 1);
        assert!(lb.nodes.is_empty());
        assert!(!lb.connection_logging.enabled);
        assert_eq!(lb.timeout, 0);
    }

    #[test]
    fn test_null_field_keeps_page() {
        let page = lb_page(json!({
            "loadBalancers": [
                {"id": 1, "name": "a"},
                {"id": 2, "name": null, "virtualIps": null}
            ]
        }));

        let lbs = extract_lbs(&page).unwrap();
        assert_eq!(lbs.len(), 2);
        assert_eq!(lbs[1].id, 2);
        assert_eq!(lbs[1].name, "");
        assert!(!page.is_empty().unwrap());
    }

    #[test]
    fn test_err_result() {
        assert!(DeleteResult::default().extract_err().is_ok());

        let result: UpdateResult = Err::<Value, _>(LbError::Api {
            status: 422,
            body: String::new(),
        })
        .into();
        assert_eq!(result.extract_err().unwrap_err().status(), Some(422));
    }
}
