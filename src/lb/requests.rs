//! Request bodies for create, update and list calls

use super::nodes::Node;
use super::types::{
    Algorithm, ConnectionLogging, ConnectionThrottle, Protocol, SessionPersistence,
};
use super::vips::Vip;
use crate::error::{LbError, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Longest node timeout the API accepts, in seconds
pub const MAX_TIMEOUT: i64 = 120;

/// Filters and paging parameters for a list call
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    /// Only load balancers with a node at this address
    pub node_address: Option<String>,
    /// ID of the last load balancer on the previous page
    pub marker: Option<i64>,
    /// Page size
    pub limit: Option<u32>,
}

impl ListOpts {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(address) = &self.node_address {
            query.push(("nodeaddress", address.clone()));
        }
        if let Some(marker) = self.marker {
            query.push(("marker", marker.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

/// Body of a create call
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpts {
    pub name: String,

    pub port: i64,

    pub protocol: Protocol,

    /// New or shared virtual IPs; at least one is required
    #[serde(rename = "virtualIps")]
    pub vips: Vec<Vip>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_closed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_logging: Option<ConnectionLogging>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<SessionPersistence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_throttle: Option<ConnectionThrottle>,
}

impl CreateOpts {
    /// Check the options and wrap them in the `loadBalancer` envelope
    pub fn to_body(&self) -> Result<Value> {
        if self.name.trim().is_empty() {
            return Err(LbError::InvalidOptions("name is required".to_string()));
        }
        if self.port <= 0 {
            return Err(LbError::InvalidOptions("port is required".to_string()));
        }
        if self.protocol.is_empty() {
            return Err(LbError::InvalidOptions("protocol is required".to_string()));
        }
        if self.vips.is_empty() {
            return Err(LbError::InvalidOptions(
                "at least one virtual IP is required".to_string(),
            ));
        }
        check_timeout(self.timeout)?;
        check_half_closed(self.half_closed, Some(&self.protocol))?;

        let lb = serde_json::to_value(self).map_err(|e| LbError::InvalidOptions(e.to_string()))?;
        Ok(json!({ "loadBalancer": lb }))
    }
}

/// Body of an update call. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_closed: Option<bool>,
}

impl UpdateOpts {
    pub fn to_body(&self) -> Result<Value> {
        if self.name.is_none()
            && self.algorithm.is_none()
            && self.protocol.is_none()
            && self.port.is_none()
            && self.timeout.is_none()
            && self.half_closed.is_none()
        {
            return Err(LbError::InvalidOptions(
                "at least one field must be updated".to_string(),
            ));
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(LbError::InvalidOptions("name cannot be blank".to_string()));
        }
        check_timeout(self.timeout)?;
        check_half_closed(self.half_closed, self.protocol.as_ref())?;

        let lb = serde_json::to_value(self).map_err(|e| LbError::InvalidOptions(e.to_string()))?;
        Ok(json!({ "loadBalancer": lb }))
    }
}

fn check_timeout(timeout: Option<i64>) -> Result<()> {
    match timeout {
        Some(t) if !(1..=MAX_TIMEOUT).contains(&t) => Err(LbError::InvalidOptions(format!(
            "timeout must be between 1 and {} seconds",
            MAX_TIMEOUT
        ))),
        _ => Ok(()),
    }
}

// Without a protocol in the request the server checks half-closed against
// the protocol it already has.
fn check_half_closed(half_closed: Option<bool>, protocol: Option<&Protocol>) -> Result<()> {
    match (half_closed, protocol) {
        (Some(true), Some(protocol)) if !protocol.supports_half_closed() => {
            Err(LbError::InvalidOptions(format!(
                "half-closed connections are not available for {}",
                protocol
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lb::vips::VipType;

    fn valid_create() -> CreateOpts {
        CreateOpts {
            name: "web".to_string(),
            port: 80,
            protocol: Protocol::TCP,
            vips: vec![Vip::with_type(VipType::PUBLIC)],
            ..Default::default()
        }
    }

    #[test]
    fn test_create_body_omits_unset_options() {
        let body = valid_create().to_body().unwrap();
        assert_eq!(
            body,
            json!({
                "loadBalancer": {
                    "name": "web",
                    "port": 80,
                    "protocol": "TCP",
                    "virtualIps": [{"type": "PUBLIC"}]
                }
            })
        );
    }

    #[test]
    fn test_create_body_with_nodes_and_throttle() {
        let opts = CreateOpts {
            nodes: vec![Node::new("10.1.1.1", 8080)],
            algorithm: Some(Algorithm::LEAST_CONNECTIONS),
            half_closed: Some(true),
            connection_throttle: Some(ConnectionThrottle {
                max_conns: 50,
                ..Default::default()
            }),
            ..valid_create()
        };

        let body = opts.to_body().unwrap();
        let lb = &body["loadBalancer"];
        assert_eq!(lb["algorithm"], "LEAST_CONNECTIONS");
        assert_eq!(lb["halfClosed"], true);
        assert_eq!(lb["nodes"][0]["address"], "10.1.1.1");
        assert_eq!(lb["connectionThrottle"]["maxConnections"], 50);
    }

    #[test]
    fn test_create_requires_fields() {
        let missing_vips = CreateOpts {
            vips: Vec::new(),
            ..valid_create()
        };
        assert!(matches!(
            missing_vips.to_body(),
            Err(LbError::InvalidOptions(_))
        ));

        let missing_name = CreateOpts {
            name: " ".to_string(),
            ..valid_create()
        };
        assert!(missing_name.to_body().is_err());

        let missing_protocol = CreateOpts {
            protocol: Protocol::default(),
            ..valid_create()
        };
        assert!(missing_protocol.to_body().is_err());
    }

    #[test]
    fn test_timeout_limit() {
        let opts = CreateOpts {
            timeout: Some(121),
            ..valid_create()
        };
        assert!(opts.to_body().is_err());

        let opts = CreateOpts {
            timeout: Some(120),
            ..valid_create()
        };
        assert!(opts.to_body().is_ok());
    }

    #[test]
    fn test_half_closed_needs_tcp() {
        let opts = CreateOpts {
            protocol: Protocol::UDP,
            half_closed: Some(true),
            ..valid_create()
        };
        assert!(opts.to_body().is_err());

        let update = UpdateOpts {
            half_closed: Some(true),
            ..Default::default()
        };
        assert!(update.to_body().is_ok());
    }

    #[test]
    fn test_update_body() {
        assert!(UpdateOpts::default().to_body().is_err());

        let update = UpdateOpts {
            name: Some("renamed".to_string()),
            algorithm: Some(Algorithm::ROUND_ROBIN),
            ..Default::default()
        };
        assert_eq!(
            update.to_body().unwrap(),
            json!({"loadBalancer": {"name": "renamed", "algorithm": "ROUND_ROBIN"}})
        );
    }

    #[test]
    fn test_list_query() {
        let opts = ListOpts {
            node_address: Some("10.1.1.1".to_string()),
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(
            opts.to_query(),
            vec![
                ("nodeaddress", "10.1.1.1".to_string()),
                ("limit", "2".to_string())
            ]
        );
    }
}
