//! Load balancer resource shapes
//!
//! Every record here is filled in by decoding a response body. Keys the API
//! adds that are not listed are ignored. Keys it omits, or sends as `null`,
//! leave the field at its default value.

use super::nodes::Node;
use super::null_as_default;
use super::vips::Vip;
use serde::{Deserialize, Serialize};

string_vocabulary! {
    /// Network protocol the load balancer accepts
    Protocol {
        /// DNS over TCP port 53, IPv6 capable
        DNS_TCP = "DNS_TCP",
        /// DNS over UDP port 53, IPv6 capable
        DNS_UDP = "DNS_UDP",
        /// Ordered, reliable byte stream
        TCP = "TCP",
        /// TCP, tuned for clients that write first
        TCP_CLIENT_FIRST = "TCP_CLIENT_FIRST",
        /// Datagram service favouring speed over reliability
        UDP = "UDP",
        /// Media streaming built on UDP
        UDP_STREAM = "UDP_STREAM",
    }
}

impl Protocol {
    /// Half-closed connections are only offered on the TCP family
    pub fn supports_half_closed(&self) -> bool {
        *self == Protocol::TCP || *self == Protocol::TCP_CLIENT_FIRST
    }
}

string_vocabulary! {
    /// How traffic is spread across back-end nodes
    Algorithm {
        /// Node with the fewest open connections
        LEAST_CONNECTIONS = "LEAST_CONNECTIONS",
        /// Random node; the API default
        RANDOM = "RANDOM",
        /// Each node in turn
        ROUND_ROBIN = "ROUND_ROBIN",
        /// Fewest connections, scaled by node weight
        WEIGHTED_LEAST_CONNECTIONS = "WEIGHTED_LEAST_CONNECTIONS",
        /// Round robin, scaled by node weight
        WEIGHTED_ROUND_ROBIN = "WEIGHTED_ROUND_ROBIN",
    }
}

string_vocabulary! {
    /// Lifecycle state reported for a load balancer
    ///
    /// A load balancer starts in `BUILD`, settles in `ACTIVE`, passes through
    /// `PENDING_UPDATE` or `PENDING_DELETE` while a change is applied, and ends
    /// in `DELETED`. `ERROR` follows a failed provisioning step. The client
    /// only reports these states; it does not check transitions.
    Status {
        /// Configured and serving traffic
        ACTIVE = "ACTIVE",
        /// Being provisioned for the first time
        BUILD = "BUILD",
        /// Online, applying a configuration change
        PENDING_UPDATE = "PENDING_UPDATE",
        /// Online, being torn down
        PENDING_DELETE = "PENDING_DELETE",
        /// Taken offline and disabled
        SUSPENDED = "SUSPENDED",
        /// Configuration failed
        ERROR = "ERROR",
        /// Removed
        DELETED = "DELETED",
    }
}

impl Status {
    /// Whether a change is still being applied. Covers `BUILD` as well as the
    /// `PENDING_*` states.
    pub fn is_transient(&self) -> bool {
        *self == Status::BUILD || *self == Status::PENDING_UPDATE || *self == Status::PENDING_DELETE
    }

    /// Whether no further transition can happen
    pub fn is_terminal(&self) -> bool {
        *self == Status::DELETED
    }
}

/// Wrapper around a timestamp string. The provider's format is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Datetime {
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
}

/// A load balancer API resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadBalancer {
    /// Unique ID within the account
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,

    /// Human-readable name, not unique
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Service protocol being balanced
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: Protocol,

    /// Traffic distribution algorithm. Empty when the response omits it;
    /// the API itself applies `RANDOM` in that case.
    #[serde(deserialize_with = "null_as_default")]
    pub algorithm: Algorithm,

    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,

    /// Number of back-end nodes
    #[serde(deserialize_with = "null_as_default")]
    pub node_count: i64,

    /// Virtual IPs clients connect through
    #[serde(rename = "virtualIps", deserialize_with = "null_as_default")]
    pub vips: Vec<Vip>,

    #[serde(deserialize_with = "null_as_default")]
    pub created: Datetime,

    #[serde(deserialize_with = "null_as_default")]
    pub updated: Datetime,

    /// Port of the balanced service
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,

    /// Lets one side of a connection finish sending while still receiving.
    /// Only valid for TCP and TCP_CLIENT_FIRST.
    #[serde(deserialize_with = "null_as_default")]
    pub half_closed: bool,

    /// Seconds before an idle node connection is dropped. API default 30,
    /// maximum 120.
    #[serde(deserialize_with = "null_as_default")]
    pub timeout: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub cluster: Cluster,

    /// Back-end nodes receiving traffic
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<Node>,

    #[serde(deserialize_with = "null_as_default")]
    pub connection_logging: ConnectionLogging,

    /// Whether repeated requests from one client stick to one node
    #[serde(deserialize_with = "null_as_default")]
    pub session_persistence: SessionPersistence,

    /// Per-IP connection limits
    #[serde(deserialize_with = "null_as_default")]
    pub connection_throttle: ConnectionThrottle,

    /// Addresses the load balancer connects to nodes from
    #[serde(rename = "sourceAddresses", deserialize_with = "null_as_default")]
    pub source_addrs: SourceAddrs,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceAddrs {
    #[serde(rename = "ipv4Public", deserialize_with = "null_as_default")]
    pub ipv4_public: String,
    #[serde(rename = "ipv4Servicenet", deserialize_with = "null_as_default")]
    pub ipv4_private: String,
    #[serde(rename = "ipv6Public", deserialize_with = "null_as_default")]
    pub ipv6_public: String,
    #[serde(rename = "ipv6Servicenet", deserialize_with = "null_as_default")]
    pub ipv6_private: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPersistence {
    /// e.g. `HTTP_COOKIE` or `SOURCE_IP`
    #[serde(rename = "persistenceType", deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionThrottle {
    #[serde(rename = "minConnections", deserialize_with = "null_as_default")]
    pub min_conns: i64,
    #[serde(rename = "maxConnections", deserialize_with = "null_as_default")]
    pub max_conns: i64,
    #[serde(rename = "maxConnectionRate", deserialize_with = "null_as_default")]
    pub max_conn_rate: i64,
    /// Seconds over which `max_conn_rate` is measured
    #[serde(rename = "rateInterval", deserialize_with = "null_as_default")]
    pub rate_interval: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionLogging {
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}
