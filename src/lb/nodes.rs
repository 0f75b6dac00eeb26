//! Back-end nodes
//!
//! A node is a server registered with a load balancer to receive traffic.

use super::{is_zero, null_as_default};
use serde::{Deserialize, Serialize};

string_vocabulary! {
    /// Whether a node takes part in balancing
    Condition {
        /// Accepting new connections
        ENABLED = "ENABLED",
        /// Not accepting connections
        DISABLED = "DISABLED",
        /// Finishing existing connections, no new ones
        DRAINING = "DRAINING",
    }
}

string_vocabulary! {
    /// Health reported for a node
    NodeStatus {
        ONLINE = "ONLINE",
        OFFLINE = "OFFLINE",
        ERROR = "ERROR",
    }
}

string_vocabulary! {
    /// Role of a node
    NodeType {
        /// Receives traffic normally
        PRIMARY = "PRIMARY",
        /// Receives traffic only when every primary node is down
        SECONDARY = "SECONDARY",
    }
}

/// A back-end node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: i64,

    /// IP address or domain name of the node
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,

    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,

    #[serde(skip_serializing_if = "NodeStatus::is_empty", deserialize_with = "null_as_default")]
    pub status: NodeStatus,

    #[serde(skip_serializing_if = "Condition::is_empty", deserialize_with = "null_as_default")]
    pub condition: Condition,

    /// Share of traffic under the weighted algorithms
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub weight: i64,

    #[serde(
        rename = "type",
        skip_serializing_if = "NodeType::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub kind: NodeType,
}

impl Node {
    /// A node to register, enabled on the given address and port
    pub fn new(address: impl Into<String>, port: i64) -> Self {
        Self {
            address: address.into(),
            port,
            condition: Condition::ENABLED,
            ..Self::default()
        }
    }
}
