//! Virtual IPs

use super::{is_zero, null_as_default};
use serde::{Deserialize, Serialize};

string_vocabulary! {
    /// Network a virtual IP is reachable from
    VipType {
        PUBLIC = "PUBLIC",
        SERVICENET = "SERVICENET",
    }
}

string_vocabulary! {
    IpVersion {
        IPV4 = "IPV4",
        IPV6 = "IPV6",
    }
}

/// A virtual IP associated with a load balancer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vip {
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: i64,

    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub address: String,

    #[serde(
        rename = "type",
        skip_serializing_if = "VipType::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub kind: VipType,

    #[serde(
        rename = "ipVersion",
        skip_serializing_if = "IpVersion::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub version: IpVersion,
}

impl Vip {
    /// Request a new virtual IP of the given type
    pub fn with_type(kind: VipType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Share an existing virtual IP by ID
    pub fn shared(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vip_decodes() {
        let vip: Vip = serde_json::from_value(json!({
            "address": "206.10.10.210",
            "id": 39,
            "type": "PUBLIC",
            "ipVersion": "IPV4"
        }))
        .unwrap();

        assert_eq!(vip.id, 39);
        assert_eq!(vip.kind, VipType::PUBLIC);
        assert_eq!(vip.version, IpVersion::IPV4);
    }

    #[test]
    fn test_new_vip_request_omits_unset_fields() {
        let body = serde_json::to_value(Vip::with_type(VipType::SERVICENET)).unwrap();
        assert_eq!(body, json!({"type": "SERVICENET"}));

        let body = serde_json::to_value(Vip::shared(42)).unwrap();
        assert_eq!(body, json!({"id": 42}));
    }

    #[test]
    fn test_null_vip_fields_default() {
        let vip: Vip = serde_json::from_value(json!({"id": 39, "address": null, "ipVersion": null})).unwrap();
        assert_eq!(vip.id, 39);
        assert_eq!(vip.address, "");
        assert!(vip.version.is_empty());
    }
}
