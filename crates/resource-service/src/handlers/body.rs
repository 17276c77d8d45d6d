//! Decoding of path parameters and JSON request bodies.

use crate::errors::ServiceError;
use crate::model::{Payload, ResourceId, ResourceKind};
use crate::router::PathParams;
use serde::Deserialize;
use serde_json::Value;

/// An id as it appears in a body: a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(u64),
    Text(String),
}

impl IdValue {
    fn parse(self) -> Result<Vec<ResourceId>, ServiceError> {
        match self {
            IdValue::Number(id) => Ok(vec![ResourceId(id)]),
            IdValue::Text(text) => text
                .split(',')
                .map(|part| {
                    part.parse::<ResourceId>()
                        .map_err(|_| ServiceError::InvalidPayload(format!("'{}' is not an id", part.trim())))
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoveBody {
    One { id: IdValue },
    Many { ids: Vec<IdValue> },
    Bare(IdValue),
}

#[derive(Debug, Deserialize)]
struct EditBody {
    id: IdValue,
    payload: Payload,
}

fn parse_json<T: for<'de> Deserialize<'de>>(body: &[u8], expected: &str) -> Result<T, ServiceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::InvalidPayload("empty body".to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ServiceError::InvalidPayload(format!("expected {expected}: {e}")))
}

/// Create body: any JSON object.
pub fn parse_payload(body: &[u8]) -> Result<Payload, ServiceError> {
    match parse_json::<Value>(body, "a JSON object")? {
        Value::Object(payload) => Ok(payload),
        _ => Err(ServiceError::InvalidPayload(
            "expected a JSON object".to_string(),
        )),
    }
}

/// Edit body: `{"id": n, "payload": {...}}`.
pub fn parse_edit(body: &[u8]) -> Result<(ResourceId, Payload), ServiceError> {
    let edit: EditBody = parse_json(body, r#"{"id": n, "payload": {...}}"#)?;
    match edit.id.parse()?.as_slice() {
        [id] => Ok((*id, edit.payload)),
        _ => Err(ServiceError::InvalidPayload(
            "edit takes exactly one id".to_string(),
        )),
    }
}

/// Remove body: `{"id": n}`, `{"ids": [..]}`, a bare number, or `"1,2,3"`.
pub fn parse_remove(body: &[u8]) -> Result<Vec<ResourceId>, ServiceError> {
    let remove: RemoveBody = parse_json(body, "an id, a list of ids or {\"ids\": [..]}")?;
    let ids = match remove {
        RemoveBody::One { id } | RemoveBody::Bare(id) => id.parse()?,
        RemoveBody::Many { ids } => {
            let mut all = Vec::with_capacity(ids.len());
            for id in ids {
                all.extend(id.parse()?);
            }
            all
        }
    };
    if ids.is_empty() {
        return Err(ServiceError::InvalidPayload("no ids to remove".to_string()));
    }
    Ok(ids)
}

/// The `{id}` path parameter. An id that cannot exist is reported as not found.
pub fn path_id(kind: ResourceKind, params: &PathParams) -> Result<ResourceId, ServiceError> {
    let raw = params.get("id").unwrap_or_default();
    raw.parse().map_err(|_| ServiceError::ResourceNotFound {
        kind,
        id: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u64]) -> Vec<ResourceId> {
        values.iter().copied().map(ResourceId).collect()
    }

    #[test]
    fn payload_must_be_an_object() {
        let payload = parse_payload(br#"{"sku": "A-1", "qty": 3}"#).unwrap();
        assert_eq!(payload["qty"], 3);

        for bad in [&b""[..], b"  ", b"[1]", b"42", b"{oops"] {
            assert!(matches!(
                parse_payload(bad),
                Err(ServiceError::InvalidPayload(_))
            ));
        }
    }

    #[test]
    fn edit_accepts_numeric_string_ids() {
        let (id, payload) = parse_edit(br#"{"id": "5", "payload": {"name": "x"}}"#).unwrap();
        assert_eq!(id, ResourceId(5));
        assert_eq!(payload["name"], "x");

        assert!(parse_edit(br#"{"id": 5}"#).is_err());
        assert!(parse_edit(br#"{"id": "1,2", "payload": {}}"#).is_err());
    }

    #[test]
    fn remove_body_forms() {
        assert_eq!(parse_remove(br#"{"id": 3}"#).unwrap(), ids(&[3]));
        assert_eq!(parse_remove(br#"{"id": "3"}"#).unwrap(), ids(&[3]));
        assert_eq!(parse_remove(br#"{"ids": [1, "2"]}"#).unwrap(), ids(&[1, 2]));
        assert_eq!(parse_remove(b"7").unwrap(), ids(&[7]));
        assert_eq!(parse_remove(br#""1, 2,3""#).unwrap(), ids(&[1, 2, 3]));
    }

    #[test]
    fn remove_rejects_garbage() {
        for bad in [&br#"{"ids": []}"#[..], br#""a,b""#, br#"{"name": 1}"#, b"-1", b""] {
            assert!(
                matches!(parse_remove(bad), Err(ServiceError::InvalidPayload(_))),
                "{}",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn non_numeric_path_id_is_not_found() {
        let router = {
            let mut router = crate::router::Router::new();
            router.register(http::Method::GET, "/orders/{id}", None, ()).unwrap();
            router
        };
        let params = router.resolve(&http::Method::GET, "/orders/abc").unwrap().params;
        assert_eq!(
            path_id(ResourceKind::Order, &params),
            Err(ServiceError::ResourceNotFound {
                kind: ResourceKind::Order,
                id: "abc".to_string()
            })
        );
    }
}
