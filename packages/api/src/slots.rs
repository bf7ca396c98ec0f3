//! Doctor availability, `/doctors/{doctorId}/slots`.
//!
//! Create and update bodies are [`SlotRequest`]s; build them with the slot
//! form validator so timestamps are already canonical UTC.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Slot, SlotRequest};

pub async fn list_doctor_slots(api: &ApiClient, doctor_id: &str) -> Result<Vec<Slot>, ApiError> {
    api.get_json(&["doctors", doctor_id, "slots"]).await
}

pub async fn create_doctor_slot(
    api: &ApiClient,
    doctor_id: &str,
    request: &SlotRequest,
) -> Result<Slot, ApiError> {
    api.post_json(&["doctors", doctor_id, "slots"], request).await
}

pub async fn update_doctor_slot(
    api: &ApiClient,
    doctor_id: &str,
    slot_id: &str,
    request: &SlotRequest,
) -> Result<Slot, ApiError> {
    api.put_json(&["doctors", doctor_id, "slots", slot_id], request)
        .await
}

/// Returns `true` when the server confirmed with `204 No Content`.
pub async fn delete_doctor_slot(
    api: &ApiClient,
    doctor_id: &str,
    slot_id: &str,
) -> Result<bool, ApiError> {
    api.delete(&["doctors", doctor_id, "slots", slot_id]).await
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::test_util::spawn_stub;
    use crate::ClientConfig;

    fn slot_json(id: &str, doctor_id: &str, body: &Value) -> Value {
        json!({
            "id": id,
            "doctorId": doctor_id,
            "start": body["start"],
            "end": body["end"],
            "status": "available",
            "metadata": body.get("metadata").cloned().unwrap_or(Value::Null),
        })
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/api/doctors/{doctor_id}/slots",
                get(|Path(doctor_id): Path<String>| async move {
                    Json(json!([{
                        "id": "slot-1",
                        "doctorId": doctor_id,
                        "start": "2025-09-03T09:00:00.000Z",
                        "end": "2025-09-03T10:00:00.000Z",
                        "status": "available"
                    }]))
                })
                .post(
                    |Path(doctor_id): Path<String>, Json(body): Json<Value>| async move {
                        (StatusCode::CREATED, Json(slot_json("slot-new", &doctor_id, &body)))
                    },
                ),
            )
            .route(
                "/api/doctors/{doctor_id}/slots/{slot_id}",
                put(
                    |Path((doctor_id, slot_id)): Path<(String, String)>,
                     Json(body): Json<Value>| async move {
                        Json(slot_json(&slot_id, &doctor_id, &body))
                    },
                )
                .delete(|| async { StatusCode::NO_CONTENT }),
            )
    }

    async fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::new(spawn_stub(router()).await)).unwrap()
    }

    fn request() -> SlotRequest {
        SlotRequest {
            start: "2023-01-01T10:00:00.000Z".to_string(),
            end: "2023-01-01T11:00:00.000Z".to_string(),
            metadata: Some(json!({"room": "B2"})),
        }
    }

    #[tokio::test]
    async fn test_list_slots() {
        let api = client().await;
        let slots = list_doctor_slots(&api, "doctor-123").await.unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].doctor_id.as_deref(), Some("doctor-123"));
    }

    #[tokio::test]
    async fn test_create_slot() {
        let api = client().await;
        let slot = create_doctor_slot(&api, "doctor-123", &request())
            .await
            .unwrap();
        assert_eq!(slot.id, "slot-new");
        assert_eq!(slot.start.to_rfc3339(), "2023-01-01T10:00:00+00:00");
        assert_eq!(slot.metadata.unwrap()["room"], "B2");
    }

    #[tokio::test]
    async fn test_update_slot() {
        let api = client().await;
        let slot = update_doctor_slot(&api, "doctor-123", "slot-1", &request())
            .await
            .unwrap();
        assert_eq!(slot.id, "slot-1");
        assert_eq!((slot.end - slot.start).num_minutes(), 60);
    }

    #[tokio::test]
    async fn test_delete_slot() {
        let api = client().await;
        assert!(delete_doctor_slot(&api, "doctor-123", "slot-1").await.unwrap());
    }
}
