use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::Doctor;

/// `GET /doctors`
pub async fn list_doctors(api: &ApiClient) -> Result<Vec<Doctor>, ApiError> {
    api.get_json(&["doctors"]).await
}
