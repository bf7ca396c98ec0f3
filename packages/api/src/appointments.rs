//! Booking and listing appointments.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Appointment, CreateAppointment};

/// `POST /appointments`: book a slot for the signed-in patient.
pub async fn create_appointment(
    api: &ApiClient,
    request: &CreateAppointment,
) -> Result<Appointment, ApiError> {
    api.post_json(&["appointments"], request).await
}

/// `GET /appointments/my`: appointments of whoever owns the bearer token.
pub async fn list_my_appointments(api: &ApiClient) -> Result<Vec<Appointment>, ApiError> {
    api.get_json(&["appointments", "my"]).await
}

/// `GET /patients/{patientId}/appointments`
pub async fn list_patient_appointments(
    api: &ApiClient,
    patient_id: &str,
) -> Result<Vec<Appointment>, ApiError> {
    api.get_json(&["patients", patient_id, "appointments"]).await
}
