//! Appointment and doctor endpoints

use super::{ClientError, ClinicClient};
use crate::types::{Appointment, AppointmentCreate, AppointmentUpdate, DetailResponse};
use reqwest::Method;

impl ClinicClient {
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        let req = self.request(Method::GET, "/appointments/");
        self.execute(req).await
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment, ClientError> {
        let req = self.request(Method::GET, &format!("/appointments/{id}"));
        self.execute(req).await
    }

    /// Book a slot; the backend assigns the time inside it
    pub async fn create_appointment(
        &self,
        appointment: AppointmentCreate,
    ) -> Result<Appointment, ClientError> {
        let req = self
            .request(Method::POST, "/appointments/")
            .json(&appointment);
        self.execute(req).await
    }

    pub async fn update_appointment(
        &self,
        id: i64,
        update: AppointmentUpdate,
    ) -> Result<Appointment, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/appointments/{id}"))
            .json(&update);
        self.execute(req).await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<DetailResponse, ClientError> {
        let req = self.request(Method::DELETE, &format!("/appointments/{id}"));
        self.execute(req).await
    }

    /// Names of the doctors that can be booked
    pub async fn list_doctors(&self) -> Result<Vec<String>, ClientError> {
        let req = self.request(Method::GET, "/doctors/");
        self.execute(req).await
    }
}
