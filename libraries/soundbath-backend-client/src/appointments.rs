//! Appointment booking and management.

use crate::client::BackendClient;
use crate::error::Result;
use crate::types::StatusUpdate;
use reqwest::Method;
use soundbath_core::{Appointment, AppointmentId, AppointmentStatus, NewAppointment};
use tracing::{debug, info};

const APPOINTMENTS: &str = "/rest/v1/appointments";

/// Appointment client for the hosted backend.
pub struct AppointmentClient<'a> {
    client: &'a BackendClient,
}

impl<'a> AppointmentClient<'a> {
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        Self { client }
    }

    /// Submit a booking request.
    ///
    /// The form is validated locally first; the request is stored as
    /// `pending` whatever status the caller set.
    pub async fn book_appointment(&self, appointment: &NewAppointment) -> Result<()> {
        appointment.validate()?;

        let body = NewAppointment {
            status: AppointmentStatus::Pending,
            ..appointment.clone()
        };
        let request = self.client.request(Method::POST, APPOINTMENTS).json(&body);
        self.client.send(request).await?;

        info!(
            service = %body.service,
            appointment_time = %body.appointment_time,
            "Appointment booked"
        );
        Ok(())
    }

    /// All appointment requests, most recently submitted first (admin).
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.client.require_token()?;

        let request = self.client.request(
            Method::GET,
            &format!("{APPOINTMENTS}?select=*&order=created_at.desc"),
        );
        let response = self.client.send(request).await?;
        let appointments: Vec<Appointment> =
            BackendClient::json(response, "appointments").await?;

        debug!(count = appointments.len(), "Fetched appointments");
        Ok(appointments)
    }

    /// Change the status of an appointment (admin).
    pub async fn update_appointment_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<()> {
        self.client.require_token()?;

        let request = self
            .client
            .request(Method::PATCH, APPOINTMENTS)
            .query(&[("id", format!("eq.{id}"))])
            .json(&StatusUpdate { status });
        self.client.send(request).await?;

        info!(appointment_id = %id, status = %status, "Appointment status updated");
        Ok(())
    }

    /// Delete an appointment (admin).
    pub async fn delete_appointment(&self, id: &AppointmentId) -> Result<()> {
        self.client.require_token()?;

        let request = self
            .client
            .request(Method::DELETE, APPOINTMENTS)
            .query(&[("id", format!("eq.{id}"))]);
        self.client.send(request).await?;

        info!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }
}
