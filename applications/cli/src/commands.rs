//! Subcommand implementations
//!
//! Each command writes its human-readable output to `out` so the binary can
//! hand in stdout and tests a buffer.

use crate::config::CliConfig;
use crate::error::Result;
use soundbath_backend_client::{BackendClient, UploadAudio};
use soundbath_core::{
    AppointmentId, AppointmentStatus, ItemId, NewAppointment, PlayableItem, SoundbathError,
    SERVICE_OFFERINGS,
};
use std::io::Write;

/// List published tracks with their public URLs
pub async fn list_tracks(client: &BackendClient, out: &mut impl Write) -> Result<()> {
    let tracks = client.audio().list_audio_files().await?;
    if tracks.is_empty() {
        writeln!(out, "No tracks published yet")?;
        return Ok(());
    }

    for track in &tracks {
        let url = client.public_url(&track.locator)?;
        writeln!(
            out,
            "{}  {}  ({})",
            track.id,
            track.name,
            track.uploaded_at.format("%Y-%m-%d %H:%M")
        )?;
        if let Some(description) = track.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(out, "    {description}")?;
        }
        writeln!(out, "    {url}")?;
    }
    Ok(())
}

/// Print the public URL of one track
pub async fn track_url(client: &BackendClient, id: &ItemId, out: &mut impl Write) -> Result<()> {
    let track = find_track(client, id).await?;
    writeln!(out, "{}", client.public_url(&track.locator)?)?;
    Ok(())
}

/// Upload a local file as a new track
pub async fn upload_track(
    client: &BackendClient,
    upload: UploadAudio,
    out: &mut impl Write,
) -> Result<()> {
    let track = client.audio().upload_audio_file(&upload).await?;
    writeln!(out, "Uploaded {} as {}", track.name, track.id)?;
    Ok(())
}

/// Delete a track and its stored object
pub async fn delete_track(client: &BackendClient, id: &ItemId, out: &mut impl Write) -> Result<()> {
    let track = find_track(client, id).await?;
    client.audio().delete_audio_file(&track).await?;
    writeln!(out, "Deleted {}", track.name)?;
    Ok(())
}

/// Submit a booking request
pub async fn book(
    client: &BackendClient,
    appointment: NewAppointment,
    out: &mut impl Write,
) -> Result<()> {
    client.appointments().book_appointment(&appointment).await?;
    writeln!(
        out,
        "Booking received: {} at {}. We will contact you on WeChat to confirm.",
        appointment.service, appointment.appointment_time
    )?;
    Ok(())
}

/// List the bookable services
pub fn list_services(out: &mut impl Write) -> Result<()> {
    for (index, service) in SERVICE_OFFERINGS.iter().enumerate() {
        writeln!(out, "{}. {service}", index + 1)?;
    }
    Ok(())
}

/// List appointment requests, newest first
pub async fn list_appointments(client: &BackendClient, out: &mut impl Write) -> Result<()> {
    let appointments = client.appointments().list_appointments().await?;
    if appointments.is_empty() {
        writeln!(out, "No appointments")?;
        return Ok(());
    }

    for appointment in &appointments {
        writeln!(
            out,
            "{}  [{}]  {}  {}  {}  {}",
            appointment.id,
            appointment.status.label(),
            appointment.appointment_time,
            appointment.service,
            appointment.wechat_name,
            appointment.phone
        )?;
    }
    Ok(())
}

/// Change the status of an appointment
pub async fn set_status(
    client: &BackendClient,
    id: &AppointmentId,
    status: &str,
    out: &mut impl Write,
) -> Result<()> {
    let status: AppointmentStatus = status.parse()?;
    client
        .appointments()
        .update_appointment_status(id, status)
        .await?;
    writeln!(out, "Appointment {id} is now {}", status.label())?;
    Ok(())
}

/// Delete an appointment
pub async fn delete_appointment(
    client: &BackendClient,
    id: &AppointmentId,
    out: &mut impl Write,
) -> Result<()> {
    client.appointments().delete_appointment(id).await?;
    writeln!(out, "Deleted appointment {id}")?;
    Ok(())
}

/// Print the effective backend configuration with the key redacted
pub fn show_config(config: &CliConfig, out: &mut impl Write) -> Result<()> {
    let backend = config.backend_config();
    writeln!(out, "Backend URL:   {}", backend.url)?;
    writeln!(out, "Anon key:      {}", backend.redacted_key())?;
    writeln!(out, "Audio bucket:  {}", backend.audio_bucket)?;
    writeln!(
        out,
        "Signed in:     {}",
        if backend.access_token.is_some() { "yes" } else { "no" }
    )?;
    writeln!(out, "Log filter:    {}", config.logging.filter)?;
    Ok(())
}

async fn find_track(client: &BackendClient, id: &ItemId) -> Result<PlayableItem> {
    client
        .audio()
        .list_audio_files()
        .await?
        .into_iter()
        .find(|track| &track.id == id)
        .ok_or_else(|| SoundbathError::ItemNotFound(id.clone()).into())
}
