/// Subcommand tests against a mock backend
/// Tests command output and the requests each command issues
use serde_json::json;
use soundbath_backend_client::{BackendClient, BackendConfig};
use soundbath_cli::{commands, CliError};
use soundbath_core::{AppointmentId, ItemId, NewAppointment, SoundbathError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BackendClient {
    BackendClient::new(BackendConfig::new(server.uri(), "anon").with_session("jwt", None)).unwrap()
}

async fn mount_tracks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/audio_files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "t2",
                "name": "Crystal Bowl",
                "description": "Bright and clear",
                "storage_path": "audio/2-b.mp3",
                "uploaded_by": null,
                "uploaded_at": "2026-10-02T10:00:00Z"
            },
            {
                "id": "t1",
                "name": "Gong",
                "description": null,
                "storage_path": "audio/1-a.mp3",
                "uploaded_by": null,
                "uploaded_at": "2026-10-01T10:00:00Z"
            }
        ])))
        .mount(server)
        .await;
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

/// Test the track listing shows names, descriptions and URLs
#[tokio::test]
async fn test_list_tracks() {
    let server = MockServer::start().await;
    mount_tracks(&server).await;

    let mut out = Vec::new();
    commands::list_tracks(&client(&server), &mut out).await.unwrap();
    let out = output(out);

    let crystal = out.find("Crystal Bowl").unwrap();
    let gong = out.find("Gong").unwrap();
    assert!(crystal < gong, "listing keeps backend order");
    assert!(out.contains("Bright and clear"));
    assert!(out.contains(&format!(
        "{}/storage/v1/object/public/audio-files/audio/1-a.mp3",
        server.uri()
    )));
}

/// Test an empty catalog is reported plainly
#[tokio::test]
async fn test_list_tracks_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/audio_files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::list_tracks(&client(&server), &mut out).await.unwrap();
    assert_eq!(output(out), "No tracks published yet\n");
}

/// Test the url command resolves a known track
#[tokio::test]
async fn test_track_url() {
    let server = MockServer::start().await;
    mount_tracks(&server).await;

    let mut out = Vec::new();
    commands::track_url(&client(&server), &ItemId::new("t2"), &mut out)
        .await
        .unwrap();
    assert_eq!(
        output(out).trim(),
        format!("{}/storage/v1/object/public/audio-files/audio/2-b.mp3", server.uri())
    );
}

/// Test unknown track ids are reported as not found
#[tokio::test]
async fn test_track_url_unknown() {
    let server = MockServer::start().await;
    mount_tracks(&server).await;

    let mut out = Vec::new();
    let err = commands::track_url(&client(&server), &ItemId::new("missing"), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CliError::Domain(SoundbathError::ItemNotFound(_))
    ));
}

/// Test deleting a track looks up its storage path first
#[tokio::test]
async fn test_delete_track() {
    let server = MockServer::start().await;
    mount_tracks(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/audio_files"))
        .and(query_param("id", "eq.t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/audio-files"))
        .and(body_json(json!({ "prefixes": ["audio/1-a.mp3"] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::delete_track(&client(&server), &ItemId::new("t1"), &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Deleted Gong\n");
}

/// Test booking confirms the request
#[tokio::test]
async fn test_book() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let appointment = NewAppointment::new(
        "moon",
        "+86 138-0000-0000",
        "Group sound healing",
        "2026-11-02T19:30",
    );
    let mut out = Vec::new();
    commands::book(&client(&server), appointment, &mut out)
        .await
        .unwrap();
    assert!(output(out).contains("Group sound healing at 2026-11-02T19:30"));
}

/// Test the services listing is numbered
#[test]
fn test_list_services() {
    let mut out = Vec::new();
    commands::list_services(&mut out).unwrap();
    let out = output(out);

    assert_eq!(out.lines().count(), 5);
    assert!(out.starts_with("1. "));
}

/// Test appointments show status labels
#[tokio::test]
async fn test_list_appointments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "a1",
            "wechat_name": "moon",
            "phone": "13800000000",
            "service": "90-minute deep healing",
            "appointment_time": "2026-11-02T19:30",
            "status": "pending",
            "created_at": "2026-10-18T09:00:00Z"
        }])))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::list_appointments(&client(&server), &mut out)
        .await
        .unwrap();
    let out = output(out);

    assert!(out.contains("a1"));
    assert!(out.contains("[Awaiting confirmation]"));
    assert!(out.contains("90-minute deep healing"));
}

/// Test status changes parse the status name
#[tokio::test]
async fn test_set_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.a1"))
        .and(body_json(json!({ "status": "cancelled" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::set_status(&client(&server), &AppointmentId::new("a1"), "Canceled", &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Appointment a1 is now Cancelled\n");
}

/// Test unknown status names are rejected before any request
#[tokio::test]
async fn test_set_status_unknown() {
    let server = MockServer::start().await;

    let mut out = Vec::new();
    let err = commands::set_status(&client(&server), &AppointmentId::new("a1"), "done", &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CliError::Domain(SoundbathError::InvalidInput(_))
    ));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

/// Test deleting an appointment
#[tokio::test]
async fn test_delete_appointment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::delete_appointment(&client(&server), &AppointmentId::new("a1"), &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Deleted appointment a1\n");
}
