/// Soundbath - command-line front end for the sound healing site backend
use clap::{Parser, Subcommand};
use soundbath_backend_client::{BackendClient, UploadAudio};
use soundbath_cli::{commands, CliConfig};
use soundbath_core::{AppointmentId, ItemId, NewAppointment};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundbath")]
#[command(about = "Browse healing tracks and manage sound bath bookings", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./soundbath.toml when present)
    #[arg(short, long, global = true, env = "SOUNDBATH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published tracks
    Tracks,
    /// Print the public URL of a track
    Url {
        /// Track id
        id: String,
    },
    /// Upload an audio file as a new track (admin)
    Upload {
        /// Audio file to upload
        file: PathBuf,
        /// Display name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a track and its audio object (admin)
    DeleteTrack {
        /// Track id
        id: String,
    },
    /// Book a session
    Book {
        /// WeChat name
        #[arg(long)]
        wechat_name: String,
        /// Contact phone number
        #[arg(long)]
        phone: String,
        /// Service (see `soundbath services`)
        #[arg(long)]
        service: String,
        /// Requested time, e.g. 2026-11-02T19:30
        #[arg(long)]
        time: String,
    },
    /// List bookable services
    Services,
    /// List appointment requests (admin)
    Appointments,
    /// Change an appointment's status (admin)
    SetStatus {
        /// Appointment id
        id: String,
        /// pending, confirmed, cancelled or completed
        status: String,
    },
    /// Delete an appointment (admin)
    DeleteAppointment {
        /// Appointment id
        id: String,
    },
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Services => return Ok(commands::list_services(&mut out)?),
        Commands::Config => return Ok(commands::show_config(&config, &mut out)?),
        _ => {}
    }

    config.validate()?;
    let client = BackendClient::new(config.backend_config())?;
    tracing::debug!(url = %client.url(), "Using backend");

    match cli.command {
        Commands::Tracks => commands::list_tracks(&client, &mut out).await?,
        Commands::Url { id } => commands::track_url(&client, &ItemId::new(id), &mut out).await?,
        Commands::Upload {
            file,
            name,
            description,
        } => {
            let upload = UploadAudio {
                file_path: file,
                name,
                description,
            };
            commands::upload_track(&client, upload, &mut out).await?;
        }
        Commands::DeleteTrack { id } => {
            commands::delete_track(&client, &ItemId::new(id), &mut out).await?;
        }
        Commands::Book {
            wechat_name,
            phone,
            service,
            time,
        } => {
            let appointment = NewAppointment::new(wechat_name, phone, service, time);
            commands::book(&client, appointment, &mut out).await?;
        }
        Commands::Appointments => commands::list_appointments(&client, &mut out).await?,
        Commands::SetStatus { id, status } => {
            commands::set_status(&client, &AppointmentId::new(id), &status, &mut out).await?;
        }
        Commands::DeleteAppointment { id } => {
            commands::delete_appointment(&client, &AppointmentId::new(id), &mut out).await?;
        }
        Commands::Services | Commands::Config => {}
    }

    Ok(())
}
