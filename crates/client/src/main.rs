use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::{
    api::DEFAULT_API_URL,
    geocode::NOMINATIM_URL,
    map::map_view,
    ApiClient, Complex, ComplexSubmission, Geocoder,
};

#[derive(Parser)]
#[command(name = "tenko", about = "Find, share and book free tennis courts")]
struct Cli {
    /// Base URL of the API service
    #[arg(long, env = "TENKO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List validated complexes with their courts
    List,
    /// Show where the map would be centred and which markers it would show
    Map,
    /// Submit a new complex for moderation
    Add(AddArgs),
    /// Flip a court between free and occupied
    Toggle { terrain_id: i64 },
    /// Moderation commands, require the admin password
    Admin {
        #[arg(long, env = "TENKO_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long, default_value = "")]
    surface: String,
    #[arg(long, default_value_t = 1)]
    courts: u32,
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
    #[arg(long)]
    photo: Option<PathBuf>,
    #[arg(long, env = "NOMINATIM_URL", default_value = NOMINATIM_URL)]
    nominatim_url: String,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List every complex, validated or not
    List,
    Validate { id: i64 },
    /// Edit a complex; omitted fields keep their current value
    Edit(EditArgs),
    Delete { id: i64 },
    EditTerrain {
        id: i64,
        #[arg(long)]
        number: u32,
    },
    DeleteTerrain { id: i64 },
}

#[derive(Args)]
struct EditArgs {
    id: i64,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    surface: Option<String>,
    #[arg(long)]
    courts: Option<u32>,
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,
    #[arg(long)]
    photo: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut api = ApiClient::new(cli.api_url);

    match cli.command {
        Command::List => print_complexes(&api.list_complexes().await?),
        Command::Map => {
            let view = map_view(&api.list_complexes().await?);
            println!(
                "center {:.6},{:.6} zoom {}",
                view.center.0, view.center.1, view.zoom
            );
            for marker in view.markers {
                println!(
                    "  #{} {} @ {:.6},{:.6}",
                    marker.complex_id, marker.label, marker.lat, marker.lng
                );
            }
        }
        Command::Add(args) => {
            let submission = prepare_submission(args).await?;
            let id = api.submit_complex(&submission).await?;
            println!("submitted complex #{id}, it will be listed once validated");
            print_complexes(&api.list_complexes().await?);
        }
        Command::Toggle { terrain_id } => {
            let occupied = api.toggle_occupation(terrain_id).await?;
            println!(
                "court #{terrain_id} is now {}",
                if occupied { "occupied" } else { "free" }
            );
            print_complexes(&api.list_complexes().await?);
        }
        Command::Admin { password, command } => {
            api.login(&password).await.context("admin login failed")?;
            run_admin(&api, command).await?;
            print_complexes(&api.list_all_complexes().await?);
        }
    }

    Ok(())
}

async fn run_admin(api: &ApiClient, command: AdminCommand) -> anyhow::Result<()> {
    match command {
        AdminCommand::List => {}
        AdminCommand::Validate { id } => api.validate_complex(id).await?,
        AdminCommand::Edit(args) => {
            let current = api
                .list_all_complexes()
                .await?
                .into_iter()
                .find(|c| c.id == args.id)
                .with_context(|| format!("complex #{} not found", args.id))?;

            let mut submission = ComplexSubmission::from_complex(&current);
            if let Some(name) = args.name {
                submission.name = name;
            }
            if let Some(address) = args.address {
                submission.address = address;
            }
            if let Some(surface) = args.surface {
                submission.surface = surface;
            }
            if let Some(courts) = args.courts {
                submission.court_count = courts;
            }
            submission.lat = args.lat.or(submission.lat);
            submission.lng = args.lng.or(submission.lng);
            submission.photo = args.photo;

            api.update_complex(args.id, &submission).await?;
        }
        AdminCommand::Delete { id } => api.delete_complex(id).await?,
        AdminCommand::EditTerrain { id, number } => api.update_terrain(id, number).await?,
        AdminCommand::DeleteTerrain { id } => api.delete_terrain(id).await?,
    }
    Ok(())
}

/// Build the submission, geocoding the address when no coordinates were given.
async fn prepare_submission(args: AddArgs) -> anyhow::Result<ComplexSubmission> {
    let mut submission = ComplexSubmission {
        name: args.name,
        address: args.address,
        surface: args.surface,
        court_count: args.courts,
        lat: args.lat,
        lng: args.lng,
        photo: args.photo,
    };

    if !submission.has_coordinates() {
        let geocoder = Geocoder::new(args.nominatim_url)?;
        match geocoder.lookup(&submission.address).await? {
            Some(found) => {
                println!("located {:?} at {:.6},{:.6}", submission.address, found.lat, found.lng);
                submission.lat = Some(found.lat);
                submission.lng = Some(found.lng);
            }
            None => bail!("address not found: {:?}", submission.address),
        }
    }

    Ok(submission)
}

fn print_complexes(complexes: &[Complex]) {
    if complexes.is_empty() {
        println!("no complexes");
        return;
    }

    for complex in complexes {
        let status = if complex.validated { "" } else { " [pending]" };
        println!(
            "#{} {}{} - {} ({}), {}/{} courts free",
            complex.id,
            complex.display_name(),
            status,
            complex.address.as_deref().unwrap_or("-"),
            complex.surface.as_deref().unwrap_or("-"),
            complex.free_courts(),
            complex.terrains.len(),
        );
        for terrain in &complex.terrains {
            println!(
                "    court {} (#{}): {} since {}",
                terrain.number,
                terrain.id,
                if terrain.occupied { "occupied" } else { "free" },
                terrain.updated_at.format("%Y-%m-%d %H:%M"),
            );
        }
    }
}
