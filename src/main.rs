//! BodyTrack - Personal Fitness Tracking Core
//!
//! Command line entry point.

use anyhow::{bail, Context};
use bodytrack::health::{HealthSync, UnavailableHealthStore};
use bodytrack::insights::{BodyMetric, ChartMetric, ChartRange};
use bodytrack::records::{ExerciseDetails, ProfilePatch, Targets};
use bodytrack::session::{RecordSession, SessionSettings};
use bodytrack::storage::config::{get_data_dir, load_config, load_config_from};
use bodytrack::storage::{AppConfig, Database};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::{Cli, Commands, ProfileCommand};

type Session = RecordSession<UnavailableHealthStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path, get_data_dir()),
        None => load_config(),
    }
    .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting BodyTrack v{}", env!("CARGO_PKG_VERSION"));

    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    let mut session = RecordSession::new(
        db,
        HealthSync::new(UnavailableHealthStore),
        SessionSettings::from_config(&config),
    );
    if let Some(day) = cli.date {
        session.select_day(day);
    }

    run(cli.command, &mut session, &config).await
}

async fn run(command: Commands, session: &mut Session, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&session.summary())?);
            } else {
                print_day(session);
            }
        }

        Commands::Body {
            weight,
            body_fat,
            waist,
            backfill,
        } => {
            if backfill && session.backfill_from_health().await {
                println!("Filled missing values from health data");
            }
            if let Some(value) = weight {
                ensure_saved(session.set_weight(value), "weight")?;
            }
            if let Some(value) = body_fat {
                ensure_saved(session.set_body_fat(value), "body fat")?;
            }
            if let Some(value) = waist {
                ensure_saved(session.set_waistline(value).await, "waistline")?;
            }
            print_day(session);
        }

        Commands::Exercise {
            exercise_type,
            minutes,
            intensity,
            calories,
            notes,
        } => {
            ensure_saved(
                session.set_exercise_duration(exercise_type, Some(minutes)),
                "exercise",
            )?;
            let details = ExerciseDetails {
                intensity,
                calories,
                notes,
            };
            if details != ExerciseDetails::default() {
                session.update_exercise_details(exercise_type, &details);
            }
            print_day(session);
        }

        Commands::Profile { command } => match command {
            ProfileCommand::Show => print_profile(session),
            ProfileCommand::Set {
                gender,
                birth_date,
                height,
                avatar,
            } => {
                let patch = ProfilePatch {
                    gender,
                    birth_date,
                    height_cm: height,
                    avatar,
                };
                if session.update_profile(&patch).is_none() {
                    bail!("profile was not saved (height must be 100-220 cm)");
                }
                print_profile(session);
            }
        },

        Commands::Targets {
            weight,
            body_fat,
            waist,
        } => {
            let targets = Targets {
                weight_kg: weight,
                body_fat_percent: body_fat,
                waistline_cm: waist,
            };
            if session.set_targets(&targets).is_none() {
                bail!("targets were not saved");
            }
            print_profile(session);
        }

        Commands::Trend { metric, days } => {
            let range =
                ChartRange::from_days(days.unwrap_or(config.trends.default_range_days));
            let metrics = match metric {
                Some(metric) => vec![metric],
                None => ChartMetric::ALL.to_vec(),
            };
            for metric in metrics {
                let points = session.chart(metric, range);
                println!("{} over the last {} days ({})", metric, range.days(), metric.unit());
                if points.is_empty() {
                    println!("  no data");
                }
                for point in points {
                    println!("  {}  {:.1}", point.day, point.value);
                }
            }
            if let Some(tip) = session.trend_tip() {
                println!("Trend: {}", tip);
            }
        }

        Commands::Streak => {
            let encouragement = session.encouragement();
            println!("Streak: {} day(s)", encouragement.streak_days);
            if let Some(message) = encouragement.message() {
                println!("{}", message);
            }
        }

        Commands::Clear { yes } => {
            if !yes {
                bail!("this deletes all body and exercise records; pass --yes to confirm");
            }
            if !session.clear_all_data() {
                bail!("failed to clear records");
            }
            println!("All body and exercise records removed");
        }
    }

    Ok(())
}

fn ensure_saved(saved: bool, what: &str) -> anyhow::Result<()> {
    if !saved {
        bail!("failed to save {}", what);
    }
    Ok(())
}

fn print_day(session: &Session) {
    println!("{}", session.selected_day());

    for metric in BodyMetric::ALL {
        let value = session.body().and_then(|b| metric.value_of(b));
        let range = session.smart_range(metric);
        match value {
            Some(value) => {
                let change = session
                    .compare_with_previous(metric)
                    .map(|c| format!(" ({:+.1})", c.change))
                    .unwrap_or_default();
                println!(
                    "  {:<10} {:.1} {}{}  [{:.0}-{:.0}]",
                    metric.to_string(),
                    value,
                    metric.unit(),
                    change,
                    range.start(),
                    range.end()
                );
            }
            None => println!(
                "  {:<10} -  [{:.0}-{:.0}]",
                metric.to_string(),
                range.start(),
                range.end()
            ),
        }
    }

    if let Some(bmi) = session.bmi() {
        println!("  BMI        {:.1} ({})", bmi.value, bmi.category);
    }

    for exercise in session.sessions() {
        if let Some(minutes) = exercise.duration_minutes {
            println!("  {:<10} {:.0} min", exercise.exercise_type.to_string(), minutes);
        }
    }

    if let Some(tip) = session.trend_tip() {
        println!("Trend: {}", tip);
    }
    if let Some(message) = session.encouragement().message() {
        println!("{}", message);
    }
}

fn print_profile(session: &Session) {
    let profile = session.profile();
    println!("Gender:     {}", profile.gender);
    println!(
        "Birth date: {} (age {})",
        profile.birth_date,
        profile.age_on(session.today())
    );
    println!("Height:     {:.0} cm", profile.height_cm);
    if let Some(avatar) = &profile.avatar {
        println!("Avatar:     {}", avatar);
    }

    let targets = profile.targets;
    let show = |value: Option<f64>, unit: &str| {
        value
            .map(|v| format!("{:.1} {}", v, unit))
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "Targets:    weight {}, body fat {}, waistline {}",
        show(targets.weight_kg, "kg"),
        show(targets.body_fat_percent, "%"),
        show(targets.waistline_cm, "cm"),
    );
}
