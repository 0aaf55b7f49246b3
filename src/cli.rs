//! Command line arguments.

use bodytrack::insights::ChartMetric;
use bodytrack::records::{ExerciseType, Gender};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bodytrack")]
#[command(about = "Track body metrics and exercise day by day", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Day to work on (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Config file, defaults to config.toml in the data directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the recorded data for a day")]
    Show {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Record body metrics")]
    Body {
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Body fat in percent
        #[arg(long)]
        body_fat: Option<f64>,

        /// Waistline in cm
        #[arg(long)]
        waist: Option<f64>,

        /// Fill missing values from health data first
        #[arg(long)]
        backfill: bool,
    },

    #[command(about = "Record an exercise duration (0 removes it)")]
    Exercise {
        /// cardio, strength or hiit
        exercise_type: ExerciseType,

        /// Duration in minutes
        minutes: f64,

        #[arg(long)]
        intensity: Option<f64>,

        #[arg(long)]
        calories: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    #[command(about = "Show or edit the profile")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    #[command(about = "Set body composition targets (unset values are cleared)")]
    Targets {
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        body_fat: Option<f64>,

        #[arg(long)]
        waist: Option<f64>,
    },

    #[command(about = "Show a trend series")]
    Trend {
        /// weight, body-fat, waistline, cardio, strength or hiit; all when omitted
        #[arg(long)]
        metric: Option<ChartMetric>,

        /// 7, 14 or 30, defaults to the configured range
        #[arg(long)]
        days: Option<u32>,
    },

    #[command(about = "Show the current exercise streak")]
    Streak,

    #[command(about = "Delete all body and exercise records")]
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,

    Set {
        #[arg(long)]
        gender: Option<Gender>,

        /// YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<NaiveDate>,

        /// Height in cm (100-220)
        #[arg(long)]
        height: Option<f64>,

        #[arg(long)]
        avatar: Option<String>,
    },
}
