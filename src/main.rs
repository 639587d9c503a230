use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use timetable_generator::display::{print_timetable, render_html, write_timetable_to_file};
use timetable_generator::form::{export_timetable_to_csv, parse_header, parse_slot_form, FormFields};
use timetable_generator::parser::load_courses;
use timetable_generator::schedule::{schedule_courses, RandomShuffler};
use timetable_generator::web;

/// Weekly timetable generator.
///
/// Example:
///   timetable-generator generate courses.csv --slots slots.json --html timetable.html
#[derive(Debug, Parser)]
#[command(name = "timetable-generator", about = "Generates a weekly class timetable from a course sheet")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a timetable from a CSV course sheet
    Generate {
        /// CSV sheet with "Course Code" and "Credits (L-T-P-S-C)" columns
        sheet: PathBuf,

        /// JSON object of slot form fields (lecture_slot_1, morning_break, ...)
        #[arg(short, long)]
        slots: Option<PathBuf>,

        /// Seed for a reproducible timetable
        #[arg(long)]
        seed: Option<u64>,

        /// Write the plain-text timetable to this file
        #[arg(short, long)]
        out: Option<String>,

        /// Export the grid as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the HTML view
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Run the upload web server
    Web {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

/// Reads form fields from a JSON object; numbers and booleans are taken as text
fn read_form_fields(path: &Path) -> Result<FormFields, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let values: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;
    Ok(values
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Web { port } => {
            web::start_server(port).await?;
        }
        Command::Generate { sheet, slots, seed, out, csv, html } => {
            let fields = match &slots {
                Some(path) => read_form_fields(path)?,
                None => FormFields::new(),
            };
            let config = parse_slot_form(&fields)?;
            let header = parse_header(&fields);
            let course_sheet = load_courses(&sheet)?;

            let mut shuffler = match seed {
                Some(seed) => RandomShuffler::seeded(seed),
                None => RandomShuffler::from_entropy(),
            };
            let timetable = schedule_courses(&course_sheet.courses, course_sheet.colors, &config, &mut shuffler);

            print_timetable(&header, &timetable);

            if let Some(path) = &out {
                write_timetable_to_file(&header, &timetable, path)?;
                info!("Timetable saved to {}", path);
            }
            if let Some(path) = &csv {
                export_timetable_to_csv(&timetable.grid, path)?;
                info!("Grid exported to {}", path.display());
            }
            if let Some(path) = &html {
                std::fs::write(path, render_html(&header, &timetable))?;
                info!("HTML view saved to {}", path.display());
            }
        }
    }

    Ok(())
}
