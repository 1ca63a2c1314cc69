use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use resumatch::{status_line, AnalysisResult, ChartAdapter, UploadClient, TOP_MATCHES};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resumatch")]
#[command(author, version, about = "Upload a resume for analysis and visualize job-role matches")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Resume file to upload (optional in GUI mode)
    path: Option<PathBuf>,

    /// Launch GUI file picker (auto-enabled when double-clicked)
    #[arg(long)]
    gui: bool,

    /// Analysis service base URL
    #[arg(short, long, default_value = "http://localhost:5000")]
    endpoint: String,

    /// Output report file (.html, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "resumatch-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate an HTML report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open the report
    #[arg(long)]
    no_open: bool,

    /// Show per-skill strength estimates
    #[arg(short, long)]
    verbose: bool,

    /// Only show the score line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start interactive web UI for uploads
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Analysis service base URL
        #[arg(short, long, default_value = "http://localhost:5000")]
        endpoint: String,
    },
}

fn main() {
    let args = Args::parse();

    // Handle subcommands first
    if let Some(cmd) = args.command {
        match cmd {
            Command::Serve { port, endpoint } => {
                if let Err(e) = resumatch::serve::start(port, endpoint) {
                    eprintln!("Server error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
        }
    }

    // Determine if we should use GUI mode
    // With GUI feature: launch GUI if --gui flag OR no path provided
    // This makes double-click behavior "just work"
    #[cfg(feature = "gui")]
    let use_gui = args.gui || args.path.is_none();

    #[cfg(not(feature = "gui"))]
    let use_gui = false;

    // Handle GUI mode
    #[cfg(feature = "gui")]
    let path = if use_gui {
        match pick_resume_gui() {
            Some(p) => p,
            None => {
                // Cancelled without a file: block with the dialog and leave.
                // No request is ever made on this path.
                alert_no_file();
                std::process::exit(0);
            }
        }
    } else {
        // Path was provided via CLI
        args.path.clone().unwrap()
    };

    #[cfg(not(feature = "gui"))]
    let path = if let Some(p) = args.path.clone() {
        p
    } else {
        eprintln!("Usage: resumatch <FILE>");
        eprintln!("Run 'resumatch --help' for more options.");
        eprintln!("Note: GUI mode not available in this build.");
        std::process::exit(1);
    };

    let client = match UploadClient::new(args.endpoint.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", status_line(&e));
            std::process::exit(1);
        }
    };

    if !args.quiet {
        eprintln!("\x1b[1mResumatch - Resume Match Visualizer\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!("Uploading {} to {}\n", path.display(), client.base());
    }

    // Visible status while the request is in flight; cleared on completion
    let spinner = if !args.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Uploading and analyzing... This may take a few seconds.");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let outcome = client.upload_file(&path);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", status_line(&e));
            std::process::exit(1);
        }
    };

    print_result(&result, args.verbose, args.quiet);

    // Determine report path
    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        // Auto-generate report
        std::fs::create_dir_all(&args.report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("resumatch_report_{}.html", timestamp);
        Some(args.report_dir.join(filename))
    } else {
        None
    };

    // Generate report
    if let Some(ref output_path) = report_path {
        let mut chart = ChartAdapter::new();
        if let Err(e) =
            resumatch::report::generate(output_path, &result, client.base(), &mut chart)
        {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        // Open report
        if !args.no_open {
            if use_gui {
                // In GUI mode, auto-open the report (no prompt)
                let _ = open::that(output_path);
            } else if !args.quiet {
                // In terminal mode, ask first
                eprint!("\nOpen report in browser? [Y/n] ");
                io::stderr().flush().ok();

                let mut input = String::new();
                if io::stdin().read_line(&mut input).is_ok() {
                    let input = input.trim().to_lowercase();
                    if input.is_empty() || input == "y" || input == "yes" {
                        if let Err(e) = open::that(output_path) {
                            eprintln!("Failed to open report: {}", e);
                        }
                    }
                }
            }
        }
    }
}

fn print_result(result: &AnalysisResult, verbose: bool, quiet: bool) {
    let color = if result.resume_score >= 70.0 {
        "\x1b[32m" // Green
    } else if result.resume_score >= 40.0 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[31m" // Red
    };
    let reset = "\x1b[0m";

    println!(
        "{}Resume score: {}/100{}  ({})",
        color, result.resume_score, reset, result.filename
    );

    if quiet {
        return;
    }

    println!("\nTop matches:");
    for (role, score) in result.ranked_matches(TOP_MATCHES) {
        println!("  {:<30} {:>5}%", role, score);
    }

    println!("\nSkills detected:    {}", result.skills_text());
    println!("Missing (top role): {}", result.missing_skills_text());
    println!("\nSuggestions: {}", result.suggestions);

    if verbose && !result.skill_strengths.is_empty() {
        println!("\nSkill strengths:");
        for (skill, strength) in &result.skill_strengths {
            println!("  {:<20} {:.2}", skill, strength);
        }
    }
}

#[cfg(feature = "gui")]
fn pick_resume_gui() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select a resume to analyze")
        .add_filter("Resumes", &["pdf", "docx", "doc", "txt"])
        .pick_file()
}

#[cfg(feature = "gui")]
fn alert_no_file() {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("Resumatch")
        .set_description("Choose a resume file")
        .show();
}
