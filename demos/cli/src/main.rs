use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use portal_core::{
    ChatMessage, FileCandidate, MessageBody, MimeType, PortalConfig, RichCard, Sender,
};
use portal_engine::{PortalController, VirtualRuntime};

#[derive(Parser, Debug)]
#[command(
    name = "portal-cli",
    about = "Drive the patient portal headless, on simulated time."
)]
struct Args {
    /// Seed for the report analysis pick.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print the chat transcript as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the assistant a question.
    Chat { message: Vec<String> },
    /// Upload report files and wait for their analysis.
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Book an appointment.
    Book {
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = PortalConfig::default();
    let controller = match args.seed {
        Some(seed) => PortalController::with_seed(config, seed),
        None => PortalController::new(config),
    };
    let mut runtime = VirtualRuntime::new(controller);
    let transcript_start = runtime.controller().transcript().len();

    match args.command {
        Command::Chat { message } => {
            let message = message.join(" ");
            runtime.dispatch(|c| c.send_message(&message));
        }
        Command::Upload { paths } => {
            let candidates = paths
                .iter()
                .map(|path| read_candidate(path))
                .collect::<anyhow::Result<Vec<_>>>()?;
            runtime.dispatch(|c| c.upload_files(candidates));
        }
        Command::Book { name } => {
            let booked_at = DateTime::<FixedOffset>::from(Local::now());
            runtime.dispatch(|c| c.book_appointment(&name, booked_at));
        }
    }
    runtime.run_until_idle();

    let transcript = &runtime.controller().transcript()[transcript_start..];
    if args.json {
        println!("{}", serde_json::to_string_pretty(transcript)?);
    } else {
        for message in transcript {
            print_message(message);
        }
    }

    for raised in runtime.raised_toasts() {
        println!(
            "[{:>5} ms] {:?}: {}",
            raised.at_ms, raised.toast.kind, raised.toast.message
        );
    }

    for file in runtime.controller().files() {
        println!(
            "Uploaded: {} ({}, {})",
            file.name,
            file.mime_type.as_mime(),
            file.display_size()
        );
    }

    for appointment in runtime.controller().appointments() {
        println!(
            "Appointment {} for {} on {} ({:?})",
            appointment.id, appointment.patient_name, appointment.date, appointment.status
        );
    }

    Ok(())
}

fn read_candidate(path: &Path) -> anyhow::Result<FileCandidate> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("Could not read file {path:?}"))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileCandidate {
        mime: MimeType::mime_for_file_name(&name).to_string(),
        name,
        size: metadata.len(),
    })
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "assistant",
    };
    match &message.body {
        MessageBody::PlainText(text) => println!("{who}> {text}\n"),
        MessageBody::Rich(card) => println!("{who}>\n{}", card_text(card)),
    }
}

fn card_text(card: &RichCard) -> String {
    let mut lines = vec![format!("  {} {}", card.icon, card.title)];
    if let Some(summary) = &card.summary {
        lines.push(format!("  {summary}"));
    }
    for section in &card.sections {
        lines.push(format!("  {}", section.heading));
        if let Some(body) = &section.body {
            lines.push(format!("    {body}"));
        }
        lines.extend(section.items.iter().map(|item| format!("    - {item}")));
    }
    if let Some(notice) = &card.notice {
        lines.push(format!("  {notice}"));
    }
    if let Some(urgency) = card.badge {
        lines.push(format!("  {} Priority", urgency.label()));
    }
    for button in &card.actions {
        lines.push(format!("  [{}]", button.label));
    }
    lines.push(String::new());
    lines.join("\n")
}
