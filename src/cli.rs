// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::activity::ActivityRecorder;
use crate::chat::ChatTurn;
use crate::chat::session::ONBOARDING_MESSAGE;
use crate::config::ClientConfig;
use crate::core::ServiceClient;
use crate::display::{derive_insights_display, AnimationSlot};
use crate::error::InputError;
use crate::pages::home::FEATURES;
use crate::pages::{CareerChatPage, HomePage, JobMatchPage, MatchScorePage};
use crate::render;
use crate::routes::{nav_bar, Route};

#[derive(Parser)]
#[command(name = "truefit")]
#[command(about = "Resume scoring, job matching and career chat against the TrueFit API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL, overrides truefit.yaml and TRUEFIT_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the feature list and recent activity
    Home,
    /// ATS analysis of a PDF or DOCX resume
    Score { resume: PathBuf },
    /// Compare a resume with a job description
    Match {
        resume: PathBuf,
        /// Job description text
        #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
        job: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        job_file: Option<PathBuf>,
    },
    /// Chat with the career assistant (/upload <path>, /reset, /quit)
    Chat {
        /// Resume to use as chat context
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Show the stored chat history
    History {
        /// Delete it instead
        #[arg(long)]
        clear: bool,
    },
    /// AI insights for a plain-text resume
    Insights { text_file: PathBuf },
    /// Check that the backend is reachable
    Health,
}

pub async fn handle_command(cli: Cli, config: &ClientConfig) -> Result<()> {
    let client = ServiceClient::from_config(config)?;
    let recorder = ActivityRecorder::new(client.clone());
    info!("Using API at {}", client.base_url());

    match cli.command {
        Command::Home => {
            println!("{}\n", nav_bar(Route::Home));
            for feature in &FEATURES {
                println!("{:<22} {}", feature.title, feature.description);
                println!("{:<22} -> {}", "", feature.route.path());
            }

            let mut page = HomePage::new(recorder);
            println!("\nRecent activity:");
            print!("{}", render::render_activity(page.load().await));
        }

        Command::Score { resume } => {
            println!("{}\n", nav_bar(Route::MatchScore));
            let mut page = MatchScorePage::new(client);
            page.select_file(&resume);
            println!("⏳ Analyzing {}...", resume.display());

            if let Err(e) = page.analyze().await {
                return report_input_error(e);
            }
            if let Some(notice) = page.notice() {
                println!("⚠️  {}", notice);
            }
            if page.display().is_empty() {
                return Ok(());
            }

            show_animated_score("Overall ATS Score", page.score_slot()).await;
            print!("{}", render::render_resume(page.display()));
        }

        Command::Match {
            resume,
            job,
            job_file,
        } => {
            println!("{}\n", nav_bar(Route::JobMatch));
            let job_description = match (job, job_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => String::new(),
            };

            let mut page = JobMatchPage::new(client, recorder.clone());
            page.select_file(&resume);
            page.set_job_description(job_description);
            println!("⏳ Comparing {} with the job description...", resume.display());

            if let Err(e) = page.compare().await {
                return report_input_error(e);
            }
            if let Some(notice) = page.notice() {
                println!("⚠️  {}", notice);
                return Ok(());
            }

            show_animated_score("Match Score", page.score_slot()).await;
            print!("{}", render::render_job_match(page.display()));
            recorder.flush().await;
        }

        Command::Chat { resume } => {
            println!("{}\n", nav_bar(Route::CareerChat));
            let mut page = CareerChatPage::new(client, recorder.clone());
            run_chat(&mut page, resume.as_deref()).await?;
            recorder.flush().await;
        }

        Command::History { clear } => {
            if clear {
                match client.clear_chat_history().await {
                    Ok(status) if status.is_ok() => println!("✅ Chat history cleared"),
                    Ok(status) => println!("❌ Unexpected status: {}", status.status),
                    Err(e) => {
                        error!("Failed to clear chat history: {:#}", e);
                        println!("❌ Error: {}", e);
                    }
                }
                return Ok(());
            }

            match client.chat_history().await {
                Ok(entries) if entries.is_empty() => println!("No chat history yet."),
                Ok(entries) => print!("{}", render::render_history(&entries)),
                Err(e) => {
                    error!("Failed to load chat history: {:#}", e);
                    println!("❌ Error: {}", e);
                }
            }
        }

        Command::Insights { text_file } => {
            let text = tokio::fs::read_to_string(&text_file)
                .await
                .with_context(|| format!("Failed to read {}", text_file.display()))?;
            if text.trim().is_empty() {
                return report_input_error(InputError::EmptyResumeText);
            }

            match client.score_insights(&text).await {
                Ok(insights) => {
                    print!("{}", render::render_insights(&derive_insights_display(Some(&insights))));
                }
                Err(e) => {
                    error!("Score insights failed: {:#}", e);
                    println!("⚠️  Could not perform AI analysis");
                }
            }
        }

        Command::Health => {
            let status = client
                .health()
                .await
                .with_context(|| format!("Backend unreachable at {}", client.base_url()))?;
            if !status.is_ok() {
                anyhow::bail!("Backend at {} reported '{}'", client.base_url(), status.status);
            }
            println!("✅ Backend is up at {}", client.base_url());
        }
    }

    Ok(())
}

fn report_input_error(e: InputError) -> Result<()> {
    warn!("Input rejected: {}", e);
    println!("❌ {}", e);
    Ok(())
}

/// Print the count-up on one line until the last frame lands
async fn show_animated_score(label: &str, slot: &mut AnimationSlot) {
    let mut rx = slot.subscribe();
    let line_label = label.to_string();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let value = *rx.borrow_and_update();
            print!("\r{}", render::score_line(&line_label, value));
            let _ = std::io::stdout().flush();
        }
    });

    slot.finished().await;
    printer.abort();
    println!("\r{}", render::score_line(label, slot.current()));
}

/// One line typed at the chat prompt
#[derive(Debug, PartialEq, Eq)]
enum ChatInput {
    Quit,
    Reset,
    Context,
    Upload(Option<PathBuf>),
    Message(String),
}

impl ChatInput {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" => ChatInput::Quit,
            "/reset" => ChatInput::Reset,
            "/context" => ChatInput::Context,
            "/upload" if rest.is_empty() => ChatInput::Upload(None),
            "/upload" => ChatInput::Upload(Some(PathBuf::from(rest))),
            _ => ChatInput::Message(line.to_string()),
        }
    }
}

async fn run_chat(page: &mut CareerChatPage, resume: Option<&Path>) -> Result<()> {
    println!("{}\n", render::render_turn(&ChatTurn::assistant(ONBOARDING_MESSAGE)));
    if let Some(path) = resume {
        upload_for_chat(page, path).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("[{}] you> ", page.placeholder());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match ChatInput::parse(&line) {
            ChatInput::Quit => break,
            ChatInput::Reset => {
                page.reset();
                println!("{}\n", render::render_turn(&ChatTurn::assistant(ONBOARDING_MESSAGE)));
            }
            ChatInput::Context => match page.resume_context().is_empty() {
                true => println!("No resume uploaded."),
                false => println!("{}", page.resume_context()),
            },
            ChatInput::Upload(None) => println!("Usage: /upload <path to .pdf or .docx>"),
            ChatInput::Upload(Some(path)) => upload_for_chat(page, &path).await,
            ChatInput::Message(text) => match page.send(&text).await {
                Ok(turn) => println!("{}\n", render::render_turn(&turn)),
                Err(InputError::EmptyMessage) => {}
                Err(e) => println!("❌ {}", e),
            },
        }
    }

    Ok(())
}

async fn upload_for_chat(page: &mut CareerChatPage, path: &Path) {
    println!("⏳ Analyzing {}...", path.display());
    if let Err(e) = page.upload_resume(path).await {
        println!("❌ {}", e);
        return;
    }
    match (page.notice(), page.extracted()) {
        (Some(notice), _) => println!("⚠️  {}", notice),
        (None, Some(data)) => println!(
            "✅ Resume loaded ({} skills detected). Ask away.",
            data.skills.len()
        ),
        (None, None) => {}
    }
}
