// Interactive studio: the single-screen upload, generate and download flow

use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;

use picpro_images::{DropZone, ImageHandler, SelectedFile};
use picpro_sessions::{
    messages, DirectorySink, GenerateOutcome, SessionController, SessionError, SessionPhase,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Command;
use crate::app::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;
use crate::render;
use crate::shell::{self, ShellInput};

const PROMPT: &str = "picpro> ";

/// Launch the studio shell
pub struct StudioCommand {
    pub output_dir: Option<PathBuf>,
    pub model: Option<String>,
}

impl StudioCommand {
    pub fn new(output_dir: Option<PathBuf>, model: Option<String>) -> Self {
        Self { output_dir, model }
    }
}

#[async_trait::async_trait]
impl Command for StudioCommand {
    async fn execute(&self) -> CliResult<()> {
        let config = AppConfig::load(self.model.as_deref())?;
        let controller = Arc::new(config.controller()?);
        let output_dir = self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        let mut studio = Studio::new(controller, output_dir, OutputStyle::default());
        studio.run().await
    }
}

/// Result of handling one shell line
#[derive(Debug, Default)]
pub struct StudioReply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl StudioReply {
    fn line(line: String) -> Self {
        Self {
            lines: vec![line],
            quit: false,
        }
    }
}

/// Shell state around one session
pub struct Studio {
    controller: Arc<SessionController>,
    drop_zone: DropZone,
    output_dir: PathBuf,
    style: OutputStyle,
    pending: Option<JoinHandle<GenerateOutcome>>,
}

enum LineEvent {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

impl Studio {
    pub fn new(controller: Arc<SessionController>, output_dir: PathBuf, style: OutputStyle) -> Self {
        Self {
            controller,
            drop_zone: DropZone::new(),
            output_dir,
            style,
            pending: None,
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Run the shell until `quit` or end of input.
    pub async fn run(&mut self) -> CliResult<()> {
        println!("{}", self.style.header("Pic Pro Studio"));
        for line in render::state_lines(&self.controller.state(), &self.style) {
            println!("{}", line);
        }

        let observer = self.spawn_observer();
        let (request_tx, mut lines) = spawn_line_reader();

        let result = loop {
            if request_tx.send(()).is_err() {
                break Ok(());
            }
            let event = match lines.recv().await {
                Some(event) => event,
                None => break Ok(()),
            };

            match event {
                LineEvent::Line(line) => {
                    let reply = self.handle(ShellInput::parse(&line)).await;
                    for line in &reply.lines {
                        println!("{}", line);
                    }
                    if reply.quit {
                        break Ok(());
                    }
                }
                LineEvent::Interrupted => println!("{}", self.style.tip("type quit to leave")),
                LineEvent::Eof => break Ok(()),
                LineEvent::Failed(e) => break Err(CliError::Internal(e)),
            }
        };

        observer.abort();
        result
    }

    /// Print every state the controller publishes.
    fn spawn_observer(&self) -> JoinHandle<()> {
        let mut rx = self.controller.subscribe();
        let style = OutputStyle {
            use_colors: self.style.use_colors,
        };
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                println!();
                for line in render::state_lines(&state, &style) {
                    println!("{}", line);
                }
            }
        })
    }

    /// Apply one shell command to the session.
    pub async fn handle(&mut self, input: ShellInput) -> StudioReply {
        match input {
            ShellInput::Empty => StudioReply::default(),
            ShellInput::Open(path) => {
                match self.drop_zone.pick(vec![SelectedFile::new(path)]) {
                    Some(file) => self.select(file).await,
                    None => StudioReply::default(),
                }
            }
            ShellInput::Drop(text) => self.drop_files(&text).await,
            ShellInput::Generate => self.generate(),
            ShellInput::Reset => {
                if self.controller.reset() {
                    StudioReply::default()
                } else {
                    StudioReply::line(self.style.info(messages::UPLOAD_PROMPT))
                }
            }
            ShellInput::Download(dir) => self.download(dir).await,
            ShellInput::Status => StudioReply {
                lines: render::state_lines(&self.controller.state(), &self.style),
                quit: false,
            },
            ShellInput::Preview => StudioReply {
                lines: render::preview_lines(&self.controller.state(), &self.style),
                quit: false,
            },
            ShellInput::Help => StudioReply {
                lines: shell::help_lines()
                    .into_iter()
                    .map(|(usage, about)| self.style.key_value(usage, about))
                    .collect(),
                quit: false,
            },
            ShellInput::Quit => StudioReply {
                lines: Vec::new(),
                quit: true,
            },
            ShellInput::Unknown(word) => StudioReply::line(
                self.style
                    .warning(&format!("Unknown command '{}'. Type help for the list.", word)),
            ),
        }
    }

    /// Wait for the background generation, if one was started.
    pub async fn wait_for_generation(&mut self) -> Option<GenerateOutcome> {
        let handle = self.pending.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "Generation task ended abnormally");
                None
            }
        }
    }

    async fn select(&self, file: SelectedFile) -> StudioReply {
        let outcome = self.controller.select(&file).await;
        match render::select_message(&outcome, &self.style) {
            Some(line) => StudioReply::line(line),
            None => StudioReply::default(),
        }
    }

    async fn drop_files(&mut self, text: &str) -> StudioReply {
        let files = ImageHandler::files_from_event(text);
        if files.is_empty() {
            return StudioReply::line(self.style.warning("No file in the drop"));
        }

        self.drop_zone.drag_over();
        match self.drop_zone.drop(files) {
            Some(file) => self.select(file).await,
            None => StudioReply::line(self.style.warning("Only image files can be dropped")),
        }
    }

    fn generate(&mut self) -> StudioReply {
        match self.controller.phase() {
            SessionPhase::Idle => {
                return StudioReply::line(self.style.warning(messages::UPLOAD_PROMPT))
            }
            SessionPhase::Generating => {
                return StudioReply::line(self.style.info(messages::GENERATING_TITLE))
            }
            SessionPhase::Result => {
                return StudioReply::line(self.style.tip(&format!(
                    "download: {}  |  reset: {}",
                    messages::DOWNLOAD_ACTION,
                    messages::TRY_ANOTHER
                )))
            }
            SessionPhase::Previewing | SessionPhase::Failed => {}
        }

        let controller = self.controller.clone();
        self.pending = Some(tokio::spawn(async move {
            let outcome = controller.generate().await;
            if let GenerateOutcome::Failed(cause) = &outcome {
                debug!(error = ?cause, "Generation failure detail");
            }
            outcome
        }));
        StudioReply::default()
    }

    async fn download(&self, dir: Option<PathBuf>) -> StudioReply {
        let dir = dir.unwrap_or_else(|| self.output_dir.clone());
        let sink = DirectorySink::new(dir);
        match self.controller.download(&sink).await {
            Ok(path) => StudioReply::line(self.style.success(&format!(
                "{}: {}",
                messages::DOWNLOAD_ACTION,
                self.style.code(&path.display().to_string())
            ))),
            Err(SessionError::NothingToDownload) => {
                StudioReply::line(self.style.warning("Nothing to download yet"))
            }
            Err(e) => StudioReply::line(self.style.error(&e.to_string())),
        }
    }
}

/// Read lines on a dedicated thread; one line per request.
fn spawn_line_reader() -> (std_mpsc::Sender<()>, mpsc::UnboundedReceiver<LineEvent>) {
    let (request_tx, request_rx) = std_mpsc::channel::<()>();
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                let _ = line_tx.send(LineEvent::Failed(e.to_string()));
                return;
            }
        };

        while request_rx.recv().is_ok() {
            let event = match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    LineEvent::Line(line)
                }
                Err(ReadlineError::Interrupted) => LineEvent::Interrupted,
                Err(ReadlineError::Eof) => LineEvent::Eof,
                Err(e) => LineEvent::Failed(e.to_string()),
            };
            let done = matches!(event, LineEvent::Eof | LineEvent::Failed(_));
            if line_tx.send(event).is_err() || done {
                break;
            }
        }
    });

    (request_tx, line_rx)
}
