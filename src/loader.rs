use crate::workspace::Side;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

pub enum LoaderMessage {
    /// Read the clipboard text into a panel
    Paste(Side),
    /// Read a file into a panel
    Open(Side, PathBuf),
}

#[derive(Debug)]
pub enum LoaderResponse {
    Loaded { side: Side, content: String },
    Failed { side: Side, error: LoaderError },
}

/// Background worker for blocking panel imports (clipboard, files)
pub struct Loader {
    receiver: Receiver<LoaderMessage>,
    response_sender: Sender<LoaderResponse>,
    ctx: Option<egui::Context>,
}

impl Loader {
    pub fn new(
        receiver: Receiver<LoaderMessage>,
        response_sender: Sender<LoaderResponse>,
        ctx: Option<egui::Context>,
    ) -> Self {
        Self {
            receiver,
            response_sender,
            ctx,
        }
    }

    pub fn run(&self) {
        while let Ok(message) = self.receiver.recv() {
            let response = match message {
                LoaderMessage::Paste(side) => Self::respond(side, read_clipboard()),
                LoaderMessage::Open(side, path) => Self::respond(side, read_file(path)),
            };

            // The UI may already be gone; the result is simply dropped then
            if self.response_sender.send(response).is_err() {
                break;
            }
            if let Some(ctx) = &self.ctx {
                ctx.request_repaint();
            }
        }
    }

    fn respond(side: Side, result: Result<String, LoaderError>) -> LoaderResponse {
        match result {
            Ok(content) => LoaderResponse::Loaded { side, content },
            Err(error) => {
                warn!("Failed to load {:?} panel: {}", side, error);
                LoaderResponse::Failed { side, error }
            }
        }
    }
}

fn read_clipboard() -> Result<String, LoaderError> {
    let mut clipboard = arboard::Clipboard::new()?;
    Ok(clipboard.get_text()?)
}

fn read_file(path: PathBuf) -> Result<String, LoaderError> {
    let content = fs::read_to_string(&path)?;
    info!("Loaded {:?} ({} bytes)", path, content.len());
    Ok(content)
}

/// Start the loader thread; `ctx` is asked to repaint whenever a response is ready
pub fn spawn_loader(
    ctx: Option<egui::Context>,
) -> (Sender<LoaderMessage>, Receiver<LoaderResponse>) {
    let (sender, receiver) = std::sync::mpsc::channel();
    let (response_sender, response_receiver) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let loader = Loader::new(receiver, response_sender, ctx);
        loader.run();
    });
    (sender, response_receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;
    use uuid::Uuid;

    fn setup_test_dir() -> PathBuf {
        let test_dir = std::env::temp_dir().join(format!("test_loader_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        test_dir
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    #[test]
    fn open_reads_file_into_requested_side() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("right.json");
        fs::write(&path, "{\"b\": 2}").unwrap();

        let (sender, receiver) = spawn_loader(None);
        sender.send(LoaderMessage::Open(Side::Right, path)).unwrap();

        match receiver.recv_timeout(Duration::from_secs(5)).unwrap() {
            LoaderResponse::Loaded { side, content } => {
                assert_eq!(side, Side::Right);
                assert_eq!(content, "{\"b\": 2}");
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn open_missing_file_reports_failure() {
        let test_dir = setup_test_dir();
        let (sender, receiver) = spawn_loader(None);
        sender
            .send(LoaderMessage::Open(Side::Left, test_dir.join("missing.json")))
            .unwrap();

        match receiver.recv_timeout(Duration::from_secs(5)).unwrap() {
            LoaderResponse::Failed { side, error } => {
                assert_eq!(side, Side::Left);
                assert!(matches!(error, LoaderError::Io(_)));
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cleanup_test_dir(&test_dir);
    }
}
