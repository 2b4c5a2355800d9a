use crate::highlight::Highlighter;
use crate::loader::{LoaderMessage, LoaderResponse, spawn_loader};
use crate::style::configure_style;
use crate::ui::diff_view::DiffView;
use crate::ui::text_panel::{PanelAction, TextPanel};
use crate::ui::toolbar::{Toolbar, ToolbarAction, ToolbarState};
use crate::workspace::{DiffWorkspace, Side};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{info, warn};

pub struct PaneDiffApp {
    workspace: DiffWorkspace,
    highlighter: Highlighter,
    left_panel: TextPanel,
    right_panel: TextPanel,
    diff_view: DiffView,
    loader_sender: Sender<LoaderMessage>,
    loader_receiver: Receiver<LoaderResponse>,
}

impl PaneDiffApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        workspace: DiffWorkspace,
        highlighter: Highlighter,
    ) -> Self {
        configure_style(&cc.egui_ctx);
        Self::with_context(Some(cc.egui_ctx.clone()), workspace, highlighter)
    }

    fn with_context(
        ctx: Option<egui::Context>,
        workspace: DiffWorkspace,
        highlighter: Highlighter,
    ) -> Self {
        let (sender, receiver) = spawn_loader(ctx);
        Self {
            workspace,
            highlighter,
            left_panel: TextPanel::new(Side::Left),
            right_panel: TextPanel::new(Side::Right),
            diff_view: DiffView::default(),
            loader_sender: sender,
            loader_receiver: receiver,
        }
    }

    fn apply_loader_response(&mut self, response: LoaderResponse) {
        match response {
            LoaderResponse::Loaded { side, content } => self.workspace.set_text(side, content),
            // Already logged by the loader; the panel keeps its text
            LoaderResponse::Failed { .. } => {}
        }
    }

    fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::SetLanguage(language) => self.workspace.set_language(language),
            ToolbarAction::SetDiffMode(mode) => self.workspace.set_diff_mode(mode),
            ToolbarAction::SetNumLines(n) => self.workspace.set_num_lines(i64::from(n)),
            ToolbarAction::ToggleDiff => {
                let visible = self.workspace.toggle_diff();
                info!("Diff view {}", if visible { "shown" } else { "hidden" });
            }
        }
    }

    fn apply_panel_action(&mut self, side: Side, action: PanelAction) {
        match action {
            PanelAction::Clear => self.workspace.clear(side),
            PanelAction::Paste => self.send(LoaderMessage::Paste(side)),
            PanelAction::Open => {
                // Native dialogs must run on the UI thread; only the read is offloaded
                if let Some(path) = pick_file() {
                    self.send(LoaderMessage::Open(side, path));
                }
            }
        }
    }

    /// Dropping two files fills both panels; a single file goes to the left
    /// panel while it is empty, otherwise to the right one
    fn open_dropped_files(&mut self, paths: Vec<PathBuf>) {
        let mut paths = paths.into_iter();
        match (paths.next(), paths.next()) {
            (Some(left), Some(right)) => {
                self.send(LoaderMessage::Open(Side::Left, left));
                self.send(LoaderMessage::Open(Side::Right, right));
            }
            (Some(path), None) => {
                let side = if self.workspace.text(Side::Left).is_empty() {
                    Side::Left
                } else {
                    Side::Right
                };
                self.send(LoaderMessage::Open(side, path));
            }
            _ => {}
        }
    }

    fn send(&self, message: LoaderMessage) {
        if let Err(e) = self.loader_sender.send(message) {
            warn!("Failed to send loader message: {}", e);
        }
    }

    fn toolbar_state(&mut self) -> ToolbarState {
        let diff_visible = self.workspace.diff_visible();
        // Prepared here so the stats match the snapshot drawn below in this frame
        let stats = diff_visible
            .then(|| self.diff_view.prepare_for(&self.workspace, &self.highlighter));
        ToolbarState {
            language: self.workspace.language(),
            diff_mode: self.workspace.diff_mode(),
            num_lines: self.workspace.num_lines(),
            diff_visible,
            stats,
        }
    }

    fn show_editors(&mut self, ui: &mut egui::Ui) {
        let Self {
            workspace,
            highlighter,
            left_panel,
            right_panel,
            ..
        } = self;

        let language = workspace.language();
        let num_lines = workspace.num_lines();
        let height = workspace.editor_height();
        let (left_text, right_text) = workspace.texts_mut();

        let mut actions = Vec::new();
        ui.columns(2, |columns| {
            if let Some(action) = left_panel.show(
                &mut columns[0],
                left_text,
                language,
                num_lines,
                height,
                highlighter,
            ) {
                actions.push((Side::Left, action));
            }
            if let Some(action) = right_panel.show(
                &mut columns[1],
                right_text,
                language,
                num_lines,
                height,
                highlighter,
            ) {
                actions.push((Side::Right, action));
            }
        });

        for (side, action) in actions {
            self.apply_panel_action(side, action);
        }
    }
}

fn pick_file() -> Option<PathBuf> {
    let start_dir = directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    let mut dialog = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .add_filter("Text", &["txt", "yaml", "yml", "xml", "md"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

impl eframe::App for PaneDiffApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for imported panel content
        while let Ok(response) = self.loader_receiver.try_recv() {
            self.apply_loader_response(response);
        }

        if !self.workspace.diff_visible() {
            let dropped: Vec<PathBuf> = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|file| file.path.clone())
                    .collect()
            });
            self.open_dropped_files(dropped);
        }

        // Toolbar
        egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            let state = self.toolbar_state();
            if let Some(action) = Toolbar::show(ui, state) {
                self.apply_toolbar_action(action);
                ctx.request_repaint();
            }
            ui.add_space(4.0);
        });

        // Main Content
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.workspace.diff_visible() {
                self.diff_view.show(ui, &self.workspace, &self.highlighter);
            } else {
                self.show_editors(ui);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::DEFAULT_THEME;
    use crate::language::Language;
    use crate::loader::LoaderError;
    use crate::workspace::DiffMode;

    fn test_app() -> PaneDiffApp {
        PaneDiffApp::with_context(
            None,
            DiffWorkspace::default(),
            Highlighter::new(DEFAULT_THEME),
        )
    }

    #[test]
    fn toolbar_actions_reach_workspace() {
        let mut app = test_app();
        app.apply_toolbar_action(ToolbarAction::SetLanguage(Language::Yaml));
        app.apply_toolbar_action(ToolbarAction::SetDiffMode(DiffMode::Inline));
        app.apply_toolbar_action(ToolbarAction::SetNumLines(12));

        assert_eq!(app.workspace.language(), Language::Yaml);
        assert_eq!(app.workspace.diff_mode(), DiffMode::Inline);
        assert_eq!(app.workspace.num_lines(), 12);
    }

    #[test]
    fn toggle_snapshots_current_text() {
        let mut app = test_app();
        app.workspace.set_text(Side::Left, "A");
        app.workspace.set_text(Side::Right, "B");

        app.apply_toolbar_action(ToolbarAction::ToggleDiff);
        app.workspace.set_text(Side::Left, "C");

        assert!(app.workspace.diff_visible());
        assert_eq!(app.workspace.snapshot().left, "A");
        assert_eq!(app.workspace.snapshot().right, "B");
    }

    #[test]
    fn loader_responses_update_only_on_success() {
        let mut app = test_app();
        app.workspace.set_text(Side::Right, "keep");

        app.apply_loader_response(LoaderResponse::Failed {
            side: Side::Right,
            error: LoaderError::Io(std::io::Error::other("denied")),
        });
        assert_eq!(app.workspace.text(Side::Right), "keep");

        app.apply_loader_response(LoaderResponse::Loaded {
            side: Side::Right,
            content: "pasted".to_string(),
        });
        assert_eq!(app.workspace.text(Side::Right), "pasted");
    }

    #[test]
    fn toolbar_stats_are_ready_in_the_frame_the_diff_is_shown() {
        let mut app = test_app();
        app.workspace.set_text(Side::Left, "{\n  \"a\": 1\n}");
        app.workspace.set_text(Side::Right, "{\n  \"a\": 2,\n  \"b\": 3\n}");
        assert!(app.toolbar_state().stats.is_none());

        app.apply_toolbar_action(ToolbarAction::ToggleDiff);
        let stats = app.toolbar_state().stats.unwrap();
        assert_eq!(stats.removed_lines, 1);
        assert_eq!(stats.added_lines, 2);

        app.apply_toolbar_action(ToolbarAction::ToggleDiff);
        assert!(app.toolbar_state().stats.is_none());
    }

    #[test]
    fn opened_file_arrives_through_the_loader() {
        let path = std::env::temp_dir().join(format!("test_app_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[1, 2]").unwrap();

        let mut app = test_app();
        app.open_dropped_files(vec![path.clone()]);
        let response = app
            .loader_receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        app.apply_loader_response(response);

        assert_eq!(app.workspace.text(Side::Left), "[1, 2]");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn clear_action_empties_panel() {
        let mut app = test_app();
        app.workspace.set_text(Side::Left, "text");
        app.apply_panel_action(Side::Left, PanelAction::Clear);
        assert_eq!(app.workspace.text(Side::Left), "");
    }
}
