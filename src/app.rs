use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::config::api::{self, ApiConfig, ApiConfigPatch};
use crate::core::{parse_command, Action, Command, Context, NotifyLevel, Setting};
use crate::domain::{Badge, CategorySelection};
use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
use crate::infrastructure::ProbeReport;
use crate::modules::{Sidebar, SidebarState};
use crate::navigation::routes::{self, HOME_PATH};
use crate::navigation::{
    breadcrumbs, Breadcrumb, CloseRefused, Navigator, SyncOutcome, TabManager, TabsStore,
};
use crate::store::LocalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

pub struct App {
    pub ctx: Context,
    pub navigator: Navigator,
    pub tabs: TabManager,
    pub sidebar: Sidebar,
    pub store: LocalStore,
    pub api: ApiConfig,
    pub probe_results: Vec<ProbeReport>,
    pub classifications: BTreeMap<String, CategorySelection>,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    pending_runtime: Vec<RuntimeCommand>,
}

impl App {
    pub fn new(store: LocalStore, start_path: &str) -> Self {
        let api = api::load(&store);
        let navigator = Navigator::new(start_path);
        let mut ctx = Context::new();
        ctx.current_path = navigator.current().to_string();
        Self {
            ctx,
            navigator,
            tabs: TabManager::new(),
            sidebar: Sidebar::new(SidebarState::Expanded),
            store,
            api,
            probe_results: Vec::new(),
            classifications: BTreeMap::new(),
            focus: Focus::Content,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            help_open: false,
            should_quit: false,
            pending_runtime: Vec::new(),
        }
    }

    /// One-time setup once the terminal size is known
    pub fn mount(&mut self, viewport_units: u32) {
        self.navigator.mount(&mut self.tabs);
        if self.sidebar.mount(&self.store) > 0 {
            log::info!("sidebar restored to {:?}", self.sidebar.state());
        }
        self.on_resize(viewport_units);
        self.sync_context();
    }

    pub fn current_path(&self) -> &str {
        self.navigator.current()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(self.navigator.current())
    }

    /// Id of the corrective action shown, when on a detail path
    pub fn current_action_id(&self) -> Option<&str> {
        routes::action_detail_id(self.navigator.current())
    }

    pub fn current_badges(&self) -> Vec<Badge> {
        self.current_action_id()
            .and_then(|id| self.classifications.get(id))
            .map(CategorySelection::badges)
            .unwrap_or_default()
    }

    pub fn navigate(&mut self, path: &str) -> SyncOutcome {
        let outcome = self.navigator.navigate(path, &mut self.tabs);
        self.sync_context();
        outcome
    }

    pub fn go_back(&mut self) {
        if !self.navigator.can_go_back() {
            self.set_status("No hay historial", StatusLevel::Warn);
            return;
        }
        self.navigator.back(&mut self.tabs);
        self.sync_context();
    }

    pub fn close_active_tab(&mut self) {
        let Some(id) = self.tabs.active_tab_id().map(str::to_string) else {
            return;
        };
        match self.tabs.close_tab(&id) {
            Ok(Some(path)) => {
                self.navigate(&path);
            }
            Ok(None) => {
                if self.tabs.is_empty() {
                    self.navigate(HOME_PATH);
                }
            }
            Err(CloseRefused::Pinned) => {
                self.set_status("Esta pestaña no se puede cerrar", StatusLevel::Warn);
            }
            Err(CloseRefused::Unknown) => {}
        }
    }

    pub fn next_tab(&mut self) {
        if let Some(path) = self.tabs.next_path() {
            self.navigate(&path);
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(path) = self.tabs.prev_path() {
            self.navigate(&path);
        }
    }

    pub fn toggle_sidebar(&mut self) {
        match self.sidebar.toggle(&self.store) {
            Ok(SidebarState::Collapsed) => {
                if self.focus == Focus::Sidebar {
                    self.focus = Focus::Content;
                }
            }
            Ok(SidebarState::Expanded) => {}
            Err(err) => {
                log::warn!("could not persist sidebar state: {err:#}");
                self.set_status("No se pudo guardar la barra lateral", StatusLevel::Warn);
            }
        }
    }

    pub fn on_resize(&mut self, viewport_units: u32) {
        match self.sidebar.apply_viewport(viewport_units, &self.store) {
            Ok(true) => {
                if self.focus == Focus::Sidebar {
                    self.focus = Focus::Content;
                }
            }
            Ok(false) => {}
            Err(err) => log::warn!("could not persist sidebar state: {err:#}"),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content | Focus::Command if !self.sidebar.is_collapsed() => Focus::Sidebar,
            Focus::Content | Focus::Command => Focus::Content,
        };
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(4) {
                self.status = None;
            }
        }
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.focus = Focus::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = Focus::Content;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }

        let cmd = parse_command(&input);
        let action = self.execute_command(&cmd);
        self.command.last = Some(input);
        self.exit_command();
        self.apply_action(action);
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Go(path) => Action::Navigate(path.clone()),
            Command::Action(id) => Action::Navigate(routes::action_detail_path(id)),
            Command::Back => Action::Back,
            Command::Close => {
                self.close_active_tab();
                Action::None
            }

            Command::Classify {
                type_code,
                category,
                subcategory,
            } => {
                let Some(id) = self.current_action_id().map(str::to_string) else {
                    return Action::Notify(
                        "Abre una acción para clasificarla".to_string(),
                        NotifyLevel::Warn,
                    );
                };
                let selection =
                    CategorySelection::new(type_code.clone(), category.clone(), subcategory.clone());
                self.classifications.insert(id.clone(), selection);
                Action::Notify(format!("Acción #{} clasificada", id), NotifyLevel::Info)
            }

            Command::Set(setting) => {
                let patch = match setting {
                    Setting::BaseUrl(url) => ApiConfigPatch {
                        base_url: Some(url.clone()),
                        ..Default::default()
                    },
                    Setting::Timeout(ms) => ApiConfigPatch {
                        timeout: Some(*ms),
                        ..Default::default()
                    },
                    Setting::Retries(n) => ApiConfigPatch {
                        retries: Some(*n),
                        ..Default::default()
                    },
                    Setting::Endpoint(kind, path) => ApiConfigPatch::endpoint(*kind, path.clone()),
                };
                self.update_api(&patch)
            }
            Command::ResetConfig => self.reset_api(),
            Command::Probe(url) => {
                let request = match url {
                    Some(url) => RuntimeCommand::Probe {
                        url: url.clone(),
                        timeout_ms: self.api.timeout,
                    },
                    None => RuntimeCommand::ProbeConfig {
                        config: self.api.clone(),
                    },
                };
                self.pending_runtime.push(request);
                Action::Notify("Comprobando conexión…".to_string(), NotifyLevel::Info)
            }

            Command::Sidebar => {
                self.toggle_sidebar();
                Action::None
            }
            Command::Quit => Action::Quit,

            Command::Unknown(s) => {
                Action::Notify(format!("Comando desconocido: {}", s), NotifyLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(path) => {
                self.navigate(&path);
            }
            Action::Back => self.go_back(),
            Action::Notify(msg, level) => self.set_status(msg, level.into()),
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn update_api(&mut self, patch: &ApiConfigPatch) -> Action {
        match api::save(&self.store, patch) {
            Ok(config) => {
                self.api = config;
                Action::Notify("Configuración guardada".to_string(), NotifyLevel::Info)
            }
            Err(err) => {
                log::warn!("could not save API config: {err}");
                Action::Notify(format!("No se pudo guardar: {}", err), NotifyLevel::Error)
            }
        }
    }

    pub fn reset_api(&mut self) -> Action {
        match api::reset(&self.store) {
            Ok(()) => {
                self.api = ApiConfig::default();
                self.probe_results.clear();
                Action::Notify(
                    "Configuración restablecida".to_string(),
                    NotifyLevel::Info,
                )
            }
            Err(err) => {
                log::warn!("could not reset API config: {err}");
                Action::Notify(format!("No se pudo restablecer: {}", err), NotifyLevel::Error)
            }
        }
    }

    /// Request a probe of every configured endpoint
    pub fn request_probe(&mut self) {
        let action = self.execute_command(&Command::Probe(None));
        self.apply_action(action);
    }

    pub fn take_runtime_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending_runtime)
    }

    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::ProbeFinished(report) => {
                let (text, level) = if report.reachable {
                    (format!("{} accesible", report.url), StatusLevel::Info)
                } else {
                    (format!("{} no responde", report.url), StatusLevel::Error)
                };
                self.set_status(text, level);
                match self
                    .probe_results
                    .iter_mut()
                    .find(|existing| existing.target == report.target)
                {
                    Some(existing) => *existing = report,
                    None => self.probe_results.push(report),
                }
            }
        }
    }

    fn sync_context(&mut self) {
        let current = self.navigator.current().to_string();
        self.sidebar.select_path(&current);
        self.ctx.current_path = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new(LocalStore::open_in_memory().unwrap(), "/");
        app.mount(1280);
        app
    }

    #[test]
    fn test_mount_opens_home() {
        let app = app();
        assert_eq!(app.tabs.len(), 1);
        assert_eq!(app.tabs.active_tab_id(), Some("/"));
    }

    #[test]
    fn test_close_home_refused() {
        let mut app = app();
        app.close_active_tab();
        assert_eq!(app.tabs.len(), 1);
        assert_eq!(app.status_text().map(|(_, l)| l), Some(StatusLevel::Warn));
    }

    #[test]
    fn test_close_detail_returns_to_neighbour() {
        let mut app = app();
        app.navigate("/reports");
        app.navigate("/actions/7");
        app.close_active_tab();
        assert_eq!(app.current_path(), "/reports");
        assert_eq!(app.tabs.active_tab_id(), Some("/reports"));
    }

    #[test]
    fn test_classify_requires_detail() {
        let mut app = app();
        let action = app.execute_command(&parse_command("classify lopd"));
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
        assert!(app.classifications.is_empty());
    }

    #[test]
    fn test_probe_queues_runtime_command() {
        let mut app = app();
        app.request_probe();
        let cmds = app.take_runtime_commands();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], RuntimeCommand::ProbeConfig { .. }));
        assert!(app.take_runtime_commands().is_empty());
    }

    #[test]
    fn test_narrow_mount_collapses() {
        let mut app = App::new(LocalStore::open_in_memory().unwrap(), "/");
        app.mount(600);
        assert!(app.sidebar.is_collapsed());
    }
}
