//! Application state and main event loop
//!
//! The controller owns the current view, the per-view data caches, the
//! transfer form and the popup stack. Fetch completions arrive over the
//! fetcher channel and are applied only when their sequence number is
//! still the latest for the target.

use crate::api::{ApiClient, ClientDetails, TransactionDetail};
use crate::config::Config;
use crate::core::{FetchData, FetchEvent, FetchTarget, Fetcher, RefreshScheduler};
use crate::form::CreateForm;
use crate::notifications::NotificationManager;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

const BLOCK_REASON: &str = "Заблокирован оператором";

/// Views of the dashboard, in nav order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Transactions,
    Flagged,
    Clients,
    Patterns,
    CreateTransaction,
    Search,
    Reports,
    Alerts,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Dashboard,
        View::Transactions,
        View::Flagged,
        View::Clients,
        View::Patterns,
        View::CreateTransaction,
        View::Search,
        View::Reports,
        View::Alerts,
    ];

    /// Nav label
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Дашборд",
            View::Transactions => "Транзакции",
            View::Flagged => "Подозрительные",
            View::Clients => "Клиенты",
            View::Patterns => "Паттерны",
            View::CreateTransaction => "Новый перевод",
            View::Search => "Поиск",
            View::Reports => "Отчёты",
            View::Alerts => "Оповещения",
        }
    }

    /// Views without a loader switch but fetch nothing
    pub fn has_loader(&self) -> bool {
        !matches!(self, View::Search | View::Reports | View::Alerts)
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Lifecycle of one view's data
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> Loadable<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }
}

/// Modal overlay above the current view
#[derive(Debug)]
pub enum Popup {
    Transaction {
        id: i64,
        state: Loadable<Box<TransactionDetail>>,
    },
    Client {
        id: i64,
        state: Loadable<Box<ClientDetails>>,
    },
    /// Blocking confirmation before POST /api/block-client
    ConfirmBlock { client_id: i64, client_name: String },
    /// Reason input before POST /api/flag-transaction
    FlagReason { transaction_id: i64, reason: String },
}

/// Application state
pub struct App {
    pub config: Config,
    pub view: View,
    pub scheduler: RefreshScheduler,
    pub fetcher: Fetcher,
    pub event_rx: mpsc::UnboundedReceiver<FetchEvent>,
    pub notifications: NotificationManager,

    pub stats: Loadable<crate::api::Stats>,
    pub patterns: Loadable<Vec<crate::api::PatternPoint>>,
    pub recent_flagged: Loadable<Vec<crate::api::Transaction>>,
    pub transactions: Loadable<Vec<crate::api::Transaction>>,
    pub flagged: Loadable<Vec<crate::api::Transaction>>,
    pub clients: Loadable<Vec<crate::api::Client>>,
    pub accounts: Loadable<Vec<crate::api::Account>>,
    pub recent_transactions: Loadable<Vec<crate::api::Transaction>>,

    pub form: CreateForm,
    pub popup: Option<Popup>,
    pub selected_row: usize,
    pub should_quit: bool,
}

impl App {
    /// Create the app and its fetch channel from config
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::with_base_url(config.base_url.clone(), config.request_timeout())?;
        let (fetcher, event_rx) = Fetcher::new(client);
        let scheduler = RefreshScheduler::new(config.refresh_interval());

        Ok(Self {
            config,
            view: View::Dashboard,
            scheduler,
            fetcher,
            event_rx,
            notifications: NotificationManager::new(),
            stats: Loadable::Idle,
            patterns: Loadable::Idle,
            recent_flagged: Loadable::Idle,
            transactions: Loadable::Idle,
            flagged: Loadable::Idle,
            clients: Loadable::Idle,
            accounts: Loadable::Idle,
            recent_transactions: Loadable::Idle,
            form: CreateForm::new(),
            popup: None,
            selected_row: 0,
            should_quit: false,
        })
    }

    /// Switch the active view and trigger its loader
    pub fn switch_view(&mut self, view: View) {
        log::debug!("Switching view: {:?} -> {:?}", self.view, view);
        self.view = view;
        self.selected_row = 0;
        self.popup = None;
        if view.has_loader() {
            self.load_view(view);
        }
    }

    /// Re-run the loader of the current view
    pub fn reload_current_view(&mut self) {
        if self.view.has_loader() {
            self.load_view(self.view);
        }
    }

    fn load_view(&mut self, view: View) {
        match view {
            View::Dashboard => {
                self.begin(FetchTarget::Stats);
                self.begin(FetchTarget::Patterns);
                self.begin(FetchTarget::RecentFlagged);
            }
            View::Transactions => self.begin(FetchTarget::Transactions),
            View::Flagged => self.begin(FetchTarget::Flagged),
            View::Clients => self.begin(FetchTarget::Clients),
            View::Patterns => self.begin(FetchTarget::Patterns),
            View::CreateTransaction => {
                self.begin(FetchTarget::Accounts);
                self.begin(FetchTarget::RecentTransactions);
            }
            View::Search | View::Reports | View::Alerts => {}
        }
    }

    /// Issue a fetch unless one is already in flight for the target
    fn begin(&mut self, target: FetchTarget) {
        if let Some(seq) = self.scheduler.begin(target) {
            self.set_loading(target);
            self.fetcher.dispatch(target, seq);
        }
    }

    /// Issue a fetch unconditionally, superseding any in-flight request
    fn force_begin(&mut self, target: FetchTarget) {
        let seq = self.scheduler.force_begin(target);
        self.set_loading(target);
        self.fetcher.dispatch(target, seq);
    }

    fn set_loading(&mut self, target: FetchTarget) {
        match target {
            FetchTarget::Stats => self.stats = Loadable::Loading,
            FetchTarget::Patterns => self.patterns = Loadable::Loading,
            FetchTarget::RecentFlagged => self.recent_flagged = Loadable::Loading,
            FetchTarget::Transactions => self.transactions = Loadable::Loading,
            FetchTarget::Flagged => self.flagged = Loadable::Loading,
            FetchTarget::Clients => self.clients = Loadable::Loading,
            FetchTarget::Accounts => self.accounts = Loadable::Loading,
            FetchTarget::RecentTransactions => self.recent_transactions = Loadable::Loading,
            _ => {}
        }
    }

    /// Per-frame housekeeping: expire toasts, drain fetch completions,
    /// fire the periodic refresh when due
    pub fn tick(&mut self) {
        self.notifications.sweep();
        self.process_events();

        if self.scheduler.due() {
            self.scheduler.mark_ticked();
            log::debug!("Periodic refresh: {:?}", self.view);
            self.reload_current_view();
        }
    }

    /// Drain all available fetch events (non-blocking)
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Apply one fetch completion, dropping it when superseded
    pub fn apply_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Loaded { target, seq, data } => {
                if !self.scheduler.complete(target, seq) {
                    log::debug!("Dropping stale response for {:?} (seq {})", target, seq);
                    return;
                }
                self.apply_data(target, data);
            }
            FetchEvent::Failed { target, seq, error } => {
                if !self.scheduler.complete(target, seq) {
                    log::debug!("Dropping stale failure for {:?} (seq {})", target, seq);
                    return;
                }
                self.apply_failure(target, error);
            }
        }
    }

    fn apply_data(&mut self, target: FetchTarget, data: FetchData) {
        match (target, data) {
            (FetchTarget::Stats, FetchData::Stats(stats)) => {
                self.stats = Loadable::Loaded(stats);
            }
            (FetchTarget::Patterns, FetchData::Patterns(points)) => {
                self.patterns = Loadable::Loaded(points);
            }
            (FetchTarget::RecentFlagged, FetchData::Transactions(rows)) => {
                self.recent_flagged = Loadable::Loaded(rows);
            }
            (FetchTarget::Transactions, FetchData::Transactions(rows)) => {
                self.transactions = Loadable::Loaded(rows);
                self.clamp_selected_row();
            }
            (FetchTarget::Flagged, FetchData::Transactions(rows)) => {
                self.flagged = Loadable::Loaded(rows);
                self.clamp_selected_row();
            }
            (FetchTarget::Clients, FetchData::Clients(rows)) => {
                self.clients = Loadable::Loaded(rows);
                self.clamp_selected_row();
            }
            (FetchTarget::Accounts, FetchData::Accounts(rows)) => {
                self.form.clamp_selection(rows.len());
                self.accounts = Loadable::Loaded(rows);
            }
            (FetchTarget::RecentTransactions, FetchData::Transactions(mut rows)) => {
                rows.truncate(self.config.recent_limit);
                self.recent_transactions = Loadable::Loaded(rows);
            }
            (FetchTarget::TransactionDetail, FetchData::TransactionDetail(detail)) => {
                if let Some(Popup::Transaction { id, state }) = &mut self.popup {
                    if *id == detail.transaction_id {
                        *state = Loadable::Loaded(detail);
                    }
                }
            }
            (FetchTarget::ClientDetail, FetchData::ClientDetails(details)) => {
                if let Some(Popup::Client { id, state }) = &mut self.popup {
                    if *id == details.client.client_id {
                        *state = Loadable::Loaded(details);
                    }
                }
            }
            (FetchTarget::Submit, FetchData::Submission(outcome)) => {
                let accepted = self.form.apply_outcome(outcome);
                if accepted {
                    self.force_begin(FetchTarget::Accounts);
                    self.force_begin(FetchTarget::RecentTransactions);
                }
            }
            (FetchTarget::FlagAction | FetchTarget::BlockAction, FetchData::ActionDone(msg)) => {
                self.notifications.success(msg);
                self.reload_current_view();
            }
            (target, _) => log::error!("Mismatched payload for {:?}", target),
        }
    }

    fn apply_failure(&mut self, target: FetchTarget, error: String) {
        match target {
            FetchTarget::Stats => self.stats = Loadable::Error(error),
            FetchTarget::Patterns => self.patterns = Loadable::Error(error),
            FetchTarget::RecentFlagged => self.recent_flagged = Loadable::Error(error),
            FetchTarget::Transactions => self.transactions = Loadable::Error(error),
            FetchTarget::Flagged => self.flagged = Loadable::Error(error),
            FetchTarget::Clients => self.clients = Loadable::Error(error),
            FetchTarget::Accounts => {
                self.accounts = Loadable::Error(error.clone());
                self.notifications.danger("Ошибка загрузки счетов");
            }
            FetchTarget::RecentTransactions => self.recent_transactions = Loadable::Error(error),
            FetchTarget::TransactionDetail => {
                if let Some(Popup::Transaction { state, .. }) = &mut self.popup {
                    *state = Loadable::Error(error);
                }
            }
            FetchTarget::ClientDetail => {
                if let Some(Popup::Client { state, .. }) = &mut self.popup {
                    *state = Loadable::Error(error);
                }
            }
            FetchTarget::Submit => {
                self.form.abort_submission();
                self.notifications.danger(error);
            }
            FetchTarget::FlagAction | FetchTarget::BlockAction => {
                self.notifications.danger(error);
            }
        }
    }

    /// Row count of the table shown by the current view
    pub fn current_rows(&self) -> usize {
        match self.view {
            View::Transactions => self.transactions.data().map_or(0, Vec::len),
            View::Flagged => self.flagged.data().map_or(0, Vec::len),
            View::Clients => self.clients.data().map_or(0, Vec::len),
            View::Patterns => self.patterns.data().map_or(0, Vec::len),
            _ => 0,
        }
    }

    fn clamp_selected_row(&mut self) {
        let rows = self.current_rows();
        if rows == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= rows {
            self.selected_row = rows - 1;
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.popup.is_some() {
            self.handle_popup_key(key);
            return;
        }

        if self.view == View::CreateTransaction {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                log::info!("Manual refresh requested");
                self.reload_current_view();
            }
            KeyCode::Tab => self.switch_view(self.view.next()),
            KeyCode::BackTab => self.switch_view(self.view.prev()),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                self.switch_view(View::ALL[idx]);
            }
            KeyCode::Up => {
                if self.selected_row > 0 {
                    self.selected_row -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_row + 1 < self.current_rows() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Enter => self.open_selected_detail(),
            KeyCode::Char('f') => self.open_flag_popup(),
            KeyCode::Char('b') => self.open_block_confirm(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let accounts_len = self.accounts.data().map_or(0, Vec::len);
        match key.code {
            KeyCode::Esc => self.switch_view(View::Dashboard),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Up => self.form.select_prev(accounts_len),
            KeyCode::Down => self.form.select_next(accounts_len),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.input_char(c),
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let popup = match self.popup.take() {
            Some(p) => p,
            None => return,
        };

        match popup {
            Popup::Transaction { .. } | Popup::Client { .. } => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {}
                _ => self.popup = Some(popup),
            },
            Popup::ConfirmBlock {
                client_id,
                client_name,
            } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    let seq = self.scheduler.force_begin(FetchTarget::BlockAction);
                    self.fetcher
                        .block_client(client_id, BLOCK_REASON.to_string(), seq);
                }
                KeyCode::Esc | KeyCode::Char('n') => {}
                _ => {
                    self.popup = Some(Popup::ConfirmBlock {
                        client_id,
                        client_name,
                    });
                }
            },
            Popup::FlagReason {
                transaction_id,
                mut reason,
            } => match key.code {
                KeyCode::Enter => {
                    if reason.trim().is_empty() {
                        self.notifications.warning("Укажите причину пометки");
                        self.popup = Some(Popup::FlagReason {
                            transaction_id,
                            reason,
                        });
                    } else {
                        let seq = self.scheduler.force_begin(FetchTarget::FlagAction);
                        self.fetcher.flag_transaction(transaction_id, reason, seq);
                    }
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    reason.pop();
                    self.popup = Some(Popup::FlagReason {
                        transaction_id,
                        reason,
                    });
                }
                KeyCode::Char(c) if !c.is_control() => {
                    if reason.chars().count() < 120 {
                        reason.push(c);
                    }
                    self.popup = Some(Popup::FlagReason {
                        transaction_id,
                        reason,
                    });
                }
                _ => {
                    self.popup = Some(Popup::FlagReason {
                        transaction_id,
                        reason,
                    });
                }
            },
        }
    }

    /// Open the detail popup for the selected row and fetch its record
    fn open_selected_detail(&mut self) {
        match self.view {
            View::Transactions | View::Flagged => {
                let list = match self.view {
                    View::Transactions => &self.transactions,
                    _ => &self.flagged,
                };
                if let Some(tx) = list.data().and_then(|v| v.get(self.selected_row)) {
                    let id = tx.transaction_id;
                    self.popup = Some(Popup::Transaction {
                        id,
                        state: Loadable::Loading,
                    });
                    let seq = self.scheduler.force_begin(FetchTarget::TransactionDetail);
                    self.fetcher.fetch_transaction_detail(id, seq);
                }
            }
            View::Clients => {
                if let Some(client) = self.clients.data().and_then(|v| v.get(self.selected_row)) {
                    let id = client.client_id;
                    self.popup = Some(Popup::Client {
                        id,
                        state: Loadable::Loading,
                    });
                    let seq = self.scheduler.force_begin(FetchTarget::ClientDetail);
                    self.fetcher.fetch_client_detail(id, seq);
                }
            }
            _ => {}
        }
    }

    fn open_flag_popup(&mut self) {
        if !matches!(self.view, View::Transactions | View::Flagged) {
            return;
        }
        let list = match self.view {
            View::Transactions => &self.transactions,
            _ => &self.flagged,
        };
        if let Some(tx) = list.data().and_then(|v| v.get(self.selected_row)) {
            self.popup = Some(Popup::FlagReason {
                transaction_id: tx.transaction_id,
                reason: String::new(),
            });
        }
    }

    fn open_block_confirm(&mut self) {
        if self.view != View::Clients {
            return;
        }
        if let Some(client) = self.clients.data().and_then(|v| v.get(self.selected_row)) {
            if client.is_blocked {
                self.notifications.info("Клиент уже заблокирован");
                return;
            }
            self.popup = Some(Popup::ConfirmBlock {
                client_id: client.client_id,
                client_name: client.full_name(),
            });
        }
    }

    /// Validate the form and submit it; validation failures surface a
    /// toast and never reach the network
    pub fn submit_form(&mut self) {
        if self.form.is_submitting() {
            return;
        }

        let accounts = self.accounts.data().map_or(&[][..], Vec::as_slice);
        match self.form.validate(accounts) {
            Ok(request) => {
                self.form.begin_submit();
                let seq = self.scheduler.force_begin(FetchTarget::Submit);
                self.fetcher.submit_transaction(request, seq);
            }
            Err(e) => {
                self.notifications.push(e.message(), e.level());
            }
        }
    }

    /// Check if we should poll for input
    pub fn should_poll_input() -> Result<bool> {
        Ok(event::poll(Duration::from_millis(100))?)
    }

    /// Get keyboard event
    pub fn read_event() -> Result<Event> {
        Ok(event::read()?)
    }
}
