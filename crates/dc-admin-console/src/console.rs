//! Interactive admin console.
//!
//! A TUI with three areas: the current view (resource page, playground, or
//! home), the response pane mirroring the request runner, and a command
//! input with history. Every backend call is spawned through the runner
//! channel; the 100ms tick loop drains settled outcomes and re-renders.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};
use serde_json::Value;

use dc_admin_api::{
    find_endpoint, ActivitySearchRequest, CategoryNewsQuery, LoginRequest,
    NeighborCommentRequest, NoticeListQuery, PageQuery, PhoneLoginRequest, PressCommentRequest,
    RegisterRequest, RegistrationCommentRequest, RegistrationListQuery, RegistrationRequest,
    ResetPwdRequest, RotationListQuery, CODE_OK, ENDPOINT_CATALOG,
};
use dc_admin_client::{invoke_endpoint, ApiError, ApiService, PlaygroundInput, UploadSource};
use dc_admin_state::{RunnerOutcome, RunnerState};

use crate::pages::{ListView, Resource, ALL_RESOURCES};
use crate::pane;
use crate::playground_view::PlaygroundView;
use crate::runner::{outcome_channel, settle_envelope, spawn_request, OutcomeReceiver, OutcomeSender};

/// Which main view is open.
enum View {
    Home,
    List(ListView),
    Playground,
}

/// The console state.
pub struct Console {
    service: ApiService,
    runner: RunnerState,
    outcome_tx: OutcomeSender,
    outcome_rx: OutcomeReceiver,
    view: View,
    playground: PlaygroundView,
    table_page_size: u32,
    /// Current text in the input field.
    input: String,
    /// Cursor position within the input field, counted in chars.
    cursor_pos: usize,
    /// Command history for up/down arrow navigation.
    history: Vec<String>,
    history_pos: Option<usize>,
    /// Messages displayed in the console output area.
    messages: Vec<(chrono::DateTime<chrono::Utc>, String, Color)>,
    /// Sequence number of an in-flight list load for the open page.
    pending_list: Option<u64>,
    /// Sequence number of an in-flight mutation; success reloads the page.
    pending_mutation: Option<u64>,
}

impl Console {
    pub fn new(service: ApiService, table_page_size: u32) -> Self {
        let (outcome_tx, outcome_rx) = outcome_channel();
        let mut console = Self {
            service,
            runner: RunnerState::new(),
            outcome_tx,
            outcome_rx,
            view: View::Home,
            playground: PlaygroundView::new(),
            table_page_size,
            input: String::new(),
            cursor_pos: 0,
            history: Vec::new(),
            history_pos: None,
            messages: Vec::new(),
            pending_list: None,
            pending_mutation: None,
        };
        console.add_message(
            "Digital Community admin console ready. /login <user> <pass> to start.",
            Color::Cyan,
        );
        console.add_message("Commands: /help, /open <resource>, /endpoints, /quit", Color::DarkGray);
        console
    }

    fn add_message(&mut self, msg: &str, color: Color) {
        self.messages.push((chrono::Utc::now(), msg.to_string(), color));
        if self.messages.len() > 500 {
            self.messages.remove(0);
        }
    }

    /// Start one backend call through the runner.
    fn start<F>(&mut self, label: &str, fut: F) -> u64
    where
        F: std::future::Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let seq = self.runner.start(label);
        spawn_request(self.outcome_tx.clone(), seq, label.to_string(), fut);
        seq
    }

    /// Drain settled outcomes from the channel and fold them into state.
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: RunnerOutcome) {
        let seq = outcome.seq;
        let value = outcome.result.as_ref().ok().cloned();
        // A settled envelope with code != 200 still shows as a success in
        // the pane; only a logical success drives page side effects.
        let code_ok = value
            .as_ref()
            .map(|v| v["code"].as_i64() == Some(CODE_OK))
            .unwrap_or(false);
        self.runner.apply(outcome);

        if self.pending_list == Some(seq) {
            self.pending_list = None;
            if let (true, Some(value), View::List(view)) = (code_ok, &value, &mut self.view) {
                view.apply_envelope(value);
            }
        }
        if self.pending_mutation == Some(seq) {
            self.pending_mutation = None;
            if code_ok {
                self.refresh_list();
            }
        }
    }

    /// Reload the open page, if any.
    fn refresh_list(&mut self) {
        let View::List(view) = &self.view else {
            return;
        };
        let resource = view.resource;
        let page = view.page_query();
        let svc = self.service.clone();
        let label = format!("load {}", resource.name());
        let seq = self.start(&label, async move { list_envelope(svc, resource, page).await });
        self.pending_list = Some(seq);
    }

    /// Process a command or input line from the operator.
    fn process_input(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }

        self.history.push(input.clone());
        self.history_pos = None;

        if input.starts_with('/') {
            self.process_command(&input);
        } else {
            self.add_message("Commands start with '/'. Type /help.", Color::Yellow);
        }

        self.input.clear();
        self.cursor_pos = 0;
    }

    fn process_command(&mut self, cmd: &str) {
        let parts: Vec<&str> = cmd.splitn(2, ' ').collect();
        let command = parts[0];
        let args = parts.get(1).copied().unwrap_or("").trim();

        match command {
            "/help" => self.show_help(),
            "/login" => self.cmd_login(args),
            "/phonelogin" => self.cmd_phone_login(args),
            "/smscode" => self.cmd_sms_code(args),
            "/register" => self.cmd_register(args),
            "/logout" => self.cmd_logout(),
            "/whoami" => self.cmd_whoami(),
            "/resetpwd" => self.cmd_reset_pwd(args),
            "/open" => self.cmd_open(args),
            "/next" => self.cmd_page(true),
            "/prev" => self.cmd_page(false),
            "/refresh" => self.refresh_list(),
            "/create" => self.cmd_create(args),
            "/update" => self.cmd_update(args),
            "/delete" => self.cmd_delete(args),
            "/confirm" => self.cmd_confirm(),
            "/cancel" => self.cmd_cancel(),
            "/detail" => self.cmd_detail(args),
            "/comments" => self.cmd_comments(args),
            "/comment" => self.cmd_comment(args),
            "/ncomment" => self.cmd_neighbor_comment(args),
            "/newsbycat" => self.cmd_news_by_category(args),
            "/actsbycat" => self.cmd_activities_by_category(args),
            "/regs" => self.cmd_registrations(args),
            "/draw" => self.cmd_draw(args),
            "/like" => self.cmd_like(args),
            "/read" => self.cmd_read(args),
            "/top" => self.cmd_top(),
            "/search" => self.cmd_search(args),
            "/signup" => self.cmd_signup(args),
            "/checkin" => self.cmd_checkin(args),
            "/rate" => self.cmd_rate(args),
            "/endpoints" => self.cmd_endpoints(args),
            "/select" => self.cmd_select(args),
            "/path" => self.cmd_set_text(Text::Path, args),
            "/query" => self.cmd_set_text(Text::Query, args),
            "/body" => self.cmd_set_text(Text::Body, args),
            "/file" => self.cmd_file(args),
            "/send" => self.cmd_send(),
            "/quit" | "/exit" | "/q" => {
                // Handled in the event loop.
            }
            _ => {
                self.add_message(
                    &format!("Unknown command: {command}. Type /help for available commands."),
                    Color::Red,
                );
            }
        }
    }

    fn show_help(&mut self) {
        let lines = [
            ("Session:", Color::Cyan),
            ("  /login <user> <pass>          - username login", Color::White),
            ("  /phonelogin <phone> <code>    - phone + SMS login", Color::White),
            ("  /smscode <phone>              - request an SMS code", Color::White),
            ("  /register <user> <nick> <pass> <phone>", Color::White),
            ("  /logout  /whoami  /resetpwd <old> <new>", Color::White),
            ("Pages:", Color::Cyan),
            ("  /open <resource>  /next  /prev  /refresh", Color::White),
            ("  /create <json>  /update <id> <json>", Color::White),
            ("  /delete <id|url>  /confirm  /cancel", Color::White),
            ("  /detail <id>  /comments <newsId>", Color::White),
            ("Community:", Color::Cyan),
            ("  /top  /search <words>  /like <newsId>  /read <noticeId>", Color::White),
            ("  /comment <newsId> <user> <text>  /ncomment <postId> <text>", Color::White),
            ("  /newsbycat <categoryId>  /actsbycat <categoryId>  /draw <count> <level>", Color::White),
            ("  /regs [activityId|-] [userId|-]", Color::White),
            ("  /signup <activityId>  /checkin <regId>  /rate <regId> <star> <text>", Color::White),
            ("Playground:", Color::Cyan),
            ("  /endpoints [filter]  /select <key>", Color::White),
            ("  /path <json>  /query <json>  /body <json>  /file <path>  /send", Color::White),
            ("  /quit - exit", Color::White),
        ];
        for (line, color) in lines {
            self.add_message(line, color);
        }
        let names: Vec<&str> = ALL_RESOURCES.iter().map(|r| r.name()).collect();
        self.add_message(&format!("Resources: {}", names.join(", ")), Color::DarkGray);
    }

    // ── Session commands ──

    fn cmd_login(&mut self, args: &str) {
        let mut words = args.split_whitespace();
        let (Some(user), Some(pass)) = (words.next(), words.next()) else {
            self.add_message("Usage: /login <user> <pass>", Color::Yellow);
            return;
        };
        let request = LoginRequest { user_name: user.to_string(), pass_word: pass.to_string() };
        let svc = self.service.clone();
        self.start("login", async move { settle_envelope(svc.login(&request).await?) });
    }

    fn cmd_phone_login(&mut self, args: &str) {
        let mut words = args.split_whitespace();
        let (Some(phone), Some(code)) = (words.next(), words.next()) else {
            self.add_message("Usage: /phonelogin <phone> <code>", Color::Yellow);
            return;
        };
        let request =
            PhoneLoginRequest { phone: phone.to_string(), sms_code: code.to_string() };
        let svc = self.service.clone();
        self.start("phone login", async move {
            settle_envelope(svc.phone_login(&request).await?)
        });
    }

    fn cmd_sms_code(&mut self, args: &str) {
        let phone = args.trim().to_string();
        if phone.is_empty() {
            self.add_message("Usage: /smscode <phone>", Color::Yellow);
            return;
        }
        let svc = self.service.clone();
        self.start("request sms code", async move {
            settle_envelope(svc.sms_code(&phone).await?)
        });
    }

    fn cmd_register(&mut self, args: &str) {
        let words: Vec<&str> = args.split_whitespace().collect();
        let &[user, nick, pass, phone] = words.as_slice() else {
            self.add_message("Usage: /register <user> <nick> <pass> <phone>", Color::Yellow);
            return;
        };
        let request = RegisterRequest {
            user_name: user.to_string(),
            nick_name: nick.to_string(),
            pass_word: pass.to_string(),
            phone_number: phone.to_string(),
        };
        let svc = self.service.clone();
        self.start("register", async move { settle_envelope(svc.register(&request).await?) });
    }

    fn cmd_logout(&mut self) {
        let svc = self.service.clone();
        self.start("logout", async move { settle_envelope(svc.logout().await?) });
        self.add_message("Session cleared.", Color::Yellow);
    }

    fn cmd_whoami(&mut self) {
        let svc = self.service.clone();
        self.start("load profile", async move {
            settle_envelope(svc.get_user_info().await?)
        });
    }

    fn cmd_reset_pwd(&mut self, args: &str) {
        let mut words = args.split_whitespace();
        let (Some(old), Some(new)) = (words.next(), words.next()) else {
            self.add_message("Usage: /resetpwd <old> <new>", Color::Yellow);
            return;
        };
        let request =
            ResetPwdRequest { old_password: old.to_string(), new_password: new.to_string() };
        let svc = self.service.clone();
        self.start("reset password", async move {
            settle_envelope(svc.reset_pwd(&request).await?)
        });
    }

    // ── Page commands ──

    fn cmd_open(&mut self, args: &str) {
        let Some(resource) = Resource::parse(args) else {
            let names: Vec<&str> = ALL_RESOURCES.iter().map(|r| r.name()).collect();
            self.add_message(&format!("Usage: /open <{}>", names.join("|")), Color::Yellow);
            return;
        };
        self.view = View::List(ListView::new(resource, self.table_page_size));
        self.refresh_list();
    }

    fn cmd_page(&mut self, forward: bool) {
        let View::List(view) = &mut self.view else {
            self.add_message("No page open. /open <resource> first.", Color::Yellow);
            return;
        };
        let moved = if forward { view.pager.next() } else { view.pager.prev() };
        if moved {
            self.refresh_list();
        }
    }

    fn cmd_create(&mut self, args: &str) {
        let View::List(view) = &self.view else {
            self.add_message("No page open. /open <resource> first.", Color::Yellow);
            return;
        };
        let resource = view.resource;
        let Some(key) = resource.create_key() else {
            self.add_message("This resource cannot be created here.", Color::Yellow);
            return;
        };
        let input = PlaygroundInput { body: args.to_string(), ..Default::default() };
        self.invoke_mutation(key, input, &format!("create {}", resource.name()));
    }

    fn cmd_update(&mut self, args: &str) {
        let View::List(view) = &self.view else {
            self.add_message("No page open. /open <resource> first.", Color::Yellow);
            return;
        };
        let resource = view.resource;
        let Some(key) = resource.update_key() else {
            self.add_message("This resource cannot be updated here.", Color::Yellow);
            return;
        };
        let Some((id, body)) = args.split_once(' ') else {
            self.add_message("Usage: /update <id> <json>", Color::Yellow);
            return;
        };
        let input = PlaygroundInput {
            path_params: format!(r#"{{"id": "{}"}}"#, id.trim()),
            body: body.to_string(),
            ..Default::default()
        };
        self.invoke_mutation(key, input, &format!("update {}", resource.name()));
    }

    fn invoke_mutation(&mut self, key: &str, input: PlaygroundInput, label: &str) {
        let svc = self.service.clone();
        let key = key.to_string();
        let seq = self.start(label, async move { invoke_key(svc, key, input, None).await });
        self.pending_mutation = Some(seq);
    }

    /// First step of the two-step delete: arm the target.
    fn cmd_delete(&mut self, args: &str) {
        let View::List(view) = &mut self.view else {
            self.add_message("No page open. /open <resource> first.", Color::Yellow);
            return;
        };
        if args.is_empty() {
            self.add_message("Usage: /delete <id|url>", Color::Yellow);
            return;
        }
        view.pending_delete = Some(args.to_string());
        self.add_message(
            &format!("Delete {args}? /confirm to proceed, /cancel to abort."),
            Color::Yellow,
        );
    }

    fn cmd_confirm(&mut self) {
        let View::List(view) = &mut self.view else {
            return;
        };
        let Some(target) = view.pending_delete.take() else {
            self.add_message("Nothing pending. /delete <id|url> first.", Color::Yellow);
            return;
        };
        let resource = view.resource;
        let svc = self.service.clone();
        let label = format!("delete from {}", resource.name());
        let seq = self.start(&label, async move { delete_record(svc, resource, target).await });
        self.pending_mutation = Some(seq);
    }

    fn cmd_cancel(&mut self) {
        if let View::List(view) = &mut self.view {
            if view.pending_delete.take().is_some() {
                self.add_message("Delete cancelled.", Color::DarkGray);
                return;
            }
        }
        self.add_message("Nothing to cancel.", Color::DarkGray);
    }

    fn cmd_detail(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /detail <id>", Color::Yellow);
            return;
        };
        let View::List(view) = &self.view else {
            self.add_message("No page open. /open <resource> first.", Color::Yellow);
            return;
        };
        let resource = view.resource;
        let svc = self.service.clone();
        match resource {
            Resource::News => {
                self.start("news detail", async move {
                    settle_envelope(svc.press_news_detail(id).await?)
                });
            }
            Resource::Notices => {
                self.start("notice detail", async move {
                    settle_envelope(svc.notice_detail(id).await?)
                });
            }
            Resource::Neighbors => {
                self.start("post detail", async move {
                    settle_envelope(svc.neighbor_detail(id).await?)
                });
            }
            Resource::Activities => {
                self.start("activity detail", async move {
                    settle_envelope(svc.activity_detail(id).await?)
                });
            }
            _ => {
                self.add_message("No detail endpoint for this resource.", Color::Yellow);
            }
        }
    }

    fn cmd_comments(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /comments <newsId>", Color::Yellow);
            return;
        };
        let page = PageQuery::new(1, self.table_page_size);
        let svc = self.service.clone();
        self.start("load comments", async move {
            settle_envelope(svc.comment_list(id, page).await?)
        });
    }

    fn cmd_comment(&mut self, args: &str) {
        let mut words = args.splitn(3, ' ');
        let (Some(id), Some(user), Some(text)) = (words.next(), words.next(), words.next())
        else {
            self.add_message("Usage: /comment <newsId> <userName> <text>", Color::Yellow);
            return;
        };
        let request = PressCommentRequest {
            content: text.to_string(),
            news_id: id.to_string(),
            user_name: user.to_string(),
        };
        let svc = self.service.clone();
        self.start("comment on news", async move {
            settle_envelope(svc.press_comment(&request).await?)
        });
    }

    fn cmd_neighbor_comment(&mut self, args: &str) {
        let Some((id, text)) = args.split_once(' ') else {
            self.add_message("Usage: /ncomment <postId> <text>", Color::Yellow);
            return;
        };
        let Ok(neighborhood_id) = id.parse::<i64>() else {
            self.add_message("Usage: /ncomment <postId> <text>", Color::Yellow);
            return;
        };
        let request =
            NeighborCommentRequest { content: text.to_string(), neighborhood_id };
        let svc = self.service.clone();
        self.start("comment on post", async move {
            settle_envelope(svc.neighbor_add_comment(&request).await?)
        });
    }

    fn cmd_news_by_category(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /newsbycat <categoryId>", Color::Yellow);
            return;
        };
        let query = CategoryNewsQuery { page: PageQuery::new(1, self.table_page_size), id };
        let svc = self.service.clone();
        self.start("news by category", async move {
            settle_envelope(svc.press_category_news_list(&query).await?)
        });
    }

    fn cmd_activities_by_category(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /actsbycat <categoryId>", Color::Yellow);
            return;
        };
        let page = PageQuery::new(1, self.table_page_size);
        let svc = self.service.clone();
        self.start("activities by category", async move {
            settle_envelope(svc.activity_category_list(id, page).await?)
        });
    }

    /// Registration list with the optional activity/user filters.
    fn cmd_registrations(&mut self, args: &str) {
        let mut words = args.split_whitespace();
        let activity_id = words.next().filter(|w| *w != "-").map(str::to_string);
        let user_id = words.next().filter(|w| *w != "-").map(str::to_string);
        let query = RegistrationListQuery {
            page: PageQuery::new(1, self.table_page_size),
            activity_id,
            user_id,
        };
        let svc = self.service.clone();
        self.start("load registrations", async move {
            settle_envelope(svc.registration_list(&query).await?)
        });
    }

    fn cmd_draw(&mut self, args: &str) {
        let mut words = args.split_whitespace();
        let (Some(count), Some(level)) = (words.next(), words.next()) else {
            self.add_message("Usage: /draw <count> <level>", Color::Yellow);
            return;
        };
        let Ok(count) = count.parse::<i64>() else {
            self.add_message("Usage: /draw <count> <level>", Color::Yellow);
            return;
        };
        let level = level.to_string();
        let svc = self.service.clone();
        self.start("draw questions", async move {
            settle_envelope(svc.question_draw(count, &level).await?)
        });
    }

    fn cmd_like(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /like <newsId>", Color::Yellow);
            return;
        };
        let svc = self.service.clone();
        self.start("like news", async move { settle_envelope(svc.press_like(id).await?) });
    }

    fn cmd_read(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /read <noticeId>", Color::Yellow);
            return;
        };
        let svc = self.service.clone();
        self.start("mark notice read", async move {
            settle_envelope(svc.read_notice(id).await?)
        });
    }

    fn cmd_top(&mut self) {
        let page = PageQuery::new(1, self.table_page_size);
        let svc = self.service.clone();
        self.start("top activities", async move {
            settle_envelope(svc.activity_top_list(page).await?)
        });
    }

    fn cmd_search(&mut self, args: &str) {
        if args.is_empty() {
            self.add_message("Usage: /search <words>", Color::Yellow);
            return;
        }
        let request = ActivitySearchRequest { words: args.to_string() };
        let page = PageQuery::new(1, self.table_page_size);
        let svc = self.service.clone();
        self.start("search activities", async move {
            settle_envelope(svc.activity_search(&request, page).await?)
        });
    }

    fn cmd_signup(&mut self, args: &str) {
        let Ok(activity_id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /signup <activityId>", Color::Yellow);
            return;
        };
        let request = RegistrationRequest { activity_id };
        let svc = self.service.clone();
        self.start("sign up", async move {
            settle_envelope(svc.registration(&request).await?)
        });
    }

    fn cmd_checkin(&mut self, args: &str) {
        let Ok(id) = args.trim().parse::<i64>() else {
            self.add_message("Usage: /checkin <registrationId>", Color::Yellow);
            return;
        };
        let svc = self.service.clone();
        self.start("check in", async move { settle_envelope(svc.checkin(id).await?) });
    }

    fn cmd_rate(&mut self, args: &str) {
        let mut words = args.splitn(3, ' ');
        let (Some(id), Some(star), Some(text)) = (words.next(), words.next(), words.next())
        else {
            self.add_message("Usage: /rate <registrationId> <star 1-5> <text>", Color::Yellow);
            return;
        };
        let (Ok(id), Ok(star)) = (id.parse::<i64>(), star.parse::<i64>()) else {
            self.add_message("Usage: /rate <registrationId> <star 1-5> <text>", Color::Yellow);
            return;
        };
        let request = RegistrationCommentRequest { evaluate: text.to_string(), star };
        let svc = self.service.clone();
        self.start("rate activity", async move {
            settle_envelope(svc.registration_comment(id, &request).await?)
        });
    }

    // ── Playground commands ──

    fn cmd_endpoints(&mut self, filter: &str) {
        self.view = View::Playground;
        let matching: Vec<String> = ENDPOINT_CATALOG
            .iter()
            .filter(|e| {
                filter.is_empty() || e.key.contains(filter) || e.path.contains(filter)
            })
            .map(|e| format!("  {:28} {:6} {}", e.key, e.method.as_str(), e.path))
            .collect();
        if matching.is_empty() {
            self.add_message(&format!("No endpoints match '{filter}'."), Color::Yellow);
            return;
        }
        self.add_message(&format!("Endpoints ({}):", matching.len()), Color::Cyan);
        for line in matching {
            self.add_message(&line, Color::White);
        }
    }

    fn cmd_select(&mut self, key: &str) {
        self.view = View::Playground;
        match self.playground.select(key) {
            Ok(endpoint) => {
                self.add_message(
                    &format!("Selected {} {} {}", endpoint.key, endpoint.method.as_str(), endpoint.path),
                    Color::Green,
                );
            }
            Err(msg) => self.add_message(&msg, Color::Red),
        }
    }

    fn cmd_set_text(&mut self, which: Text, args: &str) {
        if self.playground.endpoint().is_none() {
            self.add_message("No endpoint selected. /select <key> first.", Color::Yellow);
            return;
        }
        match which {
            Text::Path => self.playground.input.path_params = args.to_string(),
            Text::Query => self.playground.input.query = args.to_string(),
            Text::Body => self.playground.input.body = args.to_string(),
        }
    }

    fn cmd_file(&mut self, args: &str) {
        if args.is_empty() {
            self.add_message("Usage: /file <path>", Color::Yellow);
            return;
        }
        self.playground.file_path = Some(args.into());
    }

    fn cmd_send(&mut self) {
        let Some(endpoint) = self.playground.endpoint() else {
            self.add_message("No endpoint selected. /select <key> first.", Color::Yellow);
            return;
        };
        let upload = if self.playground.is_upload() {
            match self.playground.load_upload() {
                Ok(upload) => upload,
                Err(e) => {
                    self.add_message(&format!("Cannot read file: {e}"), Color::Red);
                    return;
                }
            }
        } else {
            None
        };
        let svc = self.service.clone();
        let key = endpoint.key.to_string();
        let input = self.playground.input.clone();
        let label = format!("{} {}", endpoint.method.as_str(), endpoint.path);
        self.start(&label, async move { invoke_key(svc, key, input, upload).await });
    }

    // ── Rendering ──

    fn render(&self, frame: &mut Frame) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // View + response pane
                Constraint::Length(5), // Input area
            ])
            .split(frame.area());

        self.render_status_bar(frame, outer[0]);
        self.render_main_area(frame, outer[1]);
        self.render_input(frame, outer[2]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Digital Community Admin Console ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let auth = self.service.transport().auth().is_authenticated();
        let view_name = match &self.view {
            View::Home => "home".to_string(),
            View::List(view) => view.resource.name().to_string(),
            View::Playground => "playground".to_string(),
        };

        let status_line = Line::from(vec![
            Span::styled("  Backend: ", Style::default().fg(Color::Gray)),
            Span::styled(
                self.service.transport().base_url().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::styled("  |  Session: ", Style::default().fg(Color::Gray)),
            if auth {
                Span::styled("authenticated", Style::default().fg(Color::Green))
            } else {
                Span::styled("signed out", Style::default().fg(Color::Yellow))
            },
            Span::styled("  |  View: ", Style::default().fg(Color::Gray)),
            Span::styled(view_name, Style::default().fg(Color::LightCyan)),
        ]);

        frame.render_widget(Paragraph::new(status_line).block(block), area);
    }

    fn render_main_area(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        match &self.view {
            View::Home => self.render_messages(frame, columns[0], " Console Output "),
            View::List(view) => self.render_list(frame, columns[0], view),
            View::Playground => self.render_playground(frame, columns[0]),
        }

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);
        self.render_response_pane(frame, right[0]);
        self.render_messages(frame, right[1], " Messages ");
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, view: &ListView) {
        let title = format!(
            " {} - page {}/{} ({} total) ",
            view.resource.title(),
            view.pager.page_num(),
            view.pager.total_pages(),
            view.pager.total()
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        if view.rows.is_empty() {
            let hint = if self.runner.loading {
                "  Loading..."
            } else {
                "  No rows on this page."
            };
            let text = Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        }

        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|row| {
                let id = row.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
                let armed = view
                    .pending_delete
                    .as_deref()
                    .map(|target| target == id || row.detail.contains(target))
                    .unwrap_or(false);
                let label_style = if armed {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    ratatui::widgets::Cell::from(Span::styled(
                        format!("  {id}"),
                        Style::default().fg(Color::Yellow),
                    )),
                    ratatui::widgets::Cell::from(Span::styled(row.label.clone(), label_style)),
                    ratatui::widgets::Cell::from(Span::styled(
                        row.detail.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Percentage(40),
                Constraint::Percentage(52),
            ],
        )
        .block(block)
        .header(
            Row::new(vec!["  ID", "Name", "Details"])
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(table, area);
    }

    fn render_playground(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" API Playground ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let mut lines: Vec<Line> = self
            .playground
            .summary_lines()
            .into_iter()
            .map(|l| Line::from(Span::styled(format!("  {l}"), Style::default().fg(Color::White))))
            .collect();
        lines.push(Line::from(""));
        for (name, text) in [
            ("path ", &self.playground.input.path_params),
            ("query", &self.playground.input.query),
            ("body ", &self.playground.input.body),
        ] {
            let shown = if text.is_empty() { "{}" } else { text.as_str() };
            lines.push(Line::from(vec![
                Span::styled(format!("  {name}: "), Style::default().fg(Color::Gray)),
                Span::styled(shown.to_string(), Style::default().fg(Color::LightCyan)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  /path /query /body set parameters, /send dispatches.",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_response_pane(&self, frame: &mut Frame, area: Rect) {
        let badge = pane::badge(&self.runner);
        let badge_color = match badge {
            pane::PaneBadge::Idle => Color::DarkGray,
            pane::PaneBadge::Loading => Color::Yellow,
            pane::PaneBadge::Error => Color::Red,
            pane::PaneBadge::Success => Color::Green,
        };
        let block = Block::default()
            .title(format!(" Response [{}] ", badge.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(badge_color));

        let visible_height = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = pane::body_lines(&self.runner)
            .into_iter()
            .take(visible_height)
            .map(|l| Line::from(Span::styled(format!("  {l}"), Style::default().fg(Color::White))))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let inner_height = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(inner_height);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|(ts, msg, color)| {
                Line::from(vec![
                    Span::styled(
                        format!("  [{}] ", ts.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(msg.as_str(), Style::default().fg(*color)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Command Input (/help = commands, /quit = exit) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let input_display = if self.input.is_empty() {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Green)),
                Span::styled("Type a /command...", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Green)),
                Span::styled(&self.input, Style::default().fg(Color::White)),
            ])
        };

        let hint_line = Line::from(Span::styled(
            "  Ctrl+C or /quit to exit  |  Up/Down for history  |  PgUp/PgDn to page",
            Style::default().fg(Color::DarkGray),
        ));

        let paragraph =
            Paragraph::new(vec![Line::from(""), input_display, hint_line]).block(block);
        frame.render_widget(paragraph, area);

        let cursor_x = area.x + 4 + self.cursor_pos as u16;
        let cursor_y = area.y + 2;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    /// Byte offset of the cursor. `cursor_pos` counts chars; string edits
    /// need a byte index or they split multi-byte input (e.g. Chinese).
    fn cursor_byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn input_char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Handle keyboard input. Returns `true` if the console should exit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Char(c), _) => {
                let at = self.cursor_byte_index();
                self.input.insert(at, c);
                self.cursor_pos += 1;
            }
            (KeyCode::Backspace, _) => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let at = self.cursor_byte_index();
                    self.input.remove(at);
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor_pos < self.input_char_count() {
                    let at = self.cursor_byte_index();
                    self.input.remove(at);
                }
            }
            (KeyCode::Left, _) => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                }
            }
            (KeyCode::Right, _) => {
                if self.cursor_pos < self.input_char_count() {
                    self.cursor_pos += 1;
                }
            }
            (KeyCode::Home, _) => self.cursor_pos = 0,
            (KeyCode::End, _) => self.cursor_pos = self.input_char_count(),
            (KeyCode::Up, _) => {
                if !self.history.is_empty() {
                    let pos = match self.history_pos {
                        Some(p) if p > 0 => p - 1,
                        Some(p) => p,
                        None => self.history.len() - 1,
                    };
                    self.history_pos = Some(pos);
                    self.input = self.history[pos].clone();
                    self.cursor_pos = self.input.chars().count();
                }
            }
            (KeyCode::Down, _) => {
                if let Some(pos) = self.history_pos {
                    if pos + 1 < self.history.len() {
                        let new_pos = pos + 1;
                        self.history_pos = Some(new_pos);
                        self.input = self.history[new_pos].clone();
                        self.cursor_pos = self.input.chars().count();
                    } else {
                        self.history_pos = None;
                        self.input.clear();
                        self.cursor_pos = 0;
                    }
                }
            }
            (KeyCode::PageUp, _) => self.cmd_page(false),
            (KeyCode::PageDown, _) => self.cmd_page(true),
            (KeyCode::Enter, _) => {
                // Handled by caller.
            }
            _ => {}
        }
        false
    }
}

enum Text {
    Path,
    Query,
    Body,
}

/// Fetch one page of a resource and settle its envelope.
async fn list_envelope(
    svc: ApiService,
    resource: Resource,
    page: PageQuery,
) -> Result<Value, ApiError> {
    match resource {
        Resource::Users => settle_envelope(svc.user_list(page).await?),
        Resource::News => settle_envelope(svc.press_news_list(page).await?),
        Resource::NewsCategories => settle_envelope(svc.press_category_list(page).await?),
        Resource::Notices => {
            let query = NoticeListQuery { page, notice_status: String::new() };
            settle_envelope(svc.notice_list(&query).await?)
        }
        Resource::Rotations => {
            let query = RotationListQuery { page, kind: String::new() };
            settle_envelope(svc.rotation_list(&query).await?)
        }
        Resource::Neighbors => settle_envelope(svc.neighbor_list(page).await?),
        Resource::Activities => settle_envelope(svc.activity_list(page).await?),
        Resource::Registrations => {
            let query = RegistrationListQuery { page, activity_id: None, user_id: None };
            settle_envelope(svc.registration_list(&query).await?)
        }
        Resource::Questions => settle_envelope(svc.question_list(page).await?),
        Resource::DataCards => settle_envelope(svc.data_card_list().await?),
        Resource::DataSeries => settle_envelope(svc.data_series_list(page).await?),
        Resource::Images => settle_envelope(svc.image_list(page).await?),
        Resource::Files => settle_envelope(svc.file_list(page).await?),
    }
}

/// Delete a record from a page; media resources are addressed by URL.
async fn delete_record(
    svc: ApiService,
    resource: Resource,
    target: String,
) -> Result<Value, ApiError> {
    if resource.deletes_by_url() {
        let envelope = match resource {
            Resource::Images => svc.image_delete(&target).await?,
            _ => svc.file_delete(&target).await?,
        };
        return settle_envelope(envelope);
    }
    let id: i64 = target
        .parse()
        .map_err(|_| ApiError::MissingPathParam("id".to_string()))?;
    let envelope = match resource {
        Resource::Users => svc.user_delete(id).await?,
        Resource::News => svc.press_news_delete(id).await?,
        Resource::NewsCategories => svc.press_category_delete(id).await?,
        Resource::Notices => svc.notice_delete(id).await?,
        Resource::Rotations => svc.rotation_delete(id).await?,
        Resource::Neighbors => svc.neighbor_delete(id).await?,
        Resource::Activities => svc.activity_delete(id).await?,
        Resource::Questions => svc.question_delete(id).await?,
        Resource::DataCards => svc.data_card_delete(id).await?,
        Resource::DataSeries => svc.data_series_delete(id).await?,
        Resource::Registrations | Resource::Images | Resource::Files => {
            return Err(ApiError::UnknownEndpoint(format!(
                "{} delete",
                resource.name()
            )))
        }
    };
    settle_envelope(envelope)
}

/// Invoke a catalog entry dynamically, as the playground does.
async fn invoke_key(
    svc: ApiService,
    key: String,
    input: PlaygroundInput,
    upload: Option<UploadSource>,
) -> Result<Value, ApiError> {
    let endpoint = find_endpoint(&key).ok_or(ApiError::UnknownEndpoint(key))?;
    invoke_endpoint(svc.transport(), endpoint, &input, upload.as_ref()).await
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the console event loop until the operator quits.
pub async fn run_console(service: ApiService, table_page_size: u32) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!("the admin console requires a terminal (TTY)"));
    }

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut console = Console::new(service, table_page_size);

    let tick_rate = Duration::from_millis(100);

    loop {
        console.drain_outcomes();

        terminal.draw(|frame| {
            console.render(frame);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if key_event.code == KeyCode::Enter {
                        let trimmed = console.input.trim().to_string();
                        if trimmed == "/quit" || trimmed == "/exit" || trimmed == "/q" {
                            break;
                        }
                        console.process_input();
                    } else if console.handle_key(key_event.code, key_event.modifiers) {
                        break; // Ctrl+C
                    }
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use dc_admin_client::{Transport, TransportConfig};
    use dc_admin_state::AuthStore;

    fn console() -> Console {
        let config = TransportConfig::default();
        let transport = Transport::new(&config, Arc::new(AuthStore::in_memory())).unwrap();
        Console::new(ApiService::new(transport), 10)
    }

    #[tokio::test]
    async fn test_open_starts_a_list_load() {
        let mut c = console();
        c.input = "/open users".to_string();
        c.process_input();

        assert!(matches!(c.view, View::List(_)));
        assert!(c.runner.loading);
        assert!(c.pending_list.is_some());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let mut c = console();
        c.input = "/open notices".to_string();
        c.process_input();

        c.input = "/delete 5".to_string();
        c.process_input();
        let View::List(view) = &c.view else { panic!("list view expected") };
        assert_eq!(view.pending_delete.as_deref(), Some("5"));

        c.input = "/cancel".to_string();
        c.process_input();
        let View::List(view) = &c.view else { panic!("list view expected") };
        assert!(view.pending_delete.is_none());
    }

    #[tokio::test]
    async fn test_list_outcome_fills_the_open_page() {
        let mut c = console();
        c.input = "/open users".to_string();
        c.process_input();
        let seq = c.pending_list.unwrap();

        c.apply_outcome(RunnerOutcome {
            seq,
            label: "load users".into(),
            result: Ok(serde_json::json!({
                "code": 200,
                "msg": "ok",
                "data": [{ "ID": 3, "userName": "test01" }],
                "total": 1
            })),
        });

        let View::List(view) = &c.view else { panic!("list view expected") };
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.pager.total(), 1);
        assert!(c.pending_list.is_none());
    }

    #[tokio::test]
    async fn test_stale_list_outcome_does_not_fill_rows() {
        let mut c = console();
        c.input = "/open users".to_string();
        c.process_input();
        let first = c.pending_list.unwrap();

        // A refresh supersedes the first load.
        c.refresh_list();
        assert_ne!(c.pending_list, Some(first));

        c.apply_outcome(RunnerOutcome {
            seq: first,
            label: "load users".into(),
            result: Ok(serde_json::json!({ "code": 200, "data": [{"ID": 1}], "total": 1 })),
        });
        let View::List(view) = &c.view else { panic!("list view expected") };
        assert!(view.rows.is_empty(), "stale outcome must not populate the page");
    }

    #[tokio::test]
    async fn test_playground_select_and_text_commands() {
        let mut c = console();
        c.input = "/select noticeDetail".to_string();
        c.process_input();
        assert!(matches!(c.view, View::Playground));
        assert_eq!(c.playground.endpoint().unwrap().key, "noticeDetail");

        c.input = r#"/path {"id": 3}"#.to_string();
        c.process_input();
        assert_eq!(c.playground.input.path_params, r#"{"id": 3}"#);
    }

    #[tokio::test]
    async fn test_input_accepts_multibyte_characters() {
        let mut c = console();
        for ch in "停水通知".chars() {
            c.handle_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
        c.handle_key(KeyCode::Char('!'), KeyModifiers::NONE);
        assert_eq!(c.input, "停水通知!");

        c.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        c.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(c.input, "停水通");
    }

    #[tokio::test]
    async fn test_input_edits_at_a_multibyte_cursor() {
        let mut c = console();
        c.handle_key(KeyCode::Char('中'), KeyModifiers::NONE);
        c.handle_key(KeyCode::Char('文'), KeyModifiers::NONE);
        c.handle_key(KeyCode::Left, KeyModifiers::NONE);
        c.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(c.input, "中a文");

        c.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(c.input, "中a");
    }

    #[tokio::test]
    async fn test_soft_failure_settles_as_success_without_reload() {
        let mut c = console();
        c.input = "/open users".to_string();
        c.process_input();
        let seq = c.pending_list.unwrap();
        c.apply_outcome(RunnerOutcome {
            seq,
            label: "load users".into(),
            result: Ok(serde_json::json!({ "code": 200, "data": [], "total": 0 })),
        });
        assert!(c.pending_list.is_none());

        c.pending_mutation = Some(99);
        c.apply_outcome(RunnerOutcome {
            seq: 99,
            label: "create users".into(),
            result: Ok(serde_json::json!({ "code": 500, "msg": "title required" })),
        });

        // The pane shows the raw envelope as a success, but the failing
        // logical code must not trigger a page reload.
        assert!(c.runner.error.is_empty());
        assert_eq!(c.runner.result.as_ref().unwrap()["code"], 500);
        assert!(c.pending_list.is_none());
    }

    #[tokio::test]
    async fn test_successful_mutation_reloads_the_page() {
        let mut c = console();
        c.input = "/open users".to_string();
        c.process_input();
        let seq = c.pending_list.unwrap();
        c.apply_outcome(RunnerOutcome {
            seq,
            label: "load users".into(),
            result: Ok(serde_json::json!({ "code": 200, "data": [], "total": 0 })),
        });

        c.pending_mutation = Some(99);
        c.apply_outcome(RunnerOutcome {
            seq: 99,
            label: "create users".into(),
            result: Ok(serde_json::json!({ "code": 200, "msg": "ok" })),
        });
        assert!(c.pending_list.is_some(), "logical success reloads the open page");
    }

    #[tokio::test]
    async fn test_unknown_command_is_reported() {
        let mut c = console();
        let before = c.messages.len();
        c.input = "/frobnicate".to_string();
        c.process_input();
        assert!(c.messages.len() > before);
        assert!(c.messages.last().unwrap().1.contains("Unknown command"));
    }
}
