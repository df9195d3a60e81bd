//! In-memory fakes for exercising handlers and the dispatcher without Discord

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::Value;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;

use super::context::CommandContext;
use super::event::{CommandEvent, MessageEvent, Reply};
use super::handler::SlashCommandHandler;
use super::options::CommandOptions;
use crate::features::{MessageStore, ResponseStore};

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps every record logged on the current thread
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = record.args().to_string();
        CAPTURED.with(|captured| captured.borrow_mut().push((record.level(), line)));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Start capturing log records for this thread, dropping earlier ones
///
/// Tests run on their own thread (a `#[tokio::test]` runtime polls on it
/// too), so captures from parallel tests do not mix.
pub fn capture_logs() {
    INSTALL_LOGGER.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Messages captured at `level` since [`capture_logs`]
pub fn logged(level: Level) -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    })
}

/// A context backed by stores in `dir`; keep the dir alive for the test
pub async fn context_in(dir: &TempDir, owner_id: Option<u64>) -> Arc<CommandContext> {
    let responses = ResponseStore::open(dir.path().join("responses.json"))
        .await
        .unwrap();
    let messages = MessageStore::open(dir.path().join("messages.json"))
        .await
        .unwrap();
    Arc::new(CommandContext::new(
        Arc::new(responses),
        Arc::new(messages),
        owner_id,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sent {
    Reply,
    FollowUp,
}

/// A command invocation that records what was sent back
pub struct FakeCommandEvent {
    pub name: String,
    pub options: CommandOptions,
    pub user_id: u64,
    pub administrator: bool,
    pub guild: bool,
    /// Messages available to `delete_recent_messages`; `None` makes it fail
    pub deletable: Option<usize>,
    replied: AtomicBool,
    sent: Mutex<Vec<(Sent, Reply)>>,
    delete_requests: Mutex<Vec<u64>>,
}

impl FakeCommandEvent {
    pub fn new<I, K>(name: &str, options: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            name: name.to_string(),
            options: CommandOptions::from_pairs(options),
            user_id: 1,
            administrator: false,
            guild: true,
            deletable: Some(100),
            replied: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
            delete_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn from_user(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn as_admin(mut self) -> Self {
        self.administrator = true;
        self
    }

    pub fn in_dm(mut self) -> Self {
        self.guild = false;
        self
    }

    pub fn with_deletable(mut self, deletable: Option<usize>) -> Self {
        self.deletable = deletable;
        self
    }

    pub fn sent(&self) -> Vec<(Sent, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    /// The only message sent; panics if there were zero or several
    pub fn single(&self) -> (Sent, Reply) {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one message, got {sent:?}");
        sent[0].clone()
    }

    pub fn delete_requests(&self) -> Vec<u64> {
        self.delete_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandEvent for FakeCommandEvent {
    fn command_name(&self) -> &str {
        &self.name
    }

    fn options(&self) -> &CommandOptions {
        &self.options
    }

    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn is_administrator(&self) -> bool {
        self.administrator
    }

    fn in_guild(&self) -> bool {
        self.guild
    }

    fn replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        if self.replied.swap(true, Ordering::SeqCst) {
            return Err(anyhow!("interaction already acknowledged"));
        }
        self.sent.lock().unwrap().push((Sent::Reply, reply));
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<()> {
        if !self.replied() {
            return Err(anyhow!("unknown webhook"));
        }
        self.sent.lock().unwrap().push((Sent::FollowUp, reply));
        Ok(())
    }

    async fn delete_recent_messages(&self, limit: u64) -> Result<usize> {
        self.delete_requests.lock().unwrap().push(limit);
        match self.deletable {
            Some(available) => Ok(available.min(limit as usize)),
            None => Err(anyhow!("Missing Permissions")),
        }
    }
}

/// A posted message that records replies
pub struct FakeMessage {
    pub content: String,
    pub bot_author: bool,
    pub mentions: Vec<u64>,
    pub everyone: bool,
    pub roles: Vec<u64>,
    /// Roles held by every user in the fake guild
    pub member_roles: Vec<u64>,
    replies: Mutex<Vec<String>>,
}

impl FakeMessage {
    pub fn new(content: &str, mentions: Vec<u64>) -> Self {
        Self {
            content: content.to_string(),
            bot_author: false,
            mentions,
            everyone: false,
            roles: Vec::new(),
            member_roles: Vec::new(),
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageEvent for FakeMessage {
    fn content(&self) -> &str {
        &self.content
    }

    fn author_is_bot(&self) -> bool {
        self.bot_author
    }

    fn mentions(&self) -> Vec<u64> {
        self.mentions.clone()
    }

    fn mentions_everyone(&self) -> bool {
        self.everyone
    }

    fn mentioned_roles(&self) -> Vec<u64> {
        self.roles.clone()
    }

    fn roles_of(&self, _user_id: u64) -> Vec<u64> {
        self.member_roles.clone()
    }

    async fn reply(&self, content: &str) -> Result<()> {
        self.replies.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

/// What a [`ScriptedHandler`] does when invoked
#[derive(Debug, Clone, Copy)]
pub enum Script {
    Succeed,
    FailBeforeReply,
    FailAfterReply,
}

/// A handler with a fixed behaviour that counts its invocations
pub struct ScriptedHandler {
    pub name: &'static str,
    pub script: Script,
    pub calls: AtomicUsize,
}

impl ScriptedHandler {
    pub fn new(name: &'static str, script: Script) -> Arc<Self> {
        Arc::new(Self {
            name,
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SlashCommandHandler for ScriptedHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, _ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Succeed => event.reply(Reply::public("ok")).await,
            Script::FailBeforeReply => Err(anyhow!("boom before reply")),
            Script::FailAfterReply => {
                event.reply(Reply::public("working on it")).await?;
                Err(anyhow!("boom after reply"))
            }
        }
    }
}
