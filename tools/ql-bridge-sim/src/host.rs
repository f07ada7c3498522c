//! Simulated desktop host.
//!
//! Reads the requests the transport posts, answers each one after a delay on
//! its own task (so replies come back in whatever order the delays dictate),
//! and pushes events the way the real shell does after state changes.

use dashmap::{DashMap, DashSet};
use ql_01_correlation_transport::{HostMessage, Reply, RequestEnvelope};
use ql_02_command_facade::{channels, names};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// In-process stand-in for the desktop shell.
pub struct SimulatedHost {
    inbound: mpsc::UnboundedSender<HostMessage>,
    latency: Duration,
    delays: DashMap<String, Duration>,
    silent: DashSet<String>,
    settings: Mutex<Value>,
    files: DashMap<String, String>,
    clipboard: Mutex<Option<String>>,
    opened_urls: Mutex<Vec<String>>,
    dialog_selection: Mutex<Option<Vec<String>>>,
    maximized: Mutex<bool>,
}

impl SimulatedHost {
    pub fn new(inbound: mpsc::UnboundedSender<HostMessage>, latency: Duration) -> Self {
        Self {
            inbound,
            latency,
            delays: DashMap::new(),
            silent: DashSet::new(),
            settings: Mutex::new(json!({ "theme": "dark", "fontSize": 14 })),
            files: DashMap::new(),
            clipboard: Mutex::new(None),
            opened_urls: Mutex::new(Vec::new()),
            dialog_selection: Mutex::new(None),
            maximized: Mutex::new(false),
        }
    }

    /// Answer `channel` after `delay` instead of the default latency.
    pub fn set_channel_delay(&self, channel: &str, delay: Duration) {
        self.delays.insert(channel.to_string(), delay);
    }

    /// Never answer requests on `channel`.
    pub fn silence_channel(&self, channel: &str) {
        self.silent.insert(channel.to_string());
    }

    /// What the next open dialog returns. `None` simulates cancel.
    pub fn set_dialog_selection(&self, selection: Option<Vec<String>>) {
        *lock(&self.dialog_selection) = selection;
    }

    pub fn insert_file(&self, path: &str, contents: &str) {
        self.files.insert(path.to_string(), contents.to_string());
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.get(path).map(|f| f.value().clone())
    }

    pub fn settings(&self) -> Value {
        lock(&self.settings).clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        lock(&self.clipboard).clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        lock(&self.opened_urls).clone()
    }

    pub fn is_maximized(&self) -> bool {
        *lock(&self.maximized)
    }

    /// Push a host-initiated event. Returns `false` once the app side is gone.
    pub fn push_event(&self, event_name: &str, data: Value) -> bool {
        self.inbound
            .send(HostMessage::Event {
                name: event_name.to_string(),
                data,
            })
            .is_ok()
    }

    /// Serve requests until the transport side drops its sender.
    pub fn spawn(self: &Arc<Self>, mut requests: mpsc::UnboundedReceiver<RequestEnvelope>) -> JoinHandle<()> {
        let host = Arc::clone(self);
        tokio::spawn(async move {
            info!("Simulated host serving requests");
            while let Some(request) = requests.recv().await {
                if host.silent.contains(&request.channel) {
                    debug!(channel = %request.channel, "Silenced channel, not replying");
                    continue;
                }

                let host = Arc::clone(&host);
                tokio::spawn(async move {
                    tokio::time::sleep(host.delay_for(&request.channel)).await;
                    let reply = host.answer(&request);
                    let delivered = host
                        .inbound
                        .send(HostMessage::Reply {
                            callback_id: request.callback_id.to_string(),
                            reply,
                        })
                        .is_ok();
                    if !delivered {
                        debug!(channel = %request.channel, "App side gone, reply discarded");
                    }
                });
            }
            info!("Request channel closed, simulated host stopping");
        })
    }

    fn delay_for(&self, channel: &str) -> Duration {
        self.delays
            .get(channel)
            .map(|d| *d.value())
            .unwrap_or(self.latency)
    }

    /// Compute the wire reply for one request.
    pub fn answer(&self, request: &RequestEnvelope) -> Value {
        match self.execute(&request.channel, &request.data) {
            Ok(data) => Reply::success(data),
            Err(message) => Reply::error(message),
        }
    }

    fn execute(&self, channel: &str, data: &Value) -> Result<Value, String> {
        match channel {
            channels::GET_SETTINGS => Ok(self.settings()),
            channels::SAVE_SETTINGS => {
                let settings = data
                    .get("settings")
                    .filter(|s| s.is_object())
                    .cloned()
                    .ok_or_else(|| "Invalid settings payload".to_string())?;
                *lock(&self.settings) = settings.clone();
                self.push_event(names::SETTINGS_CHANGED, settings);
                Ok(Value::Null)
            }
            channels::WINDOW_MINIMIZE | channels::WINDOW_CLOSE => Ok(Value::Null),
            channels::WINDOW_MAXIMIZE => {
                let mut maximized = lock(&self.maximized);
                *maximized = !*maximized;
                Ok(Value::Null)
            }
            channels::READ_FILE => {
                let path = str_arg(data, "path")?;
                self.file(path)
                    .map(Value::String)
                    .ok_or_else(|| format!("ENOENT: no such file or directory, open '{path}'"))
            }
            channels::WRITE_FILE => {
                let path = str_arg(data, "path")?;
                let contents = str_arg(data, "contents")?;
                self.insert_file(path, contents);
                self.push_event(names::FILE_CHANGED, json!({ "path": path }));
                Ok(Value::Null)
            }
            channels::SHOW_OPEN_DIALOG => {
                serde_json::to_value(&*lock(&self.dialog_selection)).map_err(|e| e.to_string())
            }
            channels::CLIPBOARD_WRITE_TEXT => {
                let text = str_arg(data, "text")?;
                *lock(&self.clipboard) = Some(text.to_string());
                Ok(Value::Null)
            }
            channels::OPEN_EXTERNAL => {
                let url = str_arg(data, "url")?;
                lock(&self.opened_urls).push(url.to_string());
                Ok(Value::Null)
            }
            other => Err(format!("Unknown channel: {other}")),
        }
    }
}

fn str_arg<'a>(data: &'a Value, key: &str) -> Result<&'a str, String> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Missing argument: {key}"))
}

// Host state stays consistent even if a holder panicked mid-update.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
