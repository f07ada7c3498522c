//! Host command catalogue.
//!
//! Typed call-sites for the host operations the application uses. Each one
//! packages its arguments and delegates to [`CommandFacade::call`]; none of
//! them adds behaviour of its own.

use crate::facade::CommandFacade;
use ql_01_correlation_transport::BridgeResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Channel names understood by the desktop host.
pub mod channels {
    pub const GET_SETTINGS: &str = "getSettings";
    pub const SAVE_SETTINGS: &str = "saveSettings";
    pub const WINDOW_MINIMIZE: &str = "windowMinimize";
    pub const WINDOW_MAXIMIZE: &str = "windowMaximize";
    pub const WINDOW_CLOSE: &str = "windowClose";
    pub const READ_FILE: &str = "readFile";
    pub const WRITE_FILE: &str = "writeFile";
    pub const SHOW_OPEN_DIALOG: &str = "showOpenDialog";
    pub const CLIPBOARD_WRITE_TEXT: &str = "clipboardWriteText";
    pub const OPEN_EXTERNAL: &str = "openExternal";
}

/// File type filter for the open dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Options for the native open dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDialogOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FileFilter>,
    pub multiple: bool,
    pub directory: bool,
}

impl CommandFacade {
    /// Fetch the current user settings.
    pub async fn get_settings(&self) -> BridgeResult<Value> {
        self.call(channels::GET_SETTINGS, &()).await
    }

    pub async fn save_settings(&self, settings: &Value) -> BridgeResult<()> {
        self.send(channels::SAVE_SETTINGS, &json!({ "settings": settings }))
            .await
    }

    pub async fn window_minimize(&self) -> BridgeResult<()> {
        self.send(channels::WINDOW_MINIMIZE, &()).await
    }

    /// Request window maximize (toggles back when already maximized).
    pub async fn window_maximize(&self) -> BridgeResult<()> {
        self.send(channels::WINDOW_MAXIMIZE, &()).await
    }

    pub async fn window_close(&self) -> BridgeResult<()> {
        self.send(channels::WINDOW_CLOSE, &()).await
    }

    /// Read a text file through the host.
    pub async fn read_file(&self, path: &str) -> BridgeResult<String> {
        self.call(channels::READ_FILE, &json!({ "path": path })).await
    }

    pub async fn write_file(&self, path: &str, contents: &str) -> BridgeResult<()> {
        self.send(
            channels::WRITE_FILE,
            &json!({ "path": path, "contents": contents }),
        )
        .await
    }

    /// Show the native open dialog. `None` when the user cancelled.
    pub async fn show_open_dialog(
        &self,
        options: &OpenDialogOptions,
    ) -> BridgeResult<Option<Vec<String>>> {
        self.call(channels::SHOW_OPEN_DIALOG, options).await
    }

    pub async fn clipboard_write_text(&self, text: &str) -> BridgeResult<()> {
        self.send(channels::CLIPBOARD_WRITE_TEXT, &json!({ "text": text }))
            .await
    }

    /// Open a URL in the system browser (also used to start OAuth).
    pub async fn open_external(&self, url: &str) -> BridgeResult<()> {
        self.send(channels::OPEN_EXTERNAL, &json!({ "url": url }))
            .await
    }
}
