//! The status view: one healthcheck per mount, rendered from a three-state
//! machine.
//!
//! [`StatusView::mount`] spawns the request and hands back a [`MountedView`].
//! State changes are published on a `watch` channel so every change can be
//! re-rendered. Dropping or unmounting the view cancels the request and no
//! state is written afterwards.

use crate::{
    config::ViewConfig,
    error::StatusError,
    fetch::fetch_health,
    transport::HealthTransport,
    uptime::{HealthcheckResponse, Uptime},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewState {
    Loading,
    Ok {
        message: String,
        uptime: Uptime,
    },
    Error {
        message: String,
        status_code: Option<u16>,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ViewState::Ok { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ok { .. } => "ok",
            ViewState::Error { .. } => "error",
        }
    }

    /// Render the title followed by the lines for this state.
    pub fn render(&self, config: &ViewConfig) -> Frame {
        let mut lines = Vec::new();

        match self {
            ViewState::Loading => lines.push(Line::new(Tone::Muted, "Loading...")),
            ViewState::Ok { message, uptime } => {
                lines.push(Line::new(Tone::Healthy, message.clone()));
                lines.push(Line::new(Tone::Detail, uptime.live_since()));
            }
            ViewState::Error {
                message,
                status_code,
            } => {
                let headline = if message.is_empty() { "Error" } else { message.as_str() };
                lines.push(Line::new(Tone::Alert, headline));
                if let Some(code) = status_code {
                    lines.push(Line::new(Tone::AlertDetail, format!("Status: {}", code)));
                }
                if config.mirror_error && !message.is_empty() {
                    lines.push(Line::new(Tone::AlertFaint, message.clone()));
                }
            }
        }

        Frame {
            title: config.title.clone(),
            lines,
        }
    }
}

impl From<HealthcheckResponse> for ViewState {
    fn from(response: HealthcheckResponse) -> Self {
        ViewState::Ok {
            message: response.message,
            uptime: response.uptime,
        }
    }
}

impl From<StatusError> for ViewState {
    fn from(err: StatusError) -> Self {
        ViewState::Error {
            status_code: err.status_code(),
            message: err.to_string(),
        }
    }
}

/// How a line should be styled by a front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Muted,
    Healthy,
    Detail,
    Alert,
    AlertDetail,
    AlertFaint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// One rendering of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub title: String,
    pub lines: Vec<Line>,
}

impl Frame {
    /// Title first, then the state lines.
    pub fn all_lines(&self) -> impl Iterator<Item = Line> + '_ {
        std::iter::once(Line::new(Tone::Title, self.title.clone())).chain(self.lines.iter().cloned())
    }

    pub fn contains(&self, text: &str) -> bool {
        self.title.contains(text) || self.lines.iter().any(|l| l.text.contains(text))
    }

    pub fn count_exact(&self, text: &str) -> usize {
        self.all_lines().filter(|l| l.text == text).count()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.lines {
            writeln!(f, "{}", line.text)?;
        }
        Ok(())
    }
}

pub struct StatusView {
    config: ViewConfig,
    transport: Arc<dyn HealthTransport>,
}

impl StatusView {
    pub fn new(config: ViewConfig, transport: Arc<dyn HealthTransport>) -> Self {
        Self { config, transport }
    }

    /// Start the single healthcheck for this mount. Must be called inside a
    /// tokio runtime.
    pub fn mount(&self) -> MountedView {
        let (tx, rx) = watch::channel(ViewState::Loading);
        let token = CancellationToken::new();

        let transport = Arc::clone(&self.transport);
        let base_url = self.config.base_url.clone();
        let alive = token.clone();

        info!("Mounting status view '{}'", self.config.title);

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = alive.cancelled() => {
                    debug!("Status view unmounted before the healthcheck settled");
                }
                outcome = fetch_health(transport.as_ref(), &base_url) => {
                    let state = match outcome {
                        Ok(response) => ViewState::from(response),
                        Err(err) => ViewState::from(err),
                    };
                    if alive.is_cancelled() {
                        return;
                    }
                    info!("Status view: loading -> {}", state.label());
                    tx.send_replace(state);
                }
            }
        });

        MountedView {
            config: self.config.clone(),
            state: rx,
            token,
            task: Some(task),
        }
    }
}

/// A mounted status view. Unmounts when dropped.
pub struct MountedView {
    config: ViewConfig,
    state: watch::Receiver<ViewState>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MountedView {
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn render(&self) -> Frame {
        self.state.borrow().render(&self.config)
    }

    /// A receiver that observes every state change, for re-rendering.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait until the state leaves `Loading`. Returns `Loading` only if the
    /// fetch was cancelled first.
    pub async fn settled(&mut self) -> ViewState {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Healthcheck task failed: {}", e);
            }
        }
        self.state()
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn unmount(&self) {
        if !self.token.is_cancelled() {
            debug!("Unmounting status view '{}'", self.config.title);
            self.token.cancel();
        }
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
