//! Fake collaborators for unit tests.

use crate::core::error::{Error, Result};
use crate::core::git::VersionControl;
use crate::core::github::{Hosting, RepoIdentity};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Canned [`VersionControl`].
#[derive(Debug, Clone)]
pub struct FakeGit {
    pub repository: bool,
    pub branch: std::result::Result<String, String>,
}

impl FakeGit {
    pub fn on_branch(branch: &str) -> Self {
        Self {
            repository: true,
            branch: Ok(branch.to_string()),
        }
    }
}

impl VersionControl for FakeGit {
    async fn is_repository(&self) -> bool {
        self.repository
    }

    async fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .map_err(|message| Error::git("rev-parse --abbrev-ref HEAD", message))
    }
}

/// Canned [`Hosting`].
///
/// Each API path holds a queue of replies; the last reply repeats once the
/// queue is down to one entry.
#[derive(Debug)]
pub struct FakeHosting {
    available: bool,
    repository: std::result::Result<RepoIdentity, String>,
    replies: RefCell<HashMap<String, VecDeque<std::result::Result<String, String>>>>,
    calls: RefCell<Vec<String>>,
}

impl Default for FakeHosting {
    fn default() -> Self {
        Self {
            available: true,
            repository: Ok(RepoIdentity::new("acme", "widgets")),
            replies: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeHosting {
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn repository_error(mut self, message: &str) -> Self {
        self.repository = Err(message.to_string());
        self
    }

    pub fn reply(self, path: &str, body: &str) -> Self {
        self.push(path, Ok(body.to_string()))
    }

    pub fn fail(self, path: &str, message: &str) -> Self {
        self.push(path, Err(message.to_string()))
    }

    fn push(self, path: &str, reply: std::result::Result<String, String>) -> Self {
        self.replies
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// API paths requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Hosting for FakeHosting {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn repository(&self) -> Result<RepoIdentity> {
        self.repository
            .clone()
            .map_err(|message| Error::command_failed("gh repo view", message, Some(1)))
    }

    async fn api(&self, path: &str) -> Result<String> {
        self.calls.borrow_mut().push(path.to_string());

        let mut replies = self.replies.borrow_mut();
        let command = format!("gh api {path}");
        let Some(queue) = replies.get_mut(path) else {
            return Err(Error::command_failed(command, "HTTP 404: Not Found", Some(1)));
        };

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        match reply {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(Error::command_failed(command, message, Some(1))),
            None => Err(Error::command_failed(command, "no reply queued", Some(1))),
        }
    }
}
