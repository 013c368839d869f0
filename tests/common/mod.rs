#![allow(dead_code)]

use public_projects_updater::error::{Result, UpdaterError};
use public_projects_updater::github::RepoPageSource;
use public_projects_updater::types::GitHubRepo;
use std::cell::RefCell;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// In-memory repository listing. Page `n` is `pages[n - 1]`; anything past
/// the end is an empty page.
pub struct FakePages {
    pages: Vec<Vec<GitHubRepo>>,
    fail_on: Option<u32>,
    pub requested: RefCell<Vec<(String, u32)>>,
}

impl FakePages {
    pub fn new(pages: Vec<Vec<GitHubRepo>>) -> Self {
        FakePages {
            pages,
            fail_on: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    /// Same pages, but requesting `page` returns a transport-style error.
    pub fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    /// Serves the same non-empty page forever.
    pub fn endless(page: Vec<GitHubRepo>) -> Self {
        FakePages::new(vec![page; 1000])
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.borrow().iter().map(|(_, page)| *page).collect()
    }
}

impl RepoPageSource for FakePages {
    async fn fetch_repos_page(&self, account: &str, page: u32) -> Result<Vec<GitHubRepo>> {
        self.requested.borrow_mut().push((account.to_string(), page));

        if self.fail_on == Some(page) {
            return Err(UpdaterError::ApiError(format!(
                "API request failed with status 502 Bad Gateway: page {}",
                page
            )));
        }

        Ok(page
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn repo(name: &str, updated_at: &str) -> GitHubRepo {
    GitHubRepo {
        name: Some(name.to_string()),
        html_url: Some(format!("https://github.com/octocat/{}", name)),
        description: None,
        stargazers_count: Some(0),
        updated_at: Some(updated_at.to_string()),
        private: Some(false),
        fork: Some(false),
    }
}

pub fn private_repo(name: &str, updated_at: &str) -> GitHubRepo {
    GitHubRepo {
        private: Some(true),
        ..repo(name, updated_at)
    }
}

pub fn forked_repo(name: &str, updated_at: &str) -> GitHubRepo {
    GitHubRepo {
        fork: Some(true),
        ..repo(name, updated_at)
    }
}

/// Canned HTTP/1.1 response for `serve_once`.
pub struct CannedResponse {
    pub status: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: &'static str, body: &str) -> Self {
        CannedResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn to_http(&self) -> String {
        let mut head = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
            self.status,
            self.body.len()
        );
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        format!("{}\r\n{}", head, self.body)
    }
}

/// Accept one connection on a local port, answer it with `response`, and
/// resolve to the raw request head that was received.
pub async fn serve_once(response: CannedResponse) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read listener address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept connection");

        let mut request: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.expect("Failed to read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        socket
            .write_all(response.to_http().as_bytes())
            .await
            .expect("Failed to write response");
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}", addr), handle)
}
