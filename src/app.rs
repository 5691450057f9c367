//! Application state management.
//!
//! Holds the fetched stories, the load state, article selection and the
//! in-flight fetch task.

use crate::news::{Article, NewsClient, Story, filter_comparable};
use std::cmp;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where the story list is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A fetch is in flight
    Loading,
    /// Last fetch succeeded
    Loaded,
    /// Last fetch failed
    Failed {
        /// Error description
        message: String,
        /// Whether `/api/health` answered, if it was probed
        backend_healthy: Option<bool>,
    },
}

/// Result of one background fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Every story returned, or the failure
    pub stories: Result<Vec<Story>, crate::news::FetchError>,
    /// Health probe result, only run after a failure
    pub backend_healthy: Option<bool>,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Stories with enough sources to compare, in backend order
    pub stories: Vec<Story>,
    /// Number of stories in the last response before filtering
    pub fetched_count: usize,
    /// Current load state
    pub load_state: LoadState,
    /// Selected article, counted across all shown stories
    pub selected_index: usize,
    /// Status message to display
    pub status_message: Option<String>,
    /// Pending fetch task handle
    pub fetch_task: Option<JoinHandle<FetchOutcome>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application state.
    ///
    /// Starts in `Loading` with no stories, matching the screen shown
    /// before the first response arrives.
    pub fn new() -> Self {
        Self {
            stories: Vec::new(),
            fetched_count: 0,
            load_state: LoadState::Loading,
            selected_index: 0,
            status_message: None,
            fetch_task: None,
        }
    }

    /// Spawn a background fetch of `/api/stories`.
    ///
    /// # Arguments
    /// * `client` - Stories backend client
    ///
    /// # Returns
    /// * `bool` - False if a fetch was already in flight and nothing was started
    ///
    /// # Details
    /// Current stories stay on screen until the new result replaces them.
    /// When the fetch fails the task also probes `/api/health`.
    pub fn start_fetch(&mut self, client: &NewsClient) -> bool {
        if self.fetch_task.is_some() {
            debug!("fetch already in flight");
            return false;
        }

        let client = client.clone();
        self.load_state = LoadState::Loading;
        self.fetch_task = Some(tokio::spawn(async move {
            let stories = client.fetch_stories().await;
            let backend_healthy = match &stories {
                Ok(_) => None,
                Err(_) => Some(client.health().await),
            };
            FetchOutcome {
                stories,
                backend_healthy,
            }
        }));
        true
    }

    /// Apply the fetch result if the task has finished.
    ///
    /// # Returns
    /// * `bool` - True if a result was applied
    pub async fn poll_fetch(&mut self) -> bool {
        if !self
            .fetch_task
            .as_ref()
            .is_some_and(|task| task.is_finished())
        {
            return false;
        }
        let Some(task) = self.fetch_task.take() else {
            return false;
        };

        match task.await {
            Ok(outcome) => self.apply_outcome(outcome),
            Err(e) => {
                warn!(error = %e, "fetch task did not complete");
                self.load_state = LoadState::Failed {
                    message: format!("fetch task failed: {}", e),
                    backend_healthy: None,
                };
            }
        }
        true
    }

    /// Apply a finished fetch to the state.
    ///
    /// # Arguments
    /// * `outcome` - Result of the background fetch
    ///
    /// # Details
    /// On success the whole story list is replaced in one step.
    /// On failure the previous list is kept and the state becomes `Failed`.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome.stories {
            Ok(stories) => {
                self.set_stories(stories);
                info!(
                    fetched = self.fetched_count,
                    shown = self.stories.len(),
                    "stories loaded"
                );
                self.set_status(format!(
                    "Loaded {} stories ({} articles)",
                    self.stories.len(),
                    self.article_count()
                ));
            }
            Err(e) => {
                warn!(error = %e, backend_healthy = ?outcome.backend_healthy, "failed to load stories");
                self.set_status(format!("Error loading stories: {}", e));
                self.load_state = LoadState::Failed {
                    message: e.to_string(),
                    backend_healthy: outcome.backend_healthy,
                };
            }
        }
    }

    /// Replace all stories, keeping only comparable ones.
    ///
    /// # Arguments
    /// * `stories` - Every story from the backend
    pub fn set_stories(&mut self, stories: Vec<Story>) {
        self.fetched_count = stories.len();
        self.stories = filter_comparable(stories);
        self.load_state = LoadState::Loaded;
        self.selected_index = cmp::min(
            self.selected_index,
            self.article_count().saturating_sub(1),
        );
    }

    /// Whether a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Total number of shown articles.
    pub fn article_count(&self) -> usize {
        self.stories.iter().map(|story| story.articles.len()).sum()
    }

    /// Resolve a flat article index to (story, article) positions.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index;
        for (story_idx, story) in self.stories.iter().enumerate() {
            if remaining < story.articles.len() {
                return Some((story_idx, remaining));
            }
            remaining -= story.articles.len();
        }
        None
    }

    /// Get the currently selected article.
    ///
    /// # Returns
    /// * `Option<&Article>` - Selected article or None if nothing is shown
    pub fn selected_article(&self) -> Option<&Article> {
        let (story_idx, article_idx) = self.locate(self.selected_index)?;
        self.stories.get(story_idx)?.articles.get(article_idx)
    }

    /// Move selection up.
    ///
    /// # Details
    /// Decrements selected index, wrapping to bottom if at top.
    pub fn move_up(&mut self) {
        let count = self.article_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down.
    ///
    /// # Details
    /// Increments selected index, wrapping to top if at bottom.
    pub fn move_down(&mut self) {
        let count = self.article_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Jump to the first article.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last article.
    pub fn select_last(&mut self) {
        self.selected_index = self.article_count().saturating_sub(1);
    }

    /// Select an article by flat index, ignoring out-of-range values.
    pub fn select(&mut self, index: usize) {
        if index < self.article_count() {
            self.selected_index = index;
        }
    }

    /// Set status message.
    ///
    /// # Arguments
    /// * `message` - Status message to display
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Abort the in-flight fetch, if any.
    ///
    /// A response arriving afterwards is dropped with the task.
    pub fn cancel_fetch(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            debug!("aborting in-flight fetch");
            task.abort();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel_fetch();
    }
}
