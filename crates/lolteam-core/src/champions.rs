// Champion pool loading and normalization.
//
// The pool is a newline-delimited list of names read once at startup from a
// local file or an http(s) URL. Names are title-cased word by word. Any
// failure (missing file, network error, non-2xx status, empty list) falls back
// to a fixed built-in list and reports a warning for the UI to show once.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::team::roster::Roster;

/// Built-in pool used when the configured source cannot be read.
pub const FALLBACK_CHAMPIONS: [&str; 20] = [
    "Aatrox",
    "Ahri",
    "Akali",
    "Alistar",
    "Amumu",
    "Anivia",
    "Annie",
    "Aphelios",
    "Ashe",
    "Aurelion Sol",
    "Azir",
    "Bard",
    "Blitzcrank",
    "Brand",
    "Braum",
    "Caitlyn",
    "Camille",
    "Cassiopeia",
    "Cho'Gath",
    "Corki",
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read champion file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch champion list from {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("champion list at {0} is empty")]
    Empty(String),
}

// ---------------------------------------------------------------------------
// ChampionPool
// ---------------------------------------------------------------------------

/// Ordered list of distinct champion names. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionPool {
    names: Vec<String>,
}

impl ChampionPool {
    /// Build a pool from names, dropping repeats after the first occurrence.
    pub fn new(names: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .filter(|n| seen.insert(n.clone()))
            .collect();
        ChampionPool { names }
    }

    pub fn fallback() -> Self {
        ChampionPool::new(FALLBACK_CHAMPIONS.iter().map(|s| s.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pool names not currently held by any roster member, in pool order.
    pub fn available<'a>(&'a self, roster: &Roster) -> Vec<&'a str> {
        let taken = roster.assigned_champions();
        self.names
            .iter()
            .map(String::as_str)
            .filter(|n| !taken.contains(n))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Somewhere a raw champion list can be read from.
#[async_trait]
pub trait ChampionSource: Send + Sync {
    /// Human-readable location, for logs and messages.
    fn describe(&self) -> String;

    /// Read the raw newline-delimited list.
    async fn fetch(&self) -> Result<String, PoolError>;
}

/// Reads the list from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl ChampionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, PoolError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| PoolError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Fetches the list over HTTP(S).
pub struct HttpSource {
    http: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSource {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChampionSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, PoolError> {
        let wrap = |source: reqwest::Error| PoolError::Http {
            url: self.url.clone(),
            source,
        };
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?;
        response.text().await.map_err(wrap)
    }
}

/// Pick a source for a configured location: http(s) URLs are fetched, any
/// other value is treated as a file path.
pub fn source_from_config(location: &str) -> Box<dyn ChampionSource> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

// ---------------------------------------------------------------------------
// Parsing and loading
// ---------------------------------------------------------------------------

/// Title-case each space-separated word: first character upper, rest lower.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Parse a raw list: one name per line, blank lines skipped, names trimmed
/// and title-cased.
pub fn parse_champion_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(title_case)
        .collect()
}

/// What a load produced: the pool to use and, when the fallback kicked in, a
/// warning for the user.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub pool: ChampionPool,
    pub warning: Option<String>,
}

impl LoadOutcome {
    pub fn used_fallback(&self) -> bool {
        self.warning.is_some()
    }

    fn fallback(reason: &str) -> Self {
        LoadOutcome {
            pool: ChampionPool::fallback(),
            warning: Some(format!(
                "Could not load the champion list ({reason}). Using the built-in list."
            )),
        }
    }
}

/// Load the champion pool from `source`, falling back to the built-in list.
///
/// Never fails and never retries.
pub async fn load(source: &dyn ChampionSource) -> LoadOutcome {
    let location = source.describe();
    let text = match source.fetch().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Champion list unavailable: {}", e);
            return LoadOutcome::fallback(&e.to_string());
        }
    };

    let pool = ChampionPool::new(parse_champion_list(&text));
    if pool.is_empty() {
        let e = PoolError::Empty(location);
        warn!("Champion list unavailable: {}", e);
        return LoadOutcome::fallback(&e.to_string());
    }

    info!("Loaded {} champions from {}", pool.len(), location);
    LoadOutcome {
        pool,
        warning: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
