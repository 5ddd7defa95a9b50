//! Logging configuration.
//!
//! Format and level names are case-insensitive and accept a few common
//! spellings, so the same values work in config files and on command lines
//! of embedding tools.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of each emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One readable line per event (default).
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl LogFormat {
    const SPELLINGS: [(&'static str, LogFormat); 5] = [
        ("human", LogFormat::Human),
        ("text", LogFormat::Human),
        ("pretty", LogFormat::Human),
        ("jsonl", LogFormat::Jsonl),
        ("json", LogFormat::Jsonl),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

/// Minimum severity written by the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-document scoring detail.
    Trace,
    /// Shapes and counts of each estimator call.
    Debug,
    /// Model fitting summaries (default).
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    const SPELLINGS: [(&'static str, LogLevel); 9] = [
        ("trace", LogLevel::Trace),
        ("debug", LogLevel::Debug),
        ("info", LogLevel::Info),
        ("warn", LogLevel::Warn),
        ("warning", LogLevel::Warn),
        ("error", LogLevel::Error),
        ("off", LogLevel::Off),
        ("none", LogLevel::Off),
        ("quiet", LogLevel::Off),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

fn lookup<T: Copy>(spellings: &[(&str, T)], kind: &str, input: &str) -> Result<T, String> {
    let wanted = input.trim().to_ascii_lowercase();
    spellings
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|&(_, value)| value)
        .ok_or_else(|| format!("unknown log {}: {}", kind, input))
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::SPELLINGS, "format", s)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::SPELLINGS, "level", s)
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscriber settings. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human lines with a timestamp.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::default(),
            level: LogLevel::default(),
            timestamps: true,
        }
    }
}

impl LogConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset. Only events from
    /// this crate pass.
    pub fn filter_directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.level)
    }
}
