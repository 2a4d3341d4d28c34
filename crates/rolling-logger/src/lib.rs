//! Rolling Logger
//!
//! `tracing` subscriber that writes to a size-rotated log file and keeps the
//! most recent lines in memory. `log` records are bridged into `tracing`, so
//! crates using either facade end up in the same file.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Rotation and buffer limits
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Rotate once the active file would exceed this size
    pub max_file_bytes: u64,
    /// Rotated files kept next to the active one
    pub max_files: usize,
    /// Lines kept in memory for `recent_lines`
    pub buffer_lines: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { max_file_bytes: 1024 * 1024, max_files: 5, buffer_lines: 500 }
    }
}

/// Size-rotated log file: `<app>.log`, rotated to `<app>.<stamp>.<seq>.log`
pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_file_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
    seq: u32,
}

impl RollingFile {
    pub fn open(dir: impl AsRef<Path>, app_name: &str, config: &LoggerConfig) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir,
            app_name: app_name.to_string(),
            max_file_bytes: config.max_file_bytes,
            max_files: config.max_files,
            file,
            written,
            seq: 0,
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    /// Rotated files, oldest first
    pub fn rotated_files(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.app_name);
        let active = self.active_path();
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| *path != active)
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.starts_with(&prefix) && n.ends_with(".log"))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.seq += 1;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let rotated = self.dir.join(format!("{}.{}.{:04}.log", self.app_name, stamp, self.seq));
        fs::rename(self.active_path(), rotated)?;
        self.file = OpenOptions::new().create(true).append(true).open(self.active_path())?;
        self.written = 0;

        let rotated = self.rotated_files()?;
        let excess = rotated.len().saturating_sub(self.max_files);
        for old in rotated.into_iter().take(excess) {
            fs::remove_file(old)?;
        }
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_file_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Fixed-capacity buffer of the latest lines
#[derive(Debug)]
pub struct RecentLines {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self { lines: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

struct LogSink {
    file: Mutex<RollingFile>,
    recent: Mutex<RecentLines>,
}

#[derive(Clone)]
struct SinkWriter(Arc<LogSink>);

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut recent) = self.0.recent.lock() {
            for line in String::from_utf8_lossy(buf).lines().filter(|l| !l.is_empty()) {
                recent.push(line.to_string());
            }
        }
        let mut file = self.0.file.lock().map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.0.file.lock().map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        file.flush()
    }
}

static SINK: OnceLock<Arc<LogSink>> = OnceLock::new();

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

/// Initialize the global logger
pub fn init_logger_with(log_dir: impl AsRef<Path>, app_name: &str, config: LoggerConfig) -> Result<(), LoggerError> {
    if SINK.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let sink = Arc::new(LogSink {
        file: Mutex::new(RollingFile::open(log_dir, app_name, &config)?),
        recent: Mutex::new(RecentLines::new(config.buffer_lines)),
    });

    let writer = SinkWriter(sink.clone());
    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    SINK.set(sink).map_err(|_| LoggerError::AlreadyInitialized)?;
    log::info!("logger initialized for {}", app_name);
    Ok(())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    SINK.get().ok_or(LoggerError::NotInitialized)?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    SINK.get().ok_or(LoggerError::NotInitialized)?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    SINK.get().ok_or(LoggerError::NotInitialized)?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Latest buffered lines, oldest first; empty before initialization
pub fn recent_lines() -> Vec<String> {
    SINK.get()
        .and_then(|sink| sink.recent.lock().ok().map(|recent| recent.snapshot()))
        .unwrap_or_default()
}
