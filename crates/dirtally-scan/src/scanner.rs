//! Breadth-first category scanner.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime};

use tokio::runtime::Handle;
use tokio::sync::{broadcast, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use dirtally_core::{
    CategoryMap, CategoryReport, CountResult, ScanConfig, ScanError, ScanStats, ScanWarning,
};

use crate::lister::read_children;
use crate::progress::ScanProgress;

/// Directories listed between two progress updates.
pub const PROGRESS_INTERVAL: u64 = 64;

/// Channel buffer size for progress updates.
pub const PROGRESS_CHANNEL_SIZE: usize = 100;

static NEXT_SCAN_ID: AtomicU64 = AtomicU64::new(1);

fn next_scan_id() -> u64 {
    NEXT_SCAN_ID.fetch_add(1, Ordering::Relaxed)
}

/// Tallies the files of a subtree into extension categories.
///
/// Each call to [`CategoryScanner::start`] runs on its own blocking worker
/// with its own counts and its own child cancellation token; scanners can be
/// cloned and shared freely. Cancelling the scanner's token stops every scan
/// it started, cancelling a [`ScanHandle`] stops only that scan.
#[derive(Debug, Clone)]
pub struct CategoryScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
    cancel: CancellationToken,
}

impl CategoryScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Create a scanner that stops when `cancel` fires.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        let (progress_tx, _) = broadcast::channel(PROGRESS_CHANNEL_SIZE);
        Self {
            progress_tx,
            cancel,
        }
    }

    /// Subscribe to scan progress updates.
    ///
    /// Updates of all scans run by this scanner share the channel; use
    /// [`ScanProgress::scan_id`] and [`ScanHandle::id`] to tell them apart.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Token that cancels every scan run by this scanner.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Scan on the current thread and return the report.
    ///
    /// Fails with `NotFound`, `NotADirectory` or `PermissionDenied` when the
    /// root cannot be listed, and with `Cancelled` if the token fired.
    /// Problems below the root are recorded as warnings in the report.
    pub fn scan_blocking(
        &self,
        config: &ScanConfig,
        categories: &CategoryMap,
    ) -> Result<CategoryReport, ScanError> {
        self.scan_with(config, categories, &self.cancel, next_scan_id())
    }

    fn scan_with(
        &self,
        config: &ScanConfig,
        categories: &CategoryMap,
        cancel: &CancellationToken,
        scan_id: u64,
    ) -> Result<CategoryReport, ScanError> {
        let start = Instant::now();
        let scanned_at = SystemTime::now();
        let root = config.root.clone();

        let root_metadata = fs::metadata(&root).map_err(|e| ScanError::io(&root, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        let mut counts = CountResult::zeroed(categories);
        let mut stats = ScanStats::new();
        let mut warnings: Vec<ScanWarning> = Vec::new();
        let mut queue: VecDeque<(PathBuf, u32)> = VecDeque::new();
        queue.push_back((root.clone(), 0));

        while let Some((dir, depth)) = queue.pop_front() {
            if cancel.is_cancelled() {
                debug!(root = %root.display(), "category scan cancelled");
                return Err(ScanError::Cancelled);
            }

            let entries = match read_children(&dir, config.include_hidden, &mut warnings) {
                Ok(entries) => entries,
                Err(err) if depth == 0 => return Err(err.into()),
                Err(err) => {
                    debug!(path = %dir.display(), "skipping unreadable directory: {err}");
                    warnings.push(ScanWarning::from_browse(&err));
                    continue;
                }
            };
            stats.record_dir(depth);

            for entry in entries {
                if entry.is_dir {
                    if entry.is_symlink && !config.follow_symlinks {
                        continue;
                    }
                    if config.within_depth(depth + 1) {
                        queue.push_back((entry.path, depth + 1));
                    }
                    continue;
                }

                let extension = config.extension_rule.extract(&entry.name);
                let category = categories.classify(&extension);
                if let Some(category) = category {
                    counts.record(category);
                }
                stats.record_file(category.is_some());
            }

            if stats.dirs_scanned % PROGRESS_INTERVAL == 0 {
                let _ = self.progress_tx.send(ScanProgress::snapshot(
                    scan_id,
                    &root,
                    &stats,
                    dir,
                    warnings.len(),
                    start.elapsed(),
                ));
            }
        }

        let scan_duration = start.elapsed();
        let mut last = ScanProgress::snapshot(
            scan_id,
            &root,
            &stats,
            root.clone(),
            warnings.len(),
            scan_duration,
        );
        last.finished = true;
        let _ = self.progress_tx.send(last);

        info!(
            root = %root.display(),
            dirs = stats.dirs_scanned,
            files = stats.files_seen,
            matched = stats.files_matched,
            "category scan finished in {:.2?}",
            scan_duration
        );

        Ok(CategoryReport::new(
            root,
            counts,
            stats,
            scanned_at,
            scan_duration,
            warnings,
        ))
    }

    /// Start a scan on a dedicated worker and return immediately.
    ///
    /// The worker is a tokio blocking task when called inside a runtime and a
    /// plain thread otherwise. An invalid root or a cancelled scan delivers
    /// nothing: [`ScanHandle::wait`] then resolves to `None`.
    pub fn start(&self, config: ScanConfig, categories: Arc<CategoryMap>) -> ScanHandle {
        let (tx, rx) = oneshot::channel();
        let scanner = self.clone();
        let cancel = self.cancel.child_token();
        let id = next_scan_id();

        let worker_cancel = cancel.clone();
        spawn_worker(move || {
            let report = scanner.run_to_completion(&config, &categories, &worker_cancel, id);
            if let Some(report) = report {
                // Receiver may have been dropped; nothing left to do then
                let _ = tx.send(report);
            }
        });

        ScanHandle { id, rx, cancel }
    }

    /// Scan `root` and hand the report to `sink` exactly once.
    ///
    /// `sink` runs on the worker. It is never called when `root` does not
    /// exist or is not a directory, or when the scan is cancelled.
    pub fn scan_categories<F>(&self, root: impl Into<PathBuf>, categories: Arc<CategoryMap>, sink: F)
    where
        F: FnOnce(CategoryReport) + Send + 'static,
    {
        let config = ScanConfig::new(root);
        let scanner = self.clone();
        let cancel = self.cancel.child_token();
        let id = next_scan_id();

        spawn_worker(move || {
            if let Some(report) = scanner.run_to_completion(&config, &categories, &cancel, id) {
                sink(report);
            }
        });
    }

    /// Run a scan, folding the silent failure cases into `None`.
    fn run_to_completion(
        &self,
        config: &ScanConfig,
        categories: &CategoryMap,
        cancel: &CancellationToken,
        scan_id: u64,
    ) -> Option<CategoryReport> {
        match self.scan_with(config, categories, cancel, scan_id) {
            Ok(report) => Some(report),
            Err(err) if err.is_invalid_root() => {
                debug!(root = %config.root.display(), "no category scan: {err}");
                None
            }
            Err(ScanError::Cancelled) => None,
            Err(err) => {
                warn!(root = %config.root.display(), "category scan failed: {err}");
                None
            }
        }
    }
}

impl Default for CategoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending result of a scan started with [`CategoryScanner::start`].
#[derive(Debug)]
pub struct ScanHandle {
    id: u64,
    rx: oneshot::Receiver<CategoryReport>,
    cancel: CancellationToken,
}

impl ScanHandle {
    /// Identifier carried by this scan's [`ScanProgress`] updates.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Request cancellation of this scan only.
    ///
    /// The scan stops before listing its next directory. Other scans of the
    /// same scanner keep running.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the report. `None` if the scan delivered nothing.
    pub async fn wait(self) -> Option<CategoryReport> {
        self.rx.await.ok()
    }

    /// Block the current thread until the report arrives.
    ///
    /// Must not be called from within an async context.
    pub fn blocking_wait(self) -> Option<CategoryReport> {
        self.rx.blocking_recv().ok()
    }
}

/// Check that `path` could serve as a scan root without scanning it.
///
/// The root must exist, be a directory and be listable.
pub fn validate_root(path: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(path).map_err(|e| ScanError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    fs::read_dir(path).map_err(|e| ScanError::io(path, e))?;
    Ok(())
}

fn spawn_worker<F>(job: F)
where
    F: FnOnce() + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(job);
        }
        Err(_) => {
            if let Err(err) = std::thread::Builder::new()
                .name("dirtally-scan".to_string())
                .spawn(job)
            {
                warn!("failed to spawn scan worker: {err}");
            }
        }
    }
}
