//! Test harness standing in for the host build pipeline.
//!
//! The real host walks its tree, schedules per-file transforms, and owns a
//! persistent cache. The harness does the minimum of all three: it walks a
//! fixture directory, drives a [`ContentFilter`] over every claimed file,
//! consults a disk-backed store keyed by the filter's cache keys, and writes
//! emitted files into an output directory.
#![allow(dead_code)]

use mdgate::{ContentFilter, EngineError, FilterError, LintEngine, LintMessage};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Stand-in for the host's persistent build cache: one file per key.
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).expect("create store dir");
        Self { dir }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    pub fn put(&self, key: &str, value: &str) {
        fs::write(self.dir.join(key), value).expect("store write");
    }
}

/// Scripted engine: returns preconfigured messages per relative path and
/// records every invocation, so tests can assert the cache short-circuited.
pub struct StubEngine {
    pub messages: HashMap<String, Vec<LintMessage>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn insert(&mut self, relative_path: &str, messages: Vec<LintMessage>) {
        self.messages.insert(relative_path.to_string(), messages);
    }
}

impl LintEngine for StubEngine {
    fn lint(
        &self,
        _config_dir: &Path,
        relative_path: &Path,
        _content: &str,
    ) -> Result<Vec<LintMessage>, EngineError> {
        let relative = relative_path.to_string_lossy().into_owned();
        self.calls.lock().unwrap().push(relative.clone());
        Ok(self.messages.get(&relative).cloned().unwrap_or_default())
    }
}

/// The failure the original final-newline scenario produces for `path`.
pub fn final_newline_failure(path: &str) -> LintMessage {
    LintMessage {
        name: format!("{path}:1:1"),
        reason: "Missing newline character at end of file".to_string(),
        rule_id: Some("final-newline".to_string()),
        source: Some("lint".to_string()),
        fatal: true,
        line: Some(1),
        column: Some(1),
        file: Some(path.to_string()),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub processed: usize,
    pub cached: usize,
}

/// Minimal build driver over a [`ContentFilter`].
pub struct TestPipeline<F: ContentFilter> {
    filter: F,
    store: Option<DiskStore>,
    pub stats: BuildStats,
}

impl<F: ContentFilter> TestPipeline<F> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            store: None,
            stats: BuildStats::default(),
        }
    }

    pub fn with_store(filter: F, store: DiskStore) -> Self {
        Self {
            filter,
            store: Some(store),
            stats: BuildStats::default(),
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Run one build: lint every claimed file under `input_dir` and write the
    /// emitted stubs under `output_dir`. Returns the emitted relative paths,
    /// sorted.
    pub fn build(&mut self, input_dir: &Path, output_dir: &Path) -> Result<Vec<String>, FilterError> {
        self.stats = BuildStats::default();

        let mut files = Vec::new();
        collect_files(input_dir, input_dir, &mut files)?;
        files.sort();

        let mut emitted = Vec::new();
        for relative in files {
            let Some(extension) = relative.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !self.filter.extensions().contains(&extension) {
                continue;
            }

            let content = fs::read_to_string(input_dir.join(&relative))?;
            let key = self.filter.cache_key(&content, &relative);

            let output = match self.store.as_ref().and_then(|store| store.get(&key)) {
                Some(cached) => {
                    self.stats.cached += 1;
                    cached
                }
                None => {
                    let report = self.filter.process(&content, &relative)?;
                    self.filter.post_process(&report);
                    let output = report.output.unwrap_or_default();
                    if let Some(store) = &self.store {
                        store.put(&key, &output);
                    }
                    self.stats.processed += 1;
                    output
                }
            };

            let dest = relative.with_extension(self.filter.target_extension());
            let dest_abs = output_dir.join(&dest);
            if let Some(parent) = dest_abs.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&dest_abs, output)?;
            emitted.push(dest.to_string_lossy().into_owned());
        }

        emitted.sort();
        Ok(emitted)
    }
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}
