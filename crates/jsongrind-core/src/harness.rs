//! Subject execution harness
//!
//! Copyright (c) 2025 jsongrind Team
//! Licensed under the Apache-2.0 license
//!
//! One subject process is spawned per document. The document is piped to the
//! subject's stdin, stdin is closed, and the subject is expected to exit
//! zero after consuming the whole input. The subject's stdout and stderr are
//! discarded unread; acceptance is judged by exit status alone.
//!
//! There is no implicit time limit: a subject that hangs holds the session
//! with it, which keeps the harness free of timing policy by default. An
//! explicit wall-clock limit can be opted in per harness. The limit guards
//! the wait for exit, not the stdin write, so a subject that neither reads
//! nor exits can still stall a sufficiently large document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A parser executable under test, validated at construction.
#[derive(Debug, Clone)]
pub struct Subject {
    path: PathBuf,
    name: String,
}

impl Subject {
    /// Validates that `path` names an executable regular file.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|err| Error::Setup {
            path: path.clone(),
            message: format!("cannot stat subject: {err}"),
        })?;
        if !metadata.is_file() {
            return Err(Error::Setup {
                path,
                message: "not a regular file".to_string(),
            });
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(Error::Setup {
                    path,
                    message: "not executable".to_string(),
                });
            }
        }
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                return Err(Error::Setup {
                    path,
                    message: "path has no file name".to_string(),
                })
            }
        };
        Ok(Self { path, name })
    }

    /// The validated executable path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The subject's file name, extension included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The report file name derived from the subject: `<file name>.json`.
    pub fn report_file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// Runs one subject process per document and classifies the outcome.
#[derive(Debug)]
pub struct ExecutionHarness {
    subject: Subject,
    timeout: Option<Duration>,
}

impl ExecutionHarness {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            timeout: None,
        }
    }

    /// Opts in to a wall-clock limit on each subject's exit.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Feeds one document to a fresh subject process.
    ///
    /// `Ok(())` means the subject consumed the document and exited zero.
    /// The per-run failure variants record, in order of precedence: a
    /// timeout, a nonzero exit, or a subject that closed stdin early while
    /// still exiting zero.
    pub fn run(&self, document: &Document) -> Result<()> {
        tracing::trace!(
            subject = %self.subject.name,
            bytes = document.as_bytes().len(),
            "running subject"
        );
        let mut child = Command::new(&self.subject.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| Error::Io {
                message: format!("failed to spawn {}: {err}", self.subject.path.display()),
                source: err,
            })?;

        // dropping the handle closes the pipe and signals end of input
        let fed = match child.stdin.take() {
            Some(mut stdin) => {
                let result = stdin.write_all(document.as_bytes());
                drop(stdin);
                result
            }
            None => Ok(()),
        };

        let status = self.await_exit(&mut child, document)?;

        if !status.success() {
            return Err(Error::SubjectRejected {
                status,
                document: document.as_str().to_string(),
            });
        }
        if let Err(err) = fed {
            if err.kind() == io::ErrorKind::BrokenPipe {
                return Err(Error::InputNotConsumed {
                    document: document.as_str().to_string(),
                    source: err,
                });
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Waits for the child to exit, polling against the deadline when a
    /// limit is configured.
    fn await_exit(&self, child: &mut Child, document: &Document) -> Result<ExitStatus> {
        let limit = match self.timeout {
            Some(limit) => limit,
            None => return child.wait().map_err(Error::from),
        };
        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                // kill may race a natural exit; wait reaps either way
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::SubjectTimeout {
                    document: document.as_str().to_string(),
                    limit,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_subject_rejected() {
        let err = Subject::new("/no/such/subject-binary").unwrap_err();
        assert!(matches!(err, Error::Setup { .. }));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Subject::new(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Setup { .. }));
        assert!(err.to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain-file");
        fs::write(&path, "not a program").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).unwrap();

        let err = Subject::new(&path).unwrap_err();
        assert!(err.to_string().contains("not executable"));
    }

    #[cfg(unix)]
    #[test]
    fn test_report_name_keeps_extension() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parser.bin");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();

        let subject = Subject::new(&path).unwrap();
        assert_eq!(subject.name(), "parser.bin");
        assert_eq!(subject.report_file_name(), "parser.bin.json");
    }
}
