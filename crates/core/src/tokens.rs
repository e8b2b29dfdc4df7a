//! Token counting through an external tokenizer CLI.
//!
//! Any failure yields `None`; callers keep their word-count estimate.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use regex::Regex;
use tracing::debug;
use wait_timeout::ChildExt;

pub const DEFAULT_TOKEN_COUNTER: &str = "code2prompt";
pub const DEFAULT_TOKEN_COUNTER_TIMEOUT: Duration = Duration::from_secs(5);

static TOKEN_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Token count: (\d+)").unwrap());

/// Runs `<program> <file> --tokens` and reads `Token count: N` from stdout.
#[derive(Debug, Clone)]
pub struct ExternalTokenCounter {
    program: String,
    timeout: Duration,
}

impl Default for ExternalTokenCounter {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_COUNTER)
    }
}

impl ExternalTokenCounter {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), timeout: DEFAULT_TOKEN_COUNTER_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Token count reported by the external program, if it ran in time and
    /// printed one.
    pub fn count_file(&self, path: &Path) -> Option<usize> {
        let spawned = Command::new(&self.program)
            .arg(path)
            .arg("--tokens")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                debug!(program = %self.program, error = %e, "token counter unavailable");
                return None;
            }
        };

        // Drained concurrently so a chatty counter cannot fill the pipe and stall.
        let mut pipe = child.stdout.take()?;
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            pipe.read_to_string(&mut buf).map(|_| buf)
        });

        match child.wait_timeout(self.timeout) {
            Ok(Some(_status)) => {}
            Ok(None) => {
                debug!(program = %self.program, "token counter timed out");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(e) => {
                debug!(program = %self.program, error = %e, "token counter failed");
                let _ = child.kill();
                return None;
            }
        }

        let stdout = match reader.join() {
            Ok(Ok(stdout)) => stdout,
            Ok(Err(e)) => {
                debug!(program = %self.program, error = %e, "could not read token counter output");
                return None;
            }
            Err(_) => return None,
        };

        let count = TOKEN_COUNT_RE
            .captures(&stdout)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse().ok());
        if count.is_none() {
            debug!(program = %self.program, "no token count in output");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_gives_no_count() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.txt");
        fs::write(&file, "four words right here").unwrap();

        let counter = ExternalTokenCounter::new("obs2prompt-no-such-tokenizer");
        assert_eq!(counter.count_file(&file), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_parses_reported_count() {
        let dir = TempDir::new().unwrap();
        // `sh <script> --tokens` runs the script itself.
        let script = dir.path().join("count.sh");
        fs::write(&script, "echo 'Files: 1'\necho 'Token count: 1234'\n").unwrap();

        let counter = ExternalTokenCounter::new("sh");
        assert_eq!(counter.count_file(&script), Some(1234));
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_before_count_is_read() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("count.sh");
        // 200 000 bytes of filler, well past a pipe buffer.
        fs::write(
            &script,
            "i=0\nwhile [ $i -lt 2000 ]; do\n  printf '%099d\\n' 0\n  i=$((i+1))\ndone\necho 'Token count: 42'\n",
        )
        .unwrap();

        let counter = ExternalTokenCounter::new("sh").with_timeout(Duration::from_secs(30));
        assert_eq!(counter.count_file(&script), Some(42));
    }

    #[cfg(unix)]
    #[test]
    fn test_unparseable_output_gives_no_count() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("count.sh");
        fs::write(&script, "echo 'nothing useful'\n").unwrap();

        let counter = ExternalTokenCounter::new("sh");
        assert_eq!(counter.count_file(&script), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_gives_no_count() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("slow.sh");
        fs::write(&script, "sleep 5\necho 'Token count: 9'\n").unwrap();

        let counter = ExternalTokenCounter::new("sh").with_timeout(Duration::from_millis(100));
        assert_eq!(counter.count_file(&script), None);
    }
}
