//! Isolated test environment with temp directory.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use super::{NotegraphCommand, TestNote};
use notegraph::compile::{Bundle, CompileError, Compiler};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// Layout inside the temp directory:
/// - `notes/`: the notes directory
/// - `site/`: default output directory for `build`
/// - `config/`: used as the config home, so the user's config is never read
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
    notes_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let notes_dir = root.join("notes");
        std::fs::create_dir_all(&notes_dir).expect("Failed to create notes directory");
        std::fs::create_dir_all(root.join("config")).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            root,
            notes_dir,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the default site output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join("site")
    }

    /// Returns the directory used as the config home.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Writes a test note and returns its full path.
    pub fn add_note(&self, note: &TestNote) -> PathBuf {
        self.write_file(note.path(), &note.to_content())
    }

    /// Writes a file relative to the notes directory, creating parents.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        self.write_bytes(name, content.as_bytes())
    }

    /// Writes raw bytes relative to the notes directory, creating parents.
    pub fn write_bytes(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.notes_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes a file outside the notes directory (templates, themes).
    pub fn write_aux_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes `notegraph/config.toml` under the config home.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.config_home().join("notegraph");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Compiles the notes directory in-process.
    pub fn compile(&self) -> Result<Bundle, CompileError> {
        Compiler::default().compile_dir(&self.notes_dir)
    }

    /// Reads a generated file from the default output directory.
    pub fn read_output(&self, name: &str) -> String {
        let path = self.output_dir().join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read output {}: {}", path.display(), e))
    }

    /// Creates a command configured for this test environment.
    pub fn cmd(&self) -> NotegraphCommand {
        NotegraphCommand::new()
            .config_home(&self.config_home())
            .dir(&self.notes_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir(), "notes directory should exist");
        assert!(env.config_home().is_dir(), "config home should exist");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_creates_nested_file() {
        let env = TestEnv::new();
        let path = env.add_note(&TestNote::new("guides/setup.md").title("Setup"));

        assert!(path.is_file());
        assert!(path.starts_with(env.notes_dir()));
    }

    #[test]
    fn test_env_compile_sees_notes() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("a.md").title("First"));
        env.add_note(&TestNote::new("b.md").title("Second"));

        let bundle = env.compile().expect("Should compile");
        let titles: Vec<_> = bundle.notes().iter().map(|n| n.title()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let args = env.cmd().get_args().to_vec();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.notes_dir().to_string_lossy());
    }
}
