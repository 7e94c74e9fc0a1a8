//! Where the textual dump comes from

use crate::error::DumpError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Supplier of the full textual dump of a Banshee database
pub trait DumpSource {
    fn read_dump(&self) -> Result<String, DumpError>;
}

/// Dumps a database file with the sqlite3 command line tool
#[derive(Debug, Clone)]
pub struct SqliteDump {
    database: PathBuf,
    program: String,
}

impl SqliteDump {
    pub fn new(database: PathBuf) -> Self {
        Self {
            database,
            program: "sqlite3".to_string(),
        }
    }

    /// Use another sqlite3 binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command_line(&self) -> String {
        format!("{} {} .dump", self.program, self.database.display())
    }
}

impl DumpSource for SqliteDump {
    fn read_dump(&self) -> Result<String, DumpError> {
        if !self.database.is_file() {
            return Err(DumpError::DatabaseNotFound(self.database.clone()));
        }

        log::debug!("Running `{}`", self.command_line());
        let output = Command::new(&self.program)
            .arg(&self.database)
            .arg(".dump")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DumpError::DumpCommand {
                command: self.command_line(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DumpError::DumpCommand {
                command: self.command_line(),
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A dump that was already written to a text file
#[derive(Debug, Clone)]
pub struct DumpFile {
    path: PathBuf,
}

impl DumpFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DumpSource for DumpFile {
    fn read_dump(&self) -> Result<String, DumpError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DumpError::DatabaseNotFound(self.path.clone()),
            _ => DumpError::Io(e),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sqlite_dump_missing_database() {
        let dir = TempDir::new().unwrap();
        let source = SqliteDump::new(dir.path().join("banshee.db"));

        assert!(matches!(
            source.read_dump(),
            Err(DumpError::DatabaseNotFound(_))
        ));
    }

    #[test]
    fn test_sqlite_dump_missing_program() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("banshee.db");
        fs::write(&db, b"").unwrap();

        let source = SqliteDump::new(db).with_program("/nonexistent/sqlite3");
        assert!(matches!(
            source.read_dump(),
            Err(DumpError::DumpCommand { .. })
        ));
    }

    #[test]
    fn test_dump_file_reads_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("banshee.sql");
        fs::write(&path, "BEGIN TRANSACTION;\nCOMMIT;").unwrap();

        let dump = DumpFile::new(path).read_dump().unwrap();
        assert_eq!(dump.lines().count(), 2);
    }

    #[test]
    fn test_dump_file_missing() {
        let source = DumpFile::new(PathBuf::from("/nonexistent/banshee.sql"));
        assert!(matches!(
            source.read_dump(),
            Err(DumpError::DatabaseNotFound(_))
        ));
    }
}
