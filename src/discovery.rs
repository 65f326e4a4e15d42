//! Discovery of running emulators.
//!
//! Each running emulator advertises itself with a `pid_<pid>.ini` file
//! of `key=value` lines in a per-OS runtime directory. The fields we
//! care about are `grpc.port` (required), `grpc.token`, `port.serial`,
//! and `avd.name`. Files that stop parsing are skipped, not fatal: a
//! stale advertisement just means the connect attempt fails later.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use secrecy::SecretString;
use tracing::debug;

/// A running emulator parsed from its advertisement file.
#[derive(Debug)]
pub struct DiscoveredEmulator {
    pub grpc_port: u16,
    pub grpc_token: Option<SecretString>,
    pub serial_port: Option<u16>,
    pub avd_name: Option<String>,
    /// The advertisement file this entry came from.
    pub source: PathBuf,
}

/// Default per-OS location of the `avd/running` directory.
pub fn default_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| home.join("Library/Caches/TemporaryItems/avd/running"))
    } else if cfg!(target_os = "windows") {
        dirs::cache_dir().map(|cache| cache.join("Temp").join("avd").join("running"))
    } else {
        std::env::var_os("XDG_RUNTIME_DIR")
            .map(|runtime| PathBuf::from(runtime).join("avd/running"))
            .or_else(|| dirs::home_dir().map(|home| home.join(".android/avd/running")))
    }
}

/// Scan `dir` for emulator advertisements, newest first.
///
/// A missing directory yields an empty list rather than an error, as
/// does a directory with no parseable advertisements.
pub fn discover(dir: &Path) -> Vec<DiscoveredEmulator> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut found = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !(name.starts_with("pid_") && name.ends_with(".ini")) {
            continue;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable advertisement");
                continue;
            }
        };

        match parse_advertisement(&contents, &path) {
            Some(emulator) => {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                found.push((modified, emulator));
            }
            None => debug!(path = %path.display(), "advertisement has no grpc.port"),
        }
    }

    found.sort_by(|a, b| b.0.cmp(&a.0));
    found.into_iter().map(|(_, emulator)| emulator).collect()
}

fn parse_advertisement(contents: &str, path: &Path) -> Option<DiscoveredEmulator> {
    let mut grpc_port = None;
    let mut grpc_token = None;
    let mut serial_port = None;
    let mut avd_name = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match (key.trim(), value.trim()) {
            ("grpc.port", v) => grpc_port = v.parse().ok(),
            ("grpc.token", v) if !v.is_empty() => {
                grpc_token = Some(SecretString::from(v.to_string()));
            }
            ("port.serial", v) => serial_port = v.parse().ok(),
            ("avd.name", v) if !v.is_empty() => avd_name = Some(v.to_string()),
            _ => {}
        }
    }

    Some(DiscoveredEmulator {
        grpc_port: grpc_port?,
        grpc_token,
        serial_port,
        avd_name,
        source: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    fn write_ini(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_a_full_advertisement() {
        let dir = TempDir::new().unwrap();
        write_ini(
            dir.path(),
            "pid_4711.ini",
            "port.serial=5554\nport.adb=5555\navd.name=Pixel_8_API_35\ngrpc.port=8554\ngrpc.token=hunter2\n",
        );

        let found = discover(dir.path());
        assert_eq!(found.len(), 1);
        let emulator = &found[0];
        assert_eq!(emulator.grpc_port, 8554);
        assert_eq!(emulator.serial_port, Some(5554));
        assert_eq!(emulator.avd_name.as_deref(), Some("Pixel_8_API_35"));
        assert_eq!(
            emulator.grpc_token.as_ref().unwrap().expose_secret(),
            "hunter2"
        );
    }

    #[test]
    fn skips_files_without_grpc_port() {
        let dir = TempDir::new().unwrap();
        write_ini(dir.path(), "pid_1.ini", "port.serial=5554\navd.name=old\n");
        write_ini(dir.path(), "pid_2.ini", "grpc.port=8556\n");
        write_ini(dir.path(), "notes.txt", "grpc.port=9999\n");

        let found = discover(dir.path());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].grpc_port, 8556);
    }

    #[test]
    fn missing_directory_is_empty_not_fatal() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("does-not-exist");
        assert!(discover(&gone).is_empty());
    }

    #[test]
    fn newest_advertisement_wins() {
        let dir = TempDir::new().unwrap();
        let older = write_ini(dir.path(), "pid_1.ini", "grpc.port=8554\n");
        write_ini(dir.path(), "pid_2.ini", "grpc.port=8556\n");

        // Backdate the first file so the second is unambiguously newer.
        let past = SystemTime::now() - Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&older)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let found = discover(dir.path());
        assert_eq!(found[0].grpc_port, 8556);
        assert_eq!(found[1].grpc_port, 8554);
    }
}
