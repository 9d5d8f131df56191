use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Hands a saved document to whatever displays it.
pub trait DocumentOpener: Send + Sync {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Launches the platform's default viewer without waiting for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl DocumentOpener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        let mut child = viewer_command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // Reap the launcher in the background.
        thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
