//! Export of the run's public signing key.
//!
//! The key that signed the checksum lists is looked up in the local GPG
//! keyring by fingerprint. Commands run through [`CommandExecutor`] so tests
//! can substitute canned output.

use crate::error::{PublisherError, Result};
use log::{debug, info};
use registry_catalogue::signing_key::PgpSigningKey;
use std::process::{Command, Output};

/// Environment variable consulted when no fingerprint is given.
pub const FINGERPRINT_ENV: &str = "GPG_FINGERPRINT";

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use registry_publisher::signing_key::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("gpg", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), registry_publisher::error::PublisherError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(PublisherError::from)
    }
}

/// Export the ASCII-armoured public key for `fingerprint`.
///
/// Runs `gpg --armor --export <fingerprint>`. gpg exits successfully with
/// empty output for unknown keys, so empty output is treated as failure.
///
/// # Errors
///
/// Returns [`PublisherError::KeyExport`] if gpg fails or exports nothing, and
/// [`PublisherError::Io`] if gpg cannot be started.
pub fn export_public_key(executor: &dyn CommandExecutor, fingerprint: &str) -> Result<PgpSigningKey> {
    debug!("exporting public key {fingerprint}");
    let output = executor.run("gpg", &["--armor", "--export", fingerprint])?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        return Err(PublisherError::KeyExport {
            fingerprint: fingerprint.to_owned(),
            message: format!("gpg exited with {}: {}", output.status, stderr.trim()),
        });
    }

    let armor = String::from_utf8_lossy(&output.stdout);
    if armor.trim().is_empty() {
        return Err(PublisherError::KeyExport {
            fingerprint: fingerprint.to_owned(),
            message: format!("gpg exported no key: {}", stderr.trim()),
        });
    }

    info!("using public key {fingerprint}");
    Ok(PgpSigningKey::new(fingerprint, armor.into_owned()))
}
