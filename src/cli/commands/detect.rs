//! Detect command implementation.
//!
//! Running `detect-installer-test` detects the installer of the running
//! binary and prints the JSON report.

use std::io::Write;

use crate::config::DetectorConfig;
use crate::detection::{Detector, InstallContext, InstallerInfo};
use crate::error::Result;
use crate::report::{Report, Reporter};

use super::dispatcher::{Command, CommandResult};

/// The detect command implementation.
pub struct DetectCommand {
    detector: Detector,
    include_upgrade_cmd: bool,
    context: Option<InstallContext>,
}

impl DetectCommand {
    /// Create a detect command for the running executable.
    pub fn new(config: DetectorConfig, include_upgrade_cmd: bool) -> Self {
        Self {
            detector: Detector::new(config),
            include_upgrade_cmd,
            context: None,
        }
    }

    /// Inspect `context` instead of the running executable.
    pub fn with_context(mut self, context: InstallContext) -> Self {
        self.context = Some(context);
        self
    }

    fn detect(&self) -> InstallerInfo {
        match &self.context {
            Some(ctx) => self.detector.detect(ctx),
            None => self.detector.detect_current(),
        }
    }
}

impl Command for DetectCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let info = self.detect();
        if let Some(cmd) = info.upgrade_cmd() {
            tracing::debug!("Upgrade with: {}", cmd);
        }

        let report = if self.include_upgrade_cmd {
            Report::with_upgrade_cmd(&info)
        } else {
            Report::new(&info)
        };
        Reporter::new(out).write(&report)?;

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;
    use std::io;

    fn run(cmd: &DetectCommand) -> String {
        let mut out = Vec::new();
        let result = cmd.execute(&mut out).unwrap();
        assert_eq!(result.exit_code, 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn brew_context_prints_brew() {
        let ctx = InstallContext::new("/opt/homebrew/Cellar/mypkg/0.1.0/libexec/bin/mypkg");
        let cmd = DetectCommand::new(DetectorConfig::for_package("mypkg"), false).with_context(ctx);

        assert_eq!(run(&cmd), "{\"installer\": \"brew\"}\n");
    }

    #[test]
    fn unknown_still_succeeds() {
        let ctx = InstallContext::new("/nonexistent/bin/mypkg");
        let cmd = DetectCommand::new(DetectorConfig::for_package("mypkg"), false).with_context(ctx);

        assert_eq!(run(&cmd), "{\"installer\": \"unknown\"}\n");
    }

    #[test]
    fn includes_upgrade_cmd_when_asked() {
        let ctx = InstallContext::new("/home/u/.local/pipx/venvs/mypkg/bin/mypkg");
        let cmd = DetectCommand::new(DetectorConfig::for_package("mypkg"), true).with_context(ctx);

        assert_eq!(
            run(&cmd),
            "{\"installer\": \"pipx\", \"upgrade_cmd\": \"pipx upgrade mypkg\"}\n"
        );
    }

    #[test]
    fn write_failure_is_an_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let cmd = DetectCommand::new(DetectorConfig::default(), false)
            .with_context(InstallContext::new("/nonexistent/bin/tool"));
        let err = cmd.execute(&mut Closed).unwrap_err();

        assert!(matches!(err, DetectError::EnvironmentProbeFailure { .. }));
    }
}
