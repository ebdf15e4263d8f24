//! JSON report output.
//!
//! The report is a flat JSON object written on a single line, spaced the way
//! `{"installer": "brew"}` reads: a space after each colon and comma.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::detection::{Installer, InstallerInfo};
use crate::error::{DetectError, Result};

/// The serialized report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report<'a> {
    /// Detected installer identifier.
    pub installer: Installer,
    /// Upgrade command, only present when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_cmd: Option<Option<&'a str>>,
}

impl<'a> Report<'a> {
    /// Report with the single `installer` key.
    pub fn new(info: &'a InstallerInfo) -> Self {
        Self {
            installer: info.installer(),
            upgrade_cmd: None,
        }
    }

    /// Report that also carries `upgrade_cmd` (which may be `null`).
    pub fn with_upgrade_cmd(info: &'a InstallerInfo) -> Self {
        Self {
            installer: info.installer(),
            upgrade_cmd: Some(info.upgrade_cmd()),
        }
    }

    /// Serialize to a single line without the trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut ser)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Compact formatter with `": "` and `", "` separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Writes reports to an output stream.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the report followed by a newline and flush.
    ///
    /// Any write failure is an [`DetectError::EnvironmentProbeFailure`].
    pub fn write(&mut self, report: &Report<'_>) -> Result<()> {
        let line = report.to_json()?;
        writeln!(self.out, "{line}")
            .and_then(|()| self.out.flush())
            .map_err(|e| DetectError::probe_failure("cannot write report to stdout", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UvUpgradeStrategy;

    fn info(installer: Installer) -> InstallerInfo {
        InstallerInfo::new(installer, "mypkg", UvUpgradeStrategy::Add)
    }

    #[test]
    fn single_key_report() {
        let info = info(Installer::Brew);
        insta::assert_snapshot!(Report::new(&info).to_json().unwrap(), @r#"{"installer": "brew"}"#);
    }

    #[test]
    fn report_with_upgrade_cmd() {
        let info = info(Installer::Pip);
        let json = Report::with_upgrade_cmd(&info).to_json().unwrap();
        insta::assert_snapshot!(json, @r#"{"installer": "pip", "upgrade_cmd": "pip install -U mypkg"}"#);
    }

    #[test]
    fn unknown_upgrade_cmd_is_null() {
        let info = InstallerInfo::unknown();
        let json = Report::with_upgrade_cmd(&info).to_json().unwrap();
        assert_eq!(json, r#"{"installer": "unknown", "upgrade_cmd": null}"#);
    }

    #[test]
    fn report_is_valid_json_with_one_key() {
        for installer in Installer::ALL {
            let info = info(installer);
            let json = Report::new(&info).to_json().unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert_eq!(object["installer"], installer.as_str());
        }
    }

    #[test]
    fn formatter_spaces_arrays() {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        vec![1, 2, 3].serialize(&mut ser).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn reporter_writes_trailing_newline() {
        let info = info(Installer::Brew);
        let mut buf = Vec::new();
        Reporter::new(&mut buf).write(&Report::new(&info)).unwrap();
        assert_eq!(buf, b"{\"installer\": \"brew\"}\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_probe_failure() {
        let info = info(Installer::Brew);
        let err = Reporter::new(BrokenPipe)
            .write(&Report::new(&info))
            .unwrap_err();
        assert!(matches!(err, DetectError::EnvironmentProbeFailure { .. }));
    }
}
