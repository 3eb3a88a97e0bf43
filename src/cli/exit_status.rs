use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): the command completed
/// - `Failure` (1): `scan` completed but some files failed to parse
/// - `Error` (2): bad arguments, unreadable input or invalid config
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
