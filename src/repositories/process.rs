//! Process helpers - launch programs and relaunch the current executable as admin.

use crate::domain::{AppError, Result};
use std::ffi::OsStr;
use std::process::{Child, Command, ExitStatus};
use tracing::{debug, info};

/// Run `program` to completion and return its exit status.
pub fn run<I, S>(program: &str, args: I) -> Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    debug!(program, "Running process");
    Command::new(program)
        .args(args)
        .status()
        .map_err(|e| AppError::Process(format!("{}: {}", program, e)))
}

/// Start `program` without waiting for it.
///
/// The caller owns the returned [`Child`] and should `wait` on it; a child
/// dropped unreaped stays a zombie on Unix until this process exits.
pub fn spawn<I, S>(program: &str, args: I) -> Result<Child>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = Command::new(program)
        .args(args)
        .spawn()
        .map_err(|e| AppError::Process(format!("{}: {}", program, e)))?;
    debug!(program, pid = child.id(), "Spawned process");
    Ok(child)
}

/// Check if the current process is running with admin privileges
#[must_use]
pub fn is_elevated() -> bool {
    #[cfg(windows)]
    {
        use windows::Win32::Foundation::{CloseHandle, HANDLE};
        use windows::Win32::Security::{
            GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY,
        };
        use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

        unsafe {
            let mut token = HANDLE::default();

            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &raw mut token).is_err() {
                return false;
            }

            let mut elevation = TOKEN_ELEVATION::default();
            let mut return_length = 0u32;

            #[allow(clippy::cast_possible_truncation)]
            let result = GetTokenInformation(
                token,
                TokenElevation,
                Some((&raw mut elevation).cast()),
                std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                &raw mut return_length,
            );

            let _ = CloseHandle(token);

            result.is_ok() && elevation.TokenIsElevated != 0
        }
    }

    #[cfg(not(windows))]
    {
        false
    }
}

/// Start a new elevated instance of the current executable via the `runas` verb.
///
/// The caller decides whether to exit afterwards.
///
/// # Errors
///
/// Returns error if the executable path is unknown, the shell refuses to
/// launch it, or the platform is not Windows.
pub fn relaunch_elevated() -> Result<()> {
    #[cfg(windows)]
    {
        use crate::utils::to_wide;
        use windows::core::PCWSTR;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOW;

        let exe = std::env::current_exe()
            .map_err(|e| AppError::Process(format!("Failed to get executable path: {}", e)))?;
        info!(exe = %exe.display(), "Relaunching elevated");

        let exe_wide = to_wide(&exe.to_string_lossy());
        let op_wide = to_wide("runas");

        unsafe {
            let hinst = ShellExecuteW(
                None,
                PCWSTR(op_wide.as_ptr()),
                PCWSTR(exe_wide.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOW,
            );

            // Values above 32 mean success.
            let rv = hinst.0 as isize;
            if rv <= 32 {
                return Err(AppError::Process(format!(
                    "ShellExecuteW failed: code {}",
                    rv
                )));
            }
        }

        Ok(())
    }

    #[cfg(not(windows))]
    {
        info!("Elevated relaunch requested on a non-Windows host");
        Err(AppError::Process(
            "Relaunch as admin is only supported on Windows".to_string(),
        ))
    }
}
