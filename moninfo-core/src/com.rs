//! COM apartment RAII guard for the WMI round trip.
//!
//! The `PhantomData<*const ()>` field makes [`COMGuard`] `!Send` + `!Sync`.
//! Create it before any WMI interface so it is dropped after all of them.

use windows::Win32::Foundation::{RPC_E_CHANGED_MODE, S_FALSE, S_OK};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_MULTITHREADED};

use crate::errors::MonitorInfoError;

/// Balances `CoInitializeEx` with `CoUninitialize` on `Drop`, but only when
/// this guard actually entered the apartment.
#[must_use = "COMGuard must outlive every WMI interface created under it"]
pub struct COMGuard {
    should_uninit: bool,
    _not_send: std::marker::PhantomData<*const ()>,
}

impl COMGuard {
    /// Join (or create) the calling thread's MTA.
    ///
    /// An existing STA (`RPC_E_CHANGED_MODE`) is accepted: WMI works from
    /// either apartment, we just must not uninitialise it.
    pub fn init() -> Result<Self, MonitorInfoError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };

        let should_uninit = if hr == S_OK || hr == S_FALSE {
            true
        } else if hr == RPC_E_CHANGED_MODE {
            log::debug!("CoInitializeEx: thread already in an STA, reusing it for WMI");
            false
        } else {
            return Err(MonitorInfoError::ComError(format!(
                "CoInitializeEx failed: HRESULT 0x{:08X}",
                hr.0 as u32
            )));
        };

        Ok(Self {
            should_uninit,
            _not_send: std::marker::PhantomData,
        })
    }
}

impl Drop for COMGuard {
    fn drop(&mut self) {
        if self.should_uninit {
            unsafe { CoUninitialize() };
        }
    }
}
