//! WMI query engine via `windows-rs`.
//!
//! [`WmiEngine`] connects to a namespace through `IWbemLocator`, runs one
//! WQL query, and drains the enumerator into owned [`WmiRecord`]s.
//!
//! # COM apartment model
//!
//! The caller owns the apartment (see [`COMGuard`](crate::com::COMGuard)).
//! Records hold live `IWbemClassObject` references and must be dropped
//! before the guard.

use std::ffi::c_void;

use windows::core::{BSTR, VARIANT};
use windows::Win32::System::Com::{
    CoCreateInstance, CoSetProxyBlanket, CLSCTX_INPROC_SERVER, EOAC_NONE,
    RPC_C_AUTHN_LEVEL_CALL, RPC_C_IMP_LEVEL_IMPERSONATE, SAFEARRAY,
};
use windows::Win32::System::Ole::{
    SafeArrayGetElement, SafeArrayGetElemsize, SafeArrayGetLBound, SafeArrayGetUBound,
};
use windows::Win32::System::Variant::{
    VT_ARRAY, VT_BYREF, VT_EMPTY, VT_I1, VT_I2, VT_I4, VT_INT, VT_NULL, VT_TYPEMASK, VT_UI1,
    VT_UI2, VT_UI4, VT_UINT,
};
use windows::Win32::System::Wmi::{
    IEnumWbemClassObject, IWbemClassObject, IWbemLocator, IWbemServices, WbemLocator,
    WBEM_FLAG_FORWARD_ONLY, WBEM_FLAG_RETURN_IMMEDIATELY, WBEM_S_TIMEDOUT,
};

use crate::errors::MonitorInfoError;
use crate::query::{drain_records, Fetch, QueryEngine, QueryTarget};
use crate::record::RawRecord;

/// Per-object wait when draining the enumerator.
const ENUM_TIMEOUT_MS: i32 = 5000;

/// Upper bound on records drained from one query.
const MAX_RECORDS: usize = 256;

const RPC_C_AUTHN_DEFAULT: u32 = 0xFFFF_FFFF;
const RPC_C_AUTHZ_NONE: u32 = 0;

/// Offset of the data union inside a `VARIANT` (after `vt` + 3 reserved words).
const VARIANT_DATA_OFFSET: usize = 8;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Runs WQL queries through the local WMI service.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmiEngine;

impl WmiEngine {
    unsafe fn connect(namespace: &str) -> Result<IWbemServices, MonitorInfoError> {
        let locator: IWbemLocator = CoCreateInstance(&WbemLocator, None, CLSCTX_INPROC_SERVER)?;

        let services = locator
            .ConnectServer(
                &BSTR::from(namespace),
                &BSTR::new(),
                &BSTR::new(),
                &BSTR::new(),
                0,
                &BSTR::new(),
                None,
            )
            .map_err(|e| MonitorInfoError::ConnectError(format!("ConnectServer({namespace}): {e}")))?;

        CoSetProxyBlanket(
            &services,
            RPC_C_AUTHN_DEFAULT,
            RPC_C_AUTHZ_NONE,
            None,
            RPC_C_AUTHN_LEVEL_CALL,
            RPC_C_IMP_LEVEL_IMPERSONATE,
            None,
            EOAC_NONE,
        )
        .map_err(|e| MonitorInfoError::ConnectError(format!("CoSetProxyBlanket: {e}")))?;

        Ok(services)
    }

    /// One `Next` call, classified.  `WBEM_S_TIMEDOUT` is a success code,
    /// so it has to be told apart from `WBEM_S_FALSE` (end of results).
    fn fetch(enumerator: &IEnumWbemClassObject) -> Fetch<WmiRecord> {
        let mut objects: [Option<IWbemClassObject>; 1] = [None];
        let mut returned: u32 = 0;

        let hr = unsafe { enumerator.Next(ENUM_TIMEOUT_MS, &mut objects, &mut returned) };
        if hr.is_err() {
            return Fetch::Failed(format!(
                "IEnumWbemClassObject::Next: HRESULT 0x{:08X}",
                hr.0 as u32
            ));
        }
        match objects[0].take() {
            Some(inner) if returned > 0 => Fetch::Item(WmiRecord { inner }),
            _ if hr.0 == WBEM_S_TIMEDOUT.0 => Fetch::TimedOut,
            _ => Fetch::Done,
        }
    }
}

impl QueryEngine for WmiEngine {
    type Record = WmiRecord;

    fn execute(&self, target: &QueryTarget) -> Result<Vec<WmiRecord>, MonitorInfoError> {
        unsafe {
            let services = Self::connect(target.namespace)?;

            let enumerator = services
                .ExecQuery(
                    &BSTR::from("WQL"),
                    &BSTR::from(target.query),
                    WBEM_FLAG_FORWARD_ONLY | WBEM_FLAG_RETURN_IMMEDIATELY,
                    None,
                )
                .map_err(|e| MonitorInfoError::QueryError(format!("ExecQuery({}): {e}", target.query)))?;

            let records = drain_records(target, MAX_RECORDS, || Self::fetch(&enumerator))?;
            log::debug!(
                "{} in {}: {} record(s)",
                target.query,
                target.namespace,
                records.len()
            );
            Ok(records)
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One `IWbemClassObject` from a query result.
pub struct WmiRecord {
    inner: IWbemClassObject,
}

impl WmiRecord {
    /// Fetch a property.  `None` for unknown names and for NULL / EMPTY values.
    fn property(&self, name: &str) -> Option<VARIANT> {
        let mut value = VARIANT::default();
        unsafe {
            self.inner
                .Get(&BSTR::from(name), 0, &mut value, None, None)
                .ok()?;
        }
        let vt = variant_vt(&value);
        if vt == VT_NULL.0 || vt == VT_EMPTY.0 {
            return None;
        }
        Some(value)
    }
}

impl RawRecord for WmiRecord {
    fn get_bool(&self, name: &str) -> Option<bool> {
        bool::try_from(&self.property(name)?).ok()
    }

    fn get_long(&self, name: &str) -> Option<i32> {
        i32::try_from(&self.property(name)?).ok()
    }

    fn get_uchar(&self, name: &str) -> Option<u8> {
        let wide = i32::try_from(&self.property(name)?).ok()?;
        u8::try_from(wide).ok()
    }

    fn get_long_array(&self, name: &str) -> Option<Vec<i32>> {
        let value = self.property(name)?;
        unsafe { variant_to_i32_array(&value) }
    }

    fn get_string(&self, name: &str) -> Option<String> {
        BSTR::try_from(&self.property(name)?)
            .ok()
            .map(|b| b.to_string())
    }
}

// ---------------------------------------------------------------------------
// VARIANT helpers
// ---------------------------------------------------------------------------

/// The `vt` tag: the first `u16` of every `VARIANT`.
fn variant_vt(var: &VARIANT) -> u16 {
    unsafe { *(var as *const VARIANT as *const u16) }
}

/// Widen one integer array element read into a zeroed `u64`.
///
/// `None` for every element type other than the 1/2/4-byte integers; those
/// are the only ones that can be copied into a `u64` without overrunning it
/// or taking ownership of a resource (`BSTR`, `VARIANT`, interfaces).
fn widen_element(elem_vt: u16, raw: u64) -> Option<i32> {
    let code = match elem_vt {
        x if x == VT_I1.0 => raw as u8 as i8 as i32,
        x if x == VT_UI1.0 => raw as u8 as i32,
        x if x == VT_I2.0 => raw as u16 as i16 as i32,
        x if x == VT_UI2.0 => raw as u16 as i32,
        x if x == VT_I4.0 || x == VT_INT.0 || x == VT_UI4.0 || x == VT_UINT.0 => raw as u32 as i32,
        _ => return None,
    };
    Some(code)
}

/// Read a one-dimensional `VT_ARRAY` of integers, widening each element.
///
/// WMI hands `uint16[]` properties over as `VT_ARRAY | VT_I4`.  Arrays of
/// any non-integer element type, and by-reference arrays, read as `None`.
unsafe fn variant_to_i32_array(var: &VARIANT) -> Option<Vec<i32>> {
    let vt = variant_vt(var);
    if vt & VT_ARRAY.0 == 0 || vt & VT_BYREF.0 != 0 {
        return None;
    }
    let elem_vt = vt & VT_TYPEMASK.0;
    widen_element(elem_vt, 0)?;

    let base = var as *const VARIANT as *const u8;
    let parray = *(base.add(VARIANT_DATA_OFFSET) as *const *const SAFEARRAY);
    if parray.is_null() {
        return None;
    }

    let lower = SafeArrayGetLBound(parray, 1).ok()?;
    let upper = SafeArrayGetUBound(parray, 1).ok()?;
    if SafeArrayGetElemsize(parray) > 4 {
        return None;
    }

    let mut codes = Vec::with_capacity((upper - lower + 1).max(0) as usize);
    for index in lower..=upper {
        let mut raw: u64 = 0;
        SafeArrayGetElement(parray, &index, &mut raw as *mut u64 as *mut c_void).ok()?;
        codes.push(widen_element(elem_vt, raw)?);
    }
    Some(codes)
}
