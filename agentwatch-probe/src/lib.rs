// ---------------------------------------------------------------------------
// Active fingerprinting
// ---------------------------------------------------------------------------
//
// Decides whether an address looks like an exposed chat-agent installation
// by issuing a short fixed sequence of HTTP probes. Every probe failure
// (timeout, refused connection, non-2xx, malformed body) degrades to "no
// signal" rather than an error; only positive signals are collected.

mod fingerprint;
mod probe;

pub use fingerprint::{
    Fingerprint, Fingerprinter, BROWSER_CONTROL_PORT, GATEWAY_PORT, WEB_UI_PORT,
};
pub use probe::PROBE_TIMEOUT;
