//! Cross-subsystem flows.
//!
//! Each flow wires the real token cache, security engine, dispatcher and
//! `reqwest` transport against `axum` servers standing in for the identity
//! provider and the receiving peer.

#[cfg(test)]
mod delivery;
#[cfg(test)]
mod support;
#[cfg(test)]
mod token_refresh;
