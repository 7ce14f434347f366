//! Minecraft Java Edition server status prober.
//!
//! Opens a short-lived TCP connection, performs the Server List Ping
//! exchange and turns the JSON status into a compact text block:
//!
//! ```text
//! (3/20
//! 1.Alice
//! 2.Bob
//! 3.Carol
//! )
//! Motd:A Minecraft Server
//! 地址:mc.example.com:25565
//! ```
//!
//! [`StatusUpdater`] refreshes a configured set of servers on an interval
//! and caches the rendered text per group in a [`StatusStore`].

pub mod config;
pub mod error;
pub mod monitor;
pub mod probe;
pub mod render;
pub mod telemetry;

pub use config::{ConfigError, MonitorConfig, TargetConfig};
pub use error::ProbeError;
pub use monitor::{RefreshReport, StatusStore, StatusUpdater, UpdaterHandle};
pub use probe::{ProbeOptions, ProbeSession, SessionState, fetch_status, probe, probe_with};
