pub mod config;

pub use config::{Config, GeneralConfig, InstanceConfig, ProbeConfig};
