//! Server configuration, read from the environment at startup

use std::env;
use tracing::Level;

pub const DEFAULT_SERVER_NAME: &str = "unitconv";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Maximum level written to stderr
    pub log_level: Level,
    /// Name advertised in the initialize response
    pub server_name: String,
    /// A log level setting that could not be parsed, kept so it can be
    /// reported once logging is up
    pub rejected_log_level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            server_name: DEFAULT_SERVER_NAME.to_string(),
            rejected_log_level: None,
        }
    }
}

impl ServerConfig {
    /// `UNITCONV_LOG` (then `RUST_LOG`, as a directive list) and `UNITCONV_SERVER_NAME`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let level = lookup("UNITCONV_LOG").or_else(|| lookup("RUST_LOG"));
        if let Some(raw) = level.filter(|s| !s.trim().is_empty()) {
            match parse_directives(&raw) {
                Some(level) => config.log_level = level,
                None => config.rejected_log_level = Some(raw),
            }
        }

        if let Some(name) = lookup("UNITCONV_SERVER_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.server_name = name.to_string();
            }
        }

        config
    }
}

/// Reduce a `RUST_LOG` style directive list to one maximum level.
///
/// A bare level (`info`) sets it directly. Without one, the most verbose
/// `target=level` directive wins, so `info,unitconv_mcp=debug` yields INFO
/// and `unitconv_mcp=debug` yields DEBUG. Any unparseable directive rejects
/// the whole list.
fn parse_directives(raw: &str) -> Option<Level> {
    let mut bare = None;
    let mut targeted: Option<Level> = None;

    for directive in raw.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.split_once('=') {
            Some((target, level)) => {
                if target.trim().is_empty() {
                    return None;
                }
                let level = level.trim().parse::<Level>().ok()?;
                targeted = Some(targeted.map_or(level, |t| t.max(level)));
            }
            None => bare = Some(directive.parse::<Level>().ok()?),
        }
    }

    bare.or(targeted)
}
