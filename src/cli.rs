//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{loader, load_config, ConfigError, ModeKind, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "testhttpserver")]
#[command(about = "Diagnostic HTTP server for network and infrastructure smoke tests", long_about = None)]
pub struct Cli {
    /// Listen address and port [default: :8080]
    #[arg(long, value_name = "ADDR")]
    pub addr: Option<String>,

    /// Root dir of file server [default: .]
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Respond with $TEXT (or "hello") to every request
    #[arg(long)]
    pub hello: bool,

    /// Respond with the machine's host name to every request
    #[arg(long)]
    pub hostname: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "testhttpserver=debug"
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Merge defaults, the config file, `TEXT` and flags, then validate.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        config.apply_env();
        self.apply(&mut config);
        loader::check(&config)?;
        Ok(config)
    }

    fn apply(self, config: &mut ServerConfig) {
        if let Some(addr) = self.addr {
            config.listener.bind_address = addr;
        }
        if let Some(dir) = self.dir {
            config.mode.root_dir = dir;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        // --hello wins when both switches are given.
        if self.hello {
            config.mode.kind = ModeKind::Hello;
        } else if self.hostname {
            config.mode.kind = ModeKind::Hostname;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("testhttpserver").chain(args.iter().copied())).unwrap()
    }

    fn merged(args: &[&str]) -> ServerConfig {
        let mut config = ServerConfig::default();
        parse(args).apply(&mut config);
        config
    }

    #[test]
    fn no_flags_is_file_server_on_8080() {
        let config = merged(&[]);
        assert_eq!(config.mode.kind, ModeKind::FileServer);
        assert_eq!(config.listener.bind_address, ":8080");
        assert_eq!(config.mode.root_dir, PathBuf::from("."));
    }

    #[test]
    fn flags_override_defaults() {
        let config = merged(&["--addr", "127.0.0.1:9999", "--dir", "/srv", "--hostname"]);
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert_eq!(config.mode.root_dir, PathBuf::from("/srv"));
        assert_eq!(config.mode.kind, ModeKind::Hostname);
    }

    #[test]
    fn hello_wins_over_hostname() {
        assert_eq!(merged(&["--hostname", "--hello"]).mode.kind, ModeKind::Hello);
    }

    #[test]
    fn flags_leave_file_settings_alone() {
        let mut config = ServerConfig::default();
        config.mode.kind = ModeKind::Hello;
        config.listener.bind_address = "127.0.0.1:7000".into();
        parse(&["--log-level", "debug"]).apply(&mut config);

        assert_eq!(config.mode.kind, ModeKind::Hello);
        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["testhttpserver", "--port", "80"]).is_err());
    }
}
