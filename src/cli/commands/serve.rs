//! Web server command.

use console::style;

use crate::cli::icons::{info, warn};
use docmeta::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, &settings.server.host, settings.server.port),
        None => (settings.server.host.clone(), settings.server.port),
    };

    if !settings.providers.any_configured() {
        println!(
            "{} No AI providers configured; analysis will be rule-based",
            warn()
        );
    }

    println!(
        "{} Starting docmeta server at http://{}:{}",
        info(),
        host,
        port
    );
    println!("  {}", style("Press Ctrl+C to stop").dim());

    docmeta::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> default host
/// - Just a host: "0.0.0.0" -> default port
/// - Host and port: "0.0.0.0:3030"
fn parse_bind_address(bind: &str, default_host: &str, default_port: u16) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return (default_host.to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), default_port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("8080", "127.0.0.1", 3030),
            ("127.0.0.1".to_string(), 8080)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0", "127.0.0.1", 3030),
            ("0.0.0.0".to_string(), 3030)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:9000", "127.0.0.1", 3030),
            ("0.0.0.0".to_string(), 9000)
        );
    }
}
