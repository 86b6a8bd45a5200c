//! Server selection for an incoming request.

use crate::config::schema::ServerConfig;
use crate::routing::matcher::HostMatch;

/// Pick the server answering for a host name: the first enabled server
/// whose name patterns match, in display order.
pub fn select_server<'a>(
    servers: &'a [ServerConfig],
    host: &str,
) -> Option<(&'a ServerConfig, HostMatch)> {
    for server in servers {
        if !server.on {
            continue;
        }
        if let Some(matched) = server.match_name(host) {
            return Some((server, matched));
        }
    }
    None
}
