//! Hierarchy resolution: which scope owns the header/rewrite/fastcgi list
//! addressed by a set of optional identifiers.

mod common;

use common::*;
use vhost_core::{
    ConfigError, FastcgiConfig, FastcgiListOwner, HeaderConfig, HeaderListOwner, LocationConfig,
    RewriteListOwner, RewriteRule, ServerConfig,
};

/// A server with one location ("L1") holding its own backend, rewrite rule
/// and fastcgi target, plus one of each at server scope.
fn fixture() -> ServerConfig {
    let mut location = LocationConfig::new("/app");
    location.id = "L1".to_string();
    location.add_backend(backend("B1", "127.0.0.1:8080"));

    let mut rewrite = RewriteRule::new("^/old", "/new");
    rewrite.id = "R1".to_string();
    location.rewrite_rules.push(rewrite);

    let mut fastcgi = FastcgiConfig::new("127.0.0.1:9000");
    fastcgi.id = "F1".to_string();
    location.fastcgi_targets.push(fastcgi);

    let mut server = ServerConfig::new();
    server.add_location(location);
    server.add_backend(backend("SB1", "127.0.0.1:8090"));

    let mut server_rewrite = RewriteRule::new("^/srv", "/root");
    server_rewrite.id = "SR1".to_string();
    server.rewrite_rules.push(server_rewrite);

    let mut server_fastcgi = FastcgiConfig::new("127.0.0.1:9001");
    server_fastcgi.id = "SF1".to_string();
    server.fastcgi_targets.push(server_fastcgi);

    server
}

#[test]
fn test_all_ids_empty_resolves_to_the_server() {
    let mut server = fixture();
    let list = server.find_header_list("", "", "", "").unwrap();
    list.add_header(HeaderConfig::new("X-Server", "1"));
    assert_eq!(server.headers.len(), 1);
}

#[test]
fn test_location_id_alone_resolves_to_the_location() {
    let mut server = fixture();
    let list = server.find_header_list("L1", "", "", "").unwrap();
    list.add_header(HeaderConfig::new("X-Location", "1"));
    assert_eq!(server.find_location("L1").unwrap().headers.len(), 1);
    assert!(server.headers.is_empty());
}

#[test]
fn test_backend_takes_priority_over_location() {
    let mut server = fixture();
    let list = server.find_header_list("L1", "B1", "", "").unwrap();
    list.add_header(HeaderConfig::new("X-Backend", "1"));

    let location = server.find_location("L1").unwrap();
    assert!(location.headers.is_empty(), "location list must stay untouched");
    assert_eq!(location.find_backend("B1").unwrap().headers.len(), 1);
}

#[test]
fn test_rewrite_takes_priority_over_backend_and_location() {
    let mut server = fixture();
    let list = server.find_header_list("L1", "B1", "R1", "").unwrap();
    list.add_header(HeaderConfig::new("X-Rewrite", "1"));

    let location = server.find_location("L1").unwrap();
    assert!(location.find_backend("B1").unwrap().headers.is_empty());
    assert_eq!(location.rewrite_rules[0].headers.len(), 1);
}

#[test]
fn test_fastcgi_takes_priority_over_backend() {
    let mut server = fixture();
    let list = server.find_header_list("L1", "B1", "", "F1").unwrap();
    list.add_header(HeaderConfig::new("X-Fastcgi", "1"));

    let location = server.find_location("L1").unwrap();
    assert!(location.find_backend("B1").unwrap().headers.is_empty());
    assert_eq!(location.fastcgi_targets[0].headers.len(), 1);
}

#[test]
fn test_server_scoped_rewrite_and_fastcgi_and_backend() {
    let mut server = fixture();

    let list = server.find_header_list("", "", "SR1", "").unwrap();
    list.add_header(HeaderConfig::new("X-Srv-Rewrite", "1"));
    assert_eq!(server.rewrite_rules[0].headers.len(), 1);

    let list = server.find_header_list("", "", "", "SF1").unwrap();
    list.add_header(HeaderConfig::new("X-Srv-Fastcgi", "1"));
    assert_eq!(server.fastcgi_targets[0].headers.len(), 1);

    let list = server.find_header_list("", "SB1", "", "").unwrap();
    list.add_header(HeaderConfig::new("X-Srv-Backend", "1"));
    assert_eq!(server.find_backend("SB1").unwrap().headers.len(), 1);
}

#[test]
fn test_missing_location_fails_before_the_deeper_lookup() {
    let mut server = fixture();
    // "SB1" exists at server scope, but the location branch decides first.
    let err = server.find_header_list("missing", "SB1", "", "").unwrap_err();
    assert!(matches!(err, ConfigError::LocationNotFound(id) if id == "missing"));
}

#[test]
fn test_not_found_errors_name_the_missing_scope() {
    let mut server = fixture();

    let err = server.find_header_list("L1", "", "missing", "").unwrap_err();
    assert!(matches!(err, ConfigError::RewriteRuleNotFound(id) if id == "missing"));

    let err = server.find_header_list("L1", "", "", "missing").unwrap_err();
    assert!(matches!(err, ConfigError::FastcgiNotFound(id) if id == "missing"));

    let err = server.find_header_list("L1", "missing", "", "").unwrap_err();
    assert!(matches!(err, ConfigError::BackendNotFound(id) if id == "missing"));
}

#[test]
fn test_rewrite_list_resolution() {
    let mut server = fixture();

    let list = server.find_rewrite_list("").unwrap();
    list.add_rewrite_rule(RewriteRule::new("^/a", "/b"));
    assert_eq!(server.rewrite_rules.len(), 2);

    let list = server.find_rewrite_list("L1").unwrap();
    list.add_rewrite_rule(RewriteRule::new("^/c", "/d"));
    assert_eq!(server.find_location("L1").unwrap().rewrite_rules.len(), 2);

    let err = server.find_rewrite_list("missing").unwrap_err();
    assert!(matches!(err, ConfigError::LocationNotFound(_)));
}

#[test]
fn test_fastcgi_list_resolution() {
    let mut server = fixture();

    let list = server.find_fastcgi_list("").unwrap();
    list.add_fastcgi(FastcgiConfig::new("127.0.0.1:9002"));
    assert_eq!(server.fastcgi_targets.len(), 2);

    let list = server.find_fastcgi_list("L1").unwrap();
    list.add_fastcgi(FastcgiConfig::new("127.0.0.1:9003"));
    assert_eq!(server.find_location("L1").unwrap().fastcgi_targets.len(), 2);

    let err = server.find_fastcgi_list("missing").unwrap_err();
    assert!(matches!(err, ConfigError::LocationNotFound(_)));
}
