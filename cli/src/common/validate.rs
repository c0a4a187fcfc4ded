//! # dockmgr Input Validation (`common::validate`)
//!
//! File: cli/src/common/validate.rs
//!
//! ## Overview
//!
//! Checks applied to free-text input before it is forwarded to the engine:
//!
//! - `require` / `require_identifier`: reject empty values, and values that
//!   would be parsed by the engine as an option (`-rf`, `--privileged`).
//! - `container_name`: the name grammar the engine enforces for `--name`.
//! - `parse_port_mapping` / `parse_port_list`: `-p` publish specs of the form
//!   `[ip:][host:]container[/proto]`, where ports may be ranges.
//!
use crate::core::error::DockmgrError;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

/// Trims `value` and rejects it if nothing is left.
pub fn require(value: &str, what: &str) -> Result<String, DockmgrError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DockmgrError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// Like `require`, and the value may not start with `-`.
pub fn require_identifier(value: &str, what: &str) -> Result<String, DockmgrError> {
    let value = require(value, what)?;
    if value.starts_with('-') {
        return Err(DockmgrError::InvalidInput(format!(
            "{} cannot start with '-': {}",
            what, value
        )));
    }
    Ok(value)
}

/// Container names: `[a-zA-Z0-9][a-zA-Z0-9_.-]*`.
pub fn container_name(value: &str) -> Result<String, DockmgrError> {
    let name = require_identifier(value, "Container name")?;
    let mut chars = name.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !(first_ok && rest_ok) {
        return Err(DockmgrError::InvalidInput(format!(
            "Invalid container name '{}': use letters, digits, '_', '.' or '-', starting with a letter or digit",
            name
        )));
    }
    Ok(name)
}

/// A single port or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    pub fn span(&self) -> u32 {
        u32::from(self.end - self.start) + 1
    }

    fn is_range(&self) -> bool {
        self.start != self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(f, "{}-{}", self.start, self.end)
        } else {
            write!(f, "{}", self.start)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Sctp => "sctp",
        })
    }
}

/// A parsed `-p` publish spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub host_ip: Option<IpAddr>,
    pub host: Option<PortRange>,
    pub container: PortRange,
    pub protocol: Option<Protocol>,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host_ip {
            Some(IpAddr::V6(ip)) => write!(f, "[{}]:", ip)?,
            Some(IpAddr::V4(ip)) => write!(f, "{}:", ip)?,
            None => {}
        }
        if let Some(host) = self.host {
            write!(f, "{}:", host)?;
        } else if self.host_ip.is_some() {
            // `ip::container` keeps the empty host slot.
            f.write_str(":")?;
        }
        write!(f, "{}", self.container)?;
        if let Some(proto) = self.protocol {
            write!(f, "/{}", proto)?;
        }
        Ok(())
    }
}

fn invalid(mapping: &str, reason: impl Into<String>) -> DockmgrError {
    DockmgrError::InvalidPortMapping {
        mapping: mapping.to_string(),
        reason: reason.into(),
    }
}

fn parse_port(mapping: &str, s: &str) -> Result<u16, DockmgrError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(mapping, format!("'{}' is not a port number", s)));
    }
    match s.parse::<u16>() {
        Ok(0) | Err(_) => Err(invalid(
            mapping,
            format!("port {} is outside 1-65535", s),
        )),
        Ok(port) => Ok(port),
    }
}

fn parse_range(mapping: &str, s: &str) -> Result<PortRange, DockmgrError> {
    match s.split_once('-') {
        Some((start, end)) => {
            let start = parse_port(mapping, start)?;
            let end = parse_port(mapping, end)?;
            if start > end {
                return Err(invalid(
                    mapping,
                    format!("range {}-{} is reversed", start, end),
                ));
            }
            Ok(PortRange { start, end })
        }
        None => {
            let port = parse_port(mapping, s)?;
            Ok(PortRange {
                start: port,
                end: port,
            })
        }
    }
}

/// Parses `[ip:][host:]container[/proto]`.
pub fn parse_port_mapping(input: &str) -> Result<PortMapping, DockmgrError> {
    let mapping = input.trim();
    if mapping.is_empty() {
        return Err(invalid(mapping, "mapping is empty"));
    }

    let (spec, protocol) = match mapping.rsplit_once('/') {
        Some((spec, proto)) => {
            let protocol = match proto.to_ascii_lowercase().as_str() {
                "tcp" => Protocol::Tcp,
                "udp" => Protocol::Udp,
                "sctp" => Protocol::Sctp,
                other => {
                    return Err(invalid(mapping, format!("unknown protocol '{}'", other)))
                }
            };
            (spec, Some(protocol))
        }
        None => (mapping, None),
    };

    // Bracketed IPv6 host address: `[::1]:8080:80`.
    let (host_ip, rest): (Option<IpAddr>, &str) = if let Some(after) = spec.strip_prefix('[') {
        let (ip, rest) = after
            .split_once("]:")
            .ok_or_else(|| invalid(mapping, "IPv6 address must be followed by ':'"))?;
        let ip: Ipv6Addr = ip
            .parse()
            .map_err(|_| invalid(mapping, format!("'{}' is not an IPv6 address", ip)))?;
        (Some(IpAddr::V6(ip)), rest)
    } else {
        (None, spec)
    };

    let parts: Vec<&str> = rest.split(':').collect();
    let (host_ip, host, container) = match (host_ip, parts.as_slice()) {
        (None, [container]) => (None, None, *container),
        (None, [host, container]) => (None, Some(*host), *container),
        (None, [ip, host, container]) => {
            let ip: IpAddr = ip
                .parse()
                .map_err(|_| invalid(mapping, format!("'{}' is not an IP address", ip)))?;
            (Some(ip), Some(*host), *container)
        }
        (Some(ip), [host, container]) => (Some(ip), Some(*host), *container),
        (Some(ip), [container]) => (Some(ip), None, *container),
        _ => {
            return Err(invalid(
                mapping,
                "expected [ip:][host:]container[/protocol]",
            ))
        }
    };

    // `127.0.0.1::80` leaves the host port to the engine.
    let host = match host {
        Some("") if host_ip.is_some() => None,
        Some(h) => Some(parse_range(mapping, h)?),
        None => None,
    };
    let container = parse_range(mapping, container)?;

    if let Some(h) = host {
        if container.is_range() && h.span() != container.span() {
            return Err(invalid(
                mapping,
                "host and container ranges must be the same size",
            ));
        }
    }

    Ok(PortMapping {
        host_ip,
        host,
        container,
        protocol,
    })
}

/// Parses a comma- or whitespace-separated list of mappings. Empty input is
/// an empty list.
pub fn parse_port_list(input: &str) -> Result<Vec<PortMapping>, DockmgrError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_port_mapping)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(s: &str) -> PortMapping {
        parse_port_mapping(s).unwrap_or_else(|e| panic!("{} should parse: {}", s, e))
    }

    fn rejects(s: &str) {
        assert!(
            matches!(
                parse_port_mapping(s),
                Err(DockmgrError::InvalidPortMapping { .. })
            ),
            "{} should be rejected",
            s
        );
    }

    #[test]
    fn test_require_trims_and_rejects_blank() {
        assert_eq!(require("  nginx ", "Image name").unwrap(), "nginx");
        let err = require("   ", "Image name").unwrap_err();
        assert_eq!(err.to_string(), "Image name cannot be empty");
    }

    #[test]
    fn test_require_identifier_rejects_option_like_values() {
        assert!(require_identifier("--privileged", "Container ID").is_err());
        assert_eq!(require_identifier("abc123", "Container ID").unwrap(), "abc123");
    }

    #[test]
    fn test_container_name_grammar() {
        assert_eq!(container_name("web_1.prod-a").unwrap(), "web_1.prod-a");
        assert!(container_name("_web").is_err());
        assert!(container_name("web server").is_err());
        assert!(container_name("").is_err());
    }

    #[test]
    fn test_common_port_mappings() {
        let m = ok("8080:80");
        assert_eq!(m.host, Some(PortRange { start: 8080, end: 8080 }));
        assert_eq!(m.container.start, 80);
        assert_eq!(m.to_string(), "8080:80");

        assert_eq!(ok("80").host, None);
        assert_eq!(ok("53:53/udp").protocol, Some(Protocol::Udp));
        assert_eq!(ok("127.0.0.1:8080:80").to_string(), "127.0.0.1:8080:80");
        assert_eq!(ok("127.0.0.1::80").to_string(), "127.0.0.1::80");
        assert_eq!(ok("[::1]:8080:80").to_string(), "[::1]:8080:80");
        assert_eq!(ok("8000-8002:9000-9002/tcp").to_string(), "8000-8002:9000-9002/tcp");
        // A host range may publish a single container port.
        assert!(parse_port_mapping("8000-8010:80").is_ok());
    }

    #[test]
    fn test_malformed_port_mappings() {
        rejects("");
        rejects("abc");
        rejects("8080:");
        rejects(":80");
        rejects("0:80");
        rejects("70000:80");
        rejects("8080:80/icmp");
        rejects("1:2:3:4");
        rejects("300.1.1.1:80:80");
        rejects("9002-9000:80");
        rejects("8000-8001:9000-9002");
        rejects("8080:9000-9002");
        rejects("[::1:8080:80");
    }

    #[test]
    fn test_port_list() {
        let list = parse_port_list("8080:80, 8443:443 9000").unwrap();
        assert_eq!(list.len(), 3);
        assert!(parse_port_list("").unwrap().is_empty());
        assert!(parse_port_list("8080:80,nope").is_err());
    }
}
