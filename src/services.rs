//! Well-known service names.
//!
//! Rule files may name a port by service (`"ssh"`, `"https"`) instead of a
//! number. This table resolves those names the way `/etc/services` would for
//! the common cases.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Service name and port pairs. Names follow the IANA registry.
const SERVICES: &[(&str, u16)] = &[
    ("echo", 7),
    ("discard", 9),
    ("daytime", 13),
    ("ftp-data", 20),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("time", 37),
    ("domain", 53),
    ("bootps", 67),
    ("bootpc", 68),
    ("tftp", 69),
    ("gopher", 70),
    ("finger", 79),
    ("http", 80),
    ("www", 80),
    ("kerberos", 88),
    ("pop3", 110),
    ("sunrpc", 111),
    ("auth", 113),
    ("nntp", 119),
    ("ntp", 123),
    ("epmap", 135),
    ("netbios-ns", 137),
    ("netbios-dgm", 138),
    ("netbios-ssn", 139),
    ("imap", 143),
    ("imap2", 143),
    ("snmp", 161),
    ("snmp-trap", 162),
    ("bgp", 179),
    ("irc", 194),
    ("ldap", 389),
    ("https", 443),
    ("microsoft-ds", 445),
    ("kpasswd", 464),
    ("submissions", 465),
    ("isakmp", 500),
    ("syslog", 514),
    ("printer", 515),
    ("submission", 587),
    ("ipp", 631),
    ("ldaps", 636),
    ("rsync", 873),
    ("imaps", 993),
    ("pop3s", 995),
    ("socks", 1080),
    ("openvpn", 1194),
    ("ms-sql-s", 1433),
    ("ms-sql-m", 1434),
    ("l2tp", 1701),
    ("pptp", 1723),
    ("radius", 1812),
    ("radius-acct", 1813),
    ("mqtt", 1883),
    ("nfs", 2049),
    ("zookeeper", 2181),
    ("mysql", 3306),
    ("ms-wbt-server", 3389),
    ("svn", 3690),
    ("sip", 5060),
    ("sip-tls", 5061),
    ("xmpp-client", 5222),
    ("xmpp-server", 5269),
    ("postgresql", 5432),
    ("amqp", 5672),
    ("redis", 6379),
    ("http-alt", 8080),
    ("git", 9418),
    ("memcache", 11211),
];

static BY_NAME: LazyLock<HashMap<&'static str, u16>> =
    LazyLock::new(|| SERVICES.iter().copied().collect());

/// Look up the port number registered for a service name.
///
/// Matching is case-insensitive. Returns `None` for unknown names.
pub fn port_for_service(name: &str) -> Option<u16> {
    BY_NAME.get(name.to_ascii_lowercase().as_str()).copied()
}

/// Look up the first service name registered for a port number.
pub fn service_for_port(port: u16) -> Option<&'static str> {
    SERVICES
        .iter()
        .find(|(_, p)| *p == port)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_services() {
        assert_eq!(port_for_service("ssh"), Some(22));
        assert_eq!(port_for_service("http"), Some(80));
        assert_eq!(port_for_service("https"), Some(443));
        assert_eq!(port_for_service("domain"), Some(53));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(port_for_service("HTTPS"), Some(443));
    }

    #[test]
    fn test_unknown_service() {
        assert_eq!(port_for_service("no-such-service"), None);
        assert_eq!(service_for_port(12345), None);
    }

    #[test]
    fn test_reverse_lookup_prefers_first_name() {
        assert_eq!(service_for_port(80), Some("http"));
    }
}
