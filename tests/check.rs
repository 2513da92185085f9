use portpecker::config::load_rule_set;
use portpecker::output::{write_evaluation, OutputFormat};
use portpecker::{ConnectProbe, Evaluator, Outcome, Protocol};
use std::io::Write;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

const LOCAL: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 5);

fn write_rules(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn checks_applicable_rules_against_live_sockets() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let closed = closed_port().await;

    let rules = write_rules(&format!(
        r#"{{
            "rules": [
                {{
                    "source": "10.0.0.5",
                    "destination": "127.0.0.1",
                    "ports": [
                        {{"port": "{open}", "protocol": "TCP"}},
                        {{"port": "{closed}", "protocol": "TCP"}}
                    ],
                    "note": "this host"
                }},
                {{
                    "source": "192.0.2.1",
                    "destination": "127.0.0.1",
                    "ports": [{{"port": "{open}", "protocol": "TCP"}}],
                    "note": "someone else"
                }},
                {{
                    "source": "*",
                    "destination": "127.0.0.1",
                    "ports": [
                        {{"port": "{open}", "protocol": "SCTP"}},
                        {{"port": "9", "protocol": "UDP"}}
                    ],
                    "note": "everyone"
                }}
            ]
        }}"#
    ));

    let rule_set = load_rule_set(rules.path()).unwrap();
    assert_eq!(rule_set.len(), 3);

    let evaluator = Evaluator::new(rule_set, LOCAL, ConnectProbe::new(Duration::from_secs(3)));
    let evaluation = evaluator.collect().await;

    assert_eq!(evaluation.outcome(), Outcome::Checked(2));
    let notes: Vec<&str> = evaluation.reports.iter().map(|r| r.note.as_str()).collect();
    assert_eq!(notes, vec!["this host", "everyone"]);

    let this_host = &evaluation.reports[0];
    assert!(!this_host.applies_to_all);
    assert_eq!(
        this_host.port_results.iter().map(|r| r.success).collect::<Vec<_>>(),
        vec![true, false]
    );

    let everyone = &evaluation.reports[1];
    assert!(everyone.applies_to_all);
    assert_eq!(
        everyone.port_results[0].protocol,
        Protocol::Unsupported("SCTP".to_string())
    );
    assert!(!everyone.port_results[0].success);
    assert_eq!(everyone.port_results[1].protocol, Protocol::Udp);
    assert!(everyone.port_results[1].success);

    drop(listener);
}

#[tokio::test]
async fn reports_no_applicable_rules() {
    let rules = write_rules(
        r#"{"rules":[{"source":"192.0.2.1","destination":"127.0.0.1","ports":[{"port":"80","protocol":"TCP"}],"note":"x"}]}"#,
    );

    let evaluator = Evaluator::new(
        load_rule_set(rules.path()).unwrap(),
        LOCAL,
        ConnectProbe::default(),
    );
    let evaluation = evaluator.collect().await;

    assert_eq!(evaluation.outcome(), Outcome::NoApplicableRules);
    assert!(evaluation.no_applicable_rules);

    let mut buf = Vec::new();
    write_evaluation(&mut buf, &evaluation, OutputFormat::Plain).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("No applicable rules found for this host"));
}

#[tokio::test]
async fn closed_port_fails_within_timeout() {
    let closed = closed_port().await;
    let rules = write_rules(&format!(
        r#"{{"rules":[{{"source":"*","destination":"127.0.0.1","ports":[{{"port":"{closed}","protocol":"TCP"}}],"note":"closed"}}]}}"#
    ));

    let evaluator = Evaluator::new(
        load_rule_set(rules.path()).unwrap(),
        LOCAL,
        ConnectProbe::default(),
    );

    let start = Instant::now();
    let evaluation = evaluator.collect().await;
    assert!(start.elapsed() < Duration::from_secs(4));
    assert!(!evaluation.reports[0].port_results[0].success);
}

#[test]
fn malformed_rule_file_is_rejected() {
    let rules = write_rules(r#"{"rules": "not a list"}"#);
    assert!(load_rule_set(rules.path()).is_err());
}
