//! CSV output formatting.

use crate::evaluator::Evaluation;
use std::io::Write;

/// Write one row per probed port.
pub fn write_csv<W: Write>(out: &mut W, evaluation: &Evaluation) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record([
        "note",
        "applies_to_all",
        "destination",
        "port",
        "protocol",
        "success",
    ])?;

    for report in &evaluation.reports {
        for result in &report.port_results {
            let protocol = result.protocol.to_string();
            wtr.write_record([
                report.note.as_str(),
                if report.applies_to_all { "true" } else { "false" },
                result.destination.as_str(),
                result.port.as_str(),
                protocol.as_str(),
                if result.success { "true" } else { "false" },
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{PortResult, RuleReport};
    use crate::types::Protocol;
    use chrono::Utc;
    use std::net::Ipv4Addr;

    #[test]
    fn test_csv_rows() {
        let evaluation = Evaluation {
            local_ip: Ipv4Addr::new(10, 0, 0, 5),
            checked_at: Utc::now(),
            reports: vec![RuleReport {
                note: "dns, both transports".to_string(),
                applies_to_all: true,
                port_results: vec![
                    PortResult {
                        destination: "ns1".to_string(),
                        port: "53".to_string(),
                        protocol: Protocol::Udp,
                        success: true,
                    },
                    PortResult {
                        destination: "ns1".to_string(),
                        port: "53".to_string(),
                        protocol: Protocol::Tcp,
                        success: false,
                    },
                ],
            }],
            no_applicable_rules: false,
        };

        let mut buf = Vec::new();
        write_csv(&mut buf, &evaluation).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "note,applies_to_all,destination,port,protocol,success\n\
             \"dns, both transports\",true,ns1,53,UDP,true\n\
             \"dns, both transports\",true,ns1,53,TCP,false\n"
        );
    }
}
