use colored::*;
use netdiag_common::models::ping::PingResult;
use netdiag_common::options::PingOptions;
use netdiag_core::Diagnostics;

use crate::commands::print_json;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

pub async fn ping(diag: &Diagnostics, host: &str, options: PingOptions, json: bool) -> anyhow::Result<()> {
    let result = diag.ping(host, &options).await;
    if json {
        return print_json(&result);
    }

    print::header(&format!("ping {}", result.host));
    print_replies(&result);
    if let Some(error) = &result.error {
        print::failure(error);
    }
    print::as_tree_one_level(summary(&result));
    Ok(())
}

fn print_replies(result: &PingResult) {
    for (seq, rtt) in result.times.iter().enumerate() {
        print::print_status(format!(
            "reply {} from {}: {}",
            seq + 1,
            result.host.color(colors::IPV4_ADDR),
            format::ms(*rtt)
        ));
    }
}

fn summary(result: &PingResult) -> Vec<Detail> {
    let alive = if result.alive {
        "yes".color(colors::OPEN).bold()
    } else {
        "no".color(colors::CLOSED).bold()
    };
    vec![
        format::detail("Alive", alive),
        format::detail("Loss", format::loss(result.packet_loss)),
        format::detail("Min", format::optional_ms(result.min)),
        format::detail("Avg", format::optional_ms(result.avg)),
        format::detail("Max", format::optional_ms(result.max)),
    ]
}
