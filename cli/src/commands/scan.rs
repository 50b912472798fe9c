use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, bail};
use colored::*;
use indicatif::ProgressStyle;
use netdiag_common::models::scan::PortStatus;
use netdiag_common::options::ScanOptions;
use netdiag_core::Diagnostics;
use netdiag_core::scanner::ProgressCallback;
use netdiag_core::scanner::services::COMMON_PORTS;
use tracing::{Instrument, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::commands::print_json;
use crate::terminal::{colors, format, print};

pub async fn scan(
    diag: &Diagnostics,
    host: &str,
    ports: Option<&str>,
    options: ScanOptions,
    json: bool,
) -> anyhow::Result<()> {
    let ports = match ports {
        Some(spec) => parse_port_spec(spec)?,
        None => COMMON_PORTS.iter().map(|&p| i64::from(p)).collect(),
    };

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&ProgressStyle::with_template(
        "{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} ports",
    )?);
    span.pb_set_length(ports.len() as u64);
    let progress: ProgressCallback = {
        let span = span.clone();
        Arc::new(move |done: usize, _total: usize| span.pb_set_position(done as u64))
    };

    let started = Instant::now();
    let result = diag
        .port_scan_with_progress(host, &ports, &options, Some(progress))
        .instrument(span)
        .await;

    if json {
        return print_json(&result);
    }

    print::header(&format!("ports on {}", result.host));
    if let Some(error) = &result.error {
        print::failure(error);
        return Ok(());
    }

    let mut open: Vec<_> = result.open_ports().collect();
    open.sort_by_key(|state| state.port);
    if open.is_empty() {
        print::nothing_found("open ports");
    }
    for state in &open {
        print::print(&format!(
            " {:>5}/tcp  {}  {:<12} {}",
            state.port.to_string().color(colors::ACCENT),
            format::port_status(state.state),
            state.service.as_deref().unwrap_or("unknown"),
            format::optional_ms(state.response_time)
        ));
    }

    let count = |status: PortStatus| result.ports.iter().filter(|p| p.state == status).count();
    print::fat_separator();
    print::centerln(&format!(
        "{} open, {} closed, {} filtered in {:.2}s",
        count(PortStatus::Open).to_string().green().bold(),
        count(PortStatus::Closed),
        count(PortStatus::Filtered),
        started.elapsed().as_secs_f64()
    ));
    Ok(())
}

/// Parses `22,80,8000-8100` into a flat port list. Range bounds are
/// inclusive and may be given in either order.
pub fn parse_port_spec(spec: &str) -> anyhow::Result<Vec<i64>> {
    let mut ports = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: i64 = start
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid range start in '{part}'"))?;
                let end: i64 = end
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid range end in '{part}'"))?;
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                if high - low >= 65_535 {
                    bail!("range '{part}' is wider than the port space");
                }
                ports.extend(low..=high);
            }
            None => ports.push(
                part.parse()
                    .with_context(|| format!("invalid port '{part}'"))?,
            ),
        }
    }
    if ports.is_empty() {
        bail!("no ports in '{spec}'");
    }
    Ok(ports)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
