//! Check a rule and show how it will be stored
//!
//! Usage: `rule-check [--rsc] [--op] [--xml <id>] <rule...>`
//!
//! Prints the parsed tree as JSON, or the rule element as XML with `--xml`.
//! On a syntax error the failing line is shown with a caret under the
//! problem and the process exits with status 1.

use anyhow::{bail, Context};
use cib_rule::export::{export_rule, rule_to_json};
use cib_rule::{parse_with, RuleParserConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

struct Args {
    config: RuleParserConfig,
    xml_id: Option<String>,
    rule: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut config = RuleParserConfig::default();
    let mut xml_id = None;
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rsc" => config.allow_rsc_expr = true,
            "--op" => config.allow_op_expr = true,
            "--xml" => {
                xml_id = Some(args.next().context("--xml needs an id")?);
            }
            "--" => {
                words.extend(args.by_ref());
            }
            flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
            _ => words.push(arg),
        }
    }

    Ok(Args { config, xml_id, rule: words.join(" ") })
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    tracing::debug!(rule = %args.rule, config = ?args.config, "checking rule");

    let rule = match parse_with(&args.rule, &args.config) {
        Ok(rule) => rule,
        Err(err) => {
            eprintln!("{}", err.render());
            return Ok(ExitCode::FAILURE);
        }
    };

    match args.xml_id {
        Some(id) => print!("{}", export_rule(&rule, &id)?.to_xml()),
        None => println!("{}", rule_to_json(&rule)?),
    }
    Ok(ExitCode::SUCCESS)
}
