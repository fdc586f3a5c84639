//! `salviz` command-line interface

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use salviz_dashboard::{telemetry, Dashboard, DashboardConfig};
use salviz_flow::{NodeIndex, Rect};
use std::path::PathBuf;

fn input_args() -> [Arg; 2] {
    [
        Arg::new("input")
            .long("input")
            .short('i')
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("CSV file with experience_level, company_size, job_title and salary_in_usd columns"),
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(value_parser!(PathBuf))
            .help("TOML configuration file"),
    ]
}

fn cli() -> Command {
    Command::new("salviz")
        .version(salviz_dashboard::VERSION)
        .about("Salary dashboard data: rollups, chart data and Sankey layout")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs to stderr as JSON"),
        )
        .subcommand(
            Command::new("summary")
                .about("Print bar, pie and flow summaries")
                .args(input_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Write the renderer contract as JSON")
                .args(input_args())
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Indent the JSON output"),
                ),
        )
        .subcommand(
            Command::new("brush")
                .about("List Sankey nodes selected by a brush rectangle")
                .args(input_args())
                .arg(
                    Arg::new("rect")
                        .long("rect")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Brush corners as x0,y0,x1,y1"),
                ),
        )
}

fn parse_rect(text: &str) -> anyhow::Result<Rect> {
    let coords = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid coordinate `{part}`"))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;
    match coords.as_slice() {
        [x0, y0, x1, y1] => Ok(Rect::new(*x0, *y0, *x1, *y1)),
        _ => bail!("expected four comma-separated coordinates, got {}", coords.len()),
    }
}

fn load_dashboard(args: &ArgMatches) -> anyhow::Result<Dashboard> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let input = args
        .get_one::<PathBuf>("input")
        .context("missing --input")?;
    let dashboard = Dashboard::load(input, &config)
        .with_context(|| format!("building dashboard from {}", input.display()))?;
    if !dashboard.rejected().is_empty() {
        tracing::info!("{} input rows were skipped", dashboard.rejected().len());
    }
    Ok(dashboard)
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    telemetry::init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("summary", args)) => {
            let dashboard = load_dashboard(args)?;
            print!("{dashboard}");
        }
        Some(("export", args)) => {
            let dashboard = load_dashboard(args)?;
            println!("{}", dashboard.to_json(args.get_flag("pretty"))?);
        }
        Some(("brush", args)) => {
            let rect_text = args.get_one::<String>("rect").context("missing --rect")?;
            let rect = parse_rect(rect_text)?;
            let dashboard = load_dashboard(args)?;
            let selection = dashboard.brush(Some(rect));
            let graph = dashboard.graph();

            println!("Selected:");
            for index in selection.iter() {
                if let Some(node) = graph.node(*index) {
                    println!("  {} ({})", node.name, node.tier);
                }
            }
            println!("Faded:");
            for (i, node) in graph.nodes().iter().enumerate() {
                if selection.is_faded(&NodeIndex(i)) {
                    println!("  {} ({})", node.name, node.tier);
                }
            }
            let faded_edges = graph
                .edges()
                .iter()
                .filter(|e| selection.is_edge_faded(e))
                .count();
            println!("Faded edges: {} of {}", faded_edges, graph.edge_count());
        }
        _ => bail!("no subcommand given"),
    }
    Ok(())
}
