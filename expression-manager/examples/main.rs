use std::fs;
use std::io::{self, BufRead};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, prelude::*};

use expression_manager::rpn_converter::RpnConverter;
use expression_manager::rpn_evaluator::RpnEvaluator;
use expression_manager::{infix_to_postfix, is_balanced, postfix_evaluate, postfix_to_infix, INVALID};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    #[clap(short, long, action, help = "the file to write logs to, by default they go to stderr")]
    log_file: Option<String>,
    #[clap(short, long, action = clap::ArgAction::Count,
           help = "show more in logs, may be provided multiple times")]
    verbose: u8,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[clap(about = "check that the brackets of an expression are balanced")]
    Balanced {
        #[clap(allow_hyphen_values = true, help = "the expression, read from stdin when omitted")]
        expression: Vec<String>,
    },
    #[clap(about = "convert an infix expression to postfix")]
    ToPostfix {
        #[clap(allow_hyphen_values = true, help = "the expression, read from stdin when omitted")]
        expression: Vec<String>,
    },
    #[clap(about = "convert a postfix expression to fully parenthesized infix")]
    ToInfix {
        #[clap(allow_hyphen_values = true, help = "the expression, read from stdin when omitted")]
        expression: Vec<String>,
    },
    #[clap(about = "evaluate a postfix expression")]
    Eval {
        #[clap(allow_hyphen_values = true, help = "the expression, read from stdin when omitted")]
        expression: Vec<String>,
    },
    #[clap(about = r#"convert an infix expression to postfix, back to infix, and evaluate it

Prints the postfix form, the rebuilt infix form and the value on separate lines.
Expressions are read from stdin, one per line, when none is given."#)]
    Check {
        #[clap(allow_hyphen_values = true, help = "the expression, read from stdin when omitted")]
        expression: Vec<String>,
    },
}

impl Commands {
    fn expression(&self) -> &[String] {
        match self {
            Commands::Balanced { expression }
            | Commands::ToPostfix { expression }
            | Commands::ToInfix { expression }
            | Commands::Eval { expression }
            | Commands::Check { expression } => expression,
        }
    }

    fn run(&self, input: &str) -> String {
        match self {
            Commands::Balanced { .. } => is_balanced(input).to_string(),
            Commands::ToPostfix { .. } => infix_to_postfix(input),
            Commands::ToInfix { .. } => postfix_to_infix(input),
            Commands::Eval { .. } => postfix_evaluate(input),
            Commands::Check { .. } => check(input),
        }
    }
}

fn check(input: &str) -> String {
    let rpn = match RpnConverter::convert(input) {
        Ok(rpn) => rpn,
        Err(e) => {
            info!("'{}' is not a valid infix expression: {}", input, e);
            return INVALID.to_string();
        }
    };

    let postfix = rpn.to_string();
    let infix = postfix_to_infix(&postfix);
    let value = match RpnEvaluator::evaluate_expr(&rpn) {
        Ok(value) => value.to_string(),
        Err(_) => INVALID.to_string(),
    };

    format!("{}\n{}\n{}", postfix, infix, value)
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let log_level_filter = match args.verbose {
        0 => tracing_subscriber::filter::LevelFilter::WARN,
        1 => tracing_subscriber::filter::LevelFilter::INFO,
        2 => tracing_subscriber::filter::LevelFilter::DEBUG,
        _ => tracing_subscriber::filter::LevelFilter::TRACE,
    };

    let writer = match &args.log_file {
        Some(lf) => BoxMakeWriter::new(Mutex::new(
            fs::File::create(lf).context("unable to create log file")?,
        )),
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::registry::Registry::default()
        .with(log_level_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer),
        )
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let expression = args.command.expression();
    if !expression.is_empty() {
        let input = expression.join(" ");
        info!("running on '{}'", input);
        println!("{}", args.command.run(&input));
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading expression from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", args.command.run(&line));
    }

    Ok(())
}
