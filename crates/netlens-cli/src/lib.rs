use clap::ValueEnum;

pub mod commands;

/// How a command prints its result: styled terminal text, JSON or CSV
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}
