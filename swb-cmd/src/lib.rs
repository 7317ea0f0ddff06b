//! Command implementations for the SWB CLI.
//!
//! Provides subcommands for preprocessing climate-scenario summary tables
//! and for inspecting and pivoting the augmented results.

use clap::Subcommand;

pub mod info;
pub mod pivot;
pub mod preprocess;

#[derive(Subcommand)]
pub enum Command {
    /// Compute scenario-vs-historical diffs and write an augmented table
    Preprocess {
        /// Path to the summary table CSV
        table_csv: String,

        /// Output path (defaults to <stem>_w_diff.csv beside the input)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Pivot an augmented table into a weather-source x scenario matrix
    Pivot {
        /// Path to the augmented summary table CSV
        table_csv: String,

        /// Summary basetype to select
        #[arg(short = 'b', long, default_value = "mean_annual")]
        basetype: String,

        /// Future time period to compare against the baseline
        #[arg(short = 'p', long, default_value = "2040-2059")]
        period: String,

        /// Region to select (raw zone code, padded HUC10, or statewide label)
        #[arg(long)]
        huc10: Option<String>,

        /// SWB variable to select
        #[arg(long)]
        variable: Option<String>,

        /// Season to select (mean_seasonal only)
        #[arg(long)]
        season: Option<String>,

        /// Month 1-12 to select (mean_monthly only)
        #[arg(long)]
        month: Option<u32>,

        /// Pivot the diff column instead of the mean column
        #[arg(long)]
        diff: bool,

        /// Write the pivot as CSV to the derived download filename
        #[arg(long)]
        save: bool,

        /// Write the pivot as CSV to this path instead
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<String>,
    },

    /// Print the distinct values and row counts of a summary table
    Info {
        /// Path to the summary table CSV
        table_csv: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Preprocess { table_csv, output } => {
            preprocess::run_preprocess(&table_csv, output.as_deref())
        }
        Command::Pivot {
            table_csv,
            basetype,
            period,
            huc10,
            variable,
            season,
            month,
            diff,
            save,
            output,
        } => pivot::run_pivot(pivot::PivotRequest {
            table_csv,
            basetype,
            period,
            huc10,
            variable,
            season,
            month,
            diff,
            save,
            output,
        }),
        Command::Info { table_csv } => info::run_info(&table_csv),
    }
}
