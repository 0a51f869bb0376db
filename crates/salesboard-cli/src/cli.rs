use clap::{Parser, Subcommand};
use salesboard_client::sales::{Category, SaleDate, TimeRange};

pub fn parse_time_range(value: &str) -> Result<TimeRange, String> {
    value.parse::<TimeRange>()
}

pub fn parse_category(value: &str) -> Result<Category, String> {
    value.parse::<Category>()
}

pub fn parse_sale_date(value: &str) -> Result<SaleDate, String> {
    SaleDate::parse(value).ok_or_else(|| {
        "date must use YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS], or an RFC 3339 timestamp with valid calendar values"
            .to_string()
    })
}

/// Extended help shown after `salesboard sale add --help`.
pub const SALE_ADD_AFTER_HELP: &str = "\
How recording works:
  A sale is recorded only when it has a customer name and an amount.
  Anything else is skipped without changing your stored sales.

Field rules:
  --customer (required):
    Customer name, stored exactly as typed and matched exactly when
    counting unique customers.
    `Jane Smith` and `jane smith` count as two customers.

  --amount (required):
    Sale total as a non-negative number, e.g. `1200` or `19.99`.

  --category (optional, default Electronics):
    One of: Electronics, Clothing, Food, Books, Other.

  --quantity (optional, default 1):
    Whole number of items, at least 1.

  --date (optional, default today):
    `YYYY-MM-DD`, or `YYYY-MM-DDTHH:MM[:SS]` to place the sale in an hour.
    Day-only dates count toward hour 0 in the hourly distribution.
    RFC 3339 timestamps such as `2026-01-15T13:30:00Z` are converted to local time.

Example:
  salesboard sale add --customer \"Jane Smith\" --amount 850 --category Clothing --quantity 3
";

#[derive(Debug, Parser)]
#[command(
    name = "salesboard",
    version,
    about = "local sales analytics dashboard",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record, list, and delete sales
    #[command(arg_required_else_help = true)]
    Sale {
        #[command(subcommand)]
        command: SaleCommand,
    },
    /// Show revenue, order, category, and hourly metrics for your sales
    Dashboard {
        /// Rolling window: week (7 days), month (30 days), or quarter (90 days)
        #[arg(long, default_value = "week", value_parser = parse_time_range)]
        range: TimeRange,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Preview the dashboard using bundled sample sales
    Demo {
        /// Rolling window: week (7 days), month (30 days), or quarter (90 days)
        #[arg(long, default_value = "week", value_parser = parse_time_range)]
        range: TimeRange,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SaleCommand {
    /// Record a new sale in your local store
    #[command(after_long_help = SALE_ADD_AFTER_HELP)]
    Add {
        /// Customer name
        #[arg(long, default_value = "")]
        customer: String,
        /// Sale amount (non-negative)
        #[arg(long)]
        amount: Option<f64>,
        /// Electronics, Clothing, Food, Books, or Other
        #[arg(long, default_value = "Electronics", value_parser = parse_category)]
        category: Category,
        /// Number of items sold
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Sale date (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]); defaults to today
        #[arg(long, value_parser = parse_sale_date)]
        date: Option<SaleDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List recorded sales, newest first
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Delete a recorded sale by id
    Delete {
        /// The sale id shown by `salesboard sale list`
        id: i64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use salesboard_client::sales::{Category, TimeRange};

    use super::{Commands, SaleCommand, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 11] = [
            vec!["salesboard", "sale", "add", "--customer", "Ada", "--amount", "12.5"],
            vec![
                "salesboard",
                "sale",
                "add",
                "--customer",
                "Ada",
                "--amount",
                "12.5",
                "--category",
                "books",
                "--quantity",
                "3",
                "--date",
                "2026-01-15T13:30",
                "--json",
            ],
            vec!["salesboard", "sale", "add"],
            vec!["salesboard", "sale", "list"],
            vec!["salesboard", "sale", "list", "--json"],
            vec!["salesboard", "sale", "delete", "1767225600000"],
            vec!["salesboard", "sale", "delete", "7", "--json"],
            vec!["salesboard", "dashboard"],
            vec!["salesboard", "dashboard", "--range", "quarter", "--json"],
            vec!["salesboard", "demo"],
            vec!["salesboard", "demo", "--range", "Month"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn dashboard_range_defaults_to_week() {
        let parsed = parse_from(["salesboard", "dashboard"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Dashboard {
                    range: TimeRange::Week,
                    json: false
                }
            ));
        }
    }

    #[test]
    fn sale_add_applies_field_defaults() {
        let parsed = parse_from(["salesboard", "sale", "add", "--amount", "5"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            match cli.command {
                Commands::Sale {
                    command:
                        SaleCommand::Add {
                            customer,
                            amount,
                            category,
                            quantity,
                            date,
                            json,
                        },
                } => {
                    assert_eq!(customer, "");
                    assert_eq!(amount, Some(5.0));
                    assert_eq!(category, Category::Electronics);
                    assert_eq!(quantity, 1);
                    assert!(date.is_none());
                    assert!(!json);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases: [Vec<&str>; 4] = [
            vec!["salesboard", "dashboard", "--range", "year"],
            vec!["salesboard", "sale", "add", "--category", "Garden"],
            vec!["salesboard", "sale", "add", "--date", "2026-02-30"],
            vec!["salesboard", "sale", "delete", "abc"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_err(), "unexpectedly parsed: {case:?}");
            if let Err(error) = parsed {
                assert_eq!(error.kind(), ErrorKind::ValueValidation);
            }
        }
    }

    #[test]
    fn help_subcommand_is_not_available() {
        let parsed = parse_from(["salesboard", "help"]);
        assert!(parsed.is_err());
    }
}
