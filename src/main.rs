
use stride::eval;

use clap::Parser;

use std::process::ExitCode;

/// Running-pace arithmetic over the relation distance × pace = time.
///
/// Combine two of the three quantities with `*` or `/` and the third
/// is inferred: `10km*4m30s`, `45m/10km`, `45m/4m30s`.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
  /// The expression to evaluate, e.g. "10km*4m30s".
  expression: String,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match eval::evaluate(&cli.expression) {
    Ok(workout) => {
      println!("{workout}");
      ExitCode::SUCCESS
    }
    Err(err) => {
      println!("{err}");
      ExitCode::FAILURE
    }
  }
}
