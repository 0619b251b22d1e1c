//! `issuelog` (ilog) - categorized changelog generator.
//!
//! Lists tracker issues mentioned in commit messages between two refs,
//! grouped by label into named report sections.

use issuelog::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
