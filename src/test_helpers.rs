use crate::catalog::{Catalog, Command};
use crate::help::{BotIdentity, FormattingContext};

/// Two small categories: Math (add, sub) and Fun (roll).
pub fn sample_catalog() -> Catalog {
    Catalog::new("")
        .command(Command::new("add").category("Math").short_doc("Adds two numbers."))
        .command(
            Command::new("sub")
                .category("Math")
                .short_doc("Subtracts two numbers."),
        )
        .command(Command::new("roll").category("Fun").short_doc("Rolls a die."))
}

/// `count` commands spread over five categories plus uncategorized ones,
/// each with a summary long enough to need shortening.
pub fn big_catalog(count: usize) -> Catalog {
    let mut catalog = Catalog::new("");
    for i in 0..count {
        let mut command = Command::new(&format!("cmd{i:03}")).short_doc(&format!(
            "Does thing number {i} with a description that keeps going well past the usual width"
        ));
        if i % 7 != 0 {
            command = command.category(&format!("Category {}", i % 5));
        }
        catalog = catalog.command(command);
    }
    catalog
}

/// Context with prefix `!` and a check that allows everything.
pub fn context() -> FormattingContext {
    FormattingContext::new("!", BotIdentity::new("1", "helpbot"))
}

/// Lines of all pages with the fence lines removed.
pub fn content_lines(pages: &[String]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| {
            let lines: Vec<&str> = page.lines().collect();
            let inner = &lines[1..lines.len() - 1];
            inner.iter().map(|line| line.to_string()).collect::<Vec<_>>()
        })
        .collect()
}
