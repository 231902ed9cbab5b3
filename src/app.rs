use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::data::loader::LoadOptions;
use crate::data::model::coerce;
use crate::engine::TableEngine;
use crate::ui::menu::{self, MenuChoice};
use crate::ui::prompt::{InputClosed, Prompter};

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// Menu loop driving a [`TableEngine`] from line input.
pub struct ExplorerApp<R, W> {
    pub engine: TableEngine,
    prompter: Prompter<R, W>,
    /// Rows shown after sort and reset.
    preview_rows: usize,
}

impl<R: BufRead, W: Write> ExplorerApp<R, W> {
    pub fn new(engine: TableEngine, prompter: Prompter<R, W>, preview_rows: usize) -> Self {
        ExplorerApp {
            engine,
            prompter,
            preview_rows,
        }
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.menu_loop() {
            Err(e) if e.is::<InputClosed>() => Ok(()),
            other => other,
        }
    }

    fn menu_loop(&mut self) -> Result<()> {
        loop {
            self.prompter.say(menu::MAIN_MENU)?;
            let key = self.prompter.ask("\nEnter your choice (1-9): ")?;

            let Some(choice) = MenuChoice::from_key(&key) else {
                self.prompter.say("Invalid choice! Please try again.")?;
                self.pause()?;
                continue;
            };
            log::debug!("Menu choice {choice:?}");

            if choice == MenuChoice::Exit {
                self.prompter.say("\nThank you for using Tabular Explorer!")?;
                return Ok(());
            }

            if let Err(e) = self.handle(choice) {
                if e.is::<InputClosed>() {
                    return Err(e);
                }
                log::error!("{choice:?} failed: {e:#}");
                self.prompter.say(format_args!("\nError: {e:#}"))?;
            }
            self.pause()?;
        }
    }

    fn pause(&mut self) -> Result<()> {
        self.prompter.ask("\nPress Enter to continue...")?;
        Ok(())
    }

    fn handle(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Display => {
                let n = self.prompter.ask_positive("Enter number of rows to display: ")?;
                self.show(n)
            }
            MenuChoice::Filter => self.filter(),
            MenuChoice::Sort => self.sort(),
            MenuChoice::Aggregate => self.aggregate(),
            MenuChoice::Palindromes => self.palindromes(),
            MenuChoice::Save => self.save(),
            MenuChoice::Columns => self.prompter.list_columns(self.engine.headers()),
            MenuChoice::Reset => {
                self.engine.reset();
                self.prompter.say(format_args!(
                    "\nData reset to original state ({} rows).",
                    self.engine.original_row_count()
                ))?;
                self.show(self.preview_rows)
            }
            MenuChoice::Exit => Ok(()),
        }
    }

    fn show(&mut self, n: usize) -> Result<()> {
        let preview = self.engine.display(n);
        self.prompter.say(format_args!("\n{preview}"))
    }

    fn filter(&mut self) -> Result<()> {
        self.prompter.say(menu::FILTER_MENU)?;
        let key = self.prompter.ask("Enter filter option (1-4): ")?;
        let Some(condition) = menu::filter_condition(&key) else {
            return self.prompter.say("Invalid filter option!");
        };

        let column = self.prompter.choose_column(self.engine.headers())?;
        let value = self.prompter.ask("Enter value to compare: ")?;
        if condition.is_numeric() && coerce(&value).is_none() {
            return self.prompter.say("Error: Please enter a numeric value");
        }

        log::debug!("Filtering '{column}' {condition} '{value}'");
        self.engine.filter(&column, condition, &value)?;
        let count = self.engine.rows().len();
        self.prompter.say(format_args!("\nFiltered results ({count} rows):"))?;
        self.show(count)
    }

    fn sort(&mut self) -> Result<()> {
        let column = self.prompter.choose_column(self.engine.headers())?;
        let ascending = self.prompter.ask_yes_no("Sort ascending? (y/n): ")?;

        self.engine.sort(&column, ascending)?;
        let count = self.engine.rows().len();
        self.prompter.say(format_args!("\nSorted results ({count} rows):"))?;
        self.show(self.preview_rows.min(count))?;
        if count > self.preview_rows {
            self.prompter.say(format_args!(
                "... (showing first {} rows)",
                self.preview_rows
            ))?;
        }
        Ok(())
    }

    fn aggregate(&mut self) -> Result<()> {
        self.prompter.say(menu::AGGREGATE_MENU)?;
        let key = self.prompter.ask("Enter aggregation option (1-4): ")?;
        let Some(op) = menu::aggregate_op(&key) else {
            return self.prompter.say("Invalid aggregation option!");
        };

        let column = self.prompter.choose_column(self.engine.headers())?;
        match self.engine.aggregate(&column, op) {
            Ok(result) => {
                let used = self.engine.numeric_count(&column)?;
                self.prompter.say(format_args!(
                    "\nResult for {op} of '{column}': {result:.2} ({used} numeric values)"
                ))
            }
            Err(e) => {
                self.prompter.say(format_args!("\nError: {e}"))?;
                self.prompter.say(
                    "\nNote: Aggregation operations can only be performed on numeric columns.",
                )
            }
        }
    }

    fn palindromes(&mut self) -> Result<()> {
        let count = self.engine.count_palindromes();
        if count > 0 {
            self.prompter.say("\nPalindromes found:")?;
            for value in self.engine.palindromes() {
                self.prompter.say(format_args!("- {value}"))?;
            }
        } else {
            self.prompter.say("\nNo palindromes found matching the criteria")?;
        }
        self.prompter.say(format_args!("\nTotal palindromes found: {count}"))
    }

    fn save(&mut self) -> Result<()> {
        let name = self.prompter.ask("Enter name for the output file: ")?;
        let path = output_path(&name);

        if path.exists() {
            let question = format!(
                "File '{}' already exists. Overwrite? (y/n): ",
                path.display()
            );
            if !self.prompter.ask_yes_no(&question)? {
                return Ok(());
            }
        }

        self.engine.write_to(&path)?;
        self.prompter.say(format_args!(
            "\nSuccessfully wrote {} rows to {}",
            self.engine.row_count(),
            path.display()
        ))
    }

    /// Hand back the prompter (and with it the output sink).
    #[cfg(test)]
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }
}

/// Names without an extension are saved as `.csv`.
fn output_path(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("csv")
    }
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Open `initial` if given, otherwise (or after a failure) ask for a path
/// until one loads or the user gives up. `None` means the user gave up.
pub fn open_interactively<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    initial: Option<&Path>,
    options: &LoadOptions,
) -> Result<Option<TableEngine>> {
    let mut candidate = initial.map(Path::to_path_buf);

    loop {
        let path = match candidate.take() {
            Some(path) => path,
            None => PathBuf::from(prompter.ask("Enter the file name (or path): ")?),
        };

        match TableEngine::open_with(&path, options) {
            Ok(engine) => {
                prompter.say(format_args!(
                    "\nSuccessfully loaded file with {} rows",
                    engine.row_count()
                ))?;
                return Ok(Some(engine));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                prompter.say(format_args!("\nError: {e}"))?;
                if !prompter.ask_yes_no("Would you like to try again? (y/n): ")? {
                    return Ok(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;

    const SALES: &str = "\
Date,Product,Quantity,Price
2025-01-01,Apple,10,1.2
2025-01-02,Banana,5,0.8
2025-01-03,ADA,15,1.3
2025-01-04,Orange,8,1.5
2025-01-05,ANNA,12,0.7
";

    type TestApp = ExplorerApp<Cursor<Vec<u8>>, Vec<u8>>;

    fn sales_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SALES).unwrap();
        path
    }

    fn app(dir: &TempDir, script: &str) -> TestApp {
        let engine = TableEngine::open_with(&sales_file(dir), &LoadOptions::default()).unwrap();
        let prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        ExplorerApp::new(engine, prompter, 5)
    }

    fn run(mut app: TestApp) -> (TableEngine, String) {
        app.run().unwrap();
        let engine = app.engine.clone();
        let out = String::from_utf8(app.into_prompter().into_output()).unwrap();
        (engine, out)
    }

    #[test]
    fn filter_then_aggregate_session() {
        let dir = TempDir::new().unwrap();
        // filter Quantity > 7, then sum Quantity, then exit
        let script = "2\n1\n3\n7\n\n4\n1\n3\n\n9\n";

        let (engine, out) = run(app(&dir, script));
        assert_eq!(engine.row_count(), 4);
        assert!(out.contains("Filtered results (4 rows):"));
        assert!(out.contains("Result for sum of 'Quantity': 45.00"));
        assert!(out.contains("Thank you for using Tabular Explorer!"));
    }

    #[test]
    fn non_numeric_threshold_is_refused_before_filtering() {
        let dir = TempDir::new().unwrap();
        let script = "2\n1\n3\nmany\n\n9\n";

        let (engine, out) = run(app(&dir, script));
        assert_eq!(engine.row_count(), 5);
        assert!(out.contains("Error: Please enter a numeric value"));
    }

    #[test]
    fn sort_descending_and_reset() {
        let dir = TempDir::new().unwrap();
        let script = "3\n3\nn\n\n8\n\n9\n";

        let mut app = app(&dir, script);
        app.run().unwrap();
        assert_eq!(app.engine.rows()[0][1], "Apple");
        let out = String::from_utf8(app.into_prompter().into_output()).unwrap();
        assert!(out.contains("Sorted results (5 rows):"));
        assert!(out.contains("Data reset to original state (5 rows)."));
    }

    #[test]
    fn palindromes_and_bad_aggregate_are_reported() {
        let dir = TempDir::new().unwrap();
        let script = "5\n\n4\n1\n2\n\n9\n";

        let (_, out) = run(app(&dir, script));
        assert!(out.contains("- ADA\n- ANNA\n"));
        assert!(out.contains("Total palindromes found: 2"));
        assert!(out.contains("Error: no valid numeric values found in column 'Product'"));
    }

    #[test]
    fn save_appends_csv_and_respects_overwrite_answer() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("report");
        let existing = dir.path().join("report.csv");
        std::fs::write(&existing, "keep me").unwrap();

        let script = format!("6\n{}\nn\n\n9\n", target.display());
        run(app(&dir, &script));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");

        let script = format!("2\n4\n2\nan\n\n6\n{}\ny\n\n9\n", target.display());
        let (_, out) = run(app(&dir, &script));
        assert!(out.contains("Successfully wrote 3 rows"));
        let reloaded = TableEngine::open_with(&existing, &LoadOptions::default()).unwrap();
        assert_eq!(reloaded.row_count(), 3);
    }

    #[test]
    fn invalid_menu_key_and_closed_input_end_quietly() {
        let dir = TempDir::new().unwrap();
        let (_, out) = run(app(&dir, "42\n\n"));
        assert!(out.contains("Invalid choice! Please try again."));
    }

    #[test]
    fn startup_retries_until_a_file_loads() {
        let dir = TempDir::new().unwrap();
        let good = sales_file(&dir);
        let script = format!("y\n{}\n", good.display());
        let mut prompter = Prompter::new(Cursor::new(script.into_bytes()), Vec::new());

        let missing = dir.path().join("missing.csv");
        let engine = open_interactively(&mut prompter, Some(&missing), &LoadOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(engine.row_count(), 5);

        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("Error: failed to load"));
        assert!(out.contains("Successfully loaded file with 5 rows"));
    }

    #[test]
    fn startup_gives_up_on_no() {
        let dir = TempDir::new().unwrap();
        let mut prompter = Prompter::new(Cursor::new(b"n\n".to_vec()), Vec::new());

        let missing = dir.path().join("missing.csv");
        let engine =
            open_interactively(&mut prompter, Some(&missing), &LoadOptions::default()).unwrap();
        assert!(engine.is_none());
    }

    #[test]
    fn output_path_defaults_to_csv() {
        assert_eq!(output_path("out"), PathBuf::from("out.csv"));
        assert_eq!(output_path("out.json"), PathBuf::from("out.json"));
    }
}
