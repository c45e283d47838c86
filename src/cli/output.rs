//! Terminal rendering for the siteqa-server subcommands.
//!
//! Everything the CLI prints goes through [`Output`] so `--no-color` is
//! honoured in one place.

use owo_colors::OwoColorize;

/// Width the key column of [`Output::field`] is padded to.
const KEY_WIDTH: usize = 20;

/// Leading status mark of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Note,
    Warn,
    Fail,
    Skip,
}

impl Mark {
    fn plain(self) -> &'static str {
        match self {
            Mark::Ok => "[ok]",
            Mark::Note => "[..]",
            Mark::Warn => "[!!]",
            Mark::Fail => "[xx]",
            Mark::Skip => "[--]",
        }
    }

    fn colored(self) -> String {
        match self {
            Mark::Ok => "✓".green().bold().to_string(),
            Mark::Note => "•".blue().to_string(),
            Mark::Warn => "!".yellow().bold().to_string(),
            Mark::Fail => "✗".red().bold().to_string(),
            Mark::Skip => "○".dimmed().to_string(),
        }
    }
}

pub struct Output {
    colored: bool,
}

impl Output {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// One-line product header.
    pub fn banner(&self) {
        let version = concat!("v", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n  {} {}  {}",
                "site".bright_cyan().bold(),
                "qa".blue().bold(),
                version.dimmed()
            );
        } else {
            println!("\n  siteqa {}", version);
        }
    }

    pub fn section(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  {}\n  {}", title, "-".repeat(title.chars().count()));
        }
    }

    /// A status line. Failures go to stderr.
    pub fn mark(&self, mark: Mark, message: &str) {
        let prefix = if self.colored {
            mark.colored()
        } else {
            mark.plain().to_string()
        };
        let line = format!("  {} {}", prefix, message);
        if mark == Mark::Fail {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    /// An aligned `key  value` row of the config dump.
    pub fn field(&self, key: &str, value: &str) {
        let key = format!("{:<width$}", key, width = KEY_WIDTH);
        if self.colored {
            println!("    {} {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {} {}", key, value);
        }
    }

    pub fn bullet(&self, item: &str) {
        if self.colored {
            println!("    {:<width$} {} {}", "", "-".blue(), item, width = KEY_WIDTH);
        } else {
            println!("    {:<width$} - {}", "", item, width = KEY_WIDTH);
        }
    }

    /// A shell command the user is expected to run next.
    pub fn shell(&self, cmd: &str) {
        if self.colored {
            println!("      {} {}", "$".dimmed(), cmd.bright_cyan());
        } else {
            println!("      $ {}", cmd);
        }
    }

    pub fn tip(&self, text: &str) {
        if self.colored {
            println!("  {}", text.dimmed().italic());
        } else {
            println!("  note: {}", text);
        }
    }
}
