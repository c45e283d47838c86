//! `siteqa-server init`: write a starter `siteqa.toml` and `.env.example`.

use super::output::{Mark, Output};
use std::fs;
use std::io;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "siteqa.toml";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

/// Flags of the init subcommand.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub dir: PathBuf,
    pub force: bool,
    pub host: String,
    pub port: u16,
}

#[derive(Debug)]
pub enum InitOutcome {
    /// Files written, in order.
    Written(Vec<PathBuf>),
    /// `siteqa.toml` exists and `--force` was not given.
    AlreadyInitialized(PathBuf),
    Failed(io::Error),
}

/// A file produced by init.
struct Scaffold {
    name: &'static str,
    contents: String,
}

fn scaffolds(opts: &InitOptions) -> [Scaffold; 2] {
    [
        Scaffold {
            name: CONFIG_FILE,
            contents: config_template(&opts.host, opts.port),
        },
        Scaffold {
            name: ENV_EXAMPLE_FILE,
            contents: ENV_TEMPLATE.to_string(),
        },
    ]
}

pub fn run(opts: &InitOptions, out: &Output) -> InitOutcome {
    out.banner();

    let config_path = opts.dir.join(CONFIG_FILE);
    if config_path.exists() && !opts.force {
        out.mark(
            Mark::Warn,
            &format!("{} already exists (use --force to overwrite)", config_path.display()),
        );
        return InitOutcome::AlreadyInitialized(config_path);
    }

    out.section(&format!("Writing to {}", opts.dir.display()));
    match write_scaffolds(opts, out) {
        Ok(written) => {
            print_next_steps(opts, out);
            InitOutcome::Written(written)
        }
        Err(e) => {
            out.mark(Mark::Fail, &e.to_string());
            InitOutcome::Failed(e)
        }
    }
}

fn write_scaffolds(opts: &InitOptions, out: &Output) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(&opts.dir)?;

    let mut written = Vec::new();
    for scaffold in scaffolds(opts) {
        let path = opts.dir.join(scaffold.name);
        if path.exists() && !opts.force {
            out.mark(Mark::Skip, &format!("{} (kept existing file)", scaffold.name));
            continue;
        }
        fs::write(&path, scaffold.contents)?;
        out.mark(Mark::Ok, scaffold.name);
        written.push(path);
    }
    Ok(written)
}

fn print_next_steps(opts: &InitOptions, out: &Output) {
    out.section("Next");
    out.shell(&format!("cp {} .env   # then set OPENAI_API_KEY", ENV_EXAMPLE_FILE));
    out.shell("siteqa-server config --validate");
    out.shell("siteqa-server");
    out.tip(&format!(
        "POST http://{}:{}/scrape_and_upsert, then /ask_question with the returned ids",
        opts.host, opts.port
    ));
}

fn config_template(host: &str, port: u16) -> String {
    format!(
        r#"# SiteQA configuration. Every key is optional; values shown are defaults.

[server]
host = "{host}"
port = {port}
log_level = "info"     # RUST_LOG wins when set
log_format = "pretty"  # or "json"

[openai]
api_key_env = "OPENAI_API_KEY"
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini"
assistant_name = "Question-Answer Assistant"
vector_store_name = "Scraped Content"
poll_interval_ms = 500
request_timeout_secs = 120

[scrape]
separator = "\n\n---\n\n"
include_images = false
# selector = "main"

# Applied in order; "." also matches newlines.
# Declaring any rule replaces the built-in pair below.
[[scrape.cleanup]]
name = "newsletter-footer"
pattern = '##  Subscribe to our emails.*?\* Opens in a new window\.'

[[scrape.cleanup]]
name = "storefront-cart-banner"
pattern = 'Skip to content.*?View cart Check out  Continue shopping'
"#
    )
}

const ENV_TEMPLATE: &str = "\
# Copy to .env. Loaded before siteqa.toml is resolved.
OPENAI_API_KEY=sk-...
# RUST_LOG=info,siteqa=debug
";
