//! Terminal driver for the site logic.
//!
//! Examples:
//!   vitrine-cli validate '{"name":"Jo","email":"a@b.com","topic":"x","message":"Hello there!"}'
//!   vitrine-cli submit @form.json
//!   vitrine-cli nav /contacto-data.html ./ contacto-data.html index.html
//!   vitrine-cli matrix 280 140 5 42
//!
//! `--config FILE` loads a JSON `SiteConfig`; `--locale es|en` overrides its
//! message language. Set `RUST_LOG=debug` to trace
//! state transitions.

use std::process;
use std::time::Duration;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use vitrine::error::Result;
use vitrine::prelude::*;

const EXIT_INVALID: i32 = 2;

fn usage() -> ! {
    eprintln!("vitrine-cli (contact form, nav and backdrop logic)");
    eprintln!("Usage: vitrine-cli [--config FILE] [--locale es|en] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  validate <json|@file>              Validate a field set; exit 2 when invalid");
    eprintln!("  submit <json|@file>                Run the submit flow on a manual clock");
    eprintln!("  nav <path> <href>...               Show which links are active on a page");
    eprintln!("  matrix <width> <height> <frames> [seed]  Print backdrop frames as text");
    process::exit(1);
}

struct Options {
    config: Option<String>,
    locale: Option<String>,
}

fn parse_args() -> (Options, Vec<String>) {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut opts = Options {
        config: None,
        locale: None,
    };
    while args.len() >= 2 {
        match args[0].as_str() {
            "--config" => opts.config = Some(args[1].clone()),
            "--locale" => opts.locale = Some(args[1].clone()),
            _ => break,
        }
        args.drain(0..2);
    }

    if args.is_empty() || args[0].starts_with("--") {
        usage();
    }

    (opts, args)
}

fn load_config(opts: &Options) -> Result<SiteConfig> {
    let mut cfg = match &opts.config {
        Some(p) => {
            let raw = std::fs::read_to_string(p)?;
            SiteConfig::from_json_str(&raw)?
        }
        None => SiteConfig::default(),
    };
    if let Some(l) = &opts.locale {
        cfg.locale = Locale::parse(l)?;
    }
    Ok(cfg)
}

/// `@path` reads the JSON from a file; anything else is the JSON itself.
fn read_input(arg: &str) -> Result<FormInput> {
    let raw = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => arg.to_string(),
    };
    FormInput::from_json_str(&raw)
}

fn to_json<T: serde::Serialize>(v: &T) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|e| format!("<unprintable: {e}>"))
}

fn cmd_validate(cfg: &SiteConfig, args: &[String]) -> Result<i32> {
    let Some(arg) = args.first() else { usage() };
    let input = read_input(arg)?;
    let result = validate_with(&input, cfg.locale.messages());
    println!("{}", to_json(&result));
    Ok(if result.valid { 0 } else { EXIT_INVALID })
}

fn cmd_submit(cfg: &SiteConfig, args: &[String]) -> Result<i32> {
    let Some(arg) = args.first() else { usage() };
    let input = read_input(arg)?;

    // The page carries exactly the fields named in the input; values are
    // then typed in as edits, like a visitor would.
    let fields: Vec<Field> = input.present_fields().collect();
    let mut page = Page::new(cfg.clone()).with_form(FormInput::with_fields(&fields));
    let mut clock = ManualScheduler::new();

    for field in &fields {
        let value = input.raw(*field).unwrap_or_default().to_string();
        page.dispatch(Event::Edit { field: *field, value }, &mut clock);
    }

    let effects = page.dispatch(Event::Submit, &mut clock);
    println!("t=0ms submit");
    for e in &effects {
        println!("  {}", to_json(e));
    }

    let delay = Duration::from_millis(cfg.submit_delay_ms as u64);
    for task in clock.advance(delay) {
        debug!(?task, "timer fired");
        println!("t={}ms {:?}", clock.now().as_millis(), task);
        for e in page.dispatch(Event::TimerFired(task), &mut clock) {
            println!("  {}", to_json(&e));
        }
    }

    let accepted = effects.contains(&Effect::SetSubmitDisabled(true));
    Ok(if accepted { 0 } else { EXIT_INVALID })
}

fn cmd_nav(args: &[String]) -> Result<i32> {
    let Some(path) = args.first() else { usage() };
    let page = CurrentPage::from_path(path);
    let hrefs: Vec<&str> = args[1..].iter().map(String::as_str).collect();
    println!("page: {} (home: {})", page.name(), page.home());
    for (href, view) in hrefs.iter().zip(highlight(&page, hrefs.iter().copied())) {
        let mark = if view.active { "*" } else { " " };
        println!("{mark} {href}");
    }
    Ok(0)
}

fn cmd_matrix(cfg: &SiteConfig, args: &[String]) -> Result<i32> {
    if args.len() < 3 {
        usage();
    }
    let parse = |s: &str, what: &str| -> u32 {
        s.parse().unwrap_or_else(|_| {
            eprintln!("{what} must be a non-negative integer");
            process::exit(1);
        })
    };
    let width = parse(&args[0], "width");
    let height = parse(&args[1], "height");
    let frames = parse(&args[2], "frames");
    let seed: u64 = match args.get(3) {
        Some(s) => s.parse().unwrap_or_else(|_| {
            eprintln!("seed must be a u64");
            process::exit(1);
        }),
        None => 1,
    };

    let font = cfg.matrix.font_size.max(1);
    let mut rain = MatrixRain::new(cfg.matrix.clone(), width, height, seed);
    let rows = (height / font).max(1) as usize;

    for n in 0..frames {
        let frame = rain.step();
        let mut grid = vec![vec![' '; rain.columns()]; rows];
        for g in &frame.glyphs {
            let row = g.row as usize;
            if row >= 1 && row <= rows {
                grid[row - 1][g.column] = g.ch;
            }
        }
        println!("-- frame {n}");
        for line in grid {
            println!("{}", line.into_iter().collect::<String>());
        }
    }
    Ok(0)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (opts, args) = parse_args();
    let cmd = args[0].as_str();
    let rest = &args[1..];

    let cfg = match load_config(&opts) {
        Ok(c) => c,
        Err(e) => {
            error!("config: {e}");
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    let res = match cmd {
        "validate" => cmd_validate(&cfg, rest),
        "submit" => cmd_submit(&cfg, rest),
        "nav" => cmd_nav(rest),
        "matrix" => cmd_matrix(&cfg, rest),
        _ => usage(),
    };

    match res {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Failed: {e}");
            process::exit(1);
        }
    }
}
