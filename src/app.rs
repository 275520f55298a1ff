use std::io::Write;

use clap::{error::ErrorKind, Parser};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::loader::{LoaderOptions, RosterLoader, RosterSource, DEFAULT_SOURCE_URL};
use crate::output::{self, status, Frame, OutputFormat};
use crate::session::{Command, Screen, Session};
use crate::view::RenderPlan;

const BANNER: &str = r#"
                     _            _                         _
  _ __ ___  ___ | |_ ___ _ __| |__   ___   __ _ _ __ __| |
 | '__/ _ \/ __|| __/ _ \ '__| '_ \ / _ \ / _` | '__/ _` |
 | | | (_) \__ \| ||  __/ |  | |_) | (_) | (_| | | | (_| |
 |_|  \___/|___/ \__\___|_|  |_.__/ \___/ \__,_|_|  \__,_|
"#;

fn print_banner(no_color: bool) {
    let tagline = format!("       v{} - community roster board\n", env!("CARGO_PKG_VERSION"));
    if status::stdout_reserved() {
        eprint!("{}", BANNER);
        eprintln!("{tagline}");
    } else {
        if no_color {
            print!("{}", BANNER);
        } else {
            let _ = write!(&mut rainbowcoat::stdout(), "{}", BANNER);
        }
        println!("{tagline}");
    }
}

const INTERACTIVE_HELP: &str =
    "commands: [enter] open members, n next, p prev, /text search, / clear, r reload, b back, q quit";

#[derive(Clone, Debug)]
struct RunConfig {
    source: RosterSource,
    start: Screen,
    timeout: u64,
    proxy: Option<String>,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    interactive: bool,
    search: Option<String>,
    page: usize,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    // a CLI source of either kind replaces both config sources
    let source = if let Some(url) = args.source {
        RosterSource::Url(url.trim().to_string())
    } else if let Some(path) = args.file {
        RosterSource::File(config::expand_tilde_string(path.trim()))
    } else if let Some(path) = cfg.file.filter(|p| !p.trim().is_empty()) {
        RosterSource::File(config::expand_tilde_string(path.trim()))
    } else {
        let url = cfg
            .source_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let url = url.trim().to_string();
        reqwest::Url::parse(&url).map_err(|e| format!("invalid source_url '{url}': {e}"))?;
        RosterSource::Url(url)
    };

    let start = Screen::from_fragment(args.open.as_deref().or(cfg.open.as_deref()));
    let interactive = args.interactive || cfg.interactive.unwrap_or(false);

    let page = args.page.or(cfg.page).unwrap_or(1);
    if page == 0 {
        return Err("invalid page, expected a number starting at 1".to_string());
    }
    let search = args.search.or(cfg.search).filter(|s| !s.is_empty());

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        source,
        start,
        timeout: args.timeout.or(cfg.timeout).unwrap_or(0),
        proxy: args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty()),
        output,
        output_format,
        no_color,
        interactive,
        search,
        page,
        verbose: args.verbose,
    })
}

/// True when stdout receives the rendered board in a machine-readable format.
fn stdout_carries_board(run: &RunConfig) -> bool {
    run.output.is_none() && !run.interactive && run.output_format != OutputFormat::Text
}

/// Renders for a file: text boards are written without ANSI escapes.
fn render_for_file(run: &RunConfig, frame: Frame<'_>) -> Vec<u8> {
    if run.output_format != OutputFormat::Text {
        return output::render(frame, run.output_format);
    }
    colored::control::set_override(false);
    let rendered = output::render(frame, OutputFormat::Text);
    if !run.no_color {
        colored::control::unset_override();
    }
    rendered
}

async fn emit<W: Write>(run: &RunConfig, frame: Frame<'_>, out: &mut W) -> Result<(), String> {
    match run.output.as_deref() {
        Some(path) => {
            let rendered = render_for_file(run, frame);
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(&rendered)
                .await
                .map_err(|_| "failed to write output file".to_string())?;
            status::debug(&format!("wrote {} board to {path}", run.output_format.label()));
            if run.interactive {
                out.write_all(output::cards::render_text(frame).as_bytes())
                    .map_err(|e| format!("failed to write to stdout: {e}"))?;
            }
        }
        None => {
            let format = if run.interactive {
                OutputFormat::Text
            } else {
                run.output_format
            };
            out.write_all(&output::render(frame, format))
                .and_then(|_| out.flush())
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
        }
    }
    Ok(())
}

async fn show<W: Write>(
    run: &RunConfig,
    plan: Option<&RenderPlan>,
    out: &mut W,
) -> Result<(), String> {
    match plan {
        Some(plan) => emit(run, Frame::Plan(plan), out).await,
        None => emit(run, Frame::LoadFailed, out).await,
    }
}

/// Enters the members screen: reset, fetch, project. Failures become the grid error message.
async fn open_members(
    session: &mut Session,
    loader: &RosterLoader,
    source: &RosterSource,
) -> Option<RenderPlan> {
    let pb = status::fetch_spinner(source.describe());
    let result = session.enter_members_view(loader, source).await;
    pb.finish_and_clear();

    match result {
        Ok(entered) => {
            status::debug(&format!(
                "decoded {} rows ({} without a name, {} short)",
                entered.report.rows, entered.report.dropped_unnamed, entered.report.short_rows
            ));
            status::ok(&format!(
                "loaded {} members ({} leaders)",
                session.all_members().len(),
                session.leaders().len()
            ));
            Some(entered.plan)
        }
        Err(e) => {
            status::error(&format!("error fetching or parsing sheet data: {e}"));
            None
        }
    }
}

async fn run_once<W: Write>(
    run: &RunConfig,
    loader: &RosterLoader,
    out: &mut W,
) -> Result<(), String> {
    let mut session = Session::new(run.start);
    if session.screen() == Screen::Landing {
        print_banner(run.no_color);
    }

    let Some(mut plan) = open_members(&mut session, loader, &run.source).await else {
        return show(run, None, out).await;
    };
    if let Some(text) = run.search.as_deref() {
        plan = session.search(text);
    } else {
        while plan.state.current_page < run.page && plan.next_enabled {
            plan = session.next_page();
        }
    }
    show(run, Some(&plan), out).await
}

async fn run_interactive(run: &RunConfig, loader: &RosterLoader) -> Result<(), String> {
    let mut session = Session::new(run.start);
    let mut plan: Option<RenderPlan> = None;
    let mut out = std::io::stdout();

    if session.screen() == Screen::Landing {
        print_banner(run.no_color);
        status::info("press enter to view the members");
    } else {
        plan = open_members(&mut session, loader, &run.source).await;
        show(run, plan.as_ref(), &mut out).await?;
    }
    status::info(INTERACTIVE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(cmd) = Command::parse(&line) else {
            status::warn(&format!("unknown command '{}'", line.trim()));
            status::info(INTERACTIVE_HELP);
            continue;
        };

        match (session.screen(), cmd) {
            (_, Command::Quit) => break,
            (_, Command::Back) => {
                session = Session::new(Screen::Landing);
                plan = None;
                print_banner(run.no_color);
                status::info("press enter to view the members");
                continue;
            }
            (Screen::Landing, Command::Enter) | (Screen::Members, Command::Reload) => {
                plan = open_members(&mut session, loader, &run.source).await;
            }
            (Screen::Landing, _) => {
                status::warn("press enter to view the members first");
                continue;
            }
            (Screen::Members, Command::Enter) => {}
            (Screen::Members, _) if !session.is_loaded() => {
                status::warn("members are not loaded, use r to reload");
                continue;
            }
            (Screen::Members, Command::Next) => {
                if !plan.as_ref().map(|p| p.next_enabled).unwrap_or(false) {
                    status::warn("already on the last page");
                    continue;
                }
                plan = Some(session.next_page());
            }
            (Screen::Members, Command::Prev) => {
                if !plan.as_ref().map(|p| p.prev_enabled).unwrap_or(false) {
                    status::warn("already on the first page");
                    continue;
                }
                plan = Some(session.prev_page());
            }
            (Screen::Members, Command::Search(text)) => {
                plan = Some(session.search(&text));
            }
        }
        show(run, plan.as_ref(), &mut out).await?;
    }
    Ok(())
}

fn prepare_output(run: &RunConfig) {
    if run.no_color {
        colored::control::set_override(false);
    }
    status::set_verbosity(run.verbose);
    status::reserve_stdout(stdout_carries_board(run));
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    prepare_output(&run);

    status::debug(&format!("source: {}", run.source.describe()));
    if run.verbose > 1 {
        status::kv_line("Source", run.source.describe());
        status::kv_line("Timeout", &format!("{}s", run.timeout));
        status::kv_line("Format", run.output_format.label());
        if let Some(proxy) = run.proxy.as_deref() {
            status::kv_line("Proxy", proxy);
        }
    }

    let loader = RosterLoader::new(&LoaderOptions {
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    if run.interactive {
        run_interactive(&run, &loader).await
    } else {
        run_once(&run, &loader, &mut std::io::stdout()).await
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        config::ensure_default_config_file(&path)?;
        status::ok(&format!("config ready at {}", path.display()));
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
