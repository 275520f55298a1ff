use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rosterboard",
    version,
    about = "community roster board for published member sheets",
    long_about = "Rosterboard fetches a published spreadsheet CSV export and shows its members as a searchable, paginated board with the leaders highlighted.\n\nExamples:\n  rosterboard --open '#members'\n  rosterboard --open '#members' --search ana\n  rosterboard -i\n  rosterboard --file ./members.csv --page 2 -o members.html\n\nTip: Use --config to persist the sheet URL and output settings."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered board to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json or html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'u',
        long = "src",
        visible_aliases = ["source", "url"],
        value_name = "URL",
        help_heading = "Input",
        help = "Published sheet CSV URL."
    )]
    pub source: Option<String>,

    #[arg(
        short = 'f',
        long = "fl",
        visible_alias = "file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Read a local CSV export instead of fetching the sheet."
    )]
    pub file: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.rosterboard/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write the default config file if it does not exist, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'O',
        long = "op",
        visible_alias = "open",
        value_name = "FRAGMENT",
        help_heading = "View",
        help = "Open at a page fragment ('#members' skips the landing screen)."
    )]
    pub open: Option<String>,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Browse interactively (n/p to page, /text to search, b back, q quit)."
    )]
    pub interactive: bool,

    #[arg(
        short = 's',
        long = "sr",
        visible_alias = "search",
        value_name = "TEXT",
        help_heading = "View",
        help = "Initial search text (case-insensitive, matches name or role)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "View",
        help = "Initial page number (1-based)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds (0 waits forever)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'x',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,
}
