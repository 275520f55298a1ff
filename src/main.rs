use std::process::exit;

use rosterboard::output::status;

fn main() {
    if let Err(e) = rosterboard::app::run_cli() {
        status::error(&e);
        exit(1);
    }
}
