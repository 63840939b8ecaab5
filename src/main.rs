//! rTutorlog main entrypoint.

use rtutorlog::run;
use rtutorlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
