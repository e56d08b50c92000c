use std::io::Read;
use std::path::Path;
use std::process::exit;

use selext::cli::{self, ScriptSource};
use selext::{Eol, Pipeline};

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("selext: {e}");
            eprintln!("Usage: selext (-c<script> | -f<script-file>) [-e<sep>] [<input-file>]");
            exit(2);
        }
    };

    let script = match &args.script {
        ScriptSource::Inline(s) => s.clone(),
        ScriptSource::File(path) => read_file(path),
    };

    let input = match &args.input {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("selext: stdin: {e}");
                exit(1);
            }
            buf
        }
    };

    let eol = args.eol.map(Eol::new).unwrap_or_default();
    match Pipeline::new(eol).run(&input, &script) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("selext: {e}");
            exit(1);
        }
    }
}

fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("selext: {}: {e}", path.display());
            exit(1);
        }
    }
}
