//! `json-coerce`: coerce a loosely-typed JSON document read from stdin.
//!
//! Usage:
//!   json-coerce [--lenient] [--schema]
//!
//! Prints the serialized coerced document, or with `--schema` the inferred
//! schema of the coerced document. `--lenient` keeps malformed strings as
//! text instead of failing. Set `RUST_LOG=debug` to trace coercion decisions.

use json_coerce::{infer_schema, DeserializeOptions, Engine, Value};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(input: &str, lenient: bool, schema: bool) -> Result<String, String> {
    let engine = Engine::new();
    let options = DeserializeOptions::new().strict(!lenient);
    let raw = Value::from(input);
    let coerced = engine.deserialize(&raw, &options).map_err(|e| e.to_string())?;

    if schema {
        return serde_json::to_string(&infer_schema(&coerced)).map_err(|e| e.to_string());
    }
    Ok(coerced
        .to_json()
        .map(|json| json.to_string())
        .unwrap_or_else(|| "undefined".to_string()))
}

fn main() {
    init_tracing();

    let mut lenient = false;
    let mut schema = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--lenient" => lenient = true,
            "--schema" => schema = true,
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: json-coerce [--lenient] [--schema]");
                std::process::exit(1);
            }
        }
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(buf.trim(), lenient, schema) {
        Ok(out) => {
            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(out.as_bytes()).and_then(|_| stdout.write_all(b"\n")) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
