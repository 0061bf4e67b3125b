use std::path::Path;
use std::process;

use jsonunion::{
    DecodeError, DecodeFault, DecodeOutcome, Decoder, KeyFolding, MapperOptions, Selection,
};
use serde_json::Value;

use crate::{read_input, report_error, OutputFormat};

/// Exit code for a misconfigured invocation, e.g. a blank `--key`.
const EXIT_USAGE: i32 = 2;

pub(crate) struct DecodeArgs<'a> {
    pub(crate) file: &'a Path,
    pub(crate) keys: &'a [String],
    pub(crate) lenient: bool,
    pub(crate) fold_keys: bool,
}

pub(crate) fn cmd_decode(args: DecodeArgs<'_>, output: OutputFormat, quiet: bool) {
    let text = match read_input(args.file) {
        Ok(s) => s,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let key_folding = if args.fold_keys {
        KeyFolding::Lowercase
    } else {
        KeyFolding::Preserve
    };
    let mut decoder =
        Decoder::new().with_mapper(MapperOptions::default().with_key_folding(key_folding));
    if args.lenient {
        decoder = decoder.lenient();
    }

    let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
    tracing::debug!(
        file = %args.file.display(),
        keys = ?keys,
        lenient = args.lenient,
        "decoding document"
    );
    let selection = match decoder.select(&text, &keys) {
        Ok(selection) => selection,
        Err(fault) => exit_with_fault(&fault, output, quiet),
    };

    match selection {
        None => {
            match output {
                OutputFormat::Text => {
                    if !quiet {
                        println!("nothing to decode");
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "outcome": "absent" }));
                }
            }
        }
        Some(Selection::Matched {
            index,
            key,
            document,
        }) => match decoder.map::<Value>(document) {
            Ok(DecodeOutcome::Matched(value)) => print_match(index, &key, &value, output, quiet),
            Ok(DecodeOutcome::Error(err)) => exit_with_error(&err, output, quiet),
            Err(fault) => exit_with_fault(&fault, output, quiet),
        },
        Some(Selection::Error(err)) => exit_with_error(&err, output, quiet),
    }
}

fn print_match(index: usize, key: &str, value: &Value, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Text => {
            if !quiet {
                println!("matched '{}' (candidate {})", key, index + 1);
            }
            let pretty = serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "outcome": "matched",
                "index": index,
                "key": key,
                "value": value,
            });
            println!("{}", json);
        }
    }
}

fn exit_with_error(err: &DecodeError, output: OutputFormat, quiet: bool) -> ! {
    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("decode error: {}", err);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "outcome": "error",
                "error": err.to_json_value(),
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(1);
}

fn exit_with_fault(fault: &DecodeFault, output: OutputFormat, quiet: bool) -> ! {
    report_error(&fault.to_string(), output, quiet);
    match fault {
        DecodeFault::InvalidArgument { .. } => process::exit(EXIT_USAGE),
        DecodeFault::Malformed(_) => process::exit(1),
    }
}
