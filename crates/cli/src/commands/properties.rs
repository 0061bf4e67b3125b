use std::path::Path;
use std::process;

use jsonunion::{JsonEngine, PropertySet, SerdeJsonEngine};

use crate::{read_input, report_error, OutputFormat};

pub(crate) fn cmd_properties(file: &Path, output: OutputFormat, quiet: bool) {
    let text = match read_input(file) {
        Ok(s) => s,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let props = if text.trim().is_empty() {
        None
    } else {
        let doc = match SerdeJsonEngine.parse(&text) {
            Ok(doc) => doc,
            Err(e) => {
                let msg = format!("error parsing JSON in '{}': {}", file.display(), e.message);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        };
        PropertySet::from_value(&doc)
    };

    match (props, output) {
        (Some(set), OutputFormat::Text) => {
            for name in set.iter() {
                println!("{}", name);
            }
        }
        (Some(set), OutputFormat::Json) => {
            let names: Vec<&str> = set.iter().collect();
            println!("{}", serde_json::json!({ "properties": names }));
        }
        (None, OutputFormat::Text) => {
            if !quiet {
                println!("not a JSON object, nothing to inspect");
            }
        }
        (None, OutputFormat::Json) => {
            println!("{}", serde_json::json!({ "properties": null }));
        }
    }
}
