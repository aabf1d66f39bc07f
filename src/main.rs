//! # Pageflow CLI
//!
//! Usage:
//!   pageflow input.json -o pages.json
//!   echo '{ ... }' | pageflow
//!   pageflow --example > document.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_document_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    };

    // Parse output path; default to stdout
    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());

    match pageflow::paginate_json(&input) {
        Ok(document) => {
            let json = serde_json::to_string_pretty(&document)
                .expect("Failed to serialize paginated document");
            match output_path {
                Some(path) => {
                    fs::write(&path, &json).expect("Failed to write output");
                    eprintln!("✓ {} page(s) written to {}", document.page_count(), path);
                }
                None => {
                    println!("{json}");
                    eprintln!("✓ {} page(s)", document.page_count());
                }
            }
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

fn example_document_json() -> &'static str {
    r##"{
  "blocks": [
    {
      "kind": { "type": "Heading", "level": 1, "lines": [42.0] },
      "height": 42.0,
      "id": "title"
    },
    {
      "kind": { "type": "Paragraph", "lines": [24.0, 24.0, 24.0, 24.0] },
      "height": 96.0,
      "id": "intro"
    },
    {
      "kind": { "type": "Image" },
      "height": 480.0,
      "id": "figure-1"
    },
    {
      "kind": { "type": "Paragraph", "lines": [24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0] },
      "height": 288.0,
      "id": "body-1"
    },
    {
      "kind": { "type": "Table" },
      "height": 360.0,
      "id": "results"
    },
    {
      "kind": { "type": "ListItem", "depth": 0, "lines": [24.0, 24.0] },
      "height": 48.0,
      "id": "item-1"
    },
    {
      "kind": { "type": "ListItem", "depth": 0, "lines": [24.0] },
      "height": 24.0,
      "id": "item-2"
    },
    {
      "kind": { "type": "Rule" },
      "height": 3.0,
      "id": "divider"
    },
    {
      "kind": { "type": "Paragraph", "lines": [24.0, 24.0, 24.0, 24.0, 24.0, 24.0] },
      "height": 144.0,
      "id": "outro"
    }
  ],
  "options": {
    "defaultMarginConfig": { "top": 25.4, "right": 25.4, "bottom": 25.4, "left": 25.4 },
    "defaultPaperOrientation": "portrait",
    "pageAmendmentOptions": { "enableHeader": true, "enableFooter": true }
  }
}
"##
}
