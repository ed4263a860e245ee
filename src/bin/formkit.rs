use std::{env, fs, path::PathBuf, process};

use formkit::{
    config::ConfigManager,
    init,
    lookup::{fragments, to_json, LookupProvider, DEMO_POSTCODES},
    render::Renderer,
    screens::{persoon, PersoonDto, PersoonScreen},
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    match command.as_str() {
        "render" => {
            let mut fallback = false;
            let mut dto_path = None;
            for arg in args {
                match arg.as_str() {
                    "--fallback" => fallback = true,
                    _ => dto_path = Some(PathBuf::from(arg)),
                }
            }

            let config = ConfigManager::new().load()?;
            let dto: PersoonDto = match dto_path {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => PersoonDto::default(),
            };
            let renderer = if fallback {
                Renderer::fallback_only(config)
            } else {
                Renderer::new(config)
            };
            print!("{}", renderer.render(&PersoonScreen::new(dto)));
        }
        "lookup" => {
            let code = args.next().unwrap_or_default();
            println!("{}", to_json(&DEMO_POSTCODES.find(&code))?);
        }
        "items" => {
            let code = args.next().unwrap_or_default();
            let reference = args.next();
            print!(
                "{}",
                fragments::items_fragment(
                    &DEMO_POSTCODES.find(&code),
                    reference.as_deref(),
                    persoon::POSTCODE_SELECT_URL,
                )
            );
        }
        "select" => {
            let (Some(code), Some(reference)) = (args.next(), args.next()) else {
                print_usage();
                process::exit(1);
            };
            let records = DEMO_POSTCODES.find(&code);
            if let Some(record) = records.first() {
                print!(
                    "{}",
                    fragments::selection_fragment(
                        record,
                        &reference,
                        Some(persoon::POSTCODE_LOOKUP_URL),
                    )
                );
            }
        }
        "config" => {
            let manager = ConfigManager::new();
            if args.next().as_deref() == Some("--init") {
                manager.save(&manager.load()?)?;
                println!("Saved config to {}", manager.path().display());
            } else {
                println!("{}", serde_json::to_string_pretty(&manager.load()?)?);
            }
        }
        "version" => {
            println!(
                "formkit {} ({} {}, built {})",
                env!("CARGO_PKG_VERSION"),
                env!("FORMKIT_BUILD_HASH"),
                env!("FORMKIT_BUILD_PROFILE"),
                env!("FORMKIT_BUILD_TIMESTAMP"),
            );
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage:\n  formkit render [--fallback] [dto.json]\n  formkit lookup [code]\n  formkit items [code] [ref]\n  formkit select <code> <ref>\n  formkit config [--init]\n  formkit version"
    );
}
