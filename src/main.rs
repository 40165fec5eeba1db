use std::env;
use std::fs;
use std::process;

use capo::{NotationConfig, NotationStyle, SongOptions, TargetKey, Transposer};

fn usage() -> ! {
    eprintln!("Usage: capo <input> [output] [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --semitones <N>     semitones to shift the song by (default 0)");
    eprintln!("  -k, --to-key <KEY>      target key, or 'auto' to detect from the first chord");
    eprintln!("  -s, --style <STYLE>     output notation style: abc or doremi (default abc)");
    eprintln!("      --keep-key-markers  rewrite \\key{{...}} directives instead of removing them");
    eprintln!("      --config <FILE>     YAML notation configuration (symbols, style labels)");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut semitones: i32 = 0;
    let mut to_key = TargetKey::Reference;
    let mut style_label: Option<String> = None;
    let mut keep_key_markers = false;
    let mut config_path: Option<String> = None;

    // Parse flags
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--semitones" => {
                i += 1;
                let Some(value) = args.get(i) else { usage() };
                semitones = match value.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        eprintln!("Invalid semitone count: {}", value);
                        process::exit(1);
                    }
                };
            }
            "-k" | "--to-key" => {
                i += 1;
                let Some(value) = args.get(i) else { usage() };
                to_key = if value == "auto" {
                    TargetKey::Auto
                } else {
                    TargetKey::Named(value.clone())
                };
            }
            "-s" | "--style" => {
                i += 1;
                let Some(value) = args.get(i) else { usage() };
                style_label = Some(value.clone());
            }
            "--keep-key-markers" => keep_key_markers = true,
            "--config" => {
                i += 1;
                let Some(value) = args.get(i) else { usage() };
                config_path = Some(value.clone());
            }
            "-h" | "--help" => usage(),
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {}", flag);
                usage();
            }
            _ => {
                if input.is_none() {
                    input = Some(args[i].clone());
                } else if output.is_none() {
                    output = Some(args[i].clone());
                } else {
                    usage();
                }
            }
        }
        i += 1;
    }

    let Some(input) = input else { usage() };

    // Notation configuration
    let config = match config_path {
        Some(path) => {
            let raw = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading config '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match serde_yaml::from_str::<NotationConfig>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Invalid config '{}': {}", path, e);
                    process::exit(1);
                }
            }
        }
        None => NotationConfig::default(),
    };

    let out_style = match style_label {
        Some(label) => match NotationStyle::from_label(&label, &config) {
            Ok(style) => style,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => NotationStyle::Letter,
    };

    // Read input file
    let source = match fs::read_to_string(&input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input, e);
            process::exit(1);
        }
    };

    let engine = match Transposer::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let options = SongOptions {
        to_key,
        out_style,
        clean_key_markers: !keep_key_markers,
        ..SongOptions::default()
    };

    let transposed = match engine.transpose_song(&source, semitones, &options) {
        Ok(song) => song,
        Err(e) => {
            eprintln!("Transposition error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &transposed) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote transposed song to {}", path);
        }
        None => {
            print!("{}", transposed);
        }
    }
}
