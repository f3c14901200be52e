// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::{anyhow, Context, Result};
use fifths::config::TheoryConfig;
use fifths::music::{
    collection, convert, modes, Key, KeyMode, KeySignature, MidiNote, NamedProgression, Note,
    PitchClass, Progression, ProgressionGenerator, Scale,
};
use tracing::debug;

fn print_usage() {
    println!("fifths - Circle-of-fifths music theory");
    println!();
    println!("Usage: fifths [--config <FILE>] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --signature <N>                 Key signature at circle position N (0-11)");
    println!("  --circle                        All twelve positions with their keys");
    println!("  --key [KEY]                     Key summary, e.g. C, Am, \"Eb major\"");
    println!("  --scale <ROOT> <SCALE>          Scale tones and stacked triads");
    println!("  --fit <ROOT> <SCALE> <NOTE> [DEGREES]");
    println!("                                  Snap a note (B4 or MIDI 71) into a scale,");
    println!("                                  then move it by scale degrees");
    println!("  --chords [OCTAVE]               The twelve major and minor triads");
    println!("  --modes <TONIC>                 The seven church modes on a tonic");
    println!("  --convert <NAME|INDEX>          Chromatic, circle and name views of a note");
    println!("  --progression [KEY] [NAME|random] [LENGTH]");
    println!("                                  Chords of a progression in a key");
    println!("  --help                          Show this help message");
}

fn init_logging(config: &TheoryConfig) -> Result<()> {
    let level = config.tracing_level()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn parse_index(arg: &str, what: &str) -> Result<i64> {
    arg.parse().map_err(|_| anyhow!("Invalid {}: {}", what, arg))
}

fn show_signature(config: &TheoryConfig, fifths_index: i64) -> Result<()> {
    let signature = KeySignature::from_fifths_index(fifths_index)?;
    let major = Key::from_circle_of_fifths(fifths_index, KeyMode::Major)?;
    let minor = major.relative_key();
    println!("Position {}", signature.fifths_index());
    println!("  Major key:   {}", config.display(&major.name()));
    println!("  Minor key:   {}", config.display(&minor.name()));
    if signature.is_empty() {
        println!("  Accidentals: none");
    } else {
        println!(
            "  Accidentals: {} ({} {})",
            config.display(&signature.to_string()),
            signature.len(),
            if signature.len() == 1 {
                signature.primary_accidental().name()
            } else {
                signature.primary_accidental().plural_name()
            }
        );
    }
    Ok(())
}

fn show_circle(config: &TheoryConfig) -> Result<()> {
    for f in 0..12 {
        let major = convert::key_name_for_position(f, KeyMode::Major)?;
        let minor = convert::key_name_for_position(f, KeyMode::Minor)?;
        let signature = KeySignature::from_fifths_index(f)?;
        println!(
            "{:>2}  {:<4} {:<5} {}",
            f,
            config.display(&major),
            config.display(&minor),
            config.display(&signature.to_string())
        );
    }
    Ok(())
}

fn show_key(config: &TheoryConfig, key: &Key) -> Result<()> {
    println!("{}", config.display(&key.name()));
    println!("  Signature:   {}", config.display(&key.key_signature().to_string()));
    println!("  Notes:       {}", config.display(&key.note_names().join(" ")));
    println!("  Relative:    {}", config.display(&key.relative_key().name()));
    println!("  Parallel:    {}", config.display(&key.parallel_key().name()));
    println!("  Dominant:    {}", config.display(&key.dominant_key().name()));
    println!("  Subdominant: {}", config.display(&key.subdominant_key().name()));
    println!();
    for info in key.diatonic_chords_in_octave(config.default_octave)? {
        println!(
            "  {:<5} {:<6} {:<12} {}",
            info.roman_numeral,
            config.display(&info.chord.name()),
            info.function.name(),
            info.chord.tone_notations().join(" ")
        );
    }
    Ok(())
}

fn resolve_scale(config: &TheoryConfig, root: &str, scale_name: &str) -> Result<Scale> {
    let registry = config.scale_registry();
    let pattern = registry
        .get(scale_name)
        .ok_or_else(|| anyhow!("Unknown scale: {}", scale_name))?;
    Ok(Scale::new(PitchClass::parse(root)?, pattern))
}

fn show_scale(config: &TheoryConfig, root: &str, scale_name: &str) -> Result<()> {
    let scale = resolve_scale(config, root, scale_name)?;
    let root = scale.root();
    println!(
        "{} {}",
        config.display(root.name_for(scale.key_signature())),
        scale.pattern().name()
    );
    println!("  Notes:  {}", config.display(&scale.note_names().join(" ")));
    println!("  Steps:  {:?}", scale.pattern().step_pattern());
    if let Some(mode) = modes::identify(scale.pattern()) {
        println!("  Mode:   {} (brightness {})", mode, mode.brightness());
    }
    match collection::triads_in_scale(&scale, config.default_octave) {
        Ok(triads) => {
            let names: Vec<String> = triads.iter().map(|c| config.display(&c.name())).collect();
            println!("  Triads: {}", names.join(" "));
        }
        Err(e) => debug!(error = %e, "scale has no tertian triads"),
    }
    Ok(())
}

fn parse_midi_note(arg: &str) -> Result<MidiNote> {
    if let Ok(midi) = arg.parse::<MidiNote>() {
        if midi <= 127 {
            return Ok(midi);
        }
    }
    let note = Note::parse(arg).with_context(|| format!("Invalid note: {}", arg))?;
    note.midi()
        .ok_or_else(|| anyhow!("Note outside the MIDI range: {}", arg))
}

fn show_fit(config: &TheoryConfig, args: &[String]) -> Result<()> {
    let scale = resolve_scale(config, &args[0], &args[1])?;
    let midi = parse_midi_note(&args[2])?;
    let degrees: i32 = match args.get(3) {
        Some(d) => d.parse().map_err(|_| anyhow!("Invalid degree count: {}", d))?,
        None => 0,
    };
    let signature = scale.key_signature();
    let spell = |m: MidiNote| config.display(&Note::from_midi(m).notation_for(signature));

    println!(
        "{} {}",
        config.display(scale.root().name_for(signature)),
        scale.pattern().name()
    );
    println!("  Input:    {} ({})", spell(midi), midi);
    let snapped = scale.quantize(midi);
    println!("  Snapped:  {} ({})", spell(snapped), snapped);
    if degrees != 0 {
        match scale.transpose_in_scale(midi, degrees) {
            Some(moved) => println!("  Moved {:+}: {} ({})", degrees, spell(moved), moved),
            None => println!("  Moved {:+}: outside the MIDI range", degrees),
        }
    }
    Ok(())
}

fn show_chords(config: &TheoryConfig, octave: i8) -> Result<()> {
    for (major, minor) in collection::circle_pairs(octave)? {
        println!(
            "{:<4} {:<12} {:<5} {}",
            config.display(&major.name()),
            major.tone_notations().join(" "),
            config.display(&minor.name()),
            minor.tone_notations().join(" ")
        );
    }
    Ok(())
}

fn show_modes(config: &TheoryConfig, tonic: &str) -> Result<()> {
    let tonic = PitchClass::parse(tonic)?;
    for (mode, scale) in modes::modes_on(tonic) {
        let parent = modes::parent_major(tonic, mode);
        println!(
            "{:<11} {:<24} parent {}",
            mode.name(),
            config.display(&scale.note_names().join(" ")),
            config.display(modes::mode_signature(tonic, mode).spell(parent))
        );
    }
    Ok(())
}

fn show_conversion(config: &TheoryConfig, arg: &str) -> Result<()> {
    let pitch_class = match arg.parse::<i64>() {
        Ok(index) => PitchClass::try_from_chromatic_index(index)?,
        Err(_) => PitchClass::parse(arg)?,
    };
    let chromatic = pitch_class.chromatic_index();
    let fifths_index = pitch_class.fifths_index();
    println!(
        "{}",
        config.display(&format!("{} / {}", pitch_class.sharp_name(), pitch_class.flat_name()))
    );
    println!("  Chromatic index: {}", chromatic);
    println!("  Circle position: {}", fifths_index);
    println!(
        "  Above C:         {} semitones ({})",
        chromatic,
        convert::interval_name(chromatic as i32)
    );
    println!(
        "  Major key:       {}",
        config.display(&convert::key_name_for_position(fifths_index as i64, KeyMode::Major)?)
    );
    Ok(())
}

fn show_progression(config: &TheoryConfig, args: &[String]) -> Result<()> {
    let key = match args.first() {
        Some(name) => Key::parse(name).with_context(|| format!("Invalid key: {}", name))?,
        None => config.key()?,
    };
    let which = args.get(1).map(String::as_str).unwrap_or("I-vi-IV-V");
    let progression = if which.eq_ignore_ascii_case("random") {
        let length = match args.get(2) {
            Some(n) => n
                .parse()
                .map_err(|_| anyhow!("Invalid progression length: {}", n))?,
            None => 4,
        };
        ProgressionGenerator::new(config.progression_seed).random_in_key(
            &key,
            length,
            config.default_octave,
        )?
    } else {
        let named = NamedProgression::parse(which)
            .ok_or_else(|| anyhow!("Unknown progression: {}", which))?;
        Progression::named(&key, named, config.default_octave)?
    };

    println!("{} in {}", which, config.display(&key.name()));
    for step in progression.steps() {
        println!(
            "  {:<5} {:<6} {}",
            step.roman_numeral,
            config.display(&step.chord.name()),
            step.chord.tone_notations().join(" ")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();

    let config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .cloned()
                .ok_or_else(|| anyhow!("--config requires a file path"))?;
            args.drain(i..=i + 1);
            TheoryConfig::load(&path)?
        }
        None => TheoryConfig::default(),
    };
    init_logging(&config)?;

    if args.len() < 2 {
        println!("fifths - Circle-of-fifths music theory");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--signature" => {
            if args.len() < 3 {
                eprintln!("Error: --signature requires a circle position (0-11)");
                std::process::exit(1);
            }
            show_signature(&config, parse_index(&args[2], "circle position")?)?;
        }
        "--circle" => {
            show_circle(&config)?;
        }
        "--key" => {
            let key = match args.get(2) {
                Some(name) => Key::parse(name).with_context(|| format!("Invalid key: {}", name))?,
                None => config.key()?,
            };
            show_key(&config, &key)?;
        }
        "--scale" => {
            if args.len() < 4 {
                eprintln!("Error: --scale requires a root and a scale name");
                std::process::exit(1);
            }
            show_scale(&config, &args[2], &args[3])?;
        }
        "--fit" => {
            if args.len() < 5 {
                eprintln!("Error: --fit requires a root, a scale name and a note");
                std::process::exit(1);
            }
            show_fit(&config, &args[2..])?;
        }
        "--chords" => {
            let octave = match args.get(2) {
                Some(o) => o.parse().map_err(|_| anyhow!("Invalid octave: {}", o))?,
                None => config.default_octave,
            };
            show_chords(&config, octave)?;
        }
        "--modes" => {
            if args.len() < 3 {
                eprintln!("Error: --modes requires a tonic");
                std::process::exit(1);
            }
            show_modes(&config, &args[2])?;
        }
        "--convert" => {
            if args.len() < 3 {
                eprintln!("Error: --convert requires a note name or chromatic index");
                std::process::exit(1);
            }
            show_conversion(&config, &args[2])?;
        }
        "--progression" => {
            show_progression(&config, &args[2..])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
