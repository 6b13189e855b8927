//! Trace replay: landmark JSONL in, real-time MIDI out.
//!
//! ```text
//! manus-midi [--verbose] [--list-ports] [--port <hint>] [--no-pace] <trace.jsonl>
//! ```

use std::fs::File;
use std::thread;
use std::time::Duration;

use crossbeam_channel::bounded;

use manus_core::{Config, Session};
use manus_midi::{open_output, read_trace, MidiSink, TraceFrame};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("manus")
        .join("manus.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = File::create(&log_path)
        .unwrap_or_else(|_| File::create("/tmp/manus.log").expect("Cannot create log file"));

    WriteLogger::init(log_level, simplelog::Config::default(), log_file)
        .expect("Failed to initialize logger");

    log::info!("manus-midi starting (log level: {:?})", log_level);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    if args.iter().any(|a| a == "--list-ports") {
        let ports = manus_midi::sink::list_ports();
        if ports.is_empty() {
            println!("No MIDI output ports found.");
        } else {
            for (index, name) in ports.iter().enumerate() {
                println!("{}: {}", index, name);
            }
        }
        return;
    }

    let port_flag = args
        .iter()
        .position(|a| a == "--port")
        .and_then(|i| args.get(i + 1).cloned());
    let pace = !args.iter().any(|a| a == "--no-pace");

    let trace_path = match args.iter().find(|a| !a.starts_with('-') && Some(a.as_str()) != port_flag.as_deref()) {
        Some(path) => std::path::PathBuf::from(path),
        None => {
            eprintln!("Usage: manus-midi [--verbose] [--list-ports] [--port <hint>] [--no-pace] <trace.jsonl>");
            std::process::exit(2);
        }
    };

    let config = Config::load();
    let settings = config.tracking();
    let port_hint = port_flag.unwrap_or_else(|| config.midi_port_hint().to_string());

    let frames = match read_trace(&trace_path) {
        Ok(frames) => frames,
        Err(e) => {
            eprintln!("Could not read {}: {}", trace_path.display(), e);
            std::process::exit(1);
        }
    };
    println!(
        "Replaying {} frames from {}",
        frames.len(),
        trace_path.display()
    );

    let mut session = Session::new(settings);
    let mut sink = MidiSink::new(open_output(&port_hint), config.midi_base_channel());

    // Reader thread paces frames by their captured timestamps and feeds a
    // small bounded channel; the main loop consumes, processes and renders.
    let (tx, rx) = bounded::<TraceFrame>(4);
    let reader = thread::spawn(move || {
        let mut last_ms = 0.0_f64;
        for frame in frames {
            if pace {
                let delta = (frame.t_ms - last_ms).max(0.0);
                if delta > 0.0 {
                    thread::sleep(Duration::from_secs_f64(delta / 1000.0));
                }
                last_ms = frame.t_ms;
            }
            if tx.send(frame).is_err() {
                return;
            }
        }
    });

    let mut note_ons = 0usize;
    let mut last_bpm: Option<f32> = None;
    for trace_frame in rx.iter() {
        let input = trace_frame.to_frame_input(session.settings().landmark_policy);
        let output = session.process_frame(&input);
        note_ons += output.note_ons().count();
        sink.handle(&output.events);

        if let Some(bpm) = output.bpm {
            let changed = last_bpm.map_or(true, |previous| (previous - bpm).abs() >= 1.0);
            if changed {
                log::info!(target: "beat", "tempo {:.0} bpm", bpm);
                last_bpm = Some(bpm);
            }
        }
    }

    let _ = reader.join();
    sink.all_notes_off();
    println!("Done: {} notes triggered.", note_ons);
}
