//! Trycorder demo — play effects through the speakers, export them to WAV,
//! and classify transcript lines from stdin.

use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};

use trycorder::config::TrycorderConfig;
use trycorder::sfx::{recipe::recipe, render, SfxPlayer, SoundEffect};
use trycorder::voice::{
    command_channel, RecognitionBackend, SpeechStream, TranscriptEvent, VoiceCommand,
    VoiceCommandRecognizer,
};

#[derive(Parser)]
#[command(name = "trycorder", version, about = "Trycorder sound & voice demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available sound effects.
    List,
    /// Play one effect (or all of them) through the default output device.
    Play {
        /// Effect name, e.g. "phaser". See `list`.
        effect: Option<String>,
        /// Play every effect in sequence.
        #[arg(long)]
        all: bool,
    },
    /// Render an effect to a mono 16-bit WAV file.
    Render {
        /// Effect name, e.g. "transporter".
        effect: String,
        /// Output path. Defaults to "<effect>.wav".
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Sample rate for the render.
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,
    },
    /// Read transcript lines from stdin and print their classification.
    Listen {
        /// Play a confirmation sound for each classified line.
        #[arg(long)]
        sfx: bool,
    },
}

/// Stand-in platform stream for the stdin demo: the "recognizer" is the
/// terminal, so starting and stopping have nothing to do.
struct StdinStream;

impl SpeechStream for StdinStream {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

fn parse_effect(name: &str) -> SoundEffect {
    match SoundEffect::from_name(name) {
        Some(effect) => effect,
        None => {
            eprintln!("unknown effect '{name}'; run `trycorder list`");
            std::process::exit(1);
        }
    }
}

fn configured_player(config: &TrycorderConfig) -> SfxPlayer {
    let mut player = SfxPlayer::new();
    player.set_enabled(config.sound.enabled);
    player.set_volume(config.sound.master_volume);
    player
}

/// Play one effect and block until it has sounded out.
fn play_and_wait(player: &mut SfxPlayer, effect: SoundEffect) {
    println!("playing {effect}");
    player.play(effect);
    let secs = recipe(effect).total_duration() as f64 + 0.15;
    thread::sleep(Duration::from_secs_f64(secs));
}

fn run_listen(config: TrycorderConfig, sfx: bool) {
    let mut player = if sfx {
        Some(configured_player(&config))
    } else {
        None
    };
    let mut session = VoiceCommandRecognizer::with_config(
        RecognitionBackend::Available(Box::new(StdinStream)),
        config.recognition,
    );
    let (tx, rx) = command_channel();
    session.start_listening(tx);

    println!("type a command transcript per line (Ctrl-D to stop):");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        session.handle_transcript(TranscriptEvent {
            transcript: line,
            confidence: 1.0,
            is_final: true,
        });
        for result in rx.drain() {
            println!("  {} ({:.2}): \"{}\"", result.command, result.confidence, result.transcript);
            if let Some(player) = player.as_mut() {
                let feedback = if result.command == VoiceCommand::Unknown {
                    SoundEffect::Error
                } else {
                    SoundEffect::Success
                };
                player.play(feedback);
                thread::sleep(Duration::from_millis(250));
            }
        }
    }
    session.stop_listening();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = TrycorderConfig::load().unwrap_or_default();

    match cli.command {
        Command::List => {
            for effect in SoundEffect::ALL {
                println!(
                    "{:<12} {:.1}s",
                    effect.name(),
                    recipe(effect).total_duration()
                );
            }
        }
        Command::Play { effect, all } => {
            let mut player = configured_player(&config);
            if !player.is_available() {
                eprintln!("no audio output available");
                std::process::exit(1);
            }
            if all {
                for effect in SoundEffect::ALL {
                    play_and_wait(&mut player, effect);
                }
            } else {
                let Some(name) = effect else {
                    eprintln!("pass an effect name or --all");
                    std::process::exit(1);
                };
                play_and_wait(&mut player, parse_effect(&name));
            }
        }
        Command::Render {
            effect,
            output,
            sample_rate,
        } => {
            let effect = parse_effect(&effect);
            let path = output.unwrap_or_else(|| PathBuf::from(format!("{effect}.wav")));
            let samples = render::render_effect(effect, sample_rate);
            if let Err(e) = render::write_wav(&path, &samples, sample_rate) {
                eprintln!("failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            println!("wrote {} ({} samples)", path.display(), samples.len());
        }
        Command::Listen { sfx } => run_listen(config, sfx),
    }
}
