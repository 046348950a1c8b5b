//! Text-to-speech through the platform's speech program
//!
//! Supported programs: `say` (macOS), `espeak-ng`/`espeak`, `spd-say`.
//! Failures are logged and otherwise ignored.

use std::process::Stdio;
use std::sync::OnceLock;

use regex::Regex;
use tokio::process::{Child, Command};

use crate::config::{SpeechBackendChoice, SpeechConfig};

/// Words per minute that `say` and `espeak` use at normal speed
const NORMAL_WPM: f32 = 175.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Say,
    EspeakNg,
    Espeak,
    SpdSay,
}

impl Backend {
    pub fn program(&self) -> &'static str {
        match self {
            Backend::Say => "say",
            Backend::EspeakNg => "espeak-ng",
            Backend::Espeak => "espeak",
            Backend::SpdSay => "spd-say",
        }
    }

    /// Resolve the configured choice against what is installed
    pub fn detect(choice: SpeechBackendChoice) -> Option<Backend> {
        let candidates: &[Backend] = match choice {
            SpeechBackendChoice::Auto => &[
                Backend::Say,
                Backend::EspeakNg,
                Backend::Espeak,
                Backend::SpdSay,
            ],
            SpeechBackendChoice::Say => &[Backend::Say],
            SpeechBackendChoice::EspeakNg => &[Backend::EspeakNg],
            SpeechBackendChoice::Espeak => &[Backend::Espeak],
            SpeechBackendChoice::SpdSay => &[Backend::SpdSay],
        };
        candidates
            .iter()
            .copied()
            .find(|b| find_in_path(b.program()))
    }

    fn list_voices_args(&self) -> &'static [&'static str] {
        match self {
            Backend::Say => &["-v", "?"],
            Backend::EspeakNg | Backend::Espeak => &["--voices"],
            Backend::SpdSay => &["-L"],
        }
    }

    /// Voice names from the program's voice listing
    pub fn parse_voices(&self, output: &str) -> Vec<String> {
        match self {
            Backend::Say => output
                .lines()
                .filter_map(|line| say_voice_re().captures(line))
                .map(|caps| caps["name"].trim().to_string())
                .collect(),
            // Pty Language Age/Gender VoiceName File Other Languages
            Backend::EspeakNg | Backend::Espeak => output
                .lines()
                .filter(|line| !line.trim_start().starts_with("Pty"))
                .filter_map(|line| line.split_whitespace().nth(3))
                .map(str::to_string)
                .collect(),
            // NAME LANGUAGE VARIANT
            Backend::SpdSay => output
                .lines()
                .filter(|line| !line.trim_start().starts_with("NAME"))
                .filter_map(|line| spd_voice_re().captures(line.trim()))
                .map(|caps| caps["name"].to_string())
                .collect(),
        }
    }

    /// Arguments for one utterance
    pub fn speak_args(&self, text: &str, language: &str, rate: f32, voice: Option<&str>) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Backend::Say => {
                if let Some(voice) = voice {
                    args.extend(["-v".to_string(), voice.to_string()]);
                }
                args.extend(["-r".to_string(), words_per_minute(rate).to_string()]);
            }
            Backend::EspeakNg | Backend::Espeak => {
                let voice = voice
                    .map(str::to_string)
                    .unwrap_or_else(|| language.to_lowercase());
                args.extend(["-v".to_string(), voice]);
                args.extend(["-s".to_string(), words_per_minute(rate).to_string()]);
            }
            Backend::SpdSay => {
                let primary = language.split(['-', '_']).next().unwrap_or(language);
                args.extend(["-l".to_string(), primary.to_lowercase()]);
                if let Some(voice) = voice {
                    args.extend(["-y".to_string(), voice.to_string()]);
                }
                args.extend(["-r".to_string(), spd_rate(rate).to_string()]);
            }
        }
        args.push(text.to_string());
        args
    }
}

fn say_voice_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<name>.+?)\s+(?P<lang>[a-z]{2,3}_[A-Za-z0-9]{2,4})\s+#")
            .expect("valid regex")
    })
}

fn spd_voice_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<name>.+?)\s+(?P<lang>\S+)\s+(?P<variant>\S+)$").expect("valid regex")
    })
}

fn words_per_minute(rate: f32) -> u32 {
    (NORMAL_WPM * rate.max(0.1)).round() as u32
}

/// speech-dispatcher rates run from -100 to 100 around 0
fn spd_rate(rate: f32) -> i32 {
    (((rate - 1.0) * 100.0).round() as i32).clamp(-100, 100)
}

fn find_in_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

/// First voice whose name contains any preferred substring
pub fn pick_voice(voices: &[String], preferred: &[String]) -> Option<String> {
    voices
        .iter()
        .find(|v| preferred.iter().any(|p| !p.is_empty() && v.contains(p.as_str())))
        .cloned()
}

/// Speaks one utterance at a time; a new one cuts off the previous
pub struct Speaker {
    backend: Option<Backend>,
    config: SpeechConfig,
    voice: Option<Option<String>>,
    current: Option<Child>,
}

impl Speaker {
    pub fn new(config: &SpeechConfig) -> Self {
        let backend = if config.enabled {
            Backend::detect(config.backend)
        } else {
            None
        };
        match backend {
            Some(b) => tracing::info!(program = b.program(), "Speech enabled"),
            None => tracing::info!("No speech program available, pronunciation disabled"),
        }
        Speaker {
            backend,
            config: config.clone(),
            voice: None,
            current: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn speak(&mut self, text: &str) {
        let Some(backend) = self.backend else {
            return;
        };
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.cancel(backend).await;

        let voice = self.resolve_voice(backend).await;
        let args = backend.speak_args(text, &self.config.language, self.config.rate, voice.as_deref());

        match Command::new(backend.program())
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => {
                tracing::debug!(text, voice = ?voice, "Speaking");
                self.current = Some(child);
            }
            Err(e) => tracing::warn!(program = backend.program(), error = %e, "Failed to start speech"),
        }
    }

    async fn cancel(&mut self, backend: Backend) {
        if let Some(mut child) = self.current.take() {
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
        // speech-dispatcher keeps talking after the client exits
        if backend == Backend::SpdSay {
            let _ = Command::new(backend.program())
                .arg("-C")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
        }
    }

    /// Look up the preferred voice once, then reuse it
    async fn resolve_voice(&mut self, backend: Backend) -> Option<String> {
        if let Some(voice) = &self.voice {
            return voice.clone();
        }

        let voice = match Command::new(backend.program())
            .args(backend.list_voices_args())
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => {
                let listing = String::from_utf8_lossy(&output.stdout);
                let voices = backend.parse_voices(&listing);
                pick_voice(&voices, &self.config.preferred_voices)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Could not list voices, using default");
                None
            }
        };

        if voice.is_none() {
            tracing::debug!("No preferred voice found, using default");
        }
        self.voice = Some(voice.clone());
        voice
    }
}
